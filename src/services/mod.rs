pub mod filters;
pub mod matching;
pub mod providers;
pub mod scoring;
pub mod tables;
