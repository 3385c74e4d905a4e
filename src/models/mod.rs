pub mod answer;
pub mod filter;
pub mod movie;
pub mod question;

pub use answer::{AnswerScalar, AnswerSet, AnswerValue, UserAnswer};
pub use filter::DiscoverFilter;
pub use movie::{CandidateMovie, Genre, MovieDetail, ScoredMovie};
pub use question::{Question, QuestionCategory, QuestionOption, QuestionType};
