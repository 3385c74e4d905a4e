pub mod postgres;
pub mod questions;
pub mod redis;

pub use postgres::create_pool;
pub use questions::load_questions;
pub use redis::create_redis_client;
pub use redis::Cache;
pub use redis::CacheKey;
pub use redis::CacheWriterHandle;
