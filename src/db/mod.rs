pub mod review;

pub use review::{MemoryReviewStore, RedisReviewStore, ReviewStore};
