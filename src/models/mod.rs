pub mod redis;
pub mod review;

pub use review::{
    DeleteOutcome, InsertOutcome, NewReview, Review, ReviewUpdate, StatusResponse, UpdateOutcome,
};
