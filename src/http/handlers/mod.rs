pub mod review;

pub use review::{
    create_review_handler, delete_review_handler, get_movie_reviews_handler, get_review_handler,
    update_review_handler,
};
