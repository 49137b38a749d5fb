use std::sync::Arc;

use bb8::Pool;
use bb8_redis::RedisConnectionManager;

use crate::db::ReviewStore;

#[derive(Clone)]
pub struct AppState {
    pub reviews: ReviewStoreHandle,
}

impl AppState {
    pub fn new(reviews: ReviewStoreHandle) -> Self {
        Self { reviews }
    }
}

pub type ReviewStoreHandle = Arc<dyn ReviewStore>;

pub type RedisClient = Pool<RedisConnectionManager>;
