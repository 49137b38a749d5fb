use uuid::Uuid;

pub struct RedisKey;

impl RedisKey {
    pub fn review(id: Uuid) -> String {
        format!("review:{id}")
    }

    /// Sorted set of review ids for a movie, scored by creation time in ms.
    pub fn movie_reviews(movie_id: i64) -> String {
        format!("movie:{movie_id}:reviews")
    }
}
