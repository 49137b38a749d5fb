use crate::models::Review;

/// Aggregate figures shown above a movie's review list.
///
/// Only rated reviews count towards the average, distribution and
/// recommendation share; `total_reviews` counts everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewStats {
    pub total_reviews: usize,
    pub rated_reviews: usize,
    /// Rounded to one decimal.
    pub average_rating: f64,
    /// Index 0 holds one-star reviews, index 4 five-star reviews.
    pub distribution: [usize; 5],
    pub five_star_count: usize,
    /// Share of rated reviews with four or five stars, 0..=100.
    pub recommend_percent: u8,
}

impl ReviewStats {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut distribution = [0usize; 5];
        let mut sum = 0u64;
        let mut rated = 0usize;

        for review in reviews.iter().filter(|r| r.is_rated()) {
            rated += 1;
            sum += u64::from(review.rating);
            if (1..=5).contains(&review.rating) {
                distribution[usize::from(review.rating - 1)] += 1;
            }
        }

        if rated == 0 {
            return Self {
                total_reviews: reviews.len(),
                ..Self::default()
            };
        }

        let average = sum as f64 / rated as f64;
        let four_plus = distribution[3] + distribution[4];

        Self {
            total_reviews: reviews.len(),
            rated_reviews: rated,
            average_rating: (average * 10.0).round() / 10.0,
            distribution,
            five_star_count: distribution[4],
            recommend_percent: ((four_plus as f64 / rated as f64) * 100.0).round() as u8,
        }
    }

    pub fn count(&self, stars: u8) -> usize {
        match stars {
            1..=5 => self.distribution[usize::from(stars - 1)],
            _ => 0,
        }
    }

    /// Percentage of rated reviews with exactly `stars` stars.
    pub fn share(&self, stars: u8) -> f64 {
        if self.rated_reviews == 0 {
            return 0.0;
        }
        self.count(stars) as f64 / self.rated_reviews as f64 * 100.0
    }
}
