use crate::{
    client::api::ClientError,
    models::{
        Review,
        review::{check_rating, check_review, check_user},
    },
};

/// Form input for a new or edited review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub user: String,
    pub review: String,
    pub rating: u8,
}

impl ReviewDraft {
    pub fn new(user: impl Into<String>, review: impl Into<String>, rating: u8) -> Self {
        Self {
            user: user.into(),
            review: review.into(),
            rating,
        }
    }

    /// Pre-filled form for editing an existing review.
    pub fn from_review(review: &Review) -> Self {
        Self::new(review.user.clone(), review.review.clone(), review.rating)
    }

    /// Sanitized copy that satisfies the server's field rules.
    pub fn validate(&self) -> Result<ReviewDraft, ClientError> {
        let user = sanitize_input(&self.user);
        let review = sanitize_input(&self.review);

        check_user(&user).map_err(ClientError::Invalid)?;
        check_review(&review).map_err(ClientError::Invalid)?;
        let rating = check_rating(i64::from(self.rating))
            .map_err(|_| ClientError::Invalid("Please select a rating from 1 to 5 stars".into()))?;

        Ok(ReviewDraft {
            user,
            review,
            rating,
        })
    }
}

/// Drops anything that looks like an HTML tag and trims the rest.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);

    out.trim().to_string()
}
