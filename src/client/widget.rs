use uuid::Uuid;

use crate::{
    client::{
        api::{ClientError, ReviewApi},
        draft::ReviewDraft,
        stats::ReviewStats,
        votes::{Vote, VoteLedger, VoteTally},
    },
    models::Review,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Danger,
}

/// Transient message for the user, replaced by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Review list of one movie plus the state of its forms.
///
/// The list is only ever replaced by a fresh fetch: mutations are sent to the
/// server and followed by a reload, never patched in locally. A failed request
/// leaves the list untouched and sets a notice.
pub struct ReviewWidget {
    api: ReviewApi,
    movie_id: i64,
    reviews: Vec<Review>,
    editing: Option<Uuid>,
    votes: VoteLedger,
    notice: Option<Notice>,
}

impl ReviewWidget {
    pub fn new(api: ReviewApi, movie_id: i64) -> Self {
        Self {
            api,
            movie_id,
            reviews: Vec::new(),
            editing: None,
            votes: VoteLedger::new(),
            notice: None,
        }
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn stats(&self) -> ReviewStats {
        ReviewStats::from_reviews(&self.reviews)
    }

    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn vote(&mut self, review_id: Uuid, vote: Vote) -> VoteTally {
        self.votes.vote(review_id, vote)
    }

    pub fn votes(&self, review_id: Uuid) -> VoteTally {
        self.votes.tally(review_id)
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.api.list_for_movie(self.movie_id).await {
            Ok(reviews) => {
                self.reviews = reviews;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load reviews for movie {}: {}", self.movie_id, e);
                self.notify(NoticeLevel::Danger, "Failed to load reviews");
                Err(e)
            }
        }
    }

    pub async fn submit(&mut self, draft: &ReviewDraft) -> Result<Uuid, ClientError> {
        let draft = self.checked(draft)?;

        let id = match self.api.create(self.movie_id, &draft).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Failed to submit review: {}", e);
                self.notify(
                    NoticeLevel::Danger,
                    "Failed to submit review. Please try again.",
                );
                return Err(e);
            }
        };

        self.notify(NoticeLevel::Success, "Review submitted successfully!");
        self.reload().await;
        Ok(id)
    }

    /// Switches a displayed review into edit mode and returns its pre-filled form.
    pub fn begin_edit(&mut self, review_id: Uuid) -> Option<ReviewDraft> {
        let draft = self
            .reviews
            .iter()
            .find(|r| r.id == review_id)
            .map(ReviewDraft::from_review)?;
        self.editing = Some(review_id);
        Some(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn save_edit(&mut self, draft: &ReviewDraft) -> Result<(), ClientError> {
        let review_id = self
            .editing
            .ok_or_else(|| ClientError::Invalid("No review is being edited".into()))?;
        let draft = self.checked(draft)?;

        if let Err(e) = self.api.update(review_id, self.movie_id, &draft).await {
            tracing::warn!("Failed to update review {}: {}", review_id, e);
            self.notify(
                NoticeLevel::Danger,
                "Failed to update review. Please try again.",
            );
            return Err(e);
        }

        self.editing = None;
        self.notify(NoticeLevel::Success, "Review updated successfully!");
        self.reload().await;
        Ok(())
    }

    /// Returns `Ok(false)` when `confirm` declines; nothing is sent in that case.
    pub async fn delete<F>(&mut self, review_id: Uuid, confirm: F) -> Result<bool, ClientError>
    where
        F: FnOnce(&Review) -> bool,
    {
        let Some(review) = self.reviews.iter().find(|r| r.id == review_id) else {
            return Err(ClientError::Invalid("Review is not displayed".into()));
        };
        if !confirm(review) {
            return Ok(false);
        }

        if let Err(e) = self.api.delete(review_id).await {
            tracing::warn!("Failed to delete review {}: {}", review_id, e);
            self.notify(
                NoticeLevel::Danger,
                "Failed to delete review. Please try again.",
            );
            return Err(e);
        }

        if self.editing == Some(review_id) {
            self.editing = None;
        }
        self.votes.forget(review_id);
        self.notify(NoticeLevel::Success, "Review deleted successfully!");
        self.reload().await;
        Ok(true)
    }

    fn checked(&mut self, draft: &ReviewDraft) -> Result<ReviewDraft, ClientError> {
        draft.validate().inspect_err(|e| {
            self.notify(NoticeLevel::Warning, e.to_string());
        })
    }

    async fn reload(&mut self) {
        // The mutation already succeeded, a failed refresh only shows up as a notice
        let _ = self.load().await;
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice::new(level, message));
    }
}
