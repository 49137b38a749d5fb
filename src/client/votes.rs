use std::collections::HashMap;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Helpful,
    NotHelpful,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub helpful: u32,
    pub not_helpful: u32,
    pub user_vote: Option<Vote>,
}

impl VoteTally {
    fn retract(&mut self, vote: Vote) {
        match vote {
            Vote::Helpful => self.helpful = self.helpful.saturating_sub(1),
            Vote::NotHelpful => self.not_helpful = self.not_helpful.saturating_sub(1),
        }
    }

    fn cast(&mut self, vote: Vote) {
        match vote {
            Vote::Helpful => self.helpful += 1,
            Vote::NotHelpful => self.not_helpful += 1,
        }
    }
}

/// Helpful / not-helpful marks kept on this device only.
///
/// The ledger is a UI annotation: it is never sent to the server and is
/// not part of a review document.
#[derive(Debug, Clone, Default)]
pub struct VoteLedger {
    tallies: HashMap<Uuid, VoteTally>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Casting the current vote again retracts it; casting the other one switches.
    pub fn vote(&mut self, review_id: Uuid, vote: Vote) -> VoteTally {
        let tally = self.tallies.entry(review_id).or_default();

        match tally.user_vote {
            Some(current) if current == vote => {
                tally.retract(vote);
                tally.user_vote = None;
            }
            previous => {
                if let Some(previous) = previous {
                    tally.retract(previous);
                }
                tally.cast(vote);
                tally.user_vote = Some(vote);
            }
        }

        *tally
    }

    pub fn tally(&self, review_id: Uuid) -> VoteTally {
        self.tallies.get(&review_id).copied().unwrap_or_default()
    }

    pub fn forget(&mut self, review_id: Uuid) {
        self.tallies.remove(&review_id);
    }
}
