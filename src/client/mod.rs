//! Client side of the review API: a typed HTTP client and the per-movie
//! review widget state built on top of it.

pub mod api;
pub mod draft;
pub mod stats;
pub mod votes;
pub mod widget;

pub use api::{ClientError, ReviewApi};
pub use draft::{ReviewDraft, sanitize_input};
pub use stats::ReviewStats;
pub use votes::{Vote, VoteLedger, VoteTally};
pub use widget::{Notice, NoticeLevel, ReviewWidget};
