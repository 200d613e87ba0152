//! In-memory persistence for submissions and the mentor roster.
//!
//! [`store::SubmissionStore`] gates every write behind the injected
//! validator; [`roster::MentorRoster`] is the administrative surface for
//! mentors and doubles as the classification lookup the validator reads.

pub mod roster;
pub mod store;

pub use {
    roster::{AddMentorError, MentorRoster},
    store::{AddSubmissionError, SubmissionId, SubmissionStore},
};
