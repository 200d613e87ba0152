//! Contains models that are shared between the validation core and the
//! submission store.

pub mod mentor;
pub mod submission;

pub use {
    mentor::Mentor,
    submission::{Achievement, CANNED_RESPONSES, EvidenceItem, Submission},
};
