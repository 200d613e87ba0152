//! Validation of submissions prior to persistence.
//!
//! The validation system is split into two phases:
//! - **Intrinsic** (synchronous): field shape, URL scheme safety and
//!   canned-response catalog membership. No I/O happens here and all
//!   failures are collected into a single field-scoped report.
//! - **Extrinsic** (asynchronous): reviewer authorization against the mentor
//!   roster, reached through the injectable [`ClassificationFetching`]
//!   capability. Runs at most once per validation attempt and only when the
//!   intrinsic phase passed.
//!
//! A failing lookup is an infrastructure failure, not a policy rejection,
//! and propagates verbatim so callers can tell "your data is bad" apart
//! from "we could not check your data".

pub mod mentors;
pub mod url_safety;
pub mod validator;

pub use {
    mentors::ClassificationFetching,
    url_safety::SchemeDenyList,
    validator::{
        FieldErrors, REVIEWER_NOT_PERMITTED, SubmissionValidating, SubmissionValidator,
        ValidationError,
    },
};
#[cfg(any(test, feature = "test-util"))]
pub use {mentors::MockClassificationFetching, validator::MockSubmissionValidating};
