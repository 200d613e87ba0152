use {
    serde::{Deserialize, Serialize},
    std::collections::HashSet,
};

/// An authorization record for a reviewer identity.
///
/// Mentors are created and removed by an administrative process that is
/// independent of submission validation; the validation pipeline only ever
/// reads them.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    /// Unique identity of the mentor.
    pub email: String,
    /// Classification tags the mentor is allowed to review.
    #[serde(default)]
    pub classifications: HashSet<String>,
}
