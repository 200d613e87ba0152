use serde::{Deserialize, Serialize};

/// Catalog of predefined reviewer remarks a learner may attach to a
/// submission. Selections outside this catalog are rejected at validation
/// time.
pub const CANNED_RESPONSES: &[&str] = &[
    "This is awesome",
    "This kind of sucks",
    "You didn't satisfy all criteria",
];

/// The achievement a submission claims.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
}

/// One URL-bearing item supporting a submission's claim. Owned exclusively
/// by its parent submission.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

/// A learner's evidence package pending review.
///
/// Constructed transiently in memory and persisted only after the full
/// validation pass succeeds; never partially persisted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub achievement: Achievement,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
    pub criteria_url: String,
    /// Email of the learner who submitted the evidence package.
    pub learner: String,
    /// Email of the proposed reviewer. A submission without a reviewer is
    /// still awaiting assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
    /// Classification tags describing the subject matter of the submission.
    /// A reviewer must hold at least one of them.
    #[serde(default)]
    pub classifications: Vec<String>,
    /// Canned-response selections attached by the learner, a subset of
    /// [`CANNED_RESPONSES`].
    #[serde(default)]
    pub canned_responses: Vec<String>,
}

impl Submission {
    /// Whether the learner behind this submission is assumed to be a minor.
    ///
    /// The presence of any canned-response selection is the proxy signal for
    /// learner-minor status; the content of the selections does not matter.
    /// Pure and re-derivable at any point in the submission's life, also
    /// after persistence.
    pub fn is_learner_underage(&self) -> bool {
        !self.canned_responses.is_empty()
    }
}
