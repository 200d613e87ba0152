use {
    crate::{mentors::ClassificationFetching, url_safety::SchemeDenyList},
    model::{CANNED_RESPONSES, Submission},
    std::{collections::BTreeMap, fmt, sync::Arc},
};

/// Message attached to the `reviewer` field when the proposed reviewer does
/// not hold any of the submission's classifications.
pub const REVIEWER_NOT_PERMITTED: &str = "reviewer does not have permission to review";

const UNSAFE_URL: &str = "url is not allowed to use this scheme";
const MISSING_URL: &str = "url must not be empty";

/// One message per failing field, keyed by the serialized field path
/// (e.g. `achievement.imageUrl`, `evidence[1].url`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The submission violates content policy. Recoverable by correcting the
    /// named fields; never retried automatically.
    #[error("submission failed validation: {0}")]
    Invalid(FieldErrors),
    /// The classification lookup could not complete. Carried verbatim so the
    /// caller can treat it as a transient failure rather than a rejection.
    #[error(transparent)]
    Infrastructure(#[from] anyhow::Error),
}

/// Entity-level validation contract, invoked on every attempted creation of
/// a submission.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait SubmissionValidating: Send + Sync {
    /// Validates `submission` ahead of persistence.
    ///
    /// Resolves only once the outcome is final; in particular it never
    /// completes while the reviewer lookup is still in flight. Validating
    /// the same submission against an unchanged roster yields the same
    /// outcome every time.
    async fn validate(&self, submission: &Submission) -> Result<(), ValidationError>;
}

pub struct SubmissionValidator {
    mentors: Arc<dyn ClassificationFetching>,
    deny_list: SchemeDenyList,
}

impl SubmissionValidator {
    pub fn new(mentors: Arc<dyn ClassificationFetching>, deny_list: SchemeDenyList) -> Self {
        Self { mentors, deny_list }
    }

    /// Synchronous field and shape checks. Collects every failure instead of
    /// stopping at the first one; no I/O happens here.
    fn intrinsic_errors(&self, submission: &Submission) -> FieldErrors {
        let mut errors = FieldErrors::default();
        self.check_url(
            &mut errors,
            "achievement.imageUrl".to_string(),
            &submission.achievement.image_url,
        );
        self.check_url(
            &mut errors,
            "criteriaUrl".to_string(),
            &submission.criteria_url,
        );
        for (index, item) in submission.evidence.iter().enumerate() {
            self.check_url(&mut errors, format!("evidence[{index}].url"), &item.url);
        }
        for response in &submission.canned_responses {
            if !CANNED_RESPONSES.contains(&response.as_str()) {
                errors.insert(
                    "cannedResponses",
                    format!("unknown canned response: {response:?}"),
                );
            }
        }
        errors
    }

    fn check_url(&self, errors: &mut FieldErrors, field: String, url: &str) {
        if url.is_empty() {
            errors.insert(field, MISSING_URL);
        } else if !self.deny_list.is_safe(url) {
            errors.insert(field, UNSAFE_URL);
        }
    }
}

#[async_trait::async_trait]
impl SubmissionValidating for SubmissionValidator {
    async fn validate(&self, submission: &Submission) -> Result<(), ValidationError> {
        let errors = self.intrinsic_errors(submission);
        if !errors.is_empty() {
            // Short-circuit before issuing the lookup to avoid wasted
            // external calls.
            return Err(ValidationError::Invalid(errors));
        }

        let Some(reviewer) = &submission.reviewer else {
            return Ok(());
        };
        let granted = match self.mentors.classifications_for(reviewer).await {
            Ok(granted) => granted,
            Err(err) => {
                tracing::warn!(%reviewer, ?err, "unable to fetch reviewer classifications");
                return Err(ValidationError::Infrastructure(err));
            }
        };
        // An identity with no roster entry resolves to the empty set, so a
        // missing mentor and a mentor with no classifications are rejected
        // identically. Matching is exact string membership.
        let permitted = submission
            .classifications
            .iter()
            .any(|tag| granted.contains(tag));
        if !permitted {
            let mut errors = FieldErrors::default();
            errors.insert("reviewer", REVIEWER_NOT_PERMITTED);
            return Err(ValidationError::Invalid(errors));
        }
        Ok(())
    }
}
