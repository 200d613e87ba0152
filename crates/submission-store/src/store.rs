use {
    dashmap::DashMap,
    model::Submission,
    std::{
        fmt,
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
    },
    submission_validation::{SubmissionValidating, ValidationError},
    thiserror::Error,
};

/// Opaque identifier assigned to a submission when it is stored.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SubmissionId(u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum AddSubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AddSubmissionError {
    /// Whether the caller may retry the same submission unchanged. Only
    /// infrastructure failures qualify; policy rejections require the input
    /// to be corrected first.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Validation(ValidationError::Infrastructure(_))
        )
    }
}

/// Stores submissions, gating every write behind the injected validator.
pub struct SubmissionStore {
    validator: Arc<dyn SubmissionValidating>,
    submissions: DashMap<SubmissionId, Submission>,
    next_id: AtomicU64,
}

impl SubmissionStore {
    pub fn new(validator: Arc<dyn SubmissionValidating>) -> Self {
        Self {
            validator,
            submissions: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Validates and stores a submission.
    ///
    /// The write happens only after the validator fully resolves; a rejected
    /// or unverifiable submission leaves the store untouched.
    pub async fn create(
        &self,
        submission: Submission,
    ) -> Result<SubmissionId, AddSubmissionError> {
        self.validator.validate(&submission).await?;
        let id = SubmissionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.submissions.insert(id, submission);
        tracing::debug!(%id, "stored submission");
        Ok(id)
    }

    pub fn single_submission(&self, id: &SubmissionId) -> Option<Submission> {
        self.submissions.get(id).map(|entry| entry.value().clone())
    }

    pub fn count(&self) -> usize {
        self.submissions.len()
    }

    pub fn remove_all(&self) {
        self.submissions.clear();
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::roster::MentorRoster,
        anyhow::anyhow,
        maplit::hashset,
        model::{Achievement, EvidenceItem, Mentor},
        submission_validation::{
            MockClassificationFetching, MockSubmissionValidating, REVIEWER_NOT_PERMITTED,
            SchemeDenyList, SubmissionValidator,
        },
    };

    fn base_submission(tweak: impl FnOnce(&mut Submission)) -> Submission {
        let mut submission = Submission {
            achievement: Achievement {
                name: "HTML Basics".to_string(),
                description: "Knows their way around markup".to_string(),
                image_url: "http://example.org/badge.png".to_string(),
            },
            evidence: vec![
                EvidenceItem {
                    url: "http://example.org/evidence/0".to_string(),
                    reflection: None,
                },
                EvidenceItem {
                    url: "http://example.org/evidence/1".to_string(),
                    reflection: Some("my best work".to_string()),
                },
            ],
            criteria_url: "http://example.org/criteria".to_string(),
            learner: "learner@example.org".to_string(),
            reviewer: None,
            classifications: vec!["math".to_string()],
            canned_responses: vec![],
        };
        tweak(&mut submission);
        submission
    }

    /// A store wired up against a live roster, the way the higher-level API
    /// layer assembles it.
    fn store_with_roster() -> (Arc<MentorRoster>, SubmissionStore) {
        let roster = Arc::new(MentorRoster::default());
        let validator = SubmissionValidator::new(roster.clone(), SchemeDenyList::standard());
        (roster, SubmissionStore::new(Arc::new(validator)))
    }

    async fn ensure_invalid(tweak: impl FnOnce(&mut Submission)) {
        let (_roster, store) = store_with_roster();
        let err = store.create(base_submission(tweak)).await.unwrap_err();
        assert!(matches!(
            err,
            AddSubmissionError::Validation(ValidationError::Invalid(_))
        ));
        assert!(!err.is_transient());
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn accepts_reviewers_with_proper_permissions() {
        let (roster, store) = store_with_roster();
        roster
            .create(Mentor {
                email: "foo@bar.org".to_string(),
                classifications: hashset! {"math".to_string()},
            })
            .unwrap();

        let id = store
            .create(base_submission(|s| {
                s.reviewer = Some("foo@bar.org".to_string())
            }))
            .await
            .unwrap();
        assert_eq!(store.count(), 1);
        assert!(store.single_submission(&id).is_some());
    }

    #[tokio::test]
    async fn rejects_reviewers_without_proper_permissions() {
        let (_roster, store) = store_with_roster();
        let err = store
            .create(base_submission(|s| {
                s.reviewer = Some("foo@bar.org".to_string())
            }))
            .await
            .unwrap_err();
        match err {
            AddSubmissionError::Validation(ValidationError::Invalid(errors)) => {
                assert_eq!(errors.get("reviewer"), Some(REVIEWER_NOT_PERMITTED));
            }
            other => panic!("expected a policy rejection, got {other:?}"),
        }
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn propagates_errors_in_reviewer_validation() {
        let mut mentors = MockClassificationFetching::new();
        mentors
            .expect_classifications_for()
            .returning(|_| Err(anyhow!("oof")));
        let validator = SubmissionValidator::new(Arc::new(mentors), SchemeDenyList::standard());
        let store = SubmissionStore::new(Arc::new(validator));

        let err = store
            .create(base_submission(|s| {
                s.reviewer = Some("foo@bar.org".to_string())
            }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "oof");
        assert!(err.is_transient());
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn rejects_unsafe_urls_for_evidence() {
        ensure_invalid(|s| s.evidence[1].url = "javascript:lol()".to_string()).await;
    }

    #[tokio::test]
    async fn rejects_unsafe_urls_for_criteria() {
        ensure_invalid(|s| s.criteria_url = "javascript:lol()".to_string()).await;
    }

    #[tokio::test]
    async fn rejects_unsafe_urls_for_image() {
        ensure_invalid(|s| s.achievement.image_url = "javascript:lol()".to_string()).await;
    }

    #[tokio::test]
    async fn works_with_canned_responses() {
        let (_roster, store) = store_with_roster();
        let submission = base_submission(|s| {
            s.canned_responses = vec![
                "This is awesome".to_string(),
                "This kind of sucks".to_string(),
                "You didn't satisfy all criteria".to_string(),
            ]
        });
        assert!(submission.is_learner_underage());

        let id = store.create(submission).await.unwrap();
        // The derived attribute stays re-derivable after persistence.
        assert!(store.single_submission(&id).unwrap().is_learner_underage());
    }

    #[tokio::test]
    async fn works_without_canned_responses() {
        let (_roster, store) = store_with_roster();
        let submission = base_submission(|_| ());
        assert!(!submission.is_learner_underage());

        let id = store.create(submission).await.unwrap();
        assert!(!store.single_submission(&id).unwrap().is_learner_underage());
    }

    #[tokio::test]
    async fn no_write_happens_when_the_validator_rejects() {
        let mut validator = MockSubmissionValidating::new();
        validator.expect_validate().times(1).returning(|_| {
            let mut errors = submission_validation::FieldErrors::default();
            errors.insert("criteriaUrl", "url must not be empty");
            Err(ValidationError::Invalid(errors))
        });
        let store = SubmissionStore::new(Arc::new(validator));

        assert!(store.create(base_submission(|_| ())).await.is_err());
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn remove_all_empties_the_store() {
        let (_roster, store) = store_with_roster();
        store.create(base_submission(|_| ())).await.unwrap();
        store.create(base_submission(|_| ())).await.unwrap();
        assert_eq!(store.count(), 2);

        store.remove_all();
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn assigns_distinct_ids() {
        let (_roster, store) = store_with_roster();
        let first = store.create(base_submission(|_| ())).await.unwrap();
        let second = store.create(base_submission(|_| ())).await.unwrap();
        assert_ne!(first, second);
    }
}
