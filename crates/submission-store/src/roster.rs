use {
    anyhow::Result,
    dashmap::DashMap,
    model::Mentor,
    std::collections::HashSet,
    submission_validation::ClassificationFetching,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum AddMentorError {
    #[error("a mentor with this email already exists")]
    DuplicatedMentor,
}

/// The mentor roster backing reviewer authorization.
///
/// Mentors are created and removed here independently of submission
/// validation; the validation core only ever reads the roster through
/// [`ClassificationFetching`]. Reads take no lock beyond the shard the
/// entry lives in, so concurrent validations don't contend.
#[derive(Default)]
pub struct MentorRoster {
    mentors: DashMap<String, Mentor>,
}

impl MentorRoster {
    pub fn create(&self, mentor: Mentor) -> Result<(), AddMentorError> {
        match self.mentors.entry(mentor.email.clone()) {
            dashmap::Entry::Occupied(_) => Err(AddMentorError::DuplicatedMentor),
            dashmap::Entry::Vacant(entry) => {
                entry.insert(mentor);
                Ok(())
            }
        }
    }

    pub fn count(&self) -> usize {
        self.mentors.len()
    }

    pub fn remove_all(&self) {
        self.mentors.clear();
    }
}

#[async_trait::async_trait]
impl ClassificationFetching for MentorRoster {
    async fn classifications_for(&self, email: &str) -> Result<HashSet<String>> {
        Ok(self
            .mentors
            .get(email)
            .map(|mentor| mentor.classifications.clone())
            .unwrap_or_default())
    }
}
