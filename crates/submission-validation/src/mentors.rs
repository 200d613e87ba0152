use {anyhow::Result, std::collections::HashSet};

/// Lookup of the classification tags granted to a mentor.
///
/// This is the one stateful dependency of the validation core. It is an
/// injected capability so tests can substitute a fake implementation
/// without touching shared global state.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait ClassificationFetching: Send + Sync {
    /// Resolves the classification tags granted to `email`.
    ///
    /// An identity with no roster entry resolves to the empty set; only a
    /// failure of the lookup itself is an error.
    async fn classifications_for(&self, email: &str) -> Result<HashSet<String>>;
}
