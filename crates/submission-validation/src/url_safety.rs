//! Deny-list based URL scheme filtering.

use std::collections::HashSet;

/// Schemes that scriptable clients execute instead of fetching.
const UNSAFE_SCHEMES: &[&str] = &["javascript", "vbscript", "data"];

/// Deny listed URL schemes.
#[derive(Clone, Debug)]
pub struct SchemeDenyList(HashSet<String>);

impl SchemeDenyList {
    /// Creates the standard deny list, with `javascript:` as the canonical
    /// entry.
    pub fn standard() -> Self {
        Self::from_schemes(UNSAFE_SCHEMES.iter().copied())
    }

    pub fn from_schemes<'a>(schemes: impl IntoIterator<Item = &'a str>) -> Self {
        Self(schemes.into_iter().map(str::to_lowercase).collect())
    }

    /// Returns false iff the URL carries a deny listed scheme.
    ///
    /// Pure predicate over the raw string. No URL parser is involved because
    /// the inputs include relative paths and malformed URLs which must still
    /// be classified rather than rejected outright.
    pub fn is_safe(&self, url: &str) -> bool {
        match scheme_of(url) {
            Some(scheme) => !self.0.contains(&scheme),
            None => true,
        }
    }
}

impl Default for SchemeDenyList {
    fn default() -> Self {
        Self::standard()
    }
}

/// Extracts the scheme of `url`, lowercased and with ASCII whitespace and
/// control characters stripped (covers `jav\tascript:` style obfuscation).
///
/// Returns `None` for schemeless URLs and for strings whose part before the
/// separator could never be a scheme (RFC 3986 restricts schemes to
/// alphanumerics, `+`, `-` and `.`).
fn scheme_of(url: &str) -> Option<String> {
    let (candidate, _) = url.split_once(':')?;
    let stripped: String = candidate
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let plausible = !stripped.is_empty()
        && stripped
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    plausible.then_some(stripped)
}
