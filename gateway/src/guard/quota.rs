//! Quota exhaustion detection.
//!
//! Ordinary throttling and exhausted allocations both arrive as HTTP 429.
//! Only the response body tells them apart, so each guarded dependency is
//! configured with the keywords its backend uses for the latter.

/// Body fragments that mark a 429 as quota exhaustion rather than throttling.
pub const DEFAULT_QUOTA_MARKERS: &[&str] = &[
    "quota",
    "resource_exhausted",
    "daily limit",
    "over_query_limit",
];

/// Case-insensitive keyword matcher for quota exhaustion payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaDetector {
    markers: Vec<String>,
}

impl QuotaDetector {
    /// Creates a detector matching any of `markers`.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Returns `true` if `body` carries one of the configured markers.
    #[must_use]
    pub fn is_quota_exhausted(&self, body: &str) -> bool {
        let lowered = body.to_lowercase();
        self.markers.iter().any(|m| lowered.contains(m.as_str()))
    }

    /// The normalized markers.
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Default for QuotaDetector {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTA_MARKERS)
    }
}
