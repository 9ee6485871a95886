use std::fmt;

/// Why target discovery produced nothing to filter.
///
/// The first two variants are expected conditions of a best-effort
/// integration; `ProbeFailed` is the only genuinely unexpected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// No work-list handle published in the context store yet.
    WorkListUnavailable,
    /// The structural fallback found no table with a usable row binding.
    NoCompatibleBinding,
    /// A locator or capability probe failed outright.
    ProbeFailed(String),
}

impl DiscoveryError {
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::WorkListUnavailable => "work_list_unavailable",
            Self::NoCompatibleBinding => "no_compatible_binding",
            Self::ProbeFailed(_) => "probe_failed",
        }
    }
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkListUnavailable => write!(f, "no work list found in the context store"),
            Self::NoCompatibleBinding => write!(f, "no table with a filterable row binding found"),
            Self::ProbeFailed(message) => write!(f, "target discovery failed: {message}"),
        }
    }
}

impl std::error::Error for DiscoveryError {}
