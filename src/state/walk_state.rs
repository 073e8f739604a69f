/// Traversal state definitions
///
/// A run starts in `Walking`, leaves it for exactly one outcome state, and
/// then settles in `Done`. The outcome is kept on the run's result.
use std::fmt;

/// Represents the state of a single traversal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkState {
    // ===== Active State =====
    /// Following first links hop by hop
    Walking,

    // ===== Outcome States =====
    /// Current page has a known path to the destination
    FoundInCache,

    /// Hop limit was reached before the destination
    ReachedLimit,

    /// The current page could not be fetched
    FetchFailed,

    /// The fetched page has no qualifying link
    NoLinkFound,

    // ===== Final State =====
    /// The run is complete and its result is frozen
    Done,
}

impl WalkState {
    /// Returns true once the run can take no further hops
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Walking)
    }

    /// Returns true if this outcome means the destination was reached
    pub fn is_success(&self) -> bool {
        matches!(self, Self::FoundInCache)
    }

    /// Returns true if this outcome is flagged as an error on the result
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::ReachedLimit | Self::FetchFailed | Self::NoLinkFound
        )
    }

    /// Converts the state to a database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::FoundInCache => "found_in_cache",
            Self::ReachedLimit => "reached_limit",
            Self::FetchFailed => "fetch_failed",
            Self::NoLinkFound => "no_link_found",
            Self::Done => "done",
        }
    }

    /// Parses a state from a database string representation
    ///
    /// Returns None if the string doesn't match any known state.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "walking" => Some(Self::Walking),
            "found_in_cache" => Some(Self::FoundInCache),
            "reached_limit" => Some(Self::ReachedLimit),
            "fetch_failed" => Some(Self::FetchFailed),
            "no_link_found" => Some(Self::NoLinkFound),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}
