use std::fmt;

/// The kind of failure behind an [`Error`].
///
/// `EmptyGroup` is never constructed directly by this crate — an empty
/// contribution group is absorbed silently per the aggregation engine's
/// reducer table (`sum` -> `0.0`, everything else -> `NaN`) — it is kept in
/// the taxonomy because it is a documented, named outcome, not an omission.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// An edge cost was non-positive, NaN, or infinite.
    InvalidEdge,
    /// A node id (source or target) was not present in the graph's id map.
    UnknownNode,
    /// `Network::aggregate` was called before `Network::preprocess`.
    NotPreprocessed,
    /// A reducer name was requested that the aggregation engine doesn't know.
    UnknownReducer,
    /// A contribution group was empty (non-fatal; documented, not raised).
    EmptyGroup,
    /// `Network::aggregate` was called with a cutoff inconsistent with the
    /// cached distance table.
    StaleCache,
    /// A decay's own cutoff exceeded the network's preprocessing cutoff.
    DecayCutoffExceedsNetworkCutoff,
    /// A columnar node/edge table could not be read or written.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidEdge => "invalid edge",
            ErrorKind::UnknownNode => "unknown node",
            ErrorKind::NotPreprocessed => "network not preprocessed",
            ErrorKind::UnknownReducer => "unknown reducer",
            ErrorKind::EmptyGroup => "empty group",
            ErrorKind::StaleCache => "stale distance-table cache",
            ErrorKind::DecayCutoffExceedsNetworkCutoff => "decay cutoff exceeds network cutoff",
            ErrorKind::Io => "I/O error",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Error {
        Error {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}
