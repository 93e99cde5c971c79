/// Errors reported by node lookups and node registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum NodeError {
    /// The node identity was never registered.
    #[error("node does not exist")]
    NotExist,
    /// The node identity is already registered.
    #[error("node is already registered")]
    Duplicate,
    /// The node could not be registered, e.g. because the handle space is
    /// exhausted.
    #[error("node could not be registered: handle space exhausted")]
    GeneralError,
}

/// Errors reported by edge mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum EdgeError {
    /// No edge with the given endpoints and cost exists.
    #[error("edge does not exist")]
    NotExist,
    /// An edge with the given endpoints and cost is already present.
    #[error("edge is already registered")]
    Duplicate,
    /// The edge could not be changed for another reason.
    #[error("edge operation failed")]
    GeneralError,
}
