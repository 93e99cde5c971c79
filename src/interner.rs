use std::{collections::HashMap, hash::Hash};

use derivative::Derivative;

use crate::{error::NodeError, handle::Handle};

/// Maps node identities to dense handles.
///
/// Handles are issued in registration order starting at zero and are never
/// reused, so the issued handles always form the contiguous range
/// `0..self.len()`.  No reverse map is kept: whether a handle was ever issued
/// follows from that invariant alone.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone, H: Clone"),
    Debug(bound = "N: std::fmt::Debug, H: std::fmt::Debug"),
    Default(bound = "")
)]
pub struct NodeInterner<N, H> {
    handles: HashMap<N, H>,
    count: usize,
}

impl<N, H> NodeInterner<N, H>
where
    N: Eq + Hash,
    H: Handle,
{
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `identity`, issuing the next handle if the
    /// identity has not been seen before.
    ///
    /// # Panics
    ///
    /// Panics if a new handle is needed and the handle type cannot represent
    /// it.  Use [`Self::try_get_or_assign`] to handle that case.
    pub fn get_or_assign(&mut self, identity: N) -> H {
        match self.try_get_or_assign(identity) {
            Ok(handle) => handle,
            Err(_) => panic!(
                "handle space exhausted: {} handles issued for a {}-byte handle type",
                self.count,
                size_of::<H>()
            ),
        }
    }

    /// Returns the handle for `identity`, issuing the next handle if the
    /// identity has not been seen before.  Fails only when a new handle is
    /// needed and the handle type cannot represent it.
    pub fn try_get_or_assign(&mut self, identity: N) -> Result<H, NodeError> {
        if let Some(&handle) = self.handles.get(&identity) {
            return Ok(handle);
        }
        let handle = H::from_index(self.count).ok_or(NodeError::GeneralError)?;
        self.handles.insert(identity, handle);
        self.count += 1;
        Ok(handle)
    }

    /// Checks whether `identity` has been registered.
    pub fn exists(&self, identity: &N) -> bool {
        self.handles.contains_key(identity)
    }

    /// Gets the handle of a registered identity.
    pub fn handle_of(&self, identity: &N) -> Option<H> {
        self.handles.get(identity).copied()
    }

    /// Gets the handle of a registered identity, or [`NodeError::NotExist`].
    pub fn resolve(&self, identity: &N) -> Result<H, NodeError> {
        self.handle_of(identity).ok_or(NodeError::NotExist)
    }
}

impl<N, H> NodeInterner<N, H>
where
    H: Handle,
{
    /// Checks whether `handle` was issued to some identity.
    pub fn handle_is_issued(&self, handle: H) -> bool {
        handle.index() < self.count
    }

    /// Gets the number of issued handles.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Checks whether no handle has been issued yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates over every issued handle in ascending order.
    pub fn handles(&self) -> impl Iterator<Item = H> + use<N, H> {
        // Every index below `count` was produced by `H::from_index`.
        (0..self.count).filter_map(H::from_index)
    }
}
