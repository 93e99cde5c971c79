use std::{fmt::Debug, hash::Hash};

/// A dense integer identifier assigned to a node identity by a
/// [`NodeInterner`](crate::interner::NodeInterner).
///
/// The handle width is chosen per graph instance through this trait.  Handles
/// are issued contiguously starting at zero, so a narrow type such as `u16`
/// caps the number of distinct nodes a graph can hold.
pub trait Handle: Copy + Eq + Ord + Hash + Debug {
    /// Converts a zero-based index into a handle, or `None` if the index does
    /// not fit in the handle type.
    fn from_index(index: usize) -> Option<Self>;

    /// Gets the zero-based index of this handle.
    fn index(self) -> usize;
}

macro_rules! impl_handle {
    ($($t:ty),* $(,)?) => {
        $(
            impl Handle for $t {
                fn from_index(index: usize) -> Option<Self> {
                    <$t>::try_from(index).ok()
                }

                fn index(self) -> usize {
                    // Handles are only ever created from a `usize` index.
                    self as usize
                }
            }
        )*
    };
}

impl_handle!(u8, u16, u32, u64, usize);
