use std::{cmp::Ordering, fmt::Debug, ops::Add};

/// A numeric edge cost.
///
/// Costs accumulate with the type's own arithmetic; overflow and NaN are the
/// caller's concern.  Ordering goes through [`Cost::cost_cmp`], which is total
/// for every implementor: integers use their natural order and floats use the
/// IEEE 754 total order, so a NaN cost is a distinct value that sorts after
/// every other cost instead of breaking set semantics.
pub trait Cost: Copy + Debug + PartialEq + PartialOrd + Add<Output = Self> {
    /// The additive identity, used as the distance of a search's start node.
    fn zero() -> Self;

    /// Compares two costs under a total order.
    fn cost_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_integer_cost {
    ($($t:ty),* $(,)?) => {
        $(
            impl Cost for $t {
                fn zero() -> Self {
                    0
                }

                fn cost_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

macro_rules! impl_float_cost {
    ($($t:ty),* $(,)?) => {
        $(
            impl Cost for $t {
                fn zero() -> Self {
                    0.0
                }

                fn cost_cmp(&self, other: &Self) -> Ordering {
                    <$t>::total_cmp(self, other)
                }
            }
        )*
    };
}

impl_integer_cost!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float_cost!(f32, f64);
