use core::fmt;
use core::ops;

/// Enumeration of the axes of two-dimensional space.
///
/// Can be used to infallibly index 2-component arrays and vectors.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Axis {
    X = 0,
    Y = 1,
}

impl Axis {
    /// Both axes in the standard order, [X, Y].
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    /// Convert the axis to a number for indexing 2-element arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the axis which is not this one.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Format the axis as one of the strings "x" or "y" (lowercase).
impl fmt::LowerHex for Axis {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

impl From<Axis> for usize {
    #[inline]
    fn from(value: Axis) -> Self {
        value as usize
    }
}

mod impl_index_axis {
    use super::*;
    use euclid::{Point2D, Size2D, Vector2D};

    impl<T> ops::Index<Axis> for [T; 2] {
        type Output = T;

        #[inline]
        fn index(&self, index: Axis) -> &Self::Output {
            &self[index as usize]
        }
    }
    impl<T> ops::IndexMut<Axis> for [T; 2] {
        #[inline]
        fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
            &mut self[index as usize]
        }
    }

    macro_rules! impl_xy_e {
        ($x:ident $y:ident, $($type:tt)*) => {
            impl<T, U> ops::Index<Axis> for $($type)*<T, U> {
                type Output = T;

                #[inline]
                fn index(&self, index: Axis) -> &Self::Output {
                    match index {
                        Axis::X => &self.$x,
                        Axis::Y => &self.$y,
                    }
                }
            }
            impl<T, U> ops::IndexMut<Axis> for $($type)*<T, U> {
                #[inline]
                fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
                    match index {
                        Axis::X => &mut self.$x,
                        Axis::Y => &mut self.$y,
                    }
                }
            }
        };
    }

    impl_xy_e!(x y, Point2D);
    impl_xy_e!(x y, Vector2D);
    impl_xy_e!(width height, Size2D);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{FreePoint, FreeSize};

    #[test]
    fn index_point_and_size() {
        let mut point = FreePoint::new(1.0, 2.0);
        point[Axis::Y] = 5.0;
        assert_eq!(point, FreePoint::new(1.0, 5.0));
        assert_eq!(FreeSize::new(3.0, 4.0)[Axis::X], 3.0);
    }

    #[test]
    fn other() {
        for axis in Axis::ALL {
            assert_ne!(axis, axis.other());
            assert_eq!(axis, axis.other().other());
        }
    }

    #[test]
    fn lower_hex() {
        assert_eq!(format!("{:x}{:x}", Axis::X, Axis::Y), "xy");
    }
}
