use core::fmt;

use euclid::Point2D;
use manyfmt::Fmt;

use crate::math::{Axis, BoundingVertices, Corner, FreeCoordinate, FreePoint, FreeSize};
use crate::util::ConciseDebug;

/// Axis-Aligned Box data type, in the [`Scene`](crate::math::Scene) coordinate space.
///
/// An [`Aab`] is exactly its four *bounding sides*: the left, right, bottom, and top
/// coordinates. It is always the case that `left <= right` and `bottom <= top`, and
/// no coordinate is NaN.
#[derive(Copy, Clone, PartialEq)]
pub struct Aab {
    lower_bounds: FreePoint,
    upper_bounds: FreePoint,
}

impl Aab {
    /// Constructs an [`Aab`] from its four sides.
    ///
    /// Panics if the sides are not in the proper order or if they are NaN.
    #[inline]
    #[track_caller]
    pub fn new(
        left: FreeCoordinate,
        right: FreeCoordinate,
        bottom: FreeCoordinate,
        top: FreeCoordinate,
    ) -> Self {
        Self::from_lower_upper(Point2D::new(left, bottom), Point2D::new(right, top))
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Panics if the points are not in the proper order or if they are NaN.
    #[inline]
    #[track_caller]
    pub fn from_lower_upper(
        lower_bounds: impl Into<FreePoint>,
        upper_bounds: impl Into<FreePoint>,
    ) -> Self {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        match Self::checked_from_lower_upper(lower_bounds, upper_bounds) {
            Some(aab) => aab,
            None => panic!(
                "invalid AAB points that are misordered or NaN: \
                lower {lower_bounds:?} upper {upper_bounds:?}"
            ),
        }
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Returns [`None`] if the points are not in the proper order or if they are NaN.
    #[inline]
    pub fn checked_from_lower_upper(
        lower_bounds: FreePoint,
        upper_bounds: FreePoint,
    ) -> Option<Self> {
        if lower_bounds.x <= upper_bounds.x && lower_bounds.y <= upper_bounds.y {
            Some(Self {
                lower_bounds,
                upper_bounds,
            })
        } else {
            None
        }
    }

    /// Constructs an [`Aab`] whose bottom-left corner is `lower_bounds` and whose
    /// right and top sides are found by adding `size` to it.
    ///
    /// This is the same computation used to find the extent of a collider, so a box
    /// constructed this way is bit-for-bit equal to one computed from a body at that
    /// position.
    #[inline]
    pub fn try_from_lower_size(
        lower_bounds: FreePoint,
        size: FreeSize,
    ) -> Result<Self, InvalidAabError> {
        let upper_bounds = Point2D::new(
            lower_bounds.x + size.width,
            lower_bounds.y + size.height,
        );
        Self::checked_from_lower_upper(lower_bounds, upper_bounds).ok_or(InvalidAabError {
            lower_bounds,
            upper_bounds,
        })
    }

    /// The most negative corner of the box (bottom left).
    #[inline]
    pub const fn lower_bounds_p(&self) -> FreePoint {
        self.lower_bounds
    }

    /// The most positive corner of the box (top right).
    #[inline]
    pub const fn upper_bounds_p(&self) -> FreePoint {
        self.upper_bounds
    }

    /// The X coordinate of the left side.
    #[inline]
    pub const fn left(&self) -> FreeCoordinate {
        self.lower_bounds.x
    }

    /// The X coordinate of the right side.
    #[inline]
    pub const fn right(&self) -> FreeCoordinate {
        self.upper_bounds.x
    }

    /// The Y coordinate of the bottom side.
    #[inline]
    pub const fn bottom(&self) -> FreeCoordinate {
        self.lower_bounds.y
    }

    /// The Y coordinate of the top side.
    #[inline]
    pub const fn top(&self) -> FreeCoordinate {
        self.upper_bounds.y
    }

    /// The four sides in the order left, right, bottom, top.
    #[inline]
    pub const fn sides(&self) -> [FreeCoordinate; 4] {
        [self.left(), self.right(), self.bottom(), self.top()]
    }

    /// The lower and upper coordinates of the box on the given axis.
    #[inline]
    pub fn range(&self, axis: Axis) -> (FreeCoordinate, FreeCoordinate) {
        (self.lower_bounds[axis], self.upper_bounds[axis])
    }

    /// Size of the box in each axis; equivalent to
    /// `self.upper_bounds() - self.lower_bounds()`.
    ///
    /// Note that due to floating-point rounding, translating one corner point by the size
    /// does not necessarily exactly reach the opposite corner.
    /// Therefore, in cases where exact comparisons matter, take care to prefer the side
    /// coordinates over calculating with the size.
    #[inline]
    pub fn size(&self) -> FreeSize {
        (self.upper_bounds - self.lower_bounds).to_size()
    }

    /// The center of the enclosed area.
    ///
    /// ```
    /// # extern crate flatland_base as flatland;
    /// use flatland::math::{Aab, FreePoint};
    ///
    /// let aab = Aab::new(1.0, 2.0, 3.0, 4.0);
    /// assert_eq!(aab.center(), FreePoint::new(1.5, 3.5));
    /// ```
    #[inline]
    pub fn center(&self) -> FreePoint {
        (self.lower_bounds + self.upper_bounds.to_vector()) * 0.5
    }

    /// Returns the position of the given corner.
    #[inline]
    pub fn corner(&self, corner: Corner) -> FreePoint {
        Point2D::new(
            if corner.is_upper(Axis::X) {
                self.upper_bounds.x
            } else {
                self.lower_bounds.x
            },
            if corner.is_upper(Axis::Y) {
                self.upper_bounds.y
            } else {
                self.lower_bounds.y
            },
        )
    }

    /// Returns all four corner points of the box.
    ///
    /// ```
    /// # extern crate flatland_base as flatland;
    /// use flatland::math::{Aab, FreePoint};
    ///
    /// let vertices = Aab::new(0.0, 2.0, 0.0, 1.0).vertices();
    /// assert_eq!(vertices.bottom_right, FreePoint::new(2.0, 0.0));
    /// assert_eq!(vertices.top_left, FreePoint::new(0.0, 1.0));
    /// ```
    #[inline]
    pub fn vertices(&self) -> BoundingVertices {
        BoundingVertices {
            bottom_left: self.corner(Corner::BottomLeft),
            bottom_right: self.corner(Corner::BottomRight),
            top_left: self.corner(Corner::TopLeft),
            top_right: self.corner(Corner::TopRight),
        }
    }

    /// Returns whether this AAB and the other AAB share any interior area.
    ///
    /// Boxes which merely touch along an edge or at a corner do *not* overlap.
    /// This relation is symmetric.
    ///
    /// ```
    /// # extern crate flatland_base as flatland;
    /// use flatland::math::Aab;
    ///
    /// let a = Aab::new(0.0, 10.0, 0.0, 10.0);
    /// assert!(a.overlaps(&Aab::new(9.0, 12.0, 2.0, 3.0)));
    /// assert!(!a.overlaps(&Aab::new(10.0, 12.0, 2.0, 3.0)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Aab) -> bool {
        // If we sort the four sides on one axis, the only arrangement in which the boxes
        // share interior is "lower, lower, upper, upper", and that is what each pair of
        // comparisons checks for.
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }
}

impl fmt::Debug for Aab {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Aab {
            lower_bounds: l,
            upper_bounds: u,
        } = *self;
        f.debug_tuple("Aab")
            .field(&(l.x..=u.x))
            .field(&(l.y..=u.y))
            .finish()
    }
}

impl Fmt<ConciseDebug> for Aab {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "[{:+.3?}..{:+.3?}]×[{:+.3?}..{:+.3?}]",
            self.left(),
            self.right(),
            self.bottom(),
            self.top(),
        )
    }
}

/// [`Aab`] rejects NaN values, so it can implement [`Eq`]
/// even though it contains floats.
impl Eq for Aab {}

#[cfg(feature = "arbitrary")]
#[mutants::skip]
impl<'a> arbitrary::Arbitrary<'a> for Aab {
    #[allow(clippy::missing_inline_in_public_items)]
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        use crate::math::NotNan;
        let mut x = [
            NotNan::<FreeCoordinate>::arbitrary(u)?,
            NotNan::<FreeCoordinate>::arbitrary(u)?,
        ];
        let mut y = [
            NotNan::<FreeCoordinate>::arbitrary(u)?,
            NotNan::<FreeCoordinate>::arbitrary(u)?,
        ];
        x.sort();
        y.sort();
        Ok(Aab::new(
            x[0].into_inner(),
            x[1].into_inner(),
            y[0].into_inner(),
            y[1].into_inner(),
        ))
    }

    #[allow(clippy::missing_inline_in_public_items)]
    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        arbitrary::size_hint::and_all(&[
            <crate::math::NotNan<FreeCoordinate> as arbitrary::Arbitrary>::size_hint(depth);
            4
        ])
    }
}

/// Error when an [`Aab`] cannot be constructed because its sides would be misordered
/// or NaN.
#[derive(Clone, Copy, Debug, PartialEq, displaydoc::Display)]
#[displaydoc(
    "invalid box sides that are misordered or NaN: lower {lower_bounds:?} upper {upper_bounds:?}"
)]
#[non_exhaustive]
pub struct InvalidAabError {
    /// The would-be bottom-left corner.
    pub lower_bounds: FreePoint,
    /// The would-be top-right corner.
    pub upper_bounds: FreePoint,
}

impl core::error::Error for InvalidAabError {}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::point2;
    use manyfmt::Refmt as _;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn new_wrong_order() {
        assert_eq!(
            Aab::checked_from_lower_upper(point2(2., 1.), point2(1., 2.)),
            None
        );
        assert_eq!(
            Aab::checked_from_lower_upper(point2(1., 2.), point2(2., 1.)),
            None
        );
    }

    #[test]
    fn new_nan() {
        assert_eq!(
            Aab::checked_from_lower_upper(point2(0., 0.), point2(1., f64::NAN)),
            None
        );
    }

    #[test]
    #[should_panic = "invalid AAB points that are misordered or NaN: lower (0.0, 0.0) upper (1.0, NaN)"]
    fn new_panic_message() {
        Aab::from_lower_upper([0., 0.], [1., f64::NAN]);
    }

    #[test]
    fn try_from_lower_size_negative() {
        let error = Aab::try_from_lower_size(point2(1., 1.), FreeSize::new(-2., 1.)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid box sides that are misordered or NaN: lower (1.0, 1.0) upper (-1.0, 2.0)"
        );
    }

    #[test]
    /// Test `Debug` formatting.
    fn debug() {
        let aab = Aab::new(1.0000001, 2.0, 3.0, 4.0);
        assert_eq!(format!("{aab:?}"), "Aab(1.0000001..=2.0, 3.0..=4.0)");
        assert_eq!(
            format!("{aab:#?}\n"),
            indoc::indoc! {"
                Aab(
                    1.0000001..=2.0,
                    3.0..=4.0,
                )
            "}
        );
    }

    #[test]
    fn sides_order() {
        assert_eq!(Aab::new(1.0, 2.0, 3.0, 4.0).sides(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn vertices_agree_with_sides() {
        let aab = Aab::new(-1.5, 2.25, 3.0, 7.0);
        let vertices = aab.vertices();
        for (corner, vertex) in vertices.iter() {
            assert_eq!(vertex, aab.corner(corner));
            assert!(vertex.x == aab.left() || vertex.x == aab.right());
            assert!(vertex.y == aab.bottom() || vertex.y == aab.top());
        }
        assert_eq!(vertices.bottom_left, aab.lower_bounds_p());
        assert_eq!(vertices.top_right, aab.upper_bounds_p());
    }

    #[test]
    fn overlap_is_symmetric() {
        let boxes = [
            Aab::new(0.0, 10.0, 0.0, 10.0),
            Aab::new(5.0, 15.0, 5.0, 15.0),
            Aab::new(10.0, 12.0, 0.0, 10.0),
            Aab::new(-3.0, 0.0, -3.0, 0.0),
            Aab::new(2.0, 3.0, 2.0, 3.0),
            Aab::new(2.0, 2.0, 2.0, 2.0),
            Aab::new(-100.0, 100.0, 4.0, 5.0),
        ];
        for a in boxes {
            for b in boxes {
                assert_eq!(a.overlaps(&b), b.overlaps(&a), "{a:?} {b:?}");
            }
        }
    }

    #[test]
    fn edge_touching_is_not_overlap() {
        let a = Aab::new(0.0, 10.0, 0.0, 10.0);
        // right edge against left edge
        assert!(!a.overlaps(&Aab::new(10.0, 20.0, 0.0, 10.0)));
        // top edge against bottom edge
        assert!(!a.overlaps(&Aab::new(0.0, 10.0, 10.0, 20.0)));
        // corners only
        assert!(!a.overlaps(&Aab::new(10.0, 20.0, 10.0, 20.0)));
        // a hair inside
        assert!(a.overlaps(&Aab::new(9.999, 20.0, 0.0, 10.0)));
    }

    #[rstest]
    #[case::disjoint(Aab::new(20.0, 30.0, 0.0, 10.0), false)]
    #[case::partial(Aab::new(5.0, 15.0, 5.0, 15.0), true)]
    #[case::sliver(Aab::new(-1.0, 0.5, -1.0, 11.0), true)]
    #[case::degenerate_inside(Aab::new(5.0, 5.0, 5.0, 5.0), true)]
    #[case::identical(Aab::new(0.0, 10.0, 0.0, 10.0), true)]
    fn overlaps_cases(#[case] other: Aab, #[case] expected: bool) {
        let unit = Aab::new(0.0, 10.0, 0.0, 10.0);
        assert_eq!(unit.overlaps(&other), expected);
    }

    #[test]
    fn containment_is_overlap() {
        let outer = Aab::new(0.0, 10.0, 0.0, 10.0);
        let inner = Aab::new(3.0, 7.0, 3.0, 7.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn concise_debug() {
        assert_eq!(
            format!("{}", Aab::new(0.0, 1.0, 2.0, 3.0).refmt(&ConciseDebug)),
            "[+0.000..+1.000]×[+2.000..+3.000]"
        );
    }
}
