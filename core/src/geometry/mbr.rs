use geo::{coord, Rect};

use super::{LineString, Point, Polygon};

/// A minimum bounding rectangle (MBR), the smallest axis-aligned rectangle
/// enclosing a geometry
///
/// # Examples
///
/// ```rust
/// use spatia_core::geometry::Mbr;
///
/// let mut mbr = Mbr::from_point(1.0, 2.0, 4326);
/// assert_eq!(mbr.min_x, 1.0);
/// assert_eq!(mbr.min_y, 2.0);
/// assert_eq!(mbr.max_x, 1.0);
/// assert_eq!(mbr.max_y, 2.0);
///
/// mbr.extend_point(5.0, 6.0);
/// assert_eq!(mbr.min_x, 1.0);
/// assert_eq!(mbr.min_y, 2.0);
/// assert_eq!(mbr.max_x, 5.0);
/// assert_eq!(mbr.max_y, 6.0);
///
/// mbr.extend_point(-7.0, -6.0);
/// assert_eq!(mbr.min_x, -7.0);
/// assert_eq!(mbr.min_y, -6.0);
/// assert_eq!(mbr.max_x, 5.0);
/// assert_eq!(mbr.max_y, 6.0);
/// ```
///
/// ```rust
/// use spatia_core::geometry::Mbr;
///
/// let mut mbr1 = Mbr::new(1.0, 2.0, 4.0, 5.0, 4326);
/// let mut mbr2 = Mbr::new(40.0, 50.0, 70.0, 80.0, 4326);
///
/// mbr1.extend_mbr(&mbr2);
/// assert_eq!(mbr1.min_x, 1.0);
/// assert_eq!(mbr1.min_y, 2.0);
/// assert_eq!(mbr1.max_x, 70.0);
/// assert_eq!(mbr1.max_y, 80.0);
///
/// mbr2.extend_mbr(&mbr1);
/// assert_eq!(mbr2, mbr1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mbr {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub srid: i32,
}

impl Mbr {
    /// Creates a new rectangle with the given extent
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64, srid: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            srid,
        }
    }

    /// Creates a new rectangle from the given point. The rectangle will have
    /// an area of 0.
    pub fn from_point(x: f64, y: f64, srid: i32) -> Self {
        Self::new(x, y, x, y, srid)
    }

    /// Computes the rectangle enclosing all given rectangles. The result
    /// carries `srid`, regardless of the SRIDs of the inputs.
    pub(crate) fn enclosing<I>(srid: i32, mbrs: I) -> Self
    where
        I: IntoIterator<Item = Mbr>,
    {
        // start with an inverted rectangle, the identity for `extend_mbr`
        let mut result = Self::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            srid,
        );
        for mbr in mbrs {
            result.extend_mbr(&mbr);
        }
        result
    }

    /// Extends the rectangle so it overlaps the given point
    pub fn extend_point(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Extends the rectangle so it overlaps the given other rectangle
    pub fn extend_mbr(&mut self, other: &Mbr) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Converts the rectangle into a closed single-ring polygon, starting at
    /// the lower-left corner and running counter-clockwise
    pub fn as_polygon(&self) -> Polygon {
        let ring = LineString::new_unchecked(
            vec![
                Point::with_srid(self.min_x, self.min_y, self.srid),
                Point::with_srid(self.max_x, self.min_y, self.srid),
                Point::with_srid(self.max_x, self.max_y, self.srid),
                Point::with_srid(self.min_x, self.max_y, self.srid),
                Point::with_srid(self.min_x, self.min_y, self.srid),
            ],
            self.srid,
        );
        Polygon::new_unchecked(vec![ring], self.srid)
    }
}

impl From<Mbr> for Rect {
    fn from(mbr: Mbr) -> Self {
        Rect::new(
            coord! { x: mbr.min_x, y: mbr.min_y },
            coord! { x: mbr.max_x, y: mbr.max_y },
        )
    }
}
