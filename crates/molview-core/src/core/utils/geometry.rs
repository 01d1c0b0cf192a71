use crate::core::models::atom::Atom;
use nalgebra::{Matrix3, Point2, Point3, Vector2};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Geometry of a bond as seen on the viewing plane.
///
/// Every field is derived from the two bonded atoms. The values are a cache and
/// are recomputed whenever the atoms they were derived from move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondGeometry {
    /// The first atom projected onto the viewing plane (x1, y1).
    pub start: Point2<f64>,
    /// The second atom projected onto the viewing plane (x2, y2).
    pub end: Point2<f64>,
    /// Planar distance between `start` and `end`.
    pub length: f64,
    /// Unit vector from `start` to `end`; zero when the bond is degenerate.
    pub direction: Vector2<f64>,
    /// Mean z-coordinate of the two atoms.
    pub depth: f64,
}

impl BondGeometry {
    /// Derives the planar geometry of a bond between `a` and `b`.
    ///
    /// When both atoms project onto the same point the direction is undefined;
    /// it is reported as the zero vector and [`is_degenerate`](Self::is_degenerate)
    /// returns `true`. Whether such a bond is acceptable is the caller's decision.
    pub fn derive(a: &Atom, b: &Atom) -> Self {
        let start = a.position.xy();
        let end = b.position.xy();
        let delta = end - start;
        let length = delta.norm();
        let direction = if length > 0.0 {
            delta / length
        } else {
            Vector2::zeros()
        };

        Self {
            start,
            end,
            length,
            direction,
            depth: (a.position.z + b.position.z) / 2.0,
        }
    }

    /// Returns `true` if the two atoms coincide on the viewing plane.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.length > 0.0)
    }
}

/// A principal axis of rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid rotation axis '{0}' (expected x, y or z)")]
pub struct ParseAxisError(pub String);

impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(ParseAxisError(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        })
    }
}

/// Builds the right-handed rotation matrix for `degrees` about `axis`.
///
/// The angle is converted as `degrees * π / 180`. With `c = cos θ` and
/// `s = sin θ` the matrices are:
///
/// ```text
/// X: | 1  0  0 |   Y: |  c  0  s |   Z: | c -s  0 |
///    | 0  c -s |      |  0  1  0 |      | s  c  0 |
///    | 0  s  c |      | -s  0  c |      | 0  0  1 |
/// ```
pub fn rotation_matrix(axis: Axis, degrees: i32) -> Matrix3<f64> {
    let radians = f64::from(degrees) * (std::f64::consts::PI / 180.0);
    let (s, c) = radians.sin_cos();

    match axis {
        #[rustfmt::skip]
        Axis::X => Matrix3::new(
            1.0, 0.0, 0.0,
            0.0,   c,  -s,
            0.0,   s,   c,
        ),
        #[rustfmt::skip]
        Axis::Y => Matrix3::new(
              c, 0.0,   s,
            0.0, 1.0, 0.0,
             -s, 0.0,   c,
        ),
        #[rustfmt::skip]
        Axis::Z => Matrix3::new(
              c,  -s, 0.0,
              s,   c, 0.0,
            0.0, 0.0, 1.0,
        ),
    }
}

/// Multiplies a position, taken as a column vector, by `matrix`.
#[inline]
pub fn transform_point(matrix: &Matrix3<f64>, point: &Point3<f64>) -> Point3<f64> {
    Point3::from(matrix * point.coords)
}
