//! Strongly-typed numeric primitives for fraktur (zero-cost newtypes).
//!
//! World-space points are `glam::DVec2` throughout; headings and turn
//! amounts are `Degrees` so they cannot be confused with distances.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero or negative when strictly positive required
    NonPositive,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::NonPositive => write!(f, "value is zero or negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// An angle in degrees (turtle heading convention: 0 points along +x,
/// positive turns counter-clockwise).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    pub const ZERO: Degrees = Degrees(0.0);

    /// Create a Degrees with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Degrees, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Degrees(val))
        }
    }

    /// Get the raw value in degrees
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Unit vector pointing along this heading
    #[inline]
    pub fn unit_vector(self) -> DVec2 {
        DVec2::from_angle(self.0.to_radians())
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Degrees {
    type Output = Degrees;
    fn add(self, rhs: Degrees) -> Degrees {
        Degrees(self.0 + rhs.0)
    }
}
impl Sub for Degrees {
    type Output = Degrees;
    fn sub(self, rhs: Degrees) -> Degrees {
        Degrees(self.0 - rhs.0)
    }
}
impl AddAssign for Degrees {
    fn add_assign(&mut self, rhs: Degrees) {
        self.0 += rhs.0;
    }
}
impl SubAssign for Degrees {
    fn sub_assign(&mut self, rhs: Degrees) {
        self.0 -= rhs.0;
    }
}
impl Mul<f64> for Degrees {
    type Output = Degrees;
    fn mul(self, rhs: f64) -> Degrees {
        Degrees(self.0 * rhs)
    }
}
impl Neg for Degrees {
    type Output = Degrees;
    fn neg(self) -> Degrees {
        Degrees(-self.0)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.0)
    }
}

/// A turtle pen: world-space position plus heading.
///
/// Generators thread a `Pen` through recursion as a value instead of
/// mutating shared coordinates, so sibling recursive calls cannot
/// observe each other's partial state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub position: DVec2,
    pub heading: Degrees,
}

impl Pen {
    pub fn new(position: DVec2, heading: Degrees) -> Pen {
        Pen { position, heading }
    }

    /// The pen moved `distance` along its heading, heading unchanged.
    #[inline]
    pub fn advanced(self, distance: f64) -> Pen {
        Pen {
            position: self.position + self.heading.unit_vector() * distance,
            heading: self.heading,
        }
    }

    /// The pen rotated by `by`, position unchanged.
    #[inline]
    pub fn turned(self, by: Degrees) -> Pen {
        Pen {
            position: self.position,
            heading: self.heading + by,
        }
    }
}

impl Default for Pen {
    fn default() -> Pen {
        Pen::new(DVec2::ZERO, Degrees::ZERO)
    }
}
