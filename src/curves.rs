//! Curve generators.
//!
//! Each generator is a pure recursive function of its parameters and a
//! [`Pen`] accumulator: it appends segment operations to the command buffer
//! and returns the pen where the sub-curve leaves it. No shared mutable
//! state crosses sibling recursive calls.
//!
//! A segment is recorded as `PenDown, LineTo(end), PenUp`. The segment
//! start is wherever the previous operation left the pen, so consecutive
//! segments chain implicitly.

use std::f64::consts::SQRT_2;

use crate::buffer::CommandBuffer;
use crate::defaults;
use crate::errors::CurveError;
use crate::types::{Degrees, Pen};

/// Heading changes between the four Koch sub-curves
const KOCH_TURNS: [Degrees; 4] = [Degrees(60.0), Degrees(-120.0), Degrees(60.0), Degrees(0.0)];

/// Which family of curve to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    Koch,
    Sierpinski,
    Tree,
    Dragon,
}

impl CurveKind {
    /// Figure selection by key binding: `'1'..'4'`.
    pub fn from_key(key: char) -> Option<CurveKind> {
        match key {
            '1' => Some(CurveKind::Koch),
            '2' => Some(CurveKind::Sierpinski),
            '3' => Some(CurveKind::Tree),
            '4' => Some(CurveKind::Dragon),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CurveKind::Koch => "koch",
            CurveKind::Sierpinski => "sierpinski",
            CurveKind::Tree => "tree",
            CurveKind::Dragon => "dragon",
        }
    }
}

/// A curve plus its generation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Koch { order: i32, size: f64 },
    Sierpinski { order: i32, size: f64 },
    Tree { branch_length: f64, shorten_by: f64, angle: Degrees },
    Dragon { order: i32, size: f64 },
}

impl Curve {
    pub fn kind(&self) -> CurveKind {
        match self {
            Curve::Koch { .. } => CurveKind::Koch,
            Curve::Sierpinski { .. } => CurveKind::Sierpinski,
            Curve::Tree { .. } => CurveKind::Tree,
            Curve::Dragon { .. } => CurveKind::Dragon,
        }
    }

    /// The stock figure for a kind (what the key bindings build).
    pub fn default_for(kind: CurveKind) -> Curve {
        match kind {
            CurveKind::Koch => Curve::Koch {
                order: defaults::KOCH_ORDER,
                size: defaults::KOCH_SIZE,
            },
            CurveKind::Sierpinski => Curve::Sierpinski {
                order: defaults::SIERPINSKI_ORDER,
                size: defaults::SIERPINSKI_SIZE,
            },
            CurveKind::Tree => Curve::Tree {
                branch_length: defaults::TREE_BRANCH,
                shorten_by: defaults::TREE_SHORTEN,
                angle: defaults::TREE_ANGLE,
            },
            CurveKind::Dragon => Curve::Dragon {
                order: defaults::DRAGON_ORDER,
                size: defaults::DRAGON_SIZE,
            },
        }
    }

    /// Append this curve's operations to `buffer`, starting from `start`.
    ///
    /// Parameters are validated before anything is recorded, so a rejected
    /// call leaves the buffer exactly as it was. Zero and negative sizes are
    /// tolerated (they record zero-length or reversed segments, which draw
    /// nothing visible).
    pub fn generate(&self, buffer: &mut CommandBuffer, start: Pen) -> Result<(), CurveError> {
        self.validate(start)?;
        match *self {
            Curve::Koch { order, size } => {
                koch(buffer, order as u32, size, start);
            }
            Curve::Sierpinski { order, size } => {
                sierpinski(buffer, order as u32, size, start);
            }
            Curve::Tree {
                branch_length,
                shorten_by,
                angle,
            } => {
                tree(buffer, branch_length, shorten_by, angle, start);
            }
            Curve::Dragon { order, size } => {
                dragon(buffer, order as u32, size, 1.0, start);
            }
        }
        Ok(())
    }

    fn validate(&self, start: Pen) -> Result<(), CurveError> {
        if !start.heading.is_finite() {
            return Err(CurveError::InvalidParameter {
                what: "initial heading",
                value: start.heading.raw(),
            });
        }
        match *self {
            Curve::Koch { order, size }
            | Curve::Sierpinski { order, size }
            | Curve::Dragon { order, size } => {
                if order < 0 {
                    return Err(CurveError::InvalidParameter {
                        what: "order",
                        value: f64::from(order),
                    });
                }
                if !size.is_finite() {
                    return Err(CurveError::InvalidParameter {
                        what: "size",
                        value: size,
                    });
                }
            }
            Curve::Tree {
                branch_length,
                shorten_by,
                angle,
            } => {
                if !branch_length.is_finite() {
                    return Err(CurveError::InvalidParameter {
                        what: "branch length",
                        value: branch_length,
                    });
                }
                // shorten_by <= 0 never shrinks the branch: unbounded recursion
                if !(shorten_by.is_finite() && shorten_by > 0.0) {
                    return Err(CurveError::InvalidParameter {
                        what: "shorten by",
                        value: shorten_by,
                    });
                }
                if !angle.is_finite() {
                    return Err(CurveError::InvalidParameter {
                        what: "angle",
                        value: angle.raw(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Record one segment from the pen's position along its heading.
/// Returns the pen advanced to the segment end.
fn segment(buffer: &mut CommandBuffer, pen: Pen, distance: f64) -> Pen {
    let next = pen.advanced(distance);
    buffer.pen_down();
    buffer.line_to(next.position);
    buffer.pen_up();
    next
}

/// Koch curve: order 0 is a single segment; order n is four sub-curves at
/// a third of the size, with 60/-120/60 degree kinks between them. Emits
/// exactly `4^order` segments of length `size / 3^order`.
fn koch(buffer: &mut CommandBuffer, order: u32, size: f64, pen: Pen) -> Pen {
    if order == 0 {
        return segment(buffer, pen, size);
    }
    let mut pen = pen;
    for turn in KOCH_TURNS {
        pen = koch(buffer, order - 1, size / 3.0, pen).turned(turn);
    }
    pen
}

/// Sierpinski arrowhead: order 0 is a closed triangle; order n places three
/// half-size sub-triangles a full side apart, turning 120 degrees between
/// them. Each level returns the pen to its starting corner.
fn sierpinski(buffer: &mut CommandBuffer, order: u32, size: f64, pen: Pen) -> Pen {
    let mut pen = pen;
    for _ in 0..3 {
        if order == 0 {
            pen = segment(buffer, pen, size);
        } else {
            // The sub-triangle closes back on its own corner; hop the pen
            // (without drawing) to the next corner of this level.
            sierpinski(buffer, order - 1, size / 2.0, pen);
            pen = pen.advanced(size);
        }
        pen = pen.turned(Degrees(120.0));
    }
    pen
}

/// Branching tree. Recursion is bounded by branch length, not a depth
/// counter: it stops once the branch is at most `TREE_MIN_BRANCH` long.
/// After both subtrees, a return segment brings the pen back to the branch
/// base so sibling subtrees share a start point.
fn tree(buffer: &mut CommandBuffer, branch_length: f64, shorten_by: f64, angle: Degrees, pen: Pen) {
    if branch_length <= defaults::TREE_MIN_BRANCH {
        return;
    }
    let top = segment(buffer, pen, branch_length);
    let shorter = branch_length - shorten_by;
    tree(buffer, shorter, shorten_by, angle, top.turned(angle));
    tree(buffer, shorter, shorten_by, angle, top.turned(-angle));
    segment(buffer, top.turned(Degrees(180.0)), branch_length);
}

/// Dragon curve: order 0 is a single segment; order n is two sub-curves at
/// `size / sqrt(2)`, the second rotated 45 degrees by `sign` with the sign
/// flipped. Emits `2^order` segments of length `size / sqrt(2)^order`.
fn dragon(buffer: &mut CommandBuffer, order: u32, size: f64, sign: f64, pen: Pen) {
    if order == 0 {
        segment(buffer, pen, size);
        return;
    }
    let half = size / SQRT_2;
    dragon(buffer, order - 1, half, 1.0, pen);
    let joint = Pen::new(
        pen.advanced(half).position,
        pen.heading + Degrees(45.0) * sign,
    );
    dragon(buffer, order - 1, half, -1.0, joint);
}
