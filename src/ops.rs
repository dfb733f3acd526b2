//! Draw operations and their static argument schema.
//!
//! Every drawing primitive is identified by an [`Opcode`]; the mapping from
//! opcode to "which argument slots are spatial" is a fixed table
//! ([`Opcode::schema`]), not something inspected at runtime. An
//! [`Operation`] stores the original, untransformed arguments, and the camera
//! rewrites them on every replay without mutating the record.

use std::fmt;

use glam::{DVec2, dvec2};

use crate::errors::RecordError;

/// The kind of drawing primitive an operation represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Move the pen to an absolute world position without stroking
    MoveTo,
    /// Move the pen to an absolute world position, stroking if the pen is down
    LineTo,
    /// Lift the pen
    PenUp,
    /// Lower the pen
    PenDown,
    /// Advance along the current heading
    Forward,
    /// Retreat along the current heading
    Backward,
    /// Rotate the heading by an angle in degrees
    Turn,
    /// Stroke a circle of the given radius at the pen position
    Circle,
}

/// How an opcode's argument slots are interpreted by the camera transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSchema {
    /// Two slots: an absolute world-space `(x, y)` pair, rewritten as
    /// `(value - offset) * scale`
    Point,
    /// One slot: a world-space distance, scaled by zoom
    Distance,
    /// One slot: a world-space radius, scaled by zoom
    Radius,
    /// One slot: an angle in degrees, passed through untouched
    Angle,
    /// No arguments
    None,
}

impl ArgSchema {
    /// Number of argument slots this shape occupies.
    pub const fn arity(self) -> usize {
        match self {
            ArgSchema::Point => 2,
            ArgSchema::Distance | ArgSchema::Radius | ArgSchema::Angle => 1,
            ArgSchema::None => 0,
        }
    }
}

impl Opcode {
    /// The fixed argument shape for this opcode.
    pub const fn schema(self) -> ArgSchema {
        match self {
            Opcode::MoveTo | Opcode::LineTo => ArgSchema::Point,
            Opcode::Forward | Opcode::Backward => ArgSchema::Distance,
            Opcode::Circle => ArgSchema::Radius,
            Opcode::Turn => ArgSchema::Angle,
            Opcode::PenUp | Opcode::PenDown => ArgSchema::None,
        }
    }

    /// Number of arguments this opcode takes.
    pub const fn arity(self) -> usize {
        self.schema().arity()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Opcode::MoveTo => "move_to",
            Opcode::LineTo => "line_to",
            Opcode::PenUp => "pen_up",
            Opcode::PenDown => "pen_down",
            Opcode::Forward => "forward",
            Opcode::Backward => "backward",
            Opcode::Turn => "turn",
            Opcode::Circle => "circle",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single recorded draw operation.
///
/// Immutable once recorded: the camera reads the original arguments on every
/// replay and computes rewritten ones, so replay is idempotent.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    opcode: Opcode,
    raw_args: Vec<f64>,
    spatial: Option<DVec2>,
}

impl Operation {
    /// Validate `args` against the opcode's static shape and record it.
    ///
    /// For positional opcodes the `(x, y)` pair is extracted here, at record
    /// time; replay never re-derives which slots are spatial.
    pub fn new(opcode: Opcode, args: &[f64]) -> Result<Operation, RecordError> {
        let expected = opcode.arity();
        if args.len() != expected {
            return Err(RecordError::UnsupportedOperation {
                opcode,
                expected,
                got: args.len(),
            });
        }
        let spatial = match opcode.schema() {
            ArgSchema::Point => Some(dvec2(args[0], args[1])),
            _ => None,
        };
        Ok(Operation {
            opcode,
            raw_args: args.to_vec(),
            spatial,
        })
    }

    /// Build a positional operation. Callers must pass a `Point` opcode.
    pub(crate) fn point(opcode: Opcode, p: DVec2) -> Operation {
        debug_assert_eq!(opcode.schema(), ArgSchema::Point);
        Operation {
            opcode,
            raw_args: vec![p.x, p.y],
            spatial: Some(p),
        }
    }

    /// Build a one-argument scalar operation (distance, radius, or angle).
    pub(crate) fn scalar(opcode: Opcode, value: f64) -> Operation {
        debug_assert_eq!(opcode.arity(), 1);
        Operation {
            opcode,
            raw_args: vec![value],
            spatial: None,
        }
    }

    /// Build a zero-argument operation (pen state toggles).
    pub(crate) fn nullary(opcode: Opcode) -> Operation {
        debug_assert_eq!(opcode.schema(), ArgSchema::None);
        Operation {
            opcode,
            raw_args: Vec::new(),
            spatial: None,
        }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// The original, untransformed arguments as recorded.
    pub fn raw_args(&self) -> &[f64] {
        &self.raw_args
    }

    /// The world-space position extracted at record time, if any.
    pub fn spatial(&self) -> Option<DVec2> {
        self.spatial
    }
}
