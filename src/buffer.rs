//! The append-only command buffer.
//!
//! Generators append operations during a single build pass; the camera then
//! replays the buffer read-only as many times as the view changes. A buffer
//! is cleared and rebuilt wholesale when a new figure is requested, never
//! edited incrementally.

use glam::DVec2;

use crate::errors::RecordError;
use crate::log::debug;
use crate::ops::{Opcode, Operation};
use crate::types::Degrees;

/// Ordered log of recorded draw operations.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    ops: Vec<Operation>,
}

impl CommandBuffer {
    pub fn new() -> CommandBuffer {
        CommandBuffer::default()
    }

    /// Record an operation from an opcode and a raw argument list.
    ///
    /// The argument shape is checked against the opcode's static schema
    /// here, at record time; a mismatch is surfaced immediately rather than
    /// deferred to replay. Recording is pure bookkeeping: it never touches
    /// camera state or any drawing backend.
    pub fn record(&mut self, opcode: Opcode, args: &[f64]) -> Result<(), RecordError> {
        let op = Operation::new(opcode, args)?;
        debug!(?opcode, ?args, "record");
        self.ops.push(op);
        Ok(())
    }

    fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    /// Record a pen move (no stroke) to an absolute world position.
    pub fn move_to(&mut self, target: DVec2) {
        self.push(Operation::point(Opcode::MoveTo, target));
    }

    /// Record a stroke to an absolute world position.
    pub fn line_to(&mut self, target: DVec2) {
        self.push(Operation::point(Opcode::LineTo, target));
    }

    pub fn pen_up(&mut self) {
        self.push(Operation::nullary(Opcode::PenUp));
    }

    pub fn pen_down(&mut self) {
        self.push(Operation::nullary(Opcode::PenDown));
    }

    pub fn forward(&mut self, distance: f64) {
        self.push(Operation::scalar(Opcode::Forward, distance));
    }

    pub fn backward(&mut self, distance: f64) {
        self.push(Operation::scalar(Opcode::Backward, distance));
    }

    pub fn turn(&mut self, by: Degrees) {
        self.push(Operation::scalar(Opcode::Turn, by.raw()));
    }

    pub fn circle(&mut self, radius: f64) {
        self.push(Operation::scalar(Opcode::Circle, radius));
    }

    /// Drop all recorded operations ahead of a rebuild.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.ops.iter()
    }

    /// Count operations with the given opcode (segment-count checks).
    pub fn count_of(&self, opcode: Opcode) -> usize {
        self.ops.iter().filter(|op| op.opcode() == opcode).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn record_validates_argument_shape() {
        let mut buf = CommandBuffer::new();
        assert!(buf.record(Opcode::MoveTo, &[1.0, 2.0]).is_ok());
        assert!(buf.record(Opcode::Circle, &[5.0]).is_ok());
        let err = buf.record(Opcode::Circle, &[5.0, 6.0]).unwrap_err();
        assert!(err.to_string().contains("circle"));
        // The failed record leaves the log untouched.
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn typed_recorders_match_generic_record() {
        let mut a = CommandBuffer::new();
        a.pen_down();
        a.line_to(dvec2(10.0, 20.0));
        a.pen_up();

        let mut b = CommandBuffer::new();
        b.record(Opcode::PenDown, &[]).unwrap();
        b.record(Opcode::LineTo, &[10.0, 20.0]).unwrap();
        b.record(Opcode::PenUp, &[]).unwrap();

        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
    }

    #[test]
    fn clear_empties_the_log() {
        let mut buf = CommandBuffer::new();
        buf.forward(10.0);
        buf.turn(Degrees(45.0));
        assert_eq!(buf.len(), 2);
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn count_of_filters_by_opcode() {
        let mut buf = CommandBuffer::new();
        buf.pen_down();
        buf.line_to(dvec2(1.0, 0.0));
        buf.line_to(dvec2(2.0, 0.0));
        buf.pen_up();
        assert_eq!(buf.count_of(Opcode::LineTo), 2);
        assert_eq!(buf.count_of(Opcode::Circle), 0);
    }
}
