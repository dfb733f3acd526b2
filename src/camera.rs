//! The camera transform engine.
//!
//! The camera owns the pan offset and zoom scale and replays the command
//! buffer through them. Drawing is never issued against absolute screen
//! coordinates: every replay rewrites each operation's spatial arguments as
//! `(value - offset) * scale` (positions) or `value * scale` (distances and
//! radii) and dispatches the rewritten call to the backend. Replay reads the
//! recorded operations immutably, so running it twice with unchanged camera
//! state issues identical backend calls.
//!
//! A replay can be superseded: the host may deliver a pan or zoom event
//! while a long recursive figure is still being drawn. Each pass snapshots
//! the generation counter and stops issuing backend calls as soon as a newer
//! pass has been requested (last-request-wins). A superseded pass is a
//! normal cancellation, not an error, and nothing is rolled back; the
//! winning pass clears the canvas and redraws.

use std::cell::Cell;
use std::rc::Rc;

use glam::DVec2;

use crate::backend::DrawingBackend;
use crate::buffer::CommandBuffer;
use crate::defaults;
use crate::log::{debug, warn};
use crate::ops::{ArgSchema, Opcode, Operation};

/// How a replay pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawOutcome {
    /// Every operation was dispatched.
    Completed,
    /// A newer replay was requested mid-pass; this one stopped early.
    Superseded,
}

/// Shared handle onto the redraw generation counter.
///
/// Host integrations that learn of a newer view change while a replay is in
/// flight (re-entrant event delivery) can advance the generation to make the
/// stale pass stop without recursively calling [`Camera::redraw`].
#[derive(Debug, Clone)]
pub struct ReplayHandle {
    current: Rc<Cell<u64>>,
}

impl ReplayHandle {
    /// Advance the generation, superseding any in-flight replay.
    pub fn advance(&self) -> u64 {
        let next = self.current.get() + 1;
        self.current.set(next);
        next
    }

    pub fn current(&self) -> u64 {
        self.current.get()
    }
}

/// Monotonically increasing redraw generation counter.
///
/// A pass holds no state beyond its snapshot of the counter, so replays
/// that end early (supersession or a backend failure) leave nothing to
/// release.
#[derive(Debug, Default)]
struct ReplayGuard {
    current: Rc<Cell<u64>>,
}

impl ReplayGuard {
    /// Start a pass: bump the generation and return the pass's token.
    fn begin(&self) -> u64 {
        let token = self.current.get() + 1;
        self.current.set(token);
        token
    }

    /// True once a newer pass has been requested past `token`.
    fn superseded(&self, token: u64) -> bool {
        self.current.get() != token
    }

    fn handle(&self) -> ReplayHandle {
        ReplayHandle {
            current: Rc::clone(&self.current),
        }
    }
}

/// Pan offset, zoom scale, and the replay generation guard.
#[derive(Debug)]
pub struct Camera {
    offset: DVec2,
    scale: f64,
    scale_min: f64,
    guard: ReplayGuard,
}

impl Default for Camera {
    fn default() -> Camera {
        Camera::new()
    }
}

impl Camera {
    pub fn new() -> Camera {
        Camera::with_view(DVec2::ZERO, defaults::INITIAL_SCALE)
    }

    pub fn with_view(offset: DVec2, scale: f64) -> Camera {
        let mut camera = Camera {
            offset,
            scale: defaults::SCALE_MIN,
            scale_min: defaults::SCALE_MIN,
            guard: ReplayGuard::default(),
        };
        camera.set_scale(scale);
        camera
    }

    /// World-space pan offset.
    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    /// Zoom factor, always `>= scale_min`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current redraw generation.
    pub fn generation(&self) -> u64 {
        self.guard.current.get()
    }

    /// Handle for superseding an in-flight replay from event handlers.
    pub fn replay_handle(&self) -> ReplayHandle {
        self.guard.handle()
    }

    /// Shift the pan offset by a world-space delta.
    pub fn pan_by(&mut self, delta: DVec2) {
        self.offset -= delta;
        debug!(offset = ?self.offset, "pan");
    }

    /// Set the zoom factor, clamped to the minimum positive scale.
    ///
    /// Out-of-range and non-finite requests collapse to the minimum rather
    /// than being rejected, keeping interactive zoom robust.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            warn!(scale, "non-finite zoom request clamped");
        }
        // f64::max ignores NaN, so a NaN request lands on scale_min
        self.scale = self.scale_min.max(scale);
    }

    /// Replay the buffer through the current transform onto `backend`.
    ///
    /// Returns [`RedrawOutcome::Superseded`] if a newer redraw was requested
    /// mid-pass. Backend failures propagate unchanged; the figure may have
    /// rendered partially.
    pub fn redraw<B: DrawingBackend>(
        &self,
        buffer: &CommandBuffer,
        backend: &mut B,
    ) -> Result<RedrawOutcome, B::Error> {
        let token = self.guard.begin();
        debug!(token, ops = buffer.len(), "redraw begin");

        // Known backend state: pen up, hidden cursor, cleared canvas,
        // cursor parked at the transformed world origin.
        backend.reset()?;
        backend.hide()?;
        backend.clear()?;
        backend.pen_up()?;
        backend.move_to(-self.offset.x * self.scale, -self.offset.y * self.scale)?;
        backend.show()?;

        for op in buffer.iter() {
            if self.guard.superseded(token) {
                debug!(token, "redraw superseded");
                return Ok(RedrawOutcome::Superseded);
            }
            self.dispatch(op, backend)?;
        }

        debug!(token, "redraw complete");
        Ok(RedrawOutcome::Completed)
    }

    /// Rewrite one operation's spatial arguments and issue it.
    fn dispatch<B: DrawingBackend>(&self, op: &Operation, backend: &mut B) -> Result<(), B::Error> {
        match op.opcode().schema() {
            ArgSchema::Point => {
                // record() guarantees a spatial pair for positional opcodes
                let Some(orig) = op.spatial() else {
                    return Ok(());
                };
                let p = (orig - self.offset) * self.scale;
                match op.opcode() {
                    Opcode::LineTo => backend.line_to(p.x, p.y),
                    _ => backend.move_to(p.x, p.y),
                }
            }
            ArgSchema::Distance | ArgSchema::Radius => {
                let scaled = op.raw_args().first().copied().unwrap_or(0.0) * self.scale;
                match op.opcode() {
                    Opcode::Backward => backend.backward(scaled),
                    Opcode::Circle => backend.circle(scaled),
                    _ => backend.forward(scaled),
                }
            }
            ArgSchema::Angle => {
                let degrees = op.raw_args().first().copied().unwrap_or(0.0);
                backend.turn(degrees)
            }
            ArgSchema::None => match op.opcode() {
                Opcode::PenDown => backend.pen_down(),
                _ => backend.pen_up(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendCall, CallLog};
    use glam::dvec2;
    use std::convert::Infallible;

    const EPS: f64 = 1e-9;

    fn line_buffer() -> CommandBuffer {
        let mut buf = CommandBuffer::new();
        buf.pen_down();
        buf.line_to(dvec2(45.0, 0.0));
        buf.pen_up();
        buf
    }

    #[test]
    fn move_to_transform_is_exact() {
        let mut buf = CommandBuffer::new();
        buf.move_to(dvec2(100.0, -40.0));
        let camera = Camera::with_view(dvec2(10.0, 20.0), 2.0);
        let mut log = CallLog::new();
        camera.redraw(&buf, &mut log).unwrap();

        let Some(BackendCall::MoveTo { x, y }) = log.calls().last() else {
            panic!("expected trailing move_to, got {:?}", log.calls());
        };
        assert!((x - (100.0 - 10.0) * 2.0).abs() < EPS);
        assert!((y - (-40.0 - 20.0) * 2.0).abs() < EPS);
    }

    #[test]
    fn scalar_motions_scale_angles_pass_through() {
        let mut buf = CommandBuffer::new();
        buf.forward(10.0);
        buf.turn(crate::types::Degrees(60.0));
        buf.circle(5.0);
        let camera = Camera::with_view(dvec2(7.0, 7.0), 3.0);
        let mut log = CallLog::new();
        camera.redraw(&buf, &mut log).unwrap();

        let tail = &log.calls()[log.calls().len() - 3..];
        assert_eq!(
            tail,
            &[
                BackendCall::Forward { distance: 30.0 },
                BackendCall::Turn { degrees: 60.0 },
                BackendCall::Circle { radius: 15.0 },
            ]
        );
    }

    #[test]
    fn replay_begins_from_known_state() {
        let camera = Camera::with_view(dvec2(5.0, -5.0), 2.0);
        let mut log = CallLog::new();
        camera.redraw(&CommandBuffer::new(), &mut log).unwrap();
        assert_eq!(
            log.calls(),
            &[
                BackendCall::Reset,
                BackendCall::Hide,
                BackendCall::Clear,
                BackendCall::PenUp,
                BackendCall::MoveTo { x: -10.0, y: 10.0 },
                BackendCall::Show,
            ]
        );
    }

    #[test]
    fn replay_is_idempotent() {
        let buf = line_buffer();
        let camera = Camera::with_view(dvec2(1.0, 2.0), 1.5);
        let mut first = CallLog::new();
        let mut second = CallLog::new();
        assert_eq!(
            camera.redraw(&buf, &mut first).unwrap(),
            RedrawOutcome::Completed
        );
        assert_eq!(
            camera.redraw(&buf, &mut second).unwrap(),
            RedrawOutcome::Completed
        );
        assert_eq!(first.calls(), second.calls());
    }

    #[test]
    fn scale_clamps_at_minimum() {
        let mut camera = Camera::new();
        for _ in 0..1000 {
            camera.set_scale(camera.scale() - 0.5);
        }
        assert!((camera.scale() - defaults::SCALE_MIN).abs() < EPS);
        camera.set_scale(f64::NAN);
        assert!((camera.scale() - defaults::SCALE_MIN).abs() < EPS);
    }

    /// Backend that supersedes the replay after a fixed number of calls,
    /// simulating a pan/zoom event delivered mid-draw.
    struct Interrupting {
        inner: CallLog,
        handle: ReplayHandle,
        after: usize,
        seen: usize,
    }

    impl Interrupting {
        fn tick(&mut self) {
            self.seen += 1;
            if self.seen == self.after {
                self.handle.advance();
            }
        }
    }

    impl DrawingBackend for Interrupting {
        type Error = Infallible;

        fn move_to(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
            self.tick();
            self.inner.move_to(x, y)
        }
        fn line_to(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
            self.tick();
            self.inner.line_to(x, y)
        }
        fn forward(&mut self, d: f64) -> Result<(), Infallible> {
            self.tick();
            self.inner.forward(d)
        }
        fn backward(&mut self, d: f64) -> Result<(), Infallible> {
            self.tick();
            self.inner.backward(d)
        }
        fn turn(&mut self, d: f64) -> Result<(), Infallible> {
            self.tick();
            self.inner.turn(d)
        }
        fn pen_up(&mut self) -> Result<(), Infallible> {
            self.tick();
            self.inner.pen_up()
        }
        fn pen_down(&mut self) -> Result<(), Infallible> {
            self.tick();
            self.inner.pen_down()
        }
        fn circle(&mut self, r: f64) -> Result<(), Infallible> {
            self.tick();
            self.inner.circle(r)
        }
        fn reset(&mut self) -> Result<(), Infallible> {
            self.tick();
            self.inner.reset()
        }
        fn clear(&mut self) -> Result<(), Infallible> {
            self.tick();
            self.inner.clear()
        }
        fn hide(&mut self) -> Result<(), Infallible> {
            self.tick();
            self.inner.hide()
        }
        fn show(&mut self) -> Result<(), Infallible> {
            self.tick();
            self.inner.show()
        }
        fn set_pen_color(&mut self, name: &str) -> Result<(), Infallible> {
            self.tick();
            self.inner.set_pen_color(name)
        }
    }

    #[test]
    fn superseded_pass_stops_issuing_calls() {
        let mut buf = CommandBuffer::new();
        for i in 0..50 {
            buf.pen_down();
            buf.line_to(dvec2(f64::from(i), 0.0));
            buf.pen_up();
        }
        let camera = Camera::with_view(DVec2::ZERO, 1.0);
        // Interrupt right after the 10th call (preamble is 6 calls).
        let mut backend = Interrupting {
            inner: CallLog::new(),
            handle: camera.replay_handle(),
            after: 10,
            seen: 0,
        };
        let outcome = camera.redraw(&buf, &mut backend).unwrap();
        assert_eq!(outcome, RedrawOutcome::Superseded);
        // The call during which supersession happened still lands; nothing
        // is dispatched after it.
        assert!(backend.inner.calls().len() <= 11);
    }

    #[derive(Debug)]
    struct Refused;

    impl std::fmt::Display for Refused {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("host refused the drawing call")
        }
    }

    impl std::error::Error for Refused {}

    /// Backend whose every call is rejected by the host.
    struct RefusesEverything;

    impl DrawingBackend for RefusesEverything {
        type Error = Refused;

        fn move_to(&mut self, _: f64, _: f64) -> Result<(), Refused> {
            Err(Refused)
        }
        fn line_to(&mut self, _: f64, _: f64) -> Result<(), Refused> {
            Err(Refused)
        }
        fn forward(&mut self, _: f64) -> Result<(), Refused> {
            Err(Refused)
        }
        fn backward(&mut self, _: f64) -> Result<(), Refused> {
            Err(Refused)
        }
        fn turn(&mut self, _: f64) -> Result<(), Refused> {
            Err(Refused)
        }
        fn pen_up(&mut self) -> Result<(), Refused> {
            Err(Refused)
        }
        fn pen_down(&mut self) -> Result<(), Refused> {
            Err(Refused)
        }
        fn circle(&mut self, _: f64) -> Result<(), Refused> {
            Err(Refused)
        }
        fn reset(&mut self) -> Result<(), Refused> {
            Err(Refused)
        }
        fn clear(&mut self) -> Result<(), Refused> {
            Err(Refused)
        }
        fn hide(&mut self) -> Result<(), Refused> {
            Err(Refused)
        }
        fn show(&mut self) -> Result<(), Refused> {
            Err(Refused)
        }
        fn set_pen_color(&mut self, _: &str) -> Result<(), Refused> {
            Err(Refused)
        }
    }

    #[test]
    fn backend_failures_propagate_to_the_caller() {
        let camera = Camera::new();
        let result = camera.redraw(&line_buffer(), &mut RefusesEverything);
        assert!(result.is_err());
    }

    #[test]
    fn failed_redraws_leave_no_stale_guard_state() {
        let camera = Camera::with_view(dvec2(1.0, 2.0), 1.5);
        let buf = line_buffer();
        for _ in 0..3 {
            assert!(camera.redraw(&buf, &mut RefusesEverything).is_err());
        }
        // Each failed attempt consumed one generation and left nothing
        // behind to supersede or stall the next pass.
        assert_eq!(camera.generation(), 3);
        let mut log = CallLog::new();
        assert_eq!(
            camera.redraw(&buf, &mut log).unwrap(),
            RedrawOutcome::Completed
        );
        assert_eq!(log.calls().len(), 6 + buf.len());
    }

    #[test]
    fn generation_advances_per_redraw() {
        let camera = Camera::new();
        let before = camera.generation();
        let mut log = CallLog::new();
        camera.redraw(&CommandBuffer::new(), &mut log).unwrap();
        camera.redraw(&CommandBuffer::new(), &mut log).unwrap();
        assert_eq!(camera.generation(), before + 2);
    }
}
