//! Interaction controller.
//!
//! Translates raw pointer and scroll-wheel input into camera updates and
//! redraws. Scroll-driven zoom is debounced: each tick updates the scale
//! immediately, but the redraw only fires once enough scroll magnitude has
//! accumulated, so rapid wheel spins coalesce into one replay.

use glam::{DVec2, dvec2};
use thiserror::Error;

use crate::backend::DrawingBackend;
use crate::buffer::CommandBuffer;
use crate::camera::{Camera, RedrawOutcome};
use crate::curves::{Curve, CurveKind};
use crate::defaults;
use crate::errors::CurveError;
use crate::log::debug;
use crate::types::Pen;

/// Tunable interaction constants. No magic literals: hosts that want a
/// different zoom feel override these.
#[derive(Debug, Clone, Copy)]
pub struct InteractionConfig {
    /// Scroll delta divisor when converting wheel ticks to scale changes
    pub zoom_sensitivity: f64,
    /// Accumulated |scroll delta| required before a batched redraw fires
    pub zoom_debounce: f64,
}

impl Default for InteractionConfig {
    fn default() -> InteractionConfig {
        InteractionConfig {
            zoom_sensitivity: defaults::ZOOM_SENSITIVITY,
            zoom_debounce: defaults::ZOOM_DEBOUNCE,
        }
    }
}

/// Window geometry, for converting raw window coordinates (top-left origin,
/// y down) into the centered, y-up space the camera works in.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Viewport {
        Viewport { width, height }
    }

    /// Convert a raw window coordinate to center-origin, y-up.
    pub fn to_centered(&self, x: f64, y: f64) -> DVec2 {
        dvec2(x - self.width / 2.0, -(y - self.height / 2.0))
    }
}

/// Failures from interaction handlers: either the figure rebuild was
/// rejected or the drawing backend refused a call.
#[derive(Error, Debug)]
pub enum InteractError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error("drawing backend failed")]
    Backend(#[source] E),
}

/// Pointer, scroll, and key handling against a camera and figure buffer.
#[derive(Debug, Default)]
pub struct InteractionController {
    config: InteractionConfig,
    press: Option<DVec2>,
    zoom_accum: f64,
    selected: Option<CurveKind>,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> InteractionController {
        InteractionController {
            config,
            press: None,
            zoom_accum: 0.0,
            selected: None,
        }
    }

    /// The figure currently selected via key press, if any.
    pub fn selected(&self) -> Option<CurveKind> {
        self.selected
    }

    /// Record the drag start point (centered coordinates).
    pub fn pointer_down(&mut self, pos: DVec2) {
        self.press = Some(pos);
    }

    /// Finish a drag: pan the camera by the screen delta divided by the
    /// zoom scale and redraw. Returns `None` if no press was recorded.
    pub fn pointer_up<B: DrawingBackend>(
        &mut self,
        camera: &mut Camera,
        buffer: &CommandBuffer,
        backend: &mut B,
        pos: DVec2,
    ) -> Result<Option<RedrawOutcome>, B::Error> {
        let Some(press) = self.press.take() else {
            return Ok(None);
        };
        let delta = (pos - press) / camera.scale();
        camera.pan_by(delta);
        debug!(?delta, "drag pan");
        camera.redraw(buffer, backend).map(Some)
    }

    /// Handle one scroll tick. The scale updates on every tick; the redraw
    /// fires only once enough |delta| has accumulated, then the accumulator
    /// resets.
    pub fn scroll<B: DrawingBackend>(
        &mut self,
        camera: &mut Camera,
        buffer: &CommandBuffer,
        backend: &mut B,
        delta: f64,
    ) -> Result<Option<RedrawOutcome>, B::Error> {
        self.zoom_accum += delta.abs();
        camera.set_scale(camera.scale() - delta / self.config.zoom_sensitivity);
        if self.zoom_accum > self.config.zoom_debounce {
            self.zoom_accum = 0.0;
            debug!(scale = camera.scale(), "debounced zoom redraw");
            return camera.redraw(buffer, backend).map(Some);
        }
        Ok(None)
    }

    /// Handle a key press. `'1'..'4'` select a figure: the buffer is
    /// cleared, rebuilt with that curve's stock parameters, and replayed
    /// once. Other keys are ignored.
    pub fn key_press<B: DrawingBackend>(
        &mut self,
        camera: &Camera,
        buffer: &mut CommandBuffer,
        backend: &mut B,
        key: char,
    ) -> Result<Option<RedrawOutcome>, InteractError<B::Error>> {
        let Some(kind) = CurveKind::from_key(key) else {
            return Ok(None);
        };
        debug!(curve = kind.name(), "figure selected");
        buffer.clear();
        let start = Pen::new(defaults::FIGURE_ORIGIN, defaults::FIGURE_HEADING);
        Curve::default_for(kind).generate(buffer, start)?;
        self.selected = Some(kind);
        camera
            .redraw(buffer, backend)
            .map(Some)
            .map_err(InteractError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CallLog;
    use glam::dvec2;

    const EPS: f64 = 1e-9;

    fn fixture() -> (InteractionController, Camera, CommandBuffer, CallLog) {
        let controller = InteractionController::new(InteractionConfig::default());
        let camera = Camera::with_view(DVec2::ZERO, 2.0);
        let mut buffer = CommandBuffer::new();
        buffer.pen_down();
        buffer.line_to(dvec2(50.0, 0.0));
        buffer.pen_up();
        (controller, camera, buffer, CallLog::new())
    }

    #[test]
    fn drag_pans_by_scaled_delta() {
        let (mut ctl, mut camera, buffer, mut log) = fixture();
        ctl.pointer_down(dvec2(0.0, 0.0));
        let outcome = ctl
            .pointer_up(&mut camera, &buffer, &mut log, dvec2(30.0, -10.0))
            .unwrap();
        assert_eq!(outcome, Some(RedrawOutcome::Completed));
        // offset -= (release - press) / scale
        assert!((camera.offset().x - -15.0).abs() < EPS);
        assert!((camera.offset().y - 5.0).abs() < EPS);
    }

    #[test]
    fn pointer_up_without_press_is_ignored() {
        let (mut ctl, mut camera, buffer, mut log) = fixture();
        let outcome = ctl
            .pointer_up(&mut camera, &buffer, &mut log, dvec2(30.0, -10.0))
            .unwrap();
        assert_eq!(outcome, None);
        assert!(log.calls().is_empty());
    }

    #[test]
    fn pan_round_trip_restores_offset_and_rendering() {
        let (mut ctl, mut camera, buffer, mut log) = fixture();
        camera.redraw(&buffer, &mut log).unwrap();
        let original = log.take();

        ctl.pointer_down(dvec2(0.0, 0.0));
        ctl.pointer_up(&mut camera, &buffer, &mut log, dvec2(12.0, 34.0))
            .unwrap();
        ctl.pointer_down(dvec2(12.0, 34.0));
        ctl.pointer_up(&mut camera, &buffer, &mut log, dvec2(0.0, 0.0))
            .unwrap();

        assert!(camera.offset().length() < EPS);
        log.take();
        camera.redraw(&buffer, &mut log).unwrap();
        assert_eq!(log.calls(), original.as_slice());
    }

    #[test]
    fn scroll_redraw_is_debounced() {
        let (mut ctl, mut camera, buffer, mut log) = fixture();
        // Five ticks of |delta| = 1.2 cross the threshold of 5 on the fifth.
        for _ in 0..4 {
            let outcome = ctl
                .scroll(&mut camera, &buffer, &mut log, 1.2)
                .unwrap();
            assert_eq!(outcome, None);
        }
        assert!(log.calls().is_empty());
        let outcome = ctl.scroll(&mut camera, &buffer, &mut log, 1.2).unwrap();
        assert_eq!(outcome, Some(RedrawOutcome::Completed));
        assert!(!log.calls().is_empty());
    }

    #[test]
    fn scroll_updates_scale_every_tick() {
        let (mut ctl, mut camera, buffer, mut log) = fixture();
        ctl.scroll(&mut camera, &buffer, &mut log, 1.0).unwrap();
        // scale -= delta / sensitivity
        assert!((camera.scale() - (2.0 - 1.0 / defaults::ZOOM_SENSITIVITY)).abs() < EPS);
    }

    #[test]
    fn zoom_out_never_drops_below_minimum() {
        let (mut ctl, mut camera, buffer, mut log) = fixture();
        for _ in 0..500 {
            ctl.scroll(&mut camera, &buffer, &mut log, 3.0).unwrap();
        }
        assert!((camera.scale() - defaults::SCALE_MIN).abs() < EPS);
    }

    #[test]
    fn key_press_builds_and_draws_once() {
        let (mut ctl, camera, mut buffer, mut log) = fixture();
        buffer.clear();
        let outcome = ctl
            .key_press(&camera, &mut buffer, &mut log, '1')
            .unwrap();
        assert_eq!(outcome, Some(RedrawOutcome::Completed));
        assert_eq!(ctl.selected(), Some(CurveKind::Koch));
        // 4^4 Koch segments, replayed exactly once.
        assert_eq!(buffer.count_of(crate::ops::Opcode::LineTo), 256);
        let line_calls = log
            .calls()
            .iter()
            .filter(|c| matches!(c, crate::backend::BackendCall::LineTo { .. }))
            .count();
        assert_eq!(line_calls, 256);
    }

    #[test]
    fn key_press_replaces_previous_figure() {
        let (mut ctl, camera, mut buffer, mut log) = fixture();
        ctl.key_press(&camera, &mut buffer, &mut log, '1').unwrap();
        let koch_len = buffer.len();
        ctl.key_press(&camera, &mut buffer, &mut log, '4').unwrap();
        assert_eq!(ctl.selected(), Some(CurveKind::Dragon));
        // Dragon order 10: 2^10 segments, three ops each.
        assert_eq!(buffer.len(), 3 * 1024);
        assert_ne!(buffer.len(), koch_len);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let (mut ctl, camera, mut buffer, mut log) = fixture();
        let before = buffer.len();
        let outcome = ctl
            .key_press(&camera, &mut buffer, &mut log, 'x')
            .unwrap();
        assert_eq!(outcome, None);
        assert_eq!(buffer.len(), before);
        assert!(log.calls().is_empty());
    }

    #[test]
    fn viewport_centers_and_flips_y() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_centered(400.0, 300.0), dvec2(0.0, 0.0));
        assert_eq!(vp.to_centered(0.0, 0.0), dvec2(-400.0, 300.0));
        assert_eq!(vp.to_centered(800.0, 600.0), dvec2(400.0, -300.0));
    }
}
