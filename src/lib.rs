//! fraktur: procedurally generated fractal curves on a pannable, zoomable
//! canvas.
//!
//! Drawing is never issued directly against screen coordinates. Curve
//! generators record abstract operations with their world-space arguments
//! into a [`CommandBuffer`]; the [`Camera`] replays that buffer through its
//! pan/zoom transform onto any [`DrawingBackend`] whenever the view
//! changes. In-flight replays are superseded (not errored) when a newer one
//! is requested.
//!
//! ```
//! use fraktur::{Camera, CallLog, CommandBuffer, Curve, Pen, RedrawOutcome};
//! use glam::DVec2;
//!
//! let mut buffer = CommandBuffer::new();
//! let curve = Curve::Koch { order: 2, size: 90.0 };
//! curve.generate(&mut buffer, Pen::default()).unwrap();
//!
//! let camera = Camera::with_view(DVec2::new(10.0, 0.0), 2.0);
//! let mut log = CallLog::new();
//! assert_eq!(camera.redraw(&buffer, &mut log).unwrap(), RedrawOutcome::Completed);
//! ```

pub mod backend;
pub mod buffer;
pub mod camera;
pub mod curves;
pub mod defaults;
pub mod errors;
pub mod interact;
pub mod log;
pub mod ops;
pub mod types;

pub use backend::{BackendCall, CallLog, DrawingBackend, SvgBackend};
pub use buffer::CommandBuffer;
pub use camera::{Camera, RedrawOutcome, ReplayHandle};
pub use curves::{Curve, CurveKind};
pub use errors::{CurveError, RecordError};
pub use interact::{InteractError, InteractionConfig, InteractionController, Viewport};
pub use ops::{ArgSchema, Opcode, Operation};
pub use types::{Degrees, Pen};

/// Build a figure and replay it once through `camera` onto `backend`.
///
/// Convenience wrapper over [`Curve::generate`] + [`Camera::redraw`] for
/// hosts that don't keep a long-lived buffer. Returns the rendered buffer so
/// subsequent pan/zoom redraws can reuse it.
pub fn draw_figure<B: DrawingBackend>(
    curve: &Curve,
    start: Pen,
    camera: &Camera,
    backend: &mut B,
) -> Result<CommandBuffer, miette::Report> {
    let mut buffer = CommandBuffer::new();
    curve.generate(&mut buffer, start)?;
    camera
        .redraw(&buffer, backend)
        .map_err(|e| miette::miette!("drawing backend error: {e}"))?;
    Ok(buffer)
}
