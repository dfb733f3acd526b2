//! The drawing backend seam.
//!
//! The camera replays operations against anything implementing
//! [`DrawingBackend`]; it never assumes a concrete backend, only that calls
//! execute synchronously in issue order. Two backends ship with the crate:
//! [`CallLog`], which records every issued call for inspection, and
//! [`SvgBackend`], which interprets the turtle primitives into polylines and
//! emits a small SVG document.

use std::convert::Infallible;
use std::fmt;
use std::fmt::Write as _;

use glam::{DVec2, dvec2};

/// Capability set the camera draws through.
///
/// `line_to`, `forward` and `backward` stroke only while the pen is down
/// (turtle semantics); `move_to` never strokes. All coordinates arriving
/// here are already screen-space: the camera has applied pan and zoom.
pub trait DrawingBackend {
    type Error: std::error::Error + 'static;

    fn move_to(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn line_to(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn forward(&mut self, distance: f64) -> Result<(), Self::Error>;
    fn backward(&mut self, distance: f64) -> Result<(), Self::Error>;
    fn turn(&mut self, degrees: f64) -> Result<(), Self::Error>;
    fn pen_up(&mut self) -> Result<(), Self::Error>;
    fn pen_down(&mut self) -> Result<(), Self::Error>;
    fn circle(&mut self, radius: f64) -> Result<(), Self::Error>;
    fn reset(&mut self) -> Result<(), Self::Error>;
    fn clear(&mut self) -> Result<(), Self::Error>;
    fn hide(&mut self) -> Result<(), Self::Error>;
    fn show(&mut self) -> Result<(), Self::Error>;
    fn set_pen_color(&mut self, name: &str) -> Result<(), Self::Error>;
}

// ============================================================================
// Call log backend
// ============================================================================

/// One call issued to a backend, with the already-transformed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Forward { distance: f64 },
    Backward { distance: f64 },
    Turn { degrees: f64 },
    PenUp,
    PenDown,
    Circle { radius: f64 },
    Reset,
    Clear,
    Hide,
    Show,
    SetPenColor { name: String },
}

impl fmt::Display for BackendCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendCall::MoveTo { x, y } => write!(f, "move_to({x}, {y})"),
            BackendCall::LineTo { x, y } => write!(f, "line_to({x}, {y})"),
            BackendCall::Forward { distance } => write!(f, "forward({distance})"),
            BackendCall::Backward { distance } => write!(f, "backward({distance})"),
            BackendCall::Turn { degrees } => write!(f, "turn({degrees})"),
            BackendCall::PenUp => f.write_str("pen_up"),
            BackendCall::PenDown => f.write_str("pen_down"),
            BackendCall::Circle { radius } => write!(f, "circle({radius})"),
            BackendCall::Reset => f.write_str("reset"),
            BackendCall::Clear => f.write_str("clear"),
            BackendCall::Hide => f.write_str("hide"),
            BackendCall::Show => f.write_str("show"),
            BackendCall::SetPenColor { name } => write!(f, "set_pen_color({name})"),
        }
    }
}

/// Backend that records every issued call verbatim.
///
/// Used by the test suite to assert on replayed call sequences, and handy
/// for debugging host integrations.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Vec<BackendCall>,
}

impl CallLog {
    pub fn new() -> CallLog {
        CallLog::default()
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the log empty.
    pub fn take(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Render the log one call per line (stable across runs for a fixed
    /// buffer and camera state).
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for call in &self.calls {
            let _ = writeln!(out, "{call}");
        }
        out
    }
}

impl DrawingBackend for CallLog {
    type Error = Infallible;

    fn move_to(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.calls.push(BackendCall::MoveTo { x, y });
        Ok(())
    }
    fn line_to(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.calls.push(BackendCall::LineTo { x, y });
        Ok(())
    }
    fn forward(&mut self, distance: f64) -> Result<(), Infallible> {
        self.calls.push(BackendCall::Forward { distance });
        Ok(())
    }
    fn backward(&mut self, distance: f64) -> Result<(), Infallible> {
        self.calls.push(BackendCall::Backward { distance });
        Ok(())
    }
    fn turn(&mut self, degrees: f64) -> Result<(), Infallible> {
        self.calls.push(BackendCall::Turn { degrees });
        Ok(())
    }
    fn pen_up(&mut self) -> Result<(), Infallible> {
        self.calls.push(BackendCall::PenUp);
        Ok(())
    }
    fn pen_down(&mut self) -> Result<(), Infallible> {
        self.calls.push(BackendCall::PenDown);
        Ok(())
    }
    fn circle(&mut self, radius: f64) -> Result<(), Infallible> {
        self.calls.push(BackendCall::Circle { radius });
        Ok(())
    }
    fn reset(&mut self) -> Result<(), Infallible> {
        self.calls.push(BackendCall::Reset);
        Ok(())
    }
    fn clear(&mut self) -> Result<(), Infallible> {
        self.calls.push(BackendCall::Clear);
        Ok(())
    }
    fn hide(&mut self) -> Result<(), Infallible> {
        self.calls.push(BackendCall::Hide);
        Ok(())
    }
    fn show(&mut self) -> Result<(), Infallible> {
        self.calls.push(BackendCall::Show);
        Ok(())
    }
    fn set_pen_color(&mut self, name: &str) -> Result<(), Infallible> {
        self.calls.push(BackendCall::SetPenColor {
            name: name.to_string(),
        });
        Ok(())
    }
}

// ============================================================================
// SVG backend
// ============================================================================

/// Backend that interprets the turtle primitives into polylines and circles
/// and serializes them as a minimal SVG document.
///
/// Screen space here is turtle-oriented (origin at the canvas center, y up);
/// the y flip into SVG's y-down space happens once, in [`SvgBackend::finish`].
#[derive(Debug, Clone)]
pub struct SvgBackend {
    width: f64,
    height: f64,
    position: DVec2,
    heading_degrees: f64,
    pen_is_down: bool,
    color: String,
    current: Vec<DVec2>,
    polylines: Vec<(String, Vec<DVec2>)>,
    circles: Vec<(DVec2, f64, String)>,
}

impl SvgBackend {
    pub fn new(width: f64, height: f64) -> SvgBackend {
        SvgBackend {
            width,
            height,
            position: DVec2::ZERO,
            heading_degrees: 0.0,
            // Turtle pens start down
            pen_is_down: true,
            color: "black".to_string(),
            current: Vec::new(),
            polylines: Vec::new(),
            circles: Vec::new(),
        }
    }

    fn heading_vector(&self) -> DVec2 {
        DVec2::from_angle(self.heading_degrees.to_radians())
    }

    /// Close out the polyline under construction, if it has any strokes.
    fn flush_polyline(&mut self) {
        if self.current.len() > 1 {
            self.polylines
                .push((self.color.clone(), std::mem::take(&mut self.current)));
        } else {
            self.current.clear();
        }
    }

    fn stroke_to(&mut self, target: DVec2) {
        if self.pen_is_down {
            if self.current.is_empty() {
                self.current.push(self.position);
            }
            self.current.push(target);
        } else {
            self.flush_polyline();
        }
        self.position = target;
    }

    /// Serialize everything drawn so far as an SVG document.
    pub fn finish(&self) -> String {
        // Flip y once here: turtle space is y-up with origin at the center,
        // SVG is y-down with origin at the top-left.
        let to_svg = |p: DVec2| dvec2(p.x + self.width / 2.0, self.height / 2.0 - p.y);

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );
        let mut polylines: Vec<(String, Vec<DVec2>)> = self.polylines.clone();
        if self.current.len() > 1 {
            polylines.push((self.color.clone(), self.current.clone()));
        }
        for (color, points) in &polylines {
            let _ = write!(out, r#"  <polyline fill="none" stroke="{color}" points=""#);
            for (i, p) in points.iter().enumerate() {
                let q = to_svg(*p);
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{:.2},{:.2}", q.x, q.y);
            }
            let _ = writeln!(out, r#""/>"#);
        }
        for (center, radius, color) in &self.circles {
            let q = to_svg(*center);
            let _ = writeln!(
                out,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}"/>"#,
                q.x,
                q.y,
                radius.abs(),
                color
            );
        }
        out.push_str("</svg>\n");
        out
    }
}

impl DrawingBackend for SvgBackend {
    type Error = Infallible;

    fn move_to(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.flush_polyline();
        self.position = dvec2(x, y);
        Ok(())
    }
    fn line_to(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.stroke_to(dvec2(x, y));
        Ok(())
    }
    fn forward(&mut self, distance: f64) -> Result<(), Infallible> {
        let target = self.position + self.heading_vector() * distance;
        self.stroke_to(target);
        Ok(())
    }
    fn backward(&mut self, distance: f64) -> Result<(), Infallible> {
        let target = self.position - self.heading_vector() * distance;
        self.stroke_to(target);
        Ok(())
    }
    fn turn(&mut self, degrees: f64) -> Result<(), Infallible> {
        self.heading_degrees += degrees;
        Ok(())
    }
    fn pen_up(&mut self) -> Result<(), Infallible> {
        self.flush_polyline();
        self.pen_is_down = false;
        Ok(())
    }
    fn pen_down(&mut self) -> Result<(), Infallible> {
        self.pen_is_down = true;
        Ok(())
    }
    fn circle(&mut self, radius: f64) -> Result<(), Infallible> {
        if self.pen_is_down {
            self.circles
                .push((self.position, radius, self.color.clone()));
        }
        Ok(())
    }
    fn reset(&mut self) -> Result<(), Infallible> {
        *self = SvgBackend::new(self.width, self.height);
        Ok(())
    }
    fn clear(&mut self) -> Result<(), Infallible> {
        self.current.clear();
        self.polylines.clear();
        self.circles.clear();
        Ok(())
    }
    fn hide(&mut self) -> Result<(), Infallible> {
        // Cursor visibility has no SVG representation
        Ok(())
    }
    fn show(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
    fn set_pen_color(&mut self, name: &str) -> Result<(), Infallible> {
        self.flush_polyline();
        self.color = name.to_string();
        Ok(())
    }
}
