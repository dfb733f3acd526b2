//! Render the stock Koch figure to SVG on stdout.
//!
//! ```sh
//! cargo run --example koch_svg > koch.svg
//! ```

use fraktur::{Camera, Curve, CurveKind, Pen, SvgBackend, defaults, draw_figure};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let camera = Camera::new();
    let mut svg = SvgBackend::new(800.0, 600.0);
    let start = Pen::new(defaults::FIGURE_ORIGIN, defaults::FIGURE_HEADING);
    draw_figure(
        &Curve::default_for(CurveKind::Koch),
        start,
        &camera,
        &mut svg,
    )?;
    println!("{}", svg.finish());
    Ok(())
}
