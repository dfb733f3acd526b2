//! Drive an interactive session without a window: select a figure by key,
//! pan by a simulated drag, zoom by simulated scroll ticks, and report how
//! many backend calls each redraw issued.

use fraktur::{
    CallLog, Camera, CommandBuffer, InteractionConfig, InteractionController, Viewport,
};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let viewport = Viewport::new(800.0, 600.0);
    let mut controller = InteractionController::new(InteractionConfig::default());
    let mut camera = Camera::new();
    let mut buffer = CommandBuffer::new();
    let mut log = CallLog::new();

    for key in ['1', '2', '3', '4'] {
        controller
            .key_press(&camera, &mut buffer, &mut log, key)
            .map_err(|e| miette::miette!("{e}"))?;
        println!(
            "figure '{key}': {} operations, {} backend calls",
            buffer.len(),
            log.take().len()
        );
    }

    // Drag from window (400, 300) to (500, 250): pan left and down.
    controller.pointer_down(viewport.to_centered(400.0, 300.0));
    controller
        .pointer_up(
            &mut camera,
            &buffer,
            &mut log,
            viewport.to_centered(500.0, 250.0),
        )
        .map_err(|e| miette::miette!("{e}"))?;
    println!(
        "after drag: offset = {:?}, {} backend calls",
        camera.offset(),
        log.take().len()
    );

    // Rapid scroll: redraws coalesce behind the debounce threshold.
    let mut redraws = 0;
    for _ in 0..12 {
        if controller
            .scroll(&mut camera, &buffer, &mut log, 1.0)
            .map_err(|e| miette::miette!("{e}"))?
            .is_some()
        {
            redraws += 1;
        }
    }
    println!(
        "after 12 scroll ticks: scale = {:.2}, {} debounced redraws",
        camera.scale(),
        redraws
    );
    Ok(())
}
