//! Headless demo: drives a move and a fling through the animation
//! controller at a simulated 60 fps and logs where the view ends up.
//!
//! Usage: `view-animation [options.toml]`. Set `RUST_LOG=debug` to see the
//! animation lifecycle.

use std::path::Path;
use std::time::Duration;

use glam::{DVec2, DVec3};
use view_animation::controller::AnimationController;
use view_animation::error::AnimationError;
use view_animation::geometry::Bounds;
use view_animation::options::AnimationOptions;
use view_animation::view::{MapView, View};
use web_time::Instant;

const FRAME: Duration = Duration::from_micros(16_667);
const MAX_FRAMES: u32 = 60 * 60;

fn run_until_idle(
    controller: &mut AnimationController,
    view: &mut MapView,
    start: Instant,
) -> u32 {
    let mut now = start;
    let mut frames = 0;
    while controller.tick(view, now) && frames < MAX_FRAMES {
        now += FRAME;
        frames += 1;
    }
    frames
}

fn main() -> Result<(), AnimationError> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => AnimationOptions::load(Path::new(&path))?,
        None => AnimationOptions::default(),
    };
    let mut controller = AnimationController::with_options(options);
    let mut view =
        MapView::new(DVec3::ZERO).with_frame_size(DVec2::new(4.0, 3.0));
    let bounds = Bounds::mbr(DVec2::splat(-500.0), DVec2::splat(500.0))?;

    controller.translate_to(
        &mut view,
        DVec3::new(120.0, -40.0, 0.0),
        Some(bounds.clone()),
    )?;
    let frames = run_until_idle(&mut controller, &mut view, Instant::now());
    log::info!("move finished after {frames} frames at {}", view.position());

    if controller.fling(&mut view, DVec2::new(900.0, 300.0), Some(bounds))? {
        let frames =
            run_until_idle(&mut controller, &mut view, Instant::now());
        log::info!(
            "fling settled after {frames} frames at {}",
            view.position()
        );
    } else {
        log::info!("fling ignored");
    }

    log::info!("{} animation frames driven", controller.frames_driven());
    Ok(())
}
