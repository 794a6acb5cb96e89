//! Ski Runner entry point
//!
//! Headless build: no window toolkit is wired in, so the binary plays a
//! scripted run against the configured level and logs what happens.
//! Pass a settings file path as the first argument (default `settings.json`).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use ski_runner::input::ScriptedInput;
    use ski_runner::render::LogRenderer;
    use ski_runner::ui::HudModel;
    use ski_runner::{Engine, Intent, Settings};

    env_logger::init();
    log::info!("Ski Runner (headless) starting...");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
    let settings = Settings::load_from(&path);
    let seed = settings.resolve_seed();
    log::info!("Seed {}, level {}", seed, settings.level);

    // Twenty seconds of play: start, trick every 12 frames, then close
    let demo_frames = u64::from(settings.frame_rate.max(1)) * 20;
    let script = ScriptedInput::new()
        .at(0, Intent::Start)
        .every(12, Intent::Trick)
        .at(demo_frames, Intent::WindowClosed);

    let mut engine = Engine::new(
        &settings,
        seed,
        HudModel::default(),
        LogRenderer::new(settings.screen_height),
        script,
    );
    engine.run();

    let hud = &engine.ui;
    if let Some(error) = &hud.error {
        log::error!("Level could not be played: {}", error);
    }
    log::info!(
        "Final {} / {} ({:?})",
        hud.coin_label,
        hud.speed_label,
        engine.controller.last_crash()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web front end; the library is the product on wasm
}
