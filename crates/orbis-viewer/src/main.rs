mod demo_scene;

use anyhow::{Context, Result};

use orbis_engine::device::GpuInit;
use orbis_engine::logging::{init_logging, LoggingConfig};
use orbis_engine::render::RenderMode;
use orbis_engine::window::{Runtime, RuntimeConfig};

use demo_scene::DemoScene;

/// Usage: `orbis-viewer [hud|world|both]`
///
/// Keys: `1` HUD only, `2` world only, `3` both, `R` reset camera, `Esc` quit.
/// Drag with the left button to orbit; scroll or pinch to zoom.
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mode = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<RenderMode>()
            .with_context(|| format!("invalid render mode argument {arg:?}"))?,
        None => RenderMode::Both,
    };

    let config = RuntimeConfig {
        title: "orbis viewer".to_string(),
        mode,
        ..RuntimeConfig::default()
    };

    log::info!("starting orbis viewer in {mode} mode");
    Runtime::run(config, GpuInit::default(), DemoScene::new())
}
