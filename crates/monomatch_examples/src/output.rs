use std::path::{Path, PathBuf};

use anyhow::Context;
use monomatch::prelude::RenderResult;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a `tracing` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Which images of a [`RenderResult`] to write.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputLayers {
    pub foreground: bool,
    pub background: bool,
}

/// Writes `<dir>/<card_index>.png`, plus `-fg`/`-bg` layers when requested.
pub fn save_render_result(
    result: &RenderResult,
    dir: &Path,
    layers: OutputLayers,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::new();
    let mut save = |suffix: &str, image: &image::RgbaImage| -> anyhow::Result<()> {
        let path = dir.join(format!("{}{suffix}.png", result.card_index));
        image
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
        Ok(())
    };

    save("", &result.full_image)?;
    if layers.foreground {
        save("-fg", &result.foreground_image)?;
    }
    if layers.background {
        save("-bg", &result.background_image)?;
    }
    Ok(written)
}
