mod config;
mod constants;
mod error;
mod interpreter;
mod matrix;
mod picture;
mod render;
mod vector;

use anyhow::Context;
use clap::Parser;
use log::info;

use config::RenderConfig;

/// Renders MDL scripts to the screen, to images, or to animated GIFs.
#[derive(Parser, Debug)]
#[command(name = "mdl-engine", version, about)]
struct Cli {
    /// Scripts to run in order. Runs the bundled demo when empty.
    scripts: Vec<String>,

    /// Directory that receives the numbered frames of an animation.
    #[arg(long, default_value = constants::DEFAULT_FRAME_DIRECTORY)]
    frame_dir: String,

    /// Delay between GIF frames, in milliseconds.
    #[arg(long, default_value_t = constants::DEFAULT_ANIMATION_DELAY_MS)]
    delay_ms: u32,

    #[arg(long, default_value_t = constants::DEFAULT_PICTURE_DIMENSIONS.0)]
    width: usize,

    #[arg(long, default_value_t = constants::DEFAULT_PICTURE_DIMENSIONS.1)]
    height: usize,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            dimensions: (self.width, self.height),
            frame_directory: self.frame_dir.clone(),
            animation_delay_ms: self.delay_ms,
        }
    }
}

#[show_image::main]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.render_config();

    let scripts = if cli.scripts.is_empty() {
        info!("A path to a script wasn't provided. '{}' was chosen by default.", constants::DEFAULT_SCRIPT);
        vec![constants::DEFAULT_SCRIPT.to_string()]
    } else {
        cli.scripts
    };

    for path in &scripts {
        info!("Running script '{}'.", path);
        interpreter::run_script(path, &config).with_context(|| format!("running script '{}'", path))?;
    }

    Ok(())
}
