/// clipview terminal viewer
///
/// Box-clip and scale a sample mesh in the terminal.
/// Keys:
///   - 1-4: load cube, tube, terrain, torus; 0: clear
///   - x/y/z: active axis
///   - [ ] and { }: low and high slider handle
///   - , . and < >: nudge the min and max field
///   - g: grab/release the box, h/j/k/l: move it
///   - c: reset clipping, t: live update
///   - G: grid, B: bounding box
///   - + -: scale the active axis, r: reset scale
///   - WASD / Arrow Keys: rotate
///   - Q/ESC: quit
///
/// Logs go to stderr; redirect it (`2>clipview.log`) while the viewer runs.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal;

use clipview_core::{ClipConfig, SampleMesh, ScaleConfig};
use clipview_terminal::{AppOptions, TerminalApp};

#[derive(Parser, Debug)]
#[command(name = "clipview-terminal")]
#[command(about = "Clip a mesh to a box in the terminal", long_about = None)]
struct Cli {
    /// Mesh to show at start-up: cube, tube, terrain or torus
    #[arg(short, long)]
    mesh: Option<SampleMesh>,

    /// Recompute the clip on every change instead of on release
    #[arg(long)]
    live: bool,

    /// Padding around the mesh extent for the range controls
    #[arg(long, default_value = "0.1")]
    epsilon: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let clip = ClipConfig::default()
        .with_epsilon(cli.epsilon)
        .with_live_update(cli.live);
    let options = AppOptions {
        clip,
        scale: ScaleConfig::default(),
        initial_mesh: cli.mesh,
    };

    let (width, height) = terminal::size().context("Failed to query terminal size")?;
    let mut app =
        TerminalApp::new(options, width, height).context("Invalid viewer configuration")?;
    app.run().context("Terminal viewer failed")?;

    Ok(())
}
