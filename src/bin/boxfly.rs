use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use boxfly::{
    ImageTextureProvider, Perspective, Point, Scene, SceneConfig, StageSize, StaticDisplay,
    Texture, TextureProvider as _,
};

#[derive(Parser, Debug)]
#[command(name = "boxfly", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the computed layout (start points, destination, box size) as JSON.
    Layout(SceneArgs),
    /// Run the scene headless and print frame snapshots as JSON lines.
    Eval(EvalArgs),
    /// Run to a frame, then press at a point and report what happened.
    Click(ClickArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Four boxes on one timeline; a press quits.
    Grid,
    /// One box on its own timeline; a press replays it.
    Single,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene config JSON. Without it the preset is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in scene used when no config is given.
    #[arg(long, value_enum, default_value_t = Preset::Grid)]
    preset: Preset,

    /// Stage width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Stage height in pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 60.0)]
    fov: f64,

    /// Near clip plane.
    #[arg(long, default_value_t = 1.0)]
    near: f64,

    /// Far clip plane.
    #[arg(long, default_value_t = 5.0)]
    far: f64,
}

#[derive(Args, Debug)]
struct EvalArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Ticks to run. Defaults to the start tick plus the longest timeline.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,

    /// Print every Nth tick (the last tick is always printed).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,
}

#[derive(Args, Debug)]
struct ClickArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Press x in stage pixels.
    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    /// Press y in stage pixels.
    #[arg(long, allow_negative_numbers = true)]
    y: f64,

    /// Frames to play before the press.
    #[arg(long, default_value_t = 0)]
    at: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Click(args) => cmd_click(args),
    }
}

fn load_config(args: &SceneArgs) -> anyhow::Result<SceneConfig> {
    match &args.config {
        Some(path) => SceneConfig::from_path(path)
            .with_context(|| format!("load scene config '{}'", path.display())),
        None => Ok(match args.preset {
            Preset::Grid => SceneConfig::grid_2x2(),
            Preset::Single => SceneConfig::single_box_replay(),
        }),
    }
}

fn display(args: &SceneArgs) -> anyhow::Result<StaticDisplay> {
    let size = StageSize::new(args.width, args.height)?;
    let perspective = Perspective {
        fov_deg: args.fov,
        aspect: args.width / args.height,
        z_near: args.near,
        z_far: args.far,
    };
    perspective.validate()?;
    Ok(StaticDisplay::new(size, perspective))
}

fn load_texture(path: Option<&Path>) -> anyhow::Result<Texture> {
    match path {
        Some(path) => ImageTextureProvider::new(".")
            .load_texture(path)
            .with_context(|| format!("load texture '{}'", path.display())),
        None => {
            tracing::warn!("no texture configured, using a solid placeholder");
            Ok(Texture::solid("placeholder", 1, 1, [0xcc, 0x00, 0x00, 0xff]))
        }
    }
}

fn build_scene(args: &SceneArgs) -> anyhow::Result<Scene> {
    let config = load_config(args)?;
    let display = display(args)?;
    let texture = load_texture(config.texture.as_deref())?;
    Ok(Scene::assemble(&config, texture, &display)?)
}

fn cmd_layout(args: SceneArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let display = display(&args)?;
    let params = config.layout_params(display.size, display.perspective);
    let layout = boxfly::compute_layout(&params)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &layout).context("write layout JSON")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let mut scene = build_scene(&args.scene)?;
    // One start tick plus a full pass of the longest timeline.
    let limit = args.frames.unwrap_or_else(|| {
        let longest = scene.stage().timelines().map(|(_, tl)| tl.n_frames()).max();
        longest.unwrap_or(0) + 1
    });
    scene.start();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for tick in 0..limit {
        scene.tick(if tick == 0 { 0 } else { 1 });
        let last = tick + 1 == limit || scene.is_idle();
        if last || tick % args.every == 0 {
            serde_json::to_writer(&mut out, &scene.snapshot()).context("write snapshot JSON")?;
            writeln!(out)?;
        }
        if last {
            break;
        }
    }
    Ok(())
}

fn cmd_click(args: ClickArgs) -> anyhow::Result<()> {
    let mut scene = build_scene(&args.scene)?;
    scene.start();
    scene.tick(0);
    for _ in 0..args.at {
        if scene.is_idle() {
            break;
        }
        scene.tick(1);
    }

    let outcome = scene.handle_click(Point::new(args.x, args.y))?;
    let report = serde_json::json!({
        "tick": scene.stage().ticks(),
        "outcome": outcome,
    });
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer(&mut out, &report).context("write click JSON")?;
    writeln!(out)?;

    let teardown = scene.teardown();
    tracing::debug!(?teardown, "scene released");
    Ok(())
}
