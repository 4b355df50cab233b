mod logging;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use serde::Deserialize;

use boxhop_core::{hash_layout, hash_replay, step, FrameInput, GameConfig, GameEvent, World};
use boxhop_core::{FRAME_DT, NULL_INPUT};

/// Headless driver: generates a level, plays a replay through it and prints
/// a JSON summary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game config JSON. Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay JSON (`{"dt": .., "frames": [..]}`), or `-` for stdin.
    /// Without one, the player idles for `--frames` frames.
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Override the level seed from the config.
    #[arg(long)]
    seed: Option<u32>,

    /// Idle frame count when no replay is given.
    #[arg(long, default_value_t = 600)]
    frames: usize,

    /// Override the frame time in seconds.
    #[arg(long)]
    dt: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct Replay {
    #[serde(default = "default_dt")]
    dt: f64,
    frames: Vec<FrameInput>,
}

fn default_dt() -> f64 {
    FRAME_DT
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read replay from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = read_source(path)?;
    serde_json::from_str(&json).with_context(|| format!("invalid config {}", path.display()))
}

fn load_replay(path: Option<&Path>, idle_frames: usize) -> Result<Replay> {
    let Some(path) = path else {
        return Ok(Replay {
            dt: FRAME_DT,
            frames: vec![NULL_INPUT; idle_frames],
        });
    };
    let json = read_source(path)?;
    serde_json::from_str(&json).with_context(|| format!("invalid replay {}", path.display()))
}

fn log_event(frame: usize, event: &GameEvent) {
    match event {
        GameEvent::Finished(outcome) => info!("frame {}: finished {:?}", frame, outcome),
        other => debug!("frame {}: {:?}", frame, other),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.level.seed = seed;
    }
    let replay = load_replay(args.replay.as_deref(), args.frames)?;
    let dt = args.dt.unwrap_or(replay.dt);

    let seed = config.level.seed;
    let mut world = World::generate(config).context("cannot build level")?;
    let layout_hash = hash_layout(&world);
    info!(
        "level seed={} segments={} max_jump={:.2}",
        seed,
        world.layout.segments.len(),
        world.layout.max_jump_distance
    );

    let mut played = 0;
    for input in &replay.frames {
        for event in step(&mut world, input, dt) {
            log_event(played, &event);
        }
        played += 1;
        if world.player.is_terminal() {
            break;
        }
    }

    let hud = world.hud();
    let summary = serde_json::json!({
        "seed": seed,
        "frames_played": played,
        "dt": dt,
        "outcome": hud.outcome,
        "hud": hud,
        "player_x": world.player.pos.x,
        "segments": world.layout.segments.len(),
        "layout_hash": hex::encode(layout_hash),
        "replay_hash": hex::encode(hash_replay(&replay.frames)),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
