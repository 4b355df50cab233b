//! Generates replay JSON files for the host driver.
//!
//! Usage:
//!   cargo run -p boxhop-core --example gen-replay -- [idle|run|gunner] > replay.json

use boxhop_core::*;
use serde::Serialize;

#[derive(Serialize)]
struct Replay {
    dt: f64,
    frames: Vec<FrameInput>,
}

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());
    let length = 60 * 60;

    let frames: Vec<FrameInput> = match mode.as_str() {
        "idle" => {
            // Stand on the safe platform for a minute
            vec![NULL_INPUT; length]
        }
        "run" => {
            // Hold right, hop every half second
            (0..length)
                .map(|frame| FrameInput {
                    axis: 1.0,
                    jump_pressed: frame % 30 == 0,
                    jump_held: frame % 30 < 18,
                    fire_pressed: false,
                })
                .collect()
        }
        "gunner" => {
            // Walk right, firing every quarter second
            (0..length)
                .map(|frame| FrameInput {
                    axis: 1.0,
                    jump_pressed: frame % 40 == 0,
                    jump_held: frame % 40 < 24,
                    fire_pressed: frame % 15 == 0,
                })
                .collect()
        }
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'run', or 'gunner'", mode);
            std::process::exit(1);
        }
    };

    // Verify by running the sim
    let mut world = match World::generate(GameConfig::default()) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("invalid default config: {}", e);
            std::process::exit(1);
        }
    };
    let mut played = 0;
    for input in &frames {
        step(&mut world, input, FRAME_DT);
        played += 1;
        if world.player.is_terminal() {
            break;
        }
    }

    let hud = world.hud();
    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Frames played: {}", played);
    eprintln!("Outcome: {:?}", hud.outcome);
    eprintln!("Score: {}", hud.score);
    eprintln!("Health: {}/{}  Ammo: {}/{}", hud.health, hud.max_health, hud.ammo, hud.max_ammo);
    eprintln!("Player x: {:.1}", world.player.pos.x);

    let replay = Replay {
        dt: FRAME_DT,
        frames,
    };
    println!("{}", serde_json::to_string(&replay).unwrap());
}
