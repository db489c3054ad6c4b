//! Rock Drift headless runner
//!
//! Drives the simulation with the demo autopilot at a fixed frame interval,
//! standing in for the renderer/audio/HUD collaborators by logging what they
//! would receive.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use rock_drift::Tuning;
use rock_drift::sim::{Bounds, GameEvent, Hud, TickInput, World, tick};

#[derive(Parser, Debug)]
#[command(name = "rock-drift")]
#[command(about = "Run a headless demo session of the asteroid simulation")]
struct Cli {
    /// RNG seed for the run
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,
    #[arg(long, default_value_t = rock_drift::consts::DEFAULT_WIDTH)]
    width: f32,
    #[arg(long, default_value_t = rock_drift::consts::DEFAULT_HEIGHT)]
    height: f32,
    /// Simulated milliseconds per frame
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// JSON file overriding game balance
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Serialize)]
struct EventTally {
    fired: u64,
    explosions: u64,
    enemy_shots: u64,
    crashes: u64,
    enemies_killed: u64,
    sessions: u64,
    game_overs: u64,
}

impl EventTally {
    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::Fired => self.fired += 1,
            GameEvent::Explosion => self.explosions += 1,
            GameEvent::EnemyShot => self.enemy_shots += 1,
            GameEvent::Crash => self.crashes += 1,
            GameEvent::EnemyKilled { .. } => self.enemies_killed += 1,
            GameEvent::SessionStarted => self.sessions += 1,
            GameEvent::GameOver { score } => {
                self.game_overs += 1;
                log::info!("Session ended with {score} points");
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    hud: Hud,
    asteroids: usize,
    events: EventTally,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Rock Drift (headless) starting...");

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if cli.width <= 0.0 || cli.height <= 0.0 {
        anyhow::bail!("playfield must be positive, got {}x{}", cli.width, cli.height);
    }

    let mut world = World::with_tuning(cli.seed, Bounds::new(cli.width, cli.height), tuning);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut tally = EventTally::default();
    for frame in 0..cli.ticks {
        tick(&mut world, &input, frame * cli.frame_ms);
        for event in world.drain_events() {
            log::debug!("frame {frame}: {event:?}");
            tally.record(event);
        }
    }

    let summary = Summary {
        seed: cli.seed,
        ticks: cli.ticks,
        hud: world.hud(),
        asteroids: world.asteroids.len(),
        events: tally,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "score {} | enemies {} | lives {} | {:?}",
            summary.hud.score, summary.hud.enemy_kills, summary.hud.lives, summary.hud.phase
        );
        println!(
            "sessions {} | shots {} | crashes {}",
            summary.events.sessions, summary.events.fired, summary.events.crashes
        );
    }
    Ok(())
}
