use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fam::{FamConfig, FamGame};
use fam_engine::{DrawList, JoystickId};
use fam_native::{init_logging, GameRunner};
use glam::Vec2;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level file (JSON list of walls) to load on start and on reset
    #[arg(long)]
    level: Option<PathBuf>,

    /// Tuning overrides (JSON); missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of fixed ticks to simulate
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Keyboard players to add before the first tick
    #[arg(long, default_value = "1")]
    players: u32,

    /// Joystick players to add before the first tick
    #[arg(long, default_value = "0")]
    joysticks: u32,

    /// Bananas dropped at random spots
    #[arg(long, default_value = "10")]
    bananas: u32,

    /// Bombs dropped at random spots
    #[arg(long, default_value = "0")]
    bombs: u32,

    /// RNG seed; the clock is used when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Keep one banana in play at all times
    #[arg(long)]
    chase: bool,

    /// Keep one bomb in play at all times
    #[arg(long)]
    bomb_mode: bool,

    /// Write the walls to this file when done
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging(log::LevelFilter::Info);
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FamConfig::from_path(path)?,
        None => FamConfig::default(),
    };
    let world = config.world_size();
    let dt = config.fixed_dt;

    let mut game = FamGame::new(config);
    if let Some(level) = &args.level {
        game = game.with_level(level);
    }
    if let Some(seed) = args.seed {
        game = game.with_seed(seed);
    }
    game.set_chase_banana(args.chase);
    game.set_random_bomb(args.bomb_mode);

    let mut runner = GameRunner::new(game);
    runner.init().context("failed to start the game")?;

    let mut spots = fam_engine::Rng::new(args.seed.unwrap_or(1));
    let mut spot = || Vec2::new(spots.range_f32(0.0, world.x), spots.range_f32(0.0, world.y * 0.5));
    {
        let (game, ctx) = runner.split_mut();
        for _ in 0..args.players {
            game.add_player(ctx, None);
        }
        for j in 0..args.joysticks {
            game.add_player(ctx, Some(JoystickId(j)));
        }
        for _ in 0..args.bananas {
            game.spawn_banana(ctx, spot(), Vec2::ZERO);
        }
        for _ in 0..args.bombs {
            game.spawn_bomb(ctx, spot(), Vec2::ZERO);
        }
    }

    let mut list = DrawList::new();
    let mut ticks = 0;
    while ticks < args.ticks {
        list.clear();
        ticks += runner.frame(dt, &mut list);
    }

    let game = runner.game();
    let physics = &runner.context().physics;
    let biggest = game
        .players()
        .iter()
        .map(|p| p.radius(physics))
        .fold(0.0_f32, f32::max);
    log::info!(
        "fam: {} ticks, {} players (largest radius {:.1}), {} bananas, {} bombs, {} walls, {} sprites last frame",
        ticks,
        game.players().len(),
        biggest,
        game.bananas().len(),
        game.bombs().len(),
        game.walls().len(),
        list.sprites.len()
    );

    if let Some(path) = &args.save {
        game.save_level(path)
            .with_context(|| format!("failed to save level to {}", path.display()))?;
    }
    Ok(())
}
