//! Level files, reset and startup failures.

use std::path::PathBuf;

use fam::{Action, FamConfig, FamGame, GameError, Level};
use fam::level::WallRecord;
use fam_engine::{EngineContext, Game, InputEvent, InputQueue, JoystickId};
use fam_native::GameRunner;
use glam::Vec2;

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fam-{}-{}.json", name, std::process::id()))
}

fn two_walls() -> Level {
    Level {
        walls: vec![
            WallRecord::new(Vec2::new(0.0, 1000.0), Vec2::new(1920.0, 1000.0)),
            WallRecord::new(Vec2::new(100.0, 200.0), Vec2::new(300.0, 250.0)),
        ],
    }
}

fn start(level: &PathBuf) -> (FamGame, EngineContext) {
    let mut game = FamGame::new(FamConfig::default()).with_level(level).with_seed(11);
    let mut ctx = EngineContext::new(&game.config());
    game.init(&mut ctx).unwrap();
    (game, ctx)
}

#[test]
fn reset_reloads_level_and_keeps_joystick_players() {
    let path = scratch("reset");
    two_walls().save(&path).unwrap();
    let (mut game, mut ctx) = start(&path);
    assert_eq!(game.walls().len(), 2);

    game.add_wall(&mut ctx, Vec2::new(500.0, 500.0), Vec2::new(600.0, 500.0));
    game.add_player(&mut ctx, None).unwrap();
    let stick = game.add_player(&mut ctx, Some(JoystickId(0))).unwrap();
    let banana = game.spawn_banana(&mut ctx, Vec2::new(50.0, 50.0), Vec2::ZERO).unwrap();
    game.spawn_bomb(&mut ctx, Vec2::new(70.0, 50.0), Vec2::ZERO).unwrap();
    game.apply_actions(&mut ctx.physics, vec![Action::BananaEaten { banana, player: stick }]);

    game.reset(&mut ctx);

    assert_eq!(game.walls().to_level(), two_walls());
    assert!(game.bananas().is_empty());
    assert!(game.bombs().is_empty());
    assert_eq!(game.players().ids(), vec![stick]);
    let player = game.players().get(stick).unwrap();
    assert_eq!(player.joystick, Some(JoystickId(0)));
    assert_eq!(player.radius(&ctx.physics), 25.0);
    // Two walls and one player shape, nothing left over from before.
    assert_eq!(ctx.physics.collider_count(), 3);
    assert_eq!(ctx.physics.joint_count(), 2);

    // The respawned player still answers its stick.
    let joystick = JoystickId(0);
    ctx.input.apply(&InputEvent::JoystickConnected { joystick });
    ctx.input.apply(&InputEvent::JoystickAxis { joystick, axis: 0, value: 1.0 });
    let body = game.players().get(stick).unwrap().entity.body.body_handle;
    let before = ctx.physics.body_position(body).0.x;
    for _ in 0..30 {
        game.update(&mut ctx, &InputQueue::new());
    }
    assert!(ctx.physics.body_position(body).0.x > before + 30.0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn reset_with_broken_level_continues_empty() {
    let path = scratch("broken");
    two_walls().save(&path).unwrap();
    let (mut game, mut ctx) = start(&path);
    std::fs::write(&path, "{ not a level").unwrap();

    game.reset(&mut ctx);
    assert!(game.walls().is_empty());
    assert_eq!(ctx.physics.collider_count(), 0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_level_stops_startup() {
    let game = FamGame::new(FamConfig::default()).with_level(scratch("missing"));
    let mut runner = GameRunner::new(game);
    let err = runner.init().unwrap_err();
    assert!(matches!(err, GameError::Level(_)), "{err}");
}

#[test]
fn bad_config_stops_startup() {
    let mut config = FamConfig::default();
    config.player.radius = 0.0;
    let mut runner = GameRunner::new(FamGame::new(config));
    let err = runner.init().unwrap_err();
    assert!(matches!(err, GameError::Config(_)), "{err}");
}

#[test]
fn drawn_walls_save_in_order() {
    let path = scratch("save");
    let mut game = FamGame::new(FamConfig::default());
    let mut ctx = EngineContext::new(&game.config());
    game.init(&mut ctx).unwrap();
    for record in &two_walls().walls {
        let (a, b) = record.endpoints();
        game.add_wall(&mut ctx, a, b).unwrap();
    }

    game.save_level(&path).unwrap();
    assert_eq!(Level::load(&path).unwrap(), two_walls());
    let _ = std::fs::remove_file(&path);
}
