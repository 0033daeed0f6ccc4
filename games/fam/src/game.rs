use std::path::{Path, PathBuf};

use fam_engine::input::keys;
use fam_engine::{
    debug_draw_world, CollisionHandlers, EngineContext, EntityId, Game, GameConfig, InputEvent,
    InputQueue, JoystickId, MouseButton, PhysicsWorld, PoolError, PrimitiveStyle, Renderer, Rng,
    SpriteDraw, TextureId,
};
use glam::{Vec2, Vec3};

use crate::banana::BananaSystem;
use crate::bomb::{BombState, BombSystem};
use crate::collision::{register_handlers, Action};
use crate::config::FamConfig;
use crate::error::GameError;
use crate::level::{Level, LevelError};
use crate::mouse::{LeftPress, Mouse};
use crate::palette::ColorCycle;
use crate::player::PlayerSystem;
use crate::wall::WallSystem;

pub const BACKGROUND: TextureId = TextureId("background");

/// Custom event kinds sent by the UI layer.
pub const CUSTOM_RESET: u32 = 1;
pub const CUSTOM_DEBUG_DRAW: u32 = 2;
/// `a != 0` turns the mode on.
pub const CUSTOM_CHASE_BANANA: u32 = 3;
/// `a != 0` turns the mode on.
pub const CUSTOM_RANDOM_BOMB: u32 = 4;
pub const CUSTOM_SAVE_LEVEL: u32 = 5;

/// Fastest a mode-spawned banana or bomb is thrown, per axis.
const THROW_SPEED: f32 = 1000.0;

pub struct FamGame {
    config: FamConfig,
    level_path: Option<PathBuf>,
    handlers: CollisionHandlers<Action>,
    players: PlayerSystem,
    bananas: BananaSystem,
    bombs: BombSystem,
    walls: WallSystem,
    mouse: Mouse,
    colors: ColorCycle,
    rng: Rng,
    paused: bool,
    chase_banana: bool,
    random_bomb: bool,
    debug_draw: bool,
    fullscreen: bool,
}

impl FamGame {
    pub fn new(config: FamConfig) -> Self {
        Self {
            handlers: register_handlers(&config),
            players: PlayerSystem::new(&config.player),
            bananas: BananaSystem::new(&config.banana),
            bombs: BombSystem::new(&config.bomb),
            walls: WallSystem::new(&config.wall),
            mouse: Mouse::new(&config.mouse),
            colors: ColorCycle::new(),
            rng: Rng::from_time(),
            level_path: None,
            paused: false,
            chase_banana: false,
            random_bomb: false,
            debug_draw: false,
            fullscreen: false,
            config,
        }
    }

    /// Load walls from this file on init and on every reset; save back to it.
    pub fn with_level(mut self, path: impl Into<PathBuf>) -> Self {
        self.level_path = Some(path.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::new(seed);
        self
    }

    pub fn set_chase_banana(&mut self, on: bool) {
        self.chase_banana = on;
    }

    pub fn set_random_bomb(&mut self, on: bool) {
        self.random_bomb = on;
    }

    pub fn set_debug_draw(&mut self, on: bool) {
        self.debug_draw = on;
    }

    pub fn spawn_banana(&mut self, ctx: &mut EngineContext, position: Vec2, velocity: Vec2) -> Option<EntityId> {
        let added = self.bananas.add(ctx, position, velocity).map(|b| b.id);
        rejected(added)
    }

    pub fn spawn_bomb(&mut self, ctx: &mut EngineContext, position: Vec2, velocity: Vec2) -> Option<EntityId> {
        let added = self.bombs.add(ctx, position, velocity).map(|b| b.entity.id);
        rejected(added)
    }

    /// Add a player near the middle of the world, in the next palette color.
    pub fn add_player(&mut self, ctx: &mut EngineContext, joystick: Option<JoystickId>) -> Option<EntityId> {
        let at = self.players.spawn_point(ctx.world_size(), &mut self.rng);
        let color = self.colors.next_color();
        let added = self.players.add(ctx, at, color, joystick).map(|p| p.entity.id);
        rejected(added)
    }

    pub fn add_wall(&mut self, ctx: &mut EngineContext, a: Vec2, b: Vec2) -> Option<EntityId> {
        let added = self.walls.add(ctx, a, b).map(|w| w.id);
        rejected(added)
    }

    /// Start over: fresh physics world, the level reloaded, joystick players
    /// back near the middle at base size. Keyboard players, bananas and bombs
    /// are dropped.
    pub fn reset(&mut self, ctx: &mut EngineContext) {
        self.bananas.clear(&mut ctx.physics);
        self.bombs.clear(&mut ctx.physics);
        self.walls.clear(&mut ctx.physics);
        let seats = self.players.retire_all(&mut ctx.physics);

        ctx.reset_physics();
        self.handlers = register_handlers(&self.config);
        let world = ctx.world_size();
        self.mouse.attach(&mut ctx.physics, world * 0.5);

        let level = self.read_level().unwrap_or_else(|e| {
            log::error!("game: {}, continuing with an empty level", e);
            Level::empty()
        });
        rejected(self.walls.load(ctx, &level));

        for seat in seats {
            let at = self.players.spawn_point(world, &mut self.rng);
            rejected(self.players.respawn(&mut ctx.physics, seat, at).map(|_| ()));
        }

        log::info!(
            "game: reset with {} walls, {} players",
            self.walls.len(),
            self.players.len()
        );
    }

    /// Step the world and apply what the collision handlers queued.
    pub fn step_physics(&mut self, ctx: &mut EngineContext) {
        let actions = ctx.step_physics(&self.handlers);
        self.apply_actions(&mut ctx.physics, actions);
    }

    /// Apply deferred collision outcomes in the order they were queued.
    /// Entities removed earlier in the same batch are skipped.
    pub fn apply_actions(&mut self, physics: &mut PhysicsWorld, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::BananaEaten { banana, player } => {
                    let Some(body) = self.bananas.get(banana).map(|b| b.body.body_handle) else {
                        continue;
                    };
                    self.mouse.release_body(physics, body);
                    self.bananas.remove(physics, banana);
                    if let Some(radius) = self.players.grow(physics, player) {
                        log::debug!("game: {:?} ate {:?}, radius {:.1}", player, banana, radius);
                    }
                }
                Action::BombHit { bomb, player } => {
                    let exploding = self
                        .bombs
                        .get(bomb)
                        .is_some_and(|b| b.state() == BombState::Boom);
                    if exploding {
                        self.players.reset_radius(physics, player);
                    }
                }
            }
        }
    }

    pub fn save_level(&self, path: impl AsRef<Path>) -> Result<(), LevelError> {
        self.walls.to_level().save(path)
    }

    pub fn fam_config(&self) -> &FamConfig {
        &self.config
    }

    pub fn players(&self) -> &PlayerSystem {
        &self.players
    }

    pub fn bananas(&self) -> &BananaSystem {
        &self.bananas
    }

    pub fn bombs(&self) -> &BombSystem {
        &self.bombs
    }

    pub fn walls(&self) -> &WallSystem {
        &self.walls
    }

    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_chasing_banana(&self) -> bool {
        self.chase_banana
    }

    pub fn is_random_bomb(&self) -> bool {
        self.random_bomb
    }

    pub fn is_debug_draw(&self) -> bool {
        self.debug_draw
    }

    fn read_level(&self) -> Result<Level, LevelError> {
        match &self.level_path {
            Some(path) => Level::load(path),
            None => Ok(Level::empty()),
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("game: {}", if self.paused { "paused" } else { "resumed" });
    }

    fn handle_event(&mut self, ctx: &mut EngineContext, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } => self.handle_key(ctx, key_code),
            InputEvent::PointerDown { x, y, button } => {
                let at = Vec2::new(x, y);
                match button {
                    MouseButton::Left => {
                        if let LeftPress::Grabbed(tag) = self.mouse.press_left(&mut ctx.physics, at) {
                            log::debug!("game: grabbed {:?}", tag);
                        }
                    }
                    MouseButton::Right => self.mouse.press_right(at),
                    MouseButton::Middle => {}
                }
            }
            InputEvent::PointerUp { x, y, button } => {
                let at = Vec2::new(x, y);
                match button {
                    MouseButton::Left => {
                        if let Some(draft) = self.mouse.release_left(&mut ctx.physics, at) {
                            if draft.start != draft.end {
                                self.add_wall(ctx, draft.start, draft.end);
                            }
                        }
                    }
                    MouseButton::Right => {
                        if let Some(wall) = self.mouse.release_right(&ctx.physics, at) {
                            self.walls.remove(&mut ctx.physics, wall);
                        }
                    }
                    MouseButton::Middle => {}
                }
            }
            InputEvent::JoystickConnected { joystick } => {
                if self.players.has_joystick(joystick) {
                    log::info!("game: joystick {} reconnected", joystick.0);
                } else {
                    self.add_player(ctx, Some(joystick));
                }
            }
            InputEvent::JoystickDisconnected { joystick } => {
                log::info!("game: joystick {} disconnected", joystick.0);
            }
            InputEvent::Custom { kind, a, .. } => match kind {
                CUSTOM_RESET => self.reset(ctx),
                CUSTOM_DEBUG_DRAW => self.debug_draw = !self.debug_draw,
                CUSTOM_CHASE_BANANA => self.chase_banana = a != 0.0,
                CUSTOM_RANDOM_BOMB => self.random_bomb = a != 0.0,
                CUSTOM_SAVE_LEVEL => match &self.level_path {
                    Some(path) => {
                        if let Err(e) = self.save_level(path) {
                            log::error!("game: {}", e);
                        }
                    }
                    None => log::warn!("game: no level file to save to"),
                },
                _ => log::debug!("game: ignoring custom event {}", kind),
            },
            InputEvent::KeyUp { .. } | InputEvent::PointerMove { .. } | InputEvent::JoystickAxis { .. } => {}
        }
    }

    /// While paused only Escape, joystick hot-plug and button releases get
    /// through. Releases let go of a grab; a wall draft is dropped.
    fn handle_paused_event(&mut self, ctx: &mut EngineContext, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } if key_code == keys::ESCAPE => self.toggle_pause(),
            InputEvent::JoystickConnected { .. } | InputEvent::JoystickDisconnected { .. } => {
                self.handle_event(ctx, event);
            }
            InputEvent::PointerUp { x, y, button } => {
                let at = Vec2::new(x, y);
                match button {
                    MouseButton::Left => {
                        if self.mouse.release_left(&mut ctx.physics, at).is_some() {
                            log::debug!("game: wall draft dropped while paused");
                        }
                    }
                    MouseButton::Right => {
                        self.mouse.release_right(&ctx.physics, at);
                    }
                    MouseButton::Middle => {}
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, ctx: &mut EngineContext, key_code: u32) {
        let cursor = ctx.input.mouse();
        match key_code {
            keys::E => {
                self.spawn_banana(ctx, cursor, Vec2::ZERO);
            }
            keys::Q => {
                self.spawn_bomb(ctx, cursor, Vec2::ZERO);
            }
            keys::ENTER => {
                self.add_player(ctx, None);
            }
            keys::ESCAPE => self.toggle_pause(),
            keys::F => self.fullscreen = !self.fullscreen,
            _ => {}
        }
    }

    /// Keep one banana (or bomb) in play while the matching mode is on.
    fn run_modes(&mut self, ctx: &mut EngineContext) {
        let world = ctx.world_size();
        if self.chase_banana && self.bananas.is_empty() {
            let (at, velocity) = self.random_throw(world);
            self.spawn_banana(ctx, at, velocity);
        }
        if self.random_bomb && self.bombs.is_empty() {
            let (at, velocity) = self.random_throw(world);
            self.spawn_bomb(ctx, at, velocity);
        }
    }

    fn random_throw(&mut self, world: Vec2) -> (Vec2, Vec2) {
        let rng = &mut self.rng;
        let at = Vec2::new(rng.range_f32(0.0, world.x), rng.range_f32(0.0, world.y));
        let velocity = Vec2::new(
            rng.range_f32(-THROW_SPEED, THROW_SPEED),
            rng.range_f32(-THROW_SPEED, THROW_SPEED),
        );
        (at, velocity)
    }
}

impl Game for FamGame {
    type Error = GameError;

    fn config(&self) -> GameConfig {
        self.config.game_config()
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), GameError> {
        self.config.validate()?;
        self.handlers = register_handlers(&self.config);
        let center = ctx.world_size() * 0.5;
        self.mouse.attach(&mut ctx.physics, center);

        let level = self.read_level()?;
        self.walls.load(ctx, &level)?;
        log::info!("game: started with {} walls", self.walls.len());
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for &event in input.iter() {
            if self.paused {
                self.handle_paused_event(ctx, event);
            } else {
                self.handle_event(ctx, event);
            }
        }
        if self.paused {
            return;
        }
        self.run_modes(ctx);

        let world = ctx.world_size();
        let dt = ctx.dt();
        let cursor = ctx.input.mouse();
        self.mouse.update(&mut ctx.physics, cursor);
        for id in self.bombs.update(&mut ctx.physics, world, dt) {
            log::debug!("game: {:?} burned out", id);
        }
        self.bananas.update(&mut ctx.physics, world);
        self.players.update(&mut ctx.physics, &ctx.input, world, dt);

        self.step_physics(ctx);
    }

    fn draw(&self, ctx: &EngineContext, renderer: &mut dyn Renderer, alpha: f32) {
        let physics = &ctx.physics;
        let world = ctx.world_size();
        renderer.draw_sprite(SpriteDraw {
            texture: BACKGROUND,
            position: world * 0.5,
            size: world,
            rotation: 0.0,
            tint: Vec3::ONE,
        });

        if self.debug_draw {
            debug_draw_world(physics, renderer, PrimitiveStyle::default());
        } else {
            self.walls.draw(renderer);
        }
        if let Some(draft) = self.mouse.draft() {
            self.walls.draw_draft(draft, renderer);
        }
        self.bananas.draw(physics, renderer, alpha);
        self.bombs.draw(physics, renderer, alpha);
        self.players.draw(physics, renderer, alpha);
    }
}

/// Log a full pool and carry on without the new entity.
fn rejected<T>(added: Result<T, PoolError>) -> Option<T> {
    match added {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("game: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banana::BANANA;
    use crate::player::FACE;
    use fam_engine::DrawList;

    fn game() -> (FamGame, EngineContext) {
        let mut game = FamGame::new(FamConfig::default()).with_seed(7);
        let mut ctx = EngineContext::new(&game.config());
        game.init(&mut ctx).unwrap();
        (game, ctx)
    }

    fn tick(game: &mut FamGame, ctx: &mut EngineContext, events: &[InputEvent]) {
        let mut queue = InputQueue::new();
        for &event in events {
            ctx.input.apply(&event);
            queue.push(event);
        }
        game.update(ctx, &queue);
    }

    fn key(key_code: u32) -> [InputEvent; 2] {
        [InputEvent::KeyDown { key_code }, InputEvent::KeyUp { key_code }]
    }

    #[test]
    fn keys_spawn_things() {
        let (mut game, mut ctx) = game();
        tick(&mut game, &mut ctx, &[InputEvent::PointerMove { x: 200.0, y: 200.0 }]);
        tick(&mut game, &mut ctx, &key(keys::E));
        tick(&mut game, &mut ctx, &key(keys::Q));
        tick(&mut game, &mut ctx, &key(keys::ENTER));

        assert_eq!(game.bananas().len(), 1);
        assert_eq!(game.bombs().len(), 1);
        assert_eq!(game.players().len(), 1);
        assert!(game.players().iter().all(|p| p.joystick.is_none()));
    }

    #[test]
    fn escape_pauses_everything() {
        let (mut game, mut ctx) = game();
        tick(&mut game, &mut ctx, &key(keys::ESCAPE));
        assert!(game.is_paused());

        tick(&mut game, &mut ctx, &key(keys::E));
        assert!(game.bananas().is_empty());

        tick(&mut game, &mut ctx, &key(keys::ESCAPE));
        assert!(!game.is_paused());
        tick(&mut game, &mut ctx, &key(keys::E));
        assert_eq!(game.bananas().len(), 1);
    }

    #[test]
    fn joystick_joins_while_paused() {
        let (mut game, mut ctx) = game();
        let stick = JoystickId(4);
        tick(&mut game, &mut ctx, &key(keys::ESCAPE));
        tick(&mut game, &mut ctx, &[InputEvent::JoystickConnected { joystick: stick }]);
        assert!(game.is_paused());
        assert!(game.players().has_joystick(stick));

        tick(&mut game, &mut ctx, &key(keys::ESCAPE));
        tick(&mut game, &mut ctx, &[]);
        assert_eq!(game.players().len(), 1);
    }

    #[test]
    fn release_while_paused_lets_go_of_grab() {
        let (mut game, mut ctx) = game();
        let left = MouseButton::Left;
        game.spawn_banana(&mut ctx, Vec2::new(300.0, 300.0), Vec2::ZERO).unwrap();
        tick(&mut game, &mut ctx, &[]);
        let joints = ctx.physics.joint_count();

        tick(&mut game, &mut ctx, &[InputEvent::PointerDown { x: 300.0, y: 300.0, button: left }]);
        assert!(game.mouse().grabbed().is_some());
        assert_eq!(ctx.physics.joint_count(), joints + 1);

        tick(&mut game, &mut ctx, &key(keys::ESCAPE));
        tick(&mut game, &mut ctx, &[InputEvent::PointerUp { x: 300.0, y: 300.0, button: left }]);
        assert!(game.mouse().grabbed().is_none());
        assert_eq!(ctx.physics.joint_count(), joints);
    }

    #[test]
    fn release_while_paused_drops_wall_draft() {
        let (mut game, mut ctx) = game();
        let left = MouseButton::Left;
        tick(&mut game, &mut ctx, &[InputEvent::PointerDown { x: 100.0, y: 900.0, button: left }]);
        tick(&mut game, &mut ctx, &key(keys::ESCAPE));
        tick(&mut game, &mut ctx, &[InputEvent::PointerUp { x: 500.0, y: 900.0, button: left }]);

        assert!(game.mouse().draft().is_none());
        assert!(game.walls().is_empty());
    }

    #[test]
    fn joystick_joins_once() {
        let (mut game, mut ctx) = game();
        let stick = JoystickId(2);
        tick(&mut game, &mut ctx, &[InputEvent::JoystickConnected { joystick: stick }]);
        tick(&mut game, &mut ctx, &[InputEvent::JoystickDisconnected { joystick: stick }]);
        tick(&mut game, &mut ctx, &[InputEvent::JoystickConnected { joystick: stick }]);
        assert_eq!(game.players().len(), 1);
        assert!(game.players().has_joystick(stick));
    }

    #[test]
    fn players_get_successive_colors() {
        let (mut game, mut ctx) = game();
        game.add_player(&mut ctx, None);
        game.add_player(&mut ctx, None);
        let mut expected = ColorCycle::new();
        let colors: Vec<Vec3> = game.players().iter().map(|p| p.color).collect();
        assert_eq!(colors, vec![expected.next_color(), expected.next_color()]);
    }

    #[test]
    fn drag_on_empty_space_draws_a_wall() {
        let (mut game, mut ctx) = game();
        let left = MouseButton::Left;
        tick(&mut game, &mut ctx, &[InputEvent::PointerDown { x: 100.0, y: 900.0, button: left }]);
        tick(&mut game, &mut ctx, &[InputEvent::PointerMove { x: 400.0, y: 900.0 }]);
        assert!(game.mouse().draft().is_some());
        tick(&mut game, &mut ctx, &[InputEvent::PointerUp { x: 500.0, y: 900.0, button: left }]);

        assert_eq!(game.walls().len(), 1);
        let wall = game.walls().iter().next().unwrap();
        assert_eq!((wall.a, wall.b), (Vec2::new(100.0, 900.0), Vec2::new(500.0, 900.0)));

        // One step later the wall is visible to queries and can be erased.
        let right = MouseButton::Right;
        tick(&mut game, &mut ctx, &[InputEvent::PointerDown { x: 300.0, y: 902.0, button: right }]);
        tick(&mut game, &mut ctx, &[InputEvent::PointerUp { x: 300.0, y: 902.0, button: right }]);
        assert!(game.walls().is_empty());
    }

    #[test]
    fn click_without_drag_adds_nothing() {
        let (mut game, mut ctx) = game();
        let left = MouseButton::Left;
        tick(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: 100.0, y: 100.0, button: left },
                InputEvent::PointerUp { x: 100.0, y: 100.0, button: left },
            ],
        );
        assert!(game.walls().is_empty());
    }

    #[test]
    fn chase_mode_keeps_one_banana() {
        let (mut game, mut ctx) = game();
        tick(&mut game, &mut ctx, &[InputEvent::Custom { kind: CUSTOM_CHASE_BANANA, a: 1.0, b: 0.0, c: 0.0 }]);
        assert!(game.is_chasing_banana());
        for _ in 0..5 {
            tick(&mut game, &mut ctx, &[]);
            assert_eq!(game.bananas().len(), 1);
        }

        let id = game.bananas().ids()[0];
        let body = game.bananas().get(id).unwrap().body.body_handle;
        let v = ctx.physics.velocity(body);
        assert!(v.x.abs() <= THROW_SPEED + 100.0 && v.y.abs() <= THROW_SPEED + 100.0);
    }

    #[test]
    fn bomb_mode_replaces_burned_out_bombs() {
        let (mut game, mut ctx) = game();
        game.set_random_bomb(true);
        tick(&mut game, &mut ctx, &[]);
        let first = game.bombs().ids();
        assert_eq!(first.len(), 1);

        // Past the bomb lifetime at 60 Hz.
        for _ in 0..400 {
            tick(&mut game, &mut ctx, &[]);
        }
        assert_eq!(game.bombs().len(), 1);
        assert_ne!(game.bombs().ids(), first);
    }

    #[test]
    fn stale_actions_are_skipped() {
        let (mut game, mut ctx) = game();
        let player = game.add_player(&mut ctx, None).unwrap();
        let banana = game.spawn_banana(&mut ctx, Vec2::new(100.0, 100.0), Vec2::ZERO).unwrap();

        let eaten = Action::BananaEaten { banana, player };
        game.apply_actions(&mut ctx.physics, vec![eaten, eaten]);

        let radius = game.players().get(player).unwrap().radius(&ctx.physics);
        assert!((radius - 27.5).abs() < 1e-4, "grew twice: {radius}");
        assert!(game.bananas().is_empty());
    }

    #[test]
    fn bomb_shrinks_player_only_while_exploding() {
        let (mut game, mut ctx) = game();
        let player = game.add_player(&mut ctx, None).unwrap();
        let banana = game.spawn_banana(&mut ctx, Vec2::new(100.0, 100.0), Vec2::ZERO).unwrap();
        game.apply_actions(&mut ctx.physics, vec![Action::BananaEaten { banana, player }]);

        let bomb = game.spawn_bomb(&mut ctx, Vec2::new(300.0, 100.0), Vec2::ZERO).unwrap();
        let hit = Action::BombHit { bomb, player };
        game.apply_actions(&mut ctx.physics, vec![hit]);
        let radius = |game: &FamGame, ctx: &EngineContext| game.players().get(player).unwrap().radius(&ctx.physics);
        assert!(radius(&game, &ctx) > 25.0, "unlit bomb does nothing");

        let world = ctx.world_size();
        game.bombs.update(&mut ctx.physics, world, 5.1);
        game.apply_actions(&mut ctx.physics, vec![hit]);
        assert_eq!(radius(&game, &ctx), 25.0);
    }

    #[test]
    fn draw_emits_every_sprite() {
        let (mut game, mut ctx) = game();
        game.add_player(&mut ctx, None);
        game.spawn_banana(&mut ctx, Vec2::new(100.0, 100.0), Vec2::ZERO);

        let mut list = DrawList::new();
        game.draw(&ctx, &mut list, 1.0);
        assert_eq!(list.sprite_count(BACKGROUND), 1);
        assert_eq!(list.sprite_count(FACE), 1);
        assert_eq!(list.sprite_count(BANANA), 1);
    }

    #[test]
    fn debug_draw_outlines_colliders() {
        let (mut game, mut ctx) = game();
        game.spawn_banana(&mut ctx, Vec2::new(100.0, 100.0), Vec2::ZERO);
        tick(&mut game, &mut ctx, &[InputEvent::Custom { kind: CUSTOM_DEBUG_DRAW, a: 0.0, b: 0.0, c: 0.0 }]);
        assert!(game.is_debug_draw());

        let mut list = DrawList::new();
        game.draw(&ctx, &mut list, 1.0);
        assert!(!list.primitives.is_empty());
    }
}
