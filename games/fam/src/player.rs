use fam_engine::input::keys;
use fam_engine::{
    moment_for_circle, BodyDesc, BodyType, ColliderDesc, ColliderMaterial, EngineContext, Entity,
    EntityId, InputState, JointDesc, JoystickId, PhysicsWorld, Pool, PoolError, Pooled, Renderer,
    RigidBodyHandle, Rng, ShapeTag, SpriteDraw, TextureId,
};
use glam::{Vec2, Vec3};

use crate::config::PlayerConfig;
use crate::kinds::{EntityKind, PLAYER_FILTER};

pub const FACE: TextureId = TextureId("face");

// Stick readings are rounded to this many steps per unit to kill drift.
const STICK_SENSITIVITY: f32 = 100.0;

/// A blob steered by a joystick, or by the keyboard when `joystick` is `None`.
#[derive(Debug, Clone)]
pub struct Player {
    pub entity: Entity,
    pub color: Vec3,
    pub joystick: Option<JoystickId>,
    /// Invisible kinematic body the player is dragged toward by two friction joints.
    control: RigidBodyHandle,
    command: Vec2,
}

impl Player {
    pub fn radius(&self, physics: &PhysicsWorld) -> f32 {
        physics
            .circle_radius(self.entity.body.collider_handle)
            .unwrap_or_default()
    }

    /// Velocity the control body was last given.
    pub fn command(&self) -> Vec2 {
        self.command
    }

    pub fn control_body(&self) -> RigidBodyHandle {
        self.control
    }

    fn despawn(&self, physics: &mut PhysicsWorld) {
        // Joints go with either body.
        physics.remove_rigid_body(self.control);
        self.entity.despawn(physics);
    }
}

impl Pooled for Player {
    fn id(&self) -> EntityId {
        self.entity.id
    }
}

/// What survives a reset for a joystick player: who they were and which stick is theirs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seat {
    pub id: EntityId,
    pub color: Vec3,
    pub joystick: JoystickId,
}

pub struct PlayerSystem {
    pool: Pool<Player>,
    config: PlayerConfig,
}

impl PlayerSystem {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            pool: Pool::with_capacity(EntityKind::Player.name(), config.capacity),
            config: config.clone(),
        }
    }

    pub fn add(
        &mut self,
        ctx: &mut EngineContext,
        position: Vec2,
        color: Vec3,
        joystick: Option<JoystickId>,
    ) -> Result<&mut Player, PoolError> {
        self.pool.ensure_room()?;
        let id = ctx.next_id();
        self.spawn(&mut ctx.physics, id, position, color, joystick)
    }

    /// Put a player from before a reset back into the new world.
    pub fn respawn(
        &mut self,
        physics: &mut PhysicsWorld,
        seat: Seat,
        position: Vec2,
    ) -> Result<&mut Player, PoolError> {
        self.pool.ensure_room()?;
        self.spawn(physics, seat.id, position, seat.color, Some(seat.joystick))
    }

    fn spawn(
        &mut self,
        physics: &mut PhysicsWorld,
        id: EntityId,
        position: Vec2,
        color: Vec3,
        joystick: Option<JoystickId>,
    ) -> Result<&mut Player, PoolError> {
        let cfg = &self.config;
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: cfg.radius })
            .with_position(position)
            .with_mass(cfg.mass, moment_for_circle(cfg.mass, cfg.radius, cfg.radius, Vec2::ZERO))
            .with_filter(PLAYER_FILTER);
        let material = ColliderMaterial {
            restitution: cfg.elasticity,
            friction: cfg.friction,
            ..ColliderMaterial::default()
        };
        let body = physics.create_body(
            ShapeTag::new(EntityKind::Player.collision_type(), id),
            &desc,
            material,
        );

        let control = physics.create_control_body(BodyType::KinematicVelocityBased, position);
        physics.create_joint(
            control,
            body.body_handle,
            &JointDesc::PivotFriction {
                max_force: cfg.pivot_max_force,
                stiffness: cfg.motor_stiffness,
            },
        );
        physics.create_joint(
            control,
            body.body_handle,
            &JointDesc::GearFriction {
                max_force: cfg.gear_max_force,
                stiffness: cfg.motor_stiffness,
            },
        );

        match joystick {
            Some(JoystickId(j)) => log::info!("player: {:?} joined on joystick {}", id, j),
            None => log::info!("player: {:?} joined on keyboard", id),
        }

        self.pool.insert(Player {
            entity: Entity::new(id, body),
            color,
            joystick,
            control,
            command: Vec2::ZERO,
        })
    }

    pub fn get(&self, id: EntityId) -> Option<&Player> {
        self.pool.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Player> {
        self.pool.get_mut(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.pool.contains(id)
    }

    /// Detach a player and its control rig. Returns false if it was already gone.
    pub fn remove(&mut self, physics: &mut PhysicsWorld, id: EntityId) -> bool {
        match self.pool.remove(id) {
            Some(player) => {
                player.despawn(physics);
                log::info!("player: {:?} left", id);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, physics: &mut PhysicsWorld) {
        for player in self.pool.drain() {
            player.despawn(physics);
        }
    }

    /// Remove everyone, handing back the seats of joystick players.
    /// Keyboard players are dropped for good.
    pub fn retire_all(&mut self, physics: &mut PhysicsWorld) -> Vec<Seat> {
        let mut seats = Vec::new();
        for player in self.pool.drain() {
            player.despawn(physics);
            match player.joystick {
                Some(joystick) => seats.push(Seat {
                    id: player.entity.id,
                    color: player.color,
                    joystick,
                }),
                None => log::info!("player: dropped keyboard player {:?}", player.entity.id),
            }
        }
        seats
    }

    /// Scatter point for a new player: the world center plus a little jitter.
    pub fn spawn_point(&self, world: Vec2, rng: &mut Rng) -> Vec2 {
        let jitter = self.config.spawn_jitter;
        world * 0.5 + Vec2::new(rng.range_f32(0.0, jitter), rng.range_f32(0.0, jitter))
    }

    pub fn update(&mut self, physics: &mut PhysicsWorld, input: &InputState, world: Vec2, dt: f32) {
        let speed = self.config.velocity * dt;
        for player in self.pool.iter_mut() {
            player.entity.begin_tick(physics, world);
            if let Some(command) = control_command(player.joystick, input, speed) {
                player.command = command;
            }
            physics.set_velocity(player.control, player.command);
        }
    }

    /// Grow a player after eating, up to the growth cap. Returns the new radius.
    pub fn grow(&mut self, physics: &mut PhysicsWorld, id: EntityId) -> Option<f32> {
        let player = self.pool.get(id)?;
        let cap = self.config.radius * self.config.max_growth;
        let radius = (player.radius(physics) * self.config.growth).min(cap);
        physics.set_circle_radius(player.entity.body.collider_handle, radius);
        Some(radius)
    }

    /// Shrink a player back to the starting size.
    pub fn reset_radius(&mut self, physics: &mut PhysicsWorld, id: EntityId) -> bool {
        match self.pool.get(id) {
            Some(player) => {
                physics.set_circle_radius(player.entity.body.collider_handle, self.config.radius);
                true
            }
            None => false,
        }
    }

    pub fn has_joystick(&self, joystick: JoystickId) -> bool {
        self.pool.iter().any(|p| p.joystick == Some(joystick))
    }

    pub fn draw(&self, physics: &PhysicsWorld, renderer: &mut dyn Renderer, alpha: f32) {
        for player in self.pool.iter() {
            renderer.draw_sprite(SpriteDraw {
                texture: FACE,
                position: player.entity.smooth_position(physics, alpha),
                size: player.entity.size(physics) * self.config.sprite_scale,
                rotation: player.entity.angle(physics),
                tint: player.color,
            });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.pool.iter()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.pool.ids()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn base_radius(&self) -> f32 {
        self.config.radius
    }
}

/// Control-body velocity for one tick, or `None` to keep the previous one
/// (a joystick that is unplugged or has not reported any axes yet).
pub fn control_command(joystick: Option<JoystickId>, input: &InputState, speed: f32) -> Option<Vec2> {
    match joystick {
        Some(joystick) => {
            let axes = input.joystick_axes(joystick)?;
            let axis = |i: usize| {
                let v = axes.get(i).copied().unwrap_or(0.0);
                (v * STICK_SENSITIVITY).round() / STICK_SENSITIVITY
            };
            if axes.is_empty() {
                return None;
            }
            Some(Vec2::new(axis(0), axis(1)) * speed)
        }
        None => {
            let held = |a, b| input.is_key_down(a) || input.is_key_down(b);
            let mut command = Vec2::ZERO;
            if held(keys::A, keys::LEFT) {
                command.x = -speed;
            }
            if held(keys::D, keys::RIGHT) {
                command.x = speed;
            }
            if held(keys::W, keys::UP) {
                command.y = -speed;
            }
            if held(keys::S, keys::DOWN) {
                command.y = speed;
            }
            Some(command)
        }
    }
}
