use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::types::ShapeTag;
use crate::core::collision::{CollisionHandlers, ContactResponse, PostStep};

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn vec2_to_point(v: Vec2) -> nalgebra::Point2<f32> {
    nalgebra::Point2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn point_to_vec2(p: &nalgebra::Point2<f32>) -> Vec2 {
    Vec2::new(p.x, p.y)
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    KinematicPositionBased,
    KinematicVelocityBased,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::KinematicPositionBased => RigidBodyType::KinematicPositionBased,
            BodyType::KinematicVelocityBased => RigidBodyType::KinematicVelocityBased,
        }
    }
}

/// Shape description for a collider, in the collider's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    /// A segment between two points, thickened by `radius` (a capsule).
    Segment { a: Vec2, b: Vec2, radius: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Segment { a, b, radius } => {
                ColliderBuilder::capsule_from_endpoints(vec2_to_point(a), vec2_to_point(b), radius)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    /// Bounciness, 0 = none, 1 = perfectly elastic.
    pub restitution: f32,
    pub friction: f32,
    /// Used only when the body has no explicit mass (see [`BodyDesc::with_mass`]).
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Collision filter. Two shapes interact only if each one's `categories`
/// overlaps the other's `mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    pub categories: u32,
    pub mask: u32,
}

impl CollisionFilter {
    pub const ALL: CollisionFilter = CollisionFilter {
        categories: u32::MAX,
        mask: u32::MAX,
    };

    pub const fn new(categories: u32, mask: u32) -> Self {
        Self { categories, mask }
    }

    /// Whether shapes with these two filters may touch.
    pub fn interacts_with(&self, other: &CollisionFilter) -> bool {
        self.categories & other.mask != 0 && other.categories & self.mask != 0
    }

    fn to_rapier(self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(self.categories),
            Group::from_bits_truncate(self.mask),
        )
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::ALL
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub velocity: Vec2,
    pub collider: ColliderDesc,
    /// Offset of the collider from the body origin.
    pub collider_offset: Vec2,
    /// Explicit `(mass, moment of inertia)` about the body origin, which stays
    /// the center of mass. Kept fixed when the shape is resized.
    pub mass: Option<(f32, f32)>,
    pub filter: CollisionFilter,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            collider,
            collider_offset: Vec2::ZERO,
            mass: None,
            filter: CollisionFilter::ALL,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_collider_offset(mut self, offset: Vec2) -> Self {
        self.collider_offset = offset;
        self
    }

    /// Pin mass and moment of inertia instead of deriving them from density.
    pub fn with_mass(mut self, mass: f32, moment: f32) -> Self {
        self.mass = Some((mass, moment));
        self
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Moment of inertia of a ring with the given inner and outer radii, whose
/// center sits `offset` from the body origin. `inner = 0` gives a solid disc.
pub fn moment_for_circle(mass: f32, inner: f32, outer: f32, offset: Vec2) -> f32 {
    mass * (0.5 * (inner * inner + outer * outer) + offset.length_squared())
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Handle to a joint in the physics simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointHandle(pub(crate) ImpulseJointHandle);

/// Description of a joint to create between two bodies.
///
/// All of these are motors with bounded force rather than hard constraints,
/// so the driven body can still be blocked by walls.
#[derive(Debug, Clone, Copy)]
pub enum JointDesc {
    /// Drags B's linear velocity toward A's, like a pivot with no error correction.
    PivotFriction { max_force: f32, stiffness: f32 },
    /// Drags B's angular velocity toward A's.
    GearFriction { max_force: f32, stiffness: f32 },
    /// Pulls B's local point `anchor_b` onto A's origin.
    Grab {
        anchor_b: Vec2,
        max_force: f32,
        stiffness: f32,
        damping: f32,
    },
}

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn translated(&self, delta: Vec2) -> BoundingBox {
        BoundingBox {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Result of a nearest-shape point query.
#[derive(Debug, Clone, Copy)]
pub struct PointQueryHit {
    pub collider: ColliderHandle,
    pub body: Option<RigidBodyHandle>,
    pub tag: Option<ShapeTag>,
    /// Closest point on the shape's surface (or the query point if inside).
    pub point: Vec2,
    /// Zero when the query point is inside the shape.
    pub distance: f32,
}

/// Snapshot of one collider, for drawing.
#[derive(Debug, Clone, Copy)]
pub struct ColliderView {
    pub handle: ColliderHandle,
    pub tag: Option<ShapeTag>,
    pub shape: ColliderDesc,
    pub position: Vec2,
    pub rotation: f32,
}

// ---------------------------------------------------------------------------
// Pre-solve hook adapter
// ---------------------------------------------------------------------------

// Stored in the manifold's user data after `IgnoreUntilSeparated`; the pair
// stays ignored until the shapes stop touching.
const IGNORED_MANIFOLD: u32 = 1;

struct PreSolveHooks<'a, A> {
    handlers: &'a CollisionHandlers<A>,
    queue: &'a PostStep<A>,
}

impl<A: Send> PhysicsHooks for PreSolveHooks<'_, A> {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        if context.solver_contacts.is_empty() {
            *context.user_data = 0;
            return;
        }
        if *context.user_data == IGNORED_MANIFOLD {
            context.solver_contacts.clear();
            return;
        }

        let tag = |handle| {
            context
                .colliders
                .get(handle)
                .and_then(|c| ShapeTag::unpack(c.user_data))
        };
        let (Some(a), Some(b)) = (tag(context.collider1), tag(context.collider2)) else {
            return;
        };

        let normal = na_to_vec2(context.normal);
        match self.handlers.pre_solve(a, b, normal, self.queue) {
            ContactResponse::Accept => {}
            ContactResponse::Ignore => context.solver_contacts.clear(),
            ContactResponse::IgnoreUntilSeparated => {
                *context.user_data = IGNORED_MANIFOLD;
                context.solver_contacts.clear();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single, easy-to-use struct.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    /// Shared fixed body that all static shapes hang off.
    static_body: RigidBodyHandle,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Y points down, so positive Y gravity pulls things toward the bottom of the screen.
    pub fn new(gravity: Vec2) -> Self {
        let mut bodies = RigidBodySet::new();
        let static_body = bodies.insert(RigidBodyBuilder::fixed().build());
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            static_body,
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    pub fn gravity(&self) -> Vec2 {
        na_to_vec2(&self.gravity)
    }

    /// Create a rigid body + collider and return handles.
    /// The tag is stored in the collider's `user_data` for collision dispatch.
    pub fn create_body(&mut self, tag: ShapeTag, desc: &BodyDesc, material: ColliderMaterial) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .linvel(vec2_to_na(desc.velocity))
            .user_data(tag.pack())
            .build();

        let body_handle = self.bodies.insert(rb);

        let mut builder = self
            .collider_builder(tag, &desc.collider, material, desc.filter)
            .translation(vec2_to_na(desc.collider_offset));
        builder = match desc.mass {
            // Collider-local frame: the body origin sits at minus the offset.
            Some((mass, moment)) => builder.mass_properties(MassProperties::new(
                vec2_to_point(-desc.collider_offset),
                mass,
                moment,
            )),
            None => builder.density(material.density),
        };

        let collider_handle =
            self.colliders
                .insert_with_parent(builder.build(), body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Attach a shape to the shared static body. Used for level geometry.
    pub fn attach_static(
        &mut self,
        tag: ShapeTag,
        shape: &ColliderDesc,
        material: ColliderMaterial,
        filter: CollisionFilter,
    ) -> ColliderHandle {
        let collider = self.collider_builder(tag, shape, material, filter).build();
        self.colliders
            .insert_with_parent(collider, self.static_body, &mut self.bodies)
    }

    /// Create a collider-less body, e.g. an invisible control body driven by
    /// velocity that other bodies are joined to.
    pub fn create_control_body(&mut self, body_type: BodyType, position: Vec2) -> RigidBodyHandle {
        let rb = RigidBodyBuilder::new(body_type.to_rapier())
            .translation(vec2_to_na(position))
            .build();
        self.bodies.insert(rb)
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.remove_rigid_body(body.body_handle);
    }

    /// Remove a body by handle, together with its colliders and joints.
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Remove a single collider, leaving its parent body alone.
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.colliders
            .remove(handle, &mut self.island_manager, &mut self.bodies, true);
    }

    pub fn contains_body(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn contains_collider(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains(handle)
    }

    /// Advance one tick.
    ///
    /// Every touching tagged pair goes through `handlers` before the solver
    /// sees it. Actions the handlers queued come back in the order they were
    /// pushed, for the caller to apply now that the world is no longer locked.
    #[must_use = "queued collision actions are lost if not applied"]
    pub fn step<A: Send>(&mut self, handlers: &CollisionHandlers<A>) -> Vec<A> {
        let queue = PostStep::new();
        let hooks = PreSolveHooks {
            handlers,
            queue: &queue,
        };

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &hooks,
            &(),
        );

        queue.into_actions()
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, handle: RigidBodyHandle, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, handle: RigidBodyHandle) -> Vec2 {
        self.bodies
            .get(handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Move a body instantly, keeping its velocity.
    pub fn set_position(&mut self, handle: RigidBodyHandle, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_translation(vec2_to_na(pos), true);
        }
    }

    /// Set the target position for a kinematic body; velocity is inferred.
    pub fn set_kinematic_position(&mut self, handle: RigidBodyHandle, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_next_kinematic_translation(vec2_to_na(pos));
        }
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, handle: RigidBodyHandle) -> (Vec2, f32) {
        self.bodies
            .get(handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Whether the body responds to forces (finite mass).
    pub fn is_dynamic(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.get(handle).is_some_and(|rb| rb.is_dynamic())
    }

    pub fn body_mass(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(|rb| rb.mass())
    }

    /// Transform a world point into a body's local frame.
    pub fn world_to_local(&self, handle: RigidBodyHandle, point: Vec2) -> Option<Vec2> {
        let rb = self.bodies.get(handle)?;
        let local = rb.position().inverse_transform_point(&vec2_to_point(point));
        Some(point_to_vec2(&local))
    }

    /// Number of rigid bodies in the simulation, including the shared static body.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Query the shape of a collider.
    /// Returns `None` if the collider no longer exists or has an unsupported shape.
    pub fn collider_shape(&self, handle: ColliderHandle) -> Option<ColliderDesc> {
        let collider = self.colliders.get(handle)?;
        let shape = collider.shape();
        if let Some(ball) = shape.as_ball() {
            Some(ColliderDesc::Ball { radius: ball.radius })
        } else if let Some(capsule) = shape.as_capsule() {
            Some(ColliderDesc::Segment {
                a: point_to_vec2(&capsule.segment.a),
                b: point_to_vec2(&capsule.segment.b),
                radius: capsule.radius,
            })
        } else {
            None
        }
    }

    pub fn collider_tag(&self, handle: ColliderHandle) -> Option<ShapeTag> {
        self.colliders
            .get(handle)
            .and_then(|c| ShapeTag::unpack(c.user_data))
    }

    /// Radius of a ball collider.
    pub fn circle_radius(&self, handle: ColliderHandle) -> Option<f32> {
        self.colliders
            .get(handle)?
            .shape()
            .as_ball()
            .map(|ball| ball.radius)
    }

    /// Resize a ball collider. Mass properties set at creation are kept.
    pub fn set_circle_radius(&mut self, handle: ColliderHandle, radius: f32) {
        if let Some(collider) = self.colliders.get_mut(handle) {
            if collider.shape().as_ball().is_some() {
                collider.set_shape(SharedShape::ball(radius));
            }
        }
    }

    /// World-space bounds of a collider, using its parent body's current pose.
    pub fn collider_bounds(&self, handle: ColliderHandle) -> Option<BoundingBox> {
        let collider = self.colliders.get(handle)?;
        let aabb = collider.shape().compute_aabb(&self.collider_pose(collider));
        Some(BoundingBox {
            min: point_to_vec2(&aabb.mins),
            max: point_to_vec2(&aabb.maxs),
        })
    }

    /// Nearest shape to `point` within `max_distance`, among shapes the
    /// filter lets through. Sees the world as of the last step.
    pub fn point_query_nearest(
        &self,
        point: Vec2,
        max_distance: f32,
        filter: CollisionFilter,
    ) -> Option<PointQueryHit> {
        let query = vec2_to_point(point);
        let (handle, projection) = self.query_pipeline.project_point(
            &self.bodies,
            &self.colliders,
            &query,
            true,
            QueryFilter::default().groups(filter.to_rapier()),
        )?;
        let surface = point_to_vec2(&projection.point);
        let distance = if projection.is_inside {
            0.0
        } else {
            surface.distance(point)
        };
        if distance > max_distance {
            return None;
        }
        let collider = self.colliders.get(handle)?;
        Some(PointQueryHit {
            collider: handle,
            body: collider.parent(),
            tag: ShapeTag::unpack(collider.user_data),
            point: surface,
            distance,
        })
    }

    /// Every collider with its shape and world pose.
    pub fn colliders(&self) -> impl Iterator<Item = ColliderView> + '_ {
        self.colliders.iter().filter_map(move |(handle, collider)| {
            let shape = self.collider_shape(handle)?;
            let (position, rotation) = na_iso_to_pos_rot(&self.collider_pose(collider));
            Some(ColliderView {
                handle,
                tag: ShapeTag::unpack(collider.user_data),
                shape,
                position,
                rotation,
            })
        })
    }

    // -- Joint methods --

    /// Create a joint between two bodies. Returns a handle for later removal.
    pub fn create_joint(
        &mut self,
        body_a: RigidBodyHandle,
        body_b: RigidBodyHandle,
        desc: &JointDesc,
    ) -> JointHandle {
        let joint = match *desc {
            JointDesc::PivotFriction { max_force, stiffness } => {
                GenericJointBuilder::new(JointAxesMask::empty())
                    .motor_velocity(JointAxis::LinX, 0.0, stiffness)
                    .motor_velocity(JointAxis::LinY, 0.0, stiffness)
                    .motor_max_force(JointAxis::LinX, max_force)
                    .motor_max_force(JointAxis::LinY, max_force)
                    .build()
            }
            JointDesc::GearFriction { max_force, stiffness } => {
                GenericJointBuilder::new(JointAxesMask::empty())
                    .motor_velocity(JointAxis::AngX, 0.0, stiffness)
                    .motor_max_force(JointAxis::AngX, max_force)
                    .build()
            }
            JointDesc::Grab { anchor_b, max_force, stiffness, damping } => {
                GenericJointBuilder::new(JointAxesMask::empty())
                    .local_anchor2(vec2_to_point(anchor_b))
                    .motor_position(JointAxis::LinX, 0.0, stiffness, damping)
                    .motor_position(JointAxis::LinY, 0.0, stiffness, damping)
                    .motor_max_force(JointAxis::LinX, max_force)
                    .motor_max_force(JointAxis::LinY, max_force)
                    .build()
            }
        };
        JointHandle(self.impulse_joints.insert(body_a, body_b, joint, true))
    }

    /// Remove a joint from the simulation.
    pub fn remove_joint(&mut self, handle: JointHandle) {
        self.impulse_joints.remove(handle.0, true);
    }

    /// Number of joints in the simulation.
    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    // -- private helpers --

    fn collider_builder(
        &self,
        tag: ShapeTag,
        shape: &ColliderDesc,
        material: ColliderMaterial,
        filter: CollisionFilter,
    ) -> ColliderBuilder {
        shape
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .collision_groups(filter.to_rapier())
            .active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS)
            .user_data(tag.pack())
    }

    // Colliders only sync with their parent during a step, so derive the
    // pose from the body to see teleports immediately.
    fn collider_pose(&self, collider: &Collider) -> nalgebra::Isometry2<f32> {
        match (
            collider.parent().and_then(|h| self.bodies.get(h)),
            collider.position_wrt_parent(),
        ) {
            (Some(rb), Some(local)) => rb.position() * local,
            _ => *collider.position(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{CollisionType, EntityId};

    const BALL: CollisionType = CollisionType(1);
    const FLOOR: CollisionType = CollisionType(2);

    fn tag(kind: CollisionType, id: u32) -> ShapeTag {
        ShapeTag::new(kind, EntityId(id))
    }

    fn ball(world: &mut PhysicsWorld, id: u32, pos: Vec2, radius: f32) -> PhysicsBody {
        world.create_body(
            tag(BALL, id),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius }).with_position(pos),
            ColliderMaterial::default(),
        )
    }

    fn run(world: &mut PhysicsWorld, handlers: &CollisionHandlers<u32>, ticks: usize) -> Vec<u32> {
        let mut all = Vec::new();
        for _ in 0..ticks {
            all.extend(world.step(handlers));
        }
        all
    }

    #[test]
    fn create_and_remove_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let base = world.body_count();
        let body = ball(&mut world, 1, Vec2::ZERO, 10.0);
        assert_eq!(world.body_count(), base + 1);
        world.remove_body(&body);
        assert_eq!(world.body_count(), base);
        assert!(!world.contains_collider(body.collider_handle));
    }

    #[test]
    fn gravity_affects_dynamic_body() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 100.0));
        world.set_dt(1.0 / 60.0);
        let body = ball(&mut world, 1, Vec2::ZERO, 5.0);

        let (initial_pos, _) = world.body_position(body.body_handle);
        run(&mut world, &CollisionHandlers::new(), 10);
        let (new_pos, _) = world.body_position(body.body_handle);

        assert!(
            new_pos.y > initial_pos.y,
            "Body should fall: start={}, end={}",
            initial_pos.y,
            new_pos.y
        );
    }

    #[test]
    fn set_velocity_directly() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO, 5.0);

        world.set_velocity(body.body_handle, Vec2::new(50.0, -30.0));
        let vel = world.velocity(body.body_handle);
        assert!((vel.x - 50.0).abs() < 0.001);
        assert!((vel.y - (-30.0)).abs() < 0.001);
    }

    #[test]
    fn explicit_mass_survives_resize() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            tag(BALL, 1),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 25.0 })
                .with_mass(1.0, moment_for_circle(1.0, 25.0, 25.0, Vec2::ZERO)),
            ColliderMaterial::default(),
        );
        assert!((world.body_mass(body.body_handle).unwrap() - 1.0).abs() < 1e-4);

        world.set_circle_radius(body.collider_handle, 100.0);
        run(&mut world, &CollisionHandlers::new(), 1);
        assert_eq!(world.circle_radius(body.collider_handle), Some(100.0));
        assert!((world.body_mass(body.body_handle).unwrap() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn collider_offset_moves_bounds() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            tag(BALL, 1),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 20.0 })
                .with_position(Vec2::new(100.0, 100.0))
                .with_collider_offset(Vec2::new(-20.0, 20.0))
                .with_mass(1.0, moment_for_circle(1.0, 20.0, 20.0, Vec2::new(-20.0, 20.0))),
            ColliderMaterial::default(),
        );
        let bounds = world.collider_bounds(body.collider_handle).unwrap();
        assert!((bounds.center() - Vec2::new(80.0, 120.0)).length() < 1e-3, "{:?}", bounds);
        assert!((bounds.size() - Vec2::splat(40.0)).length() < 1e-3);
    }

    #[test]
    fn offset_collider_keeps_mass_center_at_origin() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            tag(BALL, 1),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 20.0 })
                .with_position(Vec2::new(100.0, 100.0))
                .with_collider_offset(Vec2::new(-20.0, 20.0))
                .with_mass(1.0, moment_for_circle(1.0, 20.0, 20.0, Vec2::ZERO)),
            ColliderMaterial::default(),
        );
        run(&mut world, &CollisionHandlers::new(), 1);

        let rb = &world.bodies[body.body_handle];
        let com = rb.mass_properties().local_mprops.local_com;
        assert!(point_to_vec2(&com).length() < 1e-4, "{:?}", com);
        assert!((world.body_mass(body.body_handle).unwrap() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn teleport_is_visible_before_next_step() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO, 10.0);
        world.set_position(body.body_handle, Vec2::new(500.0, 0.0));
        let bounds = world.collider_bounds(body.collider_handle).unwrap();
        assert!((bounds.min.x - 490.0).abs() < 1e-3, "{:?}", bounds);
    }

    #[test]
    fn static_segments_share_one_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let bodies = world.body_count();
        let segment = ColliderDesc::Segment {
            a: Vec2::new(0.0, 100.0),
            b: Vec2::new(200.0, 100.0),
            radius: 10.0,
        };
        let first = world.attach_static(tag(FLOOR, 1), &segment, ColliderMaterial::default(), CollisionFilter::ALL);
        let second = world.attach_static(tag(FLOOR, 2), &segment, ColliderMaterial::default(), CollisionFilter::ALL);
        assert_eq!(world.body_count(), bodies);
        assert_eq!(world.collider_shape(first), Some(segment));
        assert_eq!(world.collider_tag(second), Some(tag(FLOOR, 2)));

        world.remove_collider(first);
        assert!(!world.contains_collider(first));
        assert!(world.contains_collider(second));
    }

    #[test]
    fn handlers_see_tagged_contacts() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 600.0));
        world.set_dt(1.0 / 60.0);
        ball(&mut world, 7, Vec2::new(100.0, 50.0), 10.0);
        world.attach_static(
            tag(FLOOR, 1),
            &ColliderDesc::Segment {
                a: Vec2::new(0.0, 100.0),
                b: Vec2::new(200.0, 100.0),
                radius: 5.0,
            },
            ColliderMaterial::default(),
            CollisionFilter::ALL,
        );

        let mut handlers = CollisionHandlers::new();
        handlers.on_pre_solve(BALL, FLOOR, |arb, queue| {
            queue.push(arb.a.id.0);
            ContactResponse::Accept
        });

        let hits = run(&mut world, &handlers, 60);
        assert!(!hits.is_empty(), "ball should land on the floor");
        assert!(hits.iter().all(|&id| id == 7));
    }

    #[test]
    fn ignored_contact_lets_bodies_pass() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 600.0));
        world.set_dt(1.0 / 60.0);
        let falling = ball(&mut world, 1, Vec2::new(100.0, 50.0), 10.0);
        world.attach_static(
            tag(FLOOR, 1),
            &ColliderDesc::Segment {
                a: Vec2::new(0.0, 100.0),
                b: Vec2::new(200.0, 100.0),
                radius: 5.0,
            },
            ColliderMaterial::default(),
            CollisionFilter::ALL,
        );

        let mut handlers = CollisionHandlers::new();
        handlers.on_wildcard_pre_solve(FLOOR, |_, _| ContactResponse::Ignore);

        run(&mut world, &handlers, 60);
        let (pos, _) = world.body_position(falling.body_handle);
        assert!(pos.y > 150.0, "ball should fall through: y={}", pos.y);
    }

    #[test]
    fn plain_ignore_asks_again_every_step() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let count_calls = |response: ContactResponse| {
            let mut world = PhysicsWorld::new(Vec2::new(0.0, 600.0));
            world.set_dt(1.0 / 60.0);
            ball(&mut world, 1, Vec2::new(100.0, 50.0), 10.0);
            world.attach_static(
                tag(FLOOR, 1),
                &ColliderDesc::Segment {
                    a: Vec2::new(0.0, 100.0),
                    b: Vec2::new(200.0, 100.0),
                    radius: 5.0,
                },
                ColliderMaterial::default(),
                CollisionFilter::ALL,
            );
            let calls = Arc::new(AtomicUsize::new(0));
            let seen = Arc::clone(&calls);
            let mut handlers: CollisionHandlers<u32> = CollisionHandlers::new();
            handlers.on_wildcard_pre_solve(FLOOR, move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
                response
            });
            run(&mut world, &handlers, 60);
            calls.load(Ordering::SeqCst)
        };

        let plain = count_calls(ContactResponse::Ignore);
        let sticky = count_calls(ContactResponse::IgnoreUntilSeparated);
        assert!(plain > 1, "plain ignore asked {plain} times");
        assert!(sticky < plain, "sticky {sticky} vs plain {plain}");
    }

    #[test]
    fn moment_matches_ring_formula() {
        assert_eq!(moment_for_circle(2.0, 0.0, 10.0, Vec2::ZERO), 100.0);
        assert_eq!(moment_for_circle(1.0, 25.0, 25.0, Vec2::ZERO), 625.0);
        assert_eq!(moment_for_circle(1.0, 0.0, 0.0, Vec2::new(3.0, 4.0)), 25.0);
    }

    #[test]
    fn filters_block_contacts() {
        let a = CollisionFilter::new(1 << 30, 1 << 30);
        let b = CollisionFilter::new(!(1 << 30), !(1 << 30));
        assert!(a.interacts_with(&CollisionFilter::ALL));
        assert!(!a.interacts_with(&b));
        assert!(a.interacts_with(&a));
    }

    #[test]
    fn point_query_finds_nearest() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let near = ball(&mut world, 1, Vec2::new(0.0, 0.0), 10.0);
        ball(&mut world, 2, Vec2::new(100.0, 0.0), 10.0);
        run(&mut world, &CollisionHandlers::new(), 1);

        let hit = world
            .point_query_nearest(Vec2::new(13.0, 0.0), 5.0, CollisionFilter::ALL)
            .expect("ball within reach");
        assert_eq!(hit.collider, near.collider_handle);
        assert_eq!(hit.tag, Some(tag(BALL, 1)));
        assert!((hit.distance - 3.0).abs() < 0.01, "distance {}", hit.distance);

        assert!(world
            .point_query_nearest(Vec2::new(50.0, 0.0), 5.0, CollisionFilter::ALL)
            .is_none());
    }

    #[test]
    fn create_and_remove_joint() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let control = world.create_control_body(BodyType::KinematicVelocityBased, Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO, 5.0);

        assert_eq!(world.joint_count(), 0);
        let handle = world.create_joint(
            control,
            body.body_handle,
            &JointDesc::PivotFriction { max_force: 10_000.0, stiffness: 1.0 },
        );
        assert_eq!(world.joint_count(), 1);
        world.remove_joint(handle);
        assert_eq!(world.joint_count(), 0);
    }

    #[test]
    fn pivot_friction_drags_body_along() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        let control = world.create_control_body(BodyType::KinematicVelocityBased, Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO, 5.0);
        world.create_joint(
            control,
            body.body_handle,
            &JointDesc::PivotFriction { max_force: 10_000.0, stiffness: 1.0 },
        );

        world.set_velocity(control, Vec2::new(200.0, 0.0));
        run(&mut world, &CollisionHandlers::new(), 30);

        let vel = world.velocity(body.body_handle);
        assert!(vel.x > 50.0, "body should follow the control body: {:?}", vel);
    }

    #[test]
    fn removing_body_drops_its_joints() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let control = world.create_control_body(BodyType::KinematicVelocityBased, Vec2::ZERO);
        let body = ball(&mut world, 1, Vec2::ZERO, 5.0);
        world.create_joint(
            control,
            body.body_handle,
            &JointDesc::GearFriction { max_force: 50_000.0, stiffness: 1.0 },
        );
        world.remove_body(&body);
        assert_eq!(world.joint_count(), 0);
        assert!(world.contains_body(control));
    }

    #[test]
    fn collider_views_report_world_pose() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        ball(&mut world, 1, Vec2::new(30.0, 40.0), 5.0);
        let views: Vec<_> = world.colliders().collect();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].shape, ColliderDesc::Ball { radius: 5.0 });
        assert!((views[0].position - Vec2::new(30.0, 40.0)).length() < 1e-4);
    }
}
