use fam_engine::{
    BodyType, EntityId, JointDesc, JointHandle, PhysicsWorld, RigidBodyHandle, ShapeTag,
};
use glam::Vec2;

use crate::config::MouseConfig;
use crate::kinds::{EntityKind, NOT_GRABBABLE_FILTER};
use crate::wall::WallDraft;

#[derive(Debug, Clone, Copy)]
struct Grab {
    joint: JointHandle,
    body: RigidBodyHandle,
}

/// What a left press turned into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeftPress {
    /// Picked up the body that owns this shape.
    Grabbed(Option<ShapeTag>),
    /// Nothing movable under the cursor: started drawing a wall.
    Drafting,
    /// No mouse body in the world yet.
    Detached,
}

/// Cursor-side state: a kinematic body trailing the cursor that grabbed
/// bodies are pinned to, plus the wall-editing gestures.
pub struct Mouse {
    config: MouseConfig,
    body: Option<RigidBodyHandle>,
    grab: Option<Grab>,
    draft: Option<WallDraft>,
    right_down: Option<Vec2>,
}

impl Mouse {
    pub fn new(config: &MouseConfig) -> Self {
        Self {
            config: config.clone(),
            body: None,
            grab: None,
            draft: None,
            right_down: None,
        }
    }

    /// Create the mouse body in a (fresh) world. Any gesture in progress is dropped.
    pub fn attach(&mut self, physics: &mut PhysicsWorld, at: Vec2) {
        self.body = Some(physics.create_control_body(BodyType::KinematicPositionBased, at));
        self.grab = None;
        self.draft = None;
        self.right_down = None;
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        self.body.map(|body| physics.body_position(body).0)
    }

    /// Trail the cursor and stretch the wall draft to it. Once per tick.
    pub fn update(&mut self, physics: &mut PhysicsWorld, cursor: Vec2) {
        if let Some(grab) = self.grab {
            if !physics.contains_body(grab.body) {
                self.grab = None;
            }
        }
        if let Some(body) = self.body {
            let (current, _) = physics.body_position(body);
            physics.set_kinematic_position(body, current.lerp(cursor, self.config.follow));
        }
        if let Some(draft) = &mut self.draft {
            draft.end = cursor;
        }
    }

    pub fn press_left(&mut self, physics: &mut PhysicsWorld, at: Vec2) -> LeftPress {
        let Some(mouse_body) = self.body else {
            return LeftPress::Detached;
        };
        let hit = physics
            .point_query_nearest(at, self.config.click_radius, NOT_GRABBABLE_FILTER)
            .and_then(|hit| Some((hit, hit.body?)))
            .filter(|(_, body)| physics.is_dynamic(*body));

        if let Some((hit, body)) = hit {
            let nearest = if hit.distance > 0.0 { hit.point } else { at };
            if let Some(anchor_b) = physics.world_to_local(body, nearest) {
                self.release_grab(physics);
                let joint = physics.create_joint(
                    mouse_body,
                    body,
                    &JointDesc::Grab {
                        anchor_b,
                        max_force: self.config.grab_max_force,
                        stiffness: self.config.grab_stiffness,
                        damping: self.config.grab_damping,
                    },
                );
                self.grab = Some(Grab { joint, body });
                return LeftPress::Grabbed(hit.tag);
            }
        }

        self.draft = Some(WallDraft::new(at));
        LeftPress::Drafting
    }

    /// Let go of whatever the left button was doing. Returns the finished
    /// wall draft, ending at `at`, if there was one.
    pub fn release_left(&mut self, physics: &mut PhysicsWorld, at: Vec2) -> Option<WallDraft> {
        if self.release_grab(physics) {
            return None;
        }
        self.draft.take().map(|draft| WallDraft { end: at, ..draft })
    }

    pub fn press_right(&mut self, at: Vec2) {
        self.right_down = Some(at);
    }

    /// Returns the wall under the cursor, for erasing.
    pub fn release_right(&mut self, physics: &PhysicsWorld, at: Vec2) -> Option<EntityId> {
        self.right_down = None;
        let hit = physics.point_query_nearest(at, self.config.click_radius, NOT_GRABBABLE_FILTER)?;
        let tag = hit.tag?;
        (EntityKind::of(tag) == Some(EntityKind::Wall)).then_some(tag.id)
    }

    /// Drop the grab if it holds `body`. Call before removing a body.
    pub fn release_body(&mut self, physics: &mut PhysicsWorld, body: RigidBodyHandle) {
        if self.grab.is_some_and(|grab| grab.body == body) {
            self.release_grab(physics);
        }
    }

    fn release_grab(&mut self, physics: &mut PhysicsWorld) -> bool {
        match self.grab.take() {
            Some(grab) => {
                physics.remove_joint(grab.joint);
                true
            }
            None => false,
        }
    }

    pub fn grabbed(&self) -> Option<RigidBodyHandle> {
        self.grab.map(|grab| grab.body)
    }

    pub fn draft(&self) -> Option<&WallDraft> {
        self.draft.as_ref()
    }

    pub fn is_right_down(&self) -> bool {
        self.right_down.is_some()
    }
}
