//! Pre-solve collision dispatch and the post-step queue.
//!
//! Handlers run inside [`PhysicsWorld::step`](crate::core::physics::PhysicsWorld::step)
//! while rapier is mid-step. They only ever see an [`Arbiter`] and a
//! [`PostStep`] queue: anything structural (removing bodies, resizing shapes)
//! is pushed as a plain action and applied by the game once `step` returns.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Mutex;

use glam::Vec2;

use crate::api::types::{CollisionType, ShapeTag};

/// What the solver should do with a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResponse {
    /// Resolve the contact normally (shapes push apart).
    Accept,
    /// Drop the contact for this step. Handlers run again next step.
    Ignore,
    /// Drop the contact and stop asking until the two shapes separate.
    IgnoreUntilSeparated,
}

impl ContactResponse {
    pub fn is_ignored(self) -> bool {
        self != ContactResponse::Accept
    }

    fn and(self, other: ContactResponse) -> ContactResponse {
        use ContactResponse::*;
        match (self, other) {
            (IgnoreUntilSeparated, _) | (_, IgnoreUntilSeparated) => IgnoreUntilSeparated,
            (Ignore, _) | (_, Ignore) => Ignore,
            _ => Accept,
        }
    }
}

/// A contacting shape pair as seen by a handler.
///
/// `a` is always the shape whose type the handler was registered for first;
/// `normal` points from `a` toward `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arbiter {
    pub a: ShapeTag,
    pub b: ShapeTag,
    pub normal: Vec2,
}

impl Arbiter {
    fn swapped(&self) -> Arbiter {
        Arbiter {
            a: self.b,
            b: self.a,
            normal: -self.normal,
        }
    }
}

/// Actions queued during a step, drained in FIFO order afterwards.
pub struct PostStep<A> {
    actions: Mutex<Vec<A>>,
}

impl<A> PostStep<A> {
    pub fn new() -> Self {
        Self {
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, action: A) {
        self.actions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(action);
    }

    pub fn len(&self) -> usize {
        self.actions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_actions(self) -> Vec<A> {
        self.actions
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<A> Default for PostStep<A> {
    fn default() -> Self {
        Self::new()
    }
}

type PreSolveFn<A> = Box<dyn Fn(&Arbiter, &PostStep<A>) -> ContactResponse + Send + Sync>;

/// Handler table keyed by collision type.
///
/// A handler registered for an exact pair wins; otherwise the wildcard
/// handlers of both sides run and the contact survives only if both accept.
pub struct CollisionHandlers<A> {
    pairs: HashMap<(CollisionType, CollisionType), PreSolveFn<A>>,
    wildcards: HashMap<CollisionType, PreSolveFn<A>>,
}

impl<A> CollisionHandlers<A> {
    pub fn new() -> Self {
        Self {
            pairs: HashMap::new(),
            wildcards: HashMap::new(),
        }
    }

    /// Register a pre-solve handler for shapes of type `a` touching type `b`.
    pub fn on_pre_solve<F>(&mut self, a: CollisionType, b: CollisionType, handler: F)
    where
        F: Fn(&Arbiter, &PostStep<A>) -> ContactResponse + Send + Sync + 'static,
    {
        self.pairs.insert((a, b), Box::new(handler));
    }

    /// Register a pre-solve handler for type `a` touching anything.
    pub fn on_wildcard_pre_solve<F>(&mut self, a: CollisionType, handler: F)
    where
        F: Fn(&Arbiter, &PostStep<A>) -> ContactResponse + Send + Sync + 'static,
    {
        self.wildcards.insert(a, Box::new(handler));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.wildcards.is_empty()
    }

    /// Run the handlers for one contact. `normal` points from `a` to `b`.
    pub fn pre_solve(&self, a: ShapeTag, b: ShapeTag, normal: Vec2, queue: &PostStep<A>) -> ContactResponse {
        let arbiter = Arbiter { a, b, normal };

        if let Some(handler) = self.pairs.get(&(a.kind, b.kind)) {
            return guarded(handler, &arbiter, queue);
        }
        if let Some(handler) = self.pairs.get(&(b.kind, a.kind)) {
            return guarded(handler, &arbiter.swapped(), queue);
        }

        let mut response = ContactResponse::Accept;
        if let Some(handler) = self.wildcards.get(&a.kind) {
            response = response.and(guarded(handler, &arbiter, queue));
        }
        if let Some(handler) = self.wildcards.get(&b.kind) {
            response = response.and(guarded(handler, &arbiter.swapped(), queue));
        }
        response
    }
}

impl<A> Default for CollisionHandlers<A> {
    fn default() -> Self {
        Self::new()
    }
}

// A panicking handler must not unwind through rapier's solver.
fn guarded<A>(handler: &PreSolveFn<A>, arbiter: &Arbiter, queue: &PostStep<A>) -> ContactResponse {
    match catch_unwind(AssertUnwindSafe(|| handler(arbiter, queue))) {
        Ok(response) => response,
        Err(_) => {
            log::error!(
                "pre-solve handler panicked for {:?} vs {:?}; accepting contact",
                arbiter.a,
                arbiter.b
            );
            ContactResponse::Accept
        }
    }
}
