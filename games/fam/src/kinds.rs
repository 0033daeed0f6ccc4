use fam_engine::{CollisionFilter, CollisionType, ShapeTag};

/// Category bit shared by players and the things they can touch.
pub const PLAYER_BIT: u32 = 1 << 30;
/// Category bit reserved for mouse picking. The picking query leaves it out of
/// its own filter, so a shape whose only category is this bit is never hit.
pub const GRABBABLE_BIT: u32 = 1 << 31;

/// Players, bananas and bombs only meet each other (and walls, which take everything).
pub const PLAYER_FILTER: CollisionFilter = CollisionFilter::new(PLAYER_BIT, PLAYER_BIT);
/// Query filter for mouse picking: every category except [`GRABBABLE_BIT`].
pub const NOT_GRABBABLE_FILTER: CollisionFilter = CollisionFilter::new(!GRABBABLE_BIT, !GRABBABLE_BIT);

/// Every kind of shape the game puts into the physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player = 1,
    Banana = 2,
    Bomb = 3,
    Wall = 4,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Player,
        EntityKind::Banana,
        EntityKind::Bomb,
        EntityKind::Wall,
    ];

    pub const fn collision_type(self) -> CollisionType {
        CollisionType(self as u32)
    }

    pub fn from_collision_type(kind: CollisionType) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.collision_type() == kind)
    }

    /// Decode the kind half of a collider tag.
    pub fn of(tag: ShapeTag) -> Option<Self> {
        Self::from_collision_type(tag.kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Banana => "banana",
            EntityKind::Bomb => "bomb",
            EntityKind::Wall => "wall",
        }
    }
}
