//! All game entity types: plain data plus their bounding boxes.

use crate::config::GameConfig;
use crate::geometry::Aabb;

/// Identifies one live entity for the presentation layer.
/// Allocated by [`World::allocate_id`], never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Shortens the shoot cooldown for a limited time.
    RapidFire,
    /// Absorbs exactly one lethal hit.
    Shield,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Projectile,
    EnemyProjectile,
    Enemy,
    Item(ItemKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Anything with an identity and a hitbox.
pub trait Body {
    fn id(&self) -> EntityId;
    fn kind(&self) -> EntityKind;
    fn bounds(&self) -> Aabb;

    fn position(&self) -> (f32, f32) {
        let b = self.bounds();
        (b.min_x, b.min_y)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

impl Player {
    /// Top-centre of the player, where its shots leave from.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A player bullet, travelling straight up.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// An enemy bullet, travelling straight down.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyProjectile {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Enemies & items ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    /// Signed; flips when the enemy reaches a side of the field.
    pub speed_x: f32,
    pub speed_y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ItemKind,
}

impl Body for Player {
    fn id(&self) -> EntityId {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }
    fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }
}

impl Body for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }
    fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }
}

impl Body for EnemyProjectile {
    fn id(&self) -> EntityId {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::EnemyProjectile
    }
    fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }
}

impl Body for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Enemy
    }
    fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }
}

impl Body for Item {
    fn id(&self) -> EntityId {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Item(self.kind)
    }
    fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// The player plus every entity pool.  Pools are scanned by descending
/// index, so appending during a scan never disturbs it.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<EnemyProjectile>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    next_id: u64,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        World {
            player: Player {
                id: EntityId(0),
                x: config.player_start_x(),
                y: config.player_y(),
                width: config.player_width,
                height: config.player_height,
                alive: true,
            },
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Ids of everything in the pools (the player excluded).
    pub fn pooled_ids(&self) -> Vec<EntityId> {
        self.projectiles
            .iter()
            .map(Body::id)
            .chain(self.enemy_projectiles.iter().map(Body::id))
            .chain(self.enemies.iter().map(Body::id))
            .chain(self.items.iter().map(Body::id))
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.projectiles.len() + self.enemy_projectiles.len() + self.enemies.len() + self.items.len()
    }

    pub fn clear_pools(&mut self) {
        self.projectiles.clear();
        self.enemy_projectiles.clear();
        self.enemies.clear();
        self.items.clear();
    }
}
