//! Entity store shared by all systems
//!
//! One catcher plus a fixed set of coins, keyed by a typed id. The map is
//! ordered so every system walks entities in the same sequence.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Entity key. Displays and serializes as `block` / `coin_N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EntityId {
    Catcher,
    Coin(u32),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Catcher => write!(f, "block"),
            EntityId::Coin(n) => write!(f, "coin_{n}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "block" {
            return Ok(EntityId::Catcher);
        }
        s.strip_prefix("coin_")
            .and_then(|n| n.parse().ok())
            .map(EntityId::Coin)
            .ok_or_else(|| format!("unknown entity key: {s}"))
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EntityId {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Player-controlled catcher
    Catcher { is_dragging: bool },
    /// Falling collectible
    Coin,
}

/// Axis-aligned rectangle with top-left origin (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// An entity's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EntityKind,
}

impl Entity {
    pub fn catcher(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            kind: EntityKind::Catcher { is_dragging: false },
        }
    }

    pub fn coin(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            kind: EntityKind::Coin,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn is_coin(&self) -> bool {
        self.kind == EntityKind::Coin
    }

    /// Drag flag (always false for coins)
    pub fn is_dragging(&self) -> bool {
        matches!(self.kind, EntityKind::Catcher { is_dragging: true })
    }

    /// Set the drag flag. No-op for coins.
    pub fn set_dragging(&mut self, dragging: bool) {
        if let EntityKind::Catcher { is_dragging } = &mut self.kind {
            *is_dragging = dragging;
        }
    }
}

/// The mutable entity collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    map: BTreeMap<EntityId, Entity>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the catcher. A collection holds at most one.
    pub fn insert_catcher(&mut self, pos: Vec2, size: Vec2) -> Result<()> {
        if self.map.contains_key(&EntityId::Catcher) {
            return Err(SimError::DuplicateCatcher);
        }
        self.map.insert(EntityId::Catcher, Entity::catcher(pos, size));
        Ok(())
    }

    /// Insert or replace coin `n`
    pub fn insert_coin(&mut self, n: u32, pos: Vec2, size: Vec2) {
        self.map.insert(EntityId::Coin(n), Entity::coin(pos, size));
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.map.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.map.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.map.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.map.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.map.iter().map(|(id, e)| (*id, e))
    }

    /// The catcher, or `MissingCatcher` for malformed collections
    pub fn catcher(&self) -> Result<&Entity> {
        self.map
            .get(&EntityId::Catcher)
            .ok_or(SimError::MissingCatcher)
    }

    pub fn catcher_mut(&mut self) -> Result<&mut Entity> {
        self.map
            .get_mut(&EntityId::Catcher)
            .ok_or(SimError::MissingCatcher)
    }

    /// Coins in id order
    pub fn coins(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.iter().filter(|(_, e)| e.is_coin())
    }

    /// Coin ids in id order (snapshot, so callers can mutate while walking)
    pub fn coin_ids(&self) -> Vec<EntityId> {
        self.coins().map(|(id, _)| id).collect()
    }

    /// Positions of every coin except `skip`
    pub fn coin_positions_except(&self, skip: EntityId) -> Vec<Vec2> {
        self.coins()
            .filter(|(id, _)| *id != skip)
            .map(|(_, e)| e.pos)
            .collect()
    }
}
