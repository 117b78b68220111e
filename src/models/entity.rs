//! Movable entities and their handles.
//!
//! The quadrant grid never owns entity lifetime; sectors hold an opaque
//! `EntityId` back-reference and the session layer owns the ships
//! themselves.

use glam::Vec2;

use super::constants::{
    COMMANDER_INITIAL_SHIELDS, COMMANDER_MOVE_INTERVAL, Condition, INITIAL_ENERGY,
    INITIAL_SHIELDS, KLINGON_INITIAL_SHIELDS, KLINGON_MOVE_INTERVAL,
    SUPER_COMMANDER_INITIAL_SHIELDS, SUPER_COMMANDER_MOVE_INTERVAL,
};
use super::coordinates::{Coordinates, QuadrantPosition};
use super::sector::SectorKind;

/// Non-owning handle to a grid occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(u32);

impl EntityId {
    #[cfg(test)]
    pub(crate) fn test_id(raw: u32) -> EntityId {
        EntityId(raw)
    }
}

/// Hands out fresh entity handles. Owned by the session layer; ids are
/// never reused within a session.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        EntityAllocator { next: 0 }
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Per-entity movement timing. Mutated only by the owning mediator.
#[derive(Debug, Clone, Copy)]
pub struct MotionState {
    pub in_motion: bool,
    /// Simulation clock value at the last completed move.
    pub time_since_movement: f64,
    /// Cooldown before the entity may move again.
    pub move_interval: f64,
}

impl MotionState {
    pub fn new(move_interval: f64) -> Self {
        MotionState {
            in_motion: false,
            time_since_movement: 0.0,
            move_interval,
        }
    }

    /// Cooldown guard: has enough simulation time passed since the last move?
    pub fn ready(&self, clock: f64) -> bool {
        clock - self.time_since_movement > self.move_interval
    }

    pub fn stamp(&mut self, clock: f64) {
        self.time_since_movement = clock;
    }
}

/// The hostile warship classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Klingon,
    Commander,
    SuperCommander,
}

impl EnemyKind {
    pub fn sector_kind(self) -> SectorKind {
        match self {
            EnemyKind::Klingon => SectorKind::Klingon,
            EnemyKind::Commander => SectorKind::Commander,
            EnemyKind::SuperCommander => SectorKind::SuperCommander,
        }
    }

    pub fn move_interval(self) -> f64 {
        match self {
            EnemyKind::Klingon => KLINGON_MOVE_INTERVAL,
            EnemyKind::Commander => COMMANDER_MOVE_INTERVAL,
            EnemyKind::SuperCommander => SUPER_COMMANDER_MOVE_INTERVAL,
        }
    }

    pub fn initial_shields(self) -> f64 {
        match self {
            EnemyKind::Klingon => KLINGON_INITIAL_SHIELDS,
            EnemyKind::Commander => COMMANDER_INITIAL_SHIELDS,
            EnemyKind::SuperCommander => SUPER_COMMANDER_INITIAL_SHIELDS,
        }
    }
}

/// A hostile warship within the current quadrant.
#[derive(Debug, Clone)]
pub struct EnemyShip {
    pub id: EntityId,
    pub kind: EnemyKind,
    /// Authoritative grid position.
    pub sector: Coordinates,
    pub shields: f64,
    /// Render handle: the sprite position the renderer interpolates toward.
    pub screen_position: Vec2,
    pub motion: MotionState,
}

impl EnemyShip {
    pub fn new(id: EntityId, kind: EnemyKind, sector: Coordinates) -> Self {
        EnemyShip {
            id,
            kind,
            sector,
            shields: kind.initial_shields(),
            screen_position: Vec2::ZERO,
            motion: MotionState::new(kind.move_interval()),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.shields > 0.0
    }
}

/// A pending cross-quadrant jump, gated on the external warp effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpState {
    Idle,
    Pending { destination: QuadrantPosition },
}

/// The player's starship.
#[derive(Debug, Clone)]
pub struct Enterprise {
    pub id: EntityId,
    /// Galaxy map position.
    pub quadrant: QuadrantPosition,
    /// Authoritative grid position within the current quadrant.
    pub sector: Coordinates,
    pub energy: f64,
    pub shields: f64,
    pub condition: Condition,
    /// Render handle, synced from the grid position after each move.
    pub screen_position: Vec2,
    /// Animated destination for the renderer while `motion.in_motion`.
    pub destination: Option<Vec2>,
    pub motion: MotionState,
    pub warp: WarpState,
}

impl Enterprise {
    pub fn new(id: EntityId, quadrant: QuadrantPosition, sector: Coordinates) -> Self {
        Enterprise {
            id,
            quadrant,
            sector,
            energy: INITIAL_ENERGY,
            shields: INITIAL_SHIELDS,
            condition: Condition::Green,
            screen_position: Vec2::ZERO,
            destination: None,
            motion: MotionState::new(0.0),
            warp: WarpState::Idle,
        }
    }

    /// Draw energy for a maneuver. Never goes below zero.
    pub fn consume_energy(&mut self, amount: f64) {
        self.energy = (self.energy - amount).max(0.0);
    }

    /// Low reserves trigger the Yellow condition.
    pub fn energy_low(&self) -> bool {
        self.energy < INITIAL_ENERGY * 0.1
    }
}
