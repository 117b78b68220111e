pub const QUADRANT_SIZE: i32 = 8;
pub const GALAXY_SIZE: i32 = 8;

/// Attempt cap for every randomized sector search. A saturated grid fails
/// with an error instead of spinning.
pub const MOVE_RETRY_BUDGET: u32 = 64;

pub const INITIAL_ENERGY: f64 = 3000.0;
pub const INITIAL_SHIELDS: f64 = 0.0;

/// Energy drawn per sector of impulse travel (full or partial).
pub const IMPULSE_ENERGY_PER_SECTOR: f64 = 10.0;
/// Energy drawn per quadrant of warp travel (Chebyshev distance).
pub const WARP_ENERGY_PER_QUADRANT: f64 = 100.0;

/// Seconds of cooldown between evasion moves, per hostile class.
pub const KLINGON_MOVE_INTERVAL: f64 = 4.0;
pub const COMMANDER_MOVE_INTERVAL: f64 = 2.5;
pub const SUPER_COMMANDER_MOVE_INTERVAL: f64 = 1.5;

pub const KLINGON_INITIAL_SHIELDS: f64 = 200.0;
pub const COMMANDER_INITIAL_SHIELDS: f64 = 400.0;
pub const SUPER_COMMANDER_INITIAL_SHIELDS: f64 = 600.0;

/// Default screen-space edge length of one sector. Eight sectors span 700
/// screen units, matching the renderer's playfield layout.
pub const SECTOR_EDGE: f32 = 87.5;
/// Default screen-space collision footprint of an obstacle sprite.
pub const OBSTACLE_RADIUS: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Green,
    Yellow,
    Red,
    Docked,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Green => "GREEN",
            Condition::Yellow => "YELLOW",
            Condition::Red => "RED",
            Condition::Docked => "DOCKED",
        }
    }
}
