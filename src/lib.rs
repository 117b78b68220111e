//! Quadrant Simulation Engine
//!
//! The spatial core of a sprite-based Star Trek remake. One quadrant of
//! the galaxy is an 8x8 sector grid; this crate owns that grid, its
//! occupancy invariants, and the mediators that move hostile ships and
//! execute the player's impulse and warp commands against it.
//!
//! Rendering, audio, and the warp visual effect are external collaborators
//! reached through the traits in [`io`].
//!
//! # Modules
//!
//! - [`game_engine`] - Tick driver running mediators against the sim clock
//! - [`models`] - Domain models (Quadrant, Sector, Coordinates, ships)
//! - [`services`] - Evasion policy, line-of-sight, mediators, population
//! - [`io`] - Boundary traits for the external collaborators
//!
//! # Example
//!
//! ```rust
//! use startrek_quadrant::{QuadrantPosition, QuadrantSummary, Simulation};
//! use startrek_quadrant::io::{test_utils, InstantEffect};
//!
//! let summary = QuadrantSummary { klingons: 2, stars: 5, ..Default::default() };
//! let mut sim = Simulation::new(42, QuadrantPosition::new(3, 3), &summary).unwrap();
//!
//! let mut sounds = test_utils::RecordingSound::new();
//! let mut console = test_utils::RecordingConsole::new();
//! sim.tick(0.1, &mut sounds, &mut console, &InstantEffect).unwrap();
//! ```

pub mod game_engine;
pub mod io;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use game_engine::Simulation;
pub use models::constants::Condition;
pub use models::coordinates::{Coordinates, Direction, QuadrantPosition};
pub use models::errors::{GameError, GameResult};
pub use models::quadrant::Quadrant;
pub use models::sector::SectorKind;
pub use services::generation::QuadrantSummary;
