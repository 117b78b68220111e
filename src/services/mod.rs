//! Game services
//!
//! Algorithms and orchestration: the evasion policy, the line-of-sight
//! resolver, quadrant population, and the mediators that drive enemy and
//! player movement.

pub mod enemy;
pub mod evasion;
pub mod generation;
pub mod helm;
pub mod line_of_sight;

use rand::rngs::StdRng;

use crate::io::{Console, ScreenMap, SoundSink};
use crate::models::quadrant::Quadrant;

/// Everything a mediator touches during one tick, borrowed for the duration
/// of the call. Built fresh each tick by the driver — there is no hidden
/// global state behind the mediators.
pub struct TickContext<'a> {
    pub quadrant: &'a mut Quadrant,
    pub rng: &'a mut StdRng,
    /// Monotonic simulation clock, read-only to mediators.
    pub clock: f64,
    pub screen: &'a dyn ScreenMap,
    pub sounds: &'a mut dyn SoundSink,
    pub console: &'a mut dyn Console,
}
