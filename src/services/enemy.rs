//! Enemy mediator: drives one hostile ship's per-tick evasion behavior.

use log::{debug, warn};

use crate::io::Sound;
use crate::models::entity::EnemyShip;
use crate::models::errors::{GameError, GameResult};

use super::evasion;
use super::TickContext;

/// Orchestrates one hostile ship. Each tick: wait out the movement
/// cooldown, draw an evasion target, then update grid, ship state, and
/// render handle as one step.
pub struct EnemyMediator {
    pub ship: EnemyShip,
}

impl EnemyMediator {
    pub fn new(ship: EnemyShip) -> Self {
        EnemyMediator { ship }
    }

    /// Advance this ship by one tick. A saturated grid is not fatal: the
    /// ship skips its move and tries again next time its cooldown expires.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) -> GameResult<()> {
        if !self.ship.is_alive() {
            return Ok(());
        }
        if !self.ship.motion.ready(ctx.clock) {
            return Ok(());
        }

        let target = match evasion::evasion_target(ctx.quadrant, ctx.rng, self.ship.sector) {
            Ok(target) => target,
            Err(GameError::NoValidMove { attempts }) => {
                warn!(
                    "{:?} at {} found no free sector in {} attempts, skipping move",
                    self.ship.kind, self.ship.sector, attempts
                );
                // Re-arm the cooldown so the ship doesn't re-scan every tick.
                self.ship.motion.stamp(ctx.clock);
                return Ok(());
            }
            Err(other) => return Err(other),
        };

        ctx.quadrant.relocate(self.ship.sector, target)?;
        debug!("{:?} evades {} -> {}", self.ship.kind, self.ship.sector, target);
        self.ship.sector = target;
        self.ship.screen_position = ctx.screen.screen_position(target);
        self.ship.motion.stamp(ctx.clock);
        ctx.sounds.play(Sound::EnemyMove);
        Ok(())
    }
}
