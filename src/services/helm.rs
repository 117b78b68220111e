//! Player (Enterprise) mediator: impulse movement and warp travel.

use glam::Vec2;
use log::debug;

use crate::io::{Severity, Sound, WarpEffect};
use crate::models::constants::{
    Condition, IMPULSE_ENERGY_PER_SECTOR, OBSTACLE_RADIUS, WARP_ENERGY_PER_QUADRANT,
};
use crate::models::coordinates::{Coordinates, QuadrantPosition};
use crate::models::entity::{Enterprise, WarpState};
use crate::models::errors::{GameError, GameResult};
use crate::models::quadrant::Quadrant;

use super::evasion;
use super::line_of_sight::{self, Obstacle};
use super::TickContext;

/// Orchestrates player movement commands against the quadrant grid.
pub struct HelmMediator {
    pub ship: Enterprise,
}

impl HelmMediator {
    pub fn new(ship: Enterprise) -> Self {
        HelmMediator { ship }
    }

    /// In-quadrant move toward a screen-space point.
    ///
    /// A clear path lands on the requested sector; an obstructed path
    /// charges energy for the partial leg and stops on an empty sector
    /// adjacent to the first obstacle, never on the obstacle itself.
    pub fn impulse(&mut self, ctx: &mut TickContext<'_>, target_point: Vec2) -> GameResult<()> {
        let target = ctx.screen.sector_coordinates(target_point);
        if !target.valid() {
            return Err(GameError::OutOfBounds(target));
        }
        if target == self.ship.sector {
            ctx.console
                .notify(Severity::Info, &format!("ALREADY AT SECTOR {}", target));
            return Ok(());
        }

        let start = ctx.screen.screen_position(self.ship.sector);
        let end = ctx.screen.screen_position(target);
        let obstacles = collect_obstacles(ctx.quadrant, ctx.screen);
        let footprints: Vec<Obstacle> = obstacles.iter().map(|(_, o)| *o).collect();

        match line_of_sight::resolve(start, end, &footprints) {
            None if evasion::is_valid_target(ctx.quadrant, target) => {
                self.travel(ctx, target)?;
                ctx.sounds.play(Sound::ImpulseEngine);
                debug!("impulse to {}", target);
            }
            None => {
                // Sight line is clear but the cell holds a transient
                // marker (torpedo in flight, explosion). Settle beside it.
                let stop = evasion::evasion_target(ctx.quadrant, ctx.rng, target)?;
                self.travel(ctx, stop)?;
                ctx.sounds.play(Sound::Blocked);
                ctx.console.notify(
                    Severity::Warning,
                    &format!("SECTOR {} OBSTRUCTED, STOPPING AT {}", target, stop),
                );
            }
            Some(blocker) => {
                let obstacle_sector = obstacles
                    .iter()
                    .find(|(_, o)| o.id == blocker.id)
                    .map(|(c, _)| *c)
                    .ok_or(GameError::SectorVacant(target))?;
                let stop = evasion::evasion_target(ctx.quadrant, ctx.rng, obstacle_sector)?;
                self.travel(ctx, stop)?;
                ctx.sounds.play(Sound::Blocked);
                ctx.console.notify(
                    Severity::Warning,
                    &format!(
                        "PATH BLOCKED AT SECTOR {}, STOPPING AT {}",
                        obstacle_sector, stop
                    ),
                );
                debug!("impulse blocked at {}, stopped at {}", obstacle_sector, stop);
            }
        }

        self.refresh_condition(ctx);
        Ok(())
    }

    /// Begin a cross-quadrant jump. The move completes only when the
    /// external warp effect reports done (`poll_warp`).
    pub fn begin_warp(
        &mut self,
        ctx: &mut TickContext<'_>,
        destination: QuadrantPosition,
    ) -> GameResult<()> {
        if !destination.valid() {
            return Err(GameError::OutOfBounds(Coordinates::new(
                destination.x,
                destination.y,
            )));
        }
        if destination == self.ship.quadrant {
            ctx.console.notify(
                Severity::Info,
                &format!("ALREADY IN QUADRANT {}", destination),
            );
            return Ok(());
        }

        let distance = self.ship.quadrant.distance_to(destination);
        self.ship
            .consume_energy(WARP_ENERGY_PER_QUADRANT * distance as f64);
        self.ship.warp = WarpState::Pending { destination };
        self.ship.motion.in_motion = true;
        ctx.sounds.play(Sound::WarpEngine);
        debug!("warp pending: {} -> {}", self.ship.quadrant, destination);
        Ok(())
    }

    /// Poll the pending warp once per tick. Returns the arrival quadrant
    /// when the effect has finished, so the session layer can rebuild the
    /// sector grid for the new region.
    pub fn poll_warp(
        &mut self,
        ctx: &mut TickContext<'_>,
        effect: &dyn WarpEffect,
    ) -> GameResult<Option<QuadrantPosition>> {
        let WarpState::Pending { destination } = self.ship.warp else {
            return Ok(None);
        };
        if !effect.is_complete() {
            return Ok(None);
        }

        self.ship.quadrant = destination;
        self.ship.warp = WarpState::Idle;
        self.ship.motion.in_motion = false;
        self.ship.motion.stamp(ctx.clock);
        ctx.console.notify(
            Severity::Info,
            &format!("ENTERING QUADRANT {}", destination),
        );
        Ok(Some(destination))
    }

    /// Abandon a pending warp. Energy already spent stays spent.
    pub fn cancel_warp(&mut self) {
        self.ship.warp = WarpState::Idle;
        self.ship.motion.in_motion = false;
    }

    /// The atomic grid/entity/render update shared by the clear and
    /// blocked impulse paths. Energy is charged for the leg actually
    /// traveled.
    fn travel(&mut self, ctx: &mut TickContext<'_>, destination: Coordinates) -> GameResult<()> {
        let from = self.ship.sector;
        ctx.quadrant.relocate(from, destination)?;
        self.ship
            .consume_energy(IMPULSE_ENERGY_PER_SECTOR * from.distance_to(destination));
        self.ship.sector = destination;
        self.ship.motion.in_motion = true;
        self.ship.destination = Some(ctx.screen.screen_position(destination));
        self.ship.motion.stamp(ctx.clock);
        Ok(())
    }

    /// Re-evaluate the alert condition after a move.
    fn refresh_condition(&mut self, ctx: &mut TickContext<'_>) {
        let docked = ctx
            .quadrant
            .starbase()
            .map_or(false, |base| self.ship.sector.adjacent_to(base));
        let next = if docked {
            Condition::Docked
        } else if ctx.quadrant.hostile_count() > 0 {
            Condition::Red
        } else if self.ship.energy_low() {
            Condition::Yellow
        } else {
            Condition::Green
        };
        if next == Condition::Docked && self.ship.condition != Condition::Docked {
            ctx.sounds.play(Sound::Docking);
        }
        self.ship.condition = next;
    }
}

/// Screen-space footprints of every travel-blocking sector, paired with
/// the grid cell each footprint came from.
fn collect_obstacles(
    quadrant: &Quadrant,
    screen: &dyn crate::io::ScreenMap,
) -> Vec<(Coordinates, Obstacle)> {
    quadrant
        .sectors()
        .filter(|s| s.kind().blocks_travel())
        .filter_map(|s| {
            let id = s.occupant()?;
            Some((
                s.coordinates(),
                Obstacle {
                    id,
                    center: screen.screen_position(s.coordinates()),
                    radius: OBSTACLE_RADIUS,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::test_utils::{CountdownEffect, RecordingConsole, RecordingSound};
    use crate::io::{LinearScreenMap, ScreenMap};
    use crate::models::constants::INITIAL_ENERGY;
    use crate::models::entity::EntityAllocator;
    use crate::models::sector::SectorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixture {
        quadrant: Quadrant,
        rng: StdRng,
        screen: LinearScreenMap,
        sounds: RecordingSound,
        console: RecordingConsole,
        allocator: EntityAllocator,
        helm: HelmMediator,
    }

    fn fixture(sector: Coordinates) -> Fixture {
        let mut allocator = EntityAllocator::new();
        let mut quadrant = Quadrant::new();
        let ship = Enterprise::new(allocator.allocate(), QuadrantPosition::new(3, 3), sector);
        quadrant
            .occupy(sector, SectorKind::Enterprise, ship.id)
            .unwrap();
        Fixture {
            quadrant,
            rng: StdRng::seed_from_u64(5),
            screen: LinearScreenMap::default(),
            sounds: RecordingSound::new(),
            console: RecordingConsole::new(),
            allocator,
            helm: HelmMediator::new(ship),
        }
    }

    fn impulse_to(f: &mut Fixture, target: Coordinates) -> GameResult<()> {
        let point = f.screen.screen_position(target);
        let mut ctx = TickContext {
            quadrant: &mut f.quadrant,
            rng: &mut f.rng,
            clock: 1.0,
            screen: &f.screen,
            sounds: &mut f.sounds,
            console: &mut f.console,
        };
        f.helm.impulse(&mut ctx, point)
    }

    #[test]
    fn impulse_to_clear_sector_moves_the_ship() {
        let mut f = fixture(Coordinates::new(1, 1));
        let target = Coordinates::new(5, 1);

        impulse_to(&mut f, target).unwrap();
        assert_eq!(f.helm.ship.sector, target);
        assert!(f.quadrant.sector(Coordinates::new(1, 1)).unwrap().is_empty());
        assert_eq!(
            f.quadrant.sector(target).unwrap().kind(),
            SectorKind::Enterprise
        );
        assert!(f.helm.ship.motion.in_motion);
        assert_eq!(
            f.helm.ship.destination,
            Some(f.screen.screen_position(target))
        );
        assert_eq!(f.sounds.played, vec![Sound::ImpulseEngine]);
        // Four sectors of travel at the impulse rate.
        assert_eq!(f.helm.ship.energy, INITIAL_ENERGY - 40.0);
        assert_eq!(f.helm.ship.condition, Condition::Green);
    }

    #[test]
    fn impulse_to_own_sector_is_a_benign_no_op() {
        let here = Coordinates::new(2, 6);
        let mut f = fixture(here);

        impulse_to(&mut f, here).unwrap();
        assert_eq!(f.helm.ship.sector, here);
        assert_eq!(
            f.quadrant.sector(here).unwrap().kind(),
            SectorKind::Enterprise
        );
        assert!(f.sounds.played.is_empty());
        assert_eq!(f.console.messages.len(), 1);
        assert!(f.console.messages[0].1.contains("ALREADY AT"));
        assert_eq!(f.helm.ship.energy, INITIAL_ENERGY);
    }

    #[test]
    fn impulse_off_grid_fails_with_out_of_bounds() {
        let mut f = fixture(Coordinates::new(4, 4));
        let point = Vec2::new(-50.0, 200.0);
        let mut ctx = TickContext {
            quadrant: &mut f.quadrant,
            rng: &mut f.rng,
            clock: 1.0,
            screen: &f.screen,
            sounds: &mut f.sounds,
            console: &mut f.console,
        };
        let err = f.helm.impulse(&mut ctx, point).unwrap_err();
        assert!(matches!(err, GameError::OutOfBounds(_)));
        assert_eq!(f.helm.ship.sector, Coordinates::new(4, 4));
    }

    #[test]
    fn blocked_impulse_stops_adjacent_to_the_obstacle() {
        let mut f = fixture(Coordinates::new(0, 4));
        let obstacle = Coordinates::new(4, 4);
        let klingon = f.allocator.allocate();
        f.quadrant
            .occupy(obstacle, SectorKind::Klingon, klingon)
            .unwrap();

        impulse_to(&mut f, obstacle).unwrap();
        let landed = f.helm.ship.sector;
        assert_ne!(landed, obstacle, "must never land on the obstacle");
        assert!(landed.adjacent_to(obstacle));
        assert!(landed.valid());
        // Strictly nearer the obstacle than the start.
        assert!(landed.distance_to(obstacle) < Coordinates::new(0, 4).distance_to(obstacle));
        assert_eq!(
            f.quadrant.sector(landed).unwrap().kind(),
            SectorKind::Enterprise
        );
        assert_eq!(f.sounds.played.last(), Some(&Sound::Blocked));
        assert!(f.console.messages.iter().any(|(s, m)| {
            *s == Severity::Warning && m.contains("PATH BLOCKED")
        }));
        // Partial leg still costs energy.
        assert!(f.helm.ship.energy < INITIAL_ENERGY);
        // Hostile in the quadrant: Red alert.
        assert_eq!(f.helm.ship.condition, Condition::Red);
    }

    #[test]
    fn blocked_impulse_reports_the_nearest_obstacle() {
        let mut f = fixture(Coordinates::new(0, 4));
        let near = Coordinates::new(3, 4);
        let far = Coordinates::new(6, 4);
        let near_id = f.allocator.allocate();
        let far_id = f.allocator.allocate();
        f.quadrant
            .occupy(far, SectorKind::Klingon, far_id)
            .unwrap();
        f.quadrant
            .occupy(near, SectorKind::Star, near_id)
            .unwrap();

        impulse_to(&mut f, Coordinates::new(7, 4)).unwrap();
        assert!(f.console.messages.iter().any(|(_, m)| m.contains(&near.to_string())));
        assert!(f.helm.ship.sector.adjacent_to(near));
    }

    #[test]
    fn impulse_past_an_offset_obstacle_is_clear() {
        // Obstacle two rows away from the straight path does not block.
        let mut f = fixture(Coordinates::new(0, 4));
        let aside = f.allocator.allocate();
        f.quadrant
            .occupy(Coordinates::new(4, 6), SectorKind::Star, aside)
            .unwrap();

        let target = Coordinates::new(7, 4);
        impulse_to(&mut f, target).unwrap();
        assert_eq!(f.helm.ship.sector, target);
        assert_eq!(f.sounds.played, vec![Sound::ImpulseEngine]);
    }

    #[test]
    fn impulse_onto_a_transient_marker_settles_beside_it() {
        let mut f = fixture(Coordinates::new(0, 0));
        let marker = Coordinates::new(5, 5);
        let torpedo = f.allocator.allocate();
        f.quadrant
            .occupy(marker, SectorKind::PhotonTorpedo, torpedo)
            .unwrap();

        impulse_to(&mut f, marker).unwrap();
        let landed = f.helm.ship.sector;
        assert_ne!(landed, marker);
        assert!(landed.adjacent_to(marker));
        assert_eq!(f.sounds.played.last(), Some(&Sound::Blocked));
        assert!(f
            .console
            .messages
            .iter()
            .any(|(_, m)| m.contains("OBSTRUCTED")));
    }

    #[test]
    fn docking_adjacency_sets_docked_and_plays_the_cue() {
        let mut f = fixture(Coordinates::new(1, 1));
        let base = f.allocator.allocate();
        f.quadrant
            .occupy(Coordinates::new(5, 2), SectorKind::Starbase, base)
            .unwrap();

        impulse_to(&mut f, Coordinates::new(4, 1)).unwrap();
        assert_eq!(f.helm.ship.condition, Condition::Docked);
        assert!(f.sounds.played.contains(&Sound::Docking));
    }

    #[test]
    fn warp_completes_only_when_the_effect_does() {
        let mut f = fixture(Coordinates::new(4, 4));
        let destination = QuadrantPosition::new(6, 3);
        let effect = CountdownEffect::new(2);

        {
            let mut ctx = TickContext {
                quadrant: &mut f.quadrant,
                rng: &mut f.rng,
                clock: 0.0,
                screen: &f.screen,
                sounds: &mut f.sounds,
                console: &mut f.console,
            };
            f.helm.begin_warp(&mut ctx, destination).unwrap();
        }
        assert_eq!(f.sounds.played, vec![Sound::WarpEngine]);
        assert!(f.helm.ship.motion.in_motion);
        // Chebyshev distance 3 at the warp rate.
        assert_eq!(f.helm.ship.energy, INITIAL_ENERGY - 300.0);

        let mut arrivals = Vec::new();
        for tick in 0..4 {
            let mut ctx = TickContext {
                quadrant: &mut f.quadrant,
                rng: &mut f.rng,
                clock: tick as f64,
                screen: &f.screen,
                sounds: &mut f.sounds,
                console: &mut f.console,
            };
            arrivals.push(f.helm.poll_warp(&mut ctx, &effect).unwrap());
        }
        assert_eq!(arrivals[0], None);
        assert_eq!(arrivals[1], None);
        assert_eq!(arrivals[2], Some(destination));
        // Warp state cleared; further polls are no-ops.
        assert_eq!(arrivals[3], None);
        assert_eq!(f.helm.ship.quadrant, destination);
        assert!(!f.helm.ship.motion.in_motion);
    }

    #[test]
    fn warp_to_current_quadrant_is_a_no_op_notice() {
        let mut f = fixture(Coordinates::new(4, 4));
        let here = f.helm.ship.quadrant;
        let mut ctx = TickContext {
            quadrant: &mut f.quadrant,
            rng: &mut f.rng,
            clock: 0.0,
            screen: &f.screen,
            sounds: &mut f.sounds,
            console: &mut f.console,
        };
        f.helm.begin_warp(&mut ctx, here).unwrap();
        assert_eq!(f.helm.ship.warp, WarpState::Idle);
        assert!(f.sounds.played.is_empty());
    }

    #[test]
    fn warp_off_the_galaxy_map_fails() {
        let mut f = fixture(Coordinates::new(4, 4));
        let mut ctx = TickContext {
            quadrant: &mut f.quadrant,
            rng: &mut f.rng,
            clock: 0.0,
            screen: &f.screen,
            sounds: &mut f.sounds,
            console: &mut f.console,
        };
        let err = f
            .helm
            .begin_warp(&mut ctx, QuadrantPosition::new(8, 0))
            .unwrap_err();
        assert!(matches!(err, GameError::OutOfBounds(_)));
    }

    #[test]
    fn cancel_warp_clears_the_pending_jump() {
        let mut f = fixture(Coordinates::new(4, 4));
        {
            let mut ctx = TickContext {
                quadrant: &mut f.quadrant,
                rng: &mut f.rng,
                clock: 0.0,
                screen: &f.screen,
                sounds: &mut f.sounds,
                console: &mut f.console,
            };
            f.helm
                .begin_warp(&mut ctx, QuadrantPosition::new(0, 0))
                .unwrap();
        }
        f.helm.cancel_warp();
        assert_eq!(f.helm.ship.warp, WarpState::Idle);
        assert!(!f.helm.ship.motion.in_motion);
    }

}
