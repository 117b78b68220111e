//! Tick-driven simulation driver
//!
//! Owns the current quadrant, the player and enemy mediators, the seeded
//! RNG, and the monotonic simulation clock. All mediator updates run
//! strictly sequentially within a tick on one logical thread; nothing in
//! the engine blocks or holds a timer. Warp completion is polled against
//! the external effect gate each tick.

use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::io::{Console, LinearScreenMap, ScreenMap, SoundSink, WarpEffect};
use crate::models::constants::QUADRANT_SIZE;
use crate::models::coordinates::{Coordinates, QuadrantPosition};
use crate::models::entity::{Enterprise, EntityAllocator};
use crate::models::errors::GameResult;
use crate::models::quadrant::Quadrant;
use crate::services::enemy::EnemyMediator;
use crate::services::generation::{self, QuadrantSummary};
use crate::services::helm::HelmMediator;
use crate::services::TickContext;

/// One quadrant's worth of live simulation.
///
/// Constructed when the player enters a region of the galaxy map and
/// rebuilt by [`Simulation::enter_quadrant`] after each warp arrival.
pub struct Simulation {
    quadrant: Quadrant,
    helm: HelmMediator,
    enemies: Vec<EnemyMediator>,
    allocator: EntityAllocator,
    rng: StdRng,
    clock: f64,
    screen: LinearScreenMap,
}

impl Simulation {
    /// Seed a new session: the Enterprise starts on a random sector of the
    /// given quadrant, which is then populated from the galaxy-map summary.
    pub fn new(
        seed: u64,
        quadrant_position: QuadrantPosition,
        summary: &QuadrantSummary,
    ) -> GameResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut allocator = EntityAllocator::new();
        let screen = LinearScreenMap::default();

        let sector = Coordinates::new(
            rng.gen_range(0..QUADRANT_SIZE),
            rng.gen_range(0..QUADRANT_SIZE),
        );
        let mut enterprise =
            Enterprise::new(allocator.allocate(), quadrant_position, sector);
        let populated =
            generation::populate(summary, &mut enterprise, &mut allocator, &screen, &mut rng)?;

        Ok(Simulation {
            quadrant: populated.quadrant,
            helm: HelmMediator::new(enterprise),
            enemies: populated
                .enemies
                .into_iter()
                .map(EnemyMediator::new)
                .collect(),
            allocator,
            rng,
            clock: 0.0,
            screen,
        })
    }

    /// Advance the simulation by one frame. Enemy mediators run first,
    /// then the pending warp (if any) is polled. Returns the arrival
    /// quadrant when a warp completes this tick — the caller then supplies
    /// the new region's summary via [`Simulation::enter_quadrant`].
    pub fn tick(
        &mut self,
        dt: f64,
        sounds: &mut dyn SoundSink,
        console: &mut dyn Console,
        effect: &dyn WarpEffect,
    ) -> GameResult<Option<QuadrantPosition>> {
        self.clock += dt;
        let clock = self.clock;
        let Simulation {
            quadrant,
            helm,
            enemies,
            rng,
            screen,
            ..
        } = self;
        let screen: &dyn ScreenMap = &*screen;
        let mut ctx = TickContext {
            quadrant,
            rng,
            clock,
            screen,
            sounds,
            console,
        };

        for enemy in enemies.iter_mut() {
            enemy.update(&mut ctx)?;
        }
        helm.poll_warp(&mut ctx, effect)
    }

    /// Player impulse command toward a screen-space point.
    pub fn impulse(
        &mut self,
        target_point: Vec2,
        sounds: &mut dyn SoundSink,
        console: &mut dyn Console,
    ) -> GameResult<()> {
        let clock = self.clock;
        let Simulation {
            quadrant,
            helm,
            rng,
            screen,
            ..
        } = self;
        let screen: &dyn ScreenMap = &*screen;
        let mut ctx = TickContext {
            quadrant,
            rng,
            clock,
            screen,
            sounds,
            console,
        };
        helm.impulse(&mut ctx, target_point)
    }

    /// Player warp command toward a galaxy-map quadrant.
    pub fn begin_warp(
        &mut self,
        destination: QuadrantPosition,
        sounds: &mut dyn SoundSink,
        console: &mut dyn Console,
    ) -> GameResult<()> {
        let clock = self.clock;
        let Simulation {
            quadrant,
            helm,
            rng,
            screen,
            ..
        } = self;
        let screen: &dyn ScreenMap = &*screen;
        let mut ctx = TickContext {
            quadrant,
            rng,
            clock,
            screen,
            sounds,
            console,
        };
        helm.begin_warp(&mut ctx, destination)
    }

    /// Rebuild the sector grid for a newly entered quadrant. The previous
    /// grid and its enemy mediators are dropped; the Enterprise keeps its
    /// sector across the transition.
    pub fn enter_quadrant(&mut self, summary: &QuadrantSummary) -> GameResult<()> {
        let populated = generation::populate(
            summary,
            &mut self.helm.ship,
            &mut self.allocator,
            &self.screen,
            &mut self.rng,
        )?;
        self.quadrant = populated.quadrant;
        self.enemies = populated
            .enemies
            .into_iter()
            .map(EnemyMediator::new)
            .collect();
        debug!(
            "entered quadrant {} with {} hostiles",
            self.helm.ship.quadrant,
            self.quadrant.hostile_count()
        );
        Ok(())
    }

    pub fn quadrant(&self) -> &Quadrant {
        &self.quadrant
    }

    pub fn enterprise(&self) -> &Enterprise {
        &self.helm.ship
    }

    pub fn enterprise_mut(&mut self) -> &mut Enterprise {
        &mut self.helm.ship
    }

    pub fn enemies(&self) -> impl Iterator<Item = &crate::models::entity::EnemyShip> + '_ {
        self.enemies.iter().map(|m| &m.ship)
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn screen(&self) -> &LinearScreenMap {
        &self.screen
    }

    /// The 8 short-range-scan rows, top to bottom.
    pub fn render_grid(&self) -> Vec<String> {
        (0..QUADRANT_SIZE).map(|y| self.quadrant.render_row(y)).collect()
    }
}
