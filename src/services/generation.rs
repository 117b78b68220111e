//! Quadrant population.
//!
//! The galaxy map stores only counts per quadrant; the sector layout is
//! rebuilt from scratch every time the Enterprise enters a region. Entity
//! placement draws uniformly from the remaining empty sectors.

use rand::Rng;

use crate::io::ScreenMap;
use crate::models::entity::{EnemyKind, EnemyShip, Enterprise, EntityAllocator};
use crate::models::errors::GameResult;
use crate::models::quadrant::Quadrant;
use crate::models::sector::SectorKind;

/// What the galaxy map knows about one quadrant: counts only, no layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadrantSummary {
    pub klingons: i32,
    pub commanders: i32,
    pub super_commanders: i32,
    pub starbases: i32,
    pub stars: i32,
    pub has_planet: bool,
}

/// A freshly populated sector grid plus the hostile ships placed in it.
#[derive(Debug)]
pub struct PopulatedQuadrant {
    pub quadrant: Quadrant,
    pub enemies: Vec<EnemyShip>,
}

/// Build the sector grid for a quadrant the Enterprise just entered.
///
/// The Enterprise keeps its sector from before the transition; everything
/// else lands on a random empty sector. Fails with `NoEmptySector` only if
/// the summary asks for more entities than the grid holds.
pub fn populate<R: Rng>(
    summary: &QuadrantSummary,
    enterprise: &mut Enterprise,
    allocator: &mut EntityAllocator,
    screen: &dyn ScreenMap,
    rng: &mut R,
) -> GameResult<PopulatedQuadrant> {
    let mut quadrant = Quadrant::new();

    quadrant.occupy(enterprise.sector, SectorKind::Enterprise, enterprise.id)?;
    enterprise.screen_position = screen.screen_position(enterprise.sector);
    enterprise.destination = None;

    let mut enemies = Vec::new();
    let hostile_classes = [
        (EnemyKind::Klingon, summary.klingons),
        (EnemyKind::Commander, summary.commanders),
        (EnemyKind::SuperCommander, summary.super_commanders),
    ];
    for (kind, count) in hostile_classes {
        for _ in 0..count {
            let sector = quadrant.random_empty_sector(rng)?;
            let mut ship = EnemyShip::new(allocator.allocate(), kind, sector);
            quadrant.occupy(sector, kind.sector_kind(), ship.id)?;
            ship.screen_position = screen.screen_position(sector);
            enemies.push(ship);
        }
    }

    for _ in 0..summary.starbases {
        let sector = quadrant.random_empty_sector(rng)?;
        quadrant.occupy(sector, SectorKind::Starbase, allocator.allocate())?;
    }

    for _ in 0..summary.stars {
        let sector = quadrant.random_empty_sector(rng)?;
        quadrant.occupy(sector, SectorKind::Star, allocator.allocate())?;
    }

    if summary.has_planet {
        let sector = quadrant.random_empty_sector(rng)?;
        quadrant.occupy(sector, SectorKind::Planet, allocator.allocate())?;
    }

    Ok(PopulatedQuadrant { quadrant, enemies })
}
