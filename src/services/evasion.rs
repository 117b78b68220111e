//! Randomized movement policy for entities that must relocate without a
//! specific target.
//!
//! The direction draw is deliberately split from occupancy: `evasion_course`
//! only knows the grid bounds, `evasion_target` additionally consults the
//! quadrant for a free cell. Every loop is bounded so a saturated grid
//! surfaces as an error rather than a livelock.

use rand::Rng;

use crate::models::constants::MOVE_RETRY_BUDGET;
use crate::models::coordinates::{Coordinates, Direction};
use crate::models::errors::{GameError, GameResult};
use crate::models::quadrant::Quadrant;

/// Draw uniformly from the 8 compass directions until the stepped
/// coordinate is on-grid. Does not check occupancy.
pub fn evasion_course<R: Rng>(rng: &mut R, position: Coordinates) -> GameResult<Coordinates> {
    for _ in 0..MOVE_RETRY_BUDGET {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let candidate = position.step(direction);
        if candidate.valid() {
            return Ok(candidate);
        }
    }
    Err(GameError::NoValidMove {
        attempts: MOVE_RETRY_BUDGET,
    })
}

/// Draw evasion courses until one lands on a currently-Empty sector.
/// Fails with `NoValidMove` once the attempt budget is spent.
pub fn evasion_target<R: Rng>(
    quadrant: &Quadrant,
    rng: &mut R,
    position: Coordinates,
) -> GameResult<Coordinates> {
    for _ in 0..MOVE_RETRY_BUDGET {
        let candidate = evasion_course(rng, position)?;
        if quadrant.is_sector_empty(candidate) {
            return Ok(candidate);
        }
    }
    Err(GameError::NoValidMove {
        attempts: MOVE_RETRY_BUDGET,
    })
}

/// A proposed destination is acceptable iff it is on-grid and Empty.
pub fn is_valid_target(quadrant: &Quadrant, target: Coordinates) -> bool {
    target.valid() && quadrant.is_sector_empty(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::EntityId;
    use crate::models::sector::SectorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn id(raw: u32) -> EntityId {
        EntityId::test_id(raw)
    }

    #[test]
    fn course_from_center_is_always_adjacent_and_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        let center = Coordinates::new(4, 4);
        for _ in 0..200 {
            let c = evasion_course(&mut rng, center).unwrap();
            assert!(c.valid());
            assert!(c.adjacent_to(center));
            assert_ne!(c, center);
        }
    }

    #[test]
    fn course_from_corner_stays_on_grid() {
        let mut rng = StdRng::seed_from_u64(2);
        let corner = Coordinates::new(0, 0);
        for _ in 0..200 {
            let c = evasion_course(&mut rng, corner).unwrap();
            assert!(c.valid());
        }
    }

    #[test]
    fn course_is_deterministic_under_a_fixed_seed() {
        let draw = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..32)
                .map(|_| evasion_course(&mut rng, Coordinates::new(4, 4)).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn target_finds_the_single_free_neighbor() {
        // Box the entity in so only one adjacent cell is Empty.
        let mut quadrant = Quadrant::new();
        let position = Coordinates::new(4, 4);
        let free = Coordinates::new(5, 4);
        let mut n = 0;
        for d in Direction::ALL {
            let c = position.step(d);
            if c != free {
                quadrant.occupy(c, SectorKind::Star, id(n)).unwrap();
                n += 1;
            }
        }

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(evasion_target(&quadrant, &mut rng, position).unwrap(), free);
        }
    }

    #[test]
    fn target_fails_within_budget_when_boxed_in() {
        let mut quadrant = Quadrant::new();
        let position = Coordinates::new(0, 0);
        quadrant
            .occupy(Coordinates::new(1, 0), SectorKind::Star, id(0))
            .unwrap();
        quadrant
            .occupy(Coordinates::new(0, 1), SectorKind::Star, id(1))
            .unwrap();
        quadrant
            .occupy(Coordinates::new(1, 1), SectorKind::Star, id(2))
            .unwrap();

        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            evasion_target(&quadrant, &mut rng, position).unwrap_err(),
            GameError::NoValidMove {
                attempts: MOVE_RETRY_BUDGET,
            }
        );
    }

    #[test]
    fn valid_target_requires_on_grid_and_empty() {
        let mut quadrant = Quadrant::new();
        quadrant
            .occupy(Coordinates::new(3, 3), SectorKind::Star, id(0))
            .unwrap();
        assert!(is_valid_target(&quadrant, Coordinates::new(2, 2)));
        assert!(!is_valid_target(&quadrant, Coordinates::new(3, 3)));
        assert!(!is_valid_target(&quadrant, Coordinates::new(-1, 0)));
    }
}
