//! Line-of-sight resolution against screen-space obstacle footprints.
//!
//! The travel path is a segment in continuous screen space; an obstacle
//! blocks it if the segment passes within the obstacle's circular
//! footprint. When several obstacles intersect, the one whose entry point
//! lies nearest the start wins — deterministic regardless of iteration
//! order.

use glam::Vec2;

use crate::models::entity::EntityId;

/// One obstacle sprite's screen-space footprint.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub id: EntityId,
    pub center: Vec2,
    pub radius: f32,
}

/// The first obstruction along a segment.
#[derive(Debug, Clone, Copy)]
pub struct Blocker {
    pub id: EntityId,
    /// Where the segment enters the obstacle footprint.
    pub point: Vec2,
    /// Distance from the segment start to the entry point.
    pub distance: f32,
}

/// Resolve the segment from `start` to `end` against the obstacle set.
/// Returns `None` when the path is clear.
pub fn resolve(start: Vec2, end: Vec2, obstacles: &[Obstacle]) -> Option<Blocker> {
    let segment = end - start;
    let length_sq = segment.length_squared();

    let mut nearest: Option<Blocker> = None;
    for obstacle in obstacles {
        let Some(distance) = entry_distance(start, segment, length_sq, obstacle) else {
            continue;
        };
        if nearest.map_or(true, |b| distance < b.distance) {
            let direction = if length_sq > 0.0 {
                segment / length_sq.sqrt()
            } else {
                Vec2::ZERO
            };
            nearest = Some(Blocker {
                id: obstacle.id,
                point: start + direction * distance,
                distance,
            });
        }
    }
    nearest
}

/// Distance from `start` to where the segment first enters the obstacle's
/// footprint, or `None` if the segment clears it.
fn entry_distance(start: Vec2, segment: Vec2, length_sq: f32, obstacle: &Obstacle) -> Option<f32> {
    let to_center = obstacle.center - start;

    // Degenerate segment: blocked only if the start itself is inside.
    if length_sq == 0.0 {
        return (to_center.length() <= obstacle.radius).then_some(0.0);
    }

    let t = (to_center.dot(segment) / length_sq).clamp(0.0, 1.0);
    let closest = start + segment * t;
    let gap = closest.distance(obstacle.center);
    if gap > obstacle.radius {
        return None;
    }

    // Back up from the closest approach to the circle's entry point.
    let length = length_sq.sqrt();
    let chord = (obstacle.radius * obstacle.radius - gap * gap).sqrt();
    Some((t * length - chord).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::EntityId;

    fn obstacle(raw: u32, x: f32, y: f32, radius: f32) -> Obstacle {
        Obstacle {
            id: EntityId::test_id(raw),
            center: Vec2::new(x, y),
            radius,
        }
    }

    #[test]
    fn segment_through_center_is_blocked() {
        let hit = resolve(
            Vec2::new(0.0, 0.0),
            Vec2::new(700.0, 700.0),
            &[obstacle(1, 350.0, 350.0, 40.0)],
        );
        let blocker = hit.expect("obstacle on the diagonal must block");
        assert_eq!(blocker.id, EntityId::test_id(1));
        // Entry point is one radius short of the center.
        let center_distance = Vec2::new(350.0, 350.0).length();
        assert!((blocker.distance - (center_distance - 40.0)).abs() < 1e-3);
    }

    #[test]
    fn offset_obstacle_clears() {
        let hit = resolve(
            Vec2::new(0.0, 0.0),
            Vec2::new(700.0, 700.0),
            &[obstacle(1, 350.0, 600.0, 40.0)],
        );
        assert!(hit.is_none());
    }

    #[test]
    fn grazing_inside_the_radius_blocks() {
        // Horizontal segment at y=0; obstacle center 30 above, radius 40.
        let hit = resolve(
            Vec2::new(0.0, 0.0),
            Vec2::new(500.0, 0.0),
            &[obstacle(1, 250.0, 30.0, 40.0)],
        );
        assert!(hit.is_some());
    }

    #[test]
    fn obstacle_behind_the_start_does_not_block() {
        let hit = resolve(
            Vec2::new(100.0, 0.0),
            Vec2::new(500.0, 0.0),
            &[obstacle(1, 20.0, 0.0, 40.0)],
        );
        assert!(hit.is_none());
    }

    #[test]
    fn obstacle_beyond_the_end_does_not_block() {
        let hit = resolve(
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            &[obstacle(1, 300.0, 0.0, 40.0)],
        );
        assert!(hit.is_none());
    }

    #[test]
    fn nearest_to_start_wins_regardless_of_order() {
        let near = obstacle(1, 200.0, 0.0, 40.0);
        let far = obstacle(2, 400.0, 0.0, 40.0);
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(600.0, 0.0);

        let forward = resolve(start, end, &[near, far]).unwrap();
        let reversed = resolve(start, end, &[far, near]).unwrap();
        assert_eq!(forward.id, EntityId::test_id(1));
        assert_eq!(reversed.id, EntityId::test_id(1));
        assert!((forward.distance - reversed.distance).abs() < 1e-6);
    }

    #[test]
    fn start_inside_an_obstacle_reports_zero_distance() {
        let hit = resolve(
            Vec2::new(200.0, 0.0),
            Vec2::new(500.0, 0.0),
            &[obstacle(1, 210.0, 0.0, 40.0)],
        )
        .unwrap();
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn empty_obstacle_set_is_always_clear() {
        assert!(resolve(Vec2::ZERO, Vec2::new(700.0, 700.0), &[]).is_none());
    }
}
