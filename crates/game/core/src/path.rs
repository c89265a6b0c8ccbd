//! Breadth-first pathfinding over the 4-connected tile grid.

use std::collections::{HashSet, VecDeque};

use crate::state::Point;

/// Fixed neighbor expansion order: +x, -x, +y, -y.
///
/// BFS returns one of possibly many equal-length shortest paths; the order is
/// part of the determinism contract, so replays and tests see identical
/// routes.
const NEIGHBOR_DELTAS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Finds the shortest 4-directional path from `start` to `goal`.
///
/// Returns the step sequence excluding `start` itself. The result is empty
/// when `start == goal` or when no path exists; neither case is an error.
/// Cells in `obstacles` or outside `[0, grid_size)` on either axis are never
/// entered. The goal is recognized during neighbor expansion before the
/// obstacle check, matching how a closed door is still a valid click target
/// while remaining impassable to traversal.
pub fn find_path(
    start: Point,
    goal: Point,
    obstacles: &HashSet<Point>,
    grid_size: i32,
) -> Vec<Point> {
    if start == goal {
        return Vec::new();
    }

    let mut queue: VecDeque<(Point, Vec<Point>)> = VecDeque::new();
    queue.push_back((start, Vec::new()));
    let mut visited: HashSet<Point> = HashSet::new();
    visited.insert(start);

    while let Some((pos, path)) = queue.pop_front() {
        for (dx, dy) in NEIGHBOR_DELTAS {
            let next = Point::new(pos.x + dx, pos.y + dy);

            if next == goal {
                let mut found = path.clone();
                found.push(next);
                return found;
            }

            let in_bounds =
                next.x >= 0 && next.x < grid_size && next.y >= 0 && next.y < grid_size;
            if in_bounds && !obstacles.contains(&next) && !visited.contains(&next) {
                visited.insert(next);
                let mut extended = path.clone();
                extended.push(next);
                queue.push_back((next, extended));
            }
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacles(cells: &[(i32, i32)]) -> HashSet<Point> {
        cells.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn finds_a_simple_path() {
        let path = find_path(Point::new(0, 0), Point::new(2, 1), &HashSet::new(), 20);
        assert_eq!(
            path,
            vec![Point::new(1, 0), Point::new(2, 0), Point::new(2, 1)]
        );
    }

    #[test]
    fn path_length_matches_manhattan_distance_without_obstacles() {
        let start = Point::new(3, 4);
        for gx in 0..20 {
            for gy in 0..20 {
                let goal = Point::new(gx, gy);
                let path = find_path(start, goal, &HashSet::new(), 20);
                let expected = ((gx - start.x).abs() + (gy - start.y).abs()) as usize;
                assert_eq!(path.len(), expected, "goal ({gx},{gy})");
            }
        }
    }

    #[test]
    fn routes_around_obstacles() {
        let blocked = obstacles(&[(1, 0)]);
        let path = find_path(Point::new(0, 0), Point::new(2, 0), &blocked, 20);
        assert_eq!(path.len(), 4);
        assert!(!path.contains(&Point::new(1, 0)));
    }

    #[test]
    fn never_enters_an_obstacle_cell() {
        let blocked = obstacles(&[(2, 2), (3, 2), (4, 2), (2, 3), (4, 3), (2, 4), (3, 4)]);
        let path = find_path(Point::new(0, 0), Point::new(9, 9), &blocked, 10);
        for step in &path {
            assert!(!blocked.contains(step));
        }
    }

    #[test]
    fn returns_empty_when_start_equals_goal() {
        let point = Point::new(5, 5);
        assert!(find_path(point, point, &HashSet::new(), 20).is_empty());
    }

    #[test]
    fn returns_empty_when_goal_is_enclosed() {
        // (0,0) boxed in by its only two in-bounds neighbors.
        let blocked = obstacles(&[(1, 0), (0, 1)]);
        let path = find_path(Point::new(0, 0), Point::new(2, 0), &blocked, 20);
        assert!(path.is_empty());
    }

    #[test]
    fn treats_out_of_bounds_as_non_traversable() {
        let path = find_path(Point::new(0, 0), Point::new(-3, 0), &HashSet::new(), 20);
        assert!(path.is_empty());
    }
}
