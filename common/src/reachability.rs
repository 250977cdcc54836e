use std::collections::VecDeque;

use crate::{grid::ObstacleMap, protocol::Coord};

// Count open tiles reachable from `start` through orthogonal moves (BFS flood fill).
// Returns 0 when `start` itself is blocked or outside the grid.
#[must_use]
pub fn reachable_count(obstacle_map: &ObstacleMap, start: Coord) -> usize {
    if !obstacle_map.contains(start) || obstacle_map.is_obstacle(start) {
        return 0;
    }

    let size = obstacle_map.size();
    let mut visited = vec![false; size.area()];
    let visited_index = |c: Coord| (c.x as usize) * (size.y as usize) + c.y as usize;

    let mut queue = VecDeque::new();
    queue.push_back(start);
    visited[visited_index(start)] = true;
    let mut accessible = 1;

    while let Some(tile) = queue.pop_front() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                // Orthogonal neighbours only: exactly one offset is zero
                if (dx == 0) == (dy == 0) {
                    continue;
                }

                let neighbour = Coord::new(tile.x + dx, tile.y + dy);
                if !obstacle_map.contains(neighbour) {
                    continue;
                }

                let index = visited_index(neighbour);
                if !visited[index] && !obstacle_map.is_obstacle(neighbour) {
                    visited[index] = true;
                    queue.push_back(neighbour);
                    accessible += 1;
                }
            }
        }
    }

    accessible
}

// Check that every open tile is still reachable from `center`, given how many obstacles
// the bitmap currently holds.
#[must_use]
pub fn is_fully_accessible(obstacle_map: &ObstacleMap, center: Coord, obstacle_count: usize) -> bool {
    let target = obstacle_map.size().area().saturating_sub(obstacle_count);
    reachable_count(obstacle_map, center) == target
}
