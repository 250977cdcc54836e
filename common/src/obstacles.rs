use bevy_color::{Hsva, Mix, Srgba};
use rand::Rng;
use tracing::debug;

use crate::{
    config::MapConfig,
    grid::ObstacleMap,
    protocol::{Coord, Rgba},
    random::{CoordQueue, OBSTACLE_VISUALS_STREAM, PALETTE_STREAM, seeded_rng},
    reachability::is_fully_accessible,
};

// ============================================================================
// Colours
// ============================================================================

// Foreground/background pair obstacles are blended between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub foreground: Srgba,
    pub background: Srgba,
}

impl Palette {
    // The preset's own pair, or a random pair drawn from the palette seed
    #[must_use]
    pub fn for_config(config: &MapConfig, palette_seed: u64) -> Self {
        if config.random_colours {
            let mut rng = seeded_rng(palette_seed, PALETTE_STREAM);
            Self {
                foreground: random_colour(&mut rng),
                background: random_colour(&mut rng),
            }
        } else {
            Self {
                foreground: config.foreground_colour.into(),
                background: config.background_colour.into(),
            }
        }
    }

    #[must_use]
    pub fn blend(&self, percent: f32) -> Rgba {
        self.foreground.mix(&self.background, percent.clamp(0.0, 1.0)).into()
    }
}

// Any hue, saturation and value, fully opaque
fn random_colour<R: Rng + ?Sized>(rng: &mut R) -> Srgba {
    let hue = rng.random::<f32>() * 360.0;
    let saturation = rng.random::<f32>();
    let value = rng.random::<f32>();
    Srgba::from(Hsva::new(hue, saturation, value, 1.0))
}

// ============================================================================
// Placement
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObstacle {
    pub coord: Coord,
    pub height: f32,
    pub colour_percent: f32,
    pub colour: Rgba,
}

#[derive(Debug, Clone)]
pub struct Placement {
    pub obstacle_map: ObstacleMap,
    pub accepted: Vec<PlacedObstacle>,
    pub target: usize,
    pub rejected: usize,
}

/// Place up to `config.target_obstacle_count()` obstacles drawn from `queue`.
///
/// The loop runs exactly `target` times. Each drawn coordinate is tentatively marked and
/// kept only if it is not the center tile and every remaining open tile is still reachable
/// from the center; otherwise it is unmarked. Rejections are not remembered, so a later
/// draw of the same coordinate is judged against the bitmap as it is then. Fewer obstacles
/// than the target is a normal outcome on dense presets.
#[must_use]
pub fn place_obstacles(config: &MapConfig, queue: &mut CoordQueue, palette: &Palette) -> Placement {
    let target = config.target_obstacle_count();
    let center = config.center();
    let mut visuals = seeded_rng(config.seed, OBSTACLE_VISUALS_STREAM);

    let mut obstacle_map = ObstacleMap::new(config.map_size);
    let mut current_obstacle_count = 0;
    let mut accepted = Vec::with_capacity(target);
    let mut rejected = 0;

    for _ in 0..target {
        let Some(coord) = queue.draw() else {
            break;
        };

        // Only reachable once the queue wraps, which needs target > area
        if obstacle_map.is_obstacle(coord) {
            rejected += 1;
            continue;
        }

        obstacle_map.set(coord, true);
        current_obstacle_count += 1;

        if coord != center && is_fully_accessible(&obstacle_map, center, current_obstacle_count) {
            let t = visuals.random::<f64>() as f32;
            let height = (config.max_obstacle_height - config.min_obstacle_height).mul_add(t, config.min_obstacle_height);

            let colour_percent = if config.gradient_pattern {
                coord.y as f32 / config.map_size.y as f32
            } else {
                visuals.random::<f64>() as f32
            };

            accepted.push(PlacedObstacle {
                coord,
                height,
                colour_percent,
                colour: palette.blend(colour_percent),
            });
        } else {
            obstacle_map.set(coord, false);
            current_obstacle_count -= 1;
            rejected += 1;
        }
    }

    debug!(
        "placed {} of {} obstacles ({} rejected) on {}x{} map",
        accepted.len(),
        target,
        rejected,
        config.map_size.x,
        config.map_size.y
    );

    Placement {
        obstacle_map,
        accepted,
        target,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::all_coords, random::TILE_SHUFFLE_STREAM, reachability::reachable_count};

    fn config(width: i32, height: i32, density: f32, seed: u64) -> MapConfig {
        MapConfig {
            map_size: Coord::new(width, height),
            obstacle_percent: density,
            seed,
            ..MapConfig::default()
        }
    }

    fn run(config: &MapConfig) -> Placement {
        let mut queue = CoordQueue::new(&all_coords(config.map_size), config.seed, TILE_SHUFFLE_STREAM);
        place_obstacles(config, &mut queue, &Palette::for_config(config, 0))
    }

    #[test]
    fn zero_density_places_nothing() {
        let placement = run(&config(3, 3, 0.0, 4));
        assert_eq!(placement.target, 0);
        assert!(placement.accepted.is_empty());
        assert_eq!(reachable_count(&placement.obstacle_map, Coord::new(1, 1)), 9);
    }

    #[test]
    fn corner_draw_is_accepted() {
        let config = config(3, 3, 0.12, 0);
        let mut queue = CoordQueue::from_order(vec![Coord::new(0, 0), Coord::new(1, 1)]);
        let placement = place_obstacles(&config, &mut queue, &Palette::for_config(&config, 0));
        assert_eq!(placement.target, 1);
        assert_eq!(placement.accepted.len(), 1);
        assert_eq!(placement.accepted[0].coord, Coord::new(0, 0));
        assert!(placement.obstacle_map.is_obstacle(Coord::new(0, 0)));
    }

    #[test]
    fn bisecting_draw_is_rejected() {
        // 3x1 strip: the middle cell is the center, and the only draw
        let config = config(3, 1, 0.34, 0);
        let mut queue = CoordQueue::from_order(vec![Coord::new(1, 0), Coord::new(0, 0), Coord::new(2, 0)]);
        let placement = place_obstacles(&config, &mut queue, &Palette::for_config(&config, 0));
        assert_eq!(placement.target, 1);
        assert!(placement.accepted.is_empty());
        assert_eq!(placement.rejected, 1);
        assert_eq!(placement.obstacle_map.obstacle_count(), 0);
    }

    #[test]
    fn disconnecting_draw_is_rejected_off_center() {
        // 4x1 strip, center (2, 0); blocking (1, 0) would cut off (0, 0)
        let config = config(4, 1, 0.25, 0);
        let mut queue = CoordQueue::from_order(vec![Coord::new(1, 0), Coord::new(3, 0)]);
        let placement = place_obstacles(&config, &mut queue, &Palette::for_config(&config, 0));
        assert!(placement.accepted.is_empty());
        assert_eq!(placement.rejected, 1);
        assert!(!placement.obstacle_map.is_obstacle(Coord::new(1, 0)));
    }

    #[test]
    fn five_by_five_reaches_its_target() {
        let config = config(5, 5, 0.2, 10);
        let order = [(0, 0), (4, 4), (0, 4), (4, 0), (2, 0), (1, 1)];
        let mut queue = CoordQueue::from_order(order.iter().map(|&(x, y)| Coord::new(x, y)).collect());
        let placement = place_obstacles(&config, &mut queue, &Palette::for_config(&config, 0));
        assert_eq!(placement.target, 5);
        assert_eq!(placement.accepted.len(), 5);
        assert_eq!(placement.obstacle_map.obstacle_count(), 5);
        assert_eq!(reachable_count(&placement.obstacle_map, config.center()), 20);
    }

    #[test]
    fn full_density_keeps_center_and_connectivity() {
        for seed in 0..10 {
            let config = config(6, 5, 1.0, seed);
            let placement = run(&config);
            assert_eq!(placement.target, 30);
            assert!(!placement.obstacle_map.is_obstacle(config.center()));
            assert!(placement.accepted.len() < 30);
            let open = 30 - placement.accepted.len();
            assert_eq!(reachable_count(&placement.obstacle_map, config.center()), open);
            assert_eq!(placement.accepted.len() + placement.rejected, placement.target);
        }
    }

    #[test]
    fn heights_stay_in_range() {
        let config = MapConfig {
            min_obstacle_height: 1.0,
            max_obstacle_height: 4.0,
            ..config(12, 12, 0.3, 8)
        };
        let placement = run(&config);
        assert!(!placement.accepted.is_empty());
        for obstacle in &placement.accepted {
            assert!((1.0..=4.0).contains(&obstacle.height), "{}", obstacle.height);
        }
    }

    #[test]
    fn gradient_colour_follows_row() {
        let config = MapConfig {
            foreground_colour: Rgba::new(0.0, 0.0, 0.0, 1.0),
            background_colour: Rgba::new(1.0, 1.0, 1.0, 1.0),
            ..config(10, 10, 0.3, 2)
        };
        let placement = run(&config);
        for obstacle in &placement.accepted {
            let expected = obstacle.coord.y as f32 / 10.0;
            assert!((obstacle.colour_percent - expected).abs() < f32::EPSILON);
            assert!((obstacle.colour.r - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn random_palette_depends_only_on_palette_seed() {
        let config = MapConfig {
            random_colours: true,
            ..MapConfig::default()
        };
        assert_eq!(Palette::for_config(&config, 5), Palette::for_config(&config, 5));
        assert_ne!(Palette::for_config(&config, 5), Palette::for_config(&config, 6));
        let fixed = Palette::for_config(&MapConfig::default(), 5);
        assert_eq!(fixed.foreground, Srgba::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn random_palette_has_its_own_stream() {
        let config = MapConfig {
            random_colours: true,
            seed: 42,
            ..MapConfig::default()
        };
        let palette = Palette::for_config(&config, config.seed);

        let mut own = seeded_rng(config.seed, PALETTE_STREAM);
        assert_eq!(palette.foreground, random_colour(&mut own));
        assert_eq!(palette.background, random_colour(&mut own));

        let mut shuffle = seeded_rng(config.seed, TILE_SHUFFLE_STREAM);
        assert_ne!(palette.foreground, random_colour(&mut shuffle));
    }
}
