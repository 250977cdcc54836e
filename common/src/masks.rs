use bevy_math::Vec3;

use crate::{
    constants::{FLOOR_COLLIDER_HEIGHT, MASK_HEIGHT, NAV_FLOOR_DEPTH},
    protocol::{Coord, FloorRegion, MaskRegion, MaskSide, Scale},
};

// Border masks padding a `map_size` grid out to `max_map_size`.
//
// Left/right masks span the grid's depth, top/bottom masks span the full outer width,
// so the four tile the padding without overlap. Widths use floating-point division:
// odd size differences give half-tile masks rather than truncated ones.
#[must_use]
pub fn border_masks(map_size: Coord, max_map_size: Coord, tile_size: f32) -> Vec<MaskRegion> {
    let (w, h) = (map_size.x as f32, map_size.y as f32);
    let (max_w, max_h) = (max_map_size.x as f32, max_map_size.y as f32);

    let side_offset = (w + max_w) / 4.0 * tile_size;
    let side_scale = Vec3::new((max_w - w) / 2.0, MASK_HEIGHT, h) * tile_size;
    let end_offset = (h + max_h) / 4.0 * tile_size;
    let end_scale = Vec3::new(max_w, MASK_HEIGHT, (max_h - h) / 2.0) * tile_size;

    MaskSide::ALL
        .into_iter()
        .map(|side| {
            let (position, scale) = match side {
                MaskSide::Left => (Vec3::NEG_X * side_offset, side_scale),
                MaskSide::Right => (Vec3::X * side_offset, side_scale),
                MaskSide::Top => (Vec3::Z * end_offset, end_scale),
                MaskSide::Bottom => (Vec3::NEG_Z * end_offset, end_scale),
            };
            MaskRegion {
                side,
                position: position.into(),
                scale: scale.into(),
            }
        })
        .collect()
}

// Navigation floor over the whole outer bounds, physical collider over the grid only.
#[must_use]
pub fn floor_region(map_size: Coord, max_map_size: Coord, tile_size: f32) -> FloorRegion {
    FloorRegion {
        scale: Scale::new(
            max_map_size.x as f32 * tile_size,
            max_map_size.y as f32 * tile_size,
            NAV_FLOOR_DEPTH,
        ),
        collider: Scale::new(
            map_size.x as f32 * tile_size,
            FLOOR_COLLIDER_HEIGHT,
            map_size.y as f32 * tile_size,
        ),
    }
}

// Ground footprint of a mask as (min_x, min_z, max_x, max_z)
#[must_use]
pub fn footprint(mask: &MaskRegion) -> (f32, f32, f32, f32) {
    let (half_x, half_z) = (mask.scale.x / 2.0, mask.scale.z / 2.0);
    (
        mask.position.x - half_x,
        mask.position.z - half_z,
        mask.position.x + half_x,
        mask.position.z + half_z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn area(mask: &MaskRegion) -> f32 {
        mask.scale.x * mask.scale.z
    }

    fn overlap(a: &MaskRegion, b: &MaskRegion) -> f32 {
        let (ax0, az0, ax1, az1) = footprint(a);
        let (bx0, bz0, bx1, bz1) = footprint(b);
        let dx = (ax1.min(bx1) - ax0.max(bx0)).max(0.0);
        let dz = (az1.min(bz1) - az0.max(bz0)).max(0.0);
        dx * dz
    }

    #[test]
    fn masks_cover_exactly_the_padding() {
        for (map, max, tile) in [
            (Coord::new(10, 10), Coord::new(30, 30), 1.0),
            (Coord::new(7, 12), Coord::new(20, 15), 1.5),
            (Coord::new(5, 4), Coord::new(8, 9), 2.0),
            (Coord::new(6, 6), Coord::new(6, 6), 1.0),
        ] {
            let masks = border_masks(map, max, tile);
            assert_eq!(masks.len(), 4);
            let total: f32 = masks.iter().map(area).sum();
            let expected = (max.area() - map.area()) as f32 * tile * tile;
            assert!((total - expected).abs() < EPS, "{total} vs {expected}");

            for (i, a) in masks.iter().enumerate() {
                for b in &masks[i + 1..] {
                    assert!(overlap(a, b) < EPS, "{:?} overlaps {:?}", a.side, b.side);
                }
            }
        }
    }

    #[test]
    fn masks_sit_flush_against_the_grid() {
        let masks = border_masks(Coord::new(10, 6), Coord::new(20, 12), 1.0);
        let left = masks.iter().find(|m| m.side == MaskSide::Left).expect("left mask");
        let top = masks.iter().find(|m| m.side == MaskSide::Top).expect("top mask");

        let (_, _, left_max_x, _) = footprint(left);
        let (left_min_x, _, _, _) = footprint(left);
        assert!((left_max_x + 5.0).abs() < EPS);
        assert!((left_min_x + 10.0).abs() < EPS);

        let (top_min_x, top_min_z, top_max_x, top_max_z) = footprint(top);
        assert!((top_min_z - 3.0).abs() < EPS);
        assert!((top_max_z - 6.0).abs() < EPS);
        assert!((top_max_x - top_min_x - 20.0).abs() < EPS);
    }

    #[test]
    fn odd_differences_give_half_tiles() {
        let masks = border_masks(Coord::new(9, 9), Coord::new(10, 10), 1.0);
        assert!((masks[0].scale.x - 0.5).abs() < EPS);
        assert!((masks[2].scale.z - 0.5).abs() < EPS);
    }

    #[test]
    fn floor_spans_outer_bounds_collider_spans_grid() {
        let floor = floor_region(Coord::new(8, 5), Coord::new(20, 10), 2.0);
        assert_eq!(floor.scale, Scale::new(40.0, 20.0, NAV_FLOOR_DEPTH));
        assert_eq!(floor.collider, Scale::new(16.0, FLOOR_COLLIDER_HEIGHT, 10.0));
    }
}
