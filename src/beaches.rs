//! Littoral strips along the sea shoreline and around lakes.

use crate::geometry::Point;
use crate::lakes::Lake;
use crate::ocean::OceanShape;
use crate::rng::TerrainRng;

/// Beach widths as fractions of world size.
pub const OCEAN_BEACH_WIDTH: f64 = 0.02;
pub const LAKE_BEACH_WIDTH: f64 = 0.012;

/// Ring made of the shoreline followed by its inland offset, reversed.
///
/// Each point moves inland by the beach width plus up to 30% extra, never
/// less, so the strip cannot fold back over the water. Draws one value per
/// shoreline point.
pub fn ocean_beach(ocean: &OceanShape, world_size: f64, rng: &mut TerrainRng) -> Vec<Point> {
    let width = OCEAN_BEACH_WIDTH * world_size;
    let inland: Vec<Point> = ocean
        .shoreline
        .iter()
        .map(|&p| {
            let reach = width + rng.next_f64() * 0.3 * width;
            let offset = ocean.inland_direction_at(p) * reach;
            (p + offset).clamp_to_world(world_size)
        })
        .collect();

    let mut ring = ocean.shoreline.clone();
    ring.extend(inland.into_iter().rev());
    ring
}

/// Ring made of the lake outline followed by the same outline pushed outward
/// from the lake centre, reversed. No random draws.
#[must_use]
pub fn lake_beach(lake: &Lake, world_size: f64) -> Vec<Point> {
    let width = LAKE_BEACH_WIDTH * world_size;
    let outer: Vec<Point> = lake
        .polygon
        .iter()
        .map(|&p| {
            let d = p.distance(lake.center);
            if d == 0.0 {
                p
            } else {
                let scaled = (p - lake.center) * ((d + width) / d);
                (lake.center + scaled).clamp_to_world(world_size)
            }
        })
        .collect();

    let mut ring = lake.polygon.clone();
    ring.extend(outer.into_iter().rev());
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use crate::geometry::nearest_point_on_segment;
    use crate::ocean::generate_ocean;

    const W: f64 = 768.0;

    #[test]
    fn ocean_beach_sits_on_the_land_side() {
        let mut rng = TerrainRng::new(14);
        let ocean = generate_ocean(Archetype::NorthCoast, W, &mut rng).unwrap();
        let ring = ocean_beach(&ocean, W, &mut rng);
        let n = ocean.shoreline.len();
        assert_eq!(ring.len(), 2 * n);
        // The North sea is at small y; the beach is pushed toward larger y.
        for (i, shore) in ocean.shoreline.iter().enumerate() {
            let inland = ring[2 * n - 1 - i];
            let pushed = inland.y - shore.y;
            assert!(pushed >= OCEAN_BEACH_WIDTH * W - 1e-9);
            assert!(pushed <= 1.3 * OCEAN_BEACH_WIDTH * W + 1e-9);
        }
    }

    #[test]
    fn peninsula_beach_moves_toward_the_spine() {
        let mut rng = TerrainRng::new(5);
        let ocean = generate_ocean(Archetype::Peninsula, W, &mut rng).unwrap();
        let pen = ocean.peninsula.unwrap();
        let base = ocean.frame.to_world(pen.base_t, 0.0);
        let tip = ocean.frame.to_world(pen.base_t + pen.drift, pen.length);
        let ring = ocean_beach(&ocean, W, &mut rng);
        let n = ocean.shoreline.len();
        let shore = ocean.shoreline[n / 4];
        let inland = ring[2 * n - 1 - n / 4];
        let to_spine = |p: Point| nearest_point_on_segment(p, base, tip).distance(p);
        assert!(to_spine(inland) < to_spine(shore));
    }

    #[test]
    fn lake_beach_is_a_ring_outside_the_lake() {
        let center = Point::new(100.0, 100.0);
        let lake = Lake {
            center,
            base_radius: 20.0,
            polygon: vec![
                Point::new(120.0, 100.0),
                Point::new(100.0, 120.0),
                Point::new(80.0, 100.0),
                Point::new(100.0, 80.0),
            ],
        };
        let ring = lake_beach(&lake, W);
        assert_eq!(ring.len(), 8);
        let width = LAKE_BEACH_WIDTH * W;
        assert!(ring[4].distance(Point::new(100.0, 80.0 - width)) < 1e-9);
        assert!(ring[7].distance(Point::new(120.0 + width, 100.0)) < 1e-9);
    }

    #[test]
    fn lake_point_at_the_centre_is_left_alone() {
        let center = Point::new(50.0, 50.0);
        let lake = Lake {
            center,
            base_radius: 10.0,
            polygon: vec![center, Point::new(60.0, 50.0), Point::new(50.0, 60.0)],
        };
        let ring = lake_beach(&lake, W);
        assert_eq!(ring[5], center);
        assert!(ring.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}
