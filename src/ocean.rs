//! Ocean and shoreline synthesis.
//!
//! Each sea-bearing archetype authors a coarse control shoreline in an
//! [`EdgeFrame`], roughens it with midpoint displacement and closes it into a
//! polygon along the world edge. Land-locked archetypes have no ocean.

use crate::archetype::Archetype;
use crate::frame::{Edge, EdgeFrame};
use crate::geometry::{Point, fractal_subdivide, nearest_point_on_segment, smoothed_line};
use crate::rng::TerrainRng;

/// Shoreline may not reach further inland than this multiple of the nominal
/// depth after roughening.
const DEPTH_CLAMP: f64 = 1.15;

/// Control points along a cardinal shoreline, anchors included. Together with
/// the two sea-edge corners this makes the 17-point control polygon.
const CARDINAL_CONTROL_POINTS: usize = 15;

/// `(along, into)` offsets of the seven hand-placed harbour points, as
/// fractions of bay width and of bay depth beyond the outer coast.
const HARBOR_PROFILE: [(f64, f64); 7] = [
    (-0.5, 0.0),
    (-0.36, 0.45),
    (-0.2, 0.85),
    (0.0, 1.0),
    (0.2, 0.85),
    (0.36, 0.45),
    (0.5, 0.0),
];

/// Stations along each flank of a peninsula, base included.
const PENINSULA_STATIONS: usize = 5;

/// Render coastline: interpolation segments per control span and jitter as a
/// fraction of world size.
const RENDER_SEGMENTS: usize = 3;
const RENDER_JITTER: f64 = 0.004;

/// Shape parameters shared by the four cardinal coasts and the delta.
#[derive(Debug, Clone, Copy)]
struct CoastProfile {
    /// Nominal depth range as a fraction of world size.
    depth: (f64, f64),
    recursion: u32,
    roughness: f64,
    seaward_bias: f64,
    /// Delta front: land bulging seaward around the river mouth.
    lobe: bool,
}

const CARDINAL: CoastProfile = CoastProfile {
    depth: (0.18, 0.28),
    recursion: 3,
    roughness: 0.20,
    seaward_bias: 1.0,
    lobe: false,
};

const DELTA: CoastProfile = CoastProfile {
    depth: (0.14, 0.2),
    recursion: 4,
    roughness: 0.2,
    seaward_bias: 1.0,
    lobe: true,
};

/// Geometry of a peninsula in its base-edge frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeninsulaShape {
    /// Edge the peninsula grows out of.
    pub direction: Edge,
    pub base_t: f64,
    /// Lateral offset of the tip relative to the base centre.
    pub drift: f64,
    pub length: f64,
    pub base_half_width: f64,
    pub tip_half_width: f64,
}

impl PeninsulaShape {
    /// Spine position along the base edge at distance `s` from it.
    #[must_use]
    pub fn spine_at(&self, s: f64) -> f64 {
        let k = (s / self.length).clamp(0.0, 1.0);
        self.base_t + self.drift * k * k
    }

    #[must_use]
    pub fn half_width_at(&self, s: f64) -> f64 {
        let k = (s / self.length).clamp(0.0, 1.0);
        self.tip_half_width + (self.base_half_width - self.tip_half_width) * (1.0 - k).powf(0.8)
    }
}

/// One sea body and the shoreline that bounds it.
#[derive(Debug, Clone)]
pub struct OceanShape {
    /// Closed ring: `shoreline` followed by the world-edge corners.
    pub polygon: Vec<Point>,
    /// Roughened land/water interface from `coastline_start` to
    /// `coastline_end`; a sub-chain of `polygon`.
    pub shoreline: Vec<Point>,
    /// The shoreline before roughening, in the same orientation.
    pub control_shoreline: Vec<Point>,
    pub coastline_start: Point,
    pub coastline_end: Point,
    /// Sea edge for coasts, harbours and deltas; base edge for peninsulas.
    pub frame: EdgeFrame,
    /// Furthest intended reach of water from the frame edge (peninsula: its
    /// length).
    pub nominal_depth: f64,
    pub peninsula: Option<PeninsulaShape>,
}

impl OceanShape {
    #[must_use]
    pub fn peninsula_direction(&self) -> Option<Edge> {
        self.peninsula.map(|p| p.direction)
    }

    /// Representative dry-land point used to seed lakes and highlands.
    #[must_use]
    pub fn land_center(&self) -> Point {
        let w = self.frame.world_size;
        if let Some(p) = &self.peninsula {
            let s = 0.3 * p.length;
            self.frame.to_world(p.spine_at(s), s)
        } else {
            let s = self.nominal_depth + (w - self.nominal_depth) * 0.45;
            self.frame.to_world(0.5 * w, s)
        }
    }

    /// Pulls a point into the safely dry interior, away from the shoreline
    /// band (or, for a peninsula, back toward its base).
    #[must_use]
    pub fn clamp_inland(&self, p: Point) -> Point {
        let w = self.frame.world_size;
        let (t, s) = self.frame.to_local(p);
        if let Some(pen) = &self.peninsula {
            let s = s.clamp(0.08 * w, 0.3 * pen.length);
            let spine = pen.spine_at(s);
            let slack = 0.3 * pen.half_width_at(s);
            let t = t.clamp(spine - slack, spine + slack);
            self.frame.to_world(t, s)
        } else {
            let s_min = self.nominal_depth * DEPTH_CLAMP + 0.1 * w;
            let s = s.clamp(s_min, (0.88 * w).max(s_min));
            self.frame.to_world(t.clamp(0.12 * w, 0.88 * w), s)
        }
    }

    /// Unit direction from a shoreline point toward dry land.
    #[must_use]
    pub fn inland_direction_at(&self, p: Point) -> Point {
        let Some(pen) = &self.peninsula else {
            return self.frame.inward();
        };
        let base = self.frame.to_world(pen.base_t, 0.0);
        let tip = self.frame.to_world(pen.base_t + pen.drift, pen.length);
        let spine = nearest_point_on_segment(p, base, tip);
        (spine - p)
            .normalized()
            .unwrap_or_else(|| self.frame.inward())
    }

    /// Smooth display line following the control shoreline. Draws
    /// `2 * (RENDER_SEGMENTS - 1)` values per control span.
    pub fn render_coastline(&self, rng: &mut TerrainRng) -> Vec<Point> {
        let jitter = RENDER_JITTER * self.frame.world_size;
        let mut line = Vec::with_capacity(self.control_shoreline.len() * RENDER_SEGMENTS);
        for pair in self.control_shoreline.windows(2) {
            let span = smoothed_line(pair[0], pair[1], RENDER_SEGMENTS, jitter, rng);
            let skip = usize::from(!line.is_empty());
            line.extend(span.into_iter().skip(skip));
        }
        line
    }
}

/// Builds the sea for `archetype`, or `None` for land-locked archetypes.
pub fn generate_ocean(
    archetype: Archetype,
    world_size: f64,
    rng: &mut TerrainRng,
) -> Option<OceanShape> {
    match archetype {
        Archetype::WestCoast => Some(cardinal_coast(Edge::West, world_size, rng, &CARDINAL)),
        Archetype::EastCoast => Some(cardinal_coast(Edge::East, world_size, rng, &CARDINAL)),
        Archetype::SouthCoast => Some(cardinal_coast(Edge::South, world_size, rng, &CARDINAL)),
        Archetype::NorthCoast => Some(cardinal_coast(Edge::North, world_size, rng, &CARDINAL)),
        Archetype::Delta => Some(cardinal_coast(Edge::South, world_size, rng, &DELTA)),
        Archetype::BayHarbor => Some(bay_harbor(world_size, rng)),
        Archetype::Peninsula => Some(peninsula(world_size, rng)),
        Archetype::Island | Archetype::RiverValley | Archetype::Lakefront | Archetype::Inland => {
            None
        }
    }
}

/// A parabolic indentation of the shoreline into the land.
#[derive(Debug, Clone, Copy)]
struct Bay {
    center: f64,
    half_width: f64,
    depth: f64,
}

impl Bay {
    fn random(world_size: f64, nominal_depth: f64, rng: &mut TerrainRng) -> Self {
        Self {
            center: rng.range(0.2, 0.8) * world_size,
            half_width: rng.range(0.08, 0.16) * world_size,
            depth: rng.range(0.15, 0.3) * nominal_depth,
        }
    }

    fn indent_at(&self, t: f64) -> f64 {
        let u = (t - self.center) / self.half_width;
        self.depth * (1.0 - u * u).max(0.0)
    }
}

fn cardinal_coast(
    edge: Edge,
    world_size: f64,
    rng: &mut TerrainRng,
    profile: &CoastProfile,
) -> OceanShape {
    let w = world_size;
    let frame = EdgeFrame::new(edge, w);
    let depth = rng.range(profile.depth.0, profile.depth.1) * w;
    let base = depth * rng.range(0.65, 0.8);

    // Both bays are always drawn so the second-bay roll never shifts the stream.
    let two_bays = rng.next_f64() < 0.5;
    let bays = [Bay::random(w, depth, rng), Bay::random(w, depth, rng)];
    let bays = if two_bays { &bays[..] } else { &bays[..1] };

    let lobe = profile.lobe.then(|| Bay {
        center: rng.range(0.4, 0.6) * w,
        half_width: 0.22 * w,
        depth: 0.45 * base,
    });

    let last = (CARDINAL_CONTROL_POINTS - 1) as f64;
    let mut control: Vec<Point> = (0..CARDINAL_CONTROL_POINTS)
        .map(|i| {
            let t = w * (i as f64 / last);
            let wobble = (rng.next_f64() - 0.5) * 0.08 * depth;
            let indent: f64 = bays.iter().map(|b| b.indent_at(t)).sum();
            let bulge = lobe.map_or(0.0, |l| l.indent_at(t));
            let s = (base + wobble + indent - bulge).clamp(0.3 * depth, depth);
            frame.to_world(t, s)
        })
        .collect();
    orient_seaward(&mut control, &frame);

    let limit = depth * DEPTH_CLAMP;
    let shoreline: Vec<Point> = fractal_subdivide(
        &control,
        profile.recursion,
        profile.roughness,
        rng,
        profile.seaward_bias,
    )
    .into_iter()
    .map(|p| clamp_band(&frame, p, limit))
    .collect();

    close_along_edge(frame, depth, control, shoreline, None)
}

fn bay_harbor(world_size: f64, rng: &mut TerrainRng) -> OceanShape {
    let w = world_size;
    let frame = EdgeFrame::new(Edge::from_index(rng.index(4)), w);
    let coast = rng.range(0.1, 0.16) * w;
    let bay_depth = rng.range(0.32, 0.45) * w;
    let bay_width = rng.range(0.26, 0.4) * w;
    let center = rng.range(0.38, 0.62) * w;

    let mut control = Vec::with_capacity(HARBOR_PROFILE.len() + 2);
    control.push(frame.to_world(0.0, coast));
    for (along, into) in HARBOR_PROFILE {
        let t = center + along * bay_width;
        let s = coast + (bay_depth - coast) * into + (rng.next_f64() - 0.5) * 0.02 * w;
        control.push(frame.to_world(t, s));
    }
    control.push(frame.to_world(w, coast));

    let shoreline: Vec<Point> = fractal_subdivide(&control, 3, 0.15, rng, 0.0)
        .into_iter()
        .map(|p| p.clamp_to_world(w))
        .collect();

    close_along_edge(frame, bay_depth, control, shoreline, None)
}

fn peninsula(world_size: f64, rng: &mut TerrainRng) -> OceanShape {
    let w = world_size;
    let frame = EdgeFrame::new(Edge::from_index(rng.index(4)), w);
    let shape = PeninsulaShape {
        direction: frame.edge,
        base_t: rng.range(0.4, 0.6) * w,
        base_half_width: rng.range(0.22, 0.3) * w,
        length: rng.range(0.62, 0.76) * w,
        drift: (rng.next_f64() - 0.5) * 0.2 * w,
        tip_half_width: rng.range(0.035, 0.06) * w,
    };

    let stations = PENINSULA_STATIONS as f64;
    let mut left = Vec::with_capacity(PENINSULA_STATIONS + 1);
    let mut right = Vec::with_capacity(PENINSULA_STATIONS + 1);
    for k in 0..=PENINSULA_STATIONS {
        let s = shape.length * k as f64 / stations;
        let spine = shape.spine_at(s);
        let half = shape.half_width_at(s);
        let jitter_left = (rng.next_f64() - 0.5) * 0.02 * w;
        let jitter_right = (rng.next_f64() - 0.5) * 0.02 * w;
        left.push(frame.to_world(spine - half + jitter_left, s));
        right.push(frame.to_world(spine + half + jitter_right, s));
    }
    let tip = frame.to_world(
        shape.spine_at(shape.length),
        shape.length + shape.tip_half_width,
    );

    let mut control = left;
    control.push(tip);
    control.extend(right.into_iter().rev());

    let shoreline: Vec<Point> = fractal_subdivide(&control, 3, 0.12, rng, 0.0)
        .into_iter()
        .map(|p| p.clamp_to_world(w))
        .collect();

    close_along_edge(frame, shape.length, control, shoreline, Some(shape))
}

/// Reverses the chain if needed so its right-hand side faces the sea, which
/// is where a positive seaward bias pushes detail.
fn orient_seaward(chain: &mut [Point], frame: &EdgeFrame) {
    let (Some(&first), Some(&last)) = (chain.first(), chain.last()) else {
        return;
    };
    let chord = last - first;
    let right = Point::new(chord.y, -chord.x);
    let seaward = frame.inward() * -1.0;
    if right.dot(seaward) < 0.0 {
        chain.reverse();
    }
}

fn clamp_band(frame: &EdgeFrame, p: Point, limit: f64) -> Point {
    let (t, s) = frame.to_local(p);
    let t = t.clamp(0.0, frame.world_size);
    frame.to_world(t, s.clamp(0.0, limit))
}

/// Closes the shoreline into the sea polygon. Coasts and harbours close along
/// their own edge; a peninsula's sea wraps the rest of the world.
fn close_along_edge(
    frame: EdgeFrame,
    nominal_depth: f64,
    control_shoreline: Vec<Point>,
    shoreline: Vec<Point>,
    peninsula: Option<PeninsulaShape>,
) -> OceanShape {
    let w = frame.world_size;
    let coastline_start = shoreline[0];
    let coastline_end = shoreline[shoreline.len() - 1];

    let mut polygon = shoreline.clone();
    if peninsula.is_some() {
        let (end_t, _) = frame.to_local(coastline_end);
        let (start_t, _) = frame.to_local(coastline_start);
        // Walk round the far side of the world, away from the base.
        let (near, far) = if end_t >= start_t { (w, 0.0) } else { (0.0, w) };
        polygon.extend([
            frame.to_world(near, 0.0),
            frame.to_world(near, w),
            frame.to_world(far, w),
            frame.to_world(far, 0.0),
        ]);
    } else {
        polygon.push(frame.onto_edge(coastline_end));
        polygon.push(frame.onto_edge(coastline_start));
    }

    OceanShape {
        polygon,
        shoreline,
        control_shoreline,
        coastline_start,
        coastline_end,
        frame,
        nominal_depth,
        peninsula,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 768.0;

    fn on_world_boundary(p: Point) -> bool {
        let eps = 1e-9;
        p.x.abs() < eps || p.y.abs() < eps || (p.x - W).abs() < eps || (p.y - W).abs() < eps
    }

    #[test]
    fn land_locked_archetypes_have_no_ocean() {
        for archetype in [
            Archetype::Island,
            Archetype::RiverValley,
            Archetype::Lakefront,
            Archetype::Inland,
        ] {
            let mut rng = TerrainRng::new(1);
            assert!(generate_ocean(archetype, W, &mut rng).is_none());
        }
    }

    #[test]
    fn anchors_sit_on_the_world_boundary() {
        for archetype in Archetype::ALL.into_iter().filter(|a| a.has_ocean()) {
            for seed in 0..20 {
                let mut rng = TerrainRng::new(seed);
                let ocean = generate_ocean(archetype, W, &mut rng).unwrap();
                assert!(
                    on_world_boundary(ocean.coastline_start),
                    "{archetype} {seed}"
                );
                assert!(on_world_boundary(ocean.coastline_end), "{archetype} {seed}");
                assert_eq!(ocean.shoreline[0], ocean.coastline_start);
                assert!(ocean.polygon.len() >= 3);
            }
        }
    }

    #[test]
    fn cardinal_water_stays_within_depth_band() {
        for seed in 0..30 {
            let mut rng = TerrainRng::new(seed);
            let ocean = generate_ocean(Archetype::WestCoast, W, &mut rng).unwrap();
            let max_x = ocean.polygon.iter().map(|p| p.x).fold(f64::MIN, f64::max);
            assert!(max_x <= 0.28 * W * DEPTH_CLAMP + 1e-9);
            let inside = |p: &Point| p.x >= 0.0 && (0.0..=W).contains(&p.y);
            assert!(ocean.polygon.iter().all(inside));
        }
    }

    #[test]
    fn control_polygon_has_seventeen_points() {
        let mut rng = TerrainRng::new(4);
        let ocean = generate_ocean(Archetype::NorthCoast, W, &mut rng).unwrap();
        assert_eq!(ocean.control_shoreline.len() + 2, 17);
        // 15 points, 3 levels of 2n - 1.
        assert_eq!(ocean.shoreline.len(), 113);
    }

    #[test]
    fn delta_is_rougher_than_a_plain_coast() {
        let mut rng = TerrainRng::new(4);
        let delta = generate_ocean(Archetype::Delta, W, &mut rng).unwrap();
        assert_eq!(delta.frame.edge, Edge::South);
        assert_eq!(delta.shoreline.len(), 225);
    }

    #[test]
    fn peninsula_records_its_base_edge() {
        for seed in 0..12 {
            let mut rng = TerrainRng::new(seed);
            let ocean = generate_ocean(Archetype::Peninsula, W, &mut rng).unwrap();
            let shape = ocean.peninsula.unwrap();
            assert_eq!(ocean.peninsula_direction(), Some(shape.direction));
            assert_eq!(ocean.frame.edge, shape.direction);
            // Four world corners close the sea around the finger.
            assert_eq!(ocean.polygon.len(), ocean.shoreline.len() + 4);
        }
    }

    #[test]
    fn clamp_inland_avoids_the_sea_band() {
        let mut rng = TerrainRng::new(8);
        let ocean = generate_ocean(Archetype::EastCoast, W, &mut rng).unwrap();
        let p = ocean.clamp_inland(Point::new(W, W / 2.0));
        assert!(p.x <= W - ocean.nominal_depth * DEPTH_CLAMP);
    }

    #[test]
    fn render_coastline_follows_control_points() {
        let mut rng = TerrainRng::new(2);
        let ocean = generate_ocean(Archetype::SouthCoast, W, &mut rng).unwrap();
        let line = ocean.render_coastline(&mut rng);
        assert_eq!(
            line.len(),
            (ocean.control_shoreline.len() - 1) * RENDER_SEGMENTS + 1
        );
        assert_eq!(line[0], ocean.control_shoreline[0]);
        assert_eq!(line.last(), ocean.control_shoreline.last());
    }
}
