//! Ward position estimation.
//!
//! Ward placements sometimes arrive without a position. The placer's
//! location is interpolated from the surrounding frames and, when a common
//! ward spot lies within placement range, snapped onto it.

use crate::config::MovementConfig;
use crate::models::{Frame, Position};

/// A commonly warded map location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WardHotspot {
    pub name: &'static str,
    pub position: Position,
}

const fn spot(name: &'static str, x: i32, y: i32) -> WardHotspot {
    WardHotspot {
        name,
        position: Position { x, y },
    }
}

/// Common ward spots for both sides of the 14820 x 14820 map.
pub const WARD_HOTSPOTS: [WardHotspot; 39] = [
    spot("baron", 4827, 9976),
    spot("blue side blue buff", 3032, 7863),
    spot("blue side bot jungle entrance", 5434, 3839),
    spot("blue side bot tri bush", 10789, 3434),
    spot("blue side krug bush", 9342, 2623),
    spot("blue side pixel brush", 4653, 8615),
    spot("blue side raptors", 6592, 5084),
    spot("blue side raptors", 7345, 5228),
    spot("blue side red buff bush", 8040, 3955),
    spot("blue side red deep bush", 7142, 3608),
    spot("blue side top jungle entrance bush", 2308, 7284),
    spot("blue side top tower bush", 1961, 9455),
    spot("bot lane river", 11918, 4100),
    spot("bot lane ward 1", 14031, 2855),
    spot("bot lane ward 2", 13394, 2247),
    spot("bot lane ward 3", 12787, 1813),
    spot("bot side bush 1", 14292, 3173),
    spot("bot side bush 3", 12584, 1755),
    spot("bot side wolves bush", 10210, 7747),
    spot("bottom river bush", 8474, 6473),
    spot("dragon pit", 10239, 4736),
    spot("mid lane", 7403, 7399),
    spot("mid lane ward", 7576, 7341),
    spot("red side blue buff", 11831, 7023),
    spot("red side bot tri bush", 12526, 4707),
    spot("red side bottom jungle entrance", 12468, 7457),
    spot("red side gromp bush", 13394, 5605),
    spot("red side krugs bush", 5550, 11944),
    spot("red side pixel brush", 10239, 6184),
    spot("red side raptors", 7055, 9397),
    spot("red side red buff", 7055, 10699),
    spot("red side top jungle entrance bush", 9429, 10786),
    spot("red side top jungle middle bush", 7692, 11133),
    spot("red side top tri brush", 4190, 11162),
    spot("red side top tri bush", 4335, 11249),
    spot("top river bush", 6477, 8152),
    spot("top side bush 1", 2337, 12667),
    spot("top side bush 2", 1411, 12233),
    spot("top side bush 3", 803, 11596),
];

/// Player position at `timestamp`, linearly interpolated between the
/// bracketing frames. Falls back to whichever neighbour frame has a
/// position when only one does.
pub fn interpolate_position(frames: &[Frame], participant_id: u32, timestamp: i64) -> Option<Position> {
    let before = frames
        .iter()
        .filter(|f| f.timestamp <= timestamp)
        .filter_map(|f| f.position_of(participant_id).map(|p| (f.timestamp, p)))
        .last();
    let after = frames
        .iter()
        .filter(|f| f.timestamp > timestamp)
        .find_map(|f| f.position_of(participant_id).map(|p| (f.timestamp, p)));

    match (before, after) {
        (Some((t0, p0)), Some((t1, p1))) => {
            let ratio = (timestamp - t0) as f64 / (t1 - t0) as f64;
            let lerp = |a: i32, b: i32| (a as f64 + (b - a) as f64 * ratio).round() as i32;
            Some(Position::new(lerp(p0.x, p1.x), lerp(p0.y, p1.y)))
        }
        (Some((_, p)), None) | (None, Some((_, p))) => Some(p),
        (None, None) => None,
    }
}

/// Nearest hotspot within ward range plus tolerance, if any.
pub fn nearest_hotspot(pos: Position, config: &MovementConfig) -> Option<&'static WardHotspot> {
    let reach = config.ward_range + config.ward_snap_tolerance;
    WARD_HOTSPOTS
        .iter()
        .map(|spot| (spot, spot.position.distance_to(&pos)))
        .filter(|(_, dist)| *dist <= reach)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(spot, _)| spot)
}

/// Estimated placement point for a ward event lacking a position.
pub fn estimate_ward_position(
    frames: &[Frame],
    participant_id: u32,
    timestamp: i64,
    config: &MovementConfig,
) -> Option<Position> {
    let placer = interpolate_position(frames, participant_id, timestamp)?;
    Some(
        nearest_hotspot(placer, config)
            .map(|spot| spot.position)
            .unwrap_or(placer),
    )
}
