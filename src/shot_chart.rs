use crate::game::{NormalizedShot, ShotAttempt, ShotChartPoint, Side};

pub const COURT_LENGTH: f64 = 94.0;
pub const COURT_WIDTH: f64 = 50.0;
/// Distance from the baseline to the hoop center.
pub const HOOP_BASELINE_DIST: f64 = 5.25;
pub const COURT_CENTER_X: f64 = 25.0;
/// Three-point attempts below this y come from the corners, where the line
/// runs parallel to the sideline at a fixed distance.
const CORNER_Y_MAX: f64 = 14.0;
/// True distance between the two corner three-point lines.
const CORNER_SPAN: f64 = 44.0;
/// Offset of the left corner line from the sideline.
const CORNER_OFFSET: f64 = 3.0;
pub const THREE_POINT_RADIUS: f64 = 23.75;

/// Rescale raw shot coordinates onto the canonical half-court axes.
///
/// Raw coordinates drift off true court geometry, but two anchors are
/// always trustworthy: corner threes sit on lines a known distance apart,
/// and no three-point attempt is ever closer to the hoop than the arc
/// radius. The corner anchors fix the x axis; the closest above-corner
/// three fixes the y axis. Either step is skipped when its anchor is
/// missing, leaving that axis raw.
pub fn normalize_shots(shots: &[ShotAttempt]) -> Vec<NormalizedShot> {
    let mut out: Vec<NormalizedShot> = shots
        .iter()
        .map(|s| NormalizedShot {
            side: s.side,
            x: s.x,
            y: s.y,
            point_value: s.point_value,
            made: s.made,
        })
        .collect();

    rescale_x_from_corners(&mut out);
    rescale_y_from_arc(&mut out);
    out
}

fn rescale_x_from_corners(shots: &mut [NormalizedShot]) {
    let left_corner = shots
        .iter()
        .filter(|s| s.point_value == 3 && s.y < CORNER_Y_MAX && s.x < COURT_CENTER_X)
        .map(|s| s.x)
        .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |a| a.max(x))));
    let right_corner = shots
        .iter()
        .filter(|s| s.point_value == 3 && s.y < CORNER_Y_MAX && s.x > COURT_CENTER_X)
        .map(|s| s.x)
        .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |a| a.min(x))));

    let (Some(left), Some(right)) = (left_corner, right_corner) else {
        return;
    };
    let span = right - left;
    if span <= f64::EPSILON {
        return;
    }
    for shot in shots {
        shot.x = (shot.x - left) / span * CORNER_SPAN + CORNER_OFFSET;
    }
}

fn rescale_y_from_arc(shots: &mut [NormalizedShot]) {
    let min_dist = shots
        .iter()
        .filter(|s| s.point_value == 3 && s.y > CORNER_Y_MAX)
        .map(|s| ((s.x - COURT_CENTER_X).powi(2) + (s.y - HOOP_BASELINE_DIST).powi(2)).sqrt())
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.min(d))));

    let Some(min_dist) = min_dist else {
        return;
    };
    if min_dist <= f64::EPSILON {
        return;
    }
    let scale = THREE_POINT_RADIUS / min_dist;
    for shot in shots {
        shot.y *= scale;
    }
}

/// Project normalized shots onto the full 94x50 court for rendering: away
/// attempts on the left half, home attempts mirrored onto the right, hoops
/// at (5.25, 25) and (88.75, 25).
pub fn project_full_court(shots: &[NormalizedShot]) -> Vec<ShotChartPoint> {
    shots
        .iter()
        .map(|s| match s.side {
            Side::Away => ShotChartPoint {
                side: s.side,
                court_x: s.y,
                court_y: s.x,
                made: s.made,
            },
            Side::Home => ShotChartPoint {
                side: s.side,
                court_x: COURT_LENGTH - s.y,
                court_y: COURT_WIDTH - s.x,
                made: s.made,
            },
        })
        .collect()
}

/// Coerce a raw provider coordinate ("21.5 ft", plain numbers, stray
/// whitespace) to feet. None drops that single shot.
pub fn coerce_feet(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_feet_strips_unit_suffix() {
        assert_eq!(coerce_feet("21.5 ft"), Some(21.5));
        assert_eq!(coerce_feet(" 3 ft "), Some(3.0));
        assert_eq!(coerce_feet("12.25"), Some(12.25));
        assert_eq!(coerce_feet("n/a"), None);
        assert_eq!(coerce_feet(""), None);
    }

    #[test]
    fn projection_mirrors_home_shots() {
        let shots = vec![
            NormalizedShot {
                side: Side::Away,
                x: 25.0,
                y: 5.25,
                point_value: 2,
                made: true,
            },
            NormalizedShot {
                side: Side::Home,
                x: 25.0,
                y: 5.25,
                point_value: 2,
                made: false,
            },
        ];
        let points = project_full_court(&shots);
        assert!((points[0].court_x - 5.25).abs() < 1e-9);
        assert!((points[0].court_y - 25.0).abs() < 1e-9);
        assert!((points[1].court_x - 88.75).abs() < 1e-9);
        assert!((points[1].court_y - 25.0).abs() < 1e-9);
    }
}
