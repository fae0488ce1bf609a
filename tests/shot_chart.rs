use hoopline::game::{ShotAttempt, Side};
use hoopline::shot_chart::normalize_shots;

fn shot(side: Side, x: f64, y: f64, value: u32) -> ShotAttempt {
    ShotAttempt {
        side,
        x,
        y,
        point_value: value,
        made: false,
    }
}

/// Corner threes on the true lines plus an arc three exactly on the true
/// radius: a set already sitting on real court geometry.
fn calibrated_set() -> Vec<ShotAttempt> {
    vec![
        shot(Side::Away, 3.0, 2.0, 3),
        shot(Side::Home, 47.0, 2.0, 3),
        // Straight-on three, 23.75 from the hoop at (25, 5.25).
        shot(Side::Away, 25.0, 29.0, 3),
        shot(Side::Home, 20.0, 8.0, 2),
    ]
}

#[test]
fn normalization_is_identity_on_true_geometry() {
    let raw = calibrated_set();
    let normalized = normalize_shots(&raw);
    for (before, after) in raw.iter().zip(&normalized) {
        assert!((before.x - after.x).abs() < 1e-9, "x drifted");
        assert!((before.y - after.y).abs() < 1e-9, "y drifted");
        assert_eq!(before.point_value, after.point_value);
        assert_eq!(before.side, after.side);
    }
}

#[test]
fn horizontal_drift_is_corrected_from_corner_anchors() {
    let drifted: Vec<ShotAttempt> = calibrated_set()
        .into_iter()
        .map(|mut s| {
            s.x = s.x * 0.9 + 2.0;
            s
        })
        .collect();
    let normalized = normalize_shots(&drifted);
    let expected = calibrated_set();
    for (truth, after) in expected.iter().zip(&normalized) {
        assert!((truth.x - after.x).abs() < 1e-9);
        assert!((truth.y - after.y).abs() < 1e-9);
    }
}

#[test]
fn vertical_scale_is_uniform_and_anchored_on_the_closest_arc_three() {
    let mut raw = calibrated_set();
    for s in &mut raw {
        s.y *= 1.25;
    }
    let normalized = normalize_shots(&raw);
    // The straight-on three is the closest arc attempt: its hoop distance
    // (36.25 - 5.25 = 31.0) is the empirical radius, and every y is scaled
    // by 23.75 / 31.0.
    let scale = 23.75 / 31.0;
    for (before, after) in raw.iter().zip(&normalized) {
        assert!((before.y * scale - after.y).abs() < 1e-9);
    }
}

#[test]
fn missing_corner_anchor_skips_x_rescale() {
    // Only a left-corner three: no right anchor, x stays raw.
    let raw = vec![
        shot(Side::Away, 4.0, 2.0, 3),
        shot(Side::Away, 25.0, 29.0, 3),
        shot(Side::Home, 30.0, 10.0, 2),
    ];
    let normalized = normalize_shots(&raw);
    assert!((normalized[0].x - 4.0).abs() < 1e-9);
    assert!((normalized[2].x - 30.0).abs() < 1e-9);
}

#[test]
fn no_threes_at_all_is_identity() {
    let raw = vec![
        shot(Side::Away, 10.0, 4.0, 2),
        shot(Side::Home, 40.0, 12.0, 2),
    ];
    let normalized = normalize_shots(&raw);
    for (before, after) in raw.iter().zip(&normalized) {
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }
}

#[test]
fn made_flag_and_team_survive_normalization() {
    let mut raw = calibrated_set();
    raw[0].made = true;
    let normalized = normalize_shots(&raw);
    assert!(normalized[0].made);
    assert!(!normalized[1].made);
    assert_eq!(normalized[0].side, Side::Away);
    assert_eq!(normalized[1].side, Side::Home);
}
