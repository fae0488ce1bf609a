use std::fs;
use std::path::PathBuf;

use hoopline::game::{MinutesFlag, Side};
use hoopline::stats_fetch::{
    parse_box_score_json, parse_injuries_json, parse_play_by_play_json, parse_schedule_json,
    parse_shot_chart_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_schedule_fixture() {
    let raw = read_fixture("schedule.json");
    let games = parse_schedule_json(&raw).expect("fixture should parse");
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].away_team, "Boston Celtics");
    assert_eq!(games[0].away_abbr(), "BOS");
    assert_eq!(games[0].away_pts, 101);
    assert!(games[0].finished);
    assert!(!games[1].finished);
}

#[test]
fn play_by_play_drops_rows_with_bad_clocks() {
    let raw = read_fixture("play_by_play.json");
    let events = parse_play_by_play_json(&raw).expect("fixture should parse");
    assert_eq!(events.len(), 5);
    assert_eq!(events[0].remaining_seconds, 720.0);
    assert_eq!(events[2].remaining_seconds, 30.5);
    // The "no clock" row is gone; the next period-2 row survives.
    assert_eq!(events[4].away_score, 32);
}

#[test]
fn box_score_maps_teams_and_minutes_flags() {
    let raw = read_fixture("box_score.json");
    let lines = parse_box_score_json(&raw, "BOS", "MIA").expect("fixture should parse");
    assert_eq!(lines.len(), 4);

    let tatum = lines.iter().find(|l| l.player == "Jayson Tatum").unwrap();
    assert_eq!(tatum.side, Side::Away);
    assert_eq!(tatum.points, 31);
    assert_eq!(tatum.three_attempted, 10);
    assert!(tatum.minutes.played());

    let dnp = lines.iter().find(|l| l.player == "Benched Reserve").unwrap();
    assert_eq!(dnp.minutes, MinutesFlag::DidNotPlay);
    let suspended = lines.iter().find(|l| l.player == "Absent Guard").unwrap();
    assert_eq!(suspended.minutes, MinutesFlag::Suspended);
}

#[test]
fn shot_chart_coerces_feet_strings_and_drops_bad_rows() {
    let raw = read_fixture("shot_chart.json");
    let shots = parse_shot_chart_json(&raw, "BOS", "MIA").expect("fixture should parse");
    // The malformed-x shot and the unknown-team shot are dropped alone.
    assert_eq!(shots.len(), 3);
    assert_eq!(shots[0].x, 21.5);
    assert_eq!(shots[0].y, 6.2);
    assert!(shots[0].made);
    assert_eq!(shots[1].side, Side::Home);
    assert!(!shots[1].made);
    assert!(shots[2].made);
}

#[test]
fn parses_injury_fixture() {
    let raw = read_fixture("injuries.json");
    let notes = parse_injuries_json(&raw).expect("fixture should parse");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].team, "BOS");
    assert_eq!(notes[0].status, "Out");
    assert_eq!(
        notes[0].date,
        Some(chrono::NaiveDate::from_ymd_opt(2026, 1, 3).unwrap())
    );
}

#[test]
fn null_payloads_are_empty() {
    assert!(parse_schedule_json("null").expect("null should parse").is_empty());
    assert!(
        parse_play_by_play_json("null")
            .expect("null should parse")
            .is_empty()
    );
    assert!(
        parse_box_score_json("null", "BOS", "MIA")
            .expect("null should parse")
            .is_empty()
    );
    assert!(
        parse_shot_chart_json("null", "BOS", "MIA")
            .expect("null should parse")
            .is_empty()
    );
    assert!(parse_injuries_json("").expect("empty should parse").is_empty());
}
