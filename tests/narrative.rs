use chrono::NaiveDate;

use hoopline::game::{
    InjuryNote, MinutesFlag, PlayByPlayEvent, PlayerGameLine, ScheduleGame, Side,
};
use hoopline::narrative::{derive_game_narrative, POST_CHAR_LIMIT};

fn game() -> ScheduleGame {
    ScheduleGame {
        date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        away_team: "Boston Celtics".to_string(),
        home_team: "Miami Heat".to_string(),
        away_pts: 101,
        home_pts: 99,
        finished: true,
    }
}

fn pbp(period: u32, remaining: f64, away: u32, home: u32) -> PlayByPlayEvent {
    PlayByPlayEvent {
        period,
        remaining_seconds: remaining,
        away_score: away,
        home_score: home,
    }
}

fn player(name: &str, side: Side, minutes: MinutesFlag, points: u32) -> PlayerGameLine {
    PlayerGameLine {
        player: name.to_string(),
        side,
        minutes,
        points,
        rebounds: 5,
        offensive_rebounds: 1,
        defensive_rebounds: 4,
        assists: 3,
        steals: 1,
        blocks: 1,
        turnovers: 2,
        fouls: 2,
        fg_made: points / 3,
        fg_attempted: points / 2 + 1,
        three_made: 1,
        three_attempted: 3,
        ft_made: 2,
        ft_attempted: 2,
    }
}

fn basic_pbp() -> Vec<PlayByPlayEvent> {
    vec![
        pbp(1, 720.0, 0, 0),
        pbp(1, 400.0, 10, 12),
        pbp(1, 0.0, 25, 20),
        pbp(2, 720.0, 25, 20),
        pbp(2, 0.0, 101, 99),
    ]
}

fn played() -> MinutesFlag {
    MinutesFlag::Played("32:00".to_string())
}

#[test]
fn segments_follow_the_fixed_order() {
    let lines = vec![
        player("Jayson Tatum", Side::Away, played(), 31),
        player("Bam Adebayo", Side::Home, played(), 24),
    ];
    let narrative = derive_game_narrative(&game(), &basic_pbp(), &lines, &[], &[]);

    assert!(narrative.segments.len() >= 3);
    assert!(narrative.segments[0].starts_with("#BOSvsMIA 101:99 on 2026-01-05"));
    assert!(narrative.segments[0].contains("Ties:"));
    assert!(narrative.segments[0].contains("Lead changes:"));
    assert!(narrative.segments[0].contains("Largest lead:"));
    assert!(narrative.segments[0].contains("BOS led:"));
    assert!(narrative.segments[0].contains("MIA led:"));
    assert!(narrative.segments[1].starts_with("FG:"));
    assert!(narrative.segments[1].contains("basketball-reference.com"));
    assert!(narrative.segments[2].starts_with("PTS:"));
    assert!(narrative.segments[2].contains("J. Tatum 31"));
}

#[test]
fn every_segment_respects_the_character_limit() {
    let injuries: Vec<InjuryNote> = (0..12)
        .map(|idx| InjuryNote {
            team: "MIA".to_string(),
            player: format!("Somewhat Lengthy Playername {idx}"),
            status: "Out For Season".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 2),
            description: "Long description of a complicated lower-body situation".to_string(),
        })
        .collect();
    let lines = vec![
        player("Jayson Tatum", Side::Away, played(), 31),
        player("Bam Adebayo", Side::Home, played(), 24),
    ];
    let narrative = derive_game_narrative(&game(), &basic_pbp(), &lines, &[], &injuries);
    for segment in &narrative.segments {
        assert!(segment.chars().count() <= POST_CHAR_LIMIT);
    }
    // The injury segment was genuinely truncated, not dropped.
    let injury_segment = narrative.segments.last().unwrap();
    assert_eq!(injury_segment.chars().count(), POST_CHAR_LIMIT);
}

#[test]
fn missing_box_score_degenerates_to_a_notice() {
    let narrative = derive_game_narrative(&game(), &basic_pbp(), &[], &[], &[]);
    assert_eq!(narrative.segments.len(), 2);
    assert!(narrative.segments[1].contains("no box scores"));
    assert!(narrative.splits.is_none());
    assert!(narrative.leaderboards.is_empty());
}

#[test]
fn short_injury_reports_for_both_teams_merge_into_one_segment() {
    let injuries = vec![
        InjuryNote {
            team: "BOS".to_string(),
            player: "Kristaps Porzingis".to_string(),
            status: "Out".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 3),
            description: "Calf".to_string(),
        },
        InjuryNote {
            team: "MIA".to_string(),
            player: "Tyler Herro".to_string(),
            status: "Day To Day".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 4),
            description: "Ankle".to_string(),
        },
    ];
    let narrative = derive_game_narrative(&game(), &basic_pbp(), &[], &[], &injuries);
    let injury_segments: Vec<&String> = narrative
        .segments
        .iter()
        .filter(|s| s.starts_with("BOS:") || s.starts_with("MIA:"))
        .collect();
    assert_eq!(injury_segments.len(), 1);
    assert!(injury_segments[0].contains("K. Porzingis Out"));
    assert!(injury_segments[0].contains("T. Herro Day To Day"));
}

#[test]
fn injury_reports_dated_after_the_game_are_ignored() {
    let injuries = vec![InjuryNote {
        team: "BOS".to_string(),
        player: "Future Casualty".to_string(),
        status: "Out".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 1, 9),
        description: "Knee".to_string(),
    }];
    let narrative = derive_game_narrative(&game(), &basic_pbp(), &[], &[], &injuries);
    assert!(!narrative.segments.iter().any(|s| s.contains("F. Casualty")));
}

#[test]
fn suspended_and_dnp_players_never_appear_anywhere() {
    let lines = vec![
        player("Jayson Tatum", Side::Away, played(), 31),
        player("Bam Adebayo", Side::Home, played(), 24),
        player("Ghost Scorer", Side::Away, MinutesFlag::Suspended, 99),
        player("Bench Warmer", Side::Home, MinutesFlag::DidNotPlay, 88),
    ];
    let narrative = derive_game_narrative(&game(), &basic_pbp(), &lines, &[], &[]);

    for board in &narrative.leaderboards {
        assert!(board.top.iter().all(|e| !e.player.contains("Scorer")));
        assert!(board.top.iter().all(|e| !e.player.contains("Warmer")));
    }
    // Totals only include the two players who took the floor.
    let splits = narrative.splits.as_ref().unwrap();
    assert_eq!(splits.away.three_made, 1);
    assert_eq!(splits.home.three_made, 1);
}

#[test]
fn empty_timeline_reports_zero_statistics_without_failing() {
    let lines = vec![player("Jayson Tatum", Side::Away, played(), 31)];
    let narrative = derive_game_narrative(&game(), &[], &lines, &[], &[]);
    assert_eq!(narrative.tie_count, 0);
    assert_eq!(narrative.lead_change_count, 0);
    assert_eq!(narrative.largest_lead, 0);
    assert!(narrative.segments[0].contains("BOS led: ~0:00"));
    assert!(narrative.period_marks.is_empty());
}
