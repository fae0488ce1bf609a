use chrono::NaiveDate;
use rand::Rng;

use crate::game::{
    InjuryNote, MinutesFlag, PlayByPlayEvent, PlayerGameLine, ScheduleGame, ShotAttempt, Side,
};

const PERIOD_SECONDS: f64 = 720.0;
const PERIODS: u32 = 4;

// Synthetic coordinate drift, undone by the shot-chart calibration.
const DRIFT_X_SCALE: f64 = 0.9;
const DRIFT_X_SHIFT: f64 = 2.0;
const DRIFT_Y_SCALE: f64 = 1.07;

const AWAY_PLAYERS: &[&str] = &[
    "Avery Stone",
    "Reed Vega",
    "Marcus Holt",
    "Jalen Nox",
    "Theo Vale",
    "Kiran Rook",
    "Percy Quinn",
    "Dana Gray",
];
const HOME_PLAYERS: &[&str] = &[
    "Lewis Park",
    "Dario Moss",
    "Ilan Noor",
    "Corey Hale",
    "Vance Ash",
    "Emil Pike",
    "Noel Reed",
    "Omar Finch",
];

#[derive(Debug, Clone)]
pub struct SampleGame {
    pub game: ScheduleGame,
    pub play_by_play: Vec<PlayByPlayEvent>,
    pub box_lines: Vec<PlayerGameLine>,
    pub shots: Vec<ShotAttempt>,
    pub injuries: Vec<InjuryNote>,
}

/// A plausible finished game for offline runs and benches: a scoring
/// play-by-play with duplicate clocks, a shot set with injected coordinate
/// drift (so normalization has work to do) and a box score with one
/// did-not-play line per side.
pub fn sample_game(date: NaiveDate) -> SampleGame {
    let mut rng = rand::thread_rng();
    let mut play_by_play = Vec::new();
    let mut shots = Vec::new();
    let mut away_score = 0u32;
    let mut home_score = 0u32;

    for period in 1..=PERIODS {
        let mut clock = PERIOD_SECONDS;
        play_by_play.push(PlayByPlayEvent {
            period,
            remaining_seconds: clock,
            away_score,
            home_score,
        });
        while clock > 30.0 {
            // An occasional shared timestamp, like free throws in the feed.
            if !rng.gen_bool(0.15) {
                clock -= rng.gen_range(10.0..35.0);
            }
            let side = if rng.gen_bool(0.5) { Side::Away } else { Side::Home };
            let points = match rng.gen_range(0..10) {
                0..=4 => 2,
                5..=7 => 3,
                _ => 1,
            };
            match side {
                Side::Away => away_score += points,
                Side::Home => home_score += points,
            }
            play_by_play.push(PlayByPlayEvent {
                period,
                remaining_seconds: clock,
                away_score,
                home_score,
            });
            if points >= 2 {
                shots.push(drifted_shot(&mut rng, side, points, true));
            }
            if rng.gen_bool(0.4) {
                let value = rng.gen_range(2..=3);
                shots.push(drifted_shot(&mut rng, side, value, false));
            }
        }
    }

    // Calibration anchors: both corners occupied, one arc three exactly on
    // the line.
    shots.push(raw_shot(Side::Away, 3.0, 2.0, 3, false));
    shots.push(raw_shot(Side::Home, 47.0, 2.0, 3, false));
    shots.push(raw_shot(Side::Away, 25.0, 29.0, 3, true));

    let game = ScheduleGame {
        date,
        away_team: "Sample Road Club".to_string(),
        home_team: "Sample Host Club".to_string(),
        away_pts: away_score,
        home_pts: home_score,
        finished: true,
    };

    let mut box_lines = Vec::new();
    for (side, names) in [(Side::Away, AWAY_PLAYERS), (Side::Home, HOME_PLAYERS)] {
        for (idx, name) in names.iter().enumerate() {
            box_lines.push(sample_line(&mut rng, name, side, idx == names.len() - 1));
        }
    }

    let injuries = vec![InjuryNote {
        team: game.home_abbr(),
        player: HOME_PLAYERS[HOME_PLAYERS.len() - 1].to_string(),
        status: "Out".to_string(),
        date: Some(date),
        description: "Ankle".to_string(),
    }];

    SampleGame {
        game,
        play_by_play,
        box_lines,
        shots,
        injuries,
    }
}

fn drifted_shot(rng: &mut impl Rng, side: Side, point_value: u32, made: bool) -> ShotAttempt {
    let (x, y) = if point_value == 3 {
        let x = rng.gen_range(10.0..40.0);
        (x, rng.gen_range(24.0..31.0))
    } else {
        (rng.gen_range(17.0..33.0), rng.gen_range(1.0..15.0))
    };
    raw_shot(side, x, y, point_value, made)
}

fn raw_shot(side: Side, true_x: f64, true_y: f64, point_value: u32, made: bool) -> ShotAttempt {
    ShotAttempt {
        side,
        x: true_x * DRIFT_X_SCALE + DRIFT_X_SHIFT,
        y: true_y * DRIFT_Y_SCALE,
        point_value,
        made,
    }
}

fn sample_line(rng: &mut impl Rng, name: &str, side: Side, did_not_play: bool) -> PlayerGameLine {
    if did_not_play {
        return PlayerGameLine {
            player: name.to_string(),
            side,
            minutes: MinutesFlag::DidNotPlay,
            points: 0,
            rebounds: 0,
            offensive_rebounds: 0,
            defensive_rebounds: 0,
            assists: 0,
            steals: 0,
            blocks: 0,
            turnovers: 0,
            fouls: 0,
            fg_made: 0,
            fg_attempted: 0,
            three_made: 0,
            three_attempted: 0,
            ft_made: 0,
            ft_attempted: 0,
        };
    }

    let fg_attempted = rng.gen_range(5..20);
    let fg_made = rng.gen_range(0..=fg_attempted);
    let three_attempted = rng.gen_range(0..=fg_attempted.min(10));
    let three_made = rng.gen_range(0..=three_attempted.min(fg_made));
    let ft_attempted = rng.gen_range(0..8);
    let ft_made = rng.gen_range(0..=ft_attempted.max(1)).min(ft_attempted);
    let offensive_rebounds = rng.gen_range(0..4);
    let defensive_rebounds = rng.gen_range(0..9);
    PlayerGameLine {
        player: name.to_string(),
        side,
        minutes: MinutesFlag::Played(format!("{}:{:02}", rng.gen_range(12..40), rng.gen_range(0..60))),
        points: (fg_made - three_made) * 2 + three_made * 3 + ft_made,
        rebounds: offensive_rebounds + defensive_rebounds,
        offensive_rebounds,
        defensive_rebounds,
        assists: rng.gen_range(0..11),
        steals: rng.gen_range(0..4),
        blocks: rng.gen_range(0..3),
        turnovers: rng.gen_range(0..5),
        fouls: rng.gen_range(0..6),
        fg_made,
        fg_attempted,
        three_made,
        three_attempted,
        ft_made,
        ft_attempted,
    }
}
