use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;

use crate::game::{
    InjuryNote, MinutesFlag, PlayByPlayEvent, PlayerGameLine, ScheduleGame, ShotAttempt, Side,
};
use crate::http_client::http_client;
use crate::shot_chart::coerce_feet;
use crate::timeline::parse_clock_seconds;

const DEFAULT_API_BASE: &str = "https://api.hooplinestats.com/v1";

fn api_base() -> String {
    std::env::var("STATS_API_BASE")
        .ok()
        .map(|s| s.trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

pub fn fetch_schedule(date: NaiveDate) -> Result<Vec<ScheduleGame>> {
    let url = format!("{}/schedule?date={}", api_base(), date);
    let body = fetch_body(&url)?;
    parse_schedule_json(&body)
}

pub fn fetch_play_by_play(game: &ScheduleGame) -> Result<Vec<PlayByPlayEvent>> {
    let url = format!(
        "{}/playbyplay?date={}&away={}&home={}",
        api_base(),
        game.date,
        game.away_abbr(),
        game.home_abbr()
    );
    let body = fetch_body(&url)?;
    parse_play_by_play_json(&body)
}

pub fn fetch_box_score(game: &ScheduleGame) -> Result<Vec<PlayerGameLine>> {
    let url = format!(
        "{}/boxscore?date={}&away={}&home={}",
        api_base(),
        game.date,
        game.away_abbr(),
        game.home_abbr()
    );
    let body = fetch_body(&url)?;
    parse_box_score_json(&body, &game.away_abbr(), &game.home_abbr())
}

pub fn fetch_shot_chart(game: &ScheduleGame) -> Result<Vec<ShotAttempt>> {
    let url = format!(
        "{}/shotchart?date={}&away={}&home={}",
        api_base(),
        game.date,
        game.away_abbr(),
        game.home_abbr()
    );
    let body = fetch_body(&url)?;
    parse_shot_chart_json(&body, &game.away_abbr(), &game.home_abbr())
}

pub fn fetch_injury_report() -> Result<Vec<InjuryNote>> {
    let url = format!("{}/injuries", api_base());
    let body = fetch_body(&url)?;
    parse_injuries_json(&body)
}

fn fetch_body(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let resp = resp.error_for_status().context("provider returned error")?;
    resp.text().context("reading response body failed")
}

pub fn parse_schedule_json(raw: &str) -> Result<Vec<ScheduleGame>> {
    let Some(root) = parse_root(raw)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    for row in list(&root, "games") {
        let Some(date) = pick_str(row, &["date"]).and_then(parse_date) else {
            continue;
        };
        let Some(away_team) = pick_str(row, &["away", "awayTeam", "visitor"]) else {
            continue;
        };
        let Some(home_team) = pick_str(row, &["home", "homeTeam"]) else {
            continue;
        };
        let status = pick_str(row, &["status"]).unwrap_or_default();
        out.push(ScheduleGame {
            date,
            away_team: away_team.to_string(),
            home_team: home_team.to_string(),
            away_pts: pick_u32(row, &["awayPts", "visitorPts"]).unwrap_or(0),
            home_pts: pick_u32(row, &["homePts"]).unwrap_or(0),
            finished: status.eq_ignore_ascii_case("final")
                || status.eq_ignore_ascii_case("finished"),
        });
    }
    Ok(out)
}

/// Rows with an unparseable clock are dropped individually; the game-level
/// score/clock consistency is the provider's contract, not checked here.
pub fn parse_play_by_play_json(raw: &str) -> Result<Vec<PlayByPlayEvent>> {
    let Some(root) = parse_root(raw)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    for row in list(&root, "events") {
        let Some(period) = pick_u32(row, &["period", "quarter"]).filter(|p| *p >= 1) else {
            continue;
        };
        let Some(remaining_seconds) = pick_str(row, &["clock", "timeRemaining"])
            .and_then(parse_clock_seconds)
        else {
            continue;
        };
        out.push(PlayByPlayEvent {
            period,
            remaining_seconds,
            away_score: pick_u32(row, &["awayScore"]).unwrap_or(0),
            home_score: pick_u32(row, &["homeScore"]).unwrap_or(0),
        });
    }
    Ok(out)
}

pub fn parse_box_score_json(
    raw: &str,
    away_abbr: &str,
    home_abbr: &str,
) -> Result<Vec<PlayerGameLine>> {
    let Some(root) = parse_root(raw)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    for row in list(&root, "players") {
        let Some(player) = pick_str(row, &["name", "player"]) else {
            continue;
        };
        let Some(side) = side_for_team(row, away_abbr, home_abbr) else {
            continue;
        };
        let minutes = minutes_flag(pick_str(row, &["minutes", "mp"]).unwrap_or_default());
        out.push(PlayerGameLine {
            player: player.to_string(),
            side,
            minutes,
            points: pick_u32(row, &["pts", "points"]).unwrap_or(0),
            rebounds: pick_u32(row, &["trb", "rebounds"]).unwrap_or(0),
            offensive_rebounds: pick_u32(row, &["orb"]).unwrap_or(0),
            defensive_rebounds: pick_u32(row, &["drb"]).unwrap_or(0),
            assists: pick_u32(row, &["ast", "assists"]).unwrap_or(0),
            steals: pick_u32(row, &["stl", "steals"]).unwrap_or(0),
            blocks: pick_u32(row, &["blk", "blocks"]).unwrap_or(0),
            turnovers: pick_u32(row, &["tov", "turnovers"]).unwrap_or(0),
            fouls: pick_u32(row, &["pf", "fouls"]).unwrap_or(0),
            fg_made: pick_u32(row, &["fg"]).unwrap_or(0),
            fg_attempted: pick_u32(row, &["fga"]).unwrap_or(0),
            three_made: pick_u32(row, &["fg3", "threes"]).unwrap_or(0),
            three_attempted: pick_u32(row, &["fg3a"]).unwrap_or(0),
            ft_made: pick_u32(row, &["ft"]).unwrap_or(0),
            ft_attempted: pick_u32(row, &["fta"]).unwrap_or(0),
        });
    }
    Ok(out)
}

/// Coordinates arrive as "21.5 ft"-style strings on the legacy schema and
/// plain numbers on the current one. A shot whose coordinate fails
/// coercion is dropped alone.
pub fn parse_shot_chart_json(
    raw: &str,
    away_abbr: &str,
    home_abbr: &str,
) -> Result<Vec<ShotAttempt>> {
    let Some(root) = parse_root(raw)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    for row in list(&root, "shots") {
        let Some(side) = side_for_team(row, away_abbr, home_abbr) else {
            continue;
        };
        let (Some(x), Some(y)) = (coord(row, "x"), coord(row, "y")) else {
            continue;
        };
        let Some(point_value) = pick_u32(row, &["value", "pointValue"])
            .filter(|v| *v == 2 || *v == 3)
        else {
            continue;
        };
        let made = pick_str(row, &["result", "makeMiss"])
            .map(|s| s.eq_ignore_ascii_case("make") || s.eq_ignore_ascii_case("made"))
            .or_else(|| row.get("made").and_then(Value::as_bool))
            .unwrap_or(false);
        out.push(ShotAttempt {
            side,
            x,
            y,
            point_value,
            made,
        });
    }
    Ok(out)
}

pub fn parse_injuries_json(raw: &str) -> Result<Vec<InjuryNote>> {
    let Some(root) = parse_root(raw)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    for row in list(&root, "injuries") {
        let Some(team) = pick_str(row, &["team"]) else {
            continue;
        };
        let Some(player) = pick_str(row, &["player", "name"]) else {
            continue;
        };
        out.push(InjuryNote {
            team: team.to_string(),
            player: player.to_string(),
            status: pick_str(row, &["status"]).unwrap_or("Out").to_string(),
            date: pick_str(row, &["date"]).and_then(parse_date),
            description: pick_str(row, &["description", "injury"])
                .unwrap_or_default()
                .to_string(),
        });
    }
    Ok(out)
}

fn parse_root(raw: &str) -> Result<Option<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid provider json")?;
    Ok(Some(root))
}

fn list<'a>(root: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    root.get(key)
        .and_then(Value::as_array)
        .map(|a| a.iter())
        .unwrap_or_default()
}

fn coord(row: &Value, key: &str) -> Option<f64> {
    match row.get(key) {
        Some(Value::String(s)) => coerce_feet(s),
        Some(v) => v.as_f64(),
        None => None,
    }
}

fn side_for_team(row: &Value, away_abbr: &str, home_abbr: &str) -> Option<Side> {
    let team = pick_str(row, &["team", "teamAbbr"])?;
    if team.eq_ignore_ascii_case(away_abbr) {
        Some(Side::Away)
    } else if team.eq_ignore_ascii_case(home_abbr) {
        Some(Side::Home)
    } else {
        None
    }
}

fn minutes_flag(raw: &str) -> MinutesFlag {
    let lower = raw.to_lowercase();
    if lower.contains("suspended") {
        MinutesFlag::Suspended
    } else if lower.contains("not") || raw.trim().is_empty() {
        MinutesFlag::DidNotPlay
    } else {
        MinutesFlag::Played(raw.trim().to_string())
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn pick_str<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| row.get(*k).and_then(Value::as_str))
}

fn pick_u32(row: &Value, keys: &[&str]) -> Option<u32> {
    for key in keys {
        let Some(v) = row.get(*key) else {
            continue;
        };
        if let Some(n) = v.as_u64() {
            return u32::try_from(n).ok();
        }
        if let Some(s) = v.as_str() {
            if let Ok(n) = s.trim().parse::<u32>() {
                return Some(n);
            }
        }
    }
    None
}
