use chrono::Datelike;

use crate::box_stats;
use crate::game::{
    GameNarrative, InjuryNote, Leaderboard, PlayByPlayEvent, PlayerGameLine, ScheduleGame,
    ShotAttempt, TeamSplits,
};
use crate::lead_stats::{self, LeadStats};
use crate::shot_chart;
use crate::timeline;

/// Per-post character limit of the posting medium.
pub const POST_CHAR_LIMIT: usize = 279;
/// Two injury reports are merged into one segment when they fit together.
const INJURY_MERGE_LIMIT: usize = 278;

const SOURCE_BASE_URL: &str = "https://www.basketball-reference.com/boxscores/pbp";

/// Derive the complete narrative for one finished game. Failures local to
/// one statistic or one shot never abort the rest: missing box scores fall
/// back to a notice segment, an empty timeline reports zero statistics.
pub fn derive_game_narrative(
    game: &ScheduleGame,
    play_by_play: &[PlayByPlayEvent],
    box_lines: &[PlayerGameLine],
    shots: &[ShotAttempt],
    injuries: &[InjuryNote],
) -> GameNarrative {
    let series = timeline::build_timeline(play_by_play);
    let stats = lead_stats::compute_lead_stats(&series);
    let total_minutes = timeline::total_duration_minutes(&series);
    let period_marks = timeline::period_marks(total_minutes);

    let normalized = shot_chart::normalize_shots(shots);
    let chart_points = shot_chart::project_full_court(&normalized);

    let (splits, boards) = if box_lines.is_empty() {
        (None, Vec::new())
    } else {
        (
            Some(box_stats::team_splits(box_lines)),
            box_stats::leaderboards(box_lines),
        )
    };

    let header = header_line(game);
    let segments = compose_segments(game, &header, &stats, splits.as_ref(), &boards, injuries);

    GameNarrative {
        header,
        tie_count: stats.tie_count,
        lead_change_count: stats.lead_change_count,
        largest_lead: stats.largest_lead,
        away_led_minutes: stats.away_led_minutes,
        home_led_minutes: stats.home_led_minutes,
        splits,
        leaderboards: boards,
        shots: chart_points,
        series,
        period_marks,
        segments,
    }
}

/// First line of the first segment; also the duplicate-post search key.
pub fn header_line(game: &ScheduleGame) -> String {
    format!(
        "#{}vs{} {}:{} on {}",
        game.away_abbr(),
        game.home_abbr(),
        game.away_pts,
        game.home_pts,
        game.date
    )
}

/// Assemble the ordered, length-bounded text segments: header + lead
/// statistics, team splits + source link, leaderboards, then injuries.
pub fn compose_segments(
    game: &ScheduleGame,
    header: &str,
    stats: &LeadStats,
    splits: Option<&TeamSplits>,
    boards: &[Leaderboard],
    injuries: &[InjuryNote],
) -> Vec<String> {
    let away_abbr = game.away_abbr();
    let home_abbr = game.home_abbr();
    let mut segments = Vec::new();

    let mut opener = header.to_string();
    opener.push_str(&format!("\nTies: {}", stats.tie_count));
    opener.push_str(&format!("\nLead changes: {}", stats.lead_change_count));
    opener.push_str(&format!("\nLargest lead: {}", stats.largest_lead));
    opener.push_str(&format!(
        "\n{} led: ~{}",
        away_abbr,
        lead_stats::format_minutes(stats.away_led_minutes)
    ));
    opener.push_str(&format!(
        "\n{} led: ~{}",
        home_abbr,
        lead_stats::format_minutes(stats.home_led_minutes)
    ));
    segments.push(truncate_segment(&opener));

    match splits {
        Some(splits) => {
            let mut team_text = splits_text(splits);
            team_text.push_str(&format!("Source & more data: {}", source_link(game)));
            segments.push(truncate_segment(&team_text));

            if !boards.is_empty() {
                segments.push(truncate_segment(&leaderboard_text(boards)));
            }
        }
        None => {
            let mut notice = "Sorry, no box scores for this game.\n".to_string();
            notice.push_str(&format!("Source & more data: {}", source_link(game)));
            segments.push(truncate_segment(&notice));
        }
    }

    segments.extend(injury_segments(game, &away_abbr, &home_abbr, injuries));
    segments
}

fn splits_text(splits: &TeamSplits) -> String {
    let (a, h) = (&splits.away, &splits.home);
    let mut out = String::new();
    out.push_str(&format!(
        "FG: {} of {} / {} of {}\n",
        a.fg_made, a.fg_attempted, h.fg_made, h.fg_attempted
    ));
    out.push_str(&format!(
        "3P: {} of {} / {} of {}\n",
        a.three_made, a.three_attempted, h.three_made, h.three_attempted
    ));
    out.push_str(&format!(
        "FT: {} of {} / {} of {}\n",
        a.ft_made, a.ft_attempted, h.ft_made, h.ft_attempted
    ));
    out.push_str(&format!(
        "DRB: {} of {} / {} of {}\n",
        a.defensive_rebounds,
        a.defensive_rebounds + a.offensive_rebounds,
        h.defensive_rebounds,
        h.defensive_rebounds + h.offensive_rebounds
    ));
    out.push_str(&format!("AST: {} / {}\n", a.assists, h.assists));
    out.push_str(&format!("STL: {} / {}\n", a.steals, h.steals));
    out.push_str(&format!("BLK: {} / {}\n", a.blocks, h.blocks));
    out.push_str(&format!("TOV: {} / {}\n", a.turnovers, h.turnovers));
    out.push_str(&format!("PF: {} / {}\n", a.fouls, h.fouls));
    out
}

fn leaderboard_text(boards: &[Leaderboard]) -> String {
    let mut out = String::new();
    for board in boards {
        let entries: Vec<String> = board
            .top
            .iter()
            .map(|e| format!("{} {}", e.player, e.value))
            .collect();
        out.push_str(&format!("{}: {}\n", board.category.label(), entries.join(", ")));
    }
    out
}

fn injury_segments(
    game: &ScheduleGame,
    away_abbr: &str,
    home_abbr: &str,
    injuries: &[InjuryNote],
) -> Vec<String> {
    let mut team_texts = Vec::new();
    for abbr in [away_abbr, home_abbr] {
        let notes: Vec<&InjuryNote> = injuries
            .iter()
            .filter(|n| n.team.eq_ignore_ascii_case(abbr))
            .filter(|n| n.date.is_none_or(|d| d <= game.date))
            .collect();
        if notes.is_empty() {
            continue;
        }
        let mut text = format!("{abbr}:");
        for note in notes {
            text.push('\n');
            text.push_str(&box_stats::shorten_name(&note.player));
            text.push(' ');
            text.push_str(&note.status);
            if let Some(date) = note.date {
                text.push_str(&format!(" {date}"));
            }
            if !note.description.is_empty() {
                text.push(' ');
                text.push_str(&note.description);
            }
        }
        team_texts.push(text);
    }

    if team_texts.len() == 2 && team_texts[0].len() + team_texts[1].len() <= INJURY_MERGE_LIMIT {
        team_texts = vec![format!("{}\n{}", team_texts[0], team_texts[1])];
    }

    team_texts.iter().map(|t| truncate_segment(t)).collect()
}

fn source_link(game: &ScheduleGame) -> String {
    format!(
        "{}/{}{:02}{:02}0{}.html",
        SOURCE_BASE_URL,
        game.date.year(),
        game.date.month(),
        game.date.day(),
        game.home_abbr()
    )
}

/// Hard-truncate a segment to the posting limit, counting characters so a
/// multi-byte code point is never split.
pub fn truncate_segment(text: &str) -> String {
    match text.char_indices().nth(POST_CHAR_LIMIT) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
