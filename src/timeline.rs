use crate::game::{PlayByPlayEvent, TimedEvent};

const REGULATION_PERIOD_MINUTES: f64 = 12.0;
const REGULATION_PERIODS: u32 = 4;
const OVERTIME_MINUTES: f64 = 5.0;

/// Convert the full ordered play-by-play sequence into a single monotonic
/// elapsed-time axis. Within a period the clock counts down; an upward jump
/// marks a period rollover and contributes zero duration. Only decreases in
/// remaining time advance the axis, so the fold needs no period-length
/// table and handles any number of overtimes.
pub fn build_timeline(events: &[PlayByPlayEvent]) -> Vec<TimedEvent> {
    let mut out = Vec::with_capacity(events.len());
    let mut prev_remaining = 0.0_f64;
    let mut elapsed_minutes = 0.0_f64;

    for (idx, event) in events.iter().enumerate() {
        if idx > 0 {
            let delta = (event.remaining_seconds - prev_remaining).min(0.0);
            elapsed_minutes -= delta / 60.0;
        }
        prev_remaining = event.remaining_seconds;
        out.push(TimedEvent {
            elapsed_minutes,
            away_score: event.away_score,
            home_score: event.home_score,
        });
    }

    out
}

/// Total game duration in minutes, as the timeline measures it.
pub fn total_duration_minutes(timeline: &[TimedEvent]) -> f64 {
    timeline.last().map(|e| e.elapsed_minutes).unwrap_or(0.0)
}

/// Nominal period-boundary timestamps for chart annotation: quarter breaks
/// at 12/24/36/48, then one every five minutes per overtime, truncated to
/// the game's actual length.
pub fn period_marks(total_minutes: f64) -> Vec<f64> {
    let mut marks = Vec::new();
    for q in 1..=REGULATION_PERIODS {
        let mark = q as f64 * REGULATION_PERIOD_MINUTES;
        if mark < total_minutes {
            marks.push(mark);
        }
    }
    let regulation_end = REGULATION_PERIODS as f64 * REGULATION_PERIOD_MINUTES;
    let mut mark = regulation_end + OVERTIME_MINUTES;
    while mark < total_minutes {
        marks.push(mark);
        mark += OVERTIME_MINUTES;
    }
    marks
}

/// Coerce a period clock string ("7:42", "11:05.0", stray whitespace) into
/// seconds remaining. Unparseable clocks return None and the caller drops
/// that single row.
pub fn parse_clock_seconds(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    match s.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = parse_float(minutes)?;
            let seconds = parse_float(seconds)?;
            if !(0.0..60.0).contains(&seconds) {
                return None;
            }
            Some(minutes * 60.0 + seconds)
        }
        None => parse_float(s),
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
