use crate::game::TimedEvent;

/// The five scalar lead statistics for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LeadStats {
    pub tie_count: u32,
    pub lead_change_count: u32,
    pub largest_lead: u32,
    pub away_led_minutes: f64,
    pub home_led_minutes: f64,
    pub tied_minutes: f64,
}

pub fn compute_lead_stats(timeline: &[TimedEvent]) -> LeadStats {
    LeadStats {
        tie_count: tie_count(timeline),
        lead_change_count: lead_change_count(timeline),
        largest_lead: largest_lead(timeline),
        ..time_leading(timeline)
    }
}

/// Ties: unchanged score pairs are not re-counted, and the 0-0 opening
/// state is excluded via the away_score > 0 filter.
fn tie_count(timeline: &[TimedEvent]) -> u32 {
    let mut count = 0;
    let mut prev_pair: Option<(u32, u32)> = None;
    for event in timeline {
        let pair = (event.away_score, event.home_score);
        if prev_pair == Some(pair) {
            continue;
        }
        prev_pair = Some(pair);
        if event.away_score == event.home_score && event.away_score > 0 {
            count += 1;
        }
    }
    count
}

/// Lead changes: tied scores carry no lead information and are skipped, so
/// a change is a sign flip between consecutive non-zero lead values.
fn lead_change_count(timeline: &[TimedEvent]) -> u32 {
    let mut count = 0;
    let mut prev_home_leading: Option<bool> = None;
    for event in timeline {
        let lead = event.away_score as i64 - event.home_score as i64;
        if lead == 0 {
            continue;
        }
        let home_leading = lead < 0;
        if let Some(prev) = prev_home_leading {
            if prev != home_leading {
                count += 1;
            }
        }
        prev_home_leading = Some(home_leading);
    }
    count
}

fn largest_lead(timeline: &[TimedEvent]) -> u32 {
    timeline
        .iter()
        .map(|e| (e.away_score as i64 - e.home_score as i64).unsigned_abs() as u32)
        .max()
        .unwrap_or(0)
}

/// Attribute each inter-event interval to the side leading at its closing
/// event; level intervals go to neither side. The three buckets sum to the
/// total elapsed duration.
fn time_leading(timeline: &[TimedEvent]) -> LeadStats {
    let mut stats = LeadStats::default();
    for pair in timeline.windows(2) {
        let duration = pair[1].elapsed_minutes - pair[0].elapsed_minutes;
        let closing = &pair[1];
        if closing.away_score > closing.home_score {
            stats.away_led_minutes += duration;
        } else if closing.home_score > closing.away_score {
            stats.home_led_minutes += duration;
        } else {
            stats.tied_minutes += duration;
        }
    }
    stats
}

/// Render fractional minutes as "MM:SS" for the narrative text.
pub fn format_minutes(minutes: f64) -> String {
    let total_seconds = (minutes * 60.0).round().max(0.0) as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
