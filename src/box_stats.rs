use crate::game::{
    Leaderboard, LeaderboardEntry, PlayerGameLine, Side, StatCategory, TeamSplits, TeamTotals,
};

const LEADERBOARD_SIZE: usize = 3;

/// Top-3 players per category over both teams. Did-not-play and suspended
/// lines never rank. Ties keep input order: the sort is stable and uses no
/// secondary key.
pub fn leaderboards(lines: &[PlayerGameLine]) -> Vec<Leaderboard> {
    let eligible: Vec<&PlayerGameLine> = lines.iter().filter(|l| l.minutes.played()).collect();

    StatCategory::ALL
        .iter()
        .map(|&category| {
            let mut ranked = eligible.clone();
            ranked.sort_by(|a, b| stat_value(b, category).cmp(&stat_value(a, category)));
            Leaderboard {
                category,
                top: ranked
                    .iter()
                    .take(LEADERBOARD_SIZE)
                    .map(|l| LeaderboardEntry {
                        player: shorten_name(&l.player),
                        value: stat_value(l, category),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn stat_value(line: &PlayerGameLine, category: StatCategory) -> u32 {
    match category {
        StatCategory::Points => line.points,
        StatCategory::Rebounds => line.rebounds,
        StatCategory::Assists => line.assists,
        StatCategory::Steals => line.steals,
        StatCategory::Blocks => line.blocks,
    }
}

/// Per-side aggregate totals, summed over players who actually played.
pub fn team_splits(lines: &[PlayerGameLine]) -> TeamSplits {
    let mut away = TeamTotals::default();
    let mut home = TeamTotals::default();
    for line in lines.iter().filter(|l| l.minutes.played()) {
        let totals = match line.side {
            Side::Away => &mut away,
            Side::Home => &mut home,
        };
        totals.fg_made += line.fg_made;
        totals.fg_attempted += line.fg_attempted;
        totals.three_made += line.three_made;
        totals.three_attempted += line.three_attempted;
        totals.ft_made += line.ft_made;
        totals.ft_attempted += line.ft_attempted;
        totals.offensive_rebounds += line.offensive_rebounds;
        totals.defensive_rebounds += line.defensive_rebounds;
        totals.assists += line.assists;
        totals.steals += line.steals;
        totals.blocks += line.blocks;
        totals.turnovers += line.turnovers;
        totals.fouls += line.fouls;
    }
    TeamSplits { away, home }
}

/// Abbreviate a first name to its initial ("LeBron James" -> "L. James").
/// Short or all-caps first names ("TJ McConnell") are kept as-is.
pub fn shorten_name(name: &str) -> String {
    let mut parts = name.split_whitespace();
    let Some(first) = parts.next() else {
        return String::new();
    };
    let rest: Vec<&str> = parts.collect();

    let abbreviate = first.chars().count() > 2 && first.chars().any(|c| c.is_lowercase());
    let mut out = if abbreviate {
        let initial = first.chars().next().unwrap_or_default();
        format!("{initial}.")
    } else {
        first.to_string()
    };
    for part in rest {
        out.push(' ');
        out.push_str(part);
    }
    out
}
