use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One schedule row as the provider reports it. Only finished games are
/// picked up for recap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleGame {
    pub date: NaiveDate,
    pub away_team: String,
    pub home_team: String,
    pub away_pts: u32,
    pub home_pts: u32,
    pub finished: bool,
}

impl ScheduleGame {
    pub fn away_abbr(&self) -> String {
        team_abbr(&self.away_team)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_abbr(&self.away_team))
    }

    pub fn home_abbr(&self) -> String {
        team_abbr(&self.home_team)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_abbr(&self.home_team))
    }
}

/// One play-by-play row. The clock counts down within a period; scores are
/// cumulative and non-decreasing across the ordered sequence (upstream
/// guarantee, not re-validated here).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayByPlayEvent {
    pub period: u32,
    pub remaining_seconds: f64,
    pub away_score: u32,
    pub home_score: u32,
}

/// A play-by-play row moved onto the single monotonic elapsed-time axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimedEvent {
    pub elapsed_minutes: f64,
    pub away_score: u32,
    pub home_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Away,
    Home,
}

/// One shot attempt in raw provider units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotAttempt {
    pub side: Side,
    pub x: f64,
    pub y: f64,
    pub point_value: u32,
    pub made: bool,
}

/// A shot attempt rescaled onto the canonical half-court axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedShot {
    pub side: Side,
    pub x: f64,
    pub y: f64,
    pub point_value: u32,
    pub made: bool,
}

/// A shot projected onto the 94x50 full court for chart rendering. Away
/// shots land on the left half, home shots mirrored onto the right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotChartPoint {
    pub side: Side,
    pub court_x: f64,
    pub court_y: f64,
    pub made: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinutesFlag {
    Played(String),
    DidNotPlay,
    Suspended,
}

impl MinutesFlag {
    pub fn played(&self) -> bool {
        matches!(self, MinutesFlag::Played(_))
    }
}

/// One player's box-score line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerGameLine {
    pub player: String,
    pub side: Side,
    pub minutes: MinutesFlag,
    pub points: u32,
    pub rebounds: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_made: u32,
    pub three_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
}

/// Aggregate counting stats for one side, summed over players who played.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamTotals {
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_made: u32,
    pub three_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSplits {
    pub away: TeamTotals,
    pub home: TeamTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    pub category: StatCategory,
    pub top: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatCategory {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
}

impl StatCategory {
    pub const ALL: [StatCategory; 5] = [
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
        StatCategory::Steals,
        StatCategory::Blocks,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatCategory::Points => "PTS",
            StatCategory::Rebounds => "TRB",
            StatCategory::Assists => "AST",
            StatCategory::Steals => "STL",
            StatCategory::Blocks => "BLK",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryNote {
    pub team: String,
    pub player: String,
    pub status: String,
    pub date: Option<NaiveDate>,
    pub description: String,
}

/// Everything derived for one finished game. Pure output, no identity
/// beyond the game it summarizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameNarrative {
    pub header: String,
    pub tie_count: u32,
    pub lead_change_count: u32,
    pub largest_lead: u32,
    pub away_led_minutes: f64,
    pub home_led_minutes: f64,
    pub splits: Option<TeamSplits>,
    pub leaderboards: Vec<Leaderboard>,
    pub shots: Vec<ShotChartPoint>,
    pub series: Vec<TimedEvent>,
    pub period_marks: Vec<f64>,
    pub segments: Vec<String>,
}

const TEAM_ABBRS: &[(&str, &str)] = &[
    ("Atlanta Hawks", "ATL"),
    ("Boston Celtics", "BOS"),
    ("Brooklyn Nets", "BRK"),
    ("Charlotte Hornets", "CHO"),
    ("Chicago Bulls", "CHI"),
    ("Cleveland Cavaliers", "CLE"),
    ("Dallas Mavericks", "DAL"),
    ("Denver Nuggets", "DEN"),
    ("Detroit Pistons", "DET"),
    ("Golden State Warriors", "GSW"),
    ("Houston Rockets", "HOU"),
    ("Indiana Pacers", "IND"),
    ("Los Angeles Clippers", "LAC"),
    ("Los Angeles Lakers", "LAL"),
    ("Memphis Grizzlies", "MEM"),
    ("Miami Heat", "MIA"),
    ("Milwaukee Bucks", "MIL"),
    ("Minnesota Timberwolves", "MIN"),
    ("New Orleans Pelicans", "NOP"),
    ("New York Knicks", "NYK"),
    ("Oklahoma City Thunder", "OKC"),
    ("Orlando Magic", "ORL"),
    ("Philadelphia 76ers", "PHI"),
    ("Phoenix Suns", "PHO"),
    ("Portland Trail Blazers", "POR"),
    ("Sacramento Kings", "SAC"),
    ("San Antonio Spurs", "SAS"),
    ("Toronto Raptors", "TOR"),
    ("Utah Jazz", "UTA"),
    ("Washington Wizards", "WAS"),
];

pub fn team_abbr(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    TEAM_ABBRS
        .iter()
        .find(|(full, _)| full.eq_ignore_ascii_case(needle))
        .map(|(_, abbr)| *abbr)
}

fn fallback_abbr(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}
