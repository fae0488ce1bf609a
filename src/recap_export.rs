use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::game::{GameNarrative, ScheduleGame, Side};

/// Write one game's chart-ready data to an xlsx workbook: the score
/// series with period marks, the projected shot chart, the leaderboards
/// and the team totals. This is the chart renderer's input.
pub fn export_game_workbook(
    path: &Path,
    game: &ScheduleGame,
    narrative: &GameNarrative,
) -> Result<()> {
    let mut workbook = Workbook::new();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Score Series")?;
        write_rows(sheet, &score_series_rows(narrative))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Period Marks")?;
        write_rows(sheet, &period_mark_rows(narrative))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Shot Chart")?;
        write_rows(sheet, &shot_rows(game, narrative))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Leaderboards")?;
        write_rows(sheet, &leaderboard_rows(narrative))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Team Totals")?;
        write_rows(sheet, &totals_rows(game, narrative))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;
    Ok(())
}

fn score_series_rows(narrative: &GameNarrative) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Elapsed Minutes".to_string(),
        "Away Score".to_string(),
        "Home Score".to_string(),
    ]];
    rows.extend(narrative.series.iter().map(|e| {
        vec![
            format!("{:.3}", e.elapsed_minutes),
            e.away_score.to_string(),
            e.home_score.to_string(),
        ]
    }));
    rows
}

fn period_mark_rows(narrative: &GameNarrative) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["Boundary Minute".to_string()]];
    rows.extend(
        narrative
            .period_marks
            .iter()
            .map(|m| vec![format!("{:.1}", m)]),
    );
    rows
}

fn shot_rows(game: &ScheduleGame, narrative: &GameNarrative) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Team".to_string(),
        "Court X".to_string(),
        "Court Y".to_string(),
        "Result".to_string(),
    ]];
    rows.extend(narrative.shots.iter().map(|s| {
        vec![
            match s.side {
                Side::Away => game.away_abbr(),
                Side::Home => game.home_abbr(),
            },
            format!("{:.2}", s.court_x),
            format!("{:.2}", s.court_y),
            if s.made { "make" } else { "miss" }.to_string(),
        ]
    }));
    rows
}

fn leaderboard_rows(narrative: &GameNarrative) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Category".to_string(),
        "Rank".to_string(),
        "Player".to_string(),
        "Value".to_string(),
    ]];
    for board in &narrative.leaderboards {
        for (rank, entry) in board.top.iter().enumerate() {
            rows.push(vec![
                board.category.label().to_string(),
                (rank + 1).to_string(),
                entry.player.clone(),
                entry.value.to_string(),
            ]);
        }
    }
    rows
}

fn totals_rows(game: &ScheduleGame, narrative: &GameNarrative) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Stat".to_string(),
        game.away_abbr(),
        game.home_abbr(),
    ]];
    let Some(splits) = narrative.splits.as_ref() else {
        rows.push(vec![
            "Box score".to_string(),
            "not available".to_string(),
            "not available".to_string(),
        ]);
        return rows;
    };
    let (a, h) = (&splits.away, &splits.home);
    let stat_rows: &[(&str, u32, u32)] = &[
        ("FG", a.fg_made, h.fg_made),
        ("FGA", a.fg_attempted, h.fg_attempted),
        ("3P", a.three_made, h.three_made),
        ("3PA", a.three_attempted, h.three_attempted),
        ("FT", a.ft_made, h.ft_made),
        ("FTA", a.ft_attempted, h.ft_attempted),
        ("ORB", a.offensive_rebounds, h.offensive_rebounds),
        ("DRB", a.defensive_rebounds, h.defensive_rebounds),
        ("AST", a.assists, h.assists),
        ("STL", a.steals, h.steals),
        ("BLK", a.blocks, h.blocks),
        ("TOV", a.turnovers, h.turnovers),
        ("PF", a.fouls, h.fouls),
    ];
    rows.extend(
        stat_rows
            .iter()
            .map(|(label, away, home)| {
                vec![label.to_string(), away.to_string(), home.to_string()]
            }),
    );
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
