use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use hoopline::narrative::derive_game_narrative;
use hoopline::recap_export::export_game_workbook;
use hoopline::stats_fetch;

/// Export chart workbooks for one day's finished games without posting.
fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let date = match std::env::args().nth(1) {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date {raw}"))?,
        None => Utc::now().date_naive(),
    };
    let out_dir = std::env::args()
        .nth(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("recaps"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;

    let games = stats_fetch::fetch_schedule(date)?;
    let injuries = stats_fetch::fetch_injury_report().unwrap_or_default();
    let mut exported = 0usize;
    for game in games.iter().filter(|g| g.finished) {
        let play_by_play = stats_fetch::fetch_play_by_play(game).unwrap_or_default();
        let box_lines = stats_fetch::fetch_box_score(game).unwrap_or_default();
        let shots = stats_fetch::fetch_shot_chart(game).unwrap_or_default();
        if play_by_play.is_empty() && box_lines.is_empty() && shots.is_empty() {
            eprintln!(
                "[WARN] No data for {} at {}, skipping",
                game.away_team, game.home_team
            );
            continue;
        }
        let narrative = derive_game_narrative(game, &play_by_play, &box_lines, &shots, &injuries);
        let path = out_dir.join(format!(
            "{}-{}-{}.xlsx",
            game.date,
            game.away_abbr(),
            game.home_abbr()
        ));
        export_game_workbook(&path, game, &narrative)?;
        println!("[INFO] Exported {}", path.display());
        exported += 1;
    }
    println!("[INFO] {exported} workbook(s) for {date}");
    Ok(())
}
