use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use rayon::prelude::*;

use hoopline::game::{GameNarrative, InjuryNote, ScheduleGame};
use hoopline::ledger::PostLedger;
use hoopline::narrative::derive_game_narrative;
use hoopline::post::{self, PostConfig};
use hoopline::recap_export::export_game_workbook;
use hoopline::sample_game::sample_game;
use hoopline::stats_fetch;

struct Options {
    date: Option<NaiveDate>,
    sample: bool,
    no_post: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let options = parse_options()?;
    let out_dir = out_dir();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;

    if options.sample {
        return run_sample(&options, &out_dir);
    }

    let dates = recap_dates(options.date);
    let mut games: Vec<ScheduleGame> = Vec::new();
    for date in &dates {
        match stats_fetch::fetch_schedule(*date) {
            Ok(day) => games.extend(day.into_iter().filter(|g| g.finished)),
            Err(err) => eprintln!("[WARN] Schedule fetch for {date} failed: {err}"),
        }
    }
    if games.is_empty() {
        println!("[INFO] No finished games in the requested window");
        return Ok(());
    }

    let injuries = match stats_fetch::fetch_injury_report() {
        Ok(report) => report,
        Err(err) => {
            eprintln!("[WARN] Injury report fetch failed: {err}");
            Vec::new()
        }
    };

    // Each game is an independent pure derivation; fan out, then post
    // sequentially so the thread order and the dedup check stay sane.
    let narratives: Vec<(ScheduleGame, GameNarrative)> = games
        .par_iter()
        .filter_map(|game| derive_one(game, &injuries).map(|narrative| (game.clone(), narrative)))
        .collect();

    for (game, narrative) in &narratives {
        let path = workbook_path(&out_dir, game);
        if let Err(err) = export_game_workbook(&path, game, narrative) {
            eprintln!("[WARN] Export failed for {}: {err}", narrative.header);
        } else {
            println!("[INFO] Exported {}", path.display());
        }
    }

    if options.no_post {
        println!("[INFO] Posting disabled (--no-post)");
        return Ok(());
    }
    let cfg = match PostConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            println!("[INFO] Posting skipped: {err}");
            return Ok(());
        }
    };
    let ledger = PostLedger::open_default()?;
    for (game, narrative) in &narratives {
        post_one(&cfg, &ledger, &out_dir, game, narrative);
    }
    Ok(())
}

fn run_sample(options: &Options, out_dir: &Path) -> Result<()> {
    let date = options.date.unwrap_or_else(|| Utc::now().date_naive());
    let sample = sample_game(date);
    let narrative = derive_game_narrative(
        &sample.game,
        &sample.play_by_play,
        &sample.box_lines,
        &sample.shots,
        &sample.injuries,
    );
    let path = workbook_path(out_dir, &sample.game);
    export_game_workbook(&path, &sample.game, &narrative)?;
    println!("[INFO] Exported {}", path.display());
    for segment in &narrative.segments {
        println!("---\n{segment}");
    }
    Ok(())
}

/// Derive one game's narrative; None when the provider has nothing at all
/// for the game. Partial data (no box score, no shots) still derives.
fn derive_one(game: &ScheduleGame, injuries: &[InjuryNote]) -> Option<GameNarrative> {
    let play_by_play = stats_fetch::fetch_play_by_play(game).unwrap_or_else(|err| {
        eprintln!("[WARN] Play-by-play fetch failed for {}: {err}", game.home_team);
        Vec::new()
    });
    let box_lines = stats_fetch::fetch_box_score(game).unwrap_or_else(|err| {
        eprintln!("[WARN] Box score fetch failed for {}: {err}", game.home_team);
        Vec::new()
    });
    let shots = stats_fetch::fetch_shot_chart(game).unwrap_or_else(|err| {
        eprintln!("[WARN] Shot chart fetch failed for {}: {err}", game.home_team);
        Vec::new()
    });

    if play_by_play.is_empty() && box_lines.is_empty() && shots.is_empty() {
        eprintln!(
            "[WARN] No data at all for {} at {}, skipping",
            game.away_team, game.home_team
        );
        return None;
    }
    Some(derive_game_narrative(
        game,
        &play_by_play,
        &box_lines,
        &shots,
        injuries,
    ))
}

fn post_one(
    cfg: &PostConfig,
    ledger: &PostLedger,
    out_dir: &Path,
    game: &ScheduleGame,
    narrative: &GameNarrative,
) {
    let key = narrative.header.as_str();
    match ledger.was_posted(key) {
        Ok(true) => {
            println!("[INFO] {key} already posted (ledger)");
            return;
        }
        Ok(false) => {}
        Err(err) => eprintln!("[WARN] Ledger lookup failed: {err}"),
    }
    match post::already_posted(cfg, key) {
        Ok(true) => {
            println!("[INFO] {key} already posted (remote)");
            let _ = ledger.mark_posted(key);
            return;
        }
        Ok(false) => {}
        Err(err) => eprintln!("[WARN] Duplicate search failed: {err}"),
    }

    // A chart renderer may have dropped images next to the workbook; the
    // first two segments carry them when present.
    let stem = workbook_stem(game);
    let scores_png = out_dir.join(format!("{stem}-scores.png"));
    let shots_png = out_dir.join(format!("{stem}-shots.png"));
    let media: Vec<&Path> = vec![scores_png.as_path(), shots_png.as_path()];

    match post::post_thread(cfg, &narrative.segments, &media) {
        Ok(()) => {
            println!("[INFO] Posted {key}");
            if let Err(err) = ledger.mark_posted(key) {
                eprintln!("[WARN] Ledger update failed: {err}");
            }
        }
        Err(err) => eprintln!("[WARN] Posting failed for {key}: {err}"),
    }
}

fn parse_options() -> Result<Options> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = Options {
        date: None,
        sample: false,
        no_post: false,
    };
    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--date" => {
                let raw = args
                    .get(idx + 1)
                    .context("--date requires a YYYY-MM-DD value")?;
                options.date = Some(
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .with_context(|| format!("invalid date {raw}"))?,
                );
                idx += 1;
            }
            "--sample" => options.sample = true,
            "--no-post" => options.no_post = true,
            other => anyhow::bail!("unknown argument {other}"),
        }
        idx += 1;
    }
    Ok(options)
}

/// With an explicit date, recap that day only; otherwise the last few
/// days, so games finished since the previous run are picked up.
fn recap_dates(date: Option<NaiveDate>) -> Vec<NaiveDate> {
    if let Some(date) = date {
        return vec![date];
    }
    let window_days = env::var("RECAP_WINDOW_DAYS")
        .ok()
        .and_then(|val| val.parse::<i64>().ok())
        .unwrap_or(3)
        .clamp(1, 14);
    let today = Utc::now().date_naive();
    (0..window_days)
        .map(|back| today - ChronoDuration::days(back))
        .collect()
}

fn out_dir() -> PathBuf {
    env::var("RECAP_OUT_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("recaps"))
}

fn workbook_stem(game: &ScheduleGame) -> String {
    format!("{}-{}-{}", game.date, game.away_abbr(), game.home_abbr())
}

fn workbook_path(out_dir: &Path, game: &ScheduleGame) -> PathBuf {
    out_dir.join(format!("{}.xlsx", workbook_stem(game)))
}
