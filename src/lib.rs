pub mod box_stats;
pub mod game;
pub mod http_client;
pub mod lead_stats;
pub mod ledger;
pub mod narrative;
pub mod post;
pub mod recap_export;
pub mod sample_game;
pub mod shot_chart;
pub mod stats_fetch;
pub mod timeline;
