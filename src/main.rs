use atlas::core::config::{self, CliOverrides};
use atlas::core::theme::Theme;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Parser)]
#[command(name = "atlas", about = "Browse countries of the world in your terminal")]
struct Args {
    /// Open this country directly (exact common name, e.g. "France")
    country: Option<String>,

    /// Starting theme
    #[arg(short, long, value_enum)]
    theme: Option<ThemeArg>,

    /// REST Countries base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger first so config loading is logged too.
    // It accepts everything; the resolved level is applied below.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }
    log::set_max_level(config::DEFAULT_LOG_LEVEL);

    let file_config = match config::load_config() {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Warning: {e}; using defaults");
            log::warn!("Config unusable, using defaults: {}", e);
            None
        }
    };
    let cli = CliOverrides {
        theme: args.theme.map(Theme::from),
        base_url: args.base_url,
        country: args.country,
    };
    let resolved = config::resolve(&file_config.unwrap_or_default(), &cli);
    log::set_max_level(resolved.log_level);

    log::info!(
        "Atlas starting up: base_url={}, theme={:?}",
        resolved.base_url,
        resolved.theme
    );

    atlas::tui::run(resolved)
}
