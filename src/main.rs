use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super_connect_four::config::AppConfig;
use super_connect_four::game::Variant;
use super_connect_four::logging;
use super_connect_four::ui::App;

/// Play Connect Four or Super Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "super_connect_four", about = "Connect Four with a cascading variant")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Game to start with: classic or super
    #[arg(long)]
    variant: Option<String>,

    /// Override the number of grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override the number of grid columns
    #[arg(long)]
    columns: Option<usize>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("rendering default config")?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(variant) = cli.variant.as_deref() {
        config.variant = match variant {
            "classic" => Variant::Classic,
            "super" => Variant::Super,
            other => bail!("unknown variant '{}' (expected 'classic' or 'super')", other),
        };
    }
    if let Some(rows) = cli.rows {
        config.grid.rows = rows;
    }
    if let Some(columns) = cli.columns {
        config.grid.columns = columns;
    }
    config.validate().context("invalid configuration")?;

    logging::init(&config.logging)
        .with_context(|| format!("opening log file {}", config.logging.file.display()))?;
    tracing::info!(variant = ?config.variant, "starting");

    run(&config).context("terminal UI failed")
}

fn run(config: &AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
