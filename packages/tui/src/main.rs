use clap::Parser;
use crossterm::{execute, terminal};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;

use tarefas_tui::App;

#[derive(Parser)]
#[command(name = "tarefas-tui", about = "Terminal frontend for the tarefas service", version)]
struct Cli {
    /// Base URL of the tarefas server
    #[arg(long, default_value = "http://localhost:3001")]
    server_url: String,

    /// Log file path; stdout belongs to the alternate screen
    #[arg(long, default_value = "tarefas-tui.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let guard = init_logging(&cli.log_file);

    let mut app = App::new(cli.server_url);

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Always restore the terminal, even if the app failed
    let cleanup = (|| -> anyhow::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        Ok(())
    })();

    if let Err(cleanup_error) = cleanup {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }

    // Flush the log writer before exiting
    drop(guard);

    if let Err(e) = result {
        eprintln!("TUI application error: {}", e);
        std::process::exit(1);
    }

    // The input poll loop never reaches an await point, so a plain return
    // would leave the runtime waiting on it; force the exit
    std::process::exit(0);
}

/// Route tracing output to a file; the terminal itself belongs to ratatui.
fn init_logging(path: &Path) -> Option<WorkerGuard> {
    let log_dir = path.parent()?;
    let file_name = path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
