// Main entry point - Dependency injection and the terminal loop
use std::io::{IsTerminal, Write};
use std::ops::ControlFlow;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tokio::io::BufReader;

use dag_dashboard::application::auto_refresh::AutoRefresh;
use dag_dashboard::application::dashboard_query::DashboardQuery;
use dag_dashboard::infrastructure::config::load_dashboard_config;
use dag_dashboard::infrastructure::http_repository::HttpSummaryRepository;
use dag_dashboard::infrastructure::telemetry::init_tracing;
use dag_dashboard::presentation::dashboard_view::DashboardView;
use dag_dashboard::presentation::handlers::{handle_command, Command, CommandInput};
use dag_dashboard::presentation::terminal::TextRenderer;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Load configuration
    let config = load_dashboard_config().context("failed to load dashboard configuration")?;
    let duration = config.dashboard.duration()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(
        HttpSummaryRepository::new(&config.backend.base_url, config.backend.timeout())
            .context("failed to build HTTP client")?,
    );

    // Create query and refresh controller (application layer)
    let query = DashboardQuery::new(repository, duration);
    let auto_refresh = AutoRefresh::new(config.auto_refresh.to_settings());

    // Build view (presentation layer)
    let interactive = std::io::stdout().is_terminal();
    let renderer = TextRenderer::new(Some(config.backend.base_url.clone()), interactive);
    let mut view = DashboardView::new(query.clone(), auto_refresh.clone());
    let mut query_updates = query.subscribe();
    let mut refresh_updates = auto_refresh.subscribe();

    tracing::info!(
        backend = %config.backend.base_url,
        "dashboard started; commands: 1 | 8 | 24 select a window, r toggles auto-refresh, q quits"
    );
    let _initial_fetch = view.mount();

    let mut commands = CommandInput::new(BufReader::new(tokio::io::stdin()));
    loop {
        tokio::select! {
            changed = query_updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = query_updates.borrow_and_update().clone();
                tracing::debug!(
                    duration = %snapshot.duration,
                    loading = snapshot.is_loading,
                    error = snapshot.is_error,
                    fetches = snapshot.fetch_count,
                    "dashboard state updated"
                );
            }
            changed = refresh_updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            line = commands.next_line() => {
                let line = line.context("failed to read command")?;
                match Command::parse(&line) {
                    Some(command) => {
                        if let ControlFlow::Break(()) = handle_command(&mut view, command) {
                            break;
                        }
                    }
                    None => tracing::warn!(input = %line.trim(), "unknown command"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }

        let page = view.render(Utc::now());
        let mut stdout = std::io::stdout().lock();
        if interactive {
            write!(stdout, "{}", CLEAR_SCREEN)?;
        }
        write!(stdout, "{}", renderer.render(page.as_ref()))?;
        stdout.flush()?;
    }

    view.unmount();
    Ok(())
}
