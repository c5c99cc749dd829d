// Terminal command handlers
use crate::domain::duration::DurationWindow;
use crate::presentation::dashboard_view::DashboardView;
use std::io;
use std::ops::ControlFlow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectDuration(DurationWindow),
    ToggleRefresh,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "r" | "refresh" => Some(Self::ToggleRefresh),
            "q" | "quit" | "exit" => Some(Self::Quit),
            other => other.parse().ok().map(Self::SelectDuration),
        }
    }
}

/// Line source for commands; once the input closes it stays pending instead of ending
pub struct CommandInput<R> {
    lines: Option<Lines<R>>,
}

impl<R: AsyncBufRead + Unpin> CommandInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Some(reader.lines()),
        }
    }

    pub async fn next_line(&mut self) -> io::Result<String> {
        if let Some(lines) = self.lines.as_mut() {
            match lines.next_line().await? {
                Some(line) => return Ok(line),
                None => {
                    tracing::info!("command input closed, dashboard keeps running until Ctrl-C");
                    self.lines = None;
                }
            }
        }
        std::future::pending().await
    }
}

/// Apply a command to the view; `Break` ends the session
pub fn handle_command(view: &mut DashboardView, command: Command) -> ControlFlow<()> {
    match command {
        Command::SelectDuration(duration) => {
            if view.set_duration(duration).is_none() {
                tracing::debug!(%duration, "duration window already selected");
            }
        }
        Command::ToggleRefresh => {
            view.auto_refresh().toggle();
        }
        Command::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}
