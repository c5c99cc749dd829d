// Plain-text rendition of the dashboard page
use crate::domain::duration::DurationWindow;
use crate::domain::status::ColorToken;
use crate::presentation::dashboard_view::{DashboardPage, EXPERIMENTAL_NOTICE};
use crate::presentation::grouped_list::{StatusPanel, Transition};
use std::fmt::Write;

pub struct TextRenderer {
    base_url: Option<String>,
    color: bool,
}

impl TextRenderer {
    pub fn new(base_url: Option<String>, color: bool) -> Self {
        Self {
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
            color,
        }
    }

    /// Empty output while there is no page
    pub fn render(&self, page: Option<&DashboardPage>) -> String {
        let mut out = String::new();
        if let Some(page) = page {
            // Writing into a String cannot fail
            let _ = self.write_page(&mut out, page);
        }
        out
    }

    fn write_page(&self, out: &mut String, page: &DashboardPage) -> std::fmt::Result {
        writeln!(out, "Dashboard")?;
        writeln!(
            out,
            "Window: {}   Auto-refresh: {}",
            window_selector(page.duration),
            if page.auto_refresh { "on" } else { "off" }
        )?;
        writeln!(out)?;

        writeln!(out, "Task Instances")?;
        for panel in &page.task_instances {
            self.write_panel(out, panel)?;
        }
        writeln!(out)?;

        writeln!(out, "Dag Runs")?;
        for panel in &page.dag_runs {
            self.write_panel(out, panel)?;
        }
        writeln!(out)?;

        writeln!(out, "{}", EXPERIMENTAL_NOTICE)
    }

    fn write_panel(&self, out: &mut String, panel: &StatusPanel) -> std::fmt::Result {
        writeln!(out, "== {} ==", self.paint(&panel.title(), panel.accent))?;

        for card in &panel.cards {
            let marker = match card.transition {
                Transition::Entering => '+',
                Transition::Steady => '|',
            };
            writeln!(
                out,
                "{} {}  <{}>",
                self.paint(&marker.to_string(), panel.accent),
                card.title.label,
                self.href(&card.title.href)
            )?;
            for field in &card.fields {
                match &field.href {
                    Some(href) => writeln!(
                        out,
                        "    {} : {}  <{}>",
                        field.caption,
                        field.value,
                        self.href(href)
                    )?,
                    None => writeln!(out, "    {} : {}", field.caption, field.value)?,
                }
            }
        }

        for key in &panel.exiting {
            writeln!(out, "- {} (gone)", key.as_str())?;
        }
        Ok(())
    }

    fn href(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}", base, path),
            None => path.to_string(),
        }
    }

    fn paint(&self, text: &str, accent: Option<ColorToken>) -> String {
        match accent {
            Some(token) if self.color => format!("\x1b[{}m{}\x1b[0m", token.ansi_code(), text),
            _ => text.to_string(),
        }
    }
}

fn window_selector(selected: DurationWindow) -> String {
    DurationWindow::ALL
        .iter()
        .map(|d| {
            if *d == selected {
                format!("<{}h>", d)
            } else {
                format!("[{}h]", d)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
