//! Terminal rendering for date-ask.
//!
//! Extension traits and helpers that turn core types into colored text
//! with owo_colors.

use chrono::{Datelike, NaiveDate, Weekday};
use date_ask_core::calendar::MonthBounds;
use date_ask_core::controller::{Controller, Viewport};
use date_ask_core::record::ResponseRecord;
use date_ask_core::reluctance::Reluctance;
use owo_colors::OwoColorize;

pub const QUESTION: &str = "Will you go on a date with me?";
pub const SUBTITLE: &str = "(no pressure, just vibes)";
pub const CELEBRATION: &str = "Yaaaaay! 🎉🌹";
pub const THANKS: &str = "Thanks! Pick a date and we'll lock it in.";

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ResponseRecord {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let answer = if self.accepted {
            "Yes".green().bold().to_string()
        } else {
            "No".red().to_string()
        };
        lines.push(format!("  Answer: {}", answer));

        if let Some(at) = self.decided_at {
            lines.push(format!("  {}", format!("Decided {}", at.format("%Y-%m-%d %H:%M UTC")).dimmed()));
        }

        lines.push(format!("  Date:   {}", render_date(self.chosen_date)));
        lines.push(format!("  Type:   {}", self.activity));

        match self.confirmed_at {
            Some(at) => lines.push(format!(
                "  {}",
                format!("Confirmed {}", at.format("%Y-%m-%d %H:%M UTC")).green()
            )),
            None if self.is_confirmed() => lines.push(format!("  {}", "Confirmed".green())),
            None => lines.push(format!("  {}", "Not confirmed yet".yellow())),
        }

        lines.join("\n")
    }
}

impl Render for Controller {
    /// The summary panel shown while scheduling.
    fn render(&self) -> String {
        let mut lines = vec![
            "Summary".bold().to_string(),
            format!("  {}", render_date(self.chosen_date())),
            format!("  Type: {}", self.activity()),
        ];

        if self.is_confirmed() {
            lines.push(String::new());
            lines.push("All set! It's saved on this machine.".green().bold().to_string());
            if self.has_remote() {
                lines.push("A copy was sent to the remote store.".dimmed().to_string());
            }
        }

        lines.join("\n")
    }
}

fn render_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%a %b %e %Y").to_string(),
        None => "No date selected".dimmed().to_string(),
    }
}

/// Padding on each side of "YES". Grows one column per unit of reluctance.
fn yes_padding(reluctance: Reluctance) -> usize {
    reluctance.magnitude().round() as usize
}

pub fn yes_button(reluctance: Reluctance) -> String {
    let pad = " ".repeat(yes_padding(reluctance) + 1);
    format!("{pad}YES{pad}").on_magenta().white().bold().to_string()
}

pub fn no_button() -> String {
    " NO ".on_white().black().to_string()
}

/// Blank rows between the two answers. None until the first decline.
pub fn spacer_rows(reluctance: Reluctance) -> usize {
    (reluctance.gap() - Reluctance::new().gap()).round() as usize
}

/// `CELEBRATION` centered in the celebration area.
pub fn celebration_banner(viewport: Option<Viewport>) -> String {
    let text = CELEBRATION.bold().to_string();
    let Some(viewport) = viewport else {
        return text;
    };

    // Leave room for the spinner frames on either side.
    let visible = CELEBRATION.chars().count() + 6;
    let indent = (viewport.width as usize).saturating_sub(visible) / 2;
    format!("{}{}", " ".repeat(indent), text)
}

/// A Monday-first grid of the bounded month with the chosen day highlighted.
pub fn month_grid(bounds: MonthBounds, chosen: Option<NaiveDate>, today: NaiveDate) -> String {
    let first = bounds.first();
    let mut lines = vec![
        format!("{:^20}", first.format("%B %Y").to_string()).bold().to_string(),
        "Mo Tu We Th Fr Sa Su".dimmed().to_string(),
    ];

    let mut row = "   ".repeat(first.weekday().num_days_from_monday() as usize);
    for day in bounds.days() {
        let cell = format!("{:>2}", day.day());
        let cell = if Some(day) == chosen {
            cell.on_magenta().white().bold().to_string()
        } else if day == today {
            cell.underline().to_string()
        } else {
            cell
        };
        row.push_str(&cell);

        if day.weekday() == Weekday::Sun {
            lines.push(row.trim_end().to_string());
            row = String::new();
        } else {
            row.push(' ');
        }
    }
    if !row.trim().is_empty() {
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}
