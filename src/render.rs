//! Terminal rendering for whow types.
//!
//! Extension traits that add colored output to whow-core types using
//! owo_colors, plus the dashboard section layouts.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use owo_colors::{AnsiColors, OwoColorize};
use unicode_width::UnicodeWidthStr;
use whow_core::category::Category;
use whow_core::color::Color;
use whow_core::config::{Section, TimeFormat, WhowConfig};
use whow_core::dashboard::Dashboard;
use whow_core::event::EventEntry;
use whow_core::todo::TodoEntry;

use crate::utils::term;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CALENDAR_WIDTH: usize = 27;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        format!("[{}]", self.name).color(ansi(self.color)).bold().to_string()
    }
}

impl Render for Color {
    fn render(&self) -> String {
        self.name().color(ansi(*self)).to_string()
    }
}

fn ansi(color: Color) -> AnsiColors {
    match color {
        Color::Black => AnsiColors::Black,
        Color::Red => AnsiColors::Red,
        Color::Green => AnsiColors::Green,
        Color::Yellow => AnsiColors::Yellow,
        Color::Blue => AnsiColors::Blue,
        Color::Magenta => AnsiColors::Magenta,
        Color::Cyan => AnsiColors::Cyan,
        Color::White => AnsiColors::White,
    }
}

/// Dashboard rendering, one section at a time.
pub trait DashboardRender {
    fn render_section(&self, section: Section, config: &WhowConfig, width: usize) -> Vec<String>;
}

impl DashboardRender for Dashboard {
    fn render_section(&self, section: Section, config: &WhowConfig, width: usize) -> Vec<String> {
        match section {
            Section::Separator => vec![separator(config)],
            Section::DateTime => vec![datetime_banner(self.now, config)],
            Section::Calendar => calendar(self),
            Section::Todos => todo_list(self, "To-Do's", &self.regular_todos(), width),
            Section::Important => todo_list(self, "Important", &self.important_todos(), width),
            Section::Events => event_list(self, config, width),
        }
    }
}

pub fn separator(config: &WhowConfig) -> String {
    let c = match config.default_separator.as_str() {
        "line" => "-",
        "equals" => "=",
        "tilde" => "~",
        _ => return String::new(),
    };
    c.repeat(config.separator_length)
}

fn datetime_banner(now: NaiveDateTime, config: &WhowConfig) -> String {
    let (calendar_emoji, clock_emoji) = if config.enable_emojis {
        ("📅 ", "🕓 ")
    } else {
        ("", "")
    };

    let date = format!(" {}{} ", calendar_emoji, now.format("%A, %B %d %Y"));
    let time = format!(
        " {}{} ",
        clock_emoji,
        now.format(config.time_format.pattern(true))
    );

    format!(
        "{} {} {}",
        "Today is".bold(),
        date.on_blue().bold(),
        time.on_magenta().bold()
    )
}

/// Weeks of the month holding `date`, Sunday first. Each cell is a day of the
/// month or empty.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let Some(first) = date.with_day(1) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut week = [None; 7];

    for day in first.iter_days().take_while(|d| d.month() == first.month()) {
        let column = day.weekday().num_days_from_sunday() as usize;
        week[column] = Some(day.day());

        if column == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }

    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }

    weeks
}

fn calendar(dashboard: &Dashboard) -> Vec<String> {
    let today = dashboard.today();
    let marked = dashboard.days_with_events(today.year(), today.month());

    let mut lines = vec![
        term::center(&today.format("%B %Y").to_string(), CALENDAR_WIDTH)
            .bold()
            .to_string(),
        WEEKDAYS.join(" ").bold().to_string(),
    ];

    for week in month_grid(today) {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "   ".to_string(),
                Some(day) => {
                    let text = format!("{:>3}", day);
                    match (*day == today.day(), marked.contains(day)) {
                        (true, true) => text.reversed().underline().to_string(),
                        (true, false) => text.reversed().to_string(),
                        (false, true) => text.underline().to_string(),
                        (false, false) => text,
                    }
                }
            })
            .collect();
        lines.push(cells.join(" "));
    }

    lines
}

/// `[a] [b] ` for the categories a record refers to, with its plain width.
fn category_tags(dashboard: &Dashboard, names: &[String]) -> (String, usize) {
    let mut rendered = String::new();
    let mut width = 0;

    for name in names {
        let tag = match dashboard.category(name) {
            Some(category) => category.render(),
            None => format!("[{}]", name).bold().to_string(),
        };
        rendered.push_str(&tag);
        rendered.push(' ');
        width += name.width() + 3;
    }

    (rendered, width)
}

fn todo_list(dashboard: &Dashboard, title: &str, todos: &[&TodoEntry], width: usize) -> Vec<String> {
    let mut lines = vec![title.bold().to_string()];

    if todos.is_empty() {
        lines.push(format!(" {}", "Nothing to do".dimmed()));
        return lines;
    }

    lines.extend(todos.iter().map(|todo| todo_line(dashboard, todo, width)));
    lines
}

fn todo_line(dashboard: &Dashboard, todo: &TodoEntry, width: usize) -> String {
    let index = format!("#{}", todo.index);
    let (tags, tags_width) = category_tags(dashboard, &todo.categories);
    let due = todo
        .due
        .map(|due| format!(" (due {})", due.format("%Y-%m-%d")))
        .unwrap_or_default();

    let fixed = 1 + index.width() + 1 + tags_width + due.width();
    let name = term::fit(&todo.name, width.saturating_sub(fixed));

    let name = if todo.ticked {
        name.strikethrough().dimmed().to_string()
    } else {
        name
    };
    let due = if todo.overdue {
        due.red().to_string()
    } else {
        due.dimmed().to_string()
    };

    format!(" {} {}{}{}", index.bold(), tags, name, due)
}

fn event_list(dashboard: &Dashboard, config: &WhowConfig, width: usize) -> Vec<String> {
    let mut lines = vec!["Events".bold().to_string()];

    if dashboard.events.is_empty() {
        lines.push(format!(" {}", "No events".dimmed()));
        return lines;
    }

    for event in &dashboard.events {
        let index = format!("#{}", event.index);
        let (tags, tags_width) = category_tags(dashboard, &event.categories);
        let when = format!(" {}", event_span(event, config.time_format));

        let fixed = 1 + index.width() + 1 + tags_width + when.width();
        let name = term::fit(&event.name, width.saturating_sub(fixed));

        let name = if event.is_past(dashboard.now) {
            name.dimmed().to_string()
        } else {
            name
        };

        lines.push(format!(" {} {}{}{}", index.bold(), tags, name, when.dimmed()));

        if !event.description.is_empty() {
            let description = term::fit(&event.description, width.saturating_sub(4));
            lines.push(format!("    {}", description.italic()));
        }
    }

    lines
}

/// `Fri May 01 9:00 AM → 10:30 AM`, `Fri May 01, all day`.
pub fn event_span(event: &EventEntry, time_format: TimeFormat) -> String {
    let day = "%a %b %d";
    let time = time_format.pattern(false);

    match event.end {
        None => format!("{}, all day", event.start.format(day)),
        Some(end) if end.date() == event.start.date() => format!(
            "{} {} → {}",
            event.start.format(day),
            event.start.format(time),
            end.format(time)
        ),
        Some(end) => format!(
            "{} {} → {} {}",
            event.start.format(day),
            event.start.format(time),
            end.format(day),
            end.format(time)
        ),
    }
}
