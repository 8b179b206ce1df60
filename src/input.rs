//! Parsing of free-form command line input: `@category` words, due dates and
//! event times.
//!
//! Structured formats (`2026-03-20`, `20/03/2026`, `Mar 20 2026 6:00 PM`) are
//! tried first; anything else goes through fuzzydate (`tomorrow 6pm`).

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use whow_core::dates;

/// End value for an event lasting the whole day.
pub const FULL_DAY: &str = "fullday";

/// Split trailing words into free text and `@category` references.
pub fn split_categories(words: &[String]) -> (Vec<String>, Vec<String>) {
    let mut text = Vec::new();
    let mut categories = Vec::new();

    for word in words {
        match word.strip_prefix('@') {
            Some(name) if !name.is_empty() => categories.push(name.to_string()),
            _ => text.push(word.clone()),
        }
    }

    (text, categories)
}

pub fn parse_due(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = dates::parse_date(input) {
        return Ok(date);
    }

    fuzzy(input).map(|dt| dt.date())
}

/// Parse an event start. A bare date starts at midnight.
pub fn parse_start(input: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = dates::parse_datetime(input) {
        return Ok(dt);
    }
    if let Ok(date) = dates::parse_date(input) {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    let dt = fuzzy(input)?;
    if has_time_component(input) {
        Ok(dt)
    } else {
        Ok(dt.date().and_time(NaiveTime::MIN))
    }
}

/// Parse an event end: `fullday`, a duration from `start` (`90m`, `2h`) or a
/// date-time. Returns `None` for full-day events.
pub fn parse_end(input: &str, start: NaiveDateTime) -> Result<Option<NaiveDateTime>> {
    let input = input.trim();
    if input.eq_ignore_ascii_case(FULL_DAY) {
        return Ok(None);
    }

    if let Ok(end) = apply_duration(start, input) {
        return Ok(Some(end));
    }

    let cleaned = input
        .strip_prefix("until ")
        .or_else(|| input.strip_prefix("to "))
        .unwrap_or(input);

    let end = parse_start(cleaned)?;
    if end < start {
        anyhow::bail!("Event would end before it starts: \"{}\"", input);
    }

    Ok(Some(end))
}

fn apply_duration(start: NaiveDateTime, input: &str) -> Result<NaiveDateTime> {
    let std_dur = humantime::parse_duration(input).map_err(|e| anyhow::anyhow!("{}", e))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;
    Ok(start + chrono_dur)
}

fn fuzzy(input: &str) -> Result<NaiveDateTime> {
    let expanded = expand_abbreviations(input);
    fuzzydate::parse(&expanded).map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))
}

/// Expand day and month abbreviations fuzzydate does not know.
fn expand_abbreviations(input: &str) -> String {
    const ABBREVIATIONS: [(&str, &str); 22] = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map_or(word, |(_, full)| *full)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the input names a time of day (`6pm`, `15:00`, `noon`, `at 3`).
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    let words: Vec<&str> = lower.split_whitespace().collect();
    words.iter().enumerate().any(|(i, word)| {
        let glued_meridiem = (word.ends_with("am") || word.ends_with("pm"))
            && word.len() > 2
            && word[..word.len() - 2].chars().all(|c| c.is_ascii_digit() || c == ':');
        let split_meridiem = (*word == "am" || *word == "pm")
            && i > 0
            && words[i - 1].starts_with(|c: char| c.is_ascii_digit());
        let clock = word
            .split_once(':')
            .is_some_and(|(h, m)| !h.is_empty() && !m.is_empty() && h.chars().all(|c| c.is_ascii_digit()));
        let at_digit = *word == "at"
            && words
                .get(i + 1)
                .is_some_and(|next| next.starts_with(|c: char| c.is_ascii_digit()));

        glued_meridiem || split_meridiem || clock || at_digit
    })
}
