//! Parsing of the date and date-time formats accepted on the command line.
//!
//! Dates:
//! - `YYYY-MM-DD`
//! - `dd/mm/YYYY` or `YYYY/mm/dd` (the four-digit part decides)
//! - `Mon dd YYYY`, `Mon dd, YYYY`, `Mon dd,YYYY` (month names or abbreviations)
//!
//! Date-times are a date followed by `HH:MM[:SS]` and an optional `AM`/`PM`,
//! either as a separate word or glued to the time (`6:09PM`). ISO-8601
//! `YYYY-MM-DDTHH:MM[:SS]` is accepted as well.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{WhowError, WhowResult};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const ISO_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn parse_date(input: &str) -> WhowResult<NaiveDate> {
    let s = input.trim();

    if s.is_empty() {
        return Err(WhowError::InvalidInput("Missing date".into()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    if s.contains('/') {
        return parse_slash_date(s);
    }

    if s.starts_with(|c: char| c.is_alphabetic()) {
        return parse_month_name_date(s);
    }

    Err(invalid_date(s))
}

pub fn parse_datetime(input: &str) -> WhowResult<NaiveDateTime> {
    let s = input.trim();

    for format in ISO_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    let mut words: Vec<&str> = s.split_whitespace().collect();
    let mut meridiem = None;

    if let Some(last) = words.last().copied() {
        if let Some(m) = Meridiem::from_word(last) {
            meridiem = Some(m);
            words.pop();
        }
    }

    let Some(mut time_part) = words.pop() else {
        return Err(invalid_datetime(s));
    };

    if meridiem.is_none()
        && time_part.len() > 2
        && time_part.is_char_boundary(time_part.len() - 2)
    {
        let (head, tail) = time_part.split_at(time_part.len() - 2);
        if let Some(m) = Meridiem::from_word(tail) {
            meridiem = Some(m);
            time_part = head;
        }
    }

    if !time_part.contains(':') || words.is_empty() {
        return Err(invalid_datetime(s));
    }

    let date = parse_date(&words.join(" "))?;
    let time = parse_time(time_part, meridiem).ok_or_else(|| invalid_datetime(s))?;

    Ok(date.and_time(time))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "am" => Some(Meridiem::Am),
            "pm" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

fn parse_time(s: &str, meridiem: Option<Meridiem>) -> Option<NaiveTime> {
    let parts: Vec<u32> = s
        .split(':')
        .map(|p| p.parse().ok())
        .collect::<Option<Vec<_>>>()?;

    let (hour, minute, second) = match parts.as_slice() {
        [h, m] => (*h, *m, 0),
        [h, m, s] => (*h, *m, *s),
        _ => return None,
    };

    let hour = match meridiem {
        None => hour,
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(Meridiem::Am) => hour % 12,
        Some(Meridiem::Pm) => hour % 12 + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, second)
}

fn parse_slash_date(s: &str) -> WhowResult<NaiveDate> {
    let parts: Vec<i64> = s
        .split('/')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| invalid_date(s))?;

    let [a, b, c] = parts.as_slice() else {
        return Err(invalid_date(s));
    };

    let (year, month, day) = if *a > 99 {
        (*a, *b, *c)
    } else if *c > 99 {
        (*c, *b, *a)
    } else {
        return Err(invalid_date(s));
    };

    ymd(year, month, day)
}

fn parse_month_name_date(s: &str) -> WhowResult<NaiveDate> {
    let words: Vec<&str> = s
        .split([' ', ','])
        .filter(|w| !w.is_empty())
        .collect();

    let [month, day, year] = words.as_slice() else {
        return Err(invalid_date(s));
    };

    let month = month_number(month).ok_or_else(|| {
        WhowError::InvalidInput(format!(
            "Invalid month name '{month}'. Use one of Jan, Feb, Mar, Apr, May, Jun, Jul, Aug, Sep, Oct, Nov or Dec"
        ))
    })?;

    let day: i64 = day.parse().map_err(|_| invalid_date(s))?;
    let year: i64 = year.parse().map_err(|_| invalid_date(s))?;

    ymd(year, month, day)
}

/// 1-based month number for a full or abbreviated (three letters or more) month name.
fn month_number(word: &str) -> Option<i64> {
    let word = word.to_lowercase();
    if word.len() < 3 {
        return None;
    }

    MONTHS
        .iter()
        .position(|m| m.starts_with(&word))
        .map(|i| i as i64 + 1)
}

fn ymd(year: i64, month: i64, day: i64) -> WhowResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(WhowError::InvalidInput(format!("Month {month} is out of range")));
    }
    if !(1..=31).contains(&day) {
        return Err(WhowError::InvalidInput(format!("Day {day} is out of range")));
    }

    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month as u32, day as u32))
        .ok_or_else(|| {
            WhowError::InvalidInput(format!("{year}-{month:02}-{day:02} is not a valid date"))
        })
}

fn invalid_date(s: &str) -> WhowError {
    WhowError::InvalidInput(format!(
        "Invalid date '{s}'. Use YYYY-MM-DD, dd/mm/YYYY, YYYY/mm/dd or 'Month dd, YYYY'"
    ))
}

fn invalid_datetime(s: &str) -> WhowError {
    WhowError::InvalidInput(format!(
        "Invalid date/time '{s}'. Use '<date> HH:MM[:SS] [AM|PM]' or YYYY-MM-DDTHH:MM"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2025-01-01").unwrap(), date(2025, 1, 1));
        assert_eq!(parse_date("09/03/2026").unwrap(), date(2026, 3, 9));
        assert_eq!(parse_date("2026/03/09").unwrap(), date(2026, 3, 9));
        assert_eq!(parse_date("Jan 09 2069").unwrap(), date(2069, 1, 9));
        assert_eq!(parse_date("Jan 09, 2069").unwrap(), date(2069, 1, 9));
        assert_eq!(parse_date("Jan 09,2069").unwrap(), date(2069, 1, 9));
        assert_eq!(parse_date("september 1 2026").unwrap(), date(2026, 9, 1));
    }

    #[test]
    fn test_parse_date_rejects_out_of_range() {
        assert!(matches!(parse_date("32/01/2026"), Err(WhowError::InvalidInput(_))));
        assert!(matches!(parse_date("01/13/2026"), Err(WhowError::InvalidInput(_))));
        assert!(matches!(parse_date("30/02/2026"), Err(WhowError::InvalidInput(_))));
        assert!(matches!(parse_date("01/02/03"), Err(WhowError::InvalidInput(_))));
        assert!(matches!(parse_date("Foo 01 2026"), Err(WhowError::InvalidInput(_))));
        assert!(matches!(parse_date(""), Err(WhowError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_datetime_24h() {
        assert_eq!(
            parse_datetime("02/01/2026 18:09:34").unwrap(),
            datetime(2026, 1, 2, 18, 9, 34)
        );
        assert_eq!(
            parse_datetime("2026-01-02T18:09").unwrap(),
            datetime(2026, 1, 2, 18, 9, 0)
        );
    }

    #[test]
    fn test_parse_datetime_12h() {
        assert_eq!(
            parse_datetime("02/01/2026 6:09:34 PM").unwrap(),
            datetime(2026, 1, 2, 18, 9, 34)
        );
        assert_eq!(
            parse_datetime("02/01/2026 6:09pm").unwrap(),
            datetime(2026, 1, 2, 18, 9, 0)
        );
        assert_eq!(
            parse_datetime("Jan 2, 2026 12:30 AM").unwrap(),
            datetime(2026, 1, 2, 0, 30, 0)
        );
        assert_eq!(
            parse_datetime("Jan 2 2026 12:30 PM").unwrap(),
            datetime(2026, 1, 2, 12, 30, 0)
        );
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("02/01/2026").is_err());
        assert!(parse_datetime("02/01/2026 25:00").is_err());
        assert!(parse_datetime("02/01/2026 13:00 PM").is_err());
        assert!(parse_datetime("18:00").is_err());
    }

    #[test]
    fn test_parse_datetime_multibyte_time_is_invalid_input() {
        assert!(matches!(
            parse_datetime("2026-01-01 1€"),
            Err(WhowError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_datetime("2026-01-01 6:09午後"),
            Err(WhowError::InvalidInput(_))
        ));
    }
}
