//! Natural-language due date parsing
//!
//! Understands the phrases people type into a "due" field: absolute dates
//! (`2024-03-10`, `March 10`, `3/10`), relative ones (`tomorrow`,
//! `in 3 days`, `next week`) and weekday names (`friday`, `next fri`).
//!
//! The date phrase may sit anywhere in the text. `by friday at 5pm` and
//! `tomorrow morning.` find `friday` and `tomorrow`; the words around the
//! phrase are ignored. The earliest phrase wins, and at a given position the
//! longest one.
//!
//! Parsing is forward-biased: a partial date that could mean either a past or
//! a future day resolves to the next future occurrence. `friday` on a
//! Tuesday is the coming Friday; `Jan 3` in December is next January.
//! `next friday` is the Friday of the following Monday-based week.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// How many years ahead a year-less date may roll to find a valid day
const MAX_YEAR_ROLL: i32 = 8;

/// Longest phrase tried at each position (`3 days from now`)
const MAX_PHRASE_TOKENS: usize = 4;

/// Parses `text` relative to `today`.
///
/// Returns `None` when no date phrase is found, including impossible calendar
/// dates such as `2024-02-30`.
pub fn parse_due_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let normalized = text.to_lowercase().replace(',', " ");
    let tokens: Vec<&str> = normalized
        .split_whitespace()
        .map(|token| token.trim_matches(is_punctuation))
        .filter(|token| !token.is_empty())
        .collect();

    (0..tokens.len()).find_map(|start| {
        let longest = MAX_PHRASE_TOKENS.min(tokens.len() - start);
        (1..=longest)
            .rev()
            .find_map(|len| parse_phrase(&tokens[start..start + len], today))
    })
}

fn is_punctuation(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | ';' | ':' | '(' | ')' | '"' | '\'')
}

fn parse_phrase(tokens: &[&str], today: NaiveDate) -> Option<NaiveDate> {
    match tokens {
        [] => None,
        [single] => parse_single(single, today),
        ["this", day] => weekday(day).map(|wd| upcoming(today, wd)),
        ["next", word] => match weekday(word) {
            Some(wd) => Some(in_next_week(today, wd)),
            None => shift(today, 1, unit(word)?, Direction::Forward),
        },
        ["last", word] => match weekday(word) {
            Some(wd) => Some(previous_before(today, wd)),
            None => shift(today, 1, unit(word)?, Direction::Backward),
        },
        ["in", n, u] => shift(today, number(n)?, unit(u)?, Direction::Forward),
        [n, u, "from", "now"] | [n, u, "from", "today"] | [n, u, "later"] => {
            shift(today, number(n)?, unit(u)?, Direction::Forward)
        }
        [n, u, "ago"] => shift(today, number(n)?, unit(u)?, Direction::Backward),
        _ => parse_month_day(tokens, today),
    }
}

fn parse_single(token: &str, today: NaiveDate) -> Option<NaiveDate> {
    match token {
        "today" | "tonight" | "now" => Some(today),
        "tomorrow" | "tmr" | "tmrw" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => {
            if let Some(wd) = weekday(token) {
                return Some(upcoming(today, wd));
            }
            parse_iso(token).or_else(|| parse_slashed(token, today))
        }
    }
}

/// `YYYY-MM-DD`, `YYYY/MM/DD` or `YYYY.MM.DD`
fn parse_iso(token: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.split(['-', '/', '.']).collect();
    let [year, month, day] = parts.as_slice() else {
        return None;
    };
    if year.len() != 4 {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// US-ordered `M/D`, `M/D/YY` or `M/D/YYYY`
fn parse_slashed(token: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.split('/').collect();
    match parts.as_slice() {
        [month, day] => forward_month_day(today, month.parse().ok()?, day.parse().ok()?),
        [month, day, year] => {
            let year = match year.len() {
                4 => year.parse().ok()?,
                2 => expand_two_digit_year(year.parse().ok()?),
                _ => return None,
            };
            NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
        }
        _ => None,
    }
}

/// `24` is 2024, `99` is 1999
fn expand_two_digit_year(yy: i32) -> i32 {
    if yy > 50 {
        1900 + yy
    } else {
        2000 + yy
    }
}

/// `March 10`, `10 March`, `10th of March`, each with an optional year
fn parse_month_day(tokens: &[&str], today: NaiveDate) -> Option<NaiveDate> {
    let (month, day, year) = match tokens {
        [m, d] if month_of(m).is_some() => (month_of(m)?, day_of(d)?, None),
        [m, d, y] if month_of(m).is_some() => (month_of(m)?, day_of(d)?, Some(year_of(y)?)),
        [d, m] => (month_of(m)?, day_of(d)?, None),
        [d, m, y] if month_of(m).is_some() => (month_of(m)?, day_of(d)?, Some(year_of(y)?)),
        [d, "of", m] => (month_of(m)?, day_of(d)?, None),
        [d, "of", m, y] => (month_of(m)?, day_of(d)?, Some(year_of(y)?)),
        _ => return None,
    };

    match year {
        Some(year) => NaiveDate::from_ymd_opt(year, month, day),
        None => forward_month_day(today, month, day),
    }
}

/// First valid `month/day` on or after `today`
fn forward_month_day(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    (today.year()..=today.year() + MAX_YEAR_ROLL)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .find(|date| *date >= today)
}

/// `wd` today, or the next one
fn upcoming(today: NaiveDate, wd: Weekday) -> NaiveDate {
    let ahead = days_until(today.weekday(), wd);
    today + Days::new(u64::from(ahead))
}

/// `wd` in the week after this one, weeks starting on Monday
fn in_next_week(today: NaiveDate, wd: Weekday) -> NaiveDate {
    let this_monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    this_monday + Days::new(7 + u64::from(wd.num_days_from_monday()))
}

/// Most recent `wd` strictly before today
fn previous_before(today: NaiveDate, wd: Weekday) -> NaiveDate {
    let behind = match days_until(wd, today.weekday()) {
        0 => 7,
        n => n,
    };
    today - Days::new(u64::from(behind))
}

fn days_until(from: Weekday, to: Weekday) -> u32 {
    (to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

fn shift(today: NaiveDate, amount: u32, unit: Unit, direction: Direction) -> Option<NaiveDate> {
    match unit {
        Unit::Day | Unit::Week => {
            let days = u64::from(amount) * if unit == Unit::Week { 7 } else { 1 };
            match direction {
                Direction::Forward => today.checked_add_days(Days::new(days)),
                Direction::Backward => today.checked_sub_days(Days::new(days)),
            }
        }
        Unit::Month | Unit::Year => {
            let months = if unit == Unit::Year {
                amount.checked_mul(12)?
            } else {
                amount
            };
            match direction {
                Direction::Forward => today.checked_add_months(Months::new(months)),
                Direction::Backward => today.checked_sub_months(Months::new(months)),
            }
        }
    }
}

fn unit(token: &str) -> Option<Unit> {
    match token {
        "day" | "days" => Some(Unit::Day),
        "week" | "weeks" | "wk" | "wks" => Some(Unit::Week),
        "month" | "months" | "mo" => Some(Unit::Month),
        "year" | "years" | "yr" | "yrs" => Some(Unit::Year),
        _ => None,
    }
}

fn number(token: &str) -> Option<u32> {
    if let Ok(n) = token.parse() {
        return Some(n);
    }

    let n = match token {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(n)
}

fn weekday(token: &str) -> Option<Weekday> {
    match token {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn month_of(token: &str) -> Option<u32> {
    let month = match token.trim_end_matches('.') {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Day of month, with an optional ordinal suffix (`1st`, `22nd`, `10th`)
fn day_of(token: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .unwrap_or(token);

    let day: u32 = digits.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

fn year_of(token: &str) -> Option<i32> {
    if token.len() != 4 {
        return None;
    }
    token.parse().ok()
}
