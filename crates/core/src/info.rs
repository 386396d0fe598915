//! Summary records from the line-oriented `info` listing.
//!
//! Each line has the shape `<project> <id> <date> by <author> [*DELETED*]`.
//! Dates are RFC-822 style and taken as local wall-clock time; any zone
//! suffix is ignored.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use time::macros::format_description;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::error::{Error, FormatError};
use crate::version::VersionIdentifier;

static INFO_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^ ]+) ([^ ]+) (.+) by ([^ ]+) ?(\*DELETED\*)?").expect("valid info pattern")
});

const DAY_NAMES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSummary {
    pub project: String,
    pub id: String,
    pub date: PrimitiveDateTime,
    pub author: String,
    pub deleted: bool,
}

impl VersionSummary {
    /// Parse one listing line. Lines that are not records give `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, FormatError> {
        let Some(caps) = INFO_RECORD.captures(line) else {
            return Ok(None);
        };
        Ok(Some(VersionSummary {
            project: caps[1].to_owned(),
            id: caps[2].to_owned(),
            date: parse_date(&caps[3])?,
            author: caps[4].to_owned(),
            deleted: caps.get(5).is_some(),
        }))
    }

    pub fn version(&self) -> Result<VersionIdentifier, FormatError> {
        self.id.parse()
    }

    /// Date as `YYYY-MM-DD HH:MM:SS`.
    pub fn date_text(&self) -> String {
        self.date
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_else(|_| self.date.to_string())
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "project": self.project,
            "id":      self.id,
            "date":    self.date_text(),
            "author":  self.author,
            "deleted": self.deleted,
        })
    }
}

/// Parse a whole listing into records keyed by version id.
///
/// Lines that are not records are skipped; a later record for the same id
/// replaces an earlier one.
pub fn parse_info_records(text: &str) -> Result<BTreeMap<String, VersionSummary>, Error> {
    let mut versions = BTreeMap::new();
    for line in text.lines() {
        match VersionSummary::parse_line(line)? {
            Some(summary) => {
                versions.insert(summary.id.clone(), summary);
            }
            None => tracing::debug!(line, "skipping non-record info line"),
        }
    }
    Ok(versions)
}

/// Lenient RFC-822 date: `[Ddd,] D Mon YYYY HH:MM[:SS] [zone]`.
pub fn parse_date(text: &str) -> Result<PrimitiveDateTime, FormatError> {
    let err = |message: &str| FormatError::new("date", text, message);

    let mut fields: Vec<&str> = text.split_whitespace().collect();
    if let Some(first) = fields.first() {
        let name = first.trim_end_matches(',').to_ascii_lowercase();
        if first.ends_with(',') || DAY_NAMES.contains(&name.as_str()) {
            fields.remove(0);
        }
    }
    if fields.len() < 4 {
        return Err(err("expected day, month, year and time"));
    }

    let day: u8 = fields[0].parse().map_err(|_| err("invalid day"))?;
    let month = parse_month(fields[1]).ok_or_else(|| err("invalid month"))?;
    let year = parse_year(fields[2]).ok_or_else(|| err("invalid year"))?;
    let time = parse_time(fields[3]).ok_or_else(|| err("invalid time of day"))?;

    let date =
        Date::from_calendar_date(year, month, day).map_err(|e| err(&e.to_string()))?;
    Ok(PrimitiveDateTime::new(date, time))
}

fn parse_month(text: &str) -> Option<Month> {
    let month = match text.to_ascii_lowercase().as_str() {
        "jan" => Month::January,
        "feb" => Month::February,
        "mar" => Month::March,
        "apr" => Month::April,
        "may" => Month::May,
        "jun" => Month::June,
        "jul" => Month::July,
        "aug" => Month::August,
        "sep" => Month::September,
        "oct" => Month::October,
        "nov" => Month::November,
        "dec" => Month::December,
        _ => return None,
    };
    Some(month)
}

fn parse_year(text: &str) -> Option<i32> {
    let year: i32 = text.parse().ok()?;
    if text.len() <= 2 {
        // Two-digit years, as in RFC 822
        return Some(if year > 68 { year + 1900 } else { year + 2000 });
    }
    Some(year)
}

fn parse_time(text: &str) -> Option<Time> {
    let mut parts = text.split(':');
    let hour = parts.next()?.parse().ok()?;
    let minute = parts.next()?.parse().ok()?;
    let second = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Time::from_hms(hour, minute, second).ok()
}
