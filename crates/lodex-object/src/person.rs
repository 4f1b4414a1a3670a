use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// An actor line: `author`, `committer` or `tagger`.
///
/// The value has the shape `Name With Spaces <email> 1700000000 +0100`. The
/// email is located by its angle brackets, so names may contain any number
/// of spaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub email: String,
    /// Epoch seconds and zone offset, exactly as stored (`"1700000000 +0100"`).
    pub timestamp_raw: String,
}

impl Person {
    /// Decompose an actor value (the text after the label and its space).
    ///
    /// The email must be followed by epoch seconds and a `+hhmm`/`-hhmm` zone.
    pub fn parse(value: &str) -> Result<Self, String> {
        let open = value
            .find('<')
            .ok_or_else(|| format!("no '<' in actor {value:?}"))?;
        let after_open = &value[open + 1..];
        let close = after_open
            .find('>')
            .ok_or_else(|| format!("no '>' in actor {value:?}"))?;

        let person = Self {
            name: value[..open].trim().to_string(),
            email: after_open[..close].to_string(),
            timestamp_raw: after_open[close + 1..].trim().to_string(),
        };
        let fields = person.timestamp_raw.split_whitespace().count();
        if fields != 2 || person.seconds().is_none() || person.offset().is_none() {
            return Err(format!(
                "timestamp {:?} is not `<epoch> <+hhmm>` in actor {value:?}",
                person.timestamp_raw
            ));
        }
        Ok(person)
    }

    /// Seconds since the Unix epoch, if the timestamp is well formed.
    pub fn seconds(&self) -> Option<i64> {
        self.timestamp_raw.split_whitespace().next()?.parse().ok()
    }

    /// The recorded zone offset, if present and well formed.
    pub fn offset(&self) -> Option<FixedOffset> {
        let zone = self.timestamp_raw.split_whitespace().nth(1)?;
        parse_offset(zone)
    }

    /// The timestamp in its recorded zone.
    pub fn time(&self) -> Option<DateTime<FixedOffset>> {
        let utc = DateTime::<Utc>::from_timestamp(self.seconds()?, 0)?;
        Some(utc.with_timezone(&self.offset()?))
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)?;
        if !self.timestamp_raw.is_empty() {
            write!(f, " {}", self.timestamp_raw)?;
        }
        Ok(())
    }
}

/// `+hhmm` / `-hhmm`.
fn parse_offset(zone: &str) -> Option<FixedOffset> {
    let (sign, digits) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
