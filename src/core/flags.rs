//! Header format flags
//!
//! Selects which header fields a logger writes in front of (or alongside)
//! every message: date, time, microseconds, UTC conversion and the caller's
//! file and line.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// A set of header format flags
///
/// # Examples
///
/// ```
/// use leveled_logger::FormatFlags;
///
/// let flags = FormatFlags::STD | FormatFlags::SHORT_FILE;
/// assert!(flags.contains(FormatFlags::DATE));
/// assert!(flags.wants_caller());
/// assert_eq!(flags.to_string(), "date|time|shortfile");
///
/// let parsed: FormatFlags = "date|time|shortfile".parse().unwrap();
/// assert_eq!(parsed, flags);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormatFlags(u8);

impl FormatFlags {
    /// The date in the local time zone: `2009/01/23`
    pub const DATE: FormatFlags = FormatFlags(1);
    /// The time in the local time zone: `01:23:23`
    pub const TIME: FormatFlags = FormatFlags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`, implies `TIME`
    pub const MICROSECONDS: FormatFlags = FormatFlags(1 << 2);
    /// Full caller file path and line number: `/a/b/c/d.rs:23`
    pub const LONG_FILE: FormatFlags = FormatFlags(1 << 3);
    /// Final path element and line number: `d.rs:23`, overrides `LONG_FILE`
    pub const SHORT_FILE: FormatFlags = FormatFlags(1 << 4);
    /// Render date and time in UTC rather than the local time zone
    pub const UTC: FormatFlags = FormatFlags(1 << 5);
    /// Initial values for the default logger
    pub const STD: FormatFlags = Self::DATE.union(Self::TIME);

    const NAMES: [(FormatFlags, &'static str); 6] = [
        (Self::DATE, "date"),
        (Self::TIME, "time"),
        (Self::MICROSECONDS, "microseconds"),
        (Self::LONG_FILE, "longfile"),
        (Self::SHORT_FILE, "shortfile"),
        (Self::UTC, "utc"),
    ];

    /// No header fields at all
    pub const fn empty() -> Self {
        FormatFlags(0)
    }

    /// Const-friendly `|`
    pub const fn union(self, other: FormatFlags) -> Self {
        FormatFlags(self.0 | other.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every flag in `other` is set
    pub const fn contains(self, other: FormatFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any flag in `other` is set
    pub const fn intersects(self, other: FormatFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether the header carries a timestamp
    pub const fn wants_time(self) -> bool {
        self.intersects(FormatFlags(Self::DATE.0 | Self::TIME.0 | Self::MICROSECONDS.0))
    }

    /// Whether the caller's location has to be captured
    pub const fn wants_caller(self) -> bool {
        self.intersects(FormatFlags(Self::SHORT_FILE.0 | Self::LONG_FILE.0))
    }
}

impl BitOr for FormatFlags {
    type Output = FormatFlags;

    fn bitor(self, rhs: FormatFlags) -> FormatFlags {
        FormatFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for FormatFlags {
    fn bitor_assign(&mut self, rhs: FormatFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FormatFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join("|"))
    }
}

impl FromStr for FormatFlags {
    type Err = LoggerError;

    /// Parses `|`-separated flag names; `std` expands to `date|time`
    fn from_str(s: &str) -> Result<Self> {
        let mut flags = FormatFlags::empty();
        for name in s.split('|').map(str::trim).filter(|name| !name.is_empty()) {
            if name.eq_ignore_ascii_case("std") {
                flags |= FormatFlags::STD;
                continue;
            }
            let flag = Self::NAMES
                .iter()
                .find(|(_, known)| known.eq_ignore_ascii_case(name))
                .map(|(flag, _)| *flag)
                .ok_or_else(|| {
                    LoggerError::config("FormatFlags", format!("unknown flag '{}'", name))
                })?;
            flags |= flag;
        }
        Ok(flags)
    }
}

impl TryFrom<String> for FormatFlags {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FormatFlags> for String {
    fn from(flags: FormatFlags) -> Self {
        flags.to_string()
    }
}
