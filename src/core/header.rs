//! Header formatting
//!
//! Converts a timestamp and an optional caller location into the header that
//! precedes every record, following a [`FormatFlags`] set. The same header is
//! rendered either as a plain-text prefix or as structured fields.

use super::fields::Fields;
use super::flags::FormatFlags;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use std::panic::Location;

/// Source location of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerLocation {
    pub file: &'static str,
    pub line: u32,
}

impl CallerLocation {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the outermost `#[track_caller]` frame calling this
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Final path element; the whole path when it has no separator
    pub fn short_file(&self) -> &'static str {
        match self.file.rfind(['/', '\\']) {
            Some(index) => &self.file[index + 1..],
            None => self.file,
        }
    }
}

impl From<&'static Location<'static>> for CallerLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// A rendered record header
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use leveled_logger::{CallerLocation, FormatFlags, Header};
///
/// let time = Utc.with_ymd_and_hms(2009, 1, 23, 1, 23, 23).unwrap();
/// let caller = CallerLocation::new("src/server/handler.rs", 42);
/// let header = Header::new(
///     FormatFlags::STD | FormatFlags::SHORT_FILE,
///     &time,
///     Some(caller),
/// );
///
/// assert_eq!(header.prefix(), "2009/01/23 01:23:23 handler.rs:42: ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    logtime: String,
    caller: Option<(&'static str, u32)>,
}

impl Header {
    /// Render the header for `time` and `caller` according to `flags`
    ///
    /// `caller` is only consulted when a file flag is set; a missing caller
    /// under a file flag renders as `???:0`.
    pub fn new<Tz>(flags: FormatFlags, time: &DateTime<Tz>, caller: Option<CallerLocation>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let logtime = if !flags.wants_time() {
            String::new()
        } else if flags.contains(FormatFlags::UTC) {
            Self::format_time(flags, &time.with_timezone(&Utc))
        } else {
            Self::format_time(flags, time)
        };

        let caller = flags.wants_caller().then(|| match caller {
            Some(location) if flags.contains(FormatFlags::SHORT_FILE) => {
                (location.short_file(), location.line)
            }
            Some(location) => (location.file, location.line),
            None => ("???", 0),
        });

        Self { logtime, caller }
    }

    fn format_time<Tz>(flags: FormatFlags, time: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut parts = Vec::with_capacity(2);
        if flags.contains(FormatFlags::DATE) {
            parts.push(time.format("%Y/%m/%d").to_string());
        }
        if flags.contains(FormatFlags::MICROSECONDS) {
            parts.push(time.format("%H:%M:%S%.6f").to_string());
        } else if flags.contains(FormatFlags::TIME) {
            parts.push(time.format("%H:%M:%S").to_string());
        }
        parts.join(" ")
    }

    /// The `logtime` value; empty when no date or time flag is set
    pub fn logtime(&self) -> &str {
        &self.logtime
    }

    /// The reported file name, shortened when `SHORT_FILE` is set
    pub fn filename(&self) -> Option<&'static str> {
        self.caller.map(|(file, _)| file)
    }

    pub fn lineno(&self) -> Option<u32> {
        self.caller.map(|(_, line)| line)
    }

    /// Plain-text prefix: `2009/01/23 01:23:23.123123 file.rs:23: `
    pub fn prefix(&self) -> String {
        let mut prefix = String::new();
        if !self.logtime.is_empty() {
            prefix.push_str(&self.logtime);
            prefix.push(' ');
        }
        if let Some((file, line)) = self.caller {
            prefix.push_str(&format!("{}:{}: ", file, line));
        }
        prefix
    }

    /// Structured form: `logtime`, then `filename` and `lineno` when the
    /// caller was captured
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new().with_field("logtime", self.logtime.as_str());
        if let Some((file, line)) = self.caller {
            fields.insert("filename", file);
            fields.insert("lineno", line);
        }
        fields
    }
}
