//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl LogLevel {
    /// All levels, least severe first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Canonical upper-case name, as written in the `log_level` field
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Title-case name used as the message prefix of the free functions
    /// (`"Info: ..."`)
    pub fn title(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        }
    }

    /// Case-insensitive lookup that reports whether the name was recognized
    ///
    /// # Examples
    ///
    /// ```
    /// use leveled_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::find("warn"), Some(LogLevel::Warn));
    /// assert_eq!(LogLevel::find("debug"), Some(LogLevel::Debug));
    /// assert_eq!(LogLevel::find("verbose"), None);
    /// ```
    pub fn find(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.to_str().eq_ignore_ascii_case(name))
            .or_else(|| name.eq_ignore_ascii_case("WARNING").then_some(LogLevel::Warn))
    }

    /// Case-insensitive lookup that fails open to [`LogLevel::Debug`]
    ///
    /// Unknown names are a configuration mistake, not a reason to lose logs,
    /// so they resolve to the most verbose level.
    ///
    /// ```
    /// use leveled_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::lookup("ERROR"), LogLevel::Error);
    /// assert_eq!(LogLevel::lookup("nonsense"), LogLevel::Debug);
    /// ```
    pub fn lookup(name: &str) -> Self {
        Self::find(name).unwrap_or(LogLevel::Debug)
    }

    /// Whether a call at `self` passes a logger whose threshold is `threshold`
    #[inline]
    pub fn passes(self, threshold: LogLevel) -> bool {
        self >= threshold
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::find(s).ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
        assert_eq!(LogLevel::ALL.iter().max(), Some(&LogLevel::Fatal));
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(LogLevel::find("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::find("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::find("InFo"), Some(LogLevel::Info));
        assert_eq!(LogLevel::find("Warning"), Some(LogLevel::Warn));
    }

    #[test]
    fn test_find_distinguishes_debug_from_unknown() {
        // Debug has discriminant 0; it must still be reported as found.
        assert_eq!(LogLevel::Debug as u8, 0);
        assert_eq!(LogLevel::find("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::find(""), None);
        assert_eq!(LogLevel::find("trace"), None);
    }

    #[test]
    fn test_lookup_falls_back_to_debug() {
        assert_eq!(LogLevel::lookup("fatal"), LogLevel::Fatal);
        assert_eq!(LogLevel::lookup("loud"), LogLevel::Debug);
        assert_eq!(LogLevel::lookup(""), LogLevel::Debug);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("error".parse::<LogLevel>(), Ok(LogLevel::Error));
        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert_eq!(err, "Invalid log level: 'loud'");
    }

    #[test]
    fn test_passes() {
        assert!(LogLevel::Info.passes(LogLevel::Info));
        assert!(LogLevel::Fatal.passes(LogLevel::Debug));
        assert!(!LogLevel::Debug.passes(LogLevel::Info));
    }

    #[test]
    fn test_names() {
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
        assert_eq!(LogLevel::Warn.title(), "Warn");
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
