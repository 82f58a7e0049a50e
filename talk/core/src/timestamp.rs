//! Timestamp Formatting
//!
//! Message timestamps use the Korean 12-hour wall clock:
//! `오전 12:05:09`, `오후 11:59:59`.

use chrono::Timelike;

/// Half of the day a time falls in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Meridiem {
    /// 00:00 through 11:59
    Am,
    /// 12:00 through 23:59
    Pm,
}

impl Meridiem {
    /// Meridiem for an hour in 0..=23
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        if hour >= 12 {
            Self::Pm
        } else {
            Self::Am
        }
    }

    /// Display token for this half of the day
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Am => "오전",
            Self::Pm => "오후",
        }
    }
}

/// Map a 24-hour clock hour onto the 12-hour dial (0 and 12 both show as 12)
#[must_use]
pub fn display_hour(hour: u32) -> u32 {
    ((hour + 11) % 12) + 1
}

/// Format a point in time as `<meridiem> <hour>:<mm>:<ss>`
///
/// Accepts anything carrying a time of day, so both `DateTime<Local>` and a
/// bare `NaiveTime` work.
pub fn format_timestamp<T: Timelike>(at: &T) -> String {
    let hour = at.hour();
    format!(
        "{} {}:{:02}:{:02}",
        Meridiem::from_hour(hour).token(),
        display_hour(hour),
        at.minute(),
        at.second()
    )
}
