//! Store opening hours
//!
//! Opening and closing times are wall-clock values with no time zone; they are
//! compared against the viewer's local time. The open/closed flag only looks at
//! the daily window. Operating days feed the display label alone, so a store
//! outside its operating days still reports [`OpenStatus::Open`] inside its
//! window. Windows that cross midnight are compared literally and are reported
//! closed for the wrap-around span.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use jiff::{Zoned, civil::Time};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised while parsing store hours.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HoursError {
    /// The text is not `HH:MM` or `HH:MM:SS`.
    #[error("invalid time of day: {0:?}")]
    InvalidTime(String),
}

/// A wall-clock time of day, as stored for opening and closing times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(Time);

impl TimeOfDay {
    /// Build from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::InvalidTime`] when either component is out of range.
    pub fn from_hm(hour: i8, minute: i8) -> Result<Self, HoursError> {
        Time::new(hour, minute, 0, 0)
            .map(Self)
            .map_err(|_err| HoursError::InvalidTime(format!("{hour}:{minute}")))
    }

    /// Parse `HH:MM` or `HH:MM:SS`.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::InvalidTime`] on any other shape or out-of-range component.
    pub fn parse(text: &str) -> Result<Self, HoursError> {
        let invalid = || HoursError::InvalidTime(text.to_string());

        let parts: SmallVec<[i8; 3]> = text
            .trim()
            .split(':')
            .map(|part| part.parse::<i8>().map_err(|_err| invalid()))
            .collect::<Result<_, _>>()?;

        let (hour, minute, second) = match parts.as_slice() {
            [hour, minute] => (*hour, *minute, 0),
            [hour, minute, second] => (*hour, *minute, *second),
            _ => return Err(invalid()),
        };

        Time::new(hour, minute, second, 0)
            .map(Self)
            .map_err(|_err| invalid())
    }

    /// Minutes since midnight; seconds are ignored.
    pub fn minutes(self) -> i32 {
        minutes_of_day(self.0)
    }

    /// The underlying civil time.
    pub fn time(self) -> Time {
        self.0
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!(
            "{:02}:{:02}:{:02}",
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        ))
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Optional time column; unparsable values are treated as absent.
pub(crate) fn lenient_time<'de, D>(deserializer: D) -> Result<Option<TimeOfDay>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;

    Ok(text.and_then(|text| TimeOfDay::parse(&text).ok()))
}

fn minutes_of_day(time: Time) -> i32 {
    i32::from(time.hour()) * 60 + i32::from(time.minute())
}

/// A day a store may claim to be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingDay {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl OperatingDay {
    /// Every day, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Monday to Friday.
    pub const WEEKDAYS: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Token used in storage (`monday`, `tuesday`, ...).
    pub fn token(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Three-letter label shown to shoppers.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Monday => "Seg",
            Self::Tuesday => "Ter",
            Self::Wednesday => "Qua",
            Self::Thursday => "Qui",
            Self::Friday => "Sex",
            Self::Saturday => "Sáb",
            Self::Sunday => "Dom",
        }
    }

    /// Parse a storage token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();

        Self::ALL
            .into_iter()
            .find(|day| day.token().eq_ignore_ascii_case(token))
    }
}

impl Display for OperatingDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<jiff::civil::Weekday> for OperatingDay {
    fn from(weekday: jiff::civil::Weekday) -> Self {
        use jiff::civil::Weekday;

        match weekday {
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
        }
    }
}

/// The set of days a store lists, in the order it listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatingDays(SmallVec<[OperatingDay; 7]>);

impl OperatingDays {
    /// Build from days, dropping repeats.
    pub fn new(days: impl IntoIterator<Item = OperatingDay>) -> Self {
        let mut unique: SmallVec<[OperatingDay; 7]> = SmallVec::new();

        for day in days {
            if !unique.contains(&day) {
                unique.push(day);
            }
        }

        Self(unique)
    }

    /// Monday to Friday.
    pub fn weekdays() -> Self {
        Self::new(OperatingDay::WEEKDAYS)
    }

    /// Whether `day` is listed.
    pub fn contains(&self, day: OperatingDay) -> bool {
        self.0.contains(&day)
    }

    /// Number of listed days.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no days are listed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Listed days in order.
    pub fn iter(&self) -> impl Iterator<Item = OperatingDay> + '_ {
        self.0.iter().copied()
    }

    /// Whether the store lists today, or lists nothing at all.
    pub fn includes(&self, day: OperatingDay) -> bool {
        self.is_empty() || self.contains(day)
    }
}

impl FromIterator<OperatingDay> for OperatingDays {
    fn from_iter<I: IntoIterator<Item = OperatingDay>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Serialize for OperatingDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for OperatingDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;

        Ok(crate::normalize::strings_from_value(value.as_ref())
            .iter()
            .filter_map(|token| OperatingDay::from_token(token))
            .collect())
    }
}

/// Display label for a store's operating days.
///
/// Returns `None` when no days are listed.
pub fn format_operating_days(days: &OperatingDays) -> Option<String> {
    if days.is_empty() {
        return None;
    }

    if days.len() == OperatingDay::ALL.len() {
        return Some("Todos os dias".to_string());
    }

    if days.len() == OperatingDay::WEEKDAYS.len()
        && OperatingDay::WEEKDAYS.iter().all(|day| days.contains(*day))
    {
        return Some("Seg a Sex".to_string());
    }

    Some(
        days.iter()
            .map(OperatingDay::abbreviation)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Whether a store currently reports itself open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    /// Inside the daily window, or no window configured
    Open,
    /// Outside the daily window
    Closed,
}

impl OpenStatus {
    /// Whether this is [`OpenStatus::Open`].
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<bool> for OpenStatus {
    fn from(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }
}

impl Display for OpenStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "Aberta",
            Self::Closed => "Fechada",
        })
    }
}

/// A store's daily window and listed operating days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreHours {
    opening: Option<TimeOfDay>,
    closing: Option<TimeOfDay>,
    days: OperatingDays,
}

impl StoreHours {
    /// Create store hours.
    pub fn new(
        opening: Option<TimeOfDay>,
        closing: Option<TimeOfDay>,
        days: OperatingDays,
    ) -> Self {
        Self {
            opening,
            closing,
            days,
        }
    }

    /// Whether the store is open at the given wall-clock time.
    ///
    /// Missing opening or closing time means always open. Both ends of the
    /// window are inclusive.
    pub fn is_open_at(&self, now: Time) -> bool {
        let (Some(opening), Some(closing)) = (self.opening, self.closing) else {
            return true;
        };

        let current = minutes_of_day(now);

        opening.minutes() <= current && current <= closing.minutes()
    }

    /// Open status at the given wall-clock time.
    pub fn status_at(&self, now: Time) -> OpenStatus {
        self.is_open_at(now).into()
    }

    /// Whether the store is open against the local clock.
    pub fn is_open_now(&self) -> bool {
        self.is_open_at(Zoned::now().time())
    }

    /// Open status against the local clock.
    pub fn status_now(&self) -> OpenStatus {
        self.is_open_now().into()
    }

    /// Whether the store lists `day` among its operating days.
    ///
    /// An empty list counts as every day.
    pub fn operates_on(&self, day: OperatingDay) -> bool {
        self.days.includes(day)
    }

    /// `HH:MM - HH:MM`, when both ends of the window are known.
    pub fn hours_label(&self) -> Option<String> {
        Some(format!("{} - {}", self.opening?, self.closing?))
    }

    /// Operating-days label, see [`format_operating_days`].
    pub fn days_label(&self) -> Option<String> {
        format_operating_days(&self.days)
    }

    /// Listed operating days.
    pub fn days(&self) -> &OperatingDays {
        &self.days
    }
}
