//! Core data model types for the trip pipeline.
//!
//! A city's CSV is loaded into an in-memory [`TripTable`] of [`TripRecord`]s. The table remembers
//! which optional demographic columns its source carried, so statistics can distinguish "column
//! absent for this city" from "value missing in this row".

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::error::{BikeshareError, BikeshareResult};

/// Reserved filter value meaning "apply no restriction on this dimension".
pub const ALL: &str = "all";

/// Header names as they appear in the city CSV files.
pub mod headers {
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";

    /// Columns every city file must carry.
    pub const REQUIRED: [&str; 4] = [START_TIME, TRIP_DURATION, START_STATION, END_STATION];
}

/// Cities with a known source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All cities, in menu order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case display name, also accepted by [`City::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Source file name, relative to the configured data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Title-cased name for display ("New York City").
    pub fn title(self) -> String {
        title_case(self.name())
    }

    /// Select a city by its 1-based menu position.
    pub fn from_index(idx: usize) -> BikeshareResult<Self> {
        idx.checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| {
                BikeshareError::invalid_filter(format!(
                    "city index {idx} out of range 1-{}",
                    Self::ALL.len()
                ))
            })
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| BikeshareError::invalid_filter(format!("unknown city '{s}'")))
    }
}

/// Months covered by the datasets (January through June).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    /// Months covered by the data, in calendar order.
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// Calendar month number (1-based).
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Lowercase name, as accepted by the month filter.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }

    /// Select a month by its 1-based menu position.
    pub fn from_index(idx: usize) -> BikeshareResult<Self> {
        idx.checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| {
                BikeshareError::invalid_filter(format!(
                    "month index {idx} out of range 1-{}",
                    Self::ALL.len()
                ))
            })
    }
}

impl FromStr for Month {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| BikeshareError::invalid_filter(format!("unknown month '{s}'")))
    }
}

/// Month dimension of a [`FilterSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str(&title_case(ALL)),
            MonthFilter::Only(m) => f.write_str(&title_case(m.name())),
        }
    }
}

impl Serialize for MonthFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MonthFilter::All => serializer.serialize_str(ALL),
            MonthFilter::Only(m) => serializer.serialize_str(m.name()),
        }
    }
}

/// Weekdays in menu order; index 1 is Monday and index 7 is Sunday.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Capitalized English weekday name ("Monday").
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekday dimension of a [`FilterSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Select a weekday by its 1-based menu position (1 = Monday, 7 = Sunday).
    pub fn from_index(idx: usize) -> BikeshareResult<Self> {
        idx.checked_sub(1)
            .and_then(|i| WEEKDAYS.get(i).copied())
            .map(Self::Only)
            .ok_or_else(|| {
                BikeshareError::invalid_filter(format!(
                    "day index {idx} out of range 1-{}",
                    WEEKDAYS.len()
                ))
            })
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).eq_ignore_ascii_case(trimmed))
            .map(Self::Only)
            .ok_or_else(|| BikeshareError::invalid_filter(format!("unknown day '{s}'")))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str(&title_case(ALL)),
            DayFilter::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl Serialize for DayFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DayFilter::All => serializer.serialize_str(ALL),
            DayFilter::Only(d) => serializer.serialize_str(&weekday_name(*d).to_ascii_lowercase()),
        }
    }
}

/// The user's city/month/day selection that parameterizes loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSpec {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// Build a spec from raw strings, rejecting values outside the enumerated domains.
    pub fn parse(city: &str, month: &str, day: &str) -> BikeshareResult<Self> {
        Ok(Self {
            city: city.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        })
    }
}

/// Optional columns whose presence depends on the source city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionalColumn {
    EndTime,
    UserType,
    Gender,
    BirthYear,
}

impl OptionalColumn {
    pub const ALL: [OptionalColumn; 4] = [
        OptionalColumn::EndTime,
        OptionalColumn::UserType,
        OptionalColumn::Gender,
        OptionalColumn::BirthYear,
    ];

    /// CSV header for this column.
    pub fn header(self) -> &'static str {
        match self {
            OptionalColumn::EndTime => headers::END_TIME,
            OptionalColumn::UserType => headers::USER_TYPE,
            OptionalColumn::Gender => headers::GENDER,
            OptionalColumn::BirthYear => headers::BIRTH_YEAR,
        }
    }

    /// Inverse of [`Self::header`]; `None` for required or unknown headers.
    pub fn from_header(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.header() == name)
    }
}

/// One trip row.
///
/// `month` and `weekday` are derived from `start_time` at construction and never change.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub trip_duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
    month: u32,
    weekday: Weekday,
}

impl TripRecord {
    /// Create a record with the required fields; optional fields start out missing.
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration_seconds: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time: None,
            trip_duration_seconds,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
        }
    }

    /// Set the trip end timestamp.
    pub fn with_end_time(mut self, end_time: NaiveDateTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Set the rider type, e.g. `Subscriber` or `Customer`.
    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the rider birth year as read from the file (e.g. `1992.0`).
    pub fn with_birth_year(mut self, birth_year: f64) -> Self {
        self.birth_year = Some(birth_year);
        self
    }

    /// Derived calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Derived weekday.
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Derived capitalized weekday name.
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    /// Hour-of-day of `start_time` (0-23).
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }
}

/// In-memory, ordered trip table. Row order is source file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripTable {
    columns: BTreeSet<OptionalColumn>,
    rows: Vec<TripRecord>,
}

impl TripTable {
    /// Create a table from the optional columns its source carried and its rows.
    pub fn new(columns: impl IntoIterator<Item = OptionalColumn>, rows: Vec<TripRecord>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    /// Create a table whose source carried only the required columns.
    pub fn from_rows(rows: Vec<TripRecord>) -> Self {
        Self {
            columns: BTreeSet::new(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in source file order.
    pub fn rows(&self) -> &[TripRecord] {
        &self.rows
    }

    /// Whether the source carried `column`.
    pub fn has(&self, column: OptionalColumn) -> bool {
        self.columns.contains(&column)
    }

    /// Whether the source carried the column with header `name`.
    ///
    /// Required columns are always present; unknown names are not.
    pub fn has_column(&self, name: &str) -> bool {
        if headers::REQUIRED.contains(&name) {
            return true;
        }
        OptionalColumn::from_header(name).is_some_and(|c| self.has(c))
    }

    /// Optional columns the source carried, in column order.
    pub fn optional_columns(&self) -> impl Iterator<Item = OptionalColumn> + '_ {
        self.columns.iter().copied()
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table keeps the original column set and relative row order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&TripRecord) -> bool,
    {
        let rows = self.rows.iter().filter(|r| predicate(r)).cloned().collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
