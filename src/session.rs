//! Interactive terminal session.
//!
//! [`Prompter`] asks for a city, month and day, lets the user edit the selection until it is
//! confirmed, then [`run_interactive`] loads the data, renders every statistic category, offers
//! raw-row pagination and asks whether to restart. Input and output are generic so the whole
//! session can be driven from memory.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::error::{BikeshareError, BikeshareResult};
use crate::ingestion::{load_filtered, LoadOptions};
use crate::pagination::{next_page, Page};
use crate::render;
use crate::stats::{duration_stats, station_stats, time_stats, user_stats};
use crate::types::{
    weekday_name, City, DayFilter, FilterSpec, Month, MonthFilter, TripTable, ALL, WEEKDAYS,
};

/// Whether the current selection is final or being re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Confirmed,
    Editing,
}

/// Line-oriented prompt helper over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wrap a reader/writer pair, typically locked stdin and stdout.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for prompts, for rendering between questions.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the prompter and return its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line. End of input is an error.
    pub fn ask(&mut self, prompt: &str) -> BikeshareResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_string())
    }

    /// Ask `prompt` until `parse` accepts the answer, printing `retry` after each rejection.
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        mut parse: impl FnMut(&str) -> BikeshareResult<T>,
    ) -> BikeshareResult<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    log::debug!("rejected input '{answer}': {e}");
                    writeln!(self.output, "\n{retry}")?;
                }
            }
        }
    }

    /// Ask for a city by menu number until a valid one is given.
    pub fn prompt_city(&mut self) -> BikeshareResult<City> {
        writeln!(self.output, "\nPlease select city name to analyze:")?;
        for (i, city) in City::ALL.iter().enumerate() {
            writeln!(self.output, "\t{}. {}", i + 1, city.title())?;
        }
        let n = City::ALL.len();
        self.ask_until(
            &format!("Select 1-{n}: "),
            &format!("Please select valid city name between 1-{n}"),
            |s| parse_index(s).and_then(City::from_index),
        )
    }

    /// Ask for a month by menu number, or `all`.
    pub fn prompt_month(&mut self) -> BikeshareResult<MonthFilter> {
        writeln!(self.output, "\nPlease select month or type \"{ALL}\"")?;
        for (i, m) in Month::ALL.iter().enumerate() {
            writeln!(self.output, "\t{}. {}", i + 1, MonthFilter::Only(*m))?;
        }
        let n = Month::ALL.len();
        self.ask_until(
            &format!("Select: 1-{n}: "),
            &format!("Please select valid month between 1-{n}"),
            |s| {
                if s.eq_ignore_ascii_case(ALL) {
                    Ok(MonthFilter::All)
                } else {
                    parse_index(s)
                        .and_then(Month::from_index)
                        .map(MonthFilter::Only)
                }
            },
        )
    }

    /// Ask for a weekday by menu number (1 = Monday), or `all`.
    pub fn prompt_day(&mut self) -> BikeshareResult<DayFilter> {
        writeln!(self.output, "\nPlease select day of the week or type \"{ALL}\"")?;
        for (i, d) in WEEKDAYS.iter().enumerate() {
            writeln!(self.output, "\t{}. {}", i + 1, weekday_name(*d))?;
        }
        let n = WEEKDAYS.len();
        self.ask_until(
            &format!("Select (1-{n}): "),
            &format!("Please select valid day of the week between 1 - {n}"),
            |s| {
                if s.eq_ignore_ascii_case(ALL) {
                    Ok(DayFilter::All)
                } else {
                    parse_index(s).and_then(DayFilter::from_index)
                }
            },
        )
    }

    /// Ask for city, month and day in turn.
    pub fn prompt_filters(&mut self) -> BikeshareResult<FilterSpec> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;
        let city = self.prompt_city()?;
        let month = self.prompt_month()?;
        let day = self.prompt_day()?;
        writeln!(self.output, "{}", "-".repeat(40))?;
        Ok(FilterSpec::new(city, month, day))
    }

    /// Show `spec` and ask whether to edit it.
    pub fn review_selection(&mut self, spec: &FilterSpec) -> BikeshareResult<SelectionState> {
        render::write_selection(&mut self.output, spec)?;
        let answer = self.ask("\nWould You like to edit your selection? y/n: ")?;
        Ok(if answer.eq_ignore_ascii_case("y") {
            SelectionState::Editing
        } else {
            SelectionState::Confirmed
        })
    }

    /// Prompt for filters until the user confirms the selection.
    pub fn confirmed_filters(&mut self) -> BikeshareResult<FilterSpec> {
        let mut spec = self.prompt_filters()?;
        while self.review_selection(&spec)? == SelectionState::Editing {
            spec = self.prompt_filters()?;
        }
        Ok(spec)
    }

    /// Offer raw rows `page_size` at a time until declined or exhausted.
    pub fn page_raw_data(&mut self, table: &TripTable, page_size: usize) -> BikeshareResult<()> {
        let mut answer = self.ask("Would you like to see raw data? y/n: ")?;
        let mut cursor = 0;
        while answer.eq_ignore_ascii_case("y") {
            match next_page(table, cursor, page_size) {
                Page::Rows { rows, next_cursor } => {
                    render::write_raw_rows(&mut self.output, table, rows)?;
                    cursor = next_cursor;
                }
                Page::Exhausted => {
                    writeln!(self.output, "That's it!")?;
                    break;
                }
            }
            answer = self.ask(&format!("\nShow next {page_size} rows? y/n: "))?;
        }
        Ok(())
    }

    /// Whether the user answered `yes` to starting over.
    pub fn wants_restart(&mut self) -> BikeshareResult<bool> {
        let answer = self.ask("\nWould you like to restart? Enter yes or no.\n")?;
        Ok(answer.eq_ignore_ascii_case("yes"))
    }
}

fn parse_index(s: &str) -> BikeshareResult<usize> {
    s.trim()
        .parse::<usize>()
        .map_err(|_| BikeshareError::InvalidFilter {
            message: format!("'{s}' is not a menu number"),
        })
}

/// Render every statistic category for `table`, each with its own timing and error line.
pub fn write_all_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    let started = Instant::now();
    let result = time_stats(table);
    render::write_category(
        out,
        "Calculating The Most Frequent Times of Travel...",
        &result,
        started.elapsed(),
        render::write_time_stats,
    )?;

    let started = Instant::now();
    let result = station_stats(table);
    render::write_category(
        out,
        "Calculating The Most Popular Stations and Trip...",
        &result,
        started.elapsed(),
        render::write_station_stats,
    )?;

    let started = Instant::now();
    let result = duration_stats(table);
    render::write_category(
        out,
        "Calculating Trip Duration...",
        &result,
        started.elapsed(),
        render::write_duration_stats,
    )?;

    let started = Instant::now();
    let result = user_stats(table);
    render::write_category(
        out,
        "Calculating User Stats...",
        &result,
        started.elapsed(),
        render::write_user_stats,
    )
}

/// Run analyses until the user declines to restart.
///
/// A failed load is reported and the session moves on to the restart prompt.
pub fn run_interactive<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    options: &LoadOptions,
    page_size: usize,
) -> BikeshareResult<()> {
    loop {
        let spec = prompter.confirmed_filters()?;
        match load_filtered(&spec, options) {
            Ok(table) => {
                write_all_stats(prompter.output(), &table)?;
                prompter.page_raw_data(&table, page_size)?;
            }
            Err(e) => render::write_error(prompter.output(), &e)?,
        }
        if !prompter.wants_restart()? {
            return Ok(());
        }
    }
}
