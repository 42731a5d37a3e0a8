//! Month grid computation and navigation for the date picker.
//!
//! Grids always start on Sunday. Leading slots are filled with days borrowed
//! from the previous month; the final week is left short instead of being
//! padded with days from the next month.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::booked_dates::BookedDateSet;

pub const DAYS_PER_WEEK: usize = 7;

/// A calendar month identified by year and month number (1-12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1-12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based month, `0..12`.
    pub fn month0(&self) -> u32 {
        self.month - 1
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.succ().first_day();
        (next - self.first_day()).num_days() as u32
    }

    /// Month after this one, rolling December into January of the next year.
    pub fn succ(&self) -> Self {
        self.add_months(1)
    }

    /// Month before this one, rolling January into December of the previous year.
    pub fn pred(&self) -> Self {
        self.add_months(-1)
    }

    pub fn add_months(&self, delta: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A single cell of the rendered month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDescriptor {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_past: bool,
}

impl DayDescriptor {
    /// A day can be picked when it belongs to the displayed month, is not
    /// before today and has not been claimed by an earlier booking.
    pub fn is_selectable(&self, booked: &BookedDateSet) -> bool {
        self.is_current_month && !self.is_past && !booked.contains(self.date)
    }
}

/// Ordered day cells for one displayed month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    days: Vec<DayDescriptor>,
}

impl MonthGrid {
    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn days(&self) -> &[DayDescriptor] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn leading_padding(&self) -> usize {
        self.days
            .iter()
            .take_while(|day| !day.is_current_month)
            .count()
    }

    pub fn current_month_days(&self) -> impl Iterator<Item = &DayDescriptor> {
        self.days.iter().filter(|day| day.is_current_month)
    }

    /// Rows of seven cells; only the last row may be shorter.
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayDescriptor> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    /// Number of slots the grid occupies once its last row is drawn in full.
    pub fn slot_count(&self) -> usize {
        self.weeks().len() * DAYS_PER_WEEK
    }

    pub fn selectable_days<'a>(
        &'a self,
        booked: &'a BookedDateSet,
    ) -> impl Iterator<Item = &'a DayDescriptor> + 'a {
        self.days.iter().filter(move |day| day.is_selectable(booked))
    }

    pub fn find(&self, date: NaiveDate) -> Option<&DayDescriptor> {
        self.days.iter().find(|day| day.date == date)
    }
}

/// Builds the grid for `month` relative to `today`.
pub fn build_month_grid(month: YearMonth, today: NaiveDate) -> MonthGrid {
    let first = month.first_day();
    let leading = first.weekday().num_days_from_sunday() as i64;
    let total = month.days_in_month();

    let mut days = Vec::with_capacity(leading as usize + total as usize);

    for offset in (1..=leading).rev() {
        days.push(DayDescriptor {
            date: first - Duration::days(offset),
            is_current_month: false,
            is_today: false,
            // padding is never selectable
            is_past: true,
        });
    }

    for offset in 0..total {
        let date = first + Duration::days(offset as i64);
        days.push(DayDescriptor {
            date,
            is_current_month: true,
            is_today: date == today,
            is_past: date < today,
        });
    }

    MonthGrid { month, days }
}

/// Tracks which month the date picker displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthNavigator {
    displayed: YearMonth,
}

impl MonthNavigator {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            displayed: YearMonth::containing(today),
        }
    }

    pub fn displayed(&self) -> YearMonth {
        self.displayed
    }

    pub fn reset(&mut self, today: NaiveDate) {
        self.displayed = YearMonth::containing(today);
    }

    /// Moves one month back. Refused when that month would be earlier than
    /// the month containing `today`.
    pub fn previous(&mut self, today: NaiveDate) -> bool {
        match previous_month(self.displayed, today) {
            Some(month) => {
                self.displayed = month;
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self) {
        self.displayed = self.displayed.succ();
    }

    pub fn can_go_previous(&self, today: NaiveDate) -> bool {
        previous_month(self.displayed, today).is_some()
    }

    pub fn grid(&self, today: NaiveDate) -> MonthGrid {
        build_month_grid(self.displayed, today)
    }
}

/// The month before `displayed`, unless it lies before the current month.
pub fn previous_month(displayed: YearMonth, today: NaiveDate) -> Option<YearMonth> {
    let candidate = displayed.pred();
    if candidate < YearMonth::containing(today) {
        None
    } else {
        Some(candidate)
    }
}
