use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use super::catalog::CelebrityCatalog;
use super::progress_store::ProgressStore;
use crate::model::DayStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub status: DayStatus,
}

/// One rendered month of the history browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty grid cells before day 1 in a Sunday-first week layout.
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
    pub can_prev: bool,
    pub can_next: bool,
}

/// Tracks the browsed month/year and classifies its days. Paging is clamped
/// between the month of the catalog's earliest fully-dated record and the
/// current real month.
pub struct CalendarNavigator {
    view_year: i32,
    view_month: u32,
    earliest: Option<NaiveDate>,
}

impl CalendarNavigator {
    pub fn new(catalog: &CelebrityCatalog, today: NaiveDate) -> Self {
        Self {
            view_year: today.year(),
            view_month: today.month(),
            earliest: catalog.earliest_fixed_date(),
        }
    }

    pub fn view(&self) -> (i32, u32) {
        (self.view_year, self.view_month)
    }

    pub fn prev(&mut self, today: NaiveDate) {
        if !self.can_prev(today) {
            return;
        }
        if self.view_month == 1 {
            self.view_month = 12;
            self.view_year -= 1;
        } else {
            self.view_month -= 1;
        }
    }

    pub fn next(&mut self, today: NaiveDate) {
        if !self.can_next(today) {
            return;
        }
        if self.view_month == 12 {
            self.view_month = 1;
            self.view_year += 1;
        } else {
            self.view_month += 1;
        }
    }

    fn can_prev(&self, _today: NaiveDate) -> bool {
        match (self.earliest, self.first_of_view()) {
            (Some(earliest), Some(view)) => {
                view > earliest.with_day(1).unwrap_or(earliest)
            }
            _ => false,
        }
    }

    fn can_next(&self, today: NaiveDate) -> bool {
        match self.first_of_view() {
            Some(view) => view < today.with_day(1).unwrap_or(today),
            None => false,
        }
    }

    fn first_of_view(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.view_year, self.view_month, 1)
    }

    pub fn month_view(&self, store: &ProgressStore, today: NaiveDate) -> CalendarMonth {
        let first = self
            .first_of_view()
            .unwrap_or_else(|| today.with_day(1).unwrap_or(today));
        let days = (1..=days_in_month(first.year(), first.month()))
            .filter_map(|day| NaiveDate::from_ymd_opt(first.year(), first.month(), day))
            .map(|date| DayCell {
                date,
                status: classify(store, date, today),
            })
            .collect_vec();

        CalendarMonth {
            year: first.year(),
            month: first.month(),
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
            can_prev: self.can_prev(today),
            can_next: self.can_next(today),
        }
    }
}

fn classify(store: &ProgressStore, date: NaiveDate, today: NaiveDate) -> DayStatus {
    if let Some(result) = store.get_result(date) {
        if result.solved {
            DayStatus::Solved
        } else {
            DayStatus::Failed
        }
    } else if date > today {
        DayStatus::Locked
    } else if date == today {
        DayStatus::Today
    } else {
        DayStatus::Playable
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}
