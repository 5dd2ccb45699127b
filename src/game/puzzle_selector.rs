use std::rc::Rc;

use chrono::NaiveDate;

use super::catalog::CelebrityCatalog;
use crate::model::{month_day_key, CelebrityRecord};

/// Maps calendar dates to celebrities. Selection is a pure function of the
/// month-day: the same date always yields the same celebrity, across sessions
/// and across years landing on the same month-day.
pub struct PuzzleSelector {
    catalog: CelebrityCatalog,
}

impl PuzzleSelector {
    pub fn new(catalog: CelebrityCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CelebrityCatalog {
        &self.catalog
    }

    pub fn select_for_date(&self, date: NaiveDate) -> Rc<CelebrityRecord> {
        self.select_for_month_day(&month_day_key(date))
    }

    pub fn select_for_month_day(&self, month_day: &str) -> Rc<CelebrityRecord> {
        self.catalog
            .find_by_month_day(month_day)
            .unwrap_or_else(|| self.catalog.fallback_for(month_day))
    }
}
