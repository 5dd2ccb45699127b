use std::rc::Rc;

use chrono::NaiveDate;
use itertools::Itertools;
use log::trace;

use super::date_seed;
use crate::model::CelebrityRecord;

static CELEBRITY_DATA: &str = include_str!("../../data/celebrities.json");

/// Static ordered collection of celebrity records. Month-day lookup returns
/// the first match in catalog order; entries whose `date` carries a full year
/// never match a month-day key and are reachable only via the fallback.
#[derive(Debug, Clone)]
pub struct CelebrityCatalog {
    records: Vec<Rc<CelebrityRecord>>,
}

impl CelebrityCatalog {
    /// Loads the embedded catalog. The data ships inside the binary, so a
    /// parse failure is a build defect, not a runtime condition.
    pub fn builtin() -> Self {
        let records: Vec<CelebrityRecord> =
            serde_json::from_str(CELEBRITY_DATA).expect("embedded celebrity data is valid JSON");
        Self::new(records)
    }

    /// Panics when `records` is empty: every date must resolve to some
    /// celebrity, so an empty catalog is a construction defect.
    pub fn new(records: Vec<CelebrityRecord>) -> Self {
        assert!(!records.is_empty(), "celebrity catalog must not be empty");
        let duplicate_keys = records.iter().map(|r| r.date.as_str()).duplicates().count();
        trace!(
            target: "catalog",
            "Loaded {} celebrity records ({} duplicated date keys)",
            records.len(),
            duplicate_keys
        );
        Self {
            records: records.into_iter().map(Rc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Rc<CelebrityRecord>> {
        self.records.iter()
    }

    /// First record whose date key equals `month_day` exactly.
    pub fn find_by_month_day(&self, month_day: &str) -> Option<Rc<CelebrityRecord>> {
        self.records
            .iter()
            .find(|r| r.date == month_day)
            .map(Rc::clone)
    }

    /// Deterministic fallback for a month-day with no exact match.
    pub fn fallback_for(&self, month_day: &str) -> Rc<CelebrityRecord> {
        let index = date_seed::seed(month_day) as usize % self.records.len();
        Rc::clone(&self.records[index])
    }

    /// Earliest fully-dated record; the calendar cannot page before its month.
    pub fn earliest_fixed_date(&self) -> Option<NaiveDate> {
        self.records.iter().filter_map(|r| r.fixed_date()).min()
    }
}
