use std::fmt::{Display, Formatter};

use serde::Serialize;

pub use formatters::*;

use crate::constants::PAGE_SIZE;

mod formatters;

/// One entry of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRecord {
    /// The name of a user or group.
    pub label: String,

    /// The value this record is ranked by, f.e. the number
    /// of discovered networks.
    pub metric: u64,

    /// `True` if this record must never be displayed.
    pub excluded: bool,
}

impl RankedRecord {
    pub fn new(label: impl Into<String>, metric: u64) -> Self {
        RankedRecord {
            label: label.into(),
            metric,
            excluded: false,
        }
    }

    /// Exclude this record if the condition holds.
    pub fn excluded_if(mut self, condition: bool) -> Self {
        self.excluded = self.excluded || condition;
        self
    }
}

/// Remove excluded records, as well as any record that does not pass the
/// given predicate. The order of the remaining records is retained.
pub fn filter<I, P>(records: I, keep: P) -> Vec<RankedRecord>
where
    I: IntoIterator<Item = RankedRecord>,
    P: Fn(&RankedRecord) -> bool,
{
    records
        .into_iter()
        .filter(|record| !record.excluded && keep(record))
        .collect()
}

/// The number of pages needed to display a number of records.
///
/// There is always at least one page, even if it has to be empty.
pub fn page_count(visible_count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    let full = visible_count / page_size;
    let partial = if visible_count % page_size > 0 { 1 } else { 0 };
    (full + partial).max(1)
}

/// Render a page of records.
///
/// The ranks continue across pages, f.e. the second page of size 10
/// starts at the 11th rank. Indices past the last page produce no rows.
pub fn render_page<F>(
    visible: &[RankedRecord],
    page: usize,
    page_size: usize,
    title: &str,
    format_metric: F,
) -> Page
where
    F: Fn(u64) -> String,
{
    let start = page.saturating_mul(page_size);
    let rows = visible
        .iter()
        .enumerate()
        .skip(start)
        .take(page_size)
        .map(|(idx, record)| RankRow {
            ordinal: ordinal(idx + 1),
            label: record.label.clone(),
            metric: format_metric(record.metric),
        })
        .collect();

    Page {
        title: title.to_string(),
        rows,
    }
}

/// A rendered page of a ranking.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub rows: Vec<RankRow>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RankRow {
    /// The record's rank among all visible records, f.e. "11th".
    pub ordinal: String,

    pub label: String,

    /// The metric with grouped digits.
    pub metric: String,
}

impl Display for RankRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} | Total: {}", self.ordinal, self.label, self.metric)
    }
}

/// A point-in-time snapshot of the visible records of a leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedList {
    visible: Vec<RankedRecord>,
}

impl RankedList {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RankedRecord>,
    {
        RankedList {
            visible: filter(records, |_| true),
        }
    }

    /// Build a list from API entries, using the given function
    /// to extract a record from each entry.
    pub fn from_entries<T, I, F>(entries: I, extract: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(T) -> RankedRecord,
    {
        RankedList::new(entries.into_iter().map(extract))
    }

    pub fn visible(&self) -> &[RankedRecord] {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.visible.len(), PAGE_SIZE)
    }

    /// The zero-based index of the last page.
    pub fn max_page(&self) -> usize {
        self.page_count() - 1
    }

    pub fn render_page(&self, page: usize, title: &str) -> Page {
        render_page(&self.visible, page, PAGE_SIZE, title, format_metric)
    }
}
