//! Contiguous calendar ranges.

use polars::prelude::*;
use shelfgrid_primitives::{Date, columns::DATE};

use crate::PrepError;

/// Inclusive, gap-free range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    first: Date,
    last: Date,
}

impl DateRange {
    /// Create a range from `first` to `last`, inclusive.
    ///
    /// # Errors
    /// Returns `PrepError::InvalidDateRange` if `last` precedes `first`.
    pub fn new(first: Date, last: Date) -> Result<Self, PrepError> {
        if last < first {
            return Err(PrepError::InvalidDateRange { first, last });
        }
        Ok(Self { first, last })
    }

    /// A range covering a single day.
    #[must_use]
    pub const fn single(day: Date) -> Self {
        Self { first: day, last: day }
    }

    /// First day.
    #[must_use]
    pub const fn first(&self) -> Date {
        self.first
    }

    /// Last day.
    #[must_use]
    pub const fn last(&self) -> Date {
        self.last
    }

    /// Number of days, `(last - first) + 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.last - self.first).num_days() as usize + 1
    }

    /// Always false: a range holds at least one day.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether `day` falls inside the range.
    #[must_use]
    pub fn contains(&self, day: Date) -> bool {
        self.first <= day && day <= self.last
    }

    /// Position of `day` counted from the first day.
    #[must_use]
    pub fn offset_of(&self, day: Date) -> Option<usize> {
        self.contains(day).then(|| (day - self.first).num_days() as usize)
    }

    /// Days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        self.first.iter_days().take(self.len())
    }

    /// One-column frame (`date`) holding every day in order.
    ///
    /// # Errors
    /// Returns a polars error if the frame cannot be built.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let days: Vec<Date> = self.days().collect();
        DataFrame::new(vec![Column::new(DATE.into(), days)])
    }
}

/// Convert the physical representation of a polars `Date`, days since
/// 1970-01-01, into a calendar day.
pub(crate) fn from_epoch_days(days: i32) -> Date {
    Date::default() + chrono::Duration::days(i64::from(days))
}

/// Compute the contiguous range spanning the earliest and latest observation.
///
/// # Arguments
/// * `observations` - Frame with a `date` column
///
/// # Errors
/// Returns `PrepError::EmptyInput` if there are no dated observations.
pub fn date_range(observations: &LazyFrame) -> Result<DateRange, PrepError> {
    let bounds = observations
        .clone()
        .select([
            col(DATE).min().cast(DataType::Int32).alias("first"),
            col(DATE).max().cast(DataType::Int32).alias("last"),
        ])
        .collect()?;

    let first = bounds.column("first")?.i32()?.get(0);
    let last = bounds.column("last")?.i32()?.get(0);

    match (first, last) {
        (Some(first), Some(last)) => DateRange::new(from_epoch_days(first), from_epoch_days(last)),
        _ => Err(PrepError::EmptyInput),
    }
}
