//! Projection of day offsets onto calendar dates.

use chrono::{NaiveDate, TimeDelta};
use thiserror::Error;

use crate::analysis::Analysis;
use crate::models::VertexId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Day offset {0} is outside the supported date range")]
    OutOfRange(i64),
}

/// Calendar dates of one vertex. Finish dates are start + duration days.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEntry {
    pub vertex: VertexId,
    pub earliest_start: NaiveDate,
    pub earliest_finish: NaiveDate,
    pub latest_start: NaiveDate,
    pub latest_finish: NaiveDate,
    pub slack_days: i64,
}

fn offset(start: NaiveDate, days: i64) -> Result<NaiveDate, CalendarError> {
    TimeDelta::try_days(days)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or(CalendarError::OutOfRange(days))
}

fn finish(start: NaiveDate, begin: i64, duration: i64) -> Result<NaiveDate, CalendarError> {
    let days = begin
        .checked_add(duration)
        .ok_or(CalendarError::OutOfRange(begin))?;
    offset(start, days)
}

/// Map every vertex of `analysis` onto the calendar, day 0 being `start`.
/// Entries follow the analysis processing order.
pub fn project_calendar(
    analysis: &Analysis,
    start: NaiveDate,
) -> Result<Vec<CalendarEntry>, CalendarError> {
    analysis
        .order
        .iter()
        .map(|&vertex| {
            let duration = analysis.graph.duration(vertex).unwrap_or(0);
            let earliest = analysis.earliest.get(&vertex).copied().unwrap_or(0);
            let latest = analysis.latest.get(&vertex).copied().unwrap_or(0);
            Ok(CalendarEntry {
                vertex,
                earliest_start: offset(start, earliest)?,
                earliest_finish: finish(start, earliest, duration)?,
                latest_start: offset(start, latest)?,
                latest_finish: finish(start, latest, duration)?,
                slack_days: latest - earliest,
            })
        })
        .collect()
}
