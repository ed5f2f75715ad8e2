//! Walks a date range day by day and slot by slot, turning the board's
//! reservation fragments into a [`ResultTable`].
//!
//! Requests are issued strictly one after another. A failing window never
//! aborts its day or the range: its cell stays [`Cell::Empty`] and the window
//! is listed in [`DayRow::failed_slots`].

use std::fmt::Display;

use chrono::{Datelike, NaiveDate};

use crate::parser::parse_attendees;
use crate::schedule::{DateRange, is_operating, slots_for, weekday_label};
use crate::types::{Cell, DayRow, ResultTable};

/// Anything that can hand back the reservation fragment for one `k` window on
/// one day. [`Session`](crate::Session) is the real one.
pub trait SlotSource {
    type Error: Display;

    fn fetch_slot(
        &self,
        date: NaiveDate,
        slot_id: u8,
    ) -> impl Future<Output = Result<String, Self::Error>>;
}

pub async fn fetch_range<S: SlotSource>(source: &S, start: NaiveDate, day_count: u32) -> ResultTable {
    fetch_range_of(source, DateRange::new(start, day_count)).await
}

pub async fn fetch_range_of<S: SlotSource>(source: &S, range: DateRange) -> ResultTable {
    log::info!(
        "Fetching {} day(s) from {} to {}...",
        range.days,
        range.start,
        range.end()
    );

    let mut rows = Vec::with_capacity(range.days as usize);
    for (i, date) in range.dates().enumerate() {
        log::info!("[{}/{}] {}", i + 1, range.days, date);
        rows.push(fetch_day(source, date).await);
    }

    ResultTable { rows }
}

/// Week (Monday to Sunday) containing `reference`.
pub async fn fetch_week<S: SlotSource>(source: &S, reference: NaiveDate) -> ResultTable {
    fetch_range_of(source, DateRange::weekly(reference)).await
}

/// Calendar month containing `reference`.
pub async fn fetch_month<S: SlotSource>(source: &S, reference: NaiveDate) -> ResultTable {
    fetch_range_of(source, DateRange::monthly(reference)).await
}

pub async fn fetch_day<S: SlotSource>(source: &S, date: NaiveDate) -> DayRow {
    let weekday = date.weekday();
    let label = weekday_label(weekday);
    if !is_operating(weekday) {
        log::debug!("{} {} is closed", date, label);
        return DayRow::closed(date, label);
    }

    let slots = slots_for(weekday);

    let mut cells: [Cell; 8] = std::array::from_fn(|_| Cell::NotApplicable);
    for (_, slot) in slots {
        cells[slot.index()] = Cell::Empty;
    }

    let mut total = 0;
    let mut failed_slots = Vec::new();

    for &(k, slot) in slots {
        match source.fetch_slot(date, k).await {
            Ok(html) => {
                let names = parse_attendees(&html);
                if !names.is_empty() {
                    total += names.len();
                    cells[slot.index()] = Cell::Names(names);
                }
            }
            Err(e) => {
                log::warn!("Failed to fetch {} {} (k={}): {}", date, slot, k, e);
                failed_slots.push(slot);
            }
        }
    }

    DayRow {
        date,
        weekday: label,
        cells,
        total,
        failed_slots,
    }
}
