use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// One of the hourly booking windows the club ever opens, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TimeSlot {
    #[serde(rename = "11~12시")]
    Eleven,
    #[serde(rename = "12~1시")]
    Twelve,
    #[serde(rename = "1~2시")]
    One,
    #[serde(rename = "2~3시")]
    Two,
    #[serde(rename = "3~4시")]
    Three,
    #[serde(rename = "4~5시")]
    Four,
    #[serde(rename = "5~6시")]
    Five,
    #[serde(rename = "6~7시")]
    Six,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 8] = [
        TimeSlot::Eleven,
        TimeSlot::Twelve,
        TimeSlot::One,
        TimeSlot::Two,
        TimeSlot::Three,
        TimeSlot::Four,
        TimeSlot::Five,
        TimeSlot::Six,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Eleven => "11~12시",
            TimeSlot::Twelve => "12~1시",
            TimeSlot::One => "1~2시",
            TimeSlot::Two => "2~3시",
            TimeSlot::Three => "3~4시",
            TimeSlot::Four => "4~5시",
            TimeSlot::Five => "5~6시",
            TimeSlot::Six => "6~7시",
        }
    }

    /// Column position of this slot within [`TimeSlot::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub const CLOSED_MARKER: &str = "⛔";
pub const NOT_APPLICABLE_MARKER: &str = "-";
pub const EMPTY_MARKER: &str = "";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// The whole day is closed.
    Closed,
    /// The club is open that day but not in this window.
    NotApplicable,
    /// Open window without any reservation (or whose fetch failed).
    Empty,
    Names(Vec<String>),
}

impl Cell {
    pub fn attendee_count(&self) -> usize {
        match self {
            Cell::Names(names) => names.len(),
            _ => 0,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Closed => f.write_str(CLOSED_MARKER),
            Cell::NotApplicable => f.write_str(NOT_APPLICABLE_MARKER),
            Cell::Empty => f.write_str(EMPTY_MARKER),
            Cell::Names(names) => f.write_str(&names.join(", ")),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow {
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub cells: [Cell; 8],
    pub total: usize,
    pub failed_slots: Vec<TimeSlot>,
}

/// Cells keyed by their time label, in column order.
struct LabelledCells<'a>(&'a [Cell; 8]);

impl Serialize for LabelledCells<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (slot, cell) in TimeSlot::ALL.iter().zip(self.0) {
            map.serialize_entry(slot.label(), cell)?;
        }
        map.end()
    }
}

/// Raw values plus the rendered `날짜`/`총인원` columns.
impl Serialize for DayRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut row = serializer.serialize_struct("DayRow", 7)?;
        row.serialize_field("date", &self.date)?;
        row.serialize_field("weekday", self.weekday)?;
        row.serialize_field("date_label", &self.date_label())?;
        row.serialize_field("total", &self.total)?;
        row.serialize_field("total_label", &self.total_label())?;
        row.serialize_field("cells", &LabelledCells(&self.cells))?;
        if self.failed_slots.is_empty() {
            row.skip_field("failed_slots")?;
        } else {
            row.serialize_field("failed_slots", &self.failed_slots)?;
        }
        row.end()
    }
}

impl DayRow {
    pub fn closed(date: NaiveDate, weekday: &'static str) -> Self {
        Self {
            date,
            weekday,
            cells: std::array::from_fn(|_| Cell::Closed),
            total: 0,
            failed_slots: Vec::new(),
        }
    }

    pub fn cell(&self, slot: TimeSlot) -> &Cell {
        &self.cells[slot.index()]
    }

    pub fn is_closed(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Closed)
    }

    pub fn date_label(&self) -> String {
        format!("{} {}", self.date.format("%Y-%m-%d"), self.weekday)
    }

    pub fn total_label(&self) -> String {
        if self.total > 0 {
            format!("{}명", self.total)
        } else {
            EMPTY_MARKER.to_string()
        }
    }

    /// The row as display strings in [`ResultTable::COLUMNS`] order.
    pub fn columns(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(ResultTable::COLUMNS.len());
        out.push(self.date_label());
        out.push(self.total_label());
        out.extend(self.cells.iter().map(|c| c.to_string()));
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultTable {
    pub rows: Vec<DayRow>,
}

impl ResultTable {
    pub const COLUMNS: [&'static str; 10] = [
        "날짜", "총인원", "11~12시", "12~1시", "1~2시", "2~3시", "3~4시", "4~5시", "5~6시", "6~7시",
    ];

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, date: NaiveDate) -> Option<&DayRow> {
        self.rows.iter().find(|r| r.date == date)
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

impl Display for ResultTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<Vec<String>> = self.rows.iter().map(DayRow::columns).collect();
        let widths: Vec<usize> = Self::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, header)| {
                rows.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = Self::COLUMNS
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .collect();
        writeln!(f, "│ {} │", header.join(" │ "))?;

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        writeln!(f, "├─{}─┤", rule.join("─┼─"))?;

        for row in &rows {
            let cells: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
            writeln!(f, "│ {} │", cells.join(" │ "))?;
        }
        Ok(())
    }
}
