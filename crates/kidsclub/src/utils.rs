use chrono::NaiveDate;
use serde::Serialize;

use crate::types::ResultTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeStats {
    pub operating_days: usize,
    pub closed_days: usize,
    pub total_attendees: usize,
    pub busiest_day: Option<(NaiveDate, usize)>,
    pub failed_slots: usize,
}

impl RangeStats {
    pub fn from_table(table: &ResultTable) -> RangeStats {
        let closed_days = table.rows.iter().filter(|r| r.is_closed()).count();
        // Earliest date wins a tie.
        let busiest_day = table
            .rows
            .iter()
            .filter(|r| r.total > 0)
            .fold(None, |best: Option<(NaiveDate, usize)>, r| match best {
                Some((_, n)) if n >= r.total => best,
                _ => Some((r.date, r.total)),
            });

        RangeStats {
            operating_days: table.len() - closed_days,
            closed_days,
            total_attendees: table.rows.iter().map(|r| r.total).sum(),
            busiest_day,
            failed_slots: table.rows.iter().map(|r| r.failed_slots.len()).sum(),
        }
    }
}

impl std::fmt::Display for RangeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Operating days:  {}", self.operating_days)?;
        writeln!(f, "  Closed days:     {}", self.closed_days)?;
        writeln!(f, "  Total attendees: {}명", self.total_attendees)?;
        if let Some((date, count)) = self.busiest_day {
            writeln!(f, "  Busiest day:     {} ({}명)", date, count)?;
        }
        if self.failed_slots > 0 {
            writeln!(
                f,
                "  Failed windows:  {} (shown as empty)",
                self.failed_slots
            )?;
        }
        Ok(())
    }
}
