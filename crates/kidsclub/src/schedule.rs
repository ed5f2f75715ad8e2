//! Opening hours of the club and the calendar ranges that get queried.
//!
//! The board identifies an hourly window by an opaque `k` value whose meaning
//! changes from one weekday to the next, so the mapping lives here as data.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::types::TimeSlot;

/// `(k, window)` pairs per weekday, Monday first. Monday is closed.
static WEEKDAY_SCHEDULE: [&[(u8, TimeSlot)]; 7] = [
    &[],
    &[(2, TimeSlot::Five), (3, TimeSlot::Six)],
    &[(4, TimeSlot::Three), (1, TimeSlot::Four), (2, TimeSlot::Five)],
    &[(1, TimeSlot::Four), (2, TimeSlot::Five), (3, TimeSlot::Six)],
    &[(1, TimeSlot::Three), (2, TimeSlot::Four), (3, TimeSlot::Five)],
    WEEKEND,
    WEEKEND,
];

const WEEKEND: &[(u8, TimeSlot)] = &[
    (1, TimeSlot::Eleven),
    (2, TimeSlot::Twelve),
    (3, TimeSlot::One),
    (4, TimeSlot::Two),
    (5, TimeSlot::Three),
    (6, TimeSlot::Four),
];

const WEEKDAY_LABELS: [&str; 7] = ["(월)", "(화)", "(수)", "(목)", "(금)", "(토)", "(일)"];

pub fn slots_for(weekday: Weekday) -> &'static [(u8, TimeSlot)] {
    WEEKDAY_SCHEDULE[weekday.num_days_from_monday() as usize]
}

pub fn is_operating(weekday: Weekday) -> bool {
    !slots_for(weekday).is_empty()
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAY_LABELS[weekday.num_days_from_monday() as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub days: u32,
}

impl DateRange {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self { start, days }
    }

    /// Monday-to-Sunday week containing `reference`.
    pub fn weekly(reference: NaiveDate) -> Self {
        Self {
            start: reference.week(Weekday::Mon).first_day(),
            days: 7,
        }
    }

    /// Calendar month containing `reference`.
    pub fn monthly(reference: NaiveDate) -> Self {
        let start = reference.with_day(1).unwrap_or(reference);
        let days = start
            .checked_add_months(Months::new(1))
            .map(|next| next.signed_duration_since(start).num_days() as u32)
            .unwrap_or(31);
        Self { start, days }
    }

    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(u64::from(self.days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.start.iter_days().take(self.days as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn labels(weekday: Weekday) -> Vec<(u8, &'static str)> {
        slots_for(weekday)
            .iter()
            .map(|(k, slot)| (*k, slot.label()))
            .collect()
    }

    #[test]
    fn test_monday_is_closed() {
        assert!(slots_for(Weekday::Mon).is_empty());
        assert!(!is_operating(Weekday::Mon));
    }

    #[test]
    fn test_weekday_tables() {
        assert_eq!(labels(Weekday::Tue), vec![(2, "5~6시"), (3, "6~7시")]);
        assert_eq!(
            labels(Weekday::Wed),
            vec![(4, "3~4시"), (1, "4~5시"), (2, "5~6시")]
        );
        assert_eq!(
            labels(Weekday::Thu),
            vec![(1, "4~5시"), (2, "5~6시"), (3, "6~7시")]
        );
        assert_eq!(
            labels(Weekday::Fri),
            vec![(1, "3~4시"), (2, "4~5시"), (3, "5~6시")]
        );
        let weekend = vec![
            (1, "11~12시"),
            (2, "12~1시"),
            (3, "1~2시"),
            (4, "2~3시"),
            (5, "3~4시"),
            (6, "4~5시"),
        ];
        assert_eq!(labels(Weekday::Sat), weekend);
        assert_eq!(labels(Weekday::Sun), weekend);
    }

    #[test]
    fn test_slot_ids_are_unique_per_day() {
        for weekday in [
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            let slots = slots_for(weekday);
            for (i, (k, slot)) in slots.iter().enumerate() {
                assert!(
                    slots[i + 1..].iter().all(|(k2, s2)| k2 != k && s2 != slot),
                    "{weekday:?} repeats k={k} or {slot}"
                );
            }
        }
    }

    #[test]
    fn test_weekday_labels() {
        assert_eq!(weekday_label(Weekday::Mon), "(월)");
        assert_eq!(weekday_label(Weekday::Sun), "(일)");
    }

    #[test]
    fn test_weekly_range_from_saturday() {
        let range = DateRange::weekly(date(2026, 10, 17));
        assert_eq!(range.start, date(2026, 10, 12));
        assert_eq!(range.start.weekday(), Weekday::Mon);
        assert_eq!(range.days, 7);
        assert_eq!(range.end(), date(2026, 10, 18));
    }

    #[test]
    fn test_weekly_range_from_monday_and_sunday() {
        assert_eq!(DateRange::weekly(date(2026, 10, 12)).start, date(2026, 10, 12));
        assert_eq!(DateRange::weekly(date(2026, 10, 18)).start, date(2026, 10, 12));
    }

    #[test]
    fn test_weekly_range_across_year_boundary() {
        let range = DateRange::weekly(date(2027, 1, 1));
        assert_eq!(range.start, date(2026, 12, 28));
    }

    #[test]
    fn test_monthly_ranges() {
        let oct = DateRange::monthly(date(2026, 10, 17));
        assert_eq!(oct.start, date(2026, 10, 1));
        assert_eq!(oct.days, 31);

        let feb = DateRange::monthly(date(2026, 2, 14));
        assert_eq!(feb.days, 28);

        let leap = DateRange::monthly(date(2028, 2, 29));
        assert_eq!(leap.start, date(2028, 2, 1));
        assert_eq!(leap.days, 29);

        let dec = DateRange::monthly(date(2026, 12, 31));
        assert_eq!(dec.days, 31);
        assert_eq!(dec.end(), date(2026, 12, 31));
    }

    #[test]
    fn test_dates_are_consecutive() {
        let range = DateRange::new(date(2026, 10, 30), 5);
        let dates: Vec<NaiveDate> = range.dates().collect();
        assert_eq!(
            dates,
            vec![
                date(2026, 10, 30),
                date(2026, 10, 31),
                date(2026, 11, 1),
                date(2026, 11, 2),
                date(2026, 11, 3),
            ]
        );
    }
}
