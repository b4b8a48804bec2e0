use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Calendar granularity. Month is the default view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarView {
    Day,
    Week,
    Month,
}

impl CalendarView {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }

    pub const ALL: &'static [CalendarView] =
        &[CalendarView::Month, CalendarView::Week, CalendarView::Day];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekStart {
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Sunday => "Sunday",
        }
    }

    pub const ALL: &'static [WeekStart] = &[WeekStart::Monday, WeekStart::Sunday];
}

/// First and last day of the week containing `date`.
pub fn week_bounds(date: NaiveDate, week_start: WeekStart) -> (NaiveDate, NaiveDate) {
    let offset = match week_start {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    let start = date - Duration::days(offset as i64);
    (start, start + Duration::days(6))
}

/// Inclusive date range visible for a (reference date, view) pair.
///
/// Month ranges always align to whole weeks so the grid has no partial
/// leading or trailing week.
pub fn visible_range(
    view: CalendarView,
    date: NaiveDate,
    week_start: WeekStart,
) -> (NaiveDate, NaiveDate) {
    match view {
        CalendarView::Day => (date, date),
        CalendarView::Week => week_bounds(date, week_start),
        CalendarView::Month => {
            let first = date.with_day(1).unwrap_or(date);
            let last = last_day_of_month(first);
            (
                week_bounds(first, week_start).0,
                week_bounds(last, week_start).1,
            )
        }
    }
}

/// Move the reference date one step backward or forward for the view.
pub fn step(view: CalendarView, date: NaiveDate, forward: bool) -> NaiveDate {
    match view {
        CalendarView::Day => {
            if forward {
                date + Duration::days(1)
            } else {
                date - Duration::days(1)
            }
        }
        CalendarView::Week => {
            if forward {
                date + Duration::days(7)
            } else {
                date - Duration::days(7)
            }
        }
        CalendarView::Month => {
            let months = chrono::Months::new(1);
            if forward {
                date.checked_add_months(months).unwrap_or(date)
            } else {
                date.checked_sub_months(months).unwrap_or(date)
            }
        }
    }
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// A manual slot selection covering at least a full day is treated as an
/// all-day selection when opening a draft.
pub fn is_all_day_span(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    end.signed_duration_since(start) >= Duration::hours(24)
}

/// Monotonically increasing reload sequence. A response carries the number
/// it was issued with and is applied only while that number is still the
/// latest, so a late answer can never overwrite newer state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSequence(u64);

impl LoadSequence {
    pub fn issue(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn accepts(&self, seq: u64) -> bool {
        seq == self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_range_is_single_day() {
        let date = d(2026, 4, 15);
        assert_eq!(
            visible_range(CalendarView::Day, date, WeekStart::Monday),
            (date, date)
        );
    }

    #[test]
    fn week_range_spans_exactly_one_week() {
        // 2026-04-15 is a Wednesday.
        let (start, end) = visible_range(CalendarView::Week, d(2026, 4, 15), WeekStart::Monday);
        assert_eq!(start, d(2026, 4, 13));
        assert_eq!(end, d(2026, 4, 19));
        assert_eq!((end - start).num_days(), 6);
    }

    #[test]
    fn week_range_honors_sunday_start() {
        let (start, end) = visible_range(CalendarView::Week, d(2026, 4, 15), WeekStart::Sunday);
        assert_eq!(start, d(2026, 4, 12));
        assert_eq!(end, d(2026, 4, 18));
    }

    #[test]
    fn month_range_aligns_to_week_boundaries() {
        // April 2026 begins on a Wednesday; the visible range must reach back
        // to the week boundary before the 1st and forward past the 30th.
        let (start, end) = visible_range(CalendarView::Month, d(2026, 4, 15), WeekStart::Monday);
        assert_eq!(start, d(2026, 3, 30));
        assert_eq!(end, d(2026, 5, 3));
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(end.weekday(), Weekday::Sun);
    }

    #[test]
    fn month_range_with_sunday_week_start() {
        let (start, end) = visible_range(CalendarView::Month, d(2026, 4, 15), WeekStart::Sunday);
        assert_eq!(start, d(2026, 3, 29));
        assert_eq!(end, d(2026, 5, 2));
        assert_eq!(start.weekday(), Weekday::Sun);
        assert_eq!(end.weekday(), Weekday::Sat);
    }

    #[test]
    fn month_step_clamps_to_valid_dates() {
        assert_eq!(step(CalendarView::Month, d(2026, 1, 31), true), d(2026, 2, 28));
        assert_eq!(step(CalendarView::Month, d(2026, 3, 15), false), d(2026, 2, 15));
        assert_eq!(step(CalendarView::Day, d(2026, 3, 1), false), d(2026, 2, 28));
    }

    #[test]
    fn stale_responses_are_rejected() {
        let mut seq = LoadSequence::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.accepts(first));
        assert!(seq.accepts(second));
    }

    #[test]
    fn all_day_span_threshold() {
        let start = d(2026, 4, 1).and_hms_opt(0, 0, 0).unwrap();
        let full_day = d(2026, 4, 2).and_hms_opt(0, 0, 0).unwrap();
        let shorter = d(2026, 4, 1).and_hms_opt(23, 0, 0).unwrap();
        assert!(is_all_day_span(start, full_day));
        assert!(!is_all_day_span(start, shorter));
    }
}
