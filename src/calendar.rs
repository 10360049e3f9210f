//! Month calendar grid for the reservations view.
//!
//! Weeks start on Sunday. Every cell of a [`MonthGrid`] belongs to a complete
//! row of seven; days outside the requested month are filler cells without a
//! date or reservations.

use crate::models::Reservation;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

const DAYS_PER_WEEK: usize = 7;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// A validated Gregorian month, `month` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidArgument(format!(
                "month {month} is outside 1..=12"
            )));
        }
        let value = Self { year, month };
        // Both ends of the month must be representable.
        value.first_day()?;
        value.following().first_day()?;
        Ok(value)
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> Result<NaiveDate, CalendarError> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            CalendarError::InvalidArgument(format!(
                "{}-{:02} is outside the supported calendar range",
                self.year, self.month
            ))
        })
    }

    pub fn days_in_month(self) -> Result<u32, CalendarError> {
        let first = self.first_day()?;
        let next = self.following().first_day()?;
        Ok((next - first).num_days() as u32)
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        self.following()
    }

    fn following(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn title(self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    /// `None` for filler cells of the adjacent months.
    pub date: Option<NaiveDate>,
    pub day: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub occupying_reservations: Vec<Reservation>,
}

impl DayCell {
    fn filler(day: u32) -> Self {
        Self {
            date: None,
            day,
            is_current_month: false,
            is_today: false,
            occupying_reservations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|cell| cell.is_current_month)
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == Some(date))
    }
}

/// Lays out `year`/`month` (one-based) as Sunday-first weeks and attaches
/// every reservation whose `[check_in, check_out)` stay covers each day.
///
/// `today` only drives [`DayCell::is_today`]; pass a plain date, never a
/// timestamp, so the comparison is by calendar day.
pub fn build(
    year: i32,
    month: u32,
    reservations: &[Reservation],
    today: NaiveDate,
) -> Result<MonthGrid, CalendarError> {
    let target = YearMonth::new(year, month)?;
    let first = target.first_day()?;
    let days_in_month = target.days_in_month()?;
    let leading = first.weekday().num_days_from_sunday();

    let mut cells = Vec::with_capacity(6 * DAYS_PER_WEEK);

    if leading > 0 {
        let previous_len = target.previous().days_in_month()?;
        for day in (previous_len - leading + 1)..=previous_len {
            cells.push(DayCell::filler(day));
        }
    }

    for offset in 0..days_in_month {
        let date = first + Duration::days(i64::from(offset));
        let occupying_reservations = reservations
            .iter()
            .filter(|reservation| reservation.occupies(date))
            .cloned()
            .collect();
        cells.push(DayCell {
            date: Some(date),
            day: offset + 1,
            is_current_month: true,
            is_today: date == today,
            occupying_reservations,
        });
    }

    let mut next_day = 1;
    while cells.len() % DAYS_PER_WEEK != 0 {
        cells.push(DayCell::filler(next_day));
        next_day += 1;
    }

    Ok(MonthGrid {
        year: target.year(),
        month: target.month(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationStatus;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn reservation(id: i64, guest: &str, check_in: NaiveDate, check_out: NaiveDate) -> Reservation {
        Reservation {
            id,
            room_id: 1,
            room_number: Some("101".into()),
            room_name: Some("Standard Room 1".into()),
            guest_name: guest.into(),
            guest_email: String::new(),
            guest_phone: String::new(),
            check_in_date: check_in,
            check_out_date: check_out,
            nights: (check_out - check_in).num_days(),
            total_price: 0.0,
            amount_paid: 0.0,
            payment_status: "pending".into(),
            status: ReservationStatus::Confirmed,
            created_at: None,
            notes: String::new(),
        }
    }

    #[test]
    fn rejects_month_out_of_range() {
        let today = date(2024, 1, 1);
        assert!(matches!(build(2024, 0, &[], today), Err(CalendarError::InvalidArgument(_))));
        assert!(matches!(build(2024, 13, &[], today), Err(CalendarError::InvalidArgument(_))));
    }

    #[test]
    fn every_month_fills_complete_weeks_aligned_to_weekday() {
        let today = date(2000, 1, 1);
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let grid = build(year, month, &[], today).unwrap();
                let first = date(year, month, 1);
                let leading = first.weekday().num_days_from_sunday() as usize;
                let days = YearMonth::new(year, month).unwrap().days_in_month().unwrap() as usize;

                assert_eq!(grid.cells.len() % 7, 0, "{year}-{month}");
                assert!(grid.cells.len() >= days + leading);
                assert!(grid.cells.len() - (days + leading) < 7);

                let first_in_month = grid.cells.iter().position(|cell| cell.is_current_month).unwrap();
                assert_eq!(first_in_month, leading);
                assert_eq!(grid.cells[first_in_month].date, Some(first));
                assert_eq!(grid.days().count(), days);
            }
        }
    }

    #[test]
    fn leap_february_has_twenty_nine_days() {
        let today = date(2024, 1, 1);
        assert_eq!(build(2024, 2, &[], today).unwrap().days().count(), 29);
        assert_eq!(build(2023, 2, &[], today).unwrap().days().count(), 28);
    }

    #[test]
    fn filler_cells_carry_adjacent_day_numbers() {
        // March 2024 starts on a Friday; February 2024 has 29 days.
        let grid = build(2024, 3, &[], date(2024, 3, 1)).unwrap();
        let leading: Vec<u32> = grid.cells[..5].iter().map(|cell| cell.day).collect();
        assert_eq!(leading, vec![25, 26, 27, 28, 29]);
        assert!(grid.cells[..5].iter().all(|cell| cell.date.is_none() && !cell.is_current_month));

        let trailing: Vec<u32> = grid
            .cells
            .iter()
            .skip(5 + 31)
            .map(|cell| cell.day)
            .collect();
        assert_eq!(trailing, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_filler() {
        // September 2024 starts on a Sunday.
        let grid = build(2024, 9, &[], date(2024, 9, 1)).unwrap();
        assert!(grid.cells[0].is_current_month);
        assert_eq!(grid.cells[0].day, 1);
    }

    #[test]
    fn marks_today_only_inside_the_month() {
        let grid = build(2024, 3, &[], date(2024, 3, 15)).unwrap();
        let todays: Vec<&DayCell> = grid.cells.iter().filter(|cell| cell.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, Some(date(2024, 3, 15)));

        // 2024-04-01 is drawn as a trailing filler of March, never as today.
        let grid = build(2024, 3, &[], date(2024, 4, 1)).unwrap();
        assert_eq!(grid.cells.iter().filter(|cell| cell.is_today).count(), 0);
    }

    #[test]
    fn stay_is_half_open() {
        let stay = reservation(1, "Ada", date(2024, 3, 10), date(2024, 3, 13));
        let grid = build(2024, 3, std::slice::from_ref(&stay), date(2024, 3, 1)).unwrap();

        let occupied: Vec<u32> = grid
            .days()
            .filter(|cell| !cell.occupying_reservations.is_empty())
            .map(|cell| cell.day)
            .collect();
        assert_eq!(occupied, vec![10, 11, 12]);
        assert!(grid.cell_for(date(2024, 3, 13)).unwrap().occupying_reservations.is_empty());
    }

    #[test]
    fn stays_crossing_month_edges_are_clipped() {
        let stay = reservation(1, "Grace", date(2024, 2, 27), date(2024, 3, 2));
        let grid = build(2024, 3, std::slice::from_ref(&stay), date(2024, 3, 1)).unwrap();
        assert_eq!(grid.cell_for(date(2024, 3, 1)).unwrap().occupying_reservations.len(), 1);
        assert!(grid.cell_for(date(2024, 3, 2)).unwrap().occupying_reservations.is_empty());
        assert!(grid.cells.iter().filter(|cell| !cell.is_current_month).all(|cell| cell.occupying_reservations.is_empty()));
    }

    #[test]
    fn overlapping_stays_keep_input_order() {
        let later = reservation(2, "Zed", date(2024, 3, 5), date(2024, 3, 8));
        let earlier = reservation(1, "Amy", date(2024, 3, 4), date(2024, 3, 7));
        let grid = build(2024, 3, &[later, earlier], date(2024, 3, 1)).unwrap();
        let guests: Vec<&str> = grid
            .cell_for(date(2024, 3, 6))
            .unwrap()
            .occupying_reservations
            .iter()
            .map(|r| r.guest_name.as_str())
            .collect();
        assert_eq!(guests, vec!["Zed", "Amy"]);
    }

    #[test]
    fn empty_reservations_leave_every_day_free() {
        let grid = build(2024, 7, &[], date(2024, 7, 4)).unwrap();
        assert!(grid.cells.iter().all(|cell| cell.occupying_reservations.is_empty()));
    }

    #[test]
    fn build_is_idempotent() {
        let stays = vec![
            reservation(1, "Ada", date(2024, 3, 10), date(2024, 3, 13)),
            reservation(2, "Bob", date(2024, 3, 30), date(2024, 4, 2)),
        ];
        let today = date(2024, 3, 11);
        assert_eq!(build(2024, 3, &stays, today).unwrap(), build(2024, 3, &stays, today).unwrap());
    }

    #[test]
    fn navigation_wraps_years() {
        let january = YearMonth::new(2024, 1).unwrap();
        assert_eq!(january.previous(), YearMonth::new(2023, 12).unwrap());
        assert_eq!(january.previous().next(), january);
        assert_eq!(YearMonth::new(2024, 12).unwrap().next(), YearMonth::new(2025, 1).unwrap());
        assert_eq!(january.title(), "January 2024");
        assert_eq!(january.to_string(), "2024-01");
        assert_eq!(YearMonth::containing(date(2024, 2, 29)).days_in_month().unwrap(), 29);
    }
}
