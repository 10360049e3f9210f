use crate::calendar::YearMonth;
use crate::models::{Reservation, ReservationStatus, Room};
use chrono::{Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub date: String,
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub available_rooms: usize,
    pub occupancy_rate: f64,
    pub arrivals_today: usize,
    pub departures_today: usize,
    pub monthly_revenue: f64,
}

pub fn build_summary(rooms: &[Room], reservations: &[Reservation]) -> DashboardSummary {
    build_summary_at(Local::now().date_naive(), rooms, reservations)
}

pub fn build_summary_at(
    today: NaiveDate,
    rooms: &[Room],
    reservations: &[Reservation],
) -> DashboardSummary {
    let total_rooms = rooms.len();
    let occupied_rooms = reservations
        .iter()
        .filter(|reservation| reservation.status == ReservationStatus::Active)
        .count()
        .min(total_rooms);
    let available_rooms = total_rooms - occupied_rooms;

    let occupancy_rate = if total_rooms == 0 {
        0.0
    } else {
        occupied_rooms as f64 / total_rooms as f64 * 100.0
    };

    let arrivals_today = reservations
        .iter()
        .filter(|reservation| {
            reservation.check_in_date == today && reservation.status != ReservationStatus::Cancelled
        })
        .count();

    let departures_today = reservations
        .iter()
        .filter(|reservation| {
            reservation.check_out_date == today && reservation.status == ReservationStatus::Active
        })
        .count();

    let month = YearMonth::containing(today);
    let monthly_revenue = reservations
        .iter()
        .filter(|reservation| {
            month.contains(reservation.check_in_date)
                && reservation.status != ReservationStatus::Cancelled
        })
        .map(|reservation| reservation.total_price)
        .sum();

    DashboardSummary {
        date: today.to_string(),
        total_rooms,
        occupied_rooms,
        available_rooms,
        occupancy_rate,
        arrivals_today,
        departures_today,
        monthly_revenue,
    }
}

/// Rooms ordered the way the front desk lists them, by room number.
pub fn sorted_rooms(rooms: &[Room]) -> Vec<&Room> {
    let mut sorted: Vec<&Room> = rooms.iter().collect();
    sorted.sort_by(|a, b| natural_key(&a.room_number).cmp(&natural_key(&b.room_number)));
    sorted
}

fn natural_key(number: &str) -> (u64, String) {
    let digits: String = number.chars().take_while(|c| c.is_ascii_digit()).collect();
    (digits.parse().unwrap_or(u64::MAX), number.to_string())
}
