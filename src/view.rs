//! Pure mapping from the cached hotel state to what the dashboard shows.

use crate::calendar::{self, CalendarError, MonthGrid, YearMonth};
use crate::models::{Reservation, ReservationStatus, Settings};
use crate::state::DashboardData;
use crate::stats::{build_summary_at, sorted_rooms, DashboardSummary};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub hotel_name: String,
    pub username: String,
    pub today: NaiveDate,
    pub month: YearMonth,
    pub previous: YearMonth,
    pub next: YearMonth,
    pub summary: DashboardSummary,
    pub grid: MonthGrid,
    pub rooms: Vec<RoomCard>,
    pub reservations: Vec<ReservationRow>,
    pub settings: Settings,
    pub notice: Option<String>,
    pub stale: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomCard {
    pub id: i64,
    pub number: String,
    pub name: String,
    /// Name as stored, possibly blank; `name` falls back to the number.
    pub stored_name: String,
    pub room_type: String,
    pub price: f64,
    pub occupied: bool,
    pub guest: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRow {
    pub reservation: Reservation,
    pub room_label: String,
    pub can_check_in: bool,
    pub can_check_out: bool,
}

pub fn build_view(
    data: &DashboardData,
    username: &str,
    month: YearMonth,
    today: NaiveDate,
    stale: bool,
) -> Result<DashboardView, CalendarError> {
    let grid = calendar::build(month.year(), month.month(), &data.reservations, today)?;
    let summary = build_summary_at(today, &data.rooms, &data.reservations);

    let rooms = sorted_rooms(&data.rooms)
        .into_iter()
        .map(|room| {
            let active = data.reservations.iter().find(|reservation| {
                reservation.room_id == room.id && reservation.status == ReservationStatus::Active
            });
            let guest = active
                .or_else(|| {
                    data.reservations.iter().find(|reservation| {
                        reservation.room_id == room.id
                            && reservation.status.is_open()
                            && reservation.occupies(today)
                    })
                })
                .map(|reservation| reservation.guest_name.clone());

            RoomCard {
                id: room.id,
                number: room.room_number.clone(),
                name: room.display_name(),
                stored_name: room.name.clone(),
                room_type: room.room_type.clone(),
                price: room.price,
                occupied: room.is_occupied || active.is_some(),
                guest,
            }
        })
        .collect();

    let reservations = data
        .reservations
        .iter()
        .map(|reservation| ReservationRow {
            room_label: reservation.room_label(),
            can_check_in: matches!(
                reservation.status,
                ReservationStatus::Pending | ReservationStatus::Confirmed
            ),
            can_check_out: reservation.status == ReservationStatus::Active,
            reservation: reservation.clone(),
        })
        .collect();

    let hotel_name = if data.settings.hotel_name.trim().is_empty() {
        "Hotel Dashboard".to_string()
    } else {
        data.settings.hotel_name.clone()
    };

    Ok(DashboardView {
        hotel_name,
        username: username.to_string(),
        today,
        month,
        previous: month.previous(),
        next: month.next(),
        summary,
        grid,
        rooms,
        reservations,
        settings: data.settings.clone(),
        notice: data.notice.clone(),
        stale,
    })
}
