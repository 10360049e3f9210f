use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub room_type: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub amenities: String,
    #[serde(default)]
    pub is_occupied: bool,
}

impl Room {
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Room {}", self.room_number)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Active,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the stay still holds the room (not finished or called off).
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub room_id: i64,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
    pub guest_name: String,
    #[serde(default)]
    pub guest_email: String,
    #[serde(default)]
    pub guest_phone: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default)]
    pub nights: i64,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl Reservation {
    /// A guest occupies the room from the check-in day through the night
    /// before departure: `[check_in, check_out)`.
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.check_in_date <= date && date < self.check_out_date
    }

    pub fn room_label(&self) -> String {
        if let Some(name) = self.room_name.as_deref().filter(|name| !name.trim().is_empty()) {
            return name.to_string();
        }
        if let Some(number) = self.room_number.as_deref().filter(|number| !number.trim().is_empty()) {
            return number.to_string();
        }
        format!("Room {}", self.room_id)
    }

    pub fn balance_due(&self) -> f64 {
        (self.total_price - self.amount_paid).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default)]
    pub hotel_address: String,
    #[serde(default)]
    pub hotel_phone: String,
    #[serde(default)]
    pub hotel_email: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_email: Option<String>,
}

/// Body of `POST /api/reservations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub guest_name: String,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_email: String,
    pub guest_phone: String,
    pub amount_paid: f64,
    pub payment_status: String,
    pub notes: String,
}

/// Body of `PUT /api/reservations/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /api/rooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDraft {
    pub room_number: String,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price: f64,
}

/// Body of `PUT /api/rooms/{id}`; the room number cannot be changed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
}

/// Envelope the hotel API uses for mutations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reservation: Option<Reservation>,
    #[serde(default)]
    pub room: Option<Room>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "room_id": 2,
            "room_number": "102",
            "room_name": null,
            "guest_name": "Ada Lovelace",
            "check_in_date": "2024-03-10",
            "check_out_date": "2024-03-13",
            "status": "active"
        })
    }

    #[test]
    fn reservation_parses_sparse_api_payload() {
        let reservation: Reservation = serde_json::from_value(reservation_json()).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Active);
        assert_eq!(reservation.room_label(), "102");
        assert_eq!(reservation.amount_paid, 0.0);
        assert!(reservation.notes.is_empty());
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let mut value = reservation_json();
        value["status"] = serde_json::json!("no_show");
        let reservation: Reservation = serde_json::from_value(value).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Unknown);
    }

    #[test]
    fn occupancy_excludes_departure_day() {
        let reservation: Reservation = serde_json::from_value(reservation_json()).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        assert!(!reservation.occupies(day(9)));
        assert!(reservation.occupies(day(10)));
        assert!(reservation.occupies(day(12)));
        assert!(!reservation.occupies(day(13)));
    }

    #[test]
    fn update_skips_absent_fields() {
        let update = ReservationUpdate {
            notes: Some("late arrival".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "notes": "late arrival" }));
    }

    #[test]
    fn room_payloads_use_type_key() {
        let draft = RoomDraft {
            room_number: "301".into(),
            name: "Suite".into(),
            room_type: "Suite".into(),
            price: 120.0,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "Suite");
        assert!(value.get("room_type").is_none());

        let update = RoomUpdate {
            price: Some(95.0),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({ "price": 95.0 }));
    }
}
