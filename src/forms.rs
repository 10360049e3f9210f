use crate::models::{
    PasswordChange, ReservationDraft, ReservationStatus, ReservationUpdate, RoomDraft, RoomUpdate,
    SettingsUpdate,
};
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} is not a valid {expected}: {value:?}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("check-out date must be after check-in date")]
    DatesOutOfOrder,

    #[error("new password must be at least 6 characters")]
    PasswordTooShort,

    #[error("new passwords do not match")]
    PasswordMismatch,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn credentials(&self) -> Result<(&str, &str), FormError> {
        let username = required("username", &self.username)?;
        let password = required("password", &self.password)?;
        Ok((username, password))
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReservationForm {
    #[serde(default)]
    pub guest_name: String,
    #[serde(default)]
    pub guest_email: String,
    #[serde(default)]
    pub guest_phone: String,
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub check_in_date: String,
    #[serde(default)]
    pub check_out_date: String,
    #[serde(default)]
    pub amount_paid: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub notes: String,
}

impl TryFrom<ReservationForm> for ReservationDraft {
    type Error = FormError;

    fn try_from(form: ReservationForm) -> Result<Self, Self::Error> {
        let guest_name = required("guest name", &form.guest_name)?.to_string();
        let room_id = parse_id("room", required("room", &form.room_id)?)?;
        let check_in_date = parse_date("check-in date", required("check-in date", &form.check_in_date)?)?;
        let check_out_date =
            parse_date("check-out date", required("check-out date", &form.check_out_date)?)?;
        if check_out_date <= check_in_date {
            return Err(FormError::DatesOutOfOrder);
        }
        let amount_paid = optional(&form.amount_paid)
            .map(|value| parse_amount("amount paid", value))
            .transpose()?
            .unwrap_or(0.0);
        let payment_status = optional(&form.payment_status).unwrap_or("pending").to_string();

        Ok(Self {
            guest_name,
            room_id,
            check_in_date,
            check_out_date,
            guest_email: form.guest_email.trim().to_string(),
            guest_phone: form.guest_phone.trim().to_string(),
            amount_paid,
            payment_status,
            notes: form.notes.trim().to_string(),
        })
    }
}

/// Edit form. Blank text inputs are sent as blank so contact details and
/// notes can be cleared; blank dates, amounts and selects mean "unchanged".
#[derive(Debug, Default, Deserialize)]
pub struct ReservationEditForm {
    #[serde(default)]
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub check_in_date: String,
    #[serde(default)]
    pub check_out_date: String,
    #[serde(default)]
    pub amount_paid: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub status: String,
    pub notes: Option<String>,
}

impl TryFrom<ReservationEditForm> for ReservationUpdate {
    type Error = FormError;

    fn try_from(form: ReservationEditForm) -> Result<Self, Self::Error> {
        let check_in_date = optional(&form.check_in_date)
            .map(|value| parse_date("check-in date", value))
            .transpose()?;
        let check_out_date = optional(&form.check_out_date)
            .map(|value| parse_date("check-out date", value))
            .transpose()?;
        if let (Some(check_in), Some(check_out)) = (check_in_date, check_out_date) {
            if check_out <= check_in {
                return Err(FormError::DatesOutOfOrder);
            }
        }

        let status = optional(&form.status)
            .map(parse_status)
            .transpose()?;

        Ok(Self {
            guest_name: optional(&form.guest_name).map(str::to_string),
            guest_email: trimmed(form.guest_email),
            guest_phone: trimmed(form.guest_phone),
            room_id: optional(&form.room_id)
                .map(|value| parse_id("room", value))
                .transpose()?,
            check_in_date,
            check_out_date,
            amount_paid: optional(&form.amount_paid)
                .map(|value| parse_amount("amount paid", value))
                .transpose()?,
            payment_status: optional(&form.payment_status).map(str::to_string),
            status,
            notes: trimmed(form.notes),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    pub hotel_name: Option<String>,
    pub hotel_address: Option<String>,
    pub hotel_phone: Option<String>,
    pub hotel_email: Option<String>,
}

impl TryFrom<SettingsForm> for SettingsUpdate {
    type Error = FormError;

    fn try_from(form: SettingsForm) -> Result<Self, Self::Error> {
        let hotel_name = match form.hotel_name {
            Some(name) => Some(required("hotel name", &name)?.to_string()),
            None => None,
        };

        Ok(Self {
            hotel_name,
            hotel_address: trimmed(form.hotel_address),
            hotel_phone: trimmed(form.hotel_phone),
            hotel_email: trimmed(form.hotel_email),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RoomForm {
    #[serde(default)]
    pub room_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub room_type: String,
    #[serde(default)]
    pub price: String,
}

impl TryFrom<RoomForm> for RoomDraft {
    type Error = FormError;

    fn try_from(form: RoomForm) -> Result<Self, Self::Error> {
        let room_number = required("room number", &form.room_number)?.to_string();
        let price = optional(&form.price)
            .map(|value| parse_amount("price", value))
            .transpose()?
            .unwrap_or(0.0);

        Ok(Self {
            room_number,
            name: form.name.trim().to_string(),
            room_type: optional(&form.room_type).unwrap_or("Standard").to_string(),
            price,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RoomEditForm {
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub room_type: String,
    #[serde(default)]
    pub price: String,
}

impl TryFrom<RoomEditForm> for RoomUpdate {
    type Error = FormError;

    fn try_from(form: RoomEditForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: trimmed(form.name),
            room_type: optional(&form.room_type).map(str::to_string),
            price: optional(&form.price)
                .map(|value| parse_amount("price", value))
                .transpose()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl TryFrom<PasswordForm> for PasswordChange {
    type Error = FormError;

    fn try_from(form: PasswordForm) -> Result<Self, Self::Error> {
        let current_password = required("current password", &form.current_password)?.to_string();
        let new_password = required("new password", &form.new_password)?.to_string();
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        if form.confirm_password.trim() != new_password {
            return Err(FormError::PasswordMismatch);
        }

        Ok(Self {
            current_password,
            new_password,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    optional(value).ok_or(FormError::Missing(field))
}

fn optional(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Present-but-blank stays `Some("")`; only a missing field is `None`.
fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string())
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| FormError::Invalid {
        field,
        expected: "date (YYYY-MM-DD)",
        value: value.to_string(),
    })
}

fn parse_id(field: &'static str, value: &str) -> Result<i64, FormError> {
    value
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| FormError::Invalid {
            field,
            expected: "id",
            value: value.to_string(),
        })
}

fn parse_amount(field: &'static str, value: &str) -> Result<f64, FormError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .ok_or_else(|| FormError::Invalid {
            field,
            expected: "amount",
            value: value.to_string(),
        })
}

fn parse_status(value: &str) -> Result<ReservationStatus, FormError> {
    match serde_json::from_value(serde_json::Value::String(value.to_lowercase())) {
        Ok(ReservationStatus::Unknown) | Err(_) => Err(FormError::Invalid {
            field: "status",
            expected: "reservation status",
            value: value.to_string(),
        }),
        Ok(status) => Ok(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ReservationForm {
        ReservationForm {
            guest_name: "  Ada Lovelace ".into(),
            room_id: "3".into(),
            check_in_date: "2024-03-10".into(),
            check_out_date: "2024-03-13".into(),
            ..Default::default()
        }
    }

    #[test]
    fn reservation_form_marshals_to_draft() {
        let draft = ReservationDraft::try_from(complete_form()).unwrap();
        assert_eq!(draft.guest_name, "Ada Lovelace");
        assert_eq!(draft.room_id, 3);
        assert_eq!(draft.payment_status, "pending");
        assert_eq!(draft.amount_paid, 0.0);

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["check_in_date"], "2024-03-10");
        assert_eq!(json["check_out_date"], "2024-03-13");
    }

    #[test]
    fn reservation_form_requires_ordered_dates() {
        let mut form = complete_form();
        form.check_out_date = "2024-03-10".into();
        assert_eq!(ReservationDraft::try_from(form).unwrap_err(), FormError::DatesOutOfOrder);
    }

    #[test]
    fn reservation_form_reports_bad_fields() {
        let mut form = complete_form();
        form.guest_name = "   ".into();
        assert_eq!(ReservationDraft::try_from(form).unwrap_err(), FormError::Missing("guest name"));

        let mut form = complete_form();
        form.check_in_date = "10/03/2024".into();
        assert!(matches!(
            ReservationDraft::try_from(form),
            Err(FormError::Invalid { field: "check-in date", .. })
        ));

        let mut form = complete_form();
        form.amount_paid = "-5".into();
        assert!(matches!(
            ReservationDraft::try_from(form),
            Err(FormError::Invalid { field: "amount paid", .. })
        ));
    }

    #[test]
    fn edit_form_only_sends_filled_fields() {
        let form = ReservationEditForm {
            guest_phone: Some("+41 79 000 00 00".into()),
            status: "Confirmed".into(),
            ..Default::default()
        };
        let update = ReservationUpdate::try_from(form).unwrap();
        assert_eq!(update.guest_phone.as_deref(), Some("+41 79 000 00 00"));
        assert_eq!(update.status, Some(ReservationStatus::Confirmed));
        assert_eq!(update.guest_name, None);
        assert_eq!(update.notes, None);
    }

    #[test]
    fn edit_form_can_clear_contact_details() {
        let form = ReservationEditForm {
            guest_name: "Ada Lovelace".into(),
            guest_email: Some("  ".into()),
            guest_phone: Some(String::new()),
            notes: Some(String::new()),
            ..Default::default()
        };
        let update = ReservationUpdate::try_from(form).unwrap();
        assert_eq!(update.guest_email.as_deref(), Some(""));
        assert_eq!(update.guest_phone.as_deref(), Some(""));
        assert_eq!(update.notes.as_deref(), Some(""));

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["guest_email"], "");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn edit_form_rejects_unknown_status() {
        let form = ReservationEditForm {
            status: "teleported".into(),
            ..Default::default()
        };
        assert!(ReservationUpdate::try_from(form).is_err());
    }

    #[test]
    fn settings_form_rejects_blank_name() {
        let form = SettingsForm {
            hotel_name: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(SettingsUpdate::try_from(form).unwrap_err(), FormError::Missing("hotel name"));
    }

    #[test]
    fn room_form_defaults_type_and_price() {
        let form = RoomForm {
            room_number: " 301 ".into(),
            ..Default::default()
        };
        let draft = RoomDraft::try_from(form).unwrap();
        assert_eq!(draft.room_number, "301");
        assert_eq!(draft.room_type, "Standard");
        assert_eq!(draft.price, 0.0);

        let form = RoomForm {
            room_number: "301".into(),
            price: "cheap".into(),
            ..Default::default()
        };
        assert!(matches!(
            RoomDraft::try_from(form),
            Err(FormError::Invalid { field: "price", .. })
        ));
        assert_eq!(
            RoomDraft::try_from(RoomForm::default()).unwrap_err(),
            FormError::Missing("room number")
        );
    }

    #[test]
    fn room_edit_form_skips_blank_price() {
        let form = RoomEditForm {
            name: Some("Garden Suite ".into()),
            room_type: String::new(),
            price: " ".into(),
        };
        let update = RoomUpdate::try_from(form).unwrap();
        assert_eq!(update.name.as_deref(), Some("Garden Suite"));
        assert_eq!(update.room_type, None);
        assert_eq!(update.price, None);
    }

    #[test]
    fn password_form_enforces_length_and_confirmation() {
        let form = |new: &str, confirm: &str| PasswordForm {
            current_password: "secret".into(),
            new_password: new.into(),
            confirm_password: confirm.into(),
        };
        assert_eq!(PasswordChange::try_from(form("abc", "abc")).unwrap_err(), FormError::PasswordTooShort);
        assert_eq!(
            PasswordChange::try_from(form("longer-secret", "longer-secrets")).unwrap_err(),
            FormError::PasswordMismatch
        );
        let change = PasswordChange::try_from(form("sixsix", "sixsix")).unwrap();
        assert_eq!(change.new_password, "sixsix");
        assert_eq!(change.current_password, "secret");
    }

    #[test]
    fn login_form_requires_both_fields() {
        let form = LoginForm {
            username: "frontdesk".into(),
            password: String::new(),
        };
        assert_eq!(form.credentials().unwrap_err(), FormError::Missing("password"));
    }
}
