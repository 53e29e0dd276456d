use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{format_description::FormatItem, macros::format_description, Date};
use uuid::Uuid;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// User record in the database.
///
/// The password is stored and returned exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(with = "iso_date")]
    pub date_of_birth: Date,
    pub receive_marketing: Option<bool>,
    pub accept_cookies: Option<bool>,
    pub profile_picture: Option<String>,
}

/// Column values for a new `users` row, in insert order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: Date,
    pub receive_marketing: Option<bool>,
    pub accept_cookies: Option<bool>,
    pub profile_picture: Option<String>,
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw, DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn user_serializes_every_column() {
        let user = User {
            id: Uuid::nil(),
            full_name: "Ana".into(),
            email: "ana@x.com".into(),
            password: "pw1".into(),
            date_of_birth: date!(2000 - 01 - 01),
            receive_marketing: Some(true),
            accept_cookies: None,
            profile_picture: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["date_of_birth"], "2000-01-01");
        assert_eq!(json["password"], "pw1");
        assert_eq!(json["receive_marketing"], true);
        assert!(json["accept_cookies"].is_null());
        assert!(json["profile_picture"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 8);
    }

    #[test]
    fn parse_date_accepts_iso_calendar_dates_only() {
        assert_eq!(parse_date("1999-12-31").unwrap(), date!(1999 - 12 - 31));
        assert!(parse_date("31/12/1999").is_err());
        assert!(parse_date("2001-02-29").is_err());
        assert!(parse_date("").is_err());
    }
}
