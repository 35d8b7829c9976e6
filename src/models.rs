use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single-day session. Bookings are never part of the default wire form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Class {
    pub id: String,
    pub name: String,
    #[serde(with = "midnight_utc")]
    #[schema(value_type = String, format = "date-time", example = "2020-12-12T00:00:00Z")]
    pub date: NaiveDate,
    pub capacity: i64,
    #[serde(skip)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Booking {
    pub id: String,
    pub member_name: String,
}

/// Class together with the bookings made against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassDetail {
    pub id: String,
    pub name: String,
    #[serde(with = "midnight_utc")]
    #[schema(value_type = String, format = "date-time", example = "2020-12-12T00:00:00Z")]
    pub date: NaiveDate,
    pub capacity: i64,
    pub bookings: Vec<Booking>,
}

impl From<Class> for ClassDetail {
    fn from(class: Class) -> Self {
        Self {
            id: class.id,
            name: class.name,
            date: class.date,
            capacity: class.capacity,
            bookings: class.bookings,
        }
    }
}

/// Body of `POST /classes`. Missing fields fall back to their zero value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct ClassRequest {
    #[schema(example = "kayak")]
    pub name: String,
    #[schema(example = "2006-01-01")]
    pub start_date: String,
    #[schema(example = "2006-01-05")]
    pub end_date: String,
    #[schema(example = 20)]
    pub capacity: i64,
}

/// Body of `POST /bookings`; echoed back with `id` filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct BookingRequest {
    pub id: String,
    #[schema(example = "David")]
    pub member_name: String,
    #[schema(example = "lifting")]
    pub class_name: String,
    #[schema(example = "2020-12-12")]
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Calendar dates on the wire are timestamps at midnight UTC, e.g.
/// `2020-12-12T00:00:00Z`. Deserialization also takes a bare `YYYY-MM-DD`.
pub mod midnight_utc {
    use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn format(date: &NaiveDate) -> String {
        date.and_time(NaiveTime::MIN)
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(timestamp.to_utc().date_naive());
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(bookings: Vec<Booking>) -> Class {
        Class {
            id: "1".to_string(),
            name: "class 1".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 12, 12).unwrap(),
            capacity: 20,
            bookings,
        }
    }

    #[test]
    fn test_class_serializes_without_bookings() {
        let class = class(vec![Booking {
            id: "9".to_string(),
            member_name: "David".to_string(),
        }]);
        let json = serde_json::to_string(&class).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","name":"class 1","date":"2020-12-12T00:00:00Z","capacity":20}"#
        );
    }

    #[test]
    fn test_class_date_accepts_both_forms() {
        let from_timestamp: Class = serde_json::from_str(
            r#"{"id":"1","name":"class 1","date":"2020-12-12T00:00:00Z","capacity":20}"#,
        )
        .unwrap();
        let from_date: Class = serde_json::from_str(
            r#"{"id":"1","name":"class 1","date":"2020-12-12","capacity":20}"#,
        )
        .unwrap();
        assert_eq!(from_timestamp, class(Vec::new()));
        assert_eq!(from_date, class(Vec::new()));
    }

    #[test]
    fn test_booking_request_field_order_and_defaults() {
        let request: BookingRequest =
            serde_json::from_str(r#"{"member_name":"David","class_name":"lifting"}"#).unwrap();
        assert_eq!(request.date, "");
        assert_eq!(request.id, "");

        let echoed = BookingRequest {
            id: "1".to_string(),
            ..request
        };
        assert_eq!(
            serde_json::to_string(&echoed).unwrap(),
            r#"{"id":"1","member_name":"David","class_name":"lifting","date":""}"#
        );
    }

    #[test]
    fn test_class_detail_keeps_bookings() {
        let booking = Booking {
            id: "2".to_string(),
            member_name: "Ana".to_string(),
        };
        let detail = ClassDetail::from(class(vec![booking.clone()]));
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["bookings"][0]["member_name"], "Ana");
        assert_eq!(json["date"], "2020-12-12T00:00:00Z");
    }
}
