use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::Class;

#[derive(Clone)]
pub struct ICalExporter {
    calendar_name: String,
}

impl ICalExporter {
    pub fn new(calendar_name: impl Into<String>) -> Self {
        Self {
            calendar_name: calendar_name.into(),
        }
    }

    /// One all-day event per class.
    pub fn generate(&self, classes: &[Class]) -> Vec<u8> {
        let mut calendar = Calendar::new();
        calendar.name(&self.calendar_name);

        for class in classes {
            let mut event = Event::new();
            event.summary(&class.name);
            event.all_day(class.date);
            event.description(&format!(
                "Capacity: {}\nBooked: {}",
                class.capacity,
                class.bookings.len()
            ));
            event.uid(&format!("{}@class-booking", class.id));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::Booking;

    use super::*;

    #[test]
    fn test_generate_single_class() {
        let exporter = ICalExporter::new("Boathouse");
        let class = Class {
            id: "abc".to_string(),
            name: "kayak".to_string(),
            date: NaiveDate::from_ymd_opt(2006, 1, 2).unwrap(),
            capacity: 20,
            bookings: vec![Booking {
                id: "b1".to_string(),
                member_name: "David".to_string(),
            }],
        };
        let body = String::from_utf8(exporter.generate(&[class])).unwrap();
        assert!(body.contains("BEGIN:VEVENT"));
        assert!(body.contains("SUMMARY:kayak"));
        assert!(body.contains("DTSTART;VALUE=DATE:20060102"));
        assert!(body.contains("UID:abc@class-booking"));
        assert!(body.contains("Booked: 1"));
        assert!(body.contains("Boathouse"));
    }

    #[test]
    fn test_generate_empty() {
        let exporter = ICalExporter::new("Boathouse");
        let body = String::from_utf8(exporter.generate(&[])).unwrap();
        assert!(body.contains("BEGIN:VCALENDAR"));
        assert!(!body.contains("BEGIN:VEVENT"));
    }
}
