use std::sync::Arc;

use chrono::{Days, NaiveDate};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ids::{IdGenerator, UuidGenerator};
use crate::models::{Booking, Class};

/// Longest span, in days past the start date, a single range request may
/// cover: the whole days in `i64::MAX` nanoseconds (about 292 years).
pub const MAX_RANGE_DAYS: u64 = 106_751;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No class named {name:?} on {date}")]
    ClassNotFound { name: String, date: NaiveDate },
    #[error("No class with id {0:?}")]
    UnknownClassId(String),
}

/// In-memory, append-only collection of classes and their bookings.
///
/// Every operation takes the lock for its whole duration, so a booking
/// lookup and the append it leads to can't interleave with another writer.
pub struct BookingStore {
    classes: RwLock<Vec<Class>>,
    ids: Arc<dyn IdGenerator>,
}

impl BookingStore {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            classes: RwLock::new(Vec::new()),
            ids,
        }
    }

    /// Creates one class per day from `start` to `end` inclusive and appends
    /// them in day order. An `end` before `start` yields nothing.
    ///
    /// Ranges longer than [`MAX_RANGE_DAYS`] are truncated to that many days
    /// past `start`.
    pub fn create_classes(
        &self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
        capacity: i64,
    ) -> Vec<Class> {
        let last = start
            .checked_add_days(Days::new(MAX_RANGE_DAYS))
            .map_or(end, |limit| end.min(limit));
        if last < end {
            warn!("Range {start}..={end} truncated to end on {last}");
        }

        let created: Vec<Class> = start
            .iter_days()
            .take_while(|day| *day <= last)
            .map(|date| Class {
                id: self.ids.next_id(),
                name: name.to_string(),
                date,
                capacity,
                bookings: Vec::new(),
            })
            .collect();

        self.classes.write().extend(created.iter().cloned());
        info!(
            "Created {} class(es) {name:?} from {start} to {end}",
            created.len()
        );
        created
    }

    /// All classes in insertion order.
    pub fn list_classes(&self) -> Vec<Class> {
        self.classes.read().clone()
    }

    pub fn get_class(&self, id: &str) -> Result<Class, StoreError> {
        self.classes
            .read()
            .iter()
            .find(|class| class.id == id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownClassId(id.to_string()))
    }

    /// Books `member_name` into the first class matching `class_name` on `date`.
    ///
    /// Capacity is not checked.
    pub fn create_booking(
        &self,
        member_name: &str,
        class_name: &str,
        date: NaiveDate,
    ) -> Result<Booking, StoreError> {
        let mut classes = self.classes.write();
        let class = classes
            .iter_mut()
            .find(|class| class.name == class_name && class.date == date)
            .ok_or_else(|| StoreError::ClassNotFound {
                name: class_name.to_string(),
                date,
            })?;

        let booking = Booking {
            id: self.ids.next_id(),
            member_name: member_name.to_string(),
        };
        class.bookings.push(booking.clone());
        debug!(
            "Booked {member_name:?} into class {} ({} of {})",
            class.id,
            class.bookings.len(),
            class.capacity
        );
        Ok(booking)
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new(Arc::new(UuidGenerator))
    }
}
