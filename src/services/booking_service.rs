use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(BookingError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub reference: String,
    pub customer_name: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: BookingStatus,
    /// Minor currency units
    pub total_amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// `YYYY-MM`, matched against the departure date
    pub month: Option<String>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Invalid booking status: {0}")]
    InvalidStatus(String),
}

/// Read-only booking catalogue backing the list and calendar views
pub struct BookingService {
    bookings: Vec<Booking>,
}

impl BookingService {
    pub fn new(mut bookings: Vec<Booking>) -> Self {
        bookings.sort_by(|a, b| {
            a.departure_date
                .cmp(&b.departure_date)
                .then_with(|| a.reference.cmp(&b.reference))
        });
        Self { bookings }
    }

    /// Fixed sample data; ids and dates are stable so responses fingerprint identically
    pub fn seeded() -> Self {
        let seed = [
            (1u128, "TRV-1001", "Ana Costa", "Lisbon", (2026, 3, 2), (2026, 3, 9), BookingStatus::Approved, 184_000, "EUR"),
            (2, "TRV-1002", "Kenji Sato", "Kyoto", (2026, 3, 14), (2026, 3, 28), BookingStatus::Pending, 452_500, "JPY"),
            (3, "TRV-1003", "Maria Rossi", "Reykjavik", (2026, 3, 14), (2026, 3, 19), BookingStatus::Approved, 231_000, "EUR"),
            (4, "TRV-1004", "Sam Okafor", "Cape Town", (2026, 4, 6), (2026, 4, 20), BookingStatus::Rejected, 398_000, "USD"),
            (5, "TRV-1005", "Lena Fischer", "Marrakesh", (2026, 4, 22), (2026, 4, 29), BookingStatus::Cancelled, 129_900, "EUR"),
            (6, "TRV-1006", "Diego Alvarez", "Patagonia", (2026, 5, 1), (2026, 5, 16), BookingStatus::Pending, 615_000, "USD"),
        ];

        let bookings = seed
            .into_iter()
            .filter_map(|(id, reference, customer, destination, dep, ret, status, amount, currency)| {
                Some(Booking {
                    id: Uuid::from_u128(0x6b1f_0000_0000_4000_8000_0000_0000_0000 | id),
                    reference: reference.to_string(),
                    customer_name: customer.to_string(),
                    destination: destination.to_string(),
                    departure_date: NaiveDate::from_ymd_opt(dep.0, dep.1, dep.2)?,
                    return_date: NaiveDate::from_ymd_opt(ret.0, ret.1, ret.2)?,
                    status,
                    total_amount: amount,
                    currency: currency.to_string(),
                })
            })
            .collect();

        Self::new(bookings)
    }

    pub fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, BookingError> {
        let month = filter.month.as_deref().map(parse_month).transpose()?;

        Ok(self
            .bookings
            .iter()
            .filter(|b| filter.status.map_or(true, |s| b.status == s))
            .filter(|b| {
                month.map_or(true, |(y, m)| {
                    b.departure_date.year() == y && b.departure_date.month() == m
                })
            })
            .cloned()
            .collect())
    }

    pub fn get(&self, id: Uuid) -> Result<Booking, BookingError> {
        self.bookings
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(BookingError::NotFound(id))
    }

    /// Bookings of one month grouped by departure day, days in ascending order
    pub fn calendar_month(&self, year: i32, month: u32) -> Result<CalendarMonth, BookingError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(BookingError::InvalidMonth(format!("{year:04}-{month:02}")));
        }

        let mut days: BTreeMap<NaiveDate, Vec<Booking>> = BTreeMap::new();
        for booking in self
            .bookings
            .iter()
            .filter(|b| b.departure_date.year() == year && b.departure_date.month() == month)
        {
            days.entry(booking.departure_date).or_default().push(booking.clone());
        }

        Ok(CalendarMonth {
            year,
            month,
            days: days
                .into_iter()
                .map(|(date, bookings)| CalendarDay { date, bookings })
                .collect(),
        })
    }
}

fn parse_month(raw: &str) -> Result<(i32, u32), BookingError> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map(|d| (d.year(), d.month()))
        .map_err(|_| BookingError::InvalidMonth(raw.to_string()))
}
