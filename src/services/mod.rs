pub mod booking_service;

pub use booking_service::{Booking, BookingError, BookingFilter, BookingService, BookingStatus, CalendarMonth};
