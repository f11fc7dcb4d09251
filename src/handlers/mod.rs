// handlers/mod.rs - route handlers grouped by resource
//
// root      → service info and liveness (/, /health)
// bookings  → booking catalogue (/api/bookings/*)
// calendar  → month views (/api/calendar/*)
// workspace → per-session navigation state (/api/workspace/*)

pub mod bookings;
pub mod calendar;
pub mod root;
pub mod workspace;
