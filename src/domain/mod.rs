//! Booking domain: the record being collected, the booked-date registry and
//! the calendar model used to pick a visit date.

pub mod booked_dates;
pub mod booking;
pub mod calendar;
pub mod locale;

pub use booked_dates::BookedDateSet;
pub use booking::{AreaType, BookingRecord, BookingUpdate, MIN_ADDRESS_CHARS, MIN_PHONE_CHARS};
pub use calendar::{build_month_grid, DayDescriptor, MonthGrid, MonthNavigator, YearMonth};
pub use locale::Locale;
