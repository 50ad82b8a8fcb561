//! SeaORM entities for the `events`, `attendees` and `check_ins` tables.

pub mod attendee;
pub mod check_in;
pub mod event;
