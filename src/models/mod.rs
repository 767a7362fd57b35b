pub mod clock_event;
pub mod daily_pair;
pub mod day_status;
pub mod event_kind;
pub mod refdata;
