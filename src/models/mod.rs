pub mod clock_state;
pub mod day_record;
pub mod employee;
pub mod interval;
pub mod period;
pub mod punch;
pub mod punch_kind;
pub mod summary;
