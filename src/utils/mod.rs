pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

// Re-export for the call sites that only need hour formatting
pub use formatting::{hours2decimal, hours2readable};
