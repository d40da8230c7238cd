pub mod aggregate;
pub mod classify;
pub mod expected;
pub mod reducer;
