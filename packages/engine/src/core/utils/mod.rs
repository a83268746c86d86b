#[macro_use]
pub mod log;
