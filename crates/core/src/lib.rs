#![forbid(unsafe_code)]

pub mod catalog;
pub mod checkin;
pub mod model;
pub mod time;

pub use time::Clock;
