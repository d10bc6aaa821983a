//! Core domain types and logic.

pub mod analysis;
pub mod bar;
pub mod breakout;
pub mod error;
pub mod indicator;
pub mod request;
pub mod scan;
pub mod simulator;
pub mod sufficiency;
pub mod trade;
