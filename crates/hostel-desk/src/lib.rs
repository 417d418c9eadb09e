//! Hostel administration backend: application review, occupancy accounting, and reporting.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod hostel;
pub mod store;
pub mod telemetry;
