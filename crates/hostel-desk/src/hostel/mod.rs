//! Hostel administration domain: applications, hostels, users, settings, and reporting.

pub mod applications;
pub mod hostels;
pub mod import;
pub mod report;
pub mod settings;
pub mod users;
