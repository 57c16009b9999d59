//! Attendance analytics engine.
//!
//! This crate turns a CSV export of employee check-in/check-out records into
//! dashboard metrics: worked hours, correction cases, overtime days, late
//! arrivals, early departures, breakdowns by organizational dimension,
//! monthly trends and a k-means grouping of employees by total hours.
//!
//! The pipeline is exposed as a library ([`calculation`]), over HTTP
//! ([`api`]) and through the `attendance-engine` binary.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
