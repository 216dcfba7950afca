//! scout-scan: Live wireless beacon scanner.
//!
//! Polls `iwlist` for the access points visible on one interface, keeps the
//! latest record per network in a shared registry, redraws that registry as a
//! table on a fixed cadence and journals every observation.

pub mod config;
pub mod driver;
pub mod error;
pub mod interfaces;
pub mod iwlist;
pub mod presenter;
pub mod scanner;
pub mod source;
