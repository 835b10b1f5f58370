//! HTTP handlers for all web routes.

pub mod charts;
pub mod dashboard;
pub mod health;
pub mod options;
pub mod review;
pub mod session;
