//! Values Compass - Personal Values Self-Assessment
//!
//! This crate implements a five-step assessment wizard (introduction,
//! selection, prioritization, reflection, results) over a fixed catalog of
//! personal values, with results assembly and a cancelable export.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
