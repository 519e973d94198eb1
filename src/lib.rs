//! Coverage Engine for clinician staffing models
//!
//! This crate converts clinician groups (rotators, fellows, APPs and custom
//! groups) into annual day and night shift contributions, applies an
//! attrition buffer, and compares the roster totals against named staffing
//! models such as "6:2" and "8:3".

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
