//! Newswire - Live News Wire Simulation
//!
//! A cycling engine walks a fixed article list one step per request,
//! stamping each step with a publication time so the list reads like a live
//! wire, and a sync client polls it into a deduplicated, ordered feed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
