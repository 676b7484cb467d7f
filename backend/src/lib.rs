//! # Sleep Monitor Backend
//!
//! Dashboard backend for classroom sleep detection.
//!
//! Upstream cameras and detectors write one document per day into a hosted
//! document store: per-camera detections in the `sleep` collection and
//! per-student session durations in the `duration` collection. This crate
//! reads those collections and reshapes them into the four dashboard pages.
//!
//! ## Features
//!
//! - **Detection table**: camera 1 and camera 2 captures paired by display time
//! - **Analytics**: sleep count over the selected day
//! - **Sleep duration**: histogram of session durations
//! - **Sleeping rows**: qualifying detections per seat row
//! - **HTTP API**: RESTful endpoints for the frontend
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects (DTOs) and shared identifiers
//! - [`db`]: Repository pattern over the document store
//! - [`models`]: Store documents, extracted records, clock formatting
//! - [`services`]: Pure derivations and the per-page view processors
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Page payload types and chart styling

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
