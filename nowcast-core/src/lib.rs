//! Core library for the `nowcast` app.
//!
//! This crate defines:
//! - The fetch-cycle data model (coordinates, snapshots, display state)
//! - The weather API client and its trait seam
//! - Pure presentation formatting (unit label, times, icon selection)
//! - The cycle controller state machine and the platform-collaborator
//!   traits it orchestrates (location, permissions, render surface)
//! - Configuration & credentials handling
//!
//! It is used by `nowcast-cli`, but any front end that supplies the
//! collaborator traits can drive the same pipeline.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod location;
pub mod model;
pub mod surface;

pub use client::{OpenWeatherClient, WeatherClient};
pub use config::Config;
pub use controller::{AppController, CycleOutcome, CyclePhase};
pub use error::CycleError;
pub use format::{DisplayState, Icon};
pub use location::{FixPriority, LocationProvider, PermissionDecision, PermissionGate};
pub use model::{Coordinate, UnitSystem, WeatherSnapshot};
pub use surface::{ConnectivityProbe, RenderSurface, SettingsSurface};
