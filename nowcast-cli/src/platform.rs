//! CLI stand-ins for the platform collaborators. A terminal has no GPS
//! radio, permission dialogs, or settings screens, so these are the
//! degenerate implementations: a fixed coordinate, permissions always
//! granted, connectivity assumed and left to the HTTP client to disprove.

use async_trait::async_trait;

use nowcast_core::{
    ConnectivityProbe, Coordinate, CycleError, FixPriority, LocationProvider, PermissionDecision,
    PermissionGate, SettingsSurface,
};

/// Yields the same configured coordinate for every fix request.
pub struct StaticLocationProvider {
    coordinate: Coordinate,
}

impl StaticLocationProvider {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn request_fix(&self, _priority: FixPriority) -> Result<Coordinate, CycleError> {
        Ok(self.coordinate)
    }
}

pub struct AlwaysGranted;

#[async_trait]
impl PermissionGate for AlwaysGranted {
    async fn check_and_request(&self) -> PermissionDecision {
        PermissionDecision::Granted
    }
}

pub struct AssumeOnline;

impl ConnectivityProbe for AssumeOnline {
    fn is_online(&self) -> bool {
        true
    }
}

pub struct NoopSettings;

impl SettingsSurface for NoopSettings {
    fn open_location_settings(&self) {
        eprintln!("Enable location services in your system settings.");
    }

    fn open_app_settings(&self) {
        eprintln!("Grant location permission in your system settings.");
    }
}
