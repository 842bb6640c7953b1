//! Cycle orchestration: preconditions, location fix, weather fetch,
//! render. One cycle at a time; a trigger during an in-flight cycle is
//! ignored.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::client::WeatherClient;
use crate::error::CycleError;
use crate::format::DisplayState;
use crate::location::{FixPriority, LocationProvider, PermissionDecision, PermissionGate};
use crate::model::UnitSystem;
use crate::surface::{ConnectivityProbe, RenderSurface, SettingsSurface};

const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the machine currently is. In-flight phases are only observable
/// from other tasks; a cycle always settles in `Rendered` or `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum CyclePhase {
    Idle,
    CheckingPreconditions,
    AwaitingLocation,
    FetchingWeather,
    Rendered,
    Error(CycleError),
}

impl CyclePhase {
    /// True if a new cycle may start from this phase.
    pub fn can_start(&self) -> bool {
        matches!(
            self,
            CyclePhase::Idle | CyclePhase::Rendered | CyclePhase::Error(_)
        )
    }
}

/// Result of one trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Rendered(DisplayState),
    Failed(CycleError),
    /// A cycle was already in flight; this trigger did nothing.
    Ignored,
}

/// Orchestrates one precondition-check → location → fetch → render
/// cycle over the platform collaborators it is constructed with.
pub struct AppController {
    location: Arc<dyn LocationProvider>,
    permissions: Arc<dyn PermissionGate>,
    connectivity: Arc<dyn ConnectivityProbe>,
    weather: Arc<dyn WeatherClient>,
    surface: Arc<dyn RenderSurface>,
    settings: Arc<dyn SettingsSurface>,
    units: UnitSystem,
    locale: String,
    fix_timeout: Duration,
    phase: Mutex<CyclePhase>,
}

/// Scopes the loading indicator to the weather fetch. Dropping the
/// guard dismisses the indicator, so every exit path out of
/// `FetchingWeather` releases it.
struct LoadingGuard<'a> {
    surface: &'a dyn RenderSurface,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(surface: &'a dyn RenderSurface) -> Self {
        surface.loading_started();
        Self { surface }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.surface.loading_finished();
    }
}

impl AppController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        location: Arc<dyn LocationProvider>,
        permissions: Arc<dyn PermissionGate>,
        connectivity: Arc<dyn ConnectivityProbe>,
        weather: Arc<dyn WeatherClient>,
        surface: Arc<dyn RenderSurface>,
        settings: Arc<dyn SettingsSurface>,
        units: UnitSystem,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            location,
            permissions,
            connectivity,
            weather,
            surface,
            settings,
            units,
            locale: locale.into(),
            fix_timeout: DEFAULT_FIX_TIMEOUT,
            phase: Mutex::new(CyclePhase::Idle),
        }
    }

    /// Override the location-fix timeout. Tests use a short one.
    pub fn with_fix_timeout(mut self, timeout: Duration) -> Self {
        self.fix_timeout = timeout;
        self
    }

    /// Current phase, as last settled or currently in flight.
    pub fn phase(&self) -> CyclePhase {
        self.phase.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_phase(&self, next: CyclePhase) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// Atomically claim the machine for a new cycle. Returns false if a
    /// cycle is already in flight.
    fn try_begin(&self) -> bool {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        if !phase.can_start() {
            return false;
        }
        *phase = CyclePhase::CheckingPreconditions;
        true
    }

    /// Run one full cycle. App start and the manual refresh action both
    /// land here.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> CycleOutcome {
        if !self.try_begin() {
            info!("refresh ignored: a cycle is already in flight");
            return CycleOutcome::Ignored;
        }

        match self.run_cycle().await {
            Ok(state) => {
                self.surface.render(&state);
                self.set_phase(CyclePhase::Rendered);
                info!("cycle rendered");
                CycleOutcome::Rendered(state)
            }
            Err(err) => {
                warn!(error = %err, "cycle failed");
                self.surface.notify(err.user_message());
                self.set_phase(CyclePhase::Error(err.clone()));
                CycleOutcome::Failed(err)
            }
        }
    }

    async fn run_cycle(&self) -> Result<DisplayState, CycleError> {
        if !self.location.is_enabled() {
            // Direct the user at the system location settings; the
            // cycle itself is over.
            self.settings.open_location_settings();
            return Err(CycleError::LocationDisabled);
        }

        match self.permissions.check_and_request().await {
            PermissionDecision::Granted => {}
            PermissionDecision::Denied => {
                return Err(CycleError::PermissionDenied);
            }
            PermissionDecision::PermanentlyDenied => {
                // Permanent denial can only be undone from the app's
                // permission settings.
                self.settings.open_app_settings();
                return Err(CycleError::PermissionDenied);
            }
        }

        self.set_phase(CyclePhase::AwaitingLocation);
        let fix = tokio::time::timeout(
            self.fix_timeout,
            self.location.request_fix(FixPriority::HighAccuracy),
        )
        .await
        .map_err(|_| CycleError::LocationTimeout)??;
        info!(lat = fix.latitude, lon = fix.longitude, "location fix acquired");

        self.set_phase(CyclePhase::FetchingWeather);
        if !self.connectivity.is_online() {
            return Err(CycleError::ConnectivityUnavailable);
        }

        let snapshot = {
            let _loading = LoadingGuard::acquire(self.surface.as_ref());
            self.weather.fetch(fix, self.units).await?
        };

        Ok(DisplayState::from_snapshot(&snapshot, &self.locale))
    }
}
