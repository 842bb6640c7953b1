//! Presentation-side seams: where the pipeline's output lands and the
//! couple of platform surfaces it pokes on the way.

use crate::format::DisplayState;

/// Where rendered state and user-facing notices go.
///
/// `loading_started`/`loading_finished` bracket the weather fetch only;
/// the controller guarantees `loading_finished` fires on every exit
/// path, failure included.
pub trait RenderSurface: Send + Sync {
    fn loading_started(&self);
    fn loading_finished(&self);
    fn render(&self, state: &DisplayState);
    /// Short-lived, non-technical notice (toast-equivalent).
    fn notify(&self, message: &str);
}

/// Fire-and-forget jump points into system settings. No result is
/// observed; the cycle has already failed by the time these are used.
pub trait SettingsSurface: Send + Sync {
    fn open_location_settings(&self);
    fn open_app_settings(&self);
}

/// Reachability probe consulted before the weather request is attempted.
pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> bool;
}
