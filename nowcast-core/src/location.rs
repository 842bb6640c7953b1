//! Location subsystem seams consumed by the controller.

use async_trait::async_trait;

use crate::error::CycleError;
use crate::model::Coordinate;

/// Accuracy priority for a fix request. The pipeline always asks for
/// high accuracy; the balanced tier exists for providers that cannot
/// honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixPriority {
    #[default]
    HighAccuracy,
    Balanced,
}

/// Outcome of a permission check-and-request round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied,
    PermanentlyDenied,
}

/// Source of geographic fixes.
///
/// `request_fix` completes exactly once with either a coordinate or a
/// failure. Providers are allowed to hang (permissions revoked
/// mid-flight); the controller wraps the call in a timeout.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the underlying location services are switched on at all.
    fn is_enabled(&self) -> bool;

    /// Request one best-effort fix at the given priority.
    async fn request_fix(&self, priority: FixPriority) -> Result<Coordinate, CycleError>;
}

/// Permission dialog flow, delegated to the platform.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Check fine+coarse location permissions, prompting if needed.
    async fn check_and_request(&self) -> PermissionDecision;
}
