use thiserror::Error;

/// Everything that can end a fetch cycle early.
///
/// Each kind carries enough detail for the log; the user-visible wording
/// comes from [`CycleError::user_message`] and stays generic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CycleError {
    #[error("location services are disabled")]
    LocationDisabled,
    #[error("location permission permanently denied")]
    PermissionDenied,
    #[error("location fix timed out")]
    LocationTimeout,
    #[error("network connectivity unavailable")]
    ConnectivityUnavailable,
    #[error("weather API request failed with status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("transport failure: {cause}")]
    Transport { cause: String },
    #[error("coordinate out of range: lat {latitude}, lon {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("invalid API key")]
    InvalidApiKey,
}

impl CycleError {
    /// Short non-technical message for the toast-equivalent surface.
    /// Distinct per failure kind; the technical detail goes to the log only.
    pub fn user_message(&self) -> &'static str {
        match self {
            CycleError::LocationDisabled => {
                "Your location provider is turned off. Please turn it on"
            }
            CycleError::PermissionDenied => {
                "You have denied location permission. Please enable it, as it is mandatory for the app to work"
            }
            CycleError::LocationTimeout => "Could not determine your location. Please try again",
            CycleError::ConnectivityUnavailable => "No internet connection available",
            CycleError::Api { .. } => "The weather service could not be reached. Please try again later",
            CycleError::Transport { .. } => "Something went wrong while fetching the weather",
            CycleError::InvalidCoordinate { .. } => "Could not determine a valid location",
            CycleError::InvalidApiKey => "The weather service is not configured",
        }
    }
}

impl From<reqwest::Error> for CycleError {
    fn from(err: reqwest::Error) -> Self {
        CycleError::Transport {
            cause: err.to_string(),
        }
    }
}
