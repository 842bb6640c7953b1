//! Pure presentation helpers: locale-based unit label, local-time
//! formatting, icon selection, and `DisplayState` assembly.

use chrono::{Local, TimeZone};

use crate::model::WeatherSnapshot;

/// Icon asset selector key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Sun,
    Cloudy,
    Cloud,
    RainyDay,
    Thunder,
    Snow,
}

/// Region subtag of a locale string such as "en_US", "fr-FR" or
/// "en_US.UTF-8": the first two-letter uppercase component.
fn region_code(locale: &str) -> Option<&str> {
    locale
        .split(['-', '_', '.', '@'])
        .find(|part| part.len() == 2 && part.bytes().all(|b| b.is_ascii_uppercase()))
}

/// Display label for the temperature: "°F" for the three regions that
/// use Fahrenheit (US, Liberia, Myanmar), "°C" otherwise.
///
/// This only chooses the label. The numeric value is rendered exactly as
/// the API returned it and is never converted, matching the behavior the
/// app has always shown.
pub fn temperature_unit(locale: &str) -> &'static str {
    match region_code(locale) {
        Some("US") | Some("LR") | Some("MM") => "°F",
        _ => "°C",
    }
}

/// Format a Unix timestamp as "HH:MM" in the system's local time zone.
pub fn format_time(unix_seconds: i64) -> String {
    match Local.timestamp_opt(unix_seconds, 0).single() {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => String::new(),
    }
}

/// Fixed icon-code table. Codes outside the table yield `None`, which
/// leaves whatever icon was previously selected untouched.
///
/// The night codes intentionally collapse onto the day assets the app
/// ships ("03n" is Cloud, "11n" is RainyDay); "12n"/"13n" are not in the
/// table at all.
pub fn select_icon(icon_code: &str) -> Option<Icon> {
    match icon_code {
        "01d" => Some(Icon::Sun),
        "02d" => Some(Icon::Cloudy),
        "03d" => Some(Icon::Cloud),
        "04d" => Some(Icon::Cloud),
        "09d" => Some(Icon::RainyDay),
        "10d" => Some(Icon::RainyDay),
        "11d" => Some(Icon::Thunder),
        "13d" => Some(Icon::Snow),
        "01n" => Some(Icon::Cloud),
        "02n" => Some(Icon::Cloud),
        "03n" => Some(Icon::Cloud),
        "10n" => Some(Icon::Cloud),
        "11n" => Some(Icon::RainyDay),
        _ => None,
    }
}

/// Fully derived render state for one cycle. Recomputed from scratch
/// from a snapshot and a locale; never patched in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayState {
    pub city: String,
    pub country: String,
    pub description: String,
    pub temperature: String,
    pub temp_min: String,
    pub temp_max: String,
    pub sunrise: String,
    pub sunset: String,
    pub wind: String,
    pub pressure: String,
    pub humidity: String,
    pub visibility: String,
    pub icon: Option<Icon>,
}

impl DisplayState {
    /// Assemble the render state from one snapshot.
    ///
    /// Condition entries are applied in order and share the description
    /// and icon targets, so a later entry overwrites an earlier one; an
    /// icon code outside the table leaves the prior icon in place.
    pub fn from_snapshot(snapshot: &WeatherSnapshot, locale: &str) -> Self {
        let mut state = DisplayState {
            city: format!("{}, ", snapshot.city_name),
            country: snapshot.country_code.clone(),
            temperature: format!("{}{}", snapshot.temp, temperature_unit(locale)),
            temp_min: format!("{} min", snapshot.temp_min),
            temp_max: format!("{} max", snapshot.temp_max),
            sunrise: format_time(snapshot.sunrise_unix),
            sunset: format_time(snapshot.sunset_unix),
            wind: format!("{} miles/hour", snapshot.wind_speed_mph),
            pressure: snapshot.pressure_hpa.to_string(),
            humidity: format!("{} per cent", snapshot.humidity_pct),
            visibility: snapshot.visibility_m.to_string(),
            ..DisplayState::default()
        };

        for condition in &snapshot.conditions {
            state.description = condition.description.clone();
            if let Some(icon) = select_icon(&condition.icon_code) {
                state.icon = Some(icon);
            }
        }

        state
    }
}
