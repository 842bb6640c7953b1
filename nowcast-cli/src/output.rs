//! Terminal rendition of the render surface: the "single screen".

use nowcast_core::{DisplayState, Icon, RenderSurface};

pub struct TerminalSurface;

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Sun => "☀",
        Icon::Cloudy => "⛅",
        Icon::Cloud => "☁",
        Icon::RainyDay => "🌧",
        Icon::Thunder => "⛈",
        Icon::Snow => "❄",
    }
}

impl RenderSurface for TerminalSurface {
    fn loading_started(&self) {
        eprintln!("Fetching weather...");
    }

    fn loading_finished(&self) {}

    fn render(&self, state: &DisplayState) {
        let icon = state.icon.map(icon_glyph).unwrap_or_default();

        println!("{}{} {}", state.city, state.country, icon);
        println!("{}", state.description);
        println!();
        println!("Temperature: {}", state.temperature);
        println!("             {} / {}", state.temp_min, state.temp_max);
        println!("Sunrise:     {}", state.sunrise);
        println!("Sunset:      {}", state.sunset);
        println!("Wind:        {}", state.wind);
        println!("Pressure:    {}", state.pressure);
        println!("Humidity:    {}", state.humidity);
        println!("Visibility:  {}", state.visibility);
    }

    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}
