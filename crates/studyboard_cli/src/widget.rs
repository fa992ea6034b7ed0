//! Ambient header widgets: clock and simulated weather.
//!
//! # Responsibility
//! - Produce the stateless-per-tick header lines shown above the dashboard.
//!
//! # Invariants
//! - Widget failures degrade to placeholder text; they never block startup
//!   and never touch the entity stores.

use chrono::Local;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// One weather reading for the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherReport {
    pub temperature_c: i64,
    pub condition: &'static str,
}

/// Weather could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherUnavailable;

impl Display for WeatherUnavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "weather data unavailable")
    }
}

impl Error for WeatherUnavailable {}

/// Source of weather readings.
pub trait WeatherProvider {
    fn current(&mut self) -> Result<WeatherReport, WeatherUnavailable>;
}

/// Stand-in provider producing a plausible 20-35 degree reading.
#[derive(Debug, Default)]
pub struct SimulatedWeather;

impl WeatherProvider for SimulatedWeather {
    fn current(&mut self) -> Result<WeatherReport, WeatherUnavailable> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| WeatherUnavailable)?
            .subsec_nanos();
        Ok(WeatherReport {
            temperature_c: 20 + i64::from(nanos % 16),
            condition: "sunny",
        })
    }
}

/// Formats one header weather line; failures render a placeholder.
pub fn weather_line<P: WeatherProvider>(provider: &mut P) -> String {
    match provider.current() {
        Ok(report) => format!("{} C {}", report.temperature_c, report.condition),
        Err(err) => {
            log::warn!("event=weather_fetch module=widget status=recovered error={err}");
            "-- C".to_string()
        }
    }
}

/// Formats the current local time for the header.
pub fn clock_line() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
