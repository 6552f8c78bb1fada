//! Validation utilities for diagnosis inputs

use rust_decimal::Decimal;

use crate::models::WeatherReading;
use crate::types::GpsCoordinates;

/// Maximum length accepted for a crop type name
pub const MAX_CROP_NAME_LEN: usize = 64;

// ============================================================================
// Location Validations
// ============================================================================

/// Validate latitude/longitude ranges
pub fn validate_coordinates(coords: &GpsCoordinates) -> Result<(), &'static str> {
    if coords.latitude < Decimal::from(-90) || coords.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if coords.longitude < Decimal::from(-180) || coords.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

// ============================================================================
// Diagnosis Input Validations
// ============================================================================

/// Validate a crop type name before parsing
///
/// Unrecognized names are accepted (they map to the generic catalog); only
/// empty or oversized input is rejected.
pub fn validate_crop_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Crop type is required");
    }
    if trimmed.len() > MAX_CROP_NAME_LEN {
        return Err("Crop type must be at most 64 characters");
    }
    Ok(())
}

/// Reject readings with non-finite numbers
pub fn validate_weather_reading(reading: &WeatherReading) -> Result<(), &'static str> {
    if !reading.temperature_celsius.is_finite() {
        return Err("Temperature must be a finite number");
    }
    if !reading.humidity_percent.is_finite() {
        return Err("Humidity must be a finite number");
    }
    if reading.wind_speed_mps.map(|w| !w.is_finite()).unwrap_or(false) {
        return Err("Wind speed must be a finite number");
    }
    if reading
        .precipitation_probability
        .map(|p| !p.is_finite())
        .unwrap_or(false)
    {
        return Err("Precipitation probability must be a finite number");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(validate_coordinates(&GpsCoordinates::new(dec("18.7883"), dec("98.9853"))).is_ok());
        assert!(validate_coordinates(&GpsCoordinates::new(dec("-90"), dec("180"))).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert!(validate_coordinates(&GpsCoordinates::new(dec("91"), dec("0"))).is_err());
        assert!(validate_coordinates(&GpsCoordinates::new(dec("0"), dec("-180.5"))).is_err());
    }

    #[test]
    fn test_validate_crop_name() {
        assert!(validate_crop_name("tomato").is_ok());
        assert!(validate_crop_name("unknown_crop").is_ok());
        assert!(validate_crop_name("   ").is_err());
        assert!(validate_crop_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_weather_reading() {
        assert!(validate_weather_reading(&WeatherReading::new(20.0, 50.0)).is_ok());
        assert!(validate_weather_reading(&WeatherReading::new(f64::NAN, 50.0)).is_err());
        assert!(validate_weather_reading(&WeatherReading::new(20.0, f64::INFINITY)).is_err());
        assert!(
            validate_weather_reading(&WeatherReading::new(20.0, 50.0).with_wind_speed(f64::NAN))
                .is_err()
        );
    }
}
