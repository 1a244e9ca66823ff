//! WMO weather code descriptions.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

/// Human-readable description (with an emoji) for a WMO weather code.
///
/// Codes outside the table have no description; callers render them as empty text.
pub fn describe(code: i32) -> Option<&'static str> {
    let text = match code {
        0 => "Clear sky 🌞",
        1 => "Mainly clear 🌤️",
        2 => "Partly cloudy 🌥️",
        3 => "Overcast ☁️",
        45 => "Fog 🌫️",
        48 => "Depositing rime fog 🌫️",
        51 => "Drizzle (light) 🌦️",
        53 => "Drizzle (moderate) 🌦️",
        55 => "Drizzle (dense) 🌧️",
        56 => "Freezing drizzle (light) 🌨️",
        57 => "Freezing drizzle (dense) 🌨️",
        61 => "Rain (slight) 🌦️",
        63 => "Rain (moderate) 🌧️",
        65 => "Rain (heavy) 🌧️",
        66 => "Freezing rain (light) 🌨️",
        67 => "Freezing rain (heavy) 🌨️",
        71 => "Snowfall (slight) 🌨️",
        73 => "Snowfall (moderate) 🌨️",
        75 => "Snowfall (heavy) 🌨️",
        77 => "Snow grains 🌨️",
        80 => "Rain showers (slight) 🌦️",
        81 => "Rain showers (moderate) 🌧️",
        82 => "Rain showers (violent) 🌧️",
        85 => "Snow showers (slight) 🌨️",
        86 => "Snow showers (heavy) 🌨️",
        95 => "Thunderstorm (slight or moderate) ⛈️",
        96 => "Thunderstorm with slight hail ⛈️",
        99 => "Thunderstorm with heavy hail ⛈️",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_CODES: &[i32] = &[
        0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82,
        85, 86, 95, 96, 99,
    ];

    #[test]
    fn clear_sky_and_thunderstorm() {
        assert!(describe(0).unwrap().starts_with("Clear sky"));
        assert!(describe(95).unwrap().starts_with("Thunderstorm"));
    }

    #[test]
    fn every_known_code_has_a_description() {
        for code in KNOWN_CODES {
            assert!(describe(*code).is_some(), "code {code} should be described");
        }
    }

    #[test]
    fn unknown_codes_have_no_description() {
        for code in [-1, 4, 44, 50, 100, i32::MAX, i32::MIN] {
            assert_eq!(describe(code), None);
        }
    }
}
