//! The weather lookup tool.
//!
//! A fixed table of city conditions stands in for a real weather API; the
//! lookup is deterministic and side-effect free so the agent can be exercised
//! end to end without network access.

use serde_json::json;

use crate::tools::{FunctionTool, ToolResult};

struct CityConditions {
    temp_c: f64,
    condition: &'static str,
    humidity: u8,
}

const WEATHER_TABLE: &[(&str, CityConditions)] = &[
    (
        "New York",
        CityConditions {
            temp_c: 22.0,
            condition: "Sunny",
            humidity: 60,
        },
    ),
    (
        "London",
        CityConditions {
            temp_c: 18.0,
            condition: "Cloudy",
            humidity: 80,
        },
    ),
    (
        "Tokyo",
        CityConditions {
            temp_c: 28.0,
            condition: "Rainy",
            humidity: 75,
        },
    ),
    (
        "Sydney",
        CityConditions {
            temp_c: 30.0,
            condition: "Clear",
            humidity: 50,
        },
    ),
    (
        "Paris",
        CityConditions {
            temp_c: 20.0,
            condition: "Partly Cloudy",
            humidity: 65,
        },
    ),
    (
        "Berlin",
        CityConditions {
            temp_c: 16.0,
            condition: "Foggy",
            humidity: 70,
        },
    ),
    (
        "Moscow",
        CityConditions {
            temp_c: 5.0,
            condition: "Snowy",
            humidity: 85,
        },
    ),
    (
        "Dubai",
        CityConditions {
            temp_c: 35.0,
            condition: "Hot",
            humidity: 45,
        },
    ),
    (
        "San Francisco",
        CityConditions {
            temp_c: 19.0,
            condition: "Foggy",
            humidity: 75,
        },
    ),
    (
        "Chicago",
        CityConditions {
            temp_c: 15.0,
            condition: "Windy",
            humidity: 60,
        },
    ),
];

/// Looks up the current weather for a location.
///
/// Matching is case-insensitive. Unknown locations produce a fixed
/// "not available" sentence rather than an error. `unit` may be `"celsius"`
/// (default) or `"fahrenheit"`; fahrenheit values are converted linearly.
pub fn lookup_weather(location: &str, unit: &str) -> String {
    let entry = WEATHER_TABLE
        .iter()
        .find(|(city, _)| city.eq_ignore_ascii_case(location));

    let Some((city, conditions)) = entry else {
        return format!("Weather data for {location} is not available.");
    };

    let fahrenheit = unit.eq_ignore_ascii_case("fahrenheit");
    let (temp, symbol) = if fahrenheit {
        (conditions.temp_c * 9.0 / 5.0 + 32.0, 'F')
    } else {
        (conditions.temp_c, 'C')
    };

    format!(
        "The weather in {city} is {} with a temperature of {}°{symbol} and humidity of {}%.",
        conditions.condition,
        format_temperature(temp),
        conditions.humidity
    )
}

// Whole degrees print without a decimal point (22, 41), fractional ones keep it (82.4).
fn format_temperature(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Builds the `get_weather` function tool backed by [`lookup_weather`].
pub fn weather_tool() -> FunctionTool {
    FunctionTool::new(
        "get_weather",
        "Get the current weather for a location",
        |args, _ctx| {
            Box::pin(async move {
                let Some(location) = args.get("location").and_then(|v| v.as_str()) else {
                    return ToolResult::error("missing required argument 'location'");
                };
                let unit = args
                    .get("unit")
                    .and_then(|v| v.as_str())
                    .unwrap_or("celsius");

                ToolResult::success(json!(lookup_weather(location, unit)))
            })
        },
    )
    .with_parameters_schema(json!({
        "type": "object",
        "properties": {
            "location": {
                "type": "string",
                "description": "The city or location to get weather for"
            },
            "unit": {
                "type": "string",
                "enum": ["celsius", "fahrenheit"],
                "description": "The temperature unit (celsius or fahrenheit)"
            }
        },
        "required": ["location"]
    }))
}
