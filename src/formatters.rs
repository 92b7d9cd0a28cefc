use crate::models::{Completion, Trail, WeatherReport};

/// Formats current conditions and the daily forecast into a human-readable string
pub fn format_weather_report(report: &WeatherReport) -> String {
    let mut output = format!(
        "Weather Forecast for {}\nLocation: {:.4}, {:.4}\n\nTemperature: {:.1}\u{00b0}C\n",
        report.city,
        report.coordinates.latitude,
        report.coordinates.longitude,
        report.current.temperature_c
    );
    if let Some(humidity) = report.current.relative_humidity {
        output.push_str(&format!("Relative Humidity: {:.0}%\n", humidity));
    }

    if !report.forecast.is_empty() {
        output.push('\n');
        for day in &report.forecast {
            output.push_str(&format!(
                "{}:\n  Temperature: {:.1}\u{00b0}C - {:.1}\u{00b0}C\n",
                day.date.format("%a %b %-d"),
                day.low_c,
                day.high_c
            ));
            if let Some(precipitation) = day.precipitation_mm {
                output.push_str(&format!("  Precipitation: {:.1} mm\n", precipitation));
            }
        }
    }
    output
}

/// Formats parsed trails as a numbered list, skipping fields the model left out
pub fn format_trails(trails: &[Trail]) -> String {
    let mut output = String::new();
    for (i, trail) in trails.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, trail.name));
        let fields = [
            ("Difficulty", &trail.difficulty),
            ("Length", &trail.length),
            ("Elevation Gain", &trail.elevation_gain),
            ("Description", &trail.description),
            ("Features", &trail.features),
            ("Link", &trail.link),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                output.push_str(&format!("  {}: {}\n", label, value));
            }
        }
        output.push('\n');
    }
    output
}

/// Parsed trails when the whole reply was understood, otherwise the
/// model's reply verbatim
pub fn format_completion(completion: &Completion) -> String {
    if completion.trails.is_empty() || completion.dropped_blocks > 0 {
        let mut text = completion.text.trim_end().to_string();
        text.push('\n');
        text
    } else {
        format_trails(&completion.trails)
    }
}

/// Formats the two-part recommendation answer
pub fn format_recommendations(city: &str, summary: &str, recommendations: &Completion) -> String {
    format!(
        "Summary of Your Preferences\n\n{}\n\nRecommended Hiking Trails in {}\n\n{}",
        summary.trim(),
        city,
        format_completion(recommendations)
    )
}
