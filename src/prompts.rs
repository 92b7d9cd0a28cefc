//! Prompt templates sent to the language model.

use crate::filters::RecommendationRequest;

pub const SUMMARY_OPENING: &str = "Here are some recommendations based on your preferences:";

/// Asks for one `Key: value` block per trail so `parser::parse_trails`
/// can pick the reply apart.
const TRAIL_BLOCK_FORMAT: &str = "\
Format each trail as its own block, separated from the next by a blank line, using exactly these labels:
Name: <trail name>
Difficulty: <difficulty level>
Length: <length in miles>
Elevation Gain: <elevation gain in feet>
Description: <brief description with relevant emojis>
Features: <notable features>";

fn preference_lines(request: &RecommendationRequest) -> String {
    let filters = &request.filters;
    format!(
        "City: {}\n\
         Difficulty Level: {}\n\
         Trail Length: {} miles\n\
         Elevation Gain: {} feet\n\
         Season: {}\n\
         Pet-Friendly: {}\n\
         User Preferences: {}",
        request.city,
        filters.difficulty,
        format_miles(filters.length_miles),
        filters.elevation_feet,
        filters.season,
        if filters.pet_friendly { "Yes" } else { "No" },
        request.preferences.as_deref().unwrap_or("None"),
    )
}

/// Always keeps one decimal place so 3 reads as `3.0`.
pub fn format_miles(miles: f64) -> String {
    format!("{miles:.1}")
}

pub fn summary_prompt(request: &RecommendationRequest) -> String {
    format!(
        "Generate a summary of the user's hiking trail preferences based on the following information:\n\
         {}\n\
         Start the summary with \"{SUMMARY_OPENING}\"",
        preference_lines(request)
    )
}

pub fn recommendations_prompt(request: &RecommendationRequest) -> String {
    format!(
        "You are an expert in recommending hiking trails based on the city and user preferences.\n\
         Provide the top 5 hiking trails for the given city that match the user's specific needs.\n\
         Include a brief description of each trail with relevant emojis, its difficulty level, length, elevation gain, notable features, and the AllTrails link.\n\
         {}\n\
         {TRAIL_BLOCK_FORMAT}\n\
         Link: <AllTrails link>",
        preference_lines(request)
    )
}

pub fn popular_trails_prompt(city: &str) -> String {
    format!(
        "Provide the top 5 most popular and beautiful hiking trails in {city}, regardless of any specific filters.\n\
         Include a brief description of each trail with relevant emojis, its difficulty level, length, elevation gain, and notable features.\n\
         {TRAIL_BLOCK_FORMAT}"
    )
}
