/// User agent string for HTTP requests (Nominatim rejects anonymous clients)
pub const USER_AGENT: &str = "trail-scout/0.1.0";

/// Nominatim (OpenStreetMap) geocoding API base URL
pub const NOMINATIM_API_BASE: &str = "https://nominatim.openstreetmap.org";

/// Meteomatics weather API base URL
pub const METEOMATICS_API_BASE: &str = "https://api.meteomatics.com";

/// Gemini generative language API base URL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Model used when `GEMINI_MODEL` is unset
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

pub const GEOCODE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_FORECAST_DAYS: u32 = 3;
pub const MAX_FORECAST_DAYS: u32 = 10;

/// Trail length slider bounds, in miles
pub const MAX_LENGTH_MILES: f64 = 10.0;
pub const LENGTH_STEP_MILES: f64 = 0.5;

/// Elevation gain slider bounds, in feet
pub const MAX_ELEVATION_FEET: u32 = 1000;
pub const ELEVATION_STEP_FEET: u32 = 100;
