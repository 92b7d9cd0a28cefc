use std::sync::Arc;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};

use crate::advisor::TrailAdvisor;
use crate::error::TrailError;
use crate::filters::{RecommendationRequest, TrailFilters};
use crate::formatters::{format_completion, format_recommendations, format_weather_report};
use crate::models::{CityRequest, RecommendTrailsRequest};

/// MCP server exposing the advisor's operations as tools
#[derive(Clone)]
pub struct TrailService {
    advisor: Arc<TrailAdvisor>,
    tool_router: ToolRouter<Self>,
}

impl TrailService {
    pub fn new(advisor: TrailAdvisor) -> Self {
        Self {
            advisor: Arc::new(advisor),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_mcp_error(context: &str, error: TrailError) -> McpError {
    match error {
        TrailError::InvalidFilter(_) | TrailError::CityNotFound(_) => {
            McpError::invalid_params(error.to_string(), None)
        }
        _ => McpError::internal_error(format!("{}: {}", context, error), None),
    }
}

#[tool_handler]
impl ServerHandler for TrailService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "trail-scout".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Hiking trail recommendations for any city. Weather comes from Meteomatics \
                after geocoding the city with OpenStreetMap; trails are suggested by a \
                generative language model."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl TrailService {
    /// Gets current conditions and the daily forecast for a city
    #[tool(description = "Get the current temperature, humidity and a short daily forecast for a city (e.g., 'Squamish, BC').")]
    async fn get_trail_weather(
        &self,
        Parameters(request): Parameters<CityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting weather for city: {}", request.city);

        let report = self
            .advisor
            .weather(&request.city)
            .await
            .map_err(|e| to_mcp_error("Failed to fetch weather", e))?;

        Ok(CallToolResult::success(vec![Content::text(format_weather_report(&report))]))
    }

    /// Lists the most popular trails in a city, ignoring filters
    #[tool(description = "List the top 5 most popular and beautiful hiking trails in a city, regardless of any filters.")]
    async fn get_popular_trails(
        &self,
        Parameters(request): Parameters<CityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting popular trails for city: {}", request.city);

        let completion = self
            .advisor
            .popular_trails(&request.city)
            .await
            .map_err(|e| to_mcp_error("Failed to generate popular trails", e))?;

        Ok(CallToolResult::success(vec![Content::text(format_completion(&completion))]))
    }

    /// Recommends trails matching the caller's filters
    #[tool(description = "Recommend 5 hiking trails in a city matching the given filters. Length is in miles (0 to 10, steps of 0.5); elevation gain is in feet (0 to 1000, steps of 100). Preferences are free text (e.g., 'waterfalls, shade').")]
    async fn recommend_trails(
        &self,
        Parameters(request): Parameters<RecommendTrailsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Recommending trails for city: {}", request.city);

        let filters = TrailFilters::new(
            request.difficulty,
            request.length_miles,
            request.elevation_feet,
            request.season,
            request.pet_friendly,
        )
        .map_err(|e| to_mcp_error("Invalid filters", e))?;
        let request = RecommendationRequest::new(request.city, filters, request.preferences);

        let summary = self
            .advisor
            .summary(&request)
            .await
            .map_err(|e| to_mcp_error("Failed to generate summary", e))?;
        let completion = self
            .advisor
            .recommendations(&request)
            .await
            .map_err(|e| to_mcp_error("Failed to generate recommendations", e))?;

        let formatted = format_recommendations(&request.city, &summary, &completion);
        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }
}
