//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{devices, health, quotes, rankings, reports, users, votes};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Babillages API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Quote sharing and voting backend"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "users", description = "User accounts"),
        (name = "devices", description = "Anonymous device registration"),
        (name = "quotes", description = "Quote submission and listing"),
        (name = "votes", description = "Voting"),
        (name = "reports", description = "Content reporting"),
        (name = "rankings", description = "Monthly ranking snapshots")
    ),
    paths(
        // Health
        health::health,
        // Users
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Devices
        devices::register_device,
        devices::get_device,
        devices::link_device,
        // Quotes
        quotes::create_quote,
        quotes::list_quotes,
        quotes::get_quote,
        quotes::update_quote,
        quotes::delete_quote,
        // Votes
        votes::cast_vote,
        // Reports
        reports::create_report,
        // Rankings
        rankings::get_rankings,
        rankings::finalize_rankings,
    ),
    components(schemas(
        // Health
        health::HealthResponse,
        // Users
        users::types::UserDto,
        users::types::CreateUserRequest,
        users::types::UpdateUserRequest,
        users::ListUsersQuery,
        // Devices
        devices::types::DeviceDto,
        devices::types::CreateDeviceRequest,
        devices::types::LinkDeviceRequest,
        // Quotes
        quotes::types::QuoteDto,
        quotes::types::CreateQuoteRequest,
        quotes::types::UpdateQuoteRequest,
        quotes::types::ListQuotesQuery,
        // Votes
        votes::types::VoteDto,
        votes::types::CreateVoteRequest,
        // Reports
        reports::types::ReportDto,
        reports::types::CreateReportRequest,
        // Rankings
        rankings::types::RankingDto,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Babillages API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/api/v1/votes"));
        assert!(json.contains("/api/v1/rankings/{period}/finalize"));
    }
}
