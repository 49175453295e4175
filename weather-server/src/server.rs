//! HTTP surface: `GET /` and `POST /api/weather`.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use weather_core::{
    ResponseEnvelope, WeatherError, WeatherProvider, WeatherRequest, authenticate, lookup,
};

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared, read-only state for handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub api_token: Arc<str>,
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(api_token: &str, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { api_token: Arc::from(api_token), provider }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

/// Every failed request is answered as `{"message": ...}` with this status.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self {
            status: StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY),
            message: err.to_string(),
        }
    }
}

/// Body could not be read, e.g. it exceeds [`MAX_BODY_BYTES`].
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self { status: rejection.status(), message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = self.status.as_u16(), error = %self.message, "weather request failed");

        (self.status, Json(ErrorBody { message: self.message })).into_response()
    }
}

/// GET / - greeting
async fn home() -> Html<&'static str> {
    Html("<p><h2>Weather SaaS Home.</h2></p>")
}

/// POST /api/weather - authenticate, look up the weather, attach advice
async fn weather(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let request = WeatherRequest::from_json_lenient(&body?);
    authenticate(request.token.as_ref(), &state.api_token)?;

    let location = request.location_text();
    let date = request.date_text();
    tracing::info!(%location, %date, "weather lookup");

    let weather = lookup(state.provider.as_ref(), &location, &date).await?;

    Ok(Json(ResponseEnvelope::assemble(request, weather, Utc::now())))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/weather", post(weather))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
