//! HTTP API server implementation

use axum::{
    extract::{rejection::JsonRejection, Json, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::{OpenApi, ToSchema};

use crate::core::config::TranslatorConfig;
use crate::core::errors::TranslationError;
use crate::core::models::{TranslationDirection, TranslationRequest};
use crate::core::samples::SampleSet;
use crate::core::translator::Translator;

/// Interactive translation page
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Application state
#[derive(Clone)]
pub struct AppState {
    translator: Arc<Translator>,
    samples: Arc<SampleSet>,
}

impl AppState {
    pub fn new(translator: Arc<Translator>, samples: SampleSet) -> Self {
        Self {
            translator,
            samples: Arc::new(samples),
        }
    }
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Directions whose models are loaded
    pub loaded: Vec<String>,
}

/// Direction listing entry
#[derive(Serialize, ToSchema)]
pub struct DirectionInfo {
    pub id: String,
    pub label: String,
    pub prompt: String,
    pub source_lang: String,
    pub target_lang: String,
    pub model: String,
}

/// Translation request body. Give either `direction` or both language codes.
#[derive(Deserialize, ToSchema)]
pub struct TranslateBody {
    pub text: String,
    /// `en-hi` or `hi-en`
    pub direction: Option<String>,
    /// `en` or `hi`
    pub source_lang: Option<String>,
    /// `en` or `hi`
    pub target_lang: Option<String>,
}

impl TranslateBody {
    fn direction(&self) -> Result<TranslationDirection, TranslationError> {
        match (&self.direction, &self.source_lang, &self.target_lang) {
            (Some(direction), _, _) => direction.parse(),
            (None, Some(source), Some(target)) => TranslationDirection::from_codes(source, target),
            _ => Err(TranslationError::InvalidDirection {
                value: "missing direction or source_lang/target_lang".to_string(),
            }),
        }
    }
}

/// Translation response body
#[derive(Serialize, ToSchema)]
pub struct TranslateResponse {
    pub translation: String,
    pub direction: String,
    pub model: String,
    pub elapsed_ms: u64,
    pub translated_at: String,
}

#[derive(Deserialize)]
pub struct SamplesQuery {
    pub direction: Option<String>,
}

/// Sample pair as shown in the page
#[derive(Serialize, ToSchema)]
pub struct SampleItem {
    pub source: String,
    pub target: String,
    pub direction: String,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Error returned by handlers, rendered as status code plus JSON body
pub struct ApiError(TranslationError);

impl From<TranslationError> for ApiError {
    fn from(err: TranslationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            e if e.is_client_error() => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            TranslationError::EmptyTranslation => {
                (StatusCode::UNPROCESSABLE_ENTITY, "translation_warning")
            }
            TranslationError::ModelUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "model_error")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "api_error"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                message: self.0.to_string(),
                code: self.0.code().to_string(),
                kind: kind.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health_check, list_directions, list_samples, translate),
    components(schemas(
        HealthResponse,
        DirectionInfo,
        TranslateBody,
        TranslateResponse,
        SampleItem,
        ErrorResponse,
        ErrorDetail
    ))
)]
struct ApiDoc;

/// Index page handler
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check handler
#[utoipa::path(get, path = "/health", responses((status = 200, body = HealthResponse)))]
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        loaded: state
            .translator
            .loaded_directions()
            .iter()
            .map(|d| d.to_string())
            .collect(),
    })
}

/// Supported directions handler
#[utoipa::path(get, path = "/api/directions", responses((status = 200, body = [DirectionInfo])))]
async fn list_directions(State(state): State<AppState>) -> Json<Vec<DirectionInfo>> {
    let directions = TranslationDirection::ALL
        .iter()
        .map(|d| DirectionInfo {
            id: d.to_string(),
            label: d.label().to_string(),
            prompt: d.prompt().to_string(),
            source_lang: d.source_lang().to_string(),
            target_lang: d.target_lang().to_string(),
            model: state.translator.model_id(*d),
        })
        .collect();

    Json(directions)
}

/// Sample pairs handler
#[utoipa::path(
    get,
    path = "/api/samples",
    params(("direction" = Option<String>, Query, description = "en-hi (default) or hi-en")),
    responses(
        (status = 200, body = [SampleItem]),
        (status = 400, body = ErrorResponse)
    )
)]
async fn list_samples(
    State(state): State<AppState>,
    Query(query): Query<SamplesQuery>,
) -> Result<Json<Vec<SampleItem>>, ApiError> {
    let direction = match query.direction.as_deref() {
        Some(value) => value.parse::<TranslationDirection>()?,
        None => TranslationDirection::EnToHi,
    };

    let items = state
        .samples
        .pairs(direction)
        .into_iter()
        .map(|pair| SampleItem {
            source: pair.source,
            target: pair.target,
            direction: pair.direction.to_string(),
        })
        .collect();

    Ok(Json(items))
}

/// Translation handler
#[utoipa::path(
    post,
    path = "/api/translate",
    request_body = TranslateBody,
    responses(
        (status = 200, body = TranslateResponse),
        (status = 400, body = ErrorResponse),
        (status = 422, body = ErrorResponse),
        (status = 503, body = ErrorResponse)
    )
)]
async fn translate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| TranslationError::InvalidRequest {
        message: rejection.body_text(),
    })?;
    let direction = payload.direction()?;
    if payload.text.trim().is_empty() {
        return Err(TranslationError::EmptyInput.into());
    }

    let request = TranslationRequest::new(payload.text, direction);
    let translator = state.translator.clone();

    // rust-bert inference is blocking
    let result = tokio::task::spawn_blocking(move || translator.translate_request(&request))
        .await
        .map_err(|e| TranslationError::InternalError(e.to_string()))?;

    match result {
        Ok(result) => Ok(Json(TranslateResponse {
            translation: result.translation,
            direction: result.direction.to_string(),
            model: result.model_used,
            elapsed_ms: result.elapsed_ms,
            translated_at: result.translated_at.to_rfc3339(),
        })),
        Err(e) => {
            warn!("Translation failed: {}", e);
            Err(e.into())
        }
    }
}

/// OpenAPI document handler
async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/directions", get(list_directions))
        .route("/api/samples", get(list_samples))
        .route("/api/translate", post(translate))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(config: TranslatorConfig, preload: bool) -> anyhow::Result<()> {
    let samples = SampleSet::load(&config.samples_path)?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let translator = Arc::new(Translator::new(config)?);

    if preload {
        info!("Preloading both translation models");
        let handle = translator.clone();
        tokio::task::spawn_blocking(move || handle.preload()).await??;
    }

    let app = router(AppState::new(translator, samples));

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
