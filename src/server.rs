use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use tracing::{error, info, warn};
use trending_rank::{TrendingError, TrendingService};

use crate::api::{ApiError, ApiTrendingQuery, ApiTrendingResponse};

#[derive(Clone)]
struct AppState {
    service: TrendingService,
    default_per_page: i64,
}

pub async fn serve(
    host: &str,
    port: u16,
    default_per_page: i64,
    service: TrendingService,
) -> Result<(), String> {
    let state = AppState {
        service,
        default_per_page,
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/trending", get(trending_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "serving trending api");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn trending_handler(
    State(state): State<AppState>,
    Query(query): Query<ApiTrendingQuery>,
) -> Result<Json<ApiTrendingResponse>, (StatusCode, Json<ApiError>)> {
    let page = state
        .service
        .trending(query.page(), query.per_page(state.default_per_page))
        .await
        .map_err(error_response)?;

    Ok(Json(ApiTrendingResponse::from_page(page)))
}

fn error_response(err: TrendingError) -> (StatusCode, Json<ApiError>) {
    let status = if err.is_client_error() {
        warn!(error = %err, "rejected trending request");
        StatusCode::BAD_REQUEST
    } else {
        error!(error = %err, "trending request failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ApiError {
            error: err.to_string(),
        }),
    )
}
