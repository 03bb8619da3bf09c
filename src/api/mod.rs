// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{ExistsResponse, SubmitWhitelistRequest, WhitelistEntry},
    state::AppState,
};

pub mod health;
pub mod whitelist;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/whitelist",
            get(whitelist::check_address).post(whitelist::submit_whitelist),
        )
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        whitelist::check_address,
        whitelist::submit_whitelist,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            WhitelistEntry,
            SubmitWhitelistRequest,
            ExistsResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Whitelist", description = "Whitelist signup and lookup"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
