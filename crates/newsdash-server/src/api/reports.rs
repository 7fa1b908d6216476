use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    Extension, Json,
};
use newsdash_core::{AnalysisPeriod, AnalyticsSnapshot, ErrorKind};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TriggerBody {
    pub company_id: Option<String>,
    pub analysis_period: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TriggerAccepted {
    pub ok: bool,
    pub analysis_period: AnalysisPeriod,
}

pub(super) async fn live_snapshot(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Result<Json<AnalyticsSnapshot>, ApiError> {
    state
        .gateway
        .fetch_live(&headers)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(req_id.0, &e))
}

pub(super) async fn historical_snapshot(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((company_id, timestamp)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<AnalyticsSnapshot>, ApiError> {
    state
        .gateway
        .fetch_report(&headers, &company_id, &timestamp)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(req_id.0, &e))
}

pub(super) async fn trigger_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Json<TriggerBody>, JsonRejection>,
) -> Result<Json<TriggerAccepted>, ApiError> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            // A missing session outranks a malformed body.
            state
                .gateway
                .authenticate(&headers)
                .await
                .map_err(|e| ApiError::from_gateway(req_id.0.clone(), &e))?;
            return Err(ApiError::new(
                req_id.0,
                ErrorKind::ValidationError,
                rejection.body_text(),
            ));
        }
    };

    let period = body
        .analysis_period
        .unwrap_or_else(|| AnalysisPeriod::default().as_str().to_string());

    let analysis_period = state
        .gateway
        .trigger_analysis(&headers, body.company_id.as_deref(), &period)
        .await
        .map_err(|e| ApiError::from_gateway(req_id.0, &e))?;

    Ok(Json(TriggerAccepted {
        ok: true,
        analysis_period,
    }))
}
