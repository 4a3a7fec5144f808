//! HTTP handlers for the AdCheck API

use std::sync::Arc;

use adcheck_core::overlay::{self, Segment};
use adcheck_core::view;
use adcheck_core::AnalysisResult;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{AnalyzeRequest, ViewRequest};
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "薬機・景表チェッカーAPIは起動中です。POST /api/analyze にテキストを送信してください。",
    }))
}

/// Analyze ad copy and return the score/span/meta structure.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(req) = payload?;
    let result = state.engine.analyze(&req.text);
    tracing::info!(
        "Analyzed {} chars: score={}, spans={}",
        req.text.chars().count(),
        result.score,
        result.spans.len()
    );
    Ok(Json(result))
}

/// Analyze, apply the requested filter, and return the visible rows as
/// a CSV download.
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ViewRequest>, JsonRejection>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    let Json(req) = payload?;
    let result = state.engine.analyze(&req.text);
    let mut visible = view::filter(&result.spans, &req.filter());
    view::sort_for_display(&mut visible);
    let csv = view::to_csv(&view::to_table(&visible));

    Ok((
        StatusCode::OK,
        [
            (
                "Content-Type".to_string(),
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                "Content-Disposition".to_string(),
                "attachment; filename=\"yakkihou_result.csv\"".to_string(),
            ),
        ],
        csv,
    ))
}

/// Analyze, apply the requested filter, and return the highlighted
/// rendering of the text as plain/highlight segments.
pub async fn render_overlay(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ViewRequest>, JsonRejection>,
) -> Result<Json<Vec<Segment>>, ApiError> {
    let Json(req) = payload?;
    let result = state.engine.analyze(&req.text);
    let visible = view::filter(&result.spans, &req.filter());
    let marks = overlay::resolve_overlaps(&visible, req.text.chars().count());
    Ok(Json(overlay::render_marks(&req.text, &marks)))
}
