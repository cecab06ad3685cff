// API request handlers
// Author: Gabriel Demetrios Lafis

use actix_web::{web, HttpResponse};
use log::debug;

use crate::data::DataSet;
use crate::processing::{fallback_analysis, NoProgress};
use crate::utils::{validate_sample_size, EngineConfig};
use crate::worker::run_with_fallback;
use super::{models::*, ApiError};

/// Health check
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Sample and summarize the posted rows
pub async fn summarize(
    engine: web::Data<EngineConfig>,
    payload: web::Json<SummarizeRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();

    let mut config = engine.get_ref().clone();
    if let Some(sample_size) = req.sample_size {
        validate_sample_size(sample_size).map_err(ApiError::ValidationError)?;
        config.sample_size = sample_size;
    }
    if req.seed.is_some() {
        config.seed = req.seed;
    }

    let data = DataSet::from(req.rows);
    debug!("Summarize request with {} rows", data.len());

    let analysis = web::block(move || run_with_fallback(data, &config, &mut NoProgress))
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(analysis))
}

/// Overview-only summary of the posted rows
pub async fn summarize_fallback(
    payload: web::Json<SummarizeRequest>,
) -> Result<HttpResponse, ApiError> {
    let data = DataSet::from(payload.into_inner().rows);
    Ok(HttpResponse::Ok().json(fallback_analysis(&data)))
}
