//! HTTP handlers for browsing the disease knowledge base

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{validate_crop_name, CropType, DiseaseRecord};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for listing diseases
#[derive(Debug, Deserialize)]
pub struct DiseaseQuery {
    pub crop_type: String,
}

#[derive(Debug, Serialize)]
pub struct DiseaseListResponse {
    pub crop_type: CropType,
    pub count: usize,
    pub diseases: Vec<DiseaseRecord>,
}

/// List candidate diseases for a crop type
pub async fn list_diseases(
    State(state): State<AppState>,
    Query(query): Query<DiseaseQuery>,
) -> AppResult<Json<DiseaseListResponse>> {
    validate_crop_name(&query.crop_type).map_err(|msg| AppError::validation("crop_type", msg))?;

    let crop_type = CropType::from_name(&query.crop_type);
    let diseases = state.knowledge_base.candidates(crop_type).await;

    Ok(Json(DiseaseListResponse {
        crop_type,
        count: diseases.len(),
        diseases,
    }))
}
