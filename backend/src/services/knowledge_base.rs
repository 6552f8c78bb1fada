//! Disease knowledge base access
//!
//! Candidate diseases come from the `diseases` table when it holds active
//! rows for the crop, otherwise from the built-in catalog. The two sources
//! are never merged. Unrecognised crops (`CropType::Other`) always get the
//! single generic catalog entry.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{static_candidates, CropType, DiseaseRecord, Severity};
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;

/// Persistent disease records
#[async_trait]
pub trait DiseaseStore: Send + Sync {
    /// Active records for a crop type, matched case-insensitively
    async fn find_active_diseases(&self, crop_type: CropType) -> AppResult<Vec<DiseaseRecord>>;
}

/// Row in the `diseases` table
#[derive(Debug, Clone, FromRow)]
struct DiseaseRow {
    name: String,
    crop_type: String,
    causes: Vec<String>,
    symptoms: Vec<String>,
    treatments: Vec<String>,
    severity: String,
}

impl From<DiseaseRow> for DiseaseRecord {
    fn from(row: DiseaseRow) -> Self {
        DiseaseRecord {
            name: row.name,
            crop_type: CropType::from_name(&row.crop_type),
            causes: row.causes,
            symptoms: row.symptoms,
            treatments: row.treatments,
            severity: Severity::from_db(&row.severity),
        }
    }
}

/// PostgreSQL-backed disease store
#[derive(Clone)]
pub struct PgDiseaseStore {
    db: PgPool,
}

impl PgDiseaseStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DiseaseStore for PgDiseaseStore {
    async fn find_active_diseases(&self, crop_type: CropType) -> AppResult<Vec<DiseaseRecord>> {
        let rows = sqlx::query_as::<_, DiseaseRow>(
            r#"
            SELECT name, crop_type, causes, symptoms, treatments, severity
            FROM diseases
            WHERE LOWER(crop_type) = LOWER($1) AND is_active = TRUE
            ORDER BY created_at, name
            "#,
        )
        .bind(crop_type.as_str())
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(DiseaseRecord::from).collect())
    }
}

/// Knowledge base accessor used by the scorer
#[derive(Clone)]
pub struct KnowledgeBase {
    store: Arc<dyn DiseaseStore>,
}

impl KnowledgeBase {
    pub fn new(store: Arc<dyn DiseaseStore>) -> Self {
        Self { store }
    }

    /// Candidate diseases for a crop type; never fails and never empty
    pub async fn candidates(&self, crop_type: CropType) -> Vec<DiseaseRecord> {
        if crop_type == CropType::Other {
            return static_candidates(crop_type);
        }

        match self.store.find_active_diseases(crop_type).await {
            Ok(records) if !records.is_empty() => {
                tracing::debug!(
                    crop_type = %crop_type,
                    count = records.len(),
                    "Using stored disease records"
                );
                records
            }
            Ok(_) => {
                tracing::debug!(crop_type = %crop_type, "No stored diseases, using static catalog");
                static_candidates(crop_type)
            }
            Err(e) => {
                tracing::warn!(
                    crop_type = %crop_type,
                    "Disease store read failed, using static catalog: {}",
                    e
                );
                static_candidates(crop_type)
            }
        }
    }
}
