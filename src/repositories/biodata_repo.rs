// src/repositories/biodata_repo.rs
use log::{debug, info};
use serde_json::Value;
use urlencoding::encode;

use crate::dtos::biodata::{ApiEnvelope, BiodataListData, ListQuery};
use crate::models::biodata::BiodataRecord;
use crate::services::api_client::{ApiClient, ApiError};

/// One page of `GET /biodata/all`.
#[derive(Debug, Clone, Default)]
pub struct BiodataPage {
    pub records: Vec<BiodataRecord>,
    pub pages: u32,
}

/// Endpoint wrappers for `/biodata`.
#[derive(Clone)]
pub struct BiodataRepo {
    api: ApiClient,
}

impl BiodataRepo {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn item_path(id: &str) -> String {
        format!("/biodata/{}", encode(id))
    }

    /// `GET /biodata/me`. `Ok(None)` when the account has no record yet.
    pub async fn fetch_mine(&self) -> Result<Option<BiodataRecord>, ApiError> {
        match self.api.get::<ApiEnvelope<BiodataRecord>>("/biodata/me", &[]).await {
            Ok(envelope) => Ok(envelope.data),
            Err(ApiError::NotFound { .. }) => {
                debug!("No biodata yet for this account");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// `POST /biodata`, create-or-replace. Returns the server's canonical copy.
    pub async fn save(&self, record: &BiodataRecord) -> Result<Option<BiodataRecord>, ApiError> {
        let envelope: ApiEnvelope<BiodataRecord> = self.api.post("/biodata", record).await?;
        info!("Biodata saved: {}", envelope.message.as_deref().unwrap_or("ok"));
        Ok(envelope.data)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<BiodataPage, ApiError> {
        let envelope: ApiEnvelope<BiodataListData> =
            self.api.get("/biodata/all", &query.to_pairs()).await?;
        let data = envelope.data.unwrap_or_default();
        let pages = data
            .pagination
            .and_then(|p| p.pages)
            .unwrap_or(1)
            .max(1);
        Ok(BiodataPage {
            records: data.biodata,
            pages,
        })
    }

    pub async fn fetch(&self, id: &str) -> Result<BiodataRecord, ApiError> {
        let envelope: ApiEnvelope<BiodataRecord> = self.api.get(&Self::item_path(id), &[]).await?;
        envelope.data.ok_or(ApiError::NotFound {
            message: envelope.message,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let _ack: Value = self.api.delete(&Self::item_path(id)).await?;
        info!("Biodata {} deleted", id);
        Ok(())
    }
}
