// src/dtos/biodata_dtos.rs
use serde::{Deserialize, Serialize};

use crate::models::biodata::{BiodataRecord, EducationLevel};

/// Every API answer is wrapped as `{ message, data }`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Body returned with a non-2xx status.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ServerFieldError>,
}

/// One field-level complaint from the server validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerFieldError {
    pub path: String,
    #[serde(alias = "message")]
    pub msg: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BiodataListData {
    #[serde(default)]
    pub biodata: Vec<BiodataRecord>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Query for `GET /biodata/all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub name: String,
    pub position: String,
    pub education: Option<EducationLevel>,
}

impl ListQuery {
    /// Query pairs in wire order; blank text filters are left out.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        let name = self.name.trim();
        if !name.is_empty() {
            pairs.push(("nama", name.to_string()));
        }
        let position = self.position.trim();
        if !position.is_empty() {
            pairs.push(("posisi", position.to_string()));
        }
        if let Some(level) = self.education {
            pairs.push(("pendidikan", level.as_str().to_string()));
        }
        pairs
    }
}
