// src/handlers/admin_list.rs
use std::sync::Arc;

use log::{error, info};

use crate::dtos::biodata::ListQuery;
use crate::handlers::notice::{Notice, visible};
use crate::middleware::navigator::Navigator;
use crate::middleware::session::Session;
use crate::models::biodata::{BiodataRecord, EducationLevel};
use crate::repositories::biodata_repo::BiodataRepo;
use crate::services::api_client::{ApiClient, ApiError};
use crate::utils::pagination::page_window;

pub const PAGE_SIZE: u32 = 10;
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this biodata?";
pub const LIST_FAILED_MESSAGE: &str = "Failed to fetch biodata list";
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to fetch biodata details";
pub const DELETED_MESSAGE: &str = "Biodata deleted successfully";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete biodata";

/// Interactive yes/no before destructive actions.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub name: String,
    pub position: String,
    pub education: Option<EducationLevel>,
}

/// The administrator's searchable, paginated biodata table.
pub struct AdminList {
    repo: BiodataRepo,
    session: Arc<dyn Session>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    filters: SearchFilters,
    page: u32,
    total_pages: u32,
    records: Vec<BiodataRecord>,
    loading: bool,
    selected: Option<BiodataRecord>,
    error: Option<Notice>,
    success: Option<Notice>,
}

impl AdminList {
    pub fn new(api: ApiClient) -> Self {
        Self {
            session: api.session().clone(),
            navigator: api.navigator().clone(),
            login_path: api.login_path().to_string(),
            repo: BiodataRepo::new(api),
            filters: SearchFilters::default(),
            page: 1,
            total_pages: 1,
            records: Vec::new(),
            loading: false,
            selected: None,
            error: None,
            success: None,
        }
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Filter inputs; nothing is fetched until [`AdminList::search`].
    pub fn filters_mut(&mut self) -> &mut SearchFilters {
        &mut self.filters
    }

    pub fn records(&self) -> &[BiodataRecord] {
        &self.records
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<&BiodataRecord> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&Notice> {
        visible(&self.error)
    }

    pub fn success(&self) -> Option<&Notice> {
        visible(&self.success)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_success(&mut self) {
        self.success = None;
    }

    pub fn page_window(&self) -> Vec<u32> {
        page_window(self.total_pages, self.page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Admins only; everyone else is sent to the login page.
    pub async fn initialize(&mut self) -> Result<(), ApiError> {
        if !self.session.is_authenticated() || !self.session.is_admin() {
            self.navigator.navigate(&self.login_path);
            return Ok(());
        }
        self.fetch(self.filters.clone(), self.page).await
    }

    // Filters and page are always passed in, never read back from `self`,
    // so callers that just changed them get what they asked for.
    async fn fetch(&mut self, filters: SearchFilters, page: u32) -> Result<(), ApiError> {
        self.loading = true;
        let query = ListQuery {
            page,
            limit: PAGE_SIZE,
            name: filters.name,
            position: filters.position,
            education: filters.education,
        };
        let result = self.repo.list(&query).await;
        self.loading = false;

        match result {
            Ok(page_data) => {
                info!(
                    "Loaded {} biodata record(s), page {}/{}",
                    page_data.records.len(),
                    page,
                    page_data.pages
                );
                self.records = page_data.records;
                self.total_pages = page_data.pages;
                Ok(())
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    error!("Listing biodata failed: {}", e);
                    self.error = Some(Notice::error(LIST_FAILED_MESSAGE));
                }
                Err(e)
            }
        }
    }

    pub async fn search(&mut self) -> Result<(), ApiError> {
        self.page = 1;
        self.fetch(self.filters.clone(), 1).await
    }

    pub async fn reset_filters(&mut self) -> Result<(), ApiError> {
        let cleared = SearchFilters::default();
        self.filters = cleared.clone();
        self.page = 1;
        self.fetch(cleared, 1).await
    }

    pub async fn go_to_page(&mut self, page: u32) -> Result<(), ApiError> {
        let page = page.clamp(1, self.total_pages.max(1));
        self.page = page;
        self.fetch(self.filters.clone(), page).await
    }

    pub async fn next_page(&mut self) -> Result<(), ApiError> {
        if !self.has_next() {
            return Ok(());
        }
        self.go_to_page(self.page + 1).await
    }

    pub async fn previous_page(&mut self) -> Result<(), ApiError> {
        if !self.has_previous() {
            return Ok(());
        }
        self.go_to_page(self.page - 1).await
    }

    pub async fn view_details(&mut self, id: &str) -> Result<(), ApiError> {
        match self.repo.fetch(id).await {
            Ok(record) => {
                self.selected = Some(record);
                Ok(())
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    error!("Fetching biodata {} failed: {}", id, e);
                    self.error = Some(Notice::error(DETAIL_FAILED_MESSAGE));
                }
                Err(e)
            }
        }
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    /// Deletes after confirmation. `Ok(false)` when the admin backs out.
    pub async fn delete_record(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool, ApiError> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(false);
        }

        if let Err(e) = self.repo.delete(id).await {
            if !e.is_unauthorized() {
                error!("Deleting biodata {} failed: {}", id, e);
                self.error = Some(Notice::error(DELETE_FAILED_MESSAGE).timed());
            }
            return Err(e);
        }

        self.records.retain(|r| r.id.as_deref() != Some(id));
        if self.selected.as_ref().and_then(|r| r.id.as_deref()) == Some(id) {
            self.selected = None;
        }
        self.success = Some(Notice::success(DELETED_MESSAGE).timed());

        self.fetch(self.filters.clone(), self.page).await?;
        // the last row of the last page is gone, step back to a page that exists
        if self.page > self.total_pages {
            self.page = self.total_pages;
            self.fetch(self.filters.clone(), self.page).await?;
        }
        Ok(true)
    }
}
