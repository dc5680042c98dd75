// src/handlers/biodata_page.rs
use std::sync::Arc;

use log::{error, info, warn};

use crate::forms::BiodataForm;
use crate::forms::biodata_form::INCOMPLETE_FORM_MESSAGE;
use crate::handlers::notice::{Notice, visible};
use crate::middleware::navigator::Navigator;
use crate::middleware::session::Session;
use crate::models::biodata::BiodataRecord;
use crate::repositories::biodata_repo::BiodataRepo;
use crate::services::api_client::{ApiClient, ApiError};

pub const SAVED_MESSAGE: &str = "Biodata berhasil disimpan!";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch biodata";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save biodata";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Viewing,
    Editing,
    Submitting,
    /// Nothing to act on: the first fetch failed or the session is gone.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// Local validation failed; nothing was sent.
    Invalid,
}

/// The employee's own biodata screen.
pub struct BiodataPage {
    repo: BiodataRepo,
    session: Arc<dyn Session>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    state: PageState,
    saved: Option<BiodataRecord>,
    form: BiodataForm,
    banner: Option<Notice>,
    toast: Option<Notice>,
}

impl BiodataPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            session: api.session().clone(),
            navigator: api.navigator().clone(),
            login_path: api.login_path().to_string(),
            repo: BiodataRepo::new(api),
            state: PageState::Loading,
            saved: None,
            form: BiodataForm::new(),
            banner: None,
            toast: None,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn saved(&self) -> Option<&BiodataRecord> {
        self.saved.as_ref()
    }

    /// No record exists yet, so submitting creates one.
    pub fn is_create_mode(&self) -> bool {
        self.saved.is_none()
    }

    pub fn form(&self) -> &BiodataForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BiodataForm {
        &mut self.form
    }

    pub fn banner(&self) -> Option<&Notice> {
        self.banner.as_ref()
    }

    pub fn toast(&self) -> Option<&Notice> {
        visible(&self.toast)
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// First load. Signed-out visitors are sent to the login page instead.
    pub async fn initialize(&mut self) -> Result<(), ApiError> {
        if !self.session.is_authenticated() {
            self.navigator.navigate(&self.login_path);
            self.state = PageState::Unavailable;
            return Ok(());
        }
        self.state = PageState::Loading;
        self.refresh().await
    }

    /// Re-reads the account's record from the server.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.repo.fetch_mine().await {
            Ok(Some(record)) => {
                self.form.reset(Some(&record));
                self.saved = Some(record);
                self.state = PageState::Viewing;
                Ok(())
            }
            Ok(None) => {
                info!("No biodata on file, switching to create mode");
                self.saved = None;
                self.form.reset(None);
                self.state = PageState::Editing;
                Ok(())
            }
            Err(e) => {
                if !e.is_unauthorized() {
                    error!("Fetching biodata failed: {}", e);
                    self.banner = Some(Notice::error(FETCH_FAILED_MESSAGE));
                }
                if self.state == PageState::Loading {
                    self.state = PageState::Unavailable;
                }
                Err(e)
            }
        }
    }

    pub fn edit(&mut self) {
        if self.state == PageState::Viewing {
            self.state = PageState::Editing;
        }
    }

    /// Drops local edits. Without a saved record there is nothing to view, so
    /// the form stays open.
    pub fn cancel(&mut self) {
        self.form.reset(self.saved.as_ref());
        self.banner = None;
        self.state = if self.saved.is_some() {
            PageState::Viewing
        } else {
            PageState::Editing
        };
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, ApiError> {
        self.state = PageState::Submitting;
        self.banner = None;
        self.form.clear_errors();

        let errors = self.form.validate();
        if !errors.is_empty() {
            warn!("Biodata form has {} incomplete field(s)", errors.len());
            self.form.set_errors(errors);
            self.banner = Some(Notice::error(INCOMPLETE_FORM_MESSAGE));
            self.state = PageState::Editing;
            return Ok(SubmitOutcome::Invalid);
        }

        let submission = self.form.to_submission();
        match self.repo.save(&submission).await {
            Ok(stored) => {
                let stored = stored.unwrap_or(submission);
                self.form.reset(Some(&stored));
                self.saved = Some(stored);
                self.state = PageState::Viewing;
                self.toast = Some(Notice::success(SAVED_MESSAGE).timed());

                // pick up whatever the server normalised
                if let Err(e) = self.refresh().await {
                    warn!("Reload after save failed: {}", e);
                }
                Ok(SubmitOutcome::Saved)
            }
            Err(e) => {
                self.state = PageState::Editing;
                if !e.is_unauthorized() {
                    error!("Saving biodata failed: {}", e);
                    self.form.merge_server_errors(e.field_errors());
                    let message = e.server_message().unwrap_or(SAVE_FAILED_MESSAGE);
                    self.banner = Some(Notice::error(message));
                }
                Err(e)
            }
        }
    }
}
