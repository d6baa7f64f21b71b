#![allow(dead_code)]

use std::time::Duration;

use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::draft::{DraftStore, KeyValueStore, RecoveredDraft};
use crate::editing::{PortfolioLinks, SkillSet};
use crate::errors::{EditError, SubmitError, NETWORK_ERROR_MESSAGE};
use crate::models::choices::UkClients;
use crate::models::{ApplicationDraft, FieldEdit, FieldId};
use crate::submission::{
    CvAttachment, ServerFieldError, SubmissionClient, SubmissionPayload, SubmitOutcome,
};
use crate::validation::{validate, FieldErrors, ValidationError};

pub const SUCCESS_BANNER_DURATION: Duration = Duration::from_secs(5);
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Application submitted successfully!";

/// Why a submit attempt did not reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// The saved draft has not been loaded yet.
    NotLoaded,
    /// A previous submission is still in flight.
    InFlight,
    /// Local validation failed; errors are on the controller.
    Invalid,
}

/// Result of one pass through [`FormController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    Blocked(SubmitBlocked),
    Submitted,
    Rejected,
    Failed,
}

/// Single owner of all form state.
///
/// Every mutation goes through a typed method which, once the saved draft
/// has been loaded, writes the new state back through the draft store.
pub struct FormController<S: KeyValueStore> {
    store: DraftStore<S>,
    draft: ApplicationDraft,
    skills: SkillSet,
    portfolio_links: PortfolioLinks,
    uk_clients_choice: Option<UkClients>,
    errors: FieldErrors,
    form_message: Option<String>,
    success_message: Option<String>,
    success_until: Option<Instant>,
    submitting: bool,
    cv: Option<CvAttachment>,
}

impl<S: KeyValueStore> FormController<S> {
    pub fn new(backend: S) -> Self {
        let empty = RecoveredDraft::default();
        Self {
            store: DraftStore::new(backend),
            draft: empty.draft,
            skills: empty.skills,
            portfolio_links: empty.portfolio_links,
            uk_clients_choice: None,
            errors: FieldErrors::default(),
            form_message: None,
            success_message: None,
            success_until: None,
            submitting: false,
            cv: None,
        }
    }

    /// Hydrates from the saved draft. Unreadable saved data is discarded.
    pub fn load(&mut self) {
        let recovered = self.store.load();
        self.draft = recovered.draft;
        self.skills = recovered.skills;
        self.portfolio_links = recovered.portfolio_links;
        self.uk_clients_choice = recovered.uk_clients_choice;
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    // ── read access ──────────────────────────────────────────────────────

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn portfolio_links(&self) -> &PortfolioLinks {
        &self.portfolio_links
    }

    /// Drives whether the UK-clients details input is shown.
    pub fn uk_clients_choice(&self) -> Option<UkClients> {
        self.uk_clients_choice
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn form_message(&self) -> Option<&str> {
        self.form_message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn cv(&self) -> Option<&CvAttachment> {
        self.cv.as_ref()
    }

    pub fn store(&self) -> &DraftStore<S> {
        &self.store
    }

    /// The success text while the banner is still showing.
    pub fn success_banner(&self) -> Option<&str> {
        match self.success_until {
            Some(until) if Instant::now() < until => self.success_message.as_deref(),
            _ => None,
        }
    }

    pub fn success_banner_visible(&self) -> bool {
        self.success_banner().is_some()
    }

    // ── edits ────────────────────────────────────────────────────────────

    pub fn edit(&mut self, edit: FieldEdit) {
        let field = edit.field();
        if let FieldEdit::UkClients(choice) = &edit {
            self.uk_clients_choice = *choice;
        }
        self.draft.apply(edit);
        self.errors.clear_field(field);
        self.persist();
    }

    pub fn toggle_skill(&mut self, skill: &str) -> bool {
        let selected = self.skills.toggle(skill);
        self.errors.clear_field(FieldId::Skills);
        self.persist();
        selected
    }

    pub fn add_custom_skill(&mut self, raw: &str) -> bool {
        let added = self.skills.add_custom(raw);
        if added {
            self.errors.clear_field(FieldId::Skills);
            self.persist();
        }
        added
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let removed = self.skills.remove(skill);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn add_portfolio_slot(&mut self) {
        self.portfolio_links.add_slot();
        self.persist();
    }

    pub fn set_portfolio_link(&mut self, index: usize, value: &str) -> Result<(), EditError> {
        self.portfolio_links.set(index, value)?;
        self.sync_portfolio();
        self.persist();
        Ok(())
    }

    /// Returns `Ok(false)` when `index` is the only remaining slot.
    pub fn remove_portfolio_link(&mut self, index: usize) -> Result<bool, EditError> {
        let removed = self.portfolio_links.remove(index)?;
        if removed {
            self.sync_portfolio();
            self.persist();
        }
        Ok(removed)
    }

    pub fn attach_cv(&mut self, cv: CvAttachment) {
        self.cv = Some(cv);
    }

    pub fn remove_cv(&mut self) {
        self.cv = None;
    }

    fn sync_portfolio(&mut self) {
        self.draft.portfolio = self.portfolio_links.project_for_submission();
    }

    fn persist(&mut self) {
        self.store.save(&self.draft, &self.skills, &self.portfolio_links);
    }

    // ── validation & submission ──────────────────────────────────────────

    /// Runs the validation engine and records the result.
    pub fn validate(&mut self) -> bool {
        let errors = validate(&self.draft, &self.skills, self.portfolio_links.slots());
        self.errors = FieldErrors::new(errors);
        self.errors.is_empty()
    }

    /// Validates and, if the form is clean, latches the submitting flag and
    /// returns the payload to send.
    pub fn begin_submission(&mut self) -> Result<SubmissionPayload, SubmitBlocked> {
        if self.submitting {
            return Err(SubmitBlocked::InFlight);
        }
        self.errors.clear();
        self.form_message = None;
        self.success_until = None;

        if !self.is_loaded() {
            return Err(SubmitBlocked::NotLoaded);
        }
        if !self.validate() {
            return Err(SubmitBlocked::Invalid);
        }

        let payload = SubmissionPayload::build(
            &self.draft,
            &self.skills,
            &self.portfolio_links,
            self.cv.as_ref(),
        );
        match payload {
            Ok(payload) => {
                self.submitting = true;
                Ok(payload)
            }
            Err(e) => {
                error!("Could not prepare submission: {e}");
                self.form_message = Some(NETWORK_ERROR_MESSAGE.to_string());
                Err(SubmitBlocked::Invalid)
            }
        }
    }

    /// Releases the latch and applies the endpoint's verdict.
    pub fn finish_submission(
        &mut self,
        result: Result<SubmitOutcome, SubmitError>,
    ) -> SubmitReport {
        self.submitting = false;
        match result {
            Ok(SubmitOutcome::Accepted { message }) => {
                info!("Application accepted");
                self.reset();
                self.success_message =
                    Some(message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()));
                self.success_until = Some(Instant::now() + SUCCESS_BANNER_DURATION);
                SubmitReport::Submitted
            }
            Ok(SubmitOutcome::Rejected { errors }) => {
                warn!("Application rejected with {} field errors", errors.len());
                self.apply_server_errors(errors);
                SubmitReport::Rejected
            }
            Ok(SubmitOutcome::Failed { message }) => {
                warn!("Application failed: {message}");
                self.form_message = Some(message);
                SubmitReport::Failed
            }
            Err(e) => {
                error!("Submission error: {e}");
                self.form_message = Some(NETWORK_ERROR_MESSAGE.to_string());
                SubmitReport::Failed
            }
        }
    }

    pub async fn submit(&mut self, client: &dyn SubmissionClient) -> SubmitReport {
        let payload = match self.begin_submission() {
            Ok(payload) => payload,
            Err(blocked) => return SubmitReport::Blocked(blocked),
        };
        let result = client.submit(payload).await;
        self.finish_submission(result)
    }

    fn apply_server_errors(&mut self, errors: Vec<ServerFieldError>) {
        let mut mapped = Vec::with_capacity(errors.len());
        let mut unplaced = Vec::new();
        for error in errors {
            match error.field.parse::<FieldId>() {
                Ok(field) => mapped.push(ValidationError::new(field, error.message)),
                Err(_) => {
                    warn!("Server reported error for unknown field '{}'", error.field);
                    unplaced.push(error.message);
                }
            }
        }
        self.errors = FieldErrors::new(mapped);
        if !unplaced.is_empty() {
            self.form_message = Some(unplaced.join(" "));
        }
    }

    // ── clearing ─────────────────────────────────────────────────────────

    /// Clears the saved and in-memory draft if `confirm` agrees.
    pub fn clear_draft(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.store.clear();
        let empty = RecoveredDraft::default();
        self.draft = empty.draft;
        self.skills = empty.skills;
        self.portfolio_links = empty.portfolio_links;
        self.uk_clients_choice = None;
        self.errors.clear();
        self.cv = None;
    }
}
