use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::editing::{PortfolioLinks, SkillSet};
use crate::errors::DraftError;
use crate::models::choices::UkClients;
use crate::models::ApplicationDraft;

use super::store::KeyValueStore;

pub const DRAFT_FORM_KEY: &str = "draftForm";
pub const DRAFT_SKILLS_KEY: &str = "draftSkills";
pub const DRAFT_PORTFOLIO_LINKS_KEY: &str = "draftPortfolioLinks";

const ALL_KEYS: [&str; 3] = [DRAFT_FORM_KEY, DRAFT_SKILLS_KEY, DRAFT_PORTFOLIO_LINKS_KEY];

/// Everything recovered from the store at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveredDraft {
    pub draft: ApplicationDraft,
    pub skills: SkillSet,
    pub portfolio_links: PortfolioLinks,
    /// Mirror of `draft.uk_clients` at load time.
    pub uk_clients_choice: Option<UkClients>,
}

/// Owns the load/save/clear lifecycle of the draft against a key-value store.
///
/// Saves are ignored until [`DraftStore::load`] has run, so an empty
/// in-memory form can never overwrite a draft that has not been read yet.
pub struct DraftStore<S: KeyValueStore> {
    backend: S,
    loaded: bool,
}

impl<S: KeyValueStore> DraftStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the three draft keys. Never fails. If any value is undecodable,
    /// all three keys are dropped and the empty draft is returned, since the
    /// remaining values cannot be assumed consistent with each other. A store
    /// that cannot be read at all also yields the empty draft, but its keys
    /// are left in place.
    pub fn load(&mut self) -> RecoveredDraft {
        let recovered = match self.try_load() {
            Ok(recovered) => {
                info!(
                    "Draft loaded: {} skills, {} portfolio slots",
                    recovered.skills.len(),
                    recovered.portfolio_links.len()
                );
                recovered
            }
            Err(e) if e.is_undecodable() => {
                error!("Error loading saved draft, discarding it: {e}");
                self.remove_all();
                RecoveredDraft::default()
            }
            Err(e) => {
                error!("Could not read saved draft, starting empty: {e}");
                RecoveredDraft::default()
            }
        };
        self.loaded = true;
        recovered
    }

    fn try_load(&self) -> Result<RecoveredDraft, DraftError> {
        let mut recovered = RecoveredDraft::default();

        if let Some(draft) = self.read::<ApplicationDraft>(DRAFT_FORM_KEY)? {
            recovered.uk_clients_choice = draft.uk_clients;
            recovered.draft = draft;
        }
        if let Some(skills) = self.read::<SkillSet>(DRAFT_SKILLS_KEY)? {
            recovered.skills = skills;
        }
        if let Some(links) = self.read::<PortfolioLinks>(DRAFT_PORTFOLIO_LINKS_KEY)? {
            recovered.portfolio_links = links;
        }
        recovered.draft.portfolio = recovered.portfolio_links.project_for_submission();

        Ok(recovered)
    }

    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, DraftError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| DraftError::Decode { key, source })
    }

    /// Writes all three values. Failures are logged and swallowed so that
    /// editing continues even when the store is full.
    pub fn save(&mut self, draft: &ApplicationDraft, skills: &SkillSet, links: &PortfolioLinks) {
        if !self.loaded {
            debug!("Skipping draft save before load has completed");
            return;
        }
        if let Err(e) = self.try_save(draft, skills, links) {
            warn!("Error saving draft: {e}");
        }
    }

    fn try_save(
        &mut self,
        draft: &ApplicationDraft,
        skills: &SkillSet,
        links: &PortfolioLinks,
    ) -> Result<(), DraftError> {
        self.write(DRAFT_FORM_KEY, draft)?;
        self.write(DRAFT_SKILLS_KEY, skills)?;
        self.write(DRAFT_PORTFOLIO_LINKS_KEY, links)?;
        Ok(())
    }

    fn write<T: Serialize>(&mut self, key: &'static str, value: &T) -> Result<(), DraftError> {
        let encoded =
            serde_json::to_string(value).map_err(|source| DraftError::Encode { key, source })?;
        self.backend.set(key, &encoded)?;
        Ok(())
    }

    /// Removes every persisted draft key.
    pub fn clear(&mut self) {
        self.remove_all();
        info!("Saved draft cleared");
    }

    fn remove_all(&mut self) {
        for key in ALL_KEYS {
            if let Err(e) = self.backend.remove(key) {
                warn!("Error removing '{key}' from store: {e}");
            }
        }
    }
}
