use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use crate::editing::{PortfolioLinks, SkillSet};
use crate::errors::SubmitError;
use crate::models::choices::Availability;
use crate::models::ApplicationDraft;

/// A CV chosen for upload. Never persisted with the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvAttachment {
    pub file_name: String,
    pub bytes: Bytes,
}

impl CvAttachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, SubmitError> {
        let bytes = std::fs::read(path).map_err(|source| SubmitError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cv".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn content_type(&self) -> &'static str {
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => "application/pdf",
            Some("doc") => "application/msword",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => "application/octet-stream",
        }
    }
}

/// The named text parts of one submission, in send order, plus the optional
/// CV file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    fields: Vec<(&'static str, String)>,
    cv: Option<CvAttachment>,
}

impl SubmissionPayload {
    /// Projects the form state onto the backend's multipart contract.
    ///
    /// `portfolioLinks` carries only non-blank links; `ukClientsDetails` is
    /// sent only when UK clients is `Yes`.
    pub fn build(
        draft: &ApplicationDraft,
        skills: &SkillSet,
        links: &PortfolioLinks,
        cv: Option<&CvAttachment>,
    ) -> Result<Self, SubmitError> {
        let skills_json = serde_json::to_string(skills).map_err(SubmitError::Encode)?;
        let links_json = serde_json::to_string(&links.project_for_submission())
            .map_err(SubmitError::Encode)?;
        let availability_other = match draft.availability {
            Some(Availability::Other) => Availability::Other.to_string(),
            _ => String::new(),
        };
        let uk_clients_details = if draft.has_uk_clients() {
            draft.uk_clients_details.clone()
        } else {
            String::new()
        };

        let fields = vec![
            ("fullName", draft.full_name.clone()),
            ("email", draft.email.clone()),
            ("phone", draft.phone.clone()),
            ("location", draft.location.clone()),
            ("primaryRole", choice_text(draft.primary_role)),
            ("customRole", draft.custom_role.clone()),
            ("experience", choice_text(draft.experience)),
            ("skills", skills_json),
            ("portfolioLinks", links_json),
            ("availability", choice_text(draft.availability)),
            ("availabilityOther", availability_other),
            ("ukHours", choice_text(draft.uk_hours)),
            ("officeWork", choice_text(draft.office_work)),
            ("salaryRange", choice_text(draft.salary_range)),
            ("summary", draft.summary.clone()),
            ("ukClients", choice_text(draft.uk_clients)),
            ("ukClientsDetails", uk_clients_details),
            ("interest", draft.interest.clone()),
            ("accuracyConsent", draft.accuracy_consent.to_string()),
            ("dataConsent", draft.data_consent.to_string()),
        ];

        Ok(Self {
            fields,
            cv: cv.cloned(),
        })
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn cv(&self) -> Option<&CvAttachment> {
        self.cv.as_ref()
    }

    pub fn into_multipart(self) -> Result<Form, SubmitError> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        if let Some(cv) = self.cv {
            let content_type = cv.content_type();
            let part = Part::bytes(cv.bytes.to_vec())
                .file_name(cv.file_name)
                .mime_str(content_type)?;
            form = form.part("cv", part);
        }
        Ok(form)
    }
}

fn choice_text<T: std::fmt::Display>(choice: Option<T>) -> String {
    choice.map(|c| c.to_string()).unwrap_or_default()
}
