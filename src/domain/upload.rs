//! Per-slot upload status tracking for the required documents.
//!
//! Each document key owns an independent slot record. A single optional key
//! (the "pending" mailbox) names the slot the file picker is currently
//! working for. The tracker never performs I/O itself: accepting a file
//! yields an [`UploadJob`] for the caller to dispatch, and the caller feeds
//! the outcome back through [`UploadTracker::complete`].

use super::errors::UploadError;
use super::models::{
    DocumentKey, DocumentSlot, SelectedFile, SlotStatus, UploadReceipt, ALL_DOCUMENT_KEYS,
};
use std::collections::BTreeMap;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["docx", "pdf"];
pub const UPLOADING_NOTE: &str = "Uploading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooseOutcome {
    /// The slot is now pending; the picker should open.
    OpenPicker,
    /// The slot already has an upload in flight.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub key: DocumentKey,
    pub file: SelectedFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDecision {
    /// Nothing was pending.
    Ignored,
    /// Refused locally; the slot is already marked rejected.
    Rejected(DocumentKey),
    /// Accepted; the slot is uploading and the job must be sent.
    Upload(UploadJob),
}

/// The remote side of an upload. Implementations block until the server
/// answers; callers run them off the UI thread.
pub trait UploadEndpoint: Send + Sync {
    fn upload(&self, job: &UploadJob) -> Result<UploadReceipt, UploadError>;
}

#[derive(Debug, Clone)]
pub struct UploadTracker {
    backend_base: String,
    slots: BTreeMap<DocumentKey, DocumentSlot>,
    pending: Option<DocumentKey>,
}

impl UploadTracker {
    pub fn new(backend_base: impl Into<String>) -> Self {
        let slots = ALL_DOCUMENT_KEYS
            .iter()
            .map(|key| (*key, DocumentSlot::new(*key)))
            .collect();
        Self {
            backend_base: backend_base.into(),
            slots,
            pending: None,
        }
    }

    pub fn slot(&self, key: DocumentKey) -> &DocumentSlot {
        &self.slots[&key]
    }

    /// Slots in the fixed document order.
    pub fn slots(&self) -> impl Iterator<Item = &DocumentSlot> {
        self.slots.values()
    }

    pub fn pending(&self) -> Option<DocumentKey> {
        self.pending
    }

    pub fn in_flight(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.status == SlotStatus::Uploading)
            .count()
    }

    /// Marks `key` as the picker target, replacing any other pending key.
    pub fn choose(&mut self, key: DocumentKey) -> ChooseOutcome {
        if self.slot(key).status == SlotStatus::Uploading {
            return ChooseOutcome::Busy;
        }
        self.pending = Some(key);
        ChooseOutcome::OpenPicker
    }

    /// The picker was dismissed without a file.
    pub fn cancel_pick(&mut self) {
        self.pending = None;
    }

    pub fn on_file_selected(&mut self, file: SelectedFile) -> FileDecision {
        let Some(key) = self.pending.take() else {
            return FileDecision::Ignored;
        };

        let extension = file.extension();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            self.reject(key, &UploadError::UnsupportedExtension { extension });
            return FileDecision::Rejected(key);
        }

        let slot = self.slot_mut(key);
        slot.status = SlotStatus::Uploading;
        slot.note = UPLOADING_NOTE.to_string();
        slot.filename = None;
        slot.download_url = None;
        FileDecision::Upload(UploadJob { key, file })
    }

    /// Folds a remote outcome into the slot. Completions for slots that are
    /// not uploading are stale and dropped.
    pub fn complete(&mut self, key: DocumentKey, result: Result<UploadReceipt, UploadError>) -> bool {
        if self.slot(key).status != SlotStatus::Uploading {
            return false;
        }
        match result {
            Ok(receipt) => {
                let download_url = self.download_url(&receipt.download_path);
                let slot = self.slot_mut(key);
                slot.status = SlotStatus::Saved;
                slot.note = format!("Saved as {}", receipt.filename);
                slot.filename = Some(receipt.filename);
                slot.download_url = Some(download_url);
            }
            Err(err) => self.reject(key, &err),
        }
        true
    }

    fn reject(&mut self, key: DocumentKey, err: &UploadError) {
        let slot = self.slot_mut(key);
        slot.status = SlotStatus::Rejected;
        slot.note = err.to_string();
        slot.filename = None;
        slot.download_url = None;
    }

    fn download_url(&self, path: &str) -> String {
        let base = self.backend_base.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    fn slot_mut(&mut self, key: DocumentKey) -> &mut DocumentSlot {
        self.slots
            .entry(key)
            .or_insert_with(|| DocumentSlot::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::UNSUPPORTED_EXTENSION_NOTE;

    const BASE: &str = "http://127.0.0.1:5000";

    fn receipt(name: &str) -> UploadReceipt {
        UploadReceipt {
            filename: name.to_string(),
            download_path: format!("/files/{name}"),
        }
    }

    #[test]
    fn test_all_slots_start_ready() {
        let tracker = UploadTracker::new(BASE);
        assert_eq!(tracker.slots().count(), 7);
        assert!(tracker.slots().all(|slot| slot.status == SlotStatus::Ready));
        assert!(tracker.pending().is_none());
    }

    #[test]
    fn test_file_without_pending_slot_is_ignored() {
        let mut tracker = UploadTracker::new(BASE);
        let decision = tracker.on_file_selected(SelectedFile::from_path("a.pdf"));
        assert_eq!(decision, FileDecision::Ignored);
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn test_txt_file_is_rejected_locally() {
        let mut tracker = UploadTracker::new(BASE);
        let key = DocumentKey::FinancialStatements;
        assert_eq!(tracker.choose(key), ChooseOutcome::OpenPicker);

        let decision = tracker.on_file_selected(SelectedFile::from_path("notes.txt"));
        assert_eq!(decision, FileDecision::Rejected(key));
        assert_eq!(tracker.slot(key).status, SlotStatus::Rejected);
        assert_eq!(tracker.slot(key).note, UNSUPPORTED_EXTENSION_NOTE);
        assert!(tracker.pending().is_none());
    }

    #[test]
    fn test_pdf_upload_success_builds_absolute_url() {
        let mut tracker = UploadTracker::new(format!("{BASE}/"));
        let key = DocumentKey::ProjectProposal;
        tracker.choose(key);

        let decision = tracker.on_file_selected(SelectedFile::from_path("/home/me/x.pdf"));
        let job = match decision {
            FileDecision::Upload(job) => job,
            other => panic!("expected upload job, got {other:?}"),
        };
        assert_eq!(job.key, key);
        assert_eq!(job.file.name, "x.pdf");
        assert_eq!(tracker.slot(key).status, SlotStatus::Uploading);
        assert_eq!(tracker.slot(key).note, UPLOADING_NOTE);

        assert!(tracker.complete(key, Ok(receipt("x.pdf"))));
        let slot = tracker.slot(key);
        assert_eq!(slot.status, SlotStatus::Saved);
        assert_eq!(slot.filename.as_deref(), Some("x.pdf"));
        assert_eq!(slot.download_url.as_deref(), Some("http://127.0.0.1:5000/files/x.pdf"));
    }

    #[test]
    fn test_remote_failure_rejects_and_frees_mailbox() {
        let mut tracker = UploadTracker::new(BASE);
        let key = DocumentKey::BudgetBreakdown;
        tracker.choose(key);
        tracker.on_file_selected(SelectedFile::from_path("budget.docx"));

        tracker.complete(key, Err(UploadError::rejected(Some(500), None)));
        assert_eq!(tracker.slot(key).status, SlotStatus::Rejected);
        assert_eq!(tracker.slot(key).note, "Upload failed");
        assert!(tracker.pending().is_none());
        assert_eq!(tracker.choose(DocumentKey::TaxIdentifiers), ChooseOutcome::OpenPicker);
        assert_eq!(tracker.choose(key), ChooseOutcome::OpenPicker);
    }

    #[test]
    fn test_uploading_slot_cannot_be_chosen_again() {
        let mut tracker = UploadTracker::new(BASE);
        let key = DocumentKey::RegistrationCertificate;
        tracker.choose(key);
        tracker.on_file_selected(SelectedFile::from_path("cert.pdf"));

        assert_eq!(tracker.choose(key), ChooseOutcome::Busy);
        assert!(tracker.pending().is_none());
        let decision = tracker.on_file_selected(SelectedFile::from_path("cert.pdf"));
        assert_eq!(decision, FileDecision::Ignored);
    }

    #[test]
    fn test_distinct_slots_upload_independently() {
        let mut tracker = UploadTracker::new(BASE);
        let first = DocumentKey::RegistrationCertificate;
        let second = DocumentKey::InsuranceDocumentation;

        tracker.choose(first);
        tracker.on_file_selected(SelectedFile::from_path("a.pdf"));
        tracker.choose(second);
        tracker.on_file_selected(SelectedFile::from_path("b.docx"));
        assert_eq!(tracker.in_flight(), 2);

        tracker.complete(second, Err(UploadError::Transport("connection refused".to_string())));
        assert_eq!(tracker.slot(first).status, SlotStatus::Uploading);
        assert_eq!(tracker.slot(second).note, "connection refused");

        tracker.complete(first, Ok(receipt("a.txt")));
        assert_eq!(tracker.slot(first).status, SlotStatus::Saved);
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn test_choose_replaces_pending_key() {
        let mut tracker = UploadTracker::new(BASE);
        tracker.choose(DocumentKey::TaxIdentifiers);
        tracker.choose(DocumentKey::StatutoryDeclaration);
        assert_eq!(tracker.pending(), Some(DocumentKey::StatutoryDeclaration));
        tracker.cancel_pick();
        assert!(tracker.pending().is_none());
    }

    #[test]
    fn test_retry_overwrites_previous_result() {
        let mut tracker = UploadTracker::new(BASE);
        let key = DocumentKey::FinancialStatements;
        tracker.choose(key);
        tracker.on_file_selected(SelectedFile::from_path("fs.pdf"));
        tracker.complete(key, Ok(receipt("fs.txt")));

        tracker.choose(key);
        tracker.on_file_selected(SelectedFile::from_path("fs.xlsx"));
        let slot = tracker.slot(key);
        assert_eq!(slot.status, SlotStatus::Rejected);
        assert!(slot.filename.is_none());
        assert!(slot.download_url.is_none());
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut tracker = UploadTracker::new(BASE);
        let key = DocumentKey::ProjectProposal;
        assert!(!tracker.complete(key, Ok(receipt("late.pdf"))));
        assert_eq!(tracker.slot(key).status, SlotStatus::Ready);
    }
}
