//! Application summary export.
//!
//! Writes the step-5 summary (grant, amount, business, deadline) followed by
//! one row per document slot as CSV, so an applicant can keep an offline
//! copy of what was prepared.

use super::errors::ExportError;
use super::upload::UploadTracker;
use super::wizard::WizardState;
use std::io::Write;
use std::path::Path;

pub struct SummaryExporter;

impl SummaryExporter {
    pub fn write_summary<W: Write>(
        wizard: &WizardState,
        uploads: &UploadTracker,
        writer: W,
    ) -> Result<(), csv::Error> {
        let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        let grant = wizard.selected_grant.as_ref();
        let field = |value: Option<&String>| value.cloned().unwrap_or_default();

        csv.write_record(["Grant", "Amount", "Business", "Deadline"])?;
        csv.write_record([
            field(grant.map(|g| &g.title)),
            field(grant.map(|g| &g.amount)),
            wizard.user_info.business_name.clone(),
            field(grant.map(|g| &g.deadline)),
        ])?;

        csv.write_record(["Document", "Status", "Filename", "Download URL"])?;
        for slot in uploads.slots() {
            csv.write_record([
                slot.key.label(),
                slot.status.as_str(),
                slot.filename.as_deref().unwrap_or(""),
                slot.download_url.as_deref().unwrap_or(""),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Exports to `filename`. A summary without a selected grant is refused.
    pub fn export_to_csv(
        wizard: &WizardState,
        uploads: &UploadTracker,
        filename: &str,
    ) -> Result<String, ExportError> {
        if wizard.selected_grant.is_none() {
            return Err(ExportError::NoGrantSelected);
        }
        let file = std::fs::File::create(Path::new(filename)).map_err(|source| ExportError::Io {
            path: filename.to_string(),
            source,
        })?;
        Self::write_summary(wizard, uploads, file).map_err(|source| ExportError::Csv {
            path: filename.to_string(),
            source,
        })?;
        tracing::info!(path = filename, "application summary exported");
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DocumentKey, SelectedFile, UploadReceipt, WizardStep};

    fn wizard_with_grant() -> WizardState {
        let mut wizard = WizardState::default();
        wizard.user_info.business_name = "Acme Pty Ltd".to_string();
        wizard.current_step = WizardStep::GrantDiscovery;
        wizard.select_grant("3");
        wizard
    }

    #[test]
    fn test_summary_has_header_and_one_row_per_slot() {
        let wizard = wizard_with_grant();
        let mut uploads = UploadTracker::new("http://localhost:5000");
        uploads.choose(DocumentKey::ProjectProposal);
        uploads.on_file_selected(SelectedFile::from_path("plan.pdf"));
        uploads.complete(
            DocumentKey::ProjectProposal,
            Ok(UploadReceipt {
                filename: "plan.txt".to_string(),
                download_path: "/api/files/plan.txt".to_string(),
            }),
        );

        let mut out = Vec::new();
        SummaryExporter::write_summary(&wizard, &uploads, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Grant,Amount,Business,Deadline");
        assert_eq!(
            lines[1],
            r#"Sustainability Transition Grant,"Up to $100,000",Acme Pty Ltd,"May 20, 2024""#
        );
        assert_eq!(lines[2], "Document,Status,Filename,Download URL");
        assert_eq!(lines.len(), 3 + 7);
        assert!(lines.contains(
            &"Project Proposal,saved,plan.txt,http://localhost:5000/api/files/plan.txt"
        ));
    }

    #[test]
    fn test_export_requires_selected_grant() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let result = SummaryExporter::export_to_csv(
            &WizardState::default(),
            &UploadTracker::new("http://localhost:5000"),
            path.to_str().unwrap(),
        );
        assert!(matches!(result, Err(ExportError::NoGrantSelected)));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let filename = path.to_str().unwrap();
        let written = SummaryExporter::export_to_csv(
            &wizard_with_grant(),
            &UploadTracker::new("http://localhost:5000"),
            filename,
        )
        .unwrap();
        assert_eq!(written, filename);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Grant,Amount,Business,Deadline"));
    }
}
