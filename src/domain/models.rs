use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One of the five fixed stages of the application wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    BusinessDetails = 1,
    GrantDiscovery = 2,
    ApplicationGuidance = 3,
    ComplianceCheck = 4,
    SubmitApplication = 5,
}

pub const ALL_WIZARD_STEPS: [WizardStep; 5] = [
    WizardStep::BusinessDetails,
    WizardStep::GrantDiscovery,
    WizardStep::ApplicationGuidance,
    WizardStep::ComplianceCheck,
    WizardStep::SubmitApplication,
];

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::BusinessDetails;
    pub const LAST: WizardStep = WizardStep::SubmitApplication;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        ALL_WIZARD_STEPS.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BusinessDetails => "Business Details",
            WizardStep::GrantDiscovery => "Grant Discovery",
            WizardStep::ApplicationGuidance => "Application Guidance",
            WizardStep::ComplianceCheck => "Compliance Check",
            WizardStep::SubmitApplication => "Submit Application",
        }
    }
}

/// The six step-1 fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    BusinessName,
    BusinessType,
    State,
    FundingAmount,
    GrantType,
    BusinessDescription,
}

pub const ALL_USER_FIELDS: [UserField; 6] = [
    UserField::BusinessName,
    UserField::BusinessType,
    UserField::State,
    UserField::FundingAmount,
    UserField::GrantType,
    UserField::BusinessDescription,
];

impl UserField {
    pub fn label(self) -> &'static str {
        match self {
            UserField::BusinessName => "Business Name",
            UserField::BusinessType => "Business Type",
            UserField::State => "State/Territory",
            UserField::FundingAmount => "Funding Amount Needed",
            UserField::GrantType => "Grant Type",
            UserField::BusinessDescription => "Business Description",
        }
    }

    /// Fixed `(value, label)` options for select-style fields. Free-text
    /// fields return an empty slice.
    pub fn options(self) -> &'static [(&'static str, &'static str)] {
        match self {
            UserField::BusinessName | UserField::BusinessDescription => &[],
            UserField::BusinessType => &[
                ("startup", "Startup"),
                ("sme", "Small/Medium Enterprise"),
                ("nonprofit", "Non-profit"),
                ("individual", "Individual/Sole Trader"),
            ],
            UserField::State => &[
                ("nsw", "New South Wales"),
                ("vic", "Victoria"),
                ("qld", "Queensland"),
                ("wa", "Western Australia"),
                ("sa", "South Australia"),
                ("tas", "Tasmania"),
                ("act", "Australian Capital Territory"),
                ("nt", "Northern Territory"),
            ],
            UserField::FundingAmount => &[
                ("under-25k", "Under $25,000"),
                ("25k-50k", "$25,000 - $50,000"),
                ("50k-100k", "$50,000 - $100,000"),
                ("100k-250k", "$100,000 - $250,000"),
                ("over-250k", "Over $250,000"),
            ],
            UserField::GrantType => &[
                ("innovation", "Innovation & Technology"),
                ("export", "Export & Trade"),
                ("sustainability", "Sustainability & Environment"),
                ("research", "Research & Development"),
                ("infrastructure", "Infrastructure"),
                ("employment", "Employment & Training"),
            ],
        }
    }

    pub fn is_free_text(self) -> bool {
        self.options().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub business_name: String,
    pub business_type: String,
    pub state: String,
    pub funding_amount: String,
    pub grant_type: String,
    pub business_description: String,
}

impl UserInfo {
    pub fn get(&self, field: UserField) -> &str {
        match field {
            UserField::BusinessName => &self.business_name,
            UserField::BusinessType => &self.business_type,
            UserField::State => &self.state,
            UserField::FundingAmount => &self.funding_amount,
            UserField::GrantType => &self.grant_type,
            UserField::BusinessDescription => &self.business_description,
        }
    }

    pub fn get_mut(&mut self, field: UserField) -> &mut String {
        match field {
            UserField::BusinessName => &mut self.business_name,
            UserField::BusinessType => &mut self.business_type,
            UserField::State => &mut self.state,
            UserField::FundingAmount => &mut self.funding_amount,
            UserField::GrantType => &mut self.grant_type,
            UserField::BusinessDescription => &mut self.business_description,
        }
    }

    pub fn set(&mut self, field: UserField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    pub fn is_complete(&self) -> bool {
        ALL_USER_FIELDS.iter().all(|field| !self.get(*field).is_empty())
    }

    /// Moves a select-style field to the next (or previous) option,
    /// wrapping around. An empty field starts at the first option.
    pub fn cycle_option(&mut self, field: UserField, forward: bool) {
        let options = field.options();
        if options.is_empty() {
            return;
        }
        let current = options.iter().position(|(value, _)| *value == self.get(field));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(idx), true) => (idx + 1) % options.len(),
            (Some(idx), false) => (idx + options.len() - 1) % options.len(),
        };
        self.set(field, options[next].0);
    }

    /// Human label for the field's current value.
    pub fn display(&self, field: UserField) -> &str {
        let value = self.get(field);
        field
            .options()
            .iter()
            .find(|(option, _)| *option == value)
            .map(|(_, label)| *label)
            .unwrap_or(value)
    }
}

/// A grant offered during the Grant Discovery step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub id: String,
    pub title: String,
    pub amount: String,
    pub deadline: String,
    pub eligibility: String,
    pub description: String,
}

pub fn candidate_grants() -> Vec<Grant> {
    vec![
        Grant {
            id: "1".to_string(),
            title: "Small Business Innovation Grant".to_string(),
            amount: "Up to $50,000".to_string(),
            deadline: "March 31, 2024".to_string(),
            eligibility: "NSW small businesses with innovative projects".to_string(),
            description: "Supporting innovation and technology development in small businesses"
                .to_string(),
        },
        Grant {
            id: "2".to_string(),
            title: "Export Market Development Grant".to_string(),
            amount: "Up to $150,000".to_string(),
            deadline: "April 15, 2024".to_string(),
            eligibility: "Australian businesses expanding internationally".to_string(),
            description: "Help businesses develop export markets and increase international competitiveness"
                .to_string(),
        },
        Grant {
            id: "3".to_string(),
            title: "Sustainability Transition Grant".to_string(),
            amount: "Up to $100,000".to_string(),
            deadline: "May 20, 2024".to_string(),
            eligibility: "Businesses implementing sustainable practices".to_string(),
            description: "Support businesses transitioning to more sustainable operations"
                .to_string(),
        },
    ]
}

/// The closed set of documents an application asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKey {
    RegistrationCertificate,
    FinancialStatements,
    ProjectProposal,
    BudgetBreakdown,
    TaxIdentifiers,
    InsuranceDocumentation,
    StatutoryDeclaration,
}

pub const ALL_DOCUMENT_KEYS: [DocumentKey; 7] = [
    DocumentKey::RegistrationCertificate,
    DocumentKey::FinancialStatements,
    DocumentKey::ProjectProposal,
    DocumentKey::BudgetBreakdown,
    DocumentKey::TaxIdentifiers,
    DocumentKey::InsuranceDocumentation,
    DocumentKey::StatutoryDeclaration,
];

impl DocumentKey {
    /// Value sent as the `docKey` multipart field.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKey::RegistrationCertificate => "registration_certificate",
            DocumentKey::FinancialStatements => "financial_statements",
            DocumentKey::ProjectProposal => "project_proposal",
            DocumentKey::BudgetBreakdown => "budget_breakdown",
            DocumentKey::TaxIdentifiers => "tax_identifiers",
            DocumentKey::InsuranceDocumentation => "insurance_documentation",
            DocumentKey::StatutoryDeclaration => "statutory_declaration",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKey::RegistrationCertificate => "Business Registration Certificate",
            DocumentKey::FinancialStatements => "Financial Statements (Last 2 years)",
            DocumentKey::ProjectProposal => "Project Proposal",
            DocumentKey::BudgetBreakdown => "Budget Breakdown",
            DocumentKey::TaxIdentifiers => "ABN / TFN Details",
            DocumentKey::InsuranceDocumentation => "Insurance Documentation",
            DocumentKey::StatutoryDeclaration => "Statutory Declaration",
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Ready,
    Uploading,
    Saved,
    Rejected,
}

impl SlotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotStatus::Ready => "ready",
            SlotStatus::Uploading => "uploading",
            SlotStatus::Saved => "saved",
            SlotStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSlot {
    pub key: DocumentKey,
    pub status: SlotStatus,
    pub note: String,
    pub filename: Option<String>,
    pub download_url: Option<String>,
}

impl DocumentSlot {
    pub fn new(key: DocumentKey) -> Self {
        Self {
            key,
            status: SlotStatus::Ready,
            note: "Not uploaded".to_string(),
            filename: None,
            download_url: None,
        }
    }
}

/// A file handed over by the picker. Only the path is known up front; the
/// bytes are read by the upload worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }

    /// Lower-cased text after the last '.', empty when there is none.
    pub fn extension(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => String::new(),
        }
    }
}

/// Remote acknowledgment of a stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub filename: String,
    /// Path relative to the backend base, as returned by the server.
    pub download_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_step_numbers_round_trip_through_bounds() {
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(6), None);
        assert_eq!(WizardStep::FIRST.previous(), None);
        assert_eq!(WizardStep::LAST.next(), None);
        assert_eq!(WizardStep::GrantDiscovery.next(), Some(WizardStep::ApplicationGuidance));
        assert_eq!(WizardStep::ComplianceCheck.number(), 4);
    }

    #[test]
    fn test_user_info_complete_requires_every_field() {
        let mut info = UserInfo::default();
        for field in ALL_USER_FIELDS {
            assert!(!info.is_complete());
            info.set(field, "x");
        }
        assert!(info.is_complete());
    }

    #[test]
    fn test_cycle_option_wraps_and_skips_free_text() {
        let mut info = UserInfo::default();
        info.cycle_option(UserField::BusinessType, true);
        assert_eq!(info.business_type, "startup");
        info.cycle_option(UserField::BusinessType, false);
        assert_eq!(info.business_type, "individual");
        assert_eq!(info.display(UserField::BusinessType), "Individual/Sole Trader");

        info.cycle_option(UserField::BusinessName, true);
        assert!(info.business_name.is_empty());
    }

    #[test]
    fn test_selected_file_extension_is_case_insensitive() {
        assert_eq!(SelectedFile::from_path("/tmp/Report.PDF").extension(), "pdf");
        assert_eq!(SelectedFile::from_path("archive.tar.DOCX").extension(), "docx");
        assert_eq!(SelectedFile::from_path("README").extension(), "");
    }

    #[test]
    fn test_document_keys_serialize_as_wire_names() {
        for key in ALL_DOCUMENT_KEYS {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }
}
