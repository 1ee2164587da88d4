//! The Compliance Check step: a fixed report of checks with verdicts and
//! a short list of improvement suggestions.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceVerdict {
    Passed,
    Complete,
    NeedsReview,
}

impl ComplianceVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceVerdict::Passed => "Passed",
            ComplianceVerdict::Complete => "Complete",
            ComplianceVerdict::NeedsReview => "Needs Review",
        }
    }

    pub fn needs_attention(self) -> bool {
        self == ComplianceVerdict::NeedsReview
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceItem {
    pub check: &'static str,
    pub verdict: ComplianceVerdict,
}

pub const IMPROVEMENT_SUGGESTIONS: [&str; 3] = [
    "Add more detail to the budget breakdown for equipment costs",
    "Include letters of support from key stakeholders",
    "Clarify the project timeline in the implementation section",
];

pub fn compliance_report() -> Vec<ComplianceItem> {
    vec![
        ComplianceItem {
            check: "Eligibility Requirements",
            verdict: ComplianceVerdict::Passed,
        },
        ComplianceItem {
            check: "Document Requirements",
            verdict: ComplianceVerdict::Complete,
        },
        ComplianceItem {
            check: "Budget Justification",
            verdict: ComplianceVerdict::NeedsReview,
        },
    ]
}

/// Number of checks still flagged for review.
pub fn outstanding_checks(report: &[ComplianceItem]) -> usize {
    report
        .iter()
        .filter(|item| item.verdict.needs_attention())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_has_three_checks_one_needing_review() {
        let report = compliance_report();
        let verdicts: Vec<&str> = report.iter().map(|item| item.verdict.as_str()).collect();
        assert_eq!(verdicts, vec!["Passed", "Complete", "Needs Review"]);
        assert_eq!(outstanding_checks(&report), 1);
        assert_eq!(report[2].check, "Budget Justification");
    }
}
