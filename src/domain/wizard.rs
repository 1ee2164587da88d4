//! Step controller for the grant-application wizard.
//!
//! The wizard walks through five fixed steps. Moving forward is gated on the
//! current step's completeness predicate; moving back is always allowed
//! above the first step. Neither transition can fail: a blocked move is a
//! no-op, matching a disabled button.

use super::models::{candidate_grants, Grant, UserInfo, WizardStep};

#[derive(Debug, Clone)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub user_info: UserInfo,
    pub selected_grant: Option<Grant>,
    candidates: Vec<Grant>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::with_candidates(candidate_grants())
    }
}

impl WizardState {
    pub fn with_candidates(candidates: Vec<Grant>) -> Self {
        Self {
            current_step: WizardStep::FIRST,
            user_info: UserInfo::default(),
            selected_grant: None,
            candidates,
        }
    }

    pub fn candidates(&self) -> &[Grant] {
        &self.candidates
    }

    /// Whether the current step allows moving forward.
    ///
    /// Step 1 needs all six business fields, step 2 needs a selected grant,
    /// later steps are never gated.
    pub fn can_advance(&self) -> bool {
        match self.current_step {
            WizardStep::BusinessDetails => self.user_info.is_complete(),
            WizardStep::GrantDiscovery => self.selected_grant.is_some(),
            _ => true,
        }
    }

    /// Moves one step forward. Returns `false` when gated or already on the
    /// last step.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        match self.current_step.next() {
            Some(next) => {
                self.current_step = next;
                true
            }
            None => false,
        }
    }

    /// Moves one step back. Returns `false` on the first step.
    pub fn retreat(&mut self) -> bool {
        match self.current_step.previous() {
            Some(previous) => {
                self.current_step = previous;
                true
            }
            None => false,
        }
    }

    /// Selects a candidate grant by id. Only honoured on the Grant Discovery
    /// step; unknown ids leave the selection untouched.
    pub fn select_grant(&mut self, grant_id: &str) -> bool {
        if self.current_step != WizardStep::GrantDiscovery {
            return false;
        }
        match self.candidates.iter().find(|grant| grant.id == grant_id) {
            Some(grant) => {
                self.selected_grant = Some(grant.clone());
                true
            }
            None => false,
        }
    }

    pub fn is_selected(&self, grant_id: &str) -> bool {
        self.selected_grant
            .as_ref()
            .is_some_and(|grant| grant.id == grant_id)
    }

    pub fn progress_percent(&self) -> u16 {
        u16::from(self.current_step.number()) * 100 / u16::from(WizardStep::LAST.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ALL_USER_FIELDS, UserField};

    fn filled_user_info() -> UserInfo {
        UserInfo {
            business_name: "Acme Pty Ltd".to_string(),
            business_type: "sme".to_string(),
            state: "nsw".to_string(),
            funding_amount: "25k-50k".to_string(),
            grant_type: "innovation".to_string(),
            business_description: "Widgets".to_string(),
        }
    }

    fn wizard_at(step: WizardStep) -> WizardState {
        let mut wizard = WizardState::default();
        wizard.user_info = filled_user_info();
        while wizard.current_step < step {
            if wizard.current_step == WizardStep::GrantDiscovery {
                wizard.select_grant("1");
            }
            assert!(wizard.advance());
        }
        wizard
    }

    #[test]
    fn test_initial_state() {
        let wizard = WizardState::default();
        assert_eq!(wizard.current_step, WizardStep::BusinessDetails);
        assert!(wizard.selected_grant.is_none());
        assert_eq!(wizard.candidates().len(), 3);
        assert_eq!(wizard.progress_percent(), 20);
    }

    #[test]
    fn test_step_one_requires_every_field() {
        for missing in ALL_USER_FIELDS {
            let mut wizard = WizardState::default();
            wizard.user_info = filled_user_info();
            wizard.user_info.set(missing, "");
            assert!(!wizard.can_advance(), "{missing:?} empty should block");
            assert!(!wizard.advance());
            assert_eq!(wizard.current_step, WizardStep::BusinessDetails);
        }

        let mut wizard = WizardState::default();
        wizard.user_info = filled_user_info();
        assert!(wizard.can_advance());
        assert!(wizard.advance());
        assert_eq!(wizard.current_step, WizardStep::GrantDiscovery);
    }

    #[test]
    fn test_description_is_required() {
        let mut wizard = WizardState::default();
        wizard.user_info = filled_user_info();
        wizard.user_info.set(UserField::BusinessDescription, "");
        assert!(!wizard.can_advance());
    }

    #[test]
    fn test_step_two_requires_selected_grant() {
        let mut wizard = wizard_at(WizardStep::GrantDiscovery);
        assert!(!wizard.can_advance());
        assert!(!wizard.advance());

        assert!(!wizard.select_grant("does-not-exist"));
        assert!(!wizard.can_advance());

        assert!(wizard.select_grant("2"));
        assert!(wizard.is_selected("2"));
        assert!(wizard.can_advance());
        assert!(wizard.advance());
        assert_eq!(wizard.current_step, WizardStep::ApplicationGuidance);
    }

    #[test]
    fn test_later_steps_are_not_gated() {
        for step in [
            WizardStep::ApplicationGuidance,
            WizardStep::ComplianceCheck,
            WizardStep::SubmitApplication,
        ] {
            assert!(wizard_at(step).can_advance());
        }
    }

    #[test]
    fn test_retreat_is_noop_on_first_step() {
        let mut wizard = WizardState::default();
        assert!(!wizard.retreat());
        assert_eq!(wizard.current_step, WizardStep::BusinessDetails);
    }

    #[test]
    fn test_advance_is_noop_on_last_step() {
        let mut wizard = wizard_at(WizardStep::SubmitApplication);
        assert!(!wizard.advance());
        assert_eq!(wizard.current_step, WizardStep::SubmitApplication);
        assert_eq!(wizard.progress_percent(), 100);
    }

    #[test]
    fn test_navigation_moves_one_step_and_keeps_state() {
        let mut wizard = wizard_at(WizardStep::ComplianceCheck);
        assert!(wizard.retreat());
        assert_eq!(wizard.current_step, WizardStep::ApplicationGuidance);
        assert!(wizard.retreat());
        assert!(wizard.retreat());
        assert_eq!(wizard.current_step, WizardStep::BusinessDetails);
        assert_eq!(wizard.user_info, filled_user_info());
        assert!(wizard.is_selected("1"));
    }

    #[test]
    fn test_select_grant_only_on_discovery_step() {
        let mut wizard = WizardState::default();
        assert!(!wizard.select_grant("1"));
        assert!(wizard.selected_grant.is_none());

        let mut wizard = wizard_at(WizardStep::ComplianceCheck);
        assert!(!wizard.select_grant("3"));
        assert!(wizard.is_selected("1"));
    }
}
