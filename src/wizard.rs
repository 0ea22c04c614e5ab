//! Creation Wizard State
//!
//! Linear three-step flow: info entry → background selection → QR placement.

/// Wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Info,
    Background,
    Placement,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Info, WizardStep::Background, WizardStep::Placement];

    pub fn index(self) -> usize {
        match self {
            WizardStep::Info => 0,
            WizardStep::Background => 1,
            WizardStep::Placement => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Info => "정보입력",
            WizardStep::Background => "배경선택",
            WizardStep::Placement => "QR 위치조정",
        }
    }

    pub fn button_text(self) -> &'static str {
        match self {
            WizardStep::Info => "입력완료",
            WizardStep::Background => "선택완료",
            WizardStep::Placement => "4Q 생성",
        }
    }

    /// Header item class for this step while the wizard is on `current`
    pub fn header_class(self, current: WizardStep) -> &'static str {
        if self == current {
            "wizard-step active"
        } else if current.index() > self.index() {
            "wizard-step done"
        } else {
            "wizard-step"
        }
    }
}

/// What the primary button should do on the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    /// Ask the info form to validate and submit; it advances on success
    SubmitInfoForm,
    Advance,
    /// Create the ticket and leave the wizard
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wizard {
    step: WizardStep,
}

impl Wizard {
    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn primary_action(&self) -> WizardAction {
        match self.step {
            WizardStep::Info => WizardAction::SubmitInfoForm,
            WizardStep::Background => WizardAction::Advance,
            WizardStep::Placement => WizardAction::Finish,
        }
    }

    /// Info form reported a successful submit
    pub fn info_submitted(&mut self) {
        if self.step == WizardStep::Info {
            self.step = WizardStep::Background;
        }
    }

    /// Unconditional forward move; only leaves the background step
    pub fn advance(&mut self) {
        if self.step == WizardStep::Background {
            self.step = WizardStep::Placement;
        }
    }

    /// Only the background step can go back
    pub fn prev(&mut self) {
        if self.step == WizardStep::Background {
            self.step = WizardStep::Info;
        }
    }

    /// The shared primary button is shown on the first two steps
    pub fn shows_primary_button(&self) -> bool {
        self.step != WizardStep::Placement
    }

    pub fn shows_prev_button(&self) -> bool {
        self.step == WizardStep::Background
    }
}

/// Why the info form refused to submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoError {
    MissingUrl,
    InvalidUrl,
    MissingTitle,
}

impl InfoError {
    pub fn message(self) -> &'static str {
        match self {
            InfoError::MissingUrl => "URL을 입력해주세요.",
            InfoError::InvalidUrl => "http:// 또는 https:// 로 시작하는 URL을 입력해주세요.",
            InfoError::MissingTitle => "제목을 입력해주세요.",
        }
    }
}

/// Validation performed by the info-entry step before it reports a submit
pub fn validate_info(url: &str, title: &str) -> Result<(), InfoError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(InfoError::MissingUrl);
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(InfoError::InvalidUrl);
    }
    if title.trim().is_empty() {
        return Err(InfoError::MissingTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut wizard = Wizard::default();
        assert_eq!(wizard.primary_action(), WizardAction::SubmitInfoForm);

        // Advancing without a successful submit does nothing
        wizard.advance();
        assert_eq!(wizard.step(), WizardStep::Info);

        wizard.info_submitted();
        assert_eq!(wizard.step(), WizardStep::Background);
        assert_eq!(wizard.primary_action(), WizardAction::Advance);

        wizard.advance();
        assert_eq!(wizard.step(), WizardStep::Placement);
        assert_eq!(wizard.primary_action(), WizardAction::Finish);
    }

    #[test]
    fn test_prev_never_leaves_bounds() {
        let mut wizard = Wizard::default();
        wizard.prev();
        assert_eq!(wizard.step(), WizardStep::Info);

        wizard.info_submitted();
        wizard.prev();
        assert_eq!(wizard.step(), WizardStep::Info);

        wizard.info_submitted();
        wizard.advance();
        wizard.prev();
        assert_eq!(wizard.step(), WizardStep::Placement);
        wizard.advance();
        assert_eq!(wizard.step(), WizardStep::Placement);
    }

    #[test]
    fn test_button_visibility() {
        let mut wizard = Wizard::default();
        assert!(wizard.shows_primary_button());
        assert!(!wizard.shows_prev_button());

        wizard.info_submitted();
        assert!(wizard.shows_prev_button());

        wizard.advance();
        assert!(!wizard.shows_primary_button());
        assert!(!wizard.shows_prev_button());
    }

    #[test]
    fn test_step_labels() {
        let titles: Vec<_> = WizardStep::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["정보입력", "배경선택", "QR 위치조정"]);
        assert_eq!(WizardStep::Placement.button_text(), "4Q 생성");
        assert_eq!(WizardStep::Background.index(), 1);
    }

    #[test]
    fn test_validate_info() {
        assert_eq!(validate_info("", "t"), Err(InfoError::MissingUrl));
        assert_eq!(validate_info("4q.kr", "t"), Err(InfoError::InvalidUrl));
        assert_eq!(validate_info("https://4q.kr", "  "), Err(InfoError::MissingTitle));
        assert_eq!(validate_info(" https://4q.kr ", "Birthday"), Ok(()));
    }

    #[test]
    fn test_header_class() {
        let current = WizardStep::Background;
        assert_eq!(WizardStep::Info.header_class(current), "wizard-step done");
        assert_eq!(WizardStep::Background.header_class(current), "wizard-step active");
        assert_eq!(WizardStep::Placement.header_class(current), "wizard-step");
    }
}
