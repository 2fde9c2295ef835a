/// Top-level screens. Only the certificate carries data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AppView {
    #[default]
    Home,
    ImageEditor,
    Quiz,
    Certificate { score: usize, participant_name: String },
}

impl AppView {
    pub fn name(&self) -> &'static str {
        match self {
            AppView::Home => "home",
            AppView::ImageEditor => "image-editor",
            AppView::Quiz => "quiz",
            AppView::Certificate { .. } => "certificate",
        }
    }
}

/// Owns the current view of one chat. Transitions only; nothing is rendered here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCoordinator {
    current: AppView,
}

impl ViewCoordinator {
    pub fn current(&self) -> &AppView {
        &self.current
    }

    /// Any view may be entered from any other.
    pub fn navigate(&mut self, target: AppView) {
        log::debug!("Navigating {} -> {}", self.current.name(), target.name());
        self.current = target;
    }

    pub fn complete_quiz(&mut self, score: usize, participant_name: String) {
        self.navigate(AppView::Certificate {
            score,
            participant_name,
        });
    }

    /// Drops the carried quiz result and goes back to the quiz.
    pub fn restart(&mut self) {
        self.navigate(AppView::Quiz);
    }

    pub fn quiz_result(&self) -> Option<(usize, &str)> {
        match &self.current {
            AppView::Certificate {
                score,
                participant_name,
            } => Some((*score, participant_name.as_str())),
            _ => None,
        }
    }
}
