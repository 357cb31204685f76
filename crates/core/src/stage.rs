use serde::{Deserialize, Serialize};

/// The conversation's current phase.
///
/// Progression is one-directional (greeting -> info gathering -> tech
/// questions -> end), except that `End` is reachable from every stage via
/// an exit command. `End` is terminal and idempotent. The transition rules
/// themselves live in the conversation controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    InfoGathering,
    TechQuestions,
    End,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::InfoGathering => "info_gathering",
            Self::TechQuestions => "tech_questions",
            Self::End => "end",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End)
    }
}

#[cfg(test)]
mod tests {
    use super::Stage;

    #[test]
    fn only_end_is_terminal() {
        assert!(Stage::End.is_terminal());
        assert!(!Stage::Greeting.is_terminal());
        assert!(!Stage::InfoGathering.is_terminal());
        assert!(!Stage::TechQuestions.is_terminal());
    }

    #[test]
    fn labels_match_wire_names() {
        assert_eq!(Stage::InfoGathering.label(), "info_gathering");
        assert_eq!(
            serde_json::to_string(&Stage::TechQuestions).unwrap(),
            "\"tech_questions\""
        );
    }
}
