use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn system(text: impl Into<String>) -> Self {
        Self { role: Role::System, text: text.into() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, text: text.into() }
    }
}

/// Append-only record of the conversation so far.
///
/// The controller owns the single mutable handle; everything else sees a
/// read-only view. Making the history an explicit value (instead of state
/// hidden inside a chat-session client) keeps turn replay deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Role-labeled plain-text rendering, one `Role: text` line per turn.
    /// Used as standalone context for extraction requests.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, Transcript, Turn};

    #[test]
    fn turns_are_appended_in_order() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::system("be helpful"));
        transcript.push(Turn::user("hi"));
        transcript.push(Turn::assistant("hello"));

        let roles: Vec<Role> = transcript.turns().iter().map(|turn| turn.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn render_labels_each_role() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::user("my name is Ana"));
        transcript.push(Turn::assistant("thanks Ana"));

        assert_eq!(transcript.render(), "User: my name is Ana\nAssistant: thanks Ana");
    }

    #[test]
    fn empty_transcript_renders_to_nothing() {
        assert_eq!(Transcript::new().render(), "");
        assert!(Transcript::new().is_empty());
    }
}
