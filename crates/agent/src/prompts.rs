//! Prompt catalog: one template per conversation phase.
//!
//! The phase prompts are guidance handed to the oracle, not text shown to
//! the candidate. Greeting, system role, closing, and fallback are static;
//! info gathering and tech questions interpolate through tera.

use tera::{Context, Tera};
use thiserror::Error;

const SYSTEM_ROLE: &str = "\
You are Scout, an AI screening assistant for a technology recruitment agency. \
You conduct initial candidate screening: collect essential profile details, then ask \
relevant technical questions based on the candidate's declared tech stack.

Follow these guidelines:
1. Be professional, friendly, and concise.
2. Collect all required information before moving to technical questions.
3. Generate 3-5 technical questions matched to the candidate's tech stack.
4. Maintain the conversation context; never re-ask for details already provided.
5. If the candidate types 'exit', 'quit', or 'bye', end the conversation politely.
6. If the candidate does not answer what was asked, politely ask again.

Required information to collect:
- Full Name
- Email Address
- Phone Number
- Years of Experience
- Desired Position(s)
- Current Location
- Tech Stack (languages, frameworks, databases, tools)";

const GREETING: &str = "\
Greet the candidate professionally and introduce yourself as Scout, the screening \
assistant. Explain that you will collect some basic information and then ask technical \
questions based on their tech stack. Let them know they can type 'exit', 'quit', or \
'bye' at any time to end the conversation.";

const INFO_GATHERING: &str = "\
Based on the conversation so far, the following candidate details are still missing:

{% for field in missing %}- {{ field }}
{% endfor %}
Ask for the next piece of missing information in a conversational way. If several \
pieces are missing, ask for them one at a time, starting with the most basic (name, \
then contact details, and so on). Be polite and professional; do not phrase it as a \
form or a checklist.";

const TECH_QUESTIONS: &str = "\
The candidate has shared their tech stack: {{ tech_stack }}

Generate 3-5 technical questions to assess their proficiency in each technology they \
mentioned. The questions should:
1. Be specific to the technologies mentioned.
2. Range from basic to intermediate difficulty.
3. Let the candidate show both theoretical knowledge and practical experience.
4. Never be yes/no questions; each should require an explanatory answer.

Present the questions conversationally, not as a numbered list.";

const CLOSING: &str = "\
The conversation is ending now. Thank the candidate for their time and information. \
Let them know the team will review their details and get back to them about next \
steps in the hiring process. Wish them good luck and say goodbye professionally.";

const FALLBACK: &str = "\
The candidate's input is unclear or does not answer the question that was asked. \
Respond politely and steer back to the current information-gathering objective. \
Remind them what you are currently asking for, without being pushy.";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt template error: {0}")]
    Template(#[from] tera::Error),
}

pub struct PromptCatalog {
    templates: Tera,
}

impl PromptCatalog {
    pub fn new() -> Result<Self, PromptError> {
        let mut templates = Tera::default();
        templates.add_raw_template("info_gathering", INFO_GATHERING)?;
        templates.add_raw_template("tech_questions", TECH_QUESTIONS)?;
        Ok(Self { templates })
    }

    pub fn system_role(&self) -> &'static str {
        SYSTEM_ROLE
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    pub fn closing(&self) -> &'static str {
        CLOSING
    }

    pub fn fallback(&self) -> &'static str {
        FALLBACK
    }

    /// Prompt asking for the still-missing fields, given their
    /// human-readable names in collection order.
    pub fn info_gathering(&self, missing: &[String]) -> Result<String, PromptError> {
        let mut context = Context::new();
        context.insert("missing", missing);
        Ok(self.templates.render("info_gathering", &context)?)
    }

    /// Prompt instructing the oracle to generate the one-shot technical
    /// question set for the declared stack.
    pub fn tech_questions(&self, tech_stack: &str) -> Result<String, PromptError> {
        let mut context = Context::new();
        context.insert("tech_stack", tech_stack);
        Ok(self.templates.render("tech_questions", &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::PromptCatalog;

    #[test]
    fn info_gathering_lists_missing_fields_in_order() {
        let catalog = PromptCatalog::new().expect("catalog builds");
        let prompt = catalog
            .info_gathering(&["Full Name".to_string(), "Email".to_string()])
            .expect("template renders");

        let name_at = prompt.find("- Full Name").expect("full name listed");
        let email_at = prompt.find("- Email").expect("email listed");
        assert!(name_at < email_at);
        assert!(prompt.contains("one at a time"));
    }

    #[test]
    fn tech_questions_interpolates_the_stack() {
        let catalog = PromptCatalog::new().expect("catalog builds");
        let prompt = catalog.tech_questions("Rust, Tokio, Postgres").expect("template renders");

        assert!(prompt.contains("Rust, Tokio, Postgres"));
        assert!(prompt.contains("3-5"));
        assert!(prompt.contains("Never be yes/no questions"));
    }

    #[test]
    fn static_prompts_cover_exit_keywords_and_goodbye() {
        let catalog = PromptCatalog::new().expect("catalog builds");
        assert!(catalog.greeting().contains("'exit', 'quit', or 'bye'"));
        assert!(catalog.closing().contains("say goodbye"));
        assert!(catalog.system_role().contains("Required information"));
        assert!(catalog.fallback().contains("information-gathering"));
    }
}
