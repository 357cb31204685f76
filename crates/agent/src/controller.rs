//! Conversation controller: one instance per screening session.
//!
//! Owns the stage, the candidate record, and the transcript, and drives
//! the turn-taking protocol. The oracle is a text-completion black box;
//! the controller only decides which guidance prompt to hand it and which
//! stage to move to. A failed conversational call leaves every piece of
//! session state untouched so the candidate can simply retry the turn.

use scout_core::{CandidateField, CandidateRecord, Stage, Transcript, Turn};
use tracing::{debug, warn};

use crate::extract::extract_and_merge;
use crate::oracle::Oracle;
use crate::prompts::PromptCatalog;

/// Typing any of these (case-insensitive, surrounding whitespace ignored)
/// ends the conversation from any stage.
pub const EXIT_KEYWORDS: [&str; 3] = ["exit", "quit", "bye"];

/// Fixed reply when the conversational oracle call fails. The turn is not
/// recorded, so the user can retry by sending another message.
pub const APOLOGY: &str =
    "I'm sorry, I'm having trouble processing your request. Could you please try again?";

pub fn is_exit_command(text: &str) -> bool {
    let trimmed = text.trim();
    EXIT_KEYWORDS.iter().any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
}

pub struct Conversation<O> {
    oracle: O,
    catalog: PromptCatalog,
    stage: Stage,
    record: CandidateRecord,
    transcript: Transcript,
}

impl<O> Conversation<O>
where
    O: Oracle,
{
    pub fn new(oracle: O, catalog: PromptCatalog) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(Turn::system(catalog.system_role()));

        Self {
            oracle,
            catalog,
            stage: Stage::Greeting,
            record: CandidateRecord::new(),
            transcript,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn candidate(&self) -> &CandidateRecord {
        &self.record
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Processes one user turn and returns the assistant's reply.
    ///
    /// Exit keywords take priority over all stage logic, including when
    /// the conversation has already ended. `End` is idempotent: every
    /// later turn re-issues the closing reply.
    pub async fn process_turn(&mut self, user_text: &str) -> String {
        if is_exit_command(user_text) {
            return self.complete_turn(user_text, Stage::End, self.catalog.closing()).await;
        }

        match self.stage {
            Stage::Greeting => {
                // No extraction on the opening turn; nothing has been asked yet.
                self.complete_turn(user_text, Stage::InfoGathering, self.catalog.greeting()).await
            }
            Stage::InfoGathering => self.gather_info(user_text).await,
            Stage::TechQuestions => self.ask_tech_questions(user_text).await,
            Stage::End => self.complete_turn(user_text, Stage::End, self.catalog.closing()).await,
        }
    }

    async fn gather_info(&mut self, user_text: &str) -> String {
        extract_and_merge(&self.oracle, &self.transcript, user_text, &mut self.record).await;

        let missing = self.record.missing_fields();
        if missing.is_empty() {
            // The record became complete on this merge: enter the
            // tech-question phase and handle it on the same turn, with no
            // extra round trip.
            self.stage = Stage::TechQuestions;
            debug!(
                event_name = "conversation.info_complete",
                "all required fields collected; moving to technical questions"
            );
            return self.ask_tech_questions(user_text).await;
        }

        let missing_names: Vec<String> =
            missing.iter().map(CandidateField::display_name).collect();
        debug!(
            event_name = "conversation.fields_missing",
            missing = ?missing_names,
            "requesting next missing field"
        );

        let instruction = match self.catalog.info_gathering(&missing_names) {
            Ok(instruction) => instruction,
            Err(error) => {
                warn!(event_name = "conversation.prompt_render_failed", error = %error, "info-gathering template failed");
                return APOLOGY.to_string();
            }
        };
        self.complete_turn(user_text, Stage::InfoGathering, &instruction).await
    }

    /// One-shot: the question set is produced once, then the conversation
    /// ends. On oracle failure the stage stays `TechQuestions` so the next
    /// turn retries the question generation instead of skipping it.
    async fn ask_tech_questions(&mut self, user_text: &str) -> String {
        let tech_stack =
            self.record.get(CandidateField::TechStack).unwrap_or("(not provided)").to_string();

        let instruction = match self.catalog.tech_questions(&tech_stack) {
            Ok(instruction) => instruction,
            Err(error) => {
                warn!(event_name = "conversation.prompt_render_failed", error = %error, "tech-questions template failed");
                return APOLOGY.to_string();
            }
        };
        self.complete_turn(user_text, Stage::End, &instruction).await
    }

    /// Runs the conversational oracle call and, only on success, commits
    /// the turn: user and assistant turns are appended and the stage
    /// advances to `next`. On failure everything is left as it was and
    /// the fixed apology is returned.
    async fn complete_turn(&mut self, user_text: &str, next: Stage, instruction: &str) -> String {
        let mut context = self.transcript.turns().to_vec();
        context.push(Turn::user(user_text));

        match self.oracle.complete(instruction, &context).await {
            Ok(reply) => {
                self.transcript.push(Turn::user(user_text));
                self.transcript.push(Turn::assistant(reply.clone()));
                if self.stage != next {
                    debug!(
                        event_name = "conversation.stage_transition",
                        from = self.stage.label(),
                        to = next.label(),
                        "stage advanced"
                    );
                }
                self.stage = next;
                reply
            }
            Err(error) => {
                warn!(
                    event_name = "conversation.oracle_failed",
                    stage = self.stage.label(),
                    error = %error,
                    "conversational call failed; state preserved for retry"
                );
                APOLOGY.to_string()
            }
        }
    }
}
