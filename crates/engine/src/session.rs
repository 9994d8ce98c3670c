use intake_core::{FieldError, FieldName, FieldValue, IntakeForm};
use tracing::debug;

use crate::messages::Conversation;
use crate::prompts::{self, explanation};
use crate::turns::{classify, TurnAction};

/// One user's intake session: the record under construction, the chat
/// transcript, and the dialogue cursor. Both input surfaces go through this
/// object — the form surface via [`IntakeSession::update_field`], the chat
/// surface via [`IntakeSession::process_utterance`].
#[derive(Clone, Debug)]
pub struct IntakeSession {
    form: IntakeForm,
    conversation: Conversation,
    cursor: Option<FieldName>,
}

impl IntakeSession {
    pub fn new() -> Self {
        let mut conversation = Conversation::default();
        conversation.push_bot(prompts::GREETING);
        Self { form: IntakeForm::new(), conversation, cursor: None }
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn cursor(&self) -> Option<FieldName> {
        self.cursor
    }

    /// Most recent bot reply, for rendering after a turn.
    pub fn last_reply(&self) -> Option<&str> {
        self.conversation.last_bot().map(|message| message.content.as_str())
    }

    /// Direct form edit. Bypasses the dialogue engine entirely but shares
    /// the record store's single update path.
    pub fn update_field(&mut self, field: FieldName, value: FieldValue) {
        self.form.update(field, value);
    }

    /// Full-record submission check over all active fields.
    pub fn validate_all(&mut self) -> Vec<FieldError> {
        self.form.validate_all()
    }

    /// One chat turn: append the utterance, classify it against the current
    /// cursor, apply the resulting action, and append the bot reply.
    pub fn process_utterance(&mut self, text: &str) {
        self.conversation.push_user(text);

        match classify(self.cursor, text) {
            TurnAction::Explain { field } => {
                debug!(
                    event_name = "dialogue.field_explained",
                    field = field.as_str(),
                    "explanation intercept re-aimed the cursor"
                );
                if let Some(canned) = explanation(field) {
                    self.conversation.push_bot(canned);
                }
                self.cursor = Some(field);
            }
            TurnAction::Greet => {
                self.conversation.push_bot(prompts::greeting_reply());
            }
            TurnAction::Fill { field, value, reply, next } => {
                debug!(
                    event_name = "dialogue.field_filled",
                    field = field.as_str(),
                    next = next.map(|f| f.as_str()).unwrap_or("none"),
                    "accepted a value from the chat surface"
                );
                self.form.update(field, value);
                self.conversation.push_bot(reply);
                self.cursor = next;
            }
            TurnAction::Reject { reply } => {
                debug!(
                    event_name = "dialogue.value_rejected",
                    field = self.cursor.map(|f| f.as_str()).unwrap_or("none"),
                    "recognized value failed range or format checks"
                );
                self.conversation.push_bot(reply);
            }
            TurnAction::Help => {
                self.conversation.push_bot(prompts::help_reply());
            }
            TurnAction::Fallback => {
                self.conversation.push_bot(prompts::fallback_reply());
            }
        }
    }
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::new()
    }
}
