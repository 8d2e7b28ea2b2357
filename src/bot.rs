use crate::{
    cards::FormDescription,
    commands::{CommandKind, CommandRegistry},
    errors::WorkflowError,
    workflow::{InteractionContext, Submission, Validation, Workflow},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing;

pub const CALLBACK_KEYWORD_FIELD: &str = "callback_keyword";
pub const COMMAND_KEYWORD_FIELD: &str = "command_keyword";

/// One inbound event from the chat transport: a typed message or a card
/// submission with its flat `field id -> value` inputs.
#[derive(Deserialize, Debug, Clone)]
pub struct Activity {
    pub room_id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inputs: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger<'a> {
    Text(&'a str),
    Callback(&'a str),
    Command(&'a str),
}

impl Activity {
    /// Card inputs win over text; `None` when the activity carries neither.
    pub fn trigger(&self) -> Option<Trigger<'_>> {
        if let Some(inputs) = &self.inputs {
            if let Some(keyword) = inputs.get(CALLBACK_KEYWORD_FIELD) {
                return Some(Trigger::Callback(keyword));
            }
            if let Some(keyword) = inputs.get(COMMAND_KEYWORD_FIELD) {
                return Some(Trigger::Command(keyword));
            }
        }
        self.text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(Trigger::Text)
    }
}

/// What the transport should deliver to the room.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotResponse {
    Message {
        room_id: String,
        text: String,
    },
    Card {
        room_id: String,
        form: FormDescription,
    },
    Files {
        room_id: String,
        parent_id: String,
        files: Vec<String>,
        /// MIME type of the rendered files, for transports that upload them.
        content_type: String,
    },
}

impl BotResponse {
    fn message(room_id: &str, text: impl Into<String>) -> Self {
        BotResponse::Message {
            room_id: room_id.to_string(),
            text: text.into(),
        }
    }
}

/// Routes activities to commands and runs each one in a fresh interaction context.
#[derive(Debug, Clone)]
pub struct Bot {
    registry: CommandRegistry,
    workflow: Workflow,
}

impl Bot {
    pub fn new(registry: CommandRegistry, workflow: Workflow) -> Self {
        Self { registry, workflow }
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Entry point for one activity.
    pub fn dispatch(&self, activity: &Activity, trigger: Trigger<'_>) -> Result<Vec<BotResponse>, WorkflowError> {
        let room_id = activity.room_id.as_str();
        let command = match trigger {
            Trigger::Text(text) => self.registry.match_text(text),
            Trigger::Callback(keyword) => self.registry.by_callback(keyword),
            Trigger::Command(keyword) => self.registry.by_keyword(keyword),
        };
        let Some(command) = command else {
            tracing::debug!(%room_id, ?trigger, "No command matched, replying with help");
            return Ok(vec![self.help(room_id)]);
        };
        tracing::debug!(%room_id, command = ?command.kind, "Dispatching command");

        match command.kind {
            CommandKind::MakeMeme => {
                let mut ctx = InteractionContext::new(room_id);
                let form = self.workflow.present_form(&mut ctx)?;
                Ok(vec![BotResponse::Card {
                    room_id: ctx.room_id().to_string(),
                    form,
                }])
            }
            CommandKind::MakeMemeCallback => {
                let empty = HashMap::new();
                let inputs = activity.inputs.as_ref().unwrap_or(&empty);
                self.handle_submission(room_id, inputs)
            }
            CommandKind::Exit => {
                let mut ctx = InteractionContext::awaiting_submission(room_id);
                self.workflow.cancel(&mut ctx)?;
                Ok(Vec::new())
            }
            CommandKind::Help => Ok(vec![self.help(room_id)]),
        }
    }

    /// Second stage: validates the submitted form and produces the meme.
    pub fn handle_submission(
        &self,
        room_id: &str,
        inputs: &HashMap<String, String>,
    ) -> Result<Vec<BotResponse>, WorkflowError> {
        let mut ctx = InteractionContext::awaiting_submission(room_id);
        tracing::debug!(interaction_id = %ctx.id(), %room_id, "Form submitted");

        match self.workflow.submit(&mut ctx, Submission::from_inputs(inputs))? {
            Validation::Rejected(reason) => Ok(vec![BotResponse::message(room_id, reason.message())]),
            Validation::Accepted { acknowledgement } => {
                let artifact = self.workflow.complete(&mut ctx)?;
                Ok(vec![
                    BotResponse::message(room_id, acknowledgement),
                    BotResponse::Files {
                        room_id: room_id.to_string(),
                        parent_id: String::new(),
                        files: vec![artifact.url],
                        content_type: artifact.content_type,
                    },
                ])
            }
        }
    }

    fn help(&self, room_id: &str) -> BotResponse {
        let mut text = String::from("Hello! I understand the following commands:");
        for line in self.registry.help_lines() {
            text.push('\n');
            text.push_str(&line);
        }
        BotResponse::message(room_id, text)
    }
}
