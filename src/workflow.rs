//! The two-stage meme interaction.
//!
//! ```text
//! Idle --present_form--> FormPresented --submit--> Validating --complete--> Completed
//!                              |                      |
//!                            cancel                 (invalid)
//!                              v                      v
//!                          Cancelled               Rejected
//! ```
//!
//! `Workflow` holds what every interaction shares (the catalog snapshot and
//! the URL builder) and is never mutated. Each interaction gets its own
//! `InteractionContext`, passed explicitly through the transitions.

use crate::{
    cards::{self, FIELD_MEME_TYPE, FIELD_TEXT_BOTTOM, FIELD_TEXT_TOP, FormDescription, TEXT_MAX_LENGTH},
    catalog::TemplateCatalog,
    errors::WorkflowError,
    models::{ArtifactReference, FileExtension, MemeRequest},
    url_builder::ArtifactUrlBuilder,
};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing;
use uuid::Uuid;

pub const ACK_DEFAULT: &str = "Generating your meme...";
pub const ACK_GIF: &str = "Generating your meme. GIF-based memes take a little longer. Please wait...";

/// Why a submission was turned down. Shown to the user, never raised as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    MissingRequiredText,
    MissingTemplate,
    TextTooLong,
}

impl RejectionReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::MissingRequiredText => "Please provide at least one positional text argument.",
            RejectionReason::MissingTemplate => "Please choose a meme template.",
            RejectionReason::TextTooLong => "Please keep each line of text to 100 characters or fewer.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    FormPresented,
    Validating(MemeRequest),
    Completed(ArtifactReference),
    Cancelled,
    Rejected(RejectionReason),
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::FormPresented => "awaiting a form submission",
            InteractionState::Validating(_) => "validating",
            InteractionState::Completed(_) => "completed",
            InteractionState::Cancelled => "cancelled",
            InteractionState::Rejected(_) => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InteractionState::Completed(_) | InteractionState::Cancelled | InteractionState::Rejected(_)
        )
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The filled-in form as the transport posts it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub meme_type: Option<String>,
    pub text_top: Option<String>,
    pub text_bottom: Option<String>,
}

impl Submission {
    pub fn from_inputs(inputs: &HashMap<String, String>) -> Self {
        Self {
            meme_type: inputs.get(FIELD_MEME_TYPE).cloned(),
            text_top: inputs.get(FIELD_TEXT_TOP).cloned(),
            text_bottom: inputs.get(FIELD_TEXT_BOTTOM).cloned(),
        }
    }
}

/// Outcome of `Workflow::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted { acknowledgement: &'static str },
    Rejected(RejectionReason),
}

/// Per-interaction state. Never shared between interactions.
#[derive(Debug)]
pub struct InteractionContext {
    id: Uuid,
    room_id: String,
    state: InteractionState,
}

impl InteractionContext {
    /// A new interaction, before the form is shown.
    pub fn new(room_id: impl Into<String>) -> Self {
        Self::with_state(room_id.into(), InteractionState::Idle)
    }

    /// An interaction whose form is already on the user's screen. The
    /// presented card lives with the transport, so its submission or
    /// cancellation resumes here.
    pub fn awaiting_submission(room_id: impl Into<String>) -> Self {
        Self::with_state(room_id.into(), InteractionState::FormPresented)
    }

    fn with_state(room_id: String, state: InteractionState) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id,
            state,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    fn invalid(&self, action: &'static str) -> WorkflowError {
        tracing::warn!(interaction_id = %self.id, state = %self.state, action, "Rejected invalid transition");
        WorkflowError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }
}

/// Shared, read-only workflow environment.
#[derive(Debug, Clone)]
pub struct Workflow {
    catalog: Arc<TemplateCatalog>,
    url_builder: ArtifactUrlBuilder,
    callback_keyword: String,
    cancel_keyword: String,
    templates_page_url: String,
}

impl Workflow {
    pub fn new(
        catalog: Arc<TemplateCatalog>,
        url_builder: ArtifactUrlBuilder,
        callback_keyword: &str,
        cancel_keyword: &str,
        templates_page_url: &str,
    ) -> Self {
        Self {
            catalog,
            url_builder,
            callback_keyword: callback_keyword.to_string(),
            cancel_keyword: cancel_keyword.to_string(),
            templates_page_url: templates_page_url.to_string(),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Idle -> FormPresented.
    pub fn present_form(&self, ctx: &mut InteractionContext) -> Result<FormDescription, WorkflowError> {
        if ctx.state != InteractionState::Idle {
            return Err(ctx.invalid("present the form"));
        }
        let form = cards::meme_form(
            &self.catalog,
            &self.callback_keyword,
            &self.cancel_keyword,
            &self.templates_page_url,
        );
        ctx.state = InteractionState::FormPresented;
        tracing::debug!(interaction_id = %ctx.id, choices = form.choice_set.choices.len(), "Form presented");
        Ok(form)
    }

    /// FormPresented -> Cancelled.
    pub fn cancel(&self, ctx: &mut InteractionContext) -> Result<(), WorkflowError> {
        if ctx.state != InteractionState::FormPresented {
            return Err(ctx.invalid("cancel"));
        }
        ctx.state = InteractionState::Cancelled;
        tracing::debug!(interaction_id = %ctx.id, "Interaction cancelled");
        Ok(())
    }

    /// FormPresented -> Validating, or Rejected when the submission cannot
    /// produce a meme. Only a truly empty text counts as missing; a lone
    /// space is a deliberate blank line.
    pub fn submit(&self, ctx: &mut InteractionContext, submission: Submission) -> Result<Validation, WorkflowError> {
        if ctx.state != InteractionState::FormPresented {
            return Err(ctx.invalid("submit the form"));
        }

        let top_text = submission.text_top.unwrap_or_default();
        let bottom_text = submission.text_bottom.unwrap_or_default();
        let selected_template = submission.meme_type.unwrap_or_default();

        let rejection = if top_text.is_empty() && bottom_text.is_empty() {
            Some(RejectionReason::MissingRequiredText)
        } else if [&top_text, &bottom_text].iter().any(|t| t.chars().count() > TEXT_MAX_LENGTH) {
            Some(RejectionReason::TextTooLong)
        } else if selected_template.is_empty() {
            Some(RejectionReason::MissingTemplate)
        } else {
            None
        };
        if let Some(reason) = rejection {
            tracing::info!(interaction_id = %ctx.id, ?reason, "Submission rejected");
            ctx.state = InteractionState::Rejected(reason);
            return Ok(Validation::Rejected(reason));
        }

        if self.catalog.find(&selected_template).is_none() {
            tracing::warn!(interaction_id = %ctx.id, selector = %selected_template, "Selector not in the template catalog");
        }

        let acknowledgement = if selected_template.ends_with(&format!(".{}", FileExtension::Gif)) {
            ACK_GIF
        } else {
            ACK_DEFAULT
        };
        tracing::debug!(interaction_id = %ctx.id, selector = %selected_template, "Submission accepted");
        ctx.state = InteractionState::Validating(MemeRequest {
            selected_template,
            top_text,
            bottom_text,
        });
        Ok(Validation::Accepted { acknowledgement })
    }

    /// Validating -> Completed. A malformed selector is a contract failure
    /// and leaves the context in Validating.
    pub fn complete(&self, ctx: &mut InteractionContext) -> Result<ArtifactReference, WorkflowError> {
        let InteractionState::Validating(request) = &ctx.state else {
            return Err(ctx.invalid("generate the meme"));
        };
        let artifact = self
            .url_builder
            .build_artifact_url(&request.selected_template, &request.top_text, &request.bottom_text)
            .inspect_err(|e| tracing::error!(interaction_id = %ctx.id, error = %e, "Failed to build meme URL"))?;
        tracing::info!(interaction_id = %ctx.id, url = %artifact.url, "Meme generated");
        ctx.state = InteractionState::Completed(artifact.clone());
        Ok(artifact)
    }
}
