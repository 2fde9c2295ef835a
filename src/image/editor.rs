use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{GatewayError, ValidationError};

use super::gateway::{EditRequest, EditResult};

pub const EDIT_FAILED_MESSAGE: &str = "Failed to edit image. Please try again.";
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Image editing is not available right now: the service is not configured.";

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// An edit that has been handed to the gateway and not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub ticket: u64,
    pub request: EditRequest,
}

/// Per-chat editor state. `pending` doubles as the loading flag.
#[derive(Debug, Default)]
pub struct ImageEditor {
    original: Option<SourceImage>,
    edited: Option<EditResult>,
    instruction: String,
    pending: Option<u64>,
    error: Option<String>,
}

impl ImageEditor {
    pub fn original(&self) -> Option<&SourceImage> {
        self.original.as_ref()
    }

    pub fn edited(&self) -> Option<&EditResult> {
        self.edited.as_ref()
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the source image. Ignored while an edit is in flight.
    pub fn load_image(&mut self, bytes: Vec<u8>, mime_type: impl Into<String>) -> bool {
        if self.is_loading() {
            return false;
        }
        self.original = Some(SourceImage {
            bytes,
            mime_type: mime_type.into(),
        });
        self.edited = None;
        self.error = None;
        true
    }

    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        if !self.is_loading() {
            self.instruction = instruction.into();
        }
    }

    /// Validates the form and marks the editor as loading.
    pub fn begin_edit(&mut self) -> Result<PendingEdit, ValidationError> {
        if self.is_loading() {
            return Err(ValidationError::EditInProgress);
        }
        let original = match &self.original {
            Some(original) if !original.bytes.is_empty() => original,
            _ => return Err(ValidationError::MissingImage),
        };
        if self.instruction.trim().is_empty() {
            return Err(ValidationError::EmptyInstruction);
        }

        let ticket = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        let request = EditRequest {
            image: original.bytes.clone(),
            mime_type: original.mime_type.clone(),
            instruction: self.instruction.clone(),
        };

        self.pending = Some(ticket);
        self.error = None;
        self.edited = None;
        Ok(PendingEdit { ticket, request })
    }

    /// Applies a gateway result. Returns `false` and changes nothing when the
    /// ticket is not the one currently pending.
    pub fn finish_edit(&mut self, ticket: u64, result: Result<EditResult, GatewayError>) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;

        match result {
            Ok(edited) => {
                self.edited = Some(edited);
                self.error = None;
            }
            Err(err) => {
                log::warn!("Image edit failed: {}", err);
                let message = if err.is_configuration() {
                    NOT_CONFIGURED_MESSAGE
                } else {
                    EDIT_FAILED_MESSAGE
                };
                self.error = Some(message.to_string());
            }
        }
        true
    }
}
