//! # Two-step Field Edits
//!
//! Editing a free-text field is split in two so input collection never
//! touches the store:
//!
//! 1. `Store::request_edit(id, field)` returns an [`EditRequest`] with the
//!    prompt and the current value.
//! 2. The caller collects a value however it likes (stdin, a form, a test).
//! 3. `Store::apply_edit(id, field, value)` turns it into a [`LeadPatch`].
//!
//! A cancelled prompt simply never reaches step 3.

use crate::storage::SlotStorage;
use crate::store::Store;
use crate::{Lead, LeadError, LeadId, LeadPatch};
use std::fmt;
use std::str::FromStr;

/// Free-text fields editable through a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Notes,
    Promoter,
    Name,
    Phone,
    Email,
    Source,
}

impl EditField {
    /// Prompt shown when asking for a new value.
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        match self {
            EditField::Notes => "Nota / comentario (opcional):",
            EditField::Promoter => "Cambiar promotor:",
            EditField::Name => "Nombre:",
            EditField::Phone => "Teléfono:",
            EditField::Email => "Correo:",
            EditField::Source => "Origen:",
        }
    }

    /// Name and phone can never be blank.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self, EditField::Name | EditField::Phone)
    }

    /// Current value of this field on `lead`.
    #[must_use]
    pub fn current<'a>(&self, lead: &'a Lead) -> &'a str {
        match self {
            EditField::Notes => &lead.notes,
            EditField::Promoter => &lead.promoter,
            EditField::Name => &lead.name,
            EditField::Phone => &lead.phone,
            EditField::Email => &lead.email,
            EditField::Source => &lead.source,
        }
    }

    fn field_name(&self) -> &'static str {
        match self {
            EditField::Notes => "notes",
            EditField::Promoter => "promoter",
            EditField::Name => "name",
            EditField::Phone => "phone",
            EditField::Email => "email",
            EditField::Source => "source",
        }
    }

    /// Patch setting this field to `value`.
    pub fn patch(&self, value: String) -> Result<LeadPatch, LeadError> {
        if self.is_required() && value.trim().is_empty() {
            return Err(LeadError::MissingField(self.field_name()));
        }
        let patch = LeadPatch::new();
        Ok(match self {
            EditField::Notes => patch.notes(value),
            EditField::Promoter => patch.promoter(value),
            EditField::Name => patch.name(value),
            EditField::Phone => patch.phone(value),
            EditField::Email => patch.email(value),
            EditField::Source => patch.source(value),
        })
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for EditField {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notes" | "note" | "nota" => Ok(EditField::Notes),
            "promoter" | "promotor" => Ok(EditField::Promoter),
            "name" | "nombre" => Ok(EditField::Name),
            "phone" | "telefono" | "teléfono" => Ok(EditField::Phone),
            "email" | "correo" => Ok(EditField::Email),
            "source" | "origen" => Ok(EditField::Source),
            _ => Err(LeadError::InvalidInput(format!(
                "Unknown field '{}'. Use: notes, promoter, name, phone, email, source",
                s
            ))),
        }
    }
}

/// First half of an edit: what to ask and what is there now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub id: LeadId,
    pub field: EditField,
    pub prompt: &'static str,
    pub current: String,
}

impl<S: SlotStorage> Store<S> {
    /// Start an edit. `None` when the lead does not exist.
    #[must_use]
    pub fn request_edit(&self, id: &str, field: EditField) -> Option<EditRequest> {
        let lead = self.get(id)?;
        Some(EditRequest {
            id: lead.id.clone(),
            field,
            prompt: field.prompt(),
            current: field.current(lead).to_string(),
        })
    }

    /// Finish an edit with the value the user supplied.
    ///
    /// Returns `Ok(false)` when the lead does not exist.
    pub fn apply_edit(&mut self, id: &str, field: EditField, value: String) -> Result<bool, LeadError> {
        let patch = field.patch(value)?;
        Ok(self.update(id, patch))
    }
}
