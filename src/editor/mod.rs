//! Cell-edit lifecycle with asynchronous, cancelable validation.
//!
//! At most one session exists at a time:
//!
//! ```text
//! Idle → Editing → Validating → { committed → Idle | invalid → Editing }
//! ```
//!
//! `commit` does not block: it hands back a [`ValidationRequest`] carrying a
//! session token, and the outcome comes back later through the engine's
//! `resolve_validation`. Tokens are monotonically increasing, so a result
//! that arrives after its session was canceled or superseded no longer
//! matches the active token and is discarded without touching anything.

pub(crate) mod mutation;
mod validate;

pub use validate::{validate_field, FieldRules, ValidationOutcome, Validator};

use serde::Serialize;

use crate::types::FieldKey;

/// Where the active session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPhase {
    /// Draft is editable; may carry an inline error from a failed commit.
    Editing,
    /// A commit is in flight; the draft is frozen until the outcome lands.
    Validating,
}

/// Opaque identity of one edit session. Every in-flight validation carries
/// the token it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionToken(u64);

/// The single active in-place-edit context.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Stable row identity — positions in the sorted view shift while a
    /// validation is pending, ids do not.
    pub row_id: u64,
    pub field: FieldKey,
    pub draft: String,
    pub error: Option<String>,
    pub phase: EditPhase,
    token: SessionToken,
}

impl EditSession {
    pub fn token(&self) -> SessionToken {
        self.token
    }
}

/// What the host must go validate after a successful `commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub token: SessionToken,
    pub field: FieldKey,
    pub raw: String,
}

/// What became of a delivered validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Valid: the row was mutated and an undo entry recorded.
    Applied,
    /// Invalid: the session is back in `Editing` with the error inline.
    Rejected,
    /// The token no longer matches the active session; nothing happened.
    Stale,
}

/// Outcome of resolving a token against the session state, before any data
/// mutation has happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolveAction {
    Commit { row_id: u64, field: FieldKey, raw: String },
    Error,
    Stale,
}

/// Session state machine, independent of the dataset it edits.
#[derive(Debug, Default)]
pub struct EditorState {
    session: Option<EditSession>,
    next_token: u64,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session for `(row_id, field)` with the cell's current display
    /// text as the draft.
    ///
    /// No-op while another cell is mid-`Editing`. A session stuck in
    /// `Validating` is superseded: its token dies here, so its late outcome
    /// will resolve as stale.
    pub(crate) fn begin(&mut self, row_id: u64, field: FieldKey, current: String) -> bool {
        if let Some(s) = &self.session {
            if s.phase == EditPhase::Editing {
                return false;
            }
        }
        self.next_token += 1;
        self.session = Some(EditSession {
            row_id,
            field,
            draft: current,
            error: None,
            phase: EditPhase::Editing,
            token: SessionToken(self.next_token),
        });
        true
    }

    /// Replace the draft text. Only legal while `Editing`; no validation runs.
    pub(crate) fn update_draft(&mut self, text: &str) -> bool {
        match self.session.as_mut() {
            Some(s) if s.phase == EditPhase::Editing => {
                s.draft = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Freeze the draft and issue a validation request for it.
    pub(crate) fn commit(&mut self) -> Option<ValidationRequest> {
        let s = self.session.as_mut()?;
        if s.phase != EditPhase::Editing {
            return None;
        }
        s.phase = EditPhase::Validating;
        s.error = None;
        Some(ValidationRequest {
            token: s.token,
            field: s.field,
            raw: s.draft.clone(),
        })
    }

    /// Discard the session. Any in-flight validation token is orphaned.
    pub(crate) fn cancel(&mut self) {
        self.session = None;
    }

    /// Match a delivered outcome against the active session.
    pub(crate) fn resolve(
        &mut self,
        token: SessionToken,
        outcome: &ValidationOutcome,
    ) -> ResolveAction {
        let matches = self
            .session
            .as_ref()
            .is_some_and(|s| s.token == token && s.phase == EditPhase::Validating);
        if !matches {
            return ResolveAction::Stale;
        }
        match outcome {
            ValidationOutcome::Invalid(message) => {
                if let Some(s) = self.session.as_mut() {
                    s.phase = EditPhase::Editing;
                    s.error = Some(message.clone());
                }
                ResolveAction::Error
            }
            ValidationOutcome::Valid => match self.session.take() {
                Some(s) => ResolveAction::Commit {
                    row_id: s.row_id,
                    field: s.field,
                    raw: s.draft,
                },
                None => ResolveAction::Stale,
            },
        }
    }
}
