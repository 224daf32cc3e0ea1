//! Column drag-reorder state machine.
//!
//! Modeled as explicit states rather than a pair of nullable keys, so "drop
//! with no valid target" is unrepresentable. A drop or an explicit drag-end
//! always returns to `Idle`; no highlight state can outlive the gesture.

use crate::types::FieldKey;

/// Transient pointer state of a header drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Drag started on `source`, not currently over another header.
    Dragging { source: FieldKey },
    /// Dragging `source` over `target`.
    HoveringTarget { source: FieldKey, target: FieldKey },
}

impl DragState {
    /// Arm a drag on `source`.
    pub fn start(&mut self, source: FieldKey) {
        *self = Self::Dragging { source };
    }

    /// Record the header currently dragged over. Ignored when no drag is
    /// armed; hovering the source itself falls back to plain dragging.
    pub fn hover(&mut self, target: FieldKey) {
        let source = match *self {
            Self::Idle => return,
            Self::Dragging { source } | Self::HoveringTarget { source, .. } => source,
        };
        *self = if source == target {
            Self::Dragging { source }
        } else {
            Self::HoveringTarget { source, target }
        };
    }

    /// Finish the gesture. Returns the `(source, target)` pair to reorder
    /// when the drop landed on a different header, `None` otherwise. Always
    /// clears to `Idle`.
    pub fn complete(&mut self) -> Option<(FieldKey, FieldKey)> {
        let result = match *self {
            Self::HoveringTarget { source, target } => Some((source, target)),
            Self::Idle | Self::Dragging { .. } => None,
        };
        *self = Self::Idle;
        result
    }

    /// Abort the gesture unconditionally.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn source(&self) -> Option<FieldKey> {
        match *self {
            Self::Idle => None,
            Self::Dragging { source } | Self::HoveringTarget { source, .. } => Some(source),
        }
    }

    pub fn target(&self) -> Option<FieldKey> {
        match *self {
            Self::HoveringTarget { target, .. } => Some(target),
            Self::Idle | Self::Dragging { .. } => None,
        }
    }
}
