use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    Draft,
    Submitted,
    Approved,
    Paid,
    Closed,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 5] = [
        ExpenseStatus::Draft,
        ExpenseStatus::Submitted,
        ExpenseStatus::Approved,
        ExpenseStatus::Paid,
        ExpenseStatus::Closed,
    ];

    /// Statuses reachable in one step from `self`.
    pub fn next_statuses(self) -> &'static [ExpenseStatus] {
        match self {
            ExpenseStatus::Draft => &[ExpenseStatus::Submitted],
            ExpenseStatus::Submitted => &[ExpenseStatus::Approved, ExpenseStatus::Draft],
            ExpenseStatus::Approved => &[ExpenseStatus::Paid, ExpenseStatus::Submitted],
            ExpenseStatus::Paid => &[ExpenseStatus::Closed],
            ExpenseStatus::Closed => &[],
        }
    }

    pub fn can_transition_to(self, target: ExpenseStatus) -> bool {
        self.next_statuses().contains(&target)
    }

    pub fn is_terminal(self) -> bool {
        self.next_statuses().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseStatus::Draft => "DRAFT",
            ExpenseStatus::Submitted => "SUBMITTED",
            ExpenseStatus::Approved => "APPROVED",
            ExpenseStatus::Paid => "PAID",
            ExpenseStatus::Closed => "CLOSED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpenseStatus::Draft => "Draft",
            ExpenseStatus::Submitted => "Submitted",
            ExpenseStatus::Approved => "Approved",
            ExpenseStatus::Paid => "Paid",
            ExpenseStatus::Closed => "Closed",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ExpenseStatus::Draft => "fa-pencil-alt",
            ExpenseStatus::Submitted => "fa-paper-plane",
            ExpenseStatus::Approved => "fa-check-circle",
            ExpenseStatus::Paid => "fa-money-bill-wave",
            ExpenseStatus::Closed => "fa-lock",
        }
    }

    /// Button text for moving *into* this status.
    pub fn action_label(self) -> &'static str {
        match self {
            ExpenseStatus::Draft => "Return to draft",
            ExpenseStatus::Submitted => "Submit",
            ExpenseStatus::Approved => "Approve",
            ExpenseStatus::Paid => "Mark as paid",
            ExpenseStatus::Closed => "Close",
        }
    }

    /// Moving back to draft must carry an explanation for the submitter.
    pub fn requires_notes(self) -> bool {
        matches!(self, ExpenseStatus::Draft)
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            ExpenseStatus::Draft => "bg-status-neutral-bg text-status-neutral-text",
            ExpenseStatus::Submitted => "bg-status-info-bg text-status-info-text",
            ExpenseStatus::Approved => "bg-status-success-bg text-status-success-text",
            ExpenseStatus::Paid => "bg-status-warning-bg text-status-warning-text",
            ExpenseStatus::Closed => "bg-surface-muted text-fg-muted",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Accountant,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Accountant)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Accountant => "Accountant",
            Role::Unknown => "Unknown",
        }
    }
}

/// Approve / return controls are shown only to accountants looking at a
/// submitted expense.
pub fn approval_gate_visible(role: Option<Role>, status: ExpenseStatus) -> bool {
    role.map(Role::is_privileged).unwrap_or(false) && status == ExpenseStatus::Submitted
}

/// Successors offered by the generic status selector. Leaving `SUBMITTED` is a
/// review decision and is only offered through the approval gate.
pub fn selector_targets(status: ExpenseStatus) -> &'static [ExpenseStatus] {
    match status {
        ExpenseStatus::Submitted => &[],
        other => other.next_statuses(),
    }
}

/// A transition the user is composing before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionDraft {
    pub current: ExpenseStatus,
    pub target: ExpenseStatus,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRejection {
    NotAllowed,
    NotesRequired,
}

impl TransitionRejection {
    pub fn message(self) -> &'static str {
        match self {
            TransitionRejection::NotAllowed => "This status change is not allowed.",
            TransitionRejection::NotesRequired => {
                "Please explain why the expense is returned to draft."
            }
        }
    }
}

impl TransitionDraft {
    pub fn new(current: ExpenseStatus, target: ExpenseStatus) -> Self {
        Self {
            current,
            target,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn validate(&self) -> Result<(), TransitionRejection> {
        if !self.current.can_transition_to(self.target) {
            return Err(TransitionRejection::NotAllowed);
        }
        if self.target.requires_notes() && self.notes.trim().is_empty() {
            return Err(TransitionRejection::NotesRequired);
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn trimmed_notes(&self) -> Option<String> {
        let trimmed = self.notes.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
