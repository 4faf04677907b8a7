//! Stage enums for skrump.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! State machines provide `allowed_next_states()` to enforce valid transitions
//! at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SignInStage
// ---------------------------------------------------------------------------

/// Progress of one OAuth2 sign-in through the hook.
///
/// ```text
/// received → translated → account_reconciled → link_reconciled → complete
///     ↘           ↘                ↘                   ↘
///                            failed
/// ```
///
/// `failed` is terminal. A failure after `account_reconciled` does not undo
/// the account write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SignInStage {
    Received,
    Translated,
    AccountReconciled,
    LinkReconciled,
    Complete,
    Failed,
}

impl SignInStage {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Received => &[Self::Translated, Self::Failed],
            Self::Translated => &[Self::AccountReconciled, Self::Failed],
            Self::AccountReconciled => &[Self::LinkReconciled, Self::Failed],
            Self::LinkReconciled => &[Self::Complete, Self::Failed],
            Self::Complete | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    /// Return the string representation used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Translated => "translated",
            Self::AccountReconciled => "account_reconciled",
            Self::LinkReconciled => "link_reconciled",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SignInStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AccountAction / LinkAction
// ---------------------------------------------------------------------------

/// What account reconciliation did with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountAction {
    Created,
    Updated,
}

impl AccountAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for AccountAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What external-auth link reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LinkAction {
    /// No link matched the key; nothing was deleted.
    NoneFound,
    /// A stale link matched and was deleted.
    RemovedStale,
}

impl LinkAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoneFound => "none_found",
            Self::RemovedStale => "removed_stale",
        }
    }
}

impl fmt::Display for LinkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
