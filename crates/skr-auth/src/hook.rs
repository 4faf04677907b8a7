//! The "before auth with OAuth2" hook.
//!
//! The framework fires [`AuthWithOAuth2Event`] once per external sign-in
//! attempt, before its own default handling. The hook may replace the event's
//! record, and the framework continues with whatever the event holds when the
//! hook returns.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use skr_core::entities::{AccountRecord, AuthCollection};
use skr_core::enums::{AccountAction, LinkAction, SignInStage};
use skr_core::identity::CanonicalIdentity;
use skr_core::payload::ExternalUser;

use crate::error::SignInError;
use crate::reconcile::reconcile_full;
use crate::store::{AccountStore, ExternalAuthStore};
use crate::translate::SmartsheetTranslator;

/// Request-context key under which the framework stores the provider name.
pub const PROVIDER_CONTEXT_KEY: &str = "provider";

/// Values the framework's request parsing attached to the current request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    values: HashMap<String, Value>,
}

impl RequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying only the provider name.
    #[must_use]
    pub fn with_provider(provider: &str) -> Self {
        let mut context = Self::new();
        context.set(PROVIDER_CONTEXT_KEY, provider);
        context
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The provider name.
    ///
    /// # Errors
    ///
    /// Returns `SignInError::InvalidRequestContext` if the key is missing or
    /// not a string.
    pub fn provider_name(&self) -> Result<&str, SignInError> {
        match self.get(PROVIDER_CONTEXT_KEY) {
            Some(Value::String(name)) => Ok(name),
            Some(other) => Err(SignInError::InvalidRequestContext(format!(
                "`{PROVIDER_CONTEXT_KEY}` must be a string, got {other}"
            ))),
            None => Err(SignInError::InvalidRequestContext(format!(
                "`{PROVIDER_CONTEXT_KEY}` is not set"
            ))),
        }
    }
}

/// Fired before the framework authenticates a user through OAuth2.
#[derive(Debug, Clone)]
pub struct AuthWithOAuth2Event {
    pub collection: AuthCollection,
    pub oauth2_user: ExternalUser,
    /// Record the framework already matched, if any. Replaced by the hook.
    pub record: Option<AccountRecord>,
    /// Set by the hook once translation succeeds.
    pub identity: Option<CanonicalIdentity>,
    pub context: RequestContext,
}

impl AuthWithOAuth2Event {
    #[must_use]
    pub fn new(
        collection: AuthCollection,
        oauth2_user: ExternalUser,
        context: RequestContext,
    ) -> Self {
        Self {
            collection,
            oauth2_user,
            record: None,
            identity: None,
            context,
        }
    }
}

/// Summary of a completed sign-in.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SignInReport {
    pub provider: String,
    pub stage: SignInStage,
    pub account_id: String,
    pub account: AccountAction,
    pub link: LinkAction,
}

#[derive(Debug)]
struct Progress {
    stage: SignInStage,
}

impl Progress {
    const fn new() -> Self {
        Self {
            stage: SignInStage::Received,
        }
    }

    fn advance(&mut self, next: SignInStage) {
        debug_assert!(
            self.stage.can_transition_to(next),
            "invalid sign-in transition {} -> {next}",
            self.stage
        );
        tracing::debug!(from = %self.stage, to = %next, "sign-in stage");
        self.stage = next;
    }

    fn fail(&mut self, error: &SignInError) {
        tracing::warn!(stage = %self.stage, %error, "sign-in failed");
        self.stage = SignInStage::Failed;
    }
}

/// Adds Smartsheet support to the framework's OAuth2 sign-in.
///
/// Owns its storage collaborator. Build it once at startup and hand the store
/// back with [`SignInHook::into_store`] for shutdown.
pub struct SignInHook<S> {
    store: S,
    translator: SmartsheetTranslator,
}

impl<S> SignInHook<S>
where
    S: AccountStore + ExternalAuthStore,
{
    #[must_use]
    pub const fn new(store: S, translator: SmartsheetTranslator) -> Self {
        Self { store, translator }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Translate the event's OAuth2 user, upsert its account, and clear any
    /// stale external-auth link.
    ///
    /// On success `event.record` holds the saved account and `event.identity`
    /// the canonical identity. On failure the event's record is left as it
    /// was, but an account write that already happened is not undone.
    ///
    /// # Errors
    ///
    /// Any [`SignInError`]; the sign-in must not proceed.
    pub async fn on_before_auth_with_oauth2(
        &self,
        event: &mut AuthWithOAuth2Event,
    ) -> Result<SignInReport, SignInError> {
        let mut progress = Progress::new();
        match self.run(event, &mut progress).await {
            Ok(report) => Ok(report),
            Err(error) => {
                progress.fail(&error);
                Err(error)
            }
        }
    }

    async fn run(
        &self,
        event: &mut AuthWithOAuth2Event,
        progress: &mut Progress,
    ) -> Result<SignInReport, SignInError> {
        let provider = event.context.provider_name()?.to_string();

        let identity = self.translator.translate(&event.oauth2_user)?;
        progress.advance(SignInStage::Translated);

        let shell = match &event.record {
            Some(record) if record.collection_id == event.collection.id => record.clone(),
            Some(record) => {
                tracing::debug!(
                    record_collection = %record.collection_id,
                    event_collection = %event.collection.id,
                    "ignoring shell from another collection"
                );
                AccountRecord::new(event.collection.id.clone())
            }
            None => AccountRecord::new(event.collection.id.clone()),
        };

        let reconciliation = reconcile_full(&self.store, &provider, &identity, shell, |stage| {
            progress.advance(stage);
        })
        .await?;
        progress.advance(SignInStage::Complete);

        tracing::info!(
            provider = %provider,
            account_id = %reconciliation.account.record.id,
            account = %reconciliation.account.action,
            link = %reconciliation.link,
            "oauth2 sign-in reconciled"
        );

        let report = SignInReport {
            provider,
            stage: progress.stage,
            account_id: reconciliation.account.record.id.clone(),
            account: reconciliation.account.action,
            link: reconciliation.link,
        };
        event.record = Some(reconciliation.account.record);
        event.identity = Some(identity);
        Ok(report)
    }
}
