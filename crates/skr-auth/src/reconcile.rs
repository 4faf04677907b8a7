//! Account and external-auth reconciliation.
//!
//! Both operations are find-then-act sequences without a surrounding
//! transaction. Two concurrent sign-ins for the same account can interleave;
//! whatever isolation the storage backend provides is all there is.

use serde::Serialize;
use skr_core::entities::{AccountRecord, ExternalAuthKey};
use skr_core::enums::{AccountAction, LinkAction, SignInStage};
use skr_core::identity::CanonicalIdentity;

use crate::error::SignInError;
use crate::store::{AccountStore, ExternalAuthStore};

/// The persisted account and whether it was created or updated.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledAccount {
    pub record: AccountRecord,
    pub action: AccountAction,
}

/// Result of [`reconcile_full`].
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub account: ReconciledAccount,
    pub link: LinkAction,
}

/// Upsert the account record for `identity`.
///
/// If a record with `identity.id` exists in the shell's collection it is
/// loaded and updated; otherwise `shell` becomes a new record. The canonical
/// fields are written either way, so the lookup only decides insert versus
/// update.
///
/// # Errors
///
/// `LookupFailed` if the lookup errors, `PersistFailed` if the save does.
pub async fn reconcile_account<S: AccountStore>(
    store: &S,
    identity: &CanonicalIdentity,
    shell: AccountRecord,
) -> Result<ReconciledAccount, SignInError> {
    let existing = store
        .find_account(&shell.collection_id, &identity.id)
        .await
        .map_err(|source| SignInError::LookupFailed {
            entity: "account",
            source,
        })?;

    let (mut record, action) = match existing {
        Some(found) => (found, AccountAction::Updated),
        None => {
            let mut record = shell;
            // A shell that was loaded under another id must still be inserted.
            record.mark_new();
            (record, AccountAction::Created)
        }
    };

    apply_identity(&mut record, identity);

    store
        .save_account(&mut record)
        .await
        .map_err(|source| SignInError::PersistFailed {
            entity: "account",
            source,
        })?;

    tracing::debug!(
        id = %record.id,
        collection = %record.collection_id,
        action = %action,
        "account reconciled"
    );
    Ok(ReconciledAccount { record, action })
}

/// Delete the link for (`provider`, `collection_id`, `account_id`) if one exists.
///
/// Runs before the framework inserts a fresh link for the same key.
///
/// # Errors
///
/// `LookupFailed` if the lookup errors, `PersistFailed` if the delete does.
pub async fn reconcile_external_auth_link<S: ExternalAuthStore>(
    store: &S,
    provider: &str,
    collection_id: &str,
    account_id: &str,
) -> Result<LinkAction, SignInError> {
    let key = ExternalAuthKey::new(provider, collection_id, account_id);

    let Some(stale) = store
        .find_external_auth(&key)
        .await
        .map_err(|source| SignInError::LookupFailed {
            entity: "external auth",
            source,
        })?
    else {
        return Ok(LinkAction::NoneFound);
    };

    store
        .delete_external_auth(&stale)
        .await
        .map_err(|source| SignInError::PersistFailed {
            entity: "external auth",
            source,
        })?;

    tracing::debug!(
        link_id = %stale.id,
        provider,
        record_id = account_id,
        "removed stale external auth link"
    );
    Ok(LinkAction::RemovedStale)
}

/// [`reconcile_account`] then [`reconcile_external_auth_link`], stopping at
/// the first error.
///
/// `on_stage` is called after each completed step with
/// `AccountReconciled` and then `LinkReconciled`. A failed link step leaves
/// the account write in place.
///
/// # Errors
///
/// The first error of either step.
pub async fn reconcile_full<S, F>(
    store: &S,
    provider: &str,
    identity: &CanonicalIdentity,
    shell: AccountRecord,
    mut on_stage: F,
) -> Result<Reconciliation, SignInError>
where
    S: AccountStore + ExternalAuthStore,
    F: FnMut(SignInStage) + Send,
{
    let account = reconcile_account(store, identity, shell).await?;
    on_stage(SignInStage::AccountReconciled);

    let link = reconcile_external_auth_link(
        store,
        provider,
        &account.record.collection_id,
        &account.record.id,
    )
    .await?;
    on_stage(SignInStage::LinkReconciled);

    Ok(Reconciliation { account, link })
}

fn apply_identity(record: &mut AccountRecord, identity: &CanonicalIdentity) {
    record.id.clone_from(&identity.id);
    record.email.clone_from(&identity.email);
    record.username.clone_from(&identity.username);
    record.token_key.clone_from(&identity.access_token);
    record.verified = true;
    record.name.clone_from(&identity.name);
    record.avatar_url.clone_from(&identity.avatar_url);
}
