use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use skr_auth::{
    AuthWithOAuth2Event, ExternalAuthStore, RequestContext, SignInHook, SignInReport,
    SmartsheetTranslator,
};
use skr_config::SkrConfig;
use skr_core::entities::{AccountRecord, AuthCollection, ExternalAuthKey, ExternalAuthLink};
use skr_core::payload::{ExternalUser, OAuth2Tokens, RawIdentityPayload};
use skr_db::SkrDb;

use crate::bootstrap::open_db;
use crate::cli::{GlobalFlags, SignInArgs};
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct SignInOutput {
    pub report: SignInReport,
    pub account: AccountRecord,
    /// The row the framework inserts after the hook, unless skipped.
    pub external_auth: Option<ExternalAuthLink>,
}

/// Handle `skrump sign-in`.
pub async fn handle(
    args: &SignInArgs,
    config: &SkrConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user = load_user(args)?;
    let db = open_db(config).await?;
    let hook = SignInHook::new(
        db,
        SmartsheetTranslator::new(config.provider.avatar_base_url.as_str()),
    );

    let result = replay(&hook, user, args, config).await;
    hook.into_store()
        .close()
        .await
        .context("failed to close database")?;

    output(&result?, flags.format)
}

async fn replay(
    hook: &SignInHook<SkrDb>,
    user: ExternalUser,
    args: &SignInArgs,
    config: &SkrConfig,
) -> anyhow::Result<SignInOutput> {
    let provider = args.provider.as_deref().unwrap_or(&config.provider.name);
    let collection = AuthCollection::new(
        config.provider.collection_id.as_str(),
        config.provider.collection_name.as_str(),
    );
    let mut event =
        AuthWithOAuth2Event::new(collection, user, RequestContext::with_provider(provider));

    let report = hook
        .on_before_auth_with_oauth2(&mut event)
        .await
        .context("sign-in hook failed")?;
    let account = event
        .record
        .context("sign-in hook did not attach an account")?;

    let external_auth = if args.skip_link {
        None
    } else {
        let key = ExternalAuthKey::new(provider, account.collection_id.as_str(), account.id.as_str());
        let link = hook
            .store()
            .insert_external_auth(&key, &report.account_id)
            .await
            .context("failed to insert external auth")?;
        Some(link)
    };

    Ok(SignInOutput {
        report,
        account,
        external_auth,
    })
}

fn load_user(args: &SignInArgs) -> anyhow::Result<ExternalUser> {
    let text = read_payload(&args.payload)?;
    tracing::debug!(path = %args.payload.display(), bytes = text.len(), "payload read");
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.payload.display()))?;
    let raw = RawIdentityPayload::from_value(value)
        .with_context(|| format!("{} must hold a JSON object", args.payload.display()))?;

    Ok(ExternalUser::new(
        raw,
        OAuth2Tokens {
            access_token: args.access_token.clone(),
            refresh_token: args.refresh_token.clone(),
            expiry: args.expiry,
        },
    ))
}

fn read_payload(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read payload from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
