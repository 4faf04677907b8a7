use anyhow::Context;
use serde::Serialize;

use skr_config::SkrConfig;
use skr_core::entities::{AccountRecord, ExternalAuthLink};
use skr_db::SkrDb;

use crate::bootstrap::open_db;
use crate::cli::{AccountCommands, GlobalFlags};
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct AccountView {
    pub account: AccountRecord,
    pub external_auths: Vec<ExternalAuthLink>,
}

/// Handle `skrump account`.
pub async fn handle(
    action: &AccountCommands,
    config: &SkrConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = open_db(config).await?;
    let collection_id = config.provider.collection_id.as_str();

    let result = match action {
        AccountCommands::Show { id } => show(&db, collection_id, id)
            .await
            .and_then(|view| Ok(serde_json::to_value(view)?)),
        AccountCommands::List => db
            .list_accounts(collection_id)
            .await
            .context("failed to list accounts")
            .and_then(|accounts| Ok(serde_json::to_value(accounts)?)),
    };
    db.close().await.context("failed to close database")?;

    output(&result?, flags.format)
}

async fn show(db: &SkrDb, collection_id: &str, id: &str) -> anyhow::Result<AccountView> {
    let account = db
        .get_account(collection_id, id)
        .await
        .context("failed to look up account")?
        .with_context(|| format!("account '{id}' not found in collection '{collection_id}'"))?;
    let external_auths = db
        .list_external_auths(collection_id, id)
        .await
        .context("failed to list external auths")?;

    Ok(AccountView {
        account,
        external_auths,
    })
}
