//! End-to-end sign-in against a real libSQL database: the hook runs, the
//! framework inserts its external-auth row, and the user signs in again.

use pretty_assertions::assert_eq;
use serde_json::json;

use skr_auth::{
    AuthWithOAuth2Event, ExternalAuthStore, RequestContext, SignInHook, SmartsheetTranslator,
};
use skr_core::entities::{AuthCollection, ExternalAuthKey};
use skr_core::enums::{AccountAction, LinkAction, SignInStage};
use skr_core::payload::{ExternalUser, OAuth2Tokens, RawIdentityPayload};
use skr_db::SkrDb;

fn users() -> AuthCollection {
    AuthCollection::new("_pb_users_auth_", "users")
}

fn smartsheet_user(payload: serde_json::Value, access_token: &str) -> ExternalUser {
    ExternalUser::new(
        RawIdentityPayload::from_value(payload).unwrap(),
        OAuth2Tokens {
            access_token: access_token.into(),
            refresh_token: String::new(),
            expiry: None,
        },
    )
}

fn grace(access_token: &str) -> ExternalUser {
    smartsheet_user(
        json!({
            "id": 42,
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "g@x.com",
            "profileImage": { "imageId": "img9" }
        }),
        access_token,
    )
}

fn event(user: ExternalUser) -> AuthWithOAuth2Event {
    AuthWithOAuth2Event::new(users(), user, RequestContext::with_provider("smartsheet"))
}

async fn hook() -> SignInHook<SkrDb> {
    let db = SkrDb::open_local(":memory:").await.unwrap();
    SignInHook::new(db, SmartsheetTranslator::default())
}

/// Run the hook, then do what the framework does afterwards.
async fn sign_in(hook: &SignInHook<SkrDb>, user: ExternalUser) -> skr_auth::SignInReport {
    let mut event = event(user);
    let report = hook.on_before_auth_with_oauth2(&mut event).await.unwrap();
    let record = event.record.unwrap();
    let identity = event.identity.unwrap();
    hook.store()
        .insert_external_auth(
            &ExternalAuthKey::new("smartsheet", &record.collection_id, &record.id),
            &identity.id,
        )
        .await
        .unwrap();
    report
}

#[tokio::test]
async fn first_sign_in_persists_translated_account() {
    let hook = hook().await;
    let report = sign_in(&hook, grace("at-1")).await;

    assert_eq!(report.stage, SignInStage::Complete);
    assert_eq!(report.account, AccountAction::Created);
    assert_eq!(report.link, LinkAction::NoneFound);

    let record = hook
        .store()
        .get_account("_pb_users_auth_", "42")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.email, "g@x.com");
    assert_eq!(record.username, "g@x.com");
    assert_eq!(record.name, "Grace Hopper");
    assert_eq!(record.token_key, "at-1");
    assert!(record.verified);
    assert!(record.avatar_url.ends_with("/img9"));
}

#[tokio::test]
async fn re_sign_in_leaves_exactly_one_link() {
    let hook = hook().await;
    sign_in(&hook, grace("at-1")).await;
    let first_link = hook
        .store()
        .list_external_auths("_pb_users_auth_", "42")
        .await
        .unwrap();

    let report = sign_in(&hook, grace("at-2")).await;
    assert_eq!(report.account, AccountAction::Updated);
    assert_eq!(report.link, LinkAction::RemovedStale);

    let links = hook
        .store()
        .list_external_auths("_pb_users_auth_", "42")
        .await
        .unwrap();
    assert_eq!(links.len(), 1);
    assert_ne!(links[0].id, first_link[0].id);
    assert_eq!(links[0].provider_id, "42");
}

#[tokio::test]
async fn re_sign_in_preserves_created_and_refreshes_fields() {
    let hook = hook().await;
    sign_in(&hook, grace("at-1")).await;
    let before = hook
        .store()
        .get_account("_pb_users_auth_", "42")
        .await
        .unwrap()
        .unwrap();

    let renamed = smartsheet_user(
        json!({
            "id": 42,
            "firstName": "Grace",
            "lastName": "Murray Hopper",
            "email": "grace@navy.mil"
        }),
        "at-2",
    );
    sign_in(&hook, renamed).await;

    let after = hook
        .store()
        .get_account("_pb_users_auth_", "42")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.created, before.created);
    assert!(after.updated >= before.updated);
    assert_eq!(after.name, "Grace Murray Hopper");
    assert_eq!(after.email, "grace@navy.mil");
    assert_eq!(after.token_key, "at-2");
    assert!(after.avatar_url.ends_with('/'));
    assert_eq!(
        hook.store().list_accounts("_pb_users_auth_").await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn skipping_the_framework_insert_reports_no_stale_link() {
    let hook = hook().await;
    let mut first = event(grace("at-1"));
    hook.on_before_auth_with_oauth2(&mut first).await.unwrap();

    let mut second = event(grace("at-2"));
    let report = hook.on_before_auth_with_oauth2(&mut second).await.unwrap();
    assert_eq!(report.account, AccountAction::Updated);
    assert_eq!(report.link, LinkAction::NoneFound);
}

#[tokio::test]
async fn store_closes_after_sign_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skrump.db");
    let path = path.to_str().unwrap();

    let hook = SignInHook::new(
        SkrDb::open_local(path).await.unwrap(),
        SmartsheetTranslator::default(),
    );
    sign_in(&hook, grace("at-1")).await;
    hook.into_store().close().await.unwrap();

    let db = SkrDb::open_local(path).await.unwrap();
    assert!(db.get_account("_pb_users_auth_", "42").await.unwrap().is_some());
    assert_eq!(
        db.list_external_auths("_pb_users_auth_", "42")
            .await
            .unwrap()
            .len(),
        1
    );
}
