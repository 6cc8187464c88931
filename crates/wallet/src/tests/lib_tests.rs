use super::*;

fn dev_session() -> AccountSession {
    AccountSession::new(Arc::new(DevWalletProvider::with_dev_accounts()))
}

#[tokio::test]
async fn dev_provider_lists_accounts() {
    let provider = DevWalletProvider::with_dev_accounts();
    let accounts = provider.list_accounts().await.expect("list accounts");

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].name.as_deref(), Some("alice"));
    assert!(accounts
        .iter()
        .all(|account| account.source == WalletSource::PolkadotJs));
}

#[tokio::test]
async fn select_unknown_address_fails_and_leaves_session_empty() {
    let session = dev_session();

    let err = session.select("0xdeadbeef").await.unwrap_err();
    assert!(err.to_string().contains("no wallet account"));
    assert!(session.active().await.is_none());
}

#[tokio::test]
async fn select_then_clear_round_trips() {
    let session = dev_session();
    let accounts = session.accounts().await.expect("accounts");

    let selected = session
        .select(accounts[1].address.as_str())
        .await
        .expect("select");
    assert_eq!(selected.name.as_deref(), Some("bob"));
    assert_eq!(session.active().await, Some(selected));

    session.clear().await;
    assert!(session.active().await.is_none());
}

#[tokio::test]
async fn restore_prefers_remembered_address() {
    let session = dev_session();
    let accounts = session.accounts().await.expect("accounts");

    let restored = session
        .restore(Some(accounts[1].address.as_str()))
        .await
        .expect("restore");
    assert_eq!(restored.and_then(|a| a.name), Some("bob".to_string()));
}

#[tokio::test]
async fn restore_falls_back_to_first_account() {
    let session = dev_session();

    let restored = session.restore(Some("0xno-such-account")).await.expect("restore");
    assert_eq!(restored.and_then(|a| a.name), Some("alice".to_string()));
}

#[tokio::test]
async fn restore_with_empty_wallet_selects_nothing() {
    let session = AccountSession::new(Arc::new(DevWalletProvider::new(Vec::new())));

    let restored = session.restore(None).await.expect("restore");
    assert!(restored.is_none());
    assert!(session.active().await.is_none());
}

#[tokio::test]
async fn dev_signer_signs_for_known_address_only() {
    let provider = DevWalletProvider::with_dev_accounts();
    let accounts = provider.list_accounts().await.expect("accounts");
    let signer = provider
        .resolve_signer(WalletSource::PolkadotJs)
        .await
        .expect("signer");

    let signature = signer
        .sign(&accounts[0].address, b"payload")
        .await
        .expect("sign");
    assert_eq!(signature, b"dev:payload".to_vec());

    let err = signer
        .sign(&ActorId::from("0xunknown"), b"payload")
        .await
        .unwrap_err();
    assert!(matches!(err, SignerError::UnknownAddress { .. }));
}

#[tokio::test]
async fn resolving_unused_extension_reports_missing() {
    let provider = DevWalletProvider::with_dev_accounts();

    let err = provider
        .resolve_signer(WalletSource::Talisman)
        .await
        .err()
        .expect("resolve_signer should fail");
    assert!(matches!(err, SignerError::ExtensionMissing(WalletSource::Talisman)));
}

#[tokio::test]
async fn missing_provider_fails_everything() {
    let provider = MissingWalletProvider;

    assert!(provider.list_accounts().await.is_err());
    assert!(matches!(
        provider.resolve_signer(WalletSource::PolkadotJs).await,
        Err(SignerError::ExtensionMissing(WalletSource::PolkadotJs))
    ));
}

#[test]
fn wallet_source_registry_round_trips() {
    for source in WalletSource::ALL {
        assert_eq!(WalletSource::from_id(source.id()), Some(source));
    }
    assert_eq!(WalletSource::from_id("metamask"), None);
    assert_eq!(WalletSource::SubwalletJs.display_name(), "SubWallet");
}
