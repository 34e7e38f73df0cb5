use super::*;
use crate::state::test_helpers::{ScriptedBackend, store_with};

#[test]
fn starts_loading() {
    assert_eq!(VerifyPage::new().status(), VerifyStatus::Loading);
}

#[tokio::test]
async fn missing_token_errors_without_calling_store() {
    let (store, backend, _) = store_with(ScriptedBackend::default());

    for token in [None, Some(""), Some("  ")] {
        let mut page = VerifyPage::new();
        let result = page.run(&store, token).await;
        assert_eq!(result, Err(AuthError::required("token")));
        assert_eq!(page.status(), VerifyStatus::Error);
    }
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn any_token_signs_in() {
    let (store, _, _) = store_with(ScriptedBackend::default());
    let mut page = VerifyPage::new();

    let result = page.run(&store, Some("anytoken")).await;

    assert_eq!(result, Ok("/dashboard"));
    assert_eq!(page.status(), VerifyStatus::Success);
    assert!(!verify_toast(&result).is_error());
    assert!(store.snapshot().is_authenticated());
}

#[tokio::test]
async fn rejected_link_shows_error() {
    let (store, _, _) = store_with(ScriptedBackend::failing(AuthError::LinkExpiredOrInvalid));
    let mut page = VerifyPage::new();

    let result = page.run(&store, Some("stale")).await;

    assert_eq!(result, Err(AuthError::LinkExpiredOrInvalid));
    assert_eq!(page.status(), VerifyStatus::Error);
    assert_eq!(verify_toast(&result).title, "Verification failed");
}
