use super::*;
use crate::state::test_helpers::{ScriptedBackend, store_with};

fn filled(secret: &str) -> RegisterForm {
    RegisterForm {
        name: "Jo".into(),
        email: "jo@x.com".into(),
        secret: secret.into(),
        role: Some(Role::Farmer),
        organization: String::new(),
    }
}

// =============================================================
// password strength
// =============================================================

#[test]
fn strength_scores_each_requirement() {
    assert_eq!(password_strength(""), 0);
    assert_eq!(password_strength("abc"), 25);
    assert_eq!(password_strength("abcDEF"), 50);
    assert_eq!(password_strength("abcdefgH"), 75);
    assert_eq!(password_strength("abcdefG1"), 100);
    assert_eq!(password_strength("ABCDEFGH!"), 75);
}

#[test]
fn strength_bands() {
    assert_eq!(Strength::from_score(0), Strength::Weak);
    assert_eq!(Strength::from_score(25), Strength::Weak);
    assert_eq!(Strength::from_score(50), Strength::Fair);
    assert_eq!(Strength::from_score(75), Strength::Strong);
    assert_eq!(Strength::from_score(100), Strength::Strong);
}

#[test]
fn requirements_checklist() {
    let met: Vec<bool> = password_requirements("short1").iter().map(|r| r.met).collect();
    assert_eq!(met, vec![false, true, false, true]);
}

// =============================================================
// RegisterForm
// =============================================================

#[test]
fn form_valid_needs_every_field_and_strength() {
    assert!(filled("Passw0rd!").is_valid());
    assert!(!filled("weak").is_valid());
    assert!(!RegisterForm { role: None, ..filled("Passw0rd!") }.is_valid());
    assert!(!RegisterForm { name: " ".into(), ..filled("Passw0rd!") }.is_valid());
}

#[test]
fn cannot_submit_while_busy() {
    assert!(!filled("Passw0rd!").can_submit(&SessionState::starting()));
    assert!(filled("Passw0rd!").can_submit(&SessionState::default()));
}

#[test]
fn empty_organization_becomes_none() {
    let registration = filled("Passw0rd!").to_registration().unwrap();
    assert_eq!(registration.organization, None);

    let with_org = RegisterForm { organization: " Co-op ".into(), ..filled("Passw0rd!") };
    assert_eq!(with_org.to_registration().unwrap().organization.as_deref(), Some("Co-op"));
}

#[test]
fn missing_role_is_validation_error() {
    let err = RegisterForm { role: None, ..filled("Passw0rd!") }.to_registration().unwrap_err();
    assert!(matches!(err, AuthError::Validation { field: "role", .. }));
}

#[tokio::test]
async fn weak_secret_rejected_before_store() {
    let (store, backend, _) = store_with(ScriptedBackend::default());

    let result = filled("weak").submit(&store).await;

    assert!(matches!(result, Err(AuthError::Validation { field: "secret", .. })));
    assert_eq!(submit_toast(&result).title, "Password too weak");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn submit_registers_and_goes_to_dashboard() {
    let (store, _, _) = store_with(ScriptedBackend::default());

    let result = filled("Passw0rd!").submit(&store).await;

    assert_eq!(result, Ok("/dashboard"));
    assert!(!submit_toast(&result).is_error());
    let identity = store.snapshot().identity.unwrap();
    assert_eq!(identity.name, "Jo");
    assert_eq!(identity.role, Role::Farmer);
}

#[tokio::test]
async fn backend_failure_toast() {
    let (store, _, _) = store_with(ScriptedBackend::failing(AuthError::NetworkUnavailable("down".into())));
    let result = filled("Passw0rd!").submit(&store).await;
    assert_eq!(submit_toast(&result).title, "Registration failed");
}
