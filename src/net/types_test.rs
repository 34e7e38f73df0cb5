use super::*;

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_display_names() {
    assert_eq!(Role::Farmer.to_string(), "Farmer");
    assert_eq!(Role::FpoManager.to_string(), "FPO Manager");
    assert_eq!(Role::Agronomist.to_string(), "Agronomist");
}

#[test]
fn role_parses_display_names() {
    for role in Role::ALL {
        assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
    }
    assert_eq!(" FPO Manager ".parse::<Role>().unwrap(), Role::FpoManager);
}

#[test]
fn role_rejects_unknown() {
    let err = "Landlord".parse::<Role>().unwrap_err();
    assert!(matches!(err, AuthError::Validation { field: "role", .. }));
    assert!("farmer".parse::<Role>().is_err());
}

#[test]
fn role_serializes_with_display_name() {
    let json = serde_json::to_string(&Role::FpoManager).unwrap();
    assert_eq!(json, "\"FPO Manager\"");
    let back: Role = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Role::FpoManager);
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn placeholder_identity_fields() {
    let identity = Identity::placeholder();
    assert_eq!(identity.name, "John Farmer");
    assert_eq!(identity.email, "john@farm.com");
    assert_eq!(identity.role, Role::Farmer);
    assert_eq!(identity.organization.as_deref(), Some("Green Valley Farm"));
}

#[test]
fn initial_is_uppercased_first_char() {
    let mut identity = Identity::placeholder();
    identity.name = "jo".into();
    assert_eq!(identity.initial(), Some('J'));
    identity.name = "   ".into();
    assert_eq!(identity.initial(), None);
}

// =============================================================================
// Registration
// =============================================================================

fn registration() -> Registration {
    Registration {
        name: "Jo".into(),
        email: "jo@x.com".into(),
        secret: "hunter2".into(),
        role: Role::Farmer,
        organization: None,
    }
}

#[test]
fn registration_debug_redacts_secret() {
    let debug = format!("{:?}", registration());
    assert!(debug.contains("jo@x.com"));
    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains("hunter2"));
}

#[test]
fn registration_into_identity_drops_secret() {
    let identity = registration().into_identity("abc".into());
    assert_eq!(identity.id, "abc");
    assert_eq!(identity.name, "Jo");
    let json = serde_json::to_string(&identity).unwrap();
    assert!(!json.contains("hunter2"));
}

// =============================================================================
// AuthError
// =============================================================================

#[test]
fn error_codes_are_distinct() {
    let errors = [
        AuthError::InvalidCredentials,
        AuthError::LinkExpiredOrInvalid,
        AuthError::NetworkUnavailable("offline".into()),
        AuthError::required("email"),
        AuthError::Busy,
    ];
    for (i, a) in errors.iter().enumerate() {
        for (j, b) in errors.iter().enumerate() {
            if i != j {
                assert_ne!(a.error_code(), b.error_code());
            }
        }
    }
}

#[test]
fn retryable_only_for_transient_failures() {
    assert!(AuthError::NetworkUnavailable("offline".into()).retryable());
    assert!(AuthError::Busy.retryable());
    assert!(!AuthError::InvalidCredentials.retryable());
    assert!(!AuthError::LinkExpiredOrInvalid.retryable());
    assert!(!AuthError::required("secret").retryable());
}

#[test]
fn validation_message_names_field() {
    assert_eq!(AuthError::required("email").to_string(), "invalid email: must not be empty");
}
