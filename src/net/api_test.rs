use super::*;

fn instant() -> SimulatedAuthApi {
    SimulatedAuthApi::new(Duration::ZERO)
}

#[test]
fn default_latency_is_one_second() {
    assert_eq!(SimulatedAuthApi::default().latency(), Duration::from_secs(1));
}

#[tokio::test]
async fn login_echoes_email_with_fixed_profile() {
    let identity = instant().login("a@b.com", "x").await.unwrap();
    assert_eq!(identity.email, "a@b.com");
    assert_eq!(identity.role, Role::Farmer);
    assert_eq!(identity.organization.as_deref(), Some("Green Valley Farm"));
}

#[tokio::test]
async fn send_link_succeeds() {
    assert!(instant().send_link("a@b.com").await.is_ok());
}

#[tokio::test]
async fn register_uses_profile_and_fresh_id() {
    let registration = Registration {
        name: "Jo".into(),
        email: "jo@x.com".into(),
        secret: "s".into(),
        role: Role::Agronomist,
        organization: Some("Co-op".into()),
    };
    let a = instant().register(&registration).await.unwrap();
    let b = instant().register(&registration).await.unwrap();
    assert_eq!(a.name, "Jo");
    assert_eq!(a.role, Role::Agronomist);
    assert_eq!(a.organization.as_deref(), Some("Co-op"));
    assert!(Uuid::parse_str(&a.id).is_ok());
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn verify_link_accepts_any_token() {
    let identity = instant().verify_link("anytoken").await.unwrap();
    assert_eq!(identity, Identity::placeholder());
}

#[tokio::test(start_paused = true)]
async fn calls_wait_for_latency() {
    let api = SimulatedAuthApi::default();
    let started = tokio::time::Instant::now();
    api.send_link("a@b.com").await.unwrap();
    assert!(started.elapsed() >= DEFAULT_LATENCY);
}
