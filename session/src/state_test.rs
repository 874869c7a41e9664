use super::*;

fn bob() -> Identity {
    Identity { id: "u2".into(), email: "bob@example.com".into(), display_name: None }
}

#[test]
fn session_default_is_loading_without_identity() {
    let session = Session::default();
    assert!(session.is_loading());
    assert!(session.identity.is_none());
    assert_eq!(session, Session::loading());
}

#[test]
fn resolved_none_is_not_authenticated() {
    let session = Session::resolved(None);
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
}

#[test]
fn resolved_some_is_authenticated() {
    let session = Session::resolved(Some(bob()));
    assert!(session.is_authenticated());
    assert_eq!(session.current_user().map(|u| u.id.as_str()), Some("u2"));
}

#[test]
fn loading_with_identity_is_not_authenticated() {
    let session = Session { identity: Some(bob()), status: SessionStatus::Loading };
    assert!(!session.is_authenticated());
}

#[test]
fn session_status_default_is_loading() {
    assert_eq!(SessionStatus::default(), SessionStatus::Loading);
}
