mod common;

use smart_agenda_shared::endpoints;
use smart_agenda_shared::session::{LOGIN_ROUTE, MemorySessionStore, SessionGuard, SessionStore, TOKEN_KEY, USER_KEY};

use common::fixtures::{ORG, RecordingTransport};

#[test]
fn test_concurrent_401s_clear_storage_and_redirect_once() {
    common::init_test_logging();
    let guard = SessionGuard::new(MemorySessionStore::with(&[
        (TOKEN_KEY, "abc"),
        (USER_KEY, "{\"id\":\"u1\",\"name\":\"Ana\"}"),
    ]));
    assert_eq!(guard.authorization().as_deref(), Some("Bearer abc"));

    // Two queries fire with the stored token, both come back 401
    let mut transport = RecordingTransport::default();
    transport.send_authorized(endpoints::customers::list(ORG), guard.authorization());
    transport.send_authorized(endpoints::services::list(ORG), guard.authorization());
    let paths: Vec<_> = transport.sent.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, ["/organizations/org_1/customers", "/organizations/org_1/services"]);
    assert_eq!(
        transport.authorizations,
        vec![Some("Bearer abc".to_string()), Some("Bearer abc".to_string())]
    );

    let redirects: Vec<_> = transport.sent.iter().filter_map(|_| guard.on_status(401)).collect();

    assert_eq!(redirects, vec![LOGIN_ROUTE]);
    assert!(guard.store().get(TOKEN_KEY).is_none());
    assert!(guard.store().get(USER_KEY).is_none());
    assert!(guard.authorization().is_none());
}

#[test]
fn test_login_stores_token_for_later_requests() {
    let guard = SessionGuard::new(MemorySessionStore::default());
    assert!(!guard.is_authenticated());
    guard.sign_in("jwt-token");
    assert_eq!(guard.authorization().as_deref(), Some("Bearer jwt-token"));
}
