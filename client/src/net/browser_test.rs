use super::*;
use session::http::Method;

#[tokio::test]
async fn transport_is_unavailable_outside_browser() {
    let request = HttpRequest::new(Method::Get, "http://localhost:4000/api/trips");
    let err = BrowserTransport.send(request).await.unwrap_err();
    assert_eq!(err, "not available on server");
}

#[test]
fn local_storage_is_empty_outside_browser() {
    let storage = browser_storage();
    storage.set("authToken", "tok");
    assert_eq!(storage.get("authToken"), None);
    storage.remove("authToken");
}

#[test]
fn navigator_outside_browser_is_a_no_op() {
    BrowserNavigator.hard_navigate("/login");
}

#[test]
fn clock_reports_epoch_millis() {
    let now = browser_clock()();
    // 2020-01-01T00:00:00Z
    assert!(now > 1_577_836_800_000);
}

#[test]
fn failed_browser_calls_are_reported() {
    assert!(warn_on_err::<String>("localStorage removal of authToken", Ok(())));
    assert!(!warn_on_err("localStorage removal of authToken", Err("QuotaExceededError")));
    assert!(!warn_on_err("navigation to /login", Err("SecurityError".to_owned())));
}
