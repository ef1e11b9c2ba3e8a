use super::*;

// =============================================================
// Native fallbacks
// =============================================================

#[cfg(not(feature = "csr"))]
#[test]
fn authorization_absent_without_browser_storage() {
    assert_eq!(authorization(&BrowserStore, "token"), None);
}

#[cfg(not(feature = "csr"))]
#[test]
fn native_build_reports_unavailable() {
    let api = HttpApi::new(&ClientConfig::default());
    let result = block_on(api.fetch_submission(Resource::Abstracts, "1"));
    assert_eq!(result, Err(ApiError::Unavailable));
}

#[test]
fn list_source_uses_configured_endpoint() {
    let api = HttpApi::new(&ClientConfig { api_base: "https://review.example.org/api/".into(), ..ClientConfig::default() });
    let source: ListSource<Submission> = api.list_source(api.endpoints().list(Resource::BestPapers), "status");
    assert_eq!(source.url, "https://review.example.org/api/best-papers");
    assert_eq!(source.filter_param, "status");
}

#[cfg(not(feature = "csr"))]
/// Drive a future that never actually suspends (native stubs resolve immediately).
fn block_on<F: std::future::Future>(future: F) -> F::Output {
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    let mut future = pin!(future);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
    }
}
