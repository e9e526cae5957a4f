use super::*;

#[test]
fn authorize_url_carries_flow_parameters() {
    let url = authorize_url("client-1", "https://app.example/auth/callback", "st-1", "n-1").unwrap();
    assert_eq!(url.host_str(), Some("accounts.google.com"));
    let pairs: Vec<(String, String)> = url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
    assert!(pairs.contains(&("client_id".to_owned(), "client-1".to_owned())));
    assert!(pairs.contains(&("redirect_uri".to_owned(), "https://app.example/auth/callback".to_owned())));
    assert!(pairs.contains(&("response_type".to_owned(), "id_token".to_owned())));
    assert!(pairs.contains(&("scope".to_owned(), "openid email profile".to_owned())));
    assert!(pairs.contains(&("state".to_owned(), "st-1".to_owned())));
    assert!(pairs.contains(&("nonce".to_owned(), "n-1".to_owned())));
}

#[test]
fn authorize_url_encodes_redirect() {
    let url = authorize_url("c", "https://app.example/cb?x=1", "s", "n").unwrap();
    assert!(url.as_str().contains("redirect_uri=https%3A%2F%2Fapp.example%2Fcb%3Fx%3D1"));
}

// =============================================================
// parse_redirect_fragment
// =============================================================

#[test]
fn fragment_with_token_and_matching_state() {
    let outcome = parse_redirect_fragment("#state=s1&id_token=eyJabc&authuser=0", "s1");
    assert_eq!(outcome, RedirectOutcome::IdToken("eyJabc".to_owned()));
}

#[test]
fn fragment_without_hash_prefix_parses() {
    let outcome = parse_redirect_fragment("id_token=tok&state=s1", "s1");
    assert_eq!(outcome.into_result().unwrap(), "tok");
}

#[test]
fn fragment_state_mismatch_fails() {
    let outcome = parse_redirect_fragment("#id_token=tok&state=other", "s1");
    assert_eq!(outcome, RedirectOutcome::Failed("state mismatch".to_owned()));
}

#[test]
fn fragment_access_denied_is_user_cancelled() {
    let err = parse_redirect_fragment("#error=access_denied&state=s1", "s1").into_result().unwrap_err();
    assert_eq!(err.code(), Some(code::USER_CANCELLED));
}

#[test]
fn fragment_other_error_is_internal() {
    let err = parse_redirect_fragment("#error=invalid_request&state=s1", "s1").into_result().unwrap_err();
    assert_eq!(err.code(), Some(code::INTERNAL_ERROR));
}

#[test]
fn fragment_missing_token_fails() {
    assert_eq!(
        parse_redirect_fragment("#state=s1", "s1"),
        RedirectOutcome::Failed("missing id_token".to_owned())
    );
}

#[cfg(not(feature = "csr"))]
#[test]
fn run_popup_outside_browser_is_refused() {
    let err = futures::executor::block_on(run_popup("https://x", "https://y", "s")).unwrap_err();
    assert_eq!(err.code(), Some(code::OPERATION_NOT_ALLOWED));
}
