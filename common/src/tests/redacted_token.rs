use crate::RedactedToken;

/// **VALUE**: Verifies the session token never leaks through `{:?}` or `{}`.
///
/// **WHY THIS MATTERS**: The client logs request descriptors and error values at debug
/// level. A derived Debug on the token would print live credentials into log files.
#[test]
fn given_token_when_formatted_then_value_is_hidden() {
    let token = RedactedToken::new("tkn-0123456789");

    let debug = format!("{:?}", token);
    let display = format!("{}", token);

    assert!(!debug.contains("tkn-0123456789"));
    assert!(!display.contains("tkn-0123456789"));
    assert_eq!(debug, "RedactedToken([REDACTED])");
}

#[test]
fn given_token_when_accessed_explicitly_then_returns_raw_value() {
    let token = RedactedToken::from("abc");

    assert_eq!(token.as_str(), "abc");
    assert_eq!(token.len(), 3);
    assert!(!token.is_empty());
    assert!(RedactedToken::new("").is_empty());
}

/// **BUG THIS CATCHES**: Someone deriving `Serialize` so a token ends up inside an XML body.
#[test]
fn given_token_when_serialized_then_refuses() {
    #[derive(serde::Serialize)]
    #[serde(rename = "holder")]
    struct Holder {
        #[serde(rename = "@token")]
        token: RedactedToken,
    }

    let result = quick_xml::se::to_string(&Holder {
        token: RedactedToken::new("secret"),
    });

    let err = result.expect_err("token serialization must fail");
    assert!(err.to_string().contains("cannot be serialized"));
}
