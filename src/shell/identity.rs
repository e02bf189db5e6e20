// The authenticated caller, as established by the authentication layer in front of us.
//
// That layer is trusted to strip any client supplied value of the header and
// set it to the id of the authenticated user.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode, request::Parts};

use crate::shared::core::primitives::UserId;

pub const CALLER_HEADER: &str = "x-authenticated-user-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub UserId);

impl Caller {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(CALLER_HEADER)?
            .to_str()
            .ok()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Caller(value.to_string()))
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Caller::from_headers(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod caller_identity_tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    #[rstest]
    #[case(Some("user-0001"), Some(Caller("user-0001".into())))]
    #[case(Some("  user-0001 "), Some(Caller("user-0001".into())))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn it_should_read_the_caller_from_the_trusted_header(
        #[case] value: Option<&'static str>,
        #[case] expected: Option<Caller>,
    ) {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(CALLER_HEADER, HeaderValue::from_static(value));
        }
        assert_eq!(Caller::from_headers(&headers), expected);
    }
}
