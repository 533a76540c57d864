//! Redirects that work for both htmx requests and plain HTML form posts.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;

/// Redirect the client to `url` after a successful form submission.
///
/// htmx requests (`is_htmx_request == true`) get an `HX-Redirect` header,
/// everything else gets a standard `303 See Other`.
pub fn redirect_after_post(url: &str, is_htmx_request: bool) -> Response {
    if is_htmx_request {
        (HxRedirect(url.to_owned()), StatusCode::SEE_OTHER).into_response()
    } else {
        Redirect::to(url).into_response()
    }
}

#[cfg(test)]
mod redirect_tests {
    use axum::http::StatusCode;

    use crate::test_utils::{assert_hx_redirect, get_header};

    use super::redirect_after_post;

    #[test]
    fn htmx_request_gets_hx_redirect() {
        let response = redirect_after_post("/trips/1", true);

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/trips/1");
    }

    #[test]
    fn plain_request_gets_location() {
        let response = redirect_after_post("/", false);

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), "/");
    }
}
