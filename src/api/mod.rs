//! Repositories over the remote blog API.
//!
//! Each repository is a trait so views and stores can be driven by test
//! doubles, with an `Api*` implementation over any [`Transport`].

pub mod articles;
pub mod auth;
pub mod users;

pub use articles::{ApiArticleRepository, ArticleRepository};
pub use auth::{ApiAuthRepository, AuthRepository};
pub use users::{ApiUserRepository, UserRepository};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::i18n::{tr, Locale, Msg};

/// Send a request, replacing transport failure text with a localized message.
///
/// The underlying cause is kept in parentheses so it is not lost.
pub(crate) fn send(
    transport: &dyn Transport,
    locale: Locale,
    request: &HttpRequest,
) -> Result<HttpResponse, ApiError> {
    transport.send(request).map_err(|e| match e {
        ApiError::Network(detail) => ApiError::Network(format!(
            "{} ({})",
            tr(locale, Msg::NetworkUnavailable),
            detail
        )),
        other => other,
    })
}

/// Map an unsuccessful response on an authenticated call
pub(crate) fn reject(locale: Locale, resp: &HttpResponse, fallback: Msg) -> ApiError {
    match resp.status {
        401 | 403 => ApiError::Unauthorized(tr(locale, Msg::Unauthorized).to_string()),
        status => ApiError::Rejected {
            status,
            message: tr(locale, fallback).to_string(),
        },
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
