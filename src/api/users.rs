use super::{join_url, reject, send};
use crate::error::Result;
use crate::http::{HttpRequest, Transport};
use crate::i18n::{Locale, Msg};
use crate::models::{Page, User};

/// Account administration; every call needs an admin bearer token
pub trait UserRepository {
    fn list(&self, page: u32, size: u32, token: &str) -> Result<Page<User>>;
    fn delete(&self, id: i64, token: &str) -> Result<()>;
}

pub struct ApiUserRepository {
    base_url: String,
    locale: Locale,
    transport: Box<dyn Transport>,
}

impl ApiUserRepository {
    pub fn new(api_url: &str, locale: Locale, transport: Box<dyn Transport>) -> Self {
        Self {
            base_url: join_url(api_url, "users"),
            locale,
            transport,
        }
    }
}

impl UserRepository for ApiUserRepository {
    fn list(&self, page: u32, size: u32, token: &str) -> Result<Page<User>> {
        let url = format!("{}?page={}&size={}", self.base_url, page, size);
        let resp = send(
            self.transport.as_ref(),
            self.locale,
            &HttpRequest::get(url).bearer(token),
        )?;
        if !resp.is_success() {
            return Err(reject(self.locale, &resp, Msg::FetchUsersFailed));
        }
        resp.json()
    }

    fn delete(&self, id: i64, token: &str) -> Result<()> {
        let url = format!("{}/{}", self.base_url, id);
        let resp = send(
            self.transport.as_ref(),
            self.locale,
            &HttpRequest::delete(url).bearer(token),
        )?;
        if !resp.is_success() {
            return Err(reject(self.locale, &resp, Msg::DeleteUserFailed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::testing::{page, user, ScriptedTransport};

    fn repo(transport: &ScriptedTransport) -> ApiUserRepository {
        ApiUserRepository::new("http://localhost:8080/api", Locale::En, Box::new(transport.clone()))
    }

    #[test]
    fn test_list_users() {
        let transport = ScriptedTransport::new();
        let body = serde_json::to_value(page(
            vec![user(1, "ROLE_ADMIN"), user(2, "ROLE_USER")],
            0,
            10,
            1,
        ))
        .unwrap();
        transport.respond_json(200, &body);

        let users = repo(&transport).list(0, 10, "admin-token").unwrap();
        assert_eq!(users.content.len(), 2);
        assert!(users.last);

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "http://localhost:8080/api/users?page=0&size=10");
        assert_eq!(sent.bearer.as_deref(), Some("admin-token"));
    }

    #[test]
    fn test_list_forbidden() {
        let transport = ScriptedTransport::new();
        transport.respond(403, "");

        let err = repo(&transport).list(0, 10, "user-token").unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_delete_user() {
        let transport = ScriptedTransport::new();
        transport.respond(204, "").respond(500, "");

        let users = repo(&transport);
        users.delete(5, "tok").unwrap();
        let err = users.delete(6, "tok").unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete user");

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(requests[0].url, "http://localhost:8080/api/users/5");
    }
}
