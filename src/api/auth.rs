use super::{join_url, send};
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, Transport};
use crate::i18n::{tr, Locale, Msg};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

/// Exchanges credentials for session material. Persisting the result is
/// the caller's job.
pub trait AuthRepository {
    fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse>;
    fn register(&self, data: &RegisterRequest) -> Result<AuthResponse>;
}

pub struct ApiAuthRepository {
    base_url: String,
    locale: Locale,
    transport: Box<dyn Transport>,
}

impl ApiAuthRepository {
    pub fn new(auth_url: &str, locale: Locale, transport: Box<dyn Transport>) -> Self {
        Self {
            base_url: auth_url.trim_end_matches('/').to_string(),
            locale,
            transport,
        }
    }

    fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<crate::http::HttpResponse> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Decode(format!("Failed to encode request: {}", e)))?;
        send(
            self.transport.as_ref(),
            self.locale,
            &HttpRequest::post(join_url(&self.base_url, path), body),
        )
    }
}

impl AuthRepository for ApiAuthRepository {
    fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let resp = self.post("login", credentials)?;
        match resp.status {
            s if (200..300).contains(&s) => resp.json(),
            401 => Err(ApiError::InvalidCredentials(
                tr(self.locale, Msg::InvalidCredentials).to_string(),
            )),
            status => Err(ApiError::Rejected {
                status,
                message: tr(self.locale, Msg::LoginFailed).to_string(),
            }),
        }
    }

    fn register(&self, data: &RegisterRequest) -> Result<AuthResponse> {
        let resp = self.post("register", data)?;
        match resp.status {
            s if (200..300).contains(&s) => resp.json(),
            400 => Err(ApiError::InvalidRegistration(
                tr(self.locale, Msg::InvalidRegistration).to_string(),
            )),
            status => Err(ApiError::Rejected {
                status,
                message: tr(self.locale, Msg::RegisterFailed).to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    fn repo(transport: &ScriptedTransport, locale: Locale) -> ApiAuthRepository {
        ApiAuthRepository::new(
            "http://localhost:8080/api/auth",
            locale,
            Box::new(transport.clone()),
        )
    }

    #[test]
    fn test_login_success() {
        let transport = ScriptedTransport::new();
        transport.respond_json(
            200,
            &json!({"token": "jwt", "email": "admin1@example.com", "role": "ROLE_ADMIN"}),
        );

        let creds = LoginRequest {
            email: "admin1@example.com".to_string(),
            password: "password".to_string(),
        };
        let resp = repo(&transport, Locale::Fr).login(&creds).unwrap();
        assert_eq!(resp.token, "jwt");
        assert_eq!(resp.role, "ROLE_ADMIN");

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "http://localhost:8080/api/auth/login");
        assert_eq!(
            sent.body,
            Some(json!({"email": "admin1@example.com", "password": "password"}))
        );
        assert!(sent.bearer.is_none());
    }

    #[test]
    fn test_login_401_is_invalid_credentials() {
        let transport = ScriptedTransport::new();
        transport.respond(401, "");

        let creds = LoginRequest {
            email: "a@b.com".to_string(),
            password: "wrong".to_string(),
        };
        let err = repo(&transport, Locale::Fr).login(&creds).unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials(_)));
        assert_eq!(err.to_string(), "Email ou mot de passe incorrect");
    }

    #[test]
    fn test_login_other_failure_is_generic() {
        let transport = ScriptedTransport::new();
        transport.respond(500, "");

        let err = repo(&transport, Locale::Fr)
            .login(&LoginRequest::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Une erreur est survenue lors de la connexion"
        );
    }

    #[test]
    fn test_register_400_is_invalid_registration() {
        let transport = ScriptedTransport::new();
        transport.respond(400, r#"{"status":400,"message":"Email already exists"}"#);

        let err = repo(&transport, Locale::En)
            .register(&RegisterRequest::default())
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRegistration(_)));
        assert_eq!(
            err.to_string(),
            "Invalid registration data or user already exists"
        );
        assert_eq!(
            transport.requests()[0].url,
            "http://localhost:8080/api/auth/register"
        );
    }

    #[test]
    fn test_register_success_returns_session() {
        let transport = ScriptedTransport::new();
        transport.respond_json(
            201,
            &json!({"token": "t", "email": "john@example.com", "role": "ROLE_USER"}),
        );

        let resp = repo(&transport, Locale::En)
            .register(&RegisterRequest {
                username: "johndoe".to_string(),
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                email: "john@example.com".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();
        assert_eq!(resp.email, "john@example.com");
        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body["username"], "johndoe");
        assert_eq!(body["firstName"], "John");
    }

    #[test]
    fn test_register_other_failure_is_generic() {
        let transport = ScriptedTransport::new();
        transport.respond(409, "");

        let err = repo(&transport, Locale::Fr)
            .register(&RegisterRequest::default())
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(
            err.to_string(),
            "Une erreur est survenue lors de l'inscription"
        );
    }
}
