use super::{join_url, reject, send};
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, Transport};
use crate::i18n::{tr, Locale, Msg};
use crate::models::{Article, CreateArticleRequest, Page};

pub trait ArticleRepository {
    /// Fetch one page of articles. No retry, no caching.
    fn get_all(&self, page: u32, size: u32) -> Result<Page<Article>>;

    fn get(&self, id: i64) -> Result<Article>;

    /// Publish a new article with the given bearer token
    fn create(&self, article: &CreateArticleRequest, token: &str) -> Result<Article>;

    fn delete(&self, id: i64, token: &str) -> Result<()>;
}

pub struct ApiArticleRepository {
    base_url: String,
    locale: Locale,
    transport: Box<dyn Transport>,
}

impl ApiArticleRepository {
    /// `api_url` is the API root; articles live under `{api_url}/articles`
    pub fn new(api_url: &str, locale: Locale, transport: Box<dyn Transport>) -> Self {
        Self {
            base_url: join_url(api_url, "articles"),
            locale,
            transport,
        }
    }
}

impl ArticleRepository for ApiArticleRepository {
    fn get_all(&self, page: u32, size: u32) -> Result<Page<Article>> {
        let url = format!("{}?page={}&size={}", self.base_url, page, size);
        let resp = send(self.transport.as_ref(), self.locale, &HttpRequest::get(url))?;
        if !resp.is_success() {
            return Err(ApiError::Rejected {
                status: resp.status,
                message: tr(self.locale, Msg::FetchArticlesFailed).to_string(),
            });
        }
        resp.json()
    }

    fn get(&self, id: i64) -> Result<Article> {
        let url = format!("{}/{}", self.base_url, id);
        let resp = send(self.transport.as_ref(), self.locale, &HttpRequest::get(url))?;
        match resp.status {
            s if (200..300).contains(&s) => resp.json(),
            404 => Err(ApiError::NotFound(
                tr(self.locale, Msg::ArticleNotFound).to_string(),
            )),
            status => Err(ApiError::Rejected {
                status,
                message: tr(self.locale, Msg::FetchArticleFailed).to_string(),
            }),
        }
    }

    fn create(&self, article: &CreateArticleRequest, token: &str) -> Result<Article> {
        let body = serde_json::to_value(article)
            .map_err(|e| ApiError::Decode(format!("Failed to encode article: {}", e)))?;
        let req = HttpRequest::post(self.base_url.clone(), body).bearer(token);
        let resp = send(self.transport.as_ref(), self.locale, &req)?;
        if !resp.is_success() {
            return Err(reject(self.locale, &resp, Msg::CreateArticleFailed));
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
        match resp.status {
            s if (200..300).contains(&s) => Ok(()),
            404 => Err(ApiError::NotFound(
                tr(self.locale, Msg::ArticleNotFound).to_string(),
            )),
            _ => Err(reject(self.locale, &resp, Msg::DeleteArticleFailed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::testing::{article_page_json, ScriptedTransport};

    fn repo(transport: &ScriptedTransport) -> ApiArticleRepository {
        ApiArticleRepository::new(
            "http://localhost:8080/api",
            Locale::En,
            Box::new(transport.clone()),
        )
    }

    #[test]
    fn test_get_all_builds_page_query() {
        let transport = ScriptedTransport::new();
        transport.respond_json(200, &article_page_json(0, 6, 6, 3));

        let page = repo(&transport).get_all(0, 6).unwrap();
        assert_eq!(page.content.len(), 6);
        assert!(!page.last);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(
            requests[0].url,
            "http://localhost:8080/api/articles?page=0&size=6"
        );
        assert!(requests[0].bearer.is_none());
    }

    #[test]
    fn test_get_all_failure_is_generic() {
        let transport = ScriptedTransport::new();
        transport.respond(503, "Service Unavailable");

        let err = repo(&transport).get_all(0, 6).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch articles");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_get_all_network_failure_is_localized() {
        let transport = ScriptedTransport::new();
        transport.fail("connection refused");

        let err = repo(&transport).get_all(0, 6).unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(err.to_string().starts_with("The server is unreachable"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_create_sends_bearer_and_body() {
        let transport = ScriptedTransport::new();
        let created = serde_json::to_value(crate::testing::article(42)).unwrap();
        transport.respond_json(201, &created);

        let req = CreateArticleRequest {
            title: "Clean Architecture".to_string(),
            content: "Layers".to_string(),
            image_url: Some("https://images.example.com/a.png".to_string()),
            status: None,
        };
        let article = repo(&transport).create(&req, "tok-123").unwrap();
        assert_eq!(article.id, 42);

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "http://localhost:8080/api/articles");
        assert_eq!(sent.bearer.as_deref(), Some("tok-123"));
        let body = sent.body.as_ref().unwrap();
        assert_eq!(body["title"], "Clean Architecture");
        assert_eq!(body["imageUrl"], "https://images.example.com/a.png");
    }

    #[test]
    fn test_create_unauthorized() {
        let transport = ScriptedTransport::new();
        transport.respond(401, "");

        let err = repo(&transport)
            .create(&CreateArticleRequest::default(), "expired")
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_create_rejected() {
        let transport = ScriptedTransport::new();
        transport.respond(400, r#"{"status":400,"message":"Validation failed"}"#);

        let err = repo(&transport)
            .create(&CreateArticleRequest::default(), "tok")
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to create article");
    }

    #[test]
    fn test_get_not_found() {
        let transport = ScriptedTransport::new();
        transport.respond(404, "");

        let err = repo(&transport).get(99).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(
            transport.requests()[0].url,
            "http://localhost:8080/api/articles/99"
        );
    }

    #[test]
    fn test_delete_accepts_no_content() {
        let transport = ScriptedTransport::new();
        transport.respond(204, "");

        repo(&transport).delete(3, "tok").unwrap();
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.bearer.as_deref(), Some("tok"));
    }
}
