//! Shared fixtures for unit tests.

use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::models::{Article, Page, User};
use chrono::NaiveDateTime;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Transport that replays queued responses and records every request
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Rc<RefCell<VecDeque<Result<HttpResponse>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
        self
    }

    pub fn respond_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.respond(status, body.to_string())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Network(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for {}", request.url))
    }
}

pub fn timestamp() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2026-01-12 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn article(id: i64) -> Article {
    Article {
        id,
        title: format!("Article {}", id),
        content: format!("Content of article {}", id),
        image_url: None,
        author_id: 1,
        created_at: timestamp(),
        updated_at: timestamp(),
        status: None,
        views: None,
        likes: None,
    }
}

pub fn user(id: i64, role: &str) -> User {
    User {
        id,
        username: format!("user{}", id),
        first_name: "Awa".to_string(),
        last_name: format!("Diop{}", id),
        email: format!("user{}@example.com", id),
        role: role.to_string(),
        created_at: Some(timestamp()),
    }
}

pub fn page<T>(content: Vec<T>, number: u32, size: u32, total_pages: u32) -> Page<T> {
    let count = content.len() as u32;
    Page {
        number_of_elements: count,
        empty: count == 0,
        content,
        number,
        size,
        total_pages,
        total_elements: u64::from(total_pages.saturating_sub(1) * size + count),
        first: number == 0,
        last: number + 1 >= total_pages,
    }
}

/// Page of articles `number*size+1 ..` with `count` entries
pub fn article_page(number: u32, size: u32, count: u32, total_pages: u32) -> Page<Article> {
    let start = i64::from(number * size) + 1;
    let items = (0..i64::from(count)).map(|i| article(start + i)).collect();
    page(items, number, size, total_pages)
}

pub fn article_page_json(number: u32, size: u32, count: u32, total_pages: u32) -> serde_json::Value {
    serde_json::to_value(article_page(number, size, count, total_pages)).unwrap()
}
