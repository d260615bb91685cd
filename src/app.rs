//! Application state shared by every view and command: configuration,
//! session, transient UI flags, repositories and the loaded listings.

use crate::activity::{warn_on_error, ActivityLog};
use crate::api::{ArticleRepository, UserRepository};
use crate::config::Config;
use crate::error::ApiError;
use crate::feed::{FeedState, FetchOutcome, Paginated};
use crate::i18n::{tr, Msg};
use crate::models::{Article, ArticleStatus, CreateArticleRequest, User};
use crate::routes::{self, Access, Route, View, HOME, ROUTES};
use crate::session::SessionStore;
use crate::ui::UiState;
use crate::views::{self, admin, articles, auth, home, layout, Prompter};
use anyhow::Result;
use std::io::Write;
use std::time::Instant;

pub struct App {
    pub config: Config,
    pub session: SessionStore,
    pub ui: UiState,
    pub articles: Box<dyn ArticleRepository>,
    pub users: Box<dyn UserRepository>,
    pub feed: Paginated<Article>,
    pub user_list: Paginated<User>,
    pub activity: ActivityLog,
    pub current: &'static Route,
    pub verbose: bool,
}

/// Run one repository call, timing it into the activity log
pub fn track<T>(
    log: &mut ActivityLog,
    verbose: bool,
    action: &str,
    f: impl FnOnce() -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let start = Instant::now();
    let result = f();
    let duration_ms = start.elapsed().as_millis() as u64;

    let status = result.as_ref().err().and_then(|e| e.status());
    let error = result.as_ref().err().map(|e| e.to_string());
    if verbose {
        match &error {
            None => eprintln!("[VERBOSE] {} ok ({}ms)", action, duration_ms),
            Some(e) => eprintln!("[VERBOSE] {} failed ({}ms): {}", action, duration_ms, e),
        }
    }
    warn_on_error(log.request(action, status, duration_ms, error.as_deref()));
    result
}

impl App {
    pub fn new(
        config: Config,
        session: SessionStore,
        articles: Box<dyn ArticleRepository>,
        users: Box<dyn UserRepository>,
        activity: ActivityLog,
        verbose: bool,
    ) -> Self {
        let page_size = config.page_size;
        let mut app = Self {
            config,
            session,
            ui: UiState::default(),
            articles,
            users,
            feed: Paginated::new(page_size),
            user_list: Paginated::new(page_size),
            activity,
            current: &ROUTES[0],
            verbose,
        };
        app.flush_session_errors();
        app
    }

    pub fn t(&self, msg: Msg) -> &'static str {
        tr(self.config.locale, msg)
    }

    /// Resolve `path`, run the guard, and render whatever view it lands on
    pub fn navigate(
        &mut self,
        path: &str,
        out: &mut dyn Write,
        input: &mut dyn Prompter,
    ) -> Result<()> {
        let Some(route) = routes::resolve(path) else {
            writeln!(out, "  {}: {}", self.t(Msg::UnknownPage), path)?;
            return Ok(());
        };
        self.ui.close_menu();

        match routes::guard(route, self.session.capabilities()) {
            Access::Granted => {
                warn_on_error(self.activity.navigate(route.path, None));
                self.current = route;
            }
            Access::Redirect(target) => {
                warn_on_error(self.activity.navigate(route.path, Some(target)));
                let reason = if self.session.is_authenticated() {
                    Msg::AdminRequired
                } else {
                    Msg::LoginRequired
                };
                writeln!(out, "  {}", self.t(reason))?;
                let Some(redirect) = routes::resolve(target) else {
                    return Ok(());
                };
                self.current = redirect;
            }
        }
        self.render(out, input)
    }

    /// Draw the current route inside the page chrome
    pub fn render(&mut self, out: &mut dyn Write, input: &mut dyn Prompter) -> Result<()> {
        layout::header(self, out)?;
        match self.current.view {
            View::Home => home::render(self, out)?,
            View::Articles => articles::render(self, out)?,
            View::Login => {
                if auth::login(self, out, input)? {
                    return self.navigate(HOME, out, input);
                }
            }
            View::Register => {
                if auth::register(self, out, input)? {
                    return self.navigate(HOME, out, input);
                }
            }
            View::AdminDashboard => admin::dashboard(self, out)?,
            View::AdminArticles => admin::articles(self, out)?,
            View::AdminUsers => admin::users(self, out)?,
        }
        layout::footer(self, out)
    }

    /// Load the first page of articles unless a listing is already present
    pub fn ensure_feed(&mut self) -> Result<(), ApiError> {
        if matches!(self.feed.state(), FeedState::Idle | FeedState::Failed(_)) {
            self.feed.load_first(|page, size| {
                track(&mut self.activity, self.verbose, "articles.get_all", || {
                    self.articles.get_all(page, size)
                })
            })?;
        }
        Ok(())
    }

    pub fn ensure_users(&mut self) -> Result<(), ApiError> {
        if matches!(self.user_list.state(), FeedState::Idle | FeedState::Failed(_)) {
            let token = self.admin_token()?;
            self.user_list.load_first(|page, size| {
                track(&mut self.activity, self.verbose, "users.list", || {
                    self.users.list(page, size, &token)
                })
            })?;
        }
        Ok(())
    }

    /// Token for admin-only calls; refused locally for non-admins
    pub fn admin_token(&self) -> Result<String, ApiError> {
        match self.session.token() {
            Some(token) if self.session.is_admin() => Ok(token.to_string()),
            _ => Err(ApiError::AccessDenied(self.t(Msg::AdminRequired).to_string())),
        }
    }

    /// Show an error verbatim. A bearer token refused by the server ends
    /// the session.
    pub fn report(&mut self, err: &ApiError, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "  ✗ {}", err)?;
        if err.is_unauthorized() && self.session.is_authenticated() {
            self.session.logout();
            warn_on_error(self.activity.logout("token_rejected"));
            self.flush_session_errors();
            self.user_list.invalidate();
            writeln!(out, "  {}", self.t(Msg::SessionExpired))?;
            self.leave_forbidden_route();
        }
        Ok(())
    }

    /// Move off the current route when the guard no longer grants it
    fn leave_forbidden_route(&mut self) {
        let Access::Redirect(target) = routes::guard(self.current, self.session.capabilities())
        else {
            return;
        };
        if let Some(route) = routes::resolve(target) {
            warn_on_error(self.activity.navigate(self.current.path, Some(target)));
            self.current = route;
        }
    }

    /// Surface storage problems recorded by the session store
    pub fn flush_session_errors(&mut self) {
        for message in self.session.take_errors() {
            eprintln!("Warning: {}", message);
            warn_on_error(self.activity.warning(&message));
        }
    }

    /// Next page of the listing on screen. The sentinel only exists on
    /// home and the listing views; anywhere else nothing is fetched.
    pub fn more(&mut self, out: &mut dyn Write) -> Result<()> {
        if routes::guard(self.current, self.session.capabilities()) != Access::Granted {
            writeln!(out, "  {}", self.t(Msg::NothingToLoad))?;
            return Ok(());
        }
        if self.current.view == View::AdminUsers {
            return self.more_users(out);
        }

        let visible = matches!(
            self.current.view,
            View::Home | View::Articles | View::AdminArticles
        );
        let before = self.feed.len();
        let outcome = self.feed.on_sentinel(visible, |page, size| {
            track(&mut self.activity, self.verbose, "articles.get_all", || {
                self.articles.get_all(page, size)
            })
        });

        if self.verbose {
            eprintln!(
                "[VERBOSE] feed: {} items in {} page(s), fetching: {}",
                self.feed.len(),
                self.feed.pages_loaded(),
                self.feed.is_fetching_next()
            );
        }

        match outcome {
            Ok(FetchOutcome::Fetched(_)) => {
                let added: Vec<Article> = self.feed.items().skip(before).cloned().collect();
                for article in &added {
                    if self.current.view == View::AdminArticles {
                        admin::article_row(out, article)?;
                    } else {
                        articles::card(out, article)?;
                    }
                }
                articles::sentinel(self, out, self.feed.has_next_page())
            }
            Ok(FetchOutcome::Exhausted) => {
                writeln!(out, "  {}", self.t(Msg::FeedEnd))?;
                Ok(())
            }
            Ok(FetchOutcome::Suppressed) => {
                writeln!(out, "  {}", self.t(Msg::NothingToLoad))?;
                Ok(())
            }
            Err(e) => {
                writeln!(out, "  {}", self.t(Msg::FeedLoadFailed))?;
                self.report(&e, out)
            }
        }
    }

    fn more_users(&mut self, out: &mut dyn Write) -> Result<()> {
        let token = match self.admin_token() {
            Ok(token) => token,
            Err(e) => return self.report(&e, out),
        };
        let before = self.user_list.len();
        let outcome = self.user_list.fetch_more(|page, size| {
            track(&mut self.activity, self.verbose, "users.list", || {
                self.users.list(page, size, &token)
            })
        });

        match outcome {
            Ok(FetchOutcome::Fetched(_)) => {
                let added: Vec<User> = self.user_list.items().skip(before).cloned().collect();
                for user in &added {
                    admin::user_row(self, out, user)?;
                }
                articles::sentinel(self, out, self.user_list.has_next_page())
            }
            Ok(FetchOutcome::Exhausted) => {
                writeln!(out, "  {}", self.t(Msg::FeedEnd))?;
                Ok(())
            }
            Ok(FetchOutcome::Suppressed) => {
                writeln!(out, "  {}", self.t(Msg::NothingToLoad))?;
                Ok(())
            }
            Err(e) => self.report(&e, out),
        }
    }

    pub fn read(&mut self, id: i64, out: &mut dyn Write) -> Result<()> {
        let result = track(&mut self.activity, self.verbose, "articles.get", || {
            self.articles.get(id)
        });
        match result {
            Ok(article) => articles::detail(out, &article),
            Err(e) => self.report(&e, out),
        }
    }

    /// Interactive article form; the listing reloads from page 0 afterwards
    pub fn create_article(&mut self, out: &mut dyn Write, input: &mut dyn Prompter) -> Result<()> {
        let token = match self.admin_token() {
            Ok(token) => token,
            Err(e) => return self.report(&e, out),
        };

        let Some(request) = self.article_form(input)? else {
            writeln!(out, "  {}", self.t(Msg::Cancelled))?;
            return Ok(());
        };

        let result = track(&mut self.activity, self.verbose, "articles.create", || {
            self.articles.create(&request, &token)
        });
        match result {
            Ok(article) => {
                self.feed.invalidate();
                writeln!(
                    out,
                    "  ✓ {} #{} {}",
                    self.t(Msg::ArticlePublished),
                    article.id,
                    article.title
                )?;
                Ok(())
            }
            Err(e) => self.report(&e, out),
        }
    }

    fn article_form(&self, input: &mut dyn Prompter) -> Result<Option<CreateArticleRequest>> {
        let Some(title) = views::ask_required(input, self.t(Msg::FieldTitle))? else {
            return Ok(None);
        };
        let Some(image_url) = views::ask_optional(input, self.t(Msg::FieldImageUrl))? else {
            return Ok(None);
        };
        let Some(content) = views::ask_multiline(input, self.t(Msg::FieldContent))? else {
            return Ok(None);
        };
        let status = loop {
            match views::ask_optional(input, self.t(Msg::FieldStatus))? {
                None => return Ok(None),
                Some(None) => break ArticleStatus::Draft,
                Some(Some(answer)) => {
                    if let Some(status) = ArticleStatus::from_str(&answer) {
                        break status;
                    }
                }
            }
        };

        Ok(Some(CreateArticleRequest {
            title,
            content,
            image_url,
            status: Some(status),
        }))
    }

    pub fn delete_article(&mut self, id: i64, out: &mut dyn Write) -> Result<()> {
        let token = match self.admin_token() {
            Ok(token) => token,
            Err(e) => return self.report(&e, out),
        };
        let result = track(&mut self.activity, self.verbose, "articles.delete", || {
            self.articles.delete(id, &token)
        });
        match result {
            Ok(()) => {
                self.feed.invalidate();
                writeln!(out, "  ✓ {} (#{})", self.t(Msg::ArticleDeleted), id)?;
                Ok(())
            }
            Err(e) => self.report(&e, out),
        }
    }

    pub fn delete_user(&mut self, id: i64, out: &mut dyn Write) -> Result<()> {
        let token = match self.admin_token() {
            Ok(token) => token,
            Err(e) => return self.report(&e, out),
        };
        let result = track(&mut self.activity, self.verbose, "users.delete", || {
            self.users.delete(id, &token)
        });
        match result {
            Ok(()) => {
                self.user_list.invalidate();
                writeln!(out, "  ✓ {} (#{})", self.t(Msg::UserDeleted), id)?;
                Ok(())
            }
            Err(e) => self.report(&e, out),
        }
    }

    /// Clear the session; leaving an admin page sends the visitor home
    pub fn logout(&mut self, out: &mut dyn Write, input: &mut dyn Prompter) -> Result<()> {
        if !self.session.is_authenticated() {
            writeln!(out, "  {}", self.t(Msg::LoginRequired))?;
            return Ok(());
        }
        self.session.logout();
        self.ui.close_menu();
        warn_on_error(self.activity.logout("user"));
        self.flush_session_errors();
        self.user_list.invalidate();
        writeln!(out, "  {}", self.t(Msg::LoggedOut))?;

        if self.current.capability == routes::Capability::Admin {
            self.navigate(HOME, out, input)?;
        }
        Ok(())
    }

    pub fn toggle_menu(&mut self, out: &mut dyn Write) -> Result<()> {
        self.ui.toggle_menu();
        layout::header(self, out)
    }

    pub fn whoami(&self, out: &mut dyn Write) -> Result<()> {
        match self.session.session() {
            Some(session) => {
                let role = if self.session.is_admin() {
                    self.t(Msg::RoleAdmin)
                } else {
                    self.t(Msg::RoleUser)
                };
                writeln!(out, "  {} ({}, {})", session.email, session.role, role)?;
            }
            None => writeln!(out, "  {}", self.t(Msg::Anonymous))?,
        }
        Ok(())
    }
}
