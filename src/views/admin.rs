//! Admin area: dashboard, article management, user management.
//!
//! The route guard keeps non-admins out, so these views assume an admin
//! session but still surface a server-side refusal.

use super::articles::sentinel;
use super::layout::admin_nav;
use super::truncate;
use crate::app::{track, App};
use crate::i18n::Msg;
use crate::models::{Article, User};
use anyhow::Result;
use std::io::Write;

const RECENT: u32 = 5;

pub fn article_row(out: &mut dyn Write, article: &Article) -> Result<()> {
    let status = article.status.map(|s| s.as_str()).unwrap_or("-");
    let views = article
        .views
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string());
    writeln!(
        out,
        "  #{:<5} {:<42} {:<10} {}  {:>6}",
        article.id,
        truncate(&article.title, 42),
        status,
        article.created_at.format("%d/%m/%Y"),
        views
    )?;
    Ok(())
}

pub fn user_row(app: &App, out: &mut dyn Write, user: &User) -> Result<()> {
    let role = if user.role == app.config.admin_role {
        app.t(Msg::RoleAdmin)
    } else {
        app.t(Msg::RoleUser)
    };
    let joined = user
        .created_at
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string());
    writeln!(
        out,
        "  #{:<5} {:<24} {:<32} {:<12} {}",
        user.id,
        truncate(&user.display_name(), 24),
        truncate(&user.email, 32),
        role,
        joined
    )?;
    Ok(())
}

pub fn dashboard(app: &mut App, out: &mut dyn Write) -> Result<()> {
    writeln!(out)?;
    admin_nav(app, out)?;
    writeln!(out, " {}", app.t(Msg::AdminTitle))?;
    writeln!(out, " {}", app.t(Msg::AdminSubtitle))?;
    writeln!(out, "   /new → +")?;

    let token = match app.admin_token() {
        Ok(token) => token,
        Err(e) => return app.report(&e, out),
    };

    let recent = track(&mut app.activity, app.verbose, "articles.get_all", || {
        app.articles.get_all(0, RECENT)
    });
    let users = track(&mut app.activity, app.verbose, "users.list", || {
        app.users.list(0, 1, &token)
    });

    let article_total = recent
        .as_ref()
        .map(|p| p.total_elements.to_string())
        .unwrap_or_else(|_| "?".to_string());
    let user_total = users
        .as_ref()
        .map(|p| p.total_elements.to_string())
        .unwrap_or_else(|_| "?".to_string());

    writeln!(out)?;
    writeln!(out, "   {:<16} {}", app.t(Msg::StatArticles), article_total)?;
    writeln!(out, "   {:<16} {}", app.t(Msg::StatUsers), user_total)?;

    match recent {
        Ok(page) => {
            writeln!(out)?;
            writeln!(out, " {}", app.t(Msg::RecentArticles))?;
            if page.content.is_empty() {
                writeln!(out, "  {}", app.t(Msg::NoArticles))?;
            }
            for article in &page.content {
                article_row(out, article)?;
            }
        }
        Err(e) => app.report(&e, out)?,
    }
    if let Err(e) = users {
        app.report(&e, out)?;
    }
    Ok(())
}

pub fn articles(app: &mut App, out: &mut dyn Write) -> Result<()> {
    writeln!(out)?;
    admin_nav(app, out)?;
    writeln!(out, " {}", app.t(Msg::AdminArticlesTitle))?;
    writeln!(out, "   /new  ·  /delete <id>  ·  /read <id>")?;
    writeln!(out)?;

    if let Err(e) = app.ensure_feed() {
        return app.report(&e, out);
    }
    if app.feed.is_empty() {
        writeln!(out, "  {}", app.t(Msg::NoArticles))?;
        return Ok(());
    }
    if let Some(total) = app.feed.total_elements() {
        writeln!(out, "  {}: {}", app.t(Msg::StatArticles), total)?;
    }
    for article in app.feed.items() {
        article_row(out, article)?;
    }
    sentinel(app, out, app.feed.has_next_page())
}

pub fn users(app: &mut App, out: &mut dyn Write) -> Result<()> {
    writeln!(out)?;
    admin_nav(app, out)?;
    writeln!(out, " {}", app.t(Msg::AdminUsersTitle))?;
    writeln!(out, "   /delete-user <id>")?;
    writeln!(out)?;

    if let Err(e) = app.ensure_users() {
        return app.report(&e, out);
    }
    if app.user_list.is_empty() {
        writeln!(out, "  {}", app.t(Msg::NoUsers))?;
        return Ok(());
    }
    let users: Vec<User> = app.user_list.items().cloned().collect();
    for user in &users {
        user_row(app, out, user)?;
    }
    sentinel(app, out, app.user_list.has_next_page())
}
