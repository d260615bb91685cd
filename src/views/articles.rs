use crate::app::App;
use crate::i18n::Msg;
use crate::models::Article;
use anyhow::Result;
use std::io::Write;

const EXCERPT_CHARS: usize = 160;

pub fn card(out: &mut dyn Write, article: &Article) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "  #{}  {}", article.id, article.title)?;
    writeln!(out, "      {}", article.created_at.format("%d/%m/%Y"))?;
    if let Some(image) = &article.image_url {
        writeln!(out, "      [image] {}", image)?;
    }
    writeln!(out, "      {}", article.excerpt(EXCERPT_CHARS))?;
    writeln!(out, "      → /read {}", article.id)?;
    Ok(())
}

pub fn detail(out: &mut dyn Write, article: &Article) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", article.title)?;
    let mut meta = format!(
        "  #{} · {}",
        article.id,
        article.created_at.format("%d/%m/%Y %H:%M")
    );
    if article.updated_at != article.created_at {
        meta.push_str(&format!(" (maj {})", article.updated_at.format("%d/%m/%Y")));
    }
    if let Some(views) = article.views {
        meta.push_str(&format!(" · {} vues", views));
    }
    writeln!(out, "{}", meta)?;
    if let Some(image) = &article.image_url {
        writeln!(out, "  [image] {}", image)?;
    }
    writeln!(out)?;
    for line in article.content.lines() {
        writeln!(out, "  {}", line)?;
    }
    Ok(())
}

/// Sentinel line at the bottom of a listing
pub fn sentinel(app: &App, out: &mut dyn Write, has_more: bool) -> Result<()> {
    writeln!(out)?;
    if has_more {
        writeln!(out, "  ··· {}", app.t(Msg::FeedMore))?;
    } else {
        writeln!(out, "  {}", app.t(Msg::FeedEnd))?;
    }
    Ok(())
}

pub fn render(app: &mut App, out: &mut dyn Write) -> Result<()> {
    writeln!(out)?;
    writeln!(out, " {}", app.t(Msg::RecentArticles))?;
    writeln!(out, " {}", app.t(Msg::RecentArticlesSubtitle))?;

    if let Err(e) = app.ensure_feed() {
        writeln!(out)?;
        writeln!(out, "  {}", app.t(Msg::FeedLoadFailed))?;
        app.report(&e, out)?;
        return Ok(());
    }

    if app.feed.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", app.t(Msg::NoArticles))?;
        return Ok(());
    }

    for article in app.feed.items() {
        card(out, article)?;
    }
    sentinel(app, out, app.feed.has_next_page())
}
