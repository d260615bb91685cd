use super::articles::{card, sentinel};
use crate::app::App;
use crate::i18n::Msg;
use anyhow::Result;
use std::io::Write;

/// Landing page: hero, features, the article feed with its sentinel, call to action
pub fn render(app: &mut App, out: &mut dyn Write) -> Result<()> {
    writeln!(out)?;
    writeln!(out, " {}", app.t(Msg::HeroTitle))?;
    writeln!(out, " {}", app.t(Msg::HeroSubtitle))?;
    if !app.session.is_authenticated() {
        writeln!(
            out,
            "   {} (/articles)  ·  {} (/register)",
            app.t(Msg::SeeAllArticles),
            app.t(Msg::NavRegister)
        )?;
    }

    writeln!(out)?;
    writeln!(out, " {}", app.t(Msg::FeaturesTitle))?;
    for feature in [Msg::FeatureSimple, Msg::FeatureCommunity, Msg::FeatureFast] {
        writeln!(out, "   • {}", app.t(feature))?;
    }

    writeln!(out)?;
    writeln!(out, " {}", app.t(Msg::RecentArticles))?;
    match app.ensure_feed() {
        Ok(()) => {
            if app.feed.is_empty() {
                writeln!(out, "  {}", app.t(Msg::NoArticles))?;
            }
            for article in app.feed.items() {
                card(out, article)?;
            }
            sentinel(app, out, app.feed.has_next_page())?;
            writeln!(out, "   {} → /articles", app.t(Msg::SeeAllArticles))?;
        }
        Err(e) => {
            writeln!(out, "  {}", app.t(Msg::FeedLoadFailed))?;
            app.report(&e, out)?;
        }
    }

    if !app.session.is_authenticated() {
        writeln!(out)?;
        writeln!(out, " {}", app.t(Msg::CtaTitle))?;
        writeln!(out, " {} → /register", app.t(Msg::CtaSubtitle))?;
    }
    Ok(())
}
