use crate::app::App;
use crate::i18n::Msg;
use crate::routes::View;
use anyhow::Result;
use std::io::Write;

const RULE: &str = "────────────────────────────────────────────────────────────";

fn nav_item(app: &App, label: &str, path: &str) -> String {
    if app.current.path == path {
        format!("[{}]", label)
    } else {
        label.to_string()
    }
}

pub fn header(app: &App, out: &mut dyn Write) -> Result<()> {
    let mut links = vec![
        nav_item(app, app.t(Msg::NavHome), "/"),
        nav_item(app, app.t(Msg::NavArticles), "/articles"),
    ];
    if app.session.is_admin() {
        links.push(nav_item(app, app.t(Msg::NavAdmin), "/admin"));
    }

    let account = match app.session.session() {
        Some(session) => format!("{} · {}", session.email, app.t(Msg::NavLogout)),
        None => format!("{} · {}", app.t(Msg::NavLogin), app.t(Msg::NavRegister)),
    };

    writeln!(out, "{}", RULE)?;
    writeln!(out, " ModernBlog   {}   |   {}", links.join("  "), account)?;
    writeln!(out, "{}", RULE)?;

    if app.ui.is_menu_open() {
        menu(app, out)?;
    }
    Ok(())
}

/// Expanded navigation with the command for each entry
pub fn menu(app: &App, out: &mut dyn Write) -> Result<()> {
    let mut entries = vec![
        ("/", app.t(Msg::NavHome)),
        ("/articles", app.t(Msg::NavArticles)),
    ];
    if app.session.is_admin() {
        entries.push(("/admin", app.t(Msg::NavAdmin)));
        entries.push(("/admin/articles", app.t(Msg::AdminArticlesTitle)));
        entries.push(("/admin/users", app.t(Msg::AdminUsersTitle)));
    }
    if app.session.is_authenticated() {
        entries.push(("/logout", app.t(Msg::NavLogout)));
    } else {
        entries.push(("/login", app.t(Msg::NavLogin)));
        entries.push(("/register", app.t(Msg::NavRegister)));
    }

    for (path, label) in entries {
        writeln!(out, "   {:<18} {}", path, label)?;
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

pub fn footer(app: &App, out: &mut dyn Write) -> Result<()> {
    // Admin pages use the sidebar layout and have no public footer
    if matches!(
        app.current.view,
        View::AdminDashboard | View::AdminArticles | View::AdminUsers
    ) {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, " ModernBlog · {}", app.t(Msg::FooterTagline))?;
    Ok(())
}

/// Sidebar entries of the admin area
pub fn admin_nav(app: &App, out: &mut dyn Write) -> Result<()> {
    let items = [
        ("/admin", "Dashboard"),
        ("/admin/articles", app.t(Msg::AdminArticlesTitle)),
        ("/admin/users", app.t(Msg::AdminUsersTitle)),
        ("/logout", app.t(Msg::NavLogout)),
    ];
    let rendered: Vec<String> = items
        .iter()
        .map(|(path, label)| {
            if app.current.path == *path {
                format!("> {} ({})", label, path)
            } else {
                format!("{} ({})", label, path)
            }
        })
        .collect();
    writeln!(out, " {}", rendered.join("  ·  "))?;
    writeln!(out)?;
    Ok(())
}
