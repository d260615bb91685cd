use super::{ask_required, Prompter};
use crate::activity::warn_on_error;
use crate::app::{track, App};
use crate::i18n::Msg;
use crate::models::{LoginRequest, RegisterRequest};
use anyhow::Result;
use std::io::Write;

/// Login form. Returns true once a session is established.
pub fn login(app: &mut App, out: &mut dyn Write, input: &mut dyn Prompter) -> Result<bool> {
    writeln!(out)?;
    writeln!(out, " {}", app.t(Msg::LoginTitle))?;

    let Some(email) = ask_required(input, app.t(Msg::FieldEmail))? else {
        writeln!(out, "  {}", app.t(Msg::Cancelled))?;
        return Ok(false);
    };
    let Some(password) = input.ask_secret(&format!("{}: ", app.t(Msg::FieldPassword)))? else {
        writeln!(out, "  {}", app.t(Msg::Cancelled))?;
        return Ok(false);
    };

    let credentials = LoginRequest { email, password };
    let result = track(&mut app.activity, app.verbose, "auth.login", || {
        app.session.login(&credentials)
    });

    match result {
        Ok(()) => {
            let role = app.session.session().map(|s| s.role.clone());
            warn_on_error(app.activity.login(&credentials.email, true, role.as_deref()));
            app.flush_session_errors();
            writeln!(out, "  ✓ {}", app.t(Msg::LoggedIn))?;
            Ok(true)
        }
        Err(e) => {
            warn_on_error(app.activity.login(&credentials.email, false, None));
            app.report(&e, out)?;
            Ok(false)
        }
    }
}

pub fn register(app: &mut App, out: &mut dyn Write, input: &mut dyn Prompter) -> Result<bool> {
    writeln!(out)?;
    writeln!(out, " {}", app.t(Msg::RegisterTitle))?;
    writeln!(out, " {}", app.t(Msg::RegisterSubtitle))?;

    let mut fields = Vec::with_capacity(4);
    for label in [
        Msg::FieldUsername,
        Msg::FieldFirstName,
        Msg::FieldLastName,
        Msg::FieldEmail,
    ] {
        match ask_required(input, app.t(label))? {
            Some(value) => fields.push(value),
            None => {
                writeln!(out, "  {}", app.t(Msg::Cancelled))?;
                return Ok(false);
            }
        }
    }
    let Some(password) = input.ask_secret(&format!("{}: ", app.t(Msg::FieldPassword)))? else {
        writeln!(out, "  {}", app.t(Msg::Cancelled))?;
        return Ok(false);
    };

    let mut fields = fields.into_iter();
    let data = RegisterRequest {
        username: fields.next().unwrap_or_default(),
        first_name: fields.next().unwrap_or_default(),
        last_name: fields.next().unwrap_or_default(),
        email: fields.next().unwrap_or_default(),
        password,
    };

    let result = track(&mut app.activity, app.verbose, "auth.register", || {
        app.session.register(&data)
    });

    match result {
        Ok(()) => {
            warn_on_error(app.activity.register(&data.email, true));
            app.flush_session_errors();
            writeln!(out, "  ✓ {}", app.t(Msg::Registered))?;
            Ok(true)
        }
        Err(e) => {
            warn_on_error(app.activity.register(&data.email, false));
            app.report(&e, out)?;
            Ok(false)
        }
    }
}
