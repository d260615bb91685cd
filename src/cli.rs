use crate::app::App;
use crate::views::Prompter;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;

/// Form input read through the REPL's line editor
pub struct LinePrompter {
    editor: DefaultEditor,
}

impl LinePrompter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    fn read(&mut self, label: &str, history: bool) -> Result<Option<String>> {
        match self.editor.readline(label) {
            Ok(line) => {
                if history && !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Prompter for LinePrompter {
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        self.read(label, true)
    }

    fn ask_secret(&mut self, label: &str) -> Result<Option<String>> {
        self.read(label, false)
    }
}

/// Render one page and exit
pub fn run_once(app: &mut App, path: &str) -> Result<()> {
    let mut input = LinePrompter::new()?;
    let mut out = std::io::stdout();
    app.navigate(path, &mut out, &mut input)?;
    out.flush()?;
    Ok(())
}

pub fn run_repl(app: &mut App) -> Result<()> {
    let mut input = LinePrompter::new()?;
    let mut out = std::io::stdout();

    println!("modernblog - type a path (/, /articles, /admin ...) or /help, /exit to quit");
    let start = app.current.path;
    app.navigate(start, &mut out, &mut input)?;

    loop {
        let prompt = format!("{}> ", app.current.path);
        match input.editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                input.editor.add_history_entry(line)?;

                match handle_command(app, line, &mut out, &mut input) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => eprintln!("Error: {:#}", e),
                }
                out.flush()?;
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Dispatch one REPL line. Returns true when the user asked to quit.
pub fn handle_command(
    app: &mut App,
    line: &str,
    out: &mut dyn Write,
    input: &mut dyn Prompter,
) -> Result<bool> {
    let parts: Vec<&str> = line.splitn(2, ' ').collect();
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match parts[0] {
        "/exit" | "/quit" => return Ok(true),
        "/help" => print_help(out)?,
        "/more" => app.more(out)?,
        "/read" => match parse_id(arg) {
            Some(id) => app.read(id, out)?,
            None => writeln!(out, "Usage: /read <id>")?,
        },
        "/new" => app.create_article(out, input)?,
        "/delete" => match parse_id(arg) {
            Some(id) => app.delete_article(id, out)?,
            None => writeln!(out, "Usage: /delete <id>")?,
        },
        "/delete-user" => match parse_id(arg) {
            Some(id) => app.delete_user(id, out)?,
            None => writeln!(out, "Usage: /delete-user <id>")?,
        },
        "/logout" => app.logout(out, input)?,
        "/menu" => app.toggle_menu(out)?,
        "/whoami" => app.whoami(out)?,
        "/reload" => {
            app.feed.invalidate();
            app.user_list.invalidate();
            let path = app.current.path;
            app.navigate(path, out, input)?;
        }
        "/config" => {
            let rendered = toml::to_string_pretty(&app.config)?;
            writeln!(out, "{}", rendered.trim_end())?;
            if app.activity.is_enabled() {
                writeln!(out, "# activity log: {}", app.activity.path.display())?;
            }
        }
        path if path.starts_with('/') => app.navigate(path, out, input)?,
        other => writeln!(out, "Unknown command: {} (try /help)", other)?,
    }
    Ok(false)
}

fn parse_id(arg: &str) -> Option<i64> {
    arg.trim_start_matches('#').parse().ok()
}

fn print_help(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Pages:")?;
    writeln!(out, "  /                   - home")?;
    writeln!(out, "  /articles           - all articles")?;
    writeln!(out, "  /login              - log in")?;
    writeln!(out, "  /register           - create an account")?;
    writeln!(out, "  /admin              - dashboard (admin only)")?;
    writeln!(out, "  /admin/articles     - manage articles (admin only)")?;
    writeln!(out, "  /admin/users        - manage users (admin only)")?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  /more               - load the next page of the listing")?;
    writeln!(out, "  /read <id>          - show one article")?;
    writeln!(out, "  /new                - write an article (admin)")?;
    writeln!(out, "  /delete <id>        - delete an article (admin)")?;
    writeln!(out, "  /delete-user <id>   - delete a user (admin)")?;
    writeln!(out, "  /logout             - end the session")?;
    writeln!(out, "  /menu               - toggle the navigation menu")?;
    writeln!(out, "  /whoami             - show the current account")?;
    writeln!(out, "  /reload             - refetch the current page")?;
    writeln!(out, "  /config             - show the effective configuration")?;
    writeln!(out, "  /help               - show commands")?;
    writeln!(out, "  /exit               - quit")?;
    Ok(())
}
