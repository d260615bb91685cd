mod activity;
mod api;
mod app;
mod cli;
mod config;
mod error;
mod feed;
mod http;
mod i18n;
mod models;
mod routes;
mod session;
mod storage;
#[cfg(test)]
mod testing;
mod ui;
mod views;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "modernblog", about = "Terminal client for the ModernBlog API")]
pub struct Args {
    #[arg(long, env = "BLOG_API_URL", help = "API root (articles, users)")]
    pub api_url: Option<String>,

    #[arg(long, env = "BLOG_AUTH_URL", help = "Authentication endpoint root")]
    pub auth_url: Option<String>,

    #[arg(long, help = "Config file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Session storage file (default: ~/.modernblog/storage.json)")]
    pub storage: Option<PathBuf>,

    #[arg(long, help = "Keep the session in memory only")]
    pub no_persist: bool,

    #[arg(long, value_name = "LOCALE", help = "UI language: fr, en")]
    pub locale: Option<String>,

    #[arg(long, value_name = "N", help = "Articles per page")]
    pub page_size: Option<u32>,

    #[arg(long, value_name = "PATH", help = "Render one page (e.g. /articles) and exit")]
    pub open: Option<String>,

    #[arg(long, help = "Activity logs directory")]
    pub activity_dir: Option<PathBuf>,

    #[arg(long, help = "Verbose output (print API calls)")]
    pub verbose: bool,

    #[arg(long, help = "Debug output (print HTTP details and settings)")]
    pub debug: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let root = std::env::current_dir()?;

    let mut cfg = if let Some(config_path) = &args.config {
        config::Config::load_from(config_path)?
    } else {
        config::Config::load(&root)?
    };

    if let Some(api_url) = &args.api_url {
        cfg.api_url = api_url.clone();
    }
    if let Some(auth_url) = &args.auth_url {
        cfg.auth_url = auth_url.clone();
    }
    if let Some(page_size) = args.page_size {
        cfg.page_size = page_size;
    }
    if let Some(locale) = &args.locale {
        cfg.locale = i18n::Locale::from_str(locale)
            .ok_or_else(|| anyhow::anyhow!("Unknown locale: {}. Use: fr, en", locale))?;
    }
    if let Some(storage) = &args.storage {
        cfg.storage_path = Some(storage.clone());
    }
    if let Some(dir) = &args.activity_dir {
        cfg.activity.dir = Some(dir.clone());
    }

    if let Err(errors) = cfg.validate() {
        for e in &errors {
            eprintln!("Config error {}", e);
        }
        anyhow::bail!("invalid configuration ({} error(s))", errors.len());
    }

    if args.debug {
        eprintln!("[DEBUG] API: {}", cfg.api_url);
        eprintln!("[DEBUG] Auth: {}", cfg.auth_url);
        eprintln!("[DEBUG] Page size: {}", cfg.page_size);
        eprintln!("[DEBUG] Locale: {}", cfg.locale.as_str());
    }

    let timeout = Duration::from_millis(cfg.timeout_ms);
    let transport = || Box::new(http::UreqTransport::new(timeout, args.debug));

    let store: Box<dyn storage::KeyValueStorage> = if args.no_persist {
        Box::new(storage::MemoryStorage::new())
    } else {
        let path = cfg
            .storage_path
            .clone()
            .unwrap_or_else(storage::FileStorage::default_path);
        let file = storage::FileStorage::new(&path);
        if args.debug {
            eprintln!("[DEBUG] Session storage: {}", file.path().display());
        }
        Box::new(file)
    };

    let session = session::SessionStore::hydrate(
        Box::new(api::ApiAuthRepository::new(
            &cfg.auth_url,
            cfg.locale,
            transport(),
        )),
        store,
        &cfg.admin_role,
    );

    let run_id = uuid::Uuid::new_v4().to_string();
    let mut activity = if cfg.activity.enabled {
        let dir = cfg.activity_dir(&root);
        std::fs::create_dir_all(&dir)?;
        activity::ActivityLog::new(&dir.join(format!("{}.jsonl", run_id)), &run_id)?
    } else {
        activity::ActivityLog::disabled(&run_id)
    };
    activity::warn_on_error(activity.run_start(&cfg.api_url, &cfg.auth_url));

    let articles = Box::new(api::ApiArticleRepository::new(
        &cfg.api_url,
        cfg.locale,
        transport(),
    ));
    let users = Box::new(api::ApiUserRepository::new(
        &cfg.api_url,
        cfg.locale,
        transport(),
    ));

    let mut app = app::App::new(cfg, session, articles, users, activity, args.verbose);

    if let Some(path) = &args.open {
        cli::run_once(&mut app, path)
    } else {
        cli::run_repl(&mut app)
    }
}
