//! linkshelf: terminal client for a personal bookmark manager.
//!
//! Entry point: parses the command line, wires the [`App`] context and runs
//! one subcommand (or the polling `watch` loop).

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use linkshelf::app::{App, AppConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use linkshelf::services::notifier::Notifier;
use linkshelf::types::bookmark::BookmarkEdit;
use linkshelf::types::filter::{DatePreset, FilterCriteria, SortKey};
use linkshelf::types::settings::SettingsUpdate;
use linkshelf::ui::renderer;

#[derive(Parser, Debug)]
#[command(name = "linkshelf", version)]
#[command(about = "Browse, search and curate your saved bookmarks", long_about = None)]
struct Cli {
    /// Base URL of the bookmark backend.
    #[arg(long, env = "LINKSHELF_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Location of the local display-settings cache.
    #[arg(long, env = "LINKSHELF_SETTINGS", global = true)]
    settings_path: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of bookmarks.
    List(FilterArgs),
    /// Keep polling the backend and re-render on every refresh.
    Watch(FilterArgs),
    /// Change the title, URL or thumbnail of a bookmark.
    Edit {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        thumbnail: Option<String>,
    },
    /// Delete a bookmark.
    Delete { id: i64 },
    /// Record a visit and print the bookmark URL.
    Visit { id: i64 },
    /// Show or change display settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        items_per_page: Option<usize>,
        /// Refresh interval in seconds (at least 10).
        #[arg(long)]
        refresh_secs: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Case-insensitive match against title or URL.
    #[arg(short, long, default_value = "")]
    search: String,
    /// date_desc, date_asc or title.
    #[arg(long, default_value = "date_desc")]
    sort: SortKey,
    /// all, today, week or month.
    #[arg(long, default_value = "all")]
    range: DatePreset,
    /// Custom range start (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Custom range end (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        let preset = if self.from.is_some() || self.to.is_some() {
            DatePreset::Custom {
                from: self.from,
                to: self.to,
            }
        } else {
            self.range
        };
        FilterCriteria {
            search: self.search.clone(),
            date_range: preset.resolve(Utc::now()),
            sort: self.sort,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linkshelf=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig {
        api_url: cli.api_url.clone(),
        settings_path: cli.settings_path.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to set up API client");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    app.startup().await;

    let ok = run(&mut app, cli.command).await;
    print_toasts(&app.notifier);
    app.shutdown();
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(app: &mut App, command: Command) -> bool {
    match command {
        Command::List(filters) => {
            app.board.set_criteria(filters.criteria());
            if app.board.refresh().await.is_err() {
                return false;
            }
            app.request_page(filters.page);
            print!("{}", renderer::render_view(&app.board.view()));
            true
        }
        Command::Watch(filters) => {
            app.board.set_criteria(filters.criteria());
            // The page is clamped against a loaded list; failures are retried by the poller.
            if app.board.refresh().await.is_ok() {
                app.request_page(filters.page);
            }
            let notifier = app.notifier.clone();
            app.start_polling(move |view| {
                println!("\n── {} ──", chrono::Local::now().format("%H:%M:%S"));
                print!("{}", renderer::render_view(view));
                print_toasts(&notifier);
            });
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                return false;
            }
            tracing::info!("ctrl+c received, stopping");
            true
        }
        Command::Edit {
            id,
            title,
            url,
            thumbnail,
        } => {
            if app.board.refresh().await.is_err() {
                return false;
            }
            let Some(existing) = app.board.find(id) else {
                app.notifier.warning(format!("Bookmark not found: {}", id));
                return false;
            };
            let edit = BookmarkEdit {
                id,
                url: url.unwrap_or(existing.url),
                title,
                thumbnail: thumbnail.or(existing.thumbnail),
            };
            app.board.edit(edit).await.is_ok()
        }
        Command::Delete { id } => {
            if app.board.refresh().await.is_err() {
                return false;
            }
            app.board.delete(id).await.is_ok()
        }
        Command::Visit { id } => {
            if app.board.refresh().await.is_err() {
                return false;
            }
            match app.board.record_visit(id).await {
                Ok(url) => {
                    println!("{}", url);
                    true
                }
                Err(_) => match app.board.find(id) {
                    // The link is still usable when only the counter failed.
                    Some(bookmark) => {
                        println!("{}", bookmark.url);
                        true
                    }
                    None => {
                        app.notifier.warning(format!("Bookmark not found: {}", id));
                        false
                    }
                },
            }
        }
        Command::Settings { action } => match action {
            SettingsCommand::Show => {
                print!("{}", renderer::render_settings(&app.settings.current()));
                true
            }
            SettingsCommand::Set {
                items_per_page,
                refresh_secs,
            } => {
                let update = SettingsUpdate::from_form(items_per_page, refresh_secs);
                match app.apply_settings(update).await {
                    Ok(changed) => {
                        if !changed {
                            app.notifier.info("Settings unchanged");
                        }
                        print!("{}", renderer::render_settings(&app.settings.current()));
                        true
                    }
                    Err(_) => false,
                }
            }
        },
    }
}

fn print_toasts(notifier: &Notifier) {
    for toast in notifier.drain() {
        eprintln!("{}", renderer::render_toast(&toast));
    }
}
