use crate::render;
use anyhow::Context as _;
use bookmarky_core::BookmarkApp;
use bookmarky_core::Config;
use bookmarky_core::ConfigOverrides;
use bookmarky_core::OverviewController;
use bookmarky_core::overview::DeleteOutcome;
use bookmarky_core::overview::SubmitError;
use bookmarky_core::overview::SubmitOutcome;
use bookmarky_core::probe::HttpProbe;
use bookmarky_core::probe::ProbeMode;
use bookmarky_core::routes::Route;
use bookmarky_core::routes::Screen;
use bookmarky_store::Bookmark;
use bookmarky_store::BookmarkDraft;
use bookmarky_store::BookmarkStore;
use bookmarky_store::factory;
use bookmarky_store::factory::Backend;
use clap::Parser;
use std::io::BufRead as _;
use std::io::Write as _;
use std::path::PathBuf;

/// Keep a personal list of bookmarks.
#[derive(Debug, Parser)]
#[command(name = "bookmarky", version)]
pub struct Cli {
    /// Directory holding the bookmark data (defaults to the bookmarky home).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend: `file` or `sqlite`.
    #[arg(long, global = true)]
    pub backend: Option<Backend>,

    /// Bookmarks per page.
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// URL check before saving: `opaque`, `strict` or `off`.
    #[arg(long, global = true)]
    pub probe: Option<ProbeMode>,

    #[command(subcommand)]
    pub cmd: Command,
}

/// Bookmark subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List bookmarks one page at a time.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Add a bookmark once its URL checks out.
    Add {
        #[arg(long)]
        url: String,
        #[arg(long)]
        title: String,
    },
    /// Edit a bookmark. Omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Show a single bookmark.
    Show { id: String },
    /// Remove a bookmark by id.
    Rm {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Print all bookmarks as a JSON array.
    Export,
    /// Read a JSON array of `{url, title}` objects from stdin and add them.
    Import,
    /// Copy the bookmark collection between storage backends.
    Migrate {
        #[arg(long)]
        from: Backend,
        #[arg(long)]
        to: Backend,
    },
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            backend: self.backend,
            page_size: self.page_size,
            probe_mode: self.probe,
        }
    }
}

/// Execute a bookmark command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.overrides())?;
    tracing::debug!("config: {config:?}");

    match cli.cmd {
        Command::Migrate { from, to } => {
            let n = factory::migrate(&config.data_dir, from, to)?;
            println!("Migrated {n} bookmarks from {from} to {to}");
        }
        Command::List { page } => {
            let mut app = open_app(&config)?;
            let overview = app.overview_mut();
            if !overview.go_to_page(page) && page != 1 {
                let shown = overview.page().number;
                eprintln!("page {page} does not exist; showing page {shown}");
            }
            print!("{}", render::overview(&app.overview().page()));
        }
        Command::Add { url, title } => {
            let mut app = open_app(&config)?;
            app.navigate(Route::Overview, None);
            let form = app.overview_mut().form_mut();
            form.url = url;
            form.title = title;
            submit(&mut app).await?;
            match app.screen() {
                Screen::Results(bookmark) => print!("{}", render::results(bookmark)),
                other => tracing::warn!("unexpected screen after add: {other:?}"),
            }
        }
        Command::Edit { id, url, title } => {
            let mut app = open_app(&config)?;
            if app.navigate(Route::Edit(id.clone()), None) == &Screen::Overview {
                eprintln!("bookmark not found: {id}; showing overview");
                print!("{}", render::overview(&app.overview().page()));
                return Ok(());
            }
            let form = app.overview_mut().form_mut();
            if let Some(url) = url {
                form.url = url;
            }
            if let Some(title) = title {
                form.title = title;
            }
            match submit(&mut app).await? {
                SubmitOutcome::Updated(bookmark) => {
                    println!("Updated bookmark {}", bookmark.id);
                }
                SubmitOutcome::EditTargetGone { id } => {
                    eprintln!("bookmark {id} was removed before it could be saved");
                }
                SubmitOutcome::Created(bookmark) => {
                    tracing::warn!("edit created a new bookmark {}", bookmark.id);
                }
            }
            print!("{}", render::overview(&app.overview().page()));
        }
        Command::Show { id } => {
            let bookmark = open_store(&config)?
                .get(&id)
                .with_context(|| format!("bookmark not found: {id}"))?;
            print!("{}", render::bookmark(&bookmark));
        }
        Command::Rm { id, yes } => {
            let mut app = open_app(&config)?;
            let outcome = app
                .overview_mut()
                .delete(&id, |bookmark| yes || confirm_delete(bookmark))?;
            match outcome {
                DeleteOutcome::Deleted => println!("Deleted bookmark {id}"),
                DeleteOutcome::Cancelled => println!("Kept bookmark {id}"),
                DeleteOutcome::NotFound => anyhow::bail!("bookmark not found: {id}"),
            }
        }
        Command::Export => {
            let all = open_store(&config)?.get_all();
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
        Command::Import => {
            let store = open_store(&config)?;
            let input = std::io::read_to_string(std::io::stdin())?;
            let drafts: Vec<BookmarkDraft> =
                serde_json::from_str(&input).context("expected a JSON array of bookmarks")?;
            let n = store.import(drafts)?;
            println!("Imported {n} bookmarks");
        }
    }
    Ok(())
}

fn open_store(config: &Config) -> anyhow::Result<BookmarkStore> {
    Ok(factory::open_store(&config.data_dir, Some(config.backend))?)
}

fn open_app(config: &Config) -> anyhow::Result<BookmarkApp<HttpProbe>> {
    let store = open_store(config)?;
    let probe = HttpProbe::new(&config.probe)?;
    Ok(BookmarkApp::new(OverviewController::new(
        store,
        probe,
        config.page_size,
    )))
}

async fn submit(app: &mut BookmarkApp<HttpProbe>) -> anyhow::Result<SubmitOutcome> {
    match app.submit().await {
        Ok(outcome) => Ok(outcome),
        Err(SubmitError::Invalid(errors)) => anyhow::bail!("bookmark rejected: {errors}"),
        Err(SubmitError::Store(e)) => Err(e.into()),
    }
}

/// Ask on stderr, read the answer from stdin. Anything but yes keeps it.
fn confirm_delete(bookmark: &Bookmark) -> bool {
    let mut stderr = std::io::stderr();
    let _ = write!(
        stderr,
        "Are you sure you want to delete \"{}\" ({})? [y/N] ",
        bookmark.title, bookmark.url
    );
    let _ = stderr.flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
