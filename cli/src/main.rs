//! `notespace` command-line client.
//!
//! Drives the same view-models as the web client over the `reqwest`
//! transport, keeping the session token in a file instead of
//! `localStorage`. Logs go to stderr (`RUST_LOG`), results to stdout.

mod render;
mod token_file;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use notespace::calendar;
use notespace::config::ClientConfig;
use notespace::error::ApiError;
use notespace::form::NoteForm;
use notespace::http::HttpNotesApi;
use notespace::note::Note;
use notespace::view::login::{LOGIN_FAILED, LoginModel};
use notespace::view::notes::{NotesModel, SubmitOutcome};
use notespace::view::public_notes::PublicNotesModel;
use notespace::view::session::logout;
use notespace::view::signup::{SIGNUP_FAILED, SignupModel};
use tracing_subscriber::EnvFilter;

use crate::render::SystemZone;
use crate::token_file::FileTokenStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no config directory; pass --token-file or set NOTES_TOKEN_FILE")]
    NoConfigDir,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Rejected(String),
    #[error("note {0} not found")]
    NoteNotFound(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "notespace", about = "Notes service command-line client")]
struct Cli {
    #[arg(long, env = "NOTES_BASE_URL", default_value = "http://127.0.0.1:9000")]
    base_url: String,

    #[arg(long, env = "NOTES_CALENDAR_URL")]
    calendar_url: Option<String>,

    #[arg(long, env = "NOTES_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Print notes as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Notes(NotesCommand),
    /// List everyone's public notes.
    Public {
        #[arg(long)]
        search: Option<String>,
    },
    /// Open the Google Calendar link for the current session.
    Calendar,
}

#[derive(Args, Debug)]
struct NotesCommand {
    #[command(subcommand)]
    command: NotesSubcommand,
}

#[derive(Subcommand, Debug)]
enum NotesSubcommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Titles matching TERM, as offered while typing a search.
    Suggest { term: String },
    Create(NoteFields),
    /// Replace a note; omitted fields keep their current value.
    Update {
        id: String,
        #[command(flatten)]
        fields: NoteFields,
    },
    Delete { id: String },
}

#[derive(Args, Debug, Default)]
struct NoteFields {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    content: Option<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    public: Option<bool>,

    /// Local time, `YYYY-MM-DDTHH:MM`; empty to clear.
    #[arg(long)]
    start: Option<String>,

    /// Local time, `YYYY-MM-DDTHH:MM`; empty to clear.
    #[arg(long)]
    end: Option<String>,
}

impl NoteFields {
    fn apply(self, form: &mut NoteForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(content) = self.content {
            form.content = content;
        }
        if let Some(public) = self.public {
            form.is_public = public;
        }
        if let Some(start) = self.start {
            form.start_time = start;
        }
        if let Some(end) = self.end {
            form.end_time = end;
        }
    }
}

struct CliContext {
    api: HttpNotesApi,
    store: FileTokenStore,
    zone: SystemZone,
    json: bool,
}

// Single-threaded so local UTC offsets can be read safely.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let token_path = match cli.token_file {
        Some(path) => path,
        None => FileTokenStore::default_path().ok_or(CliError::NoConfigDir)?,
    };
    let mut config = ClientConfig::new(cli.base_url);
    if let Some(calendar_url) = cli.calendar_url {
        config = config.with_calendar_base_url(calendar_url);
    }
    let ctx = CliContext {
        api: HttpNotesApi::new(config),
        store: FileTokenStore::new(token_path),
        zone: SystemZone,
        json: cli.json,
    };

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, email, password).await,
        Command::Signup { username, email, password } => run_signup(&ctx, username, email, password).await,
        Command::Logout => {
            logout(&ctx.api, &ctx.store).await;
            println!("logged out");
            Ok(())
        }
        Command::Notes(notes) => run_notes(&ctx, notes).await,
        Command::Public { search } => run_public(&ctx, search).await,
        Command::Calendar => run_calendar(&ctx),
    }
}

async fn run_login(ctx: &CliContext, email: String, password: String) -> Result<(), CliError> {
    let mut model = LoginModel::default();
    model.form.email = email;
    model.form.password = password;
    if model.submit(&ctx.api, &ctx.store).await.is_none() {
        return Err(CliError::Rejected(model.error.unwrap_or_else(|| LOGIN_FAILED.to_owned())));
    }
    println!("logged in; token saved to {}", ctx.store.path().display());
    Ok(())
}

async fn run_signup(ctx: &CliContext, username: String, email: String, password: String) -> Result<(), CliError> {
    let mut model = SignupModel::default();
    model.form.username = username;
    model.form.email = email;
    model.form.confirm_password.clone_from(&password);
    model.form.password = password;
    if model.submit(&ctx.api).await.is_none() {
        return Err(CliError::Rejected(model.error.unwrap_or_else(|| SIGNUP_FAILED.to_owned())));
    }
    println!("account created; run `notespace login` to sign in");
    Ok(())
}

async fn run_notes(ctx: &CliContext, notes: NotesCommand) -> Result<(), CliError> {
    match notes.command {
        NotesSubcommand::List { search } => {
            let mut model = NotesModel::default();
            model.load(&ctx.api, &ctx.store).await?;
            model.set_search_term(search.unwrap_or_default());
            print_notes(ctx, &model.filtered())
        }
        NotesSubcommand::Suggest { term } => {
            let mut model = NotesModel::default();
            model.load(&ctx.api, &ctx.store).await?;
            model.set_search_term(term);
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(model.suggestions())?);
            } else {
                for title in model.suggestions() {
                    println!("{title}");
                }
            }
            Ok(())
        }
        NotesSubcommand::Create(fields) => {
            let mut model = NotesModel::default();
            fields.apply(&mut model.form);
            let outcome = model.submit(&ctx.api, &ctx.store, &ctx.zone).await;
            finish_save(ctx, &model, outcome, None)
        }
        NotesSubcommand::Update { id, fields } => {
            let mut model = NotesModel::default();
            model.load(&ctx.api, &ctx.store).await?;
            if !model.begin_edit(&id, &ctx.zone) {
                return Err(CliError::NoteNotFound(id));
            }
            fields.apply(&mut model.form);
            let outcome = model.submit(&ctx.api, &ctx.store, &ctx.zone).await;
            finish_save(ctx, &model, outcome, Some(&id))
        }
        NotesSubcommand::Delete { id } => {
            NotesModel::default().delete(&ctx.api, &ctx.store, &id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

fn finish_save(ctx: &CliContext, model: &NotesModel, outcome: SubmitOutcome, id: Option<&str>) -> Result<(), CliError> {
    let saved = match outcome {
        SubmitOutcome::Created => model.notes().last(),
        SubmitOutcome::Updated => model.notes().iter().find(|n| Some(n.id.as_str()) == id),
        SubmitOutcome::Rejected | SubmitOutcome::Failed => {
            return Err(CliError::Rejected(model.alert.clone().unwrap_or_default()));
        }
    };
    print_notes(ctx, &saved.into_iter().collect::<Vec<_>>())
}

async fn run_public(ctx: &CliContext, search: Option<String>) -> Result<(), CliError> {
    let mut model = PublicNotesModel::default();
    model.load(&ctx.api, &ctx.store).await?;
    model.search_term = search.unwrap_or_default();
    print_notes(ctx, &model.filtered())
}

fn run_calendar(ctx: &CliContext) -> Result<(), CliError> {
    let url = calendar::session_link_url(ctx.api.config(), &ctx.store)
        .map_err(|message| CliError::Rejected(message.to_owned()))?;
    println!("{url}");
    if open::that(&url).is_err() {
        eprintln!("(could not open a browser; open the URL above)");
    }
    Ok(())
}

fn print_notes(ctx: &CliContext, notes: &[&Note]) -> Result<(), CliError> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(notes)?);
        return Ok(());
    }
    if notes.is_empty() {
        println!("no notes");
    }
    for note in notes {
        println!("{}", render::note_block(note, &ctx.zone));
    }
    Ok(())
}
