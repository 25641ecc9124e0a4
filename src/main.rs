//! Terminal front end and entry point.
//!
//! Thin integration layer between the mailfeed library and a line-oriented
//! terminal. Arguments are parsed into a [`Config`], each input line becomes one
//! library [`Event`], and the [`Runtime`] drives it to completion before the
//! screen is redrawn.
//!
//! # Lifecycle
//!
//! 1. **Load**: Parse `key=value` arguments, initialize tracing, create `AppState`
//! 2. **Connect**: Build the HTTP backend from `base_url`, `session_cookie` and `timeout_secs`
//! 3. **Start**: Open the inbox (mail) or load the page seed (network)
//! 4. **Loop**: Read a command, dispatch its event, render, print alerts
//!
//! Input lines are parsed by [`Input`], so `help` lists every command. Commands
//! of the other front end are rejected. In `body` and `contents` a literal `\n`
//! starts a new line.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mailfeed::api::HttpBackend;
use mailfeed::domain::{EmailId, Mailbox, PostId};
use mailfeed::runtime::Runtime;
use mailfeed::{AppKind, Config, Event};

/// Terminal width used when `COLUMNS` is unset or unusable.
const DEFAULT_COLS: usize = 80;

/// Narrowest width the components lay out sensibly in.
const MIN_COLS: usize = 40;

/// Terminal client for the mail and network web applications.
#[derive(Debug, Parser)]
#[command(name = "mailfeed", version, about)]
struct Args {
    /// Settings: base_url (required), app (mail|network), page, session_cookie,
    /// timeout_secs, theme, theme_file, trace_level
    #[arg(value_name = "KEY=VALUE", value_parser = parse_setting)]
    settings: Vec<(String, String)>,
}

fn parse_setting(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{arg}`"))?;
    Ok((key.trim().to_string(), value.to_string()))
}

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(multicall = true)]
struct Input {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// [mail] Show the inbox
    Inbox,
    /// [mail] Show sent mail
    Sent,
    /// [mail] Show archived mail
    Archive,
    /// [mail] Show an email
    Open { id: EmailId },
    /// [mail] Reply to the opened email
    Reply,
    /// [mail] Archive or unarchive the opened email
    ToggleArchive,
    /// [mail] Start a new email
    Compose,
    /// [mail] Set the recipients (comma-separated)
    To { text: Vec<String> },
    /// [mail] Set the subject
    Subject { text: Vec<String> },
    /// [mail] Set the body
    Body {
        #[arg(allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// [mail] Send the email
    Send,
    /// [network] Like or unlike a post
    Like { post_id: PostId },
    /// [network] Open the editor of one of your posts
    Edit { post_id: PostId },
    /// [network] Set the title in the editor
    Title { text: Vec<String> },
    /// [network] Set the contents in the editor
    Contents {
        #[arg(allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// [network] Save the editor
    Save,
    /// [network] Follow or unfollow the shown profile
    Follow,
    /// Leave mailfeed
    #[command(visible_aliases = ["q", "exit"])]
    Quit,
}

/// What the loop does with one input line.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Dispatch(Event),
    Print(String),
    Quit,
    Skip,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let settings: BTreeMap<String, String> = args.settings.into_iter().collect();
    let config = Config::from_map(&settings);
    mailfeed::observability::init_tracing(&config);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "mailfeed exited with an error");
            eprintln!("mailfeed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> mailfeed::Result<()> {
    let span = tracing::debug_span!("run", app = ?config.app);
    let _guard = span.enter();

    config.validate()?;
    let base_url = config.base_url.as_deref().unwrap_or_default();
    let backend = HttpBackend::new(base_url, config.session_cookie.as_deref(), config.timeout_secs)?;
    tracing::debug!(base_url, "backend ready");

    let mut runtime = Runtime::new(mailfeed::initialize(config), backend);
    let cols = terminal_cols();

    runtime.dispatch(mailfeed::startup_event(config)?)?;
    show(&mut runtime, cols)?;

    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        match step(config.app, &line?) {
            Step::Dispatch(event) => {
                if runtime.dispatch(event)? {
                    show(&mut runtime, cols)?;
                } else {
                    print_alerts(&mut runtime);
                }
            }
            Step::Print(text) => println!("{text}"),
            Step::Quit => break,
            Step::Skip => {}
        }
        prompt()?;
    }

    tracing::debug!("input closed");
    Ok(())
}

fn show<B: mailfeed::api::Backend>(runtime: &mut Runtime<B>, cols: usize) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", runtime.render(cols))?;
    stdout.flush()?;
    drop(stdout);
    print_alerts(runtime);
    Ok(())
}

fn print_alerts<B: mailfeed::api::Backend>(runtime: &mut Runtime<B>) {
    for alert in runtime.take_alerts() {
        println!("! {alert}");
    }
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()
}

fn terminal_cols() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|cols| *cols >= MIN_COLS)
        .unwrap_or(DEFAULT_COLS)
}

/// Parses one input line for the `app` front end.
///
/// Parse errors and `help` come back as text to print.
fn step(app: AppKind, line: &str) -> Step {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Step::Skip;
    }

    match Input::try_parse_from(words) {
        Ok(Input { command: Command::Quit }) => Step::Quit,
        Ok(Input { command }) => to_event(app, command).map_or_else(Step::Print, Step::Dispatch),
        Err(e) => Step::Print(e.render().to_string().trim_end().to_string()),
    }
}

fn to_event(app: AppKind, command: Command) -> Result<Event, String> {
    let event = match (app, command) {
        (AppKind::Mail, Command::Inbox) => Event::LoadMailbox(Mailbox::Inbox),
        (AppKind::Mail, Command::Sent) => Event::LoadMailbox(Mailbox::Sent),
        (AppKind::Mail, Command::Archive) => Event::LoadMailbox(Mailbox::Archive),
        (AppKind::Mail, Command::Open { id }) => Event::OpenEmail(id),
        (AppKind::Mail, Command::Reply) => Event::Reply,
        (AppKind::Mail, Command::ToggleArchive) => Event::ToggleArchive,
        (AppKind::Mail, Command::Compose) => Event::Compose,
        (AppKind::Mail, Command::To { text }) => Event::SetRecipients(text.join(" ")),
        (AppKind::Mail, Command::Subject { text }) => Event::SetSubject(text.join(" ")),
        (AppKind::Mail, Command::Body { text }) => Event::SetBody(unescape_newlines(&text)),
        (AppKind::Mail, Command::Send) => Event::SendEmail,

        (AppKind::Network, Command::Like { post_id }) => Event::ToggleLike { post_id },
        (AppKind::Network, Command::Edit { post_id }) => Event::OpenEditor { post_id },
        (AppKind::Network, Command::Title { text }) => Event::SetEditTitle(text.join(" ")),
        (AppKind::Network, Command::Contents { text }) => Event::SetEditContents(unescape_newlines(&text)),
        (AppKind::Network, Command::Save) => Event::SubmitEdit,
        (AppKind::Network, Command::Follow) => Event::ToggleFollow,

        (app, command) => return Err(format!("{command:?} is not available in the {app:?} client")),
    };
    Ok(event)
}

fn unescape_newlines(words: &[String]) -> String {
    words.join(" ").replace("\\n", "\n")
}
