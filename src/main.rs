use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use twig::areas::repository::Repository;
use twig::artifacts::core::{PagerWriter, should_page};

/// Tracing filter, `EnvFilter` syntax
const LOG_ENV: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A tiny version-control system",
    long_about = "twig keeps snapshots of a flat or nested working directory in a local \
    content-addressed store. It supports branches, checkouts and three-way merges, \
    without remotes.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Create a repository in the current directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        path: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stop tracking it and delete it from the working directory"
    )]
    Rm {
        #[arg(index = 1)]
        path: String,
    },
    #[command(name = "commit", about = "Snapshot the staged changes")]
    Commit {
        #[arg(index = 1)]
        message: Option<String>,
    },
    #[command(name = "log", about = "Show the first-parent history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and untracked files")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "`checkout -- <file>` restores a file from the head commit, \
        `checkout <commit> -- <file>` from the given commit and \
        `checkout <branch>` switches to another branch."
    )]
    Checkout {
        target: Option<String>,
        #[arg(last = true)]
        path: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the head commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

impl Commands {
    /// History output goes through the pager on interactive terminals
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog) && should_page()
    }

    fn is_read_only(&self) -> bool {
        matches!(
            self,
            Commands::Log | Commands::GlobalLog | Commands::Find { .. } | Commands::Status
        )
    }
}

fn main() {
    init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let command = match Cli::try_parse() {
        Ok(Cli {
            command: Some(command),
        }) => command,
        Ok(Cli { command: None }) => {
            println!("Please enter a command.");
            return;
        }
        Err(error) => {
            match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = error.print();
                }
                ErrorKind::InvalidSubcommand => println!("No command with that name exists."),
                ErrorKind::MissingSubcommand
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    println!("Please enter a command.")
                }
                _ => println!("Incorrect operands."),
            }
            return;
        }
    };

    if let Err(error) = run(command) {
        println!("{error}");
    }
}

fn init_tracing() {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(command: Commands) -> Result<()> {
    let pwd = std::env::current_dir()?;

    if let Commands::Init = command {
        Repository::init(&pwd, Box::new(std::io::stdout()))?;
        return Ok(());
    }

    let pager = command.is_paged().then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };
    let mut repository = Repository::open(&pwd, writer)?;

    match &command {
        Commands::Init => {}
        Commands::Add { path } => repository.add(path)?,
        Commands::Rm { path } => repository.rm(path)?,
        Commands::Commit { message } => {
            repository.commit(message.as_deref().unwrap_or_default())?;
        }
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => {
            repository.find(message)?;
        }
        Commands::Status => repository.status()?,
        Commands::Checkout { target, path } => match (target.as_deref(), path.as_deref()) {
            (commit, Some(path)) => repository.checkout_file(commit, path)?,
            (Some(branch), None) => repository.checkout_branch(branch)?,
            (None, None) => anyhow::bail!("Incorrect operands."),
        },
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Reset { commit } => repository.reset(commit)?,
        Commands::Merge { branch } => {
            repository.merge(branch)?;
        }
    }

    if !command.is_read_only() {
        repository.persist()?;
    }

    repository.writer().flush()?;
    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
