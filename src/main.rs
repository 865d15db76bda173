use anyhow::Result;
use clap::{Parser, Subcommand};
use kit::areas::repository::Repository;
use kit::errors::KitError;

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    about = "A tiny single-user version-control system",
    long_about = "kit is a small local version-control system: a content-addressed \
    object store plus commit-graph algorithms. It serves one repository at a time, \
    with no networking and no multi-user concurrency.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(about = "Stage a tracked file for removal and delete it")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(about = "Record a new commit from the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit in the repository")]
    GlobalLog,
    #[command(about = "Print the ids of all commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to search for")]
        message: String,
    },
    #[command(about = "Show branches, staged changes, and untracked files")]
    Status,
    #[command(
        about = "Restore files or switch branches",
        long_about = "Three forms are accepted: `checkout -- <file>` restores a file \
        from the current commit, `checkout <commit-id> -- <file>` restores it from \
        the given commit, and `checkout <branch>` switches branches."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name or a commit id")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(about = "Create a new branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(about = "Move the current branch to the given commit")]
    Reset {
        #[arg(index = 1, help = "A full or abbreviated commit id")]
        commit_id: String,
    },
    #[command(about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    if !repository.is_initialized() && !matches!(&cli.command, Commands::Init) {
        anyhow::bail!(KitError::NotInitialized);
    }

    match &cli.command {
        Commands::Init => repository.init()?,
        Commands::Add { file } => repository.add(file)?,
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Commit { message } => repository.commit(message)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file(file)?,
            (Some(commit_id), Some(file)) => repository.checkout_file_at(commit_id, file)?,
            (Some(branch), None) => repository.checkout_branch(branch)?,
            (None, None) => anyhow::bail!(KitError::IncorrectOperands),
        },
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Reset { commit_id } => repository.reset(commit_id)?,
        Commands::Merge { branch } => repository.merge(branch)?,
    }

    Ok(())
}
