use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use workroom::WorkspaceRoot;
use workroom::edit::{delete_path, edit_file, move_path, write_file};
use workroom::git;
use workroom::search::{OutputMode, SearchOptions, search};
use workroom::traverse::{glob_files, list_directory};
use workroom::view::{ViewOptions, read_file};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Serve a workspace's files, search, and git history to remote coding tools"
)]
struct Cli {
    /// Workspace root directory (falls back to $WORKSPACE_DIR, then `.`)
    #[arg(long)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    FilesWithMatches,
    Content,
    Count,
}

#[derive(Subcommand)]
enum Commands {
    /// Search file contents with a regex pattern
    Search {
        /// Pattern to search for
        pattern: String,

        /// File or directory to search, relative to the root
        #[arg(long, default_value = "")]
        path: String,

        /// Glob filter for candidate files, e.g. "**/*.rs"
        #[arg(long, default_value = "")]
        glob: String,

        /// How to render results
        #[arg(long, value_enum, default_value = "files-with-matches")]
        mode: Mode,

        /// Lines of context before and after each match (content mode)
        #[arg(short = 'C', long, default_value = "0")]
        context: usize,

        /// Lines of context before each match (similar to grep's -B option)
        #[arg(short = 'B', long = "before-context", default_value = "0")]
        before_context: usize,

        /// Lines of context after each match (similar to grep's -A option)
        #[arg(short = 'A', long = "after-context", default_value = "0")]
        after_context: usize,

        /// Case insensitive matching
        #[arg(short = 'i', long)]
        case_insensitive: bool,

        /// Omit line numbers from content output
        #[arg(long)]
        no_line_numbers: bool,

        /// Cap on result entries (0 = unlimited)
        #[arg(long, default_value = "0")]
        head_limit: usize,

        /// Let the pattern span line boundaries
        #[arg(short = 'U', long)]
        multiline: bool,
    },

    /// Read a file with cat-n style line numbers
    Read {
        /// File to read, relative to the root
        file: String,

        /// 1-based line to start reading from
        #[arg(long, default_value = "1")]
        offset: usize,

        /// Maximum lines to read (0 = all remaining)
        #[arg(long, default_value = "0")]
        limit: usize,
    },

    /// Write content to a file, creating parent directories
    Write { file: String, content: String },

    /// Replace an exact string in a file
    Edit {
        file: String,
        old_string: String,
        new_string: String,

        /// Replace every occurrence instead of requiring a unique one
        #[arg(long)]
        replace_all: bool,
    },

    /// List files matching a glob pattern, newest first
    Glob {
        /// Glob pattern, e.g. "**/*.py"
        pattern: String,

        /// Base directory relative to the root
        #[arg(long, default_value = "")]
        path: String,
    },

    /// List the entries of a directory
    Ls {
        #[arg(default_value = "")]
        path: String,
    },

    /// Delete a file or directory
    Rm { path: String },

    /// Move a file or directory within the workspace
    Mv { source: String, destination: String },

    /// Run a git operation in the workspace
    #[command(subcommand)]
    Git(GitCommands),
}

#[derive(Subcommand)]
enum GitCommands {
    /// Working tree status
    Status,

    /// Unified diff of working tree or staged changes
    Diff {
        #[arg(long, default_value = "")]
        path: String,

        /// Ref to diff against, e.g. HEAD, main, a hash
        #[arg(long = "ref", default_value = "")]
        r#ref: String,

        /// Show staged (indexed) changes
        #[arg(long)]
        staged: bool,

        /// Diffstat summary instead of the full patch
        #[arg(long)]
        stat: bool,

        /// Show the diff introduced by this commit instead
        #[arg(long, default_value = "")]
        commit: String,
    },

    /// Commit history
    Log {
        #[arg(long, default_value = "20")]
        max_count: usize,

        #[arg(long, default_value = "")]
        path: String,

        #[arg(long = "ref", default_value = "HEAD")]
        r#ref: String,

        /// Compact one-line format
        #[arg(long)]
        oneline: bool,
    },

    /// Files tracked at a ref, plus untracked and staged-new files
    Tree {
        #[arg(long, default_value = "")]
        path: String,

        #[arg(long = "ref", default_value = "HEAD")]
        r#ref: String,

        /// Do not recurse into subdirectories
        #[arg(long)]
        no_recursive: bool,
    },

    /// File content at a ref, numbered like `read`
    Show {
        path: String,

        #[arg(long = "ref", default_value = "HEAD")]
        r#ref: String,

        #[arg(long)]
        no_line_numbers: bool,
    },

    /// Last modifying commit and author per line
    Blame {
        path: String,

        #[arg(long = "ref", default_value = "HEAD")]
        r#ref: String,
    },

    /// List branches
    Branches {
        /// Include remote-tracking branches
        #[arg(long)]
        all: bool,
    },

    /// Stage files for the next commit
    Add {
        #[arg(default_value = ".")]
        paths: Vec<String>,
    },

    /// Commit the staged changes
    Commit {
        #[arg(short, long)]
        message: String,

        #[arg(long, default_value = "")]
        author: String,
    },

    /// Switch to a branch or commit
    Checkout {
        r#ref: String,

        /// Create the branch first
        #[arg(short = 'b', long)]
        create: bool,
    },

    /// Push commits to a remote
    Push {
        #[arg(long, default_value = "origin")]
        remote: String,

        #[arg(long, default_value = "")]
        branch: String,

        /// Force push with lease
        #[arg(long)]
        force: bool,
    },

    /// Pull and merge from a remote
    Pull {
        #[arg(long, default_value = "origin")]
        remote: String,

        #[arg(long, default_value = "")]
        branch: String,
    },

    /// Fetch from a remote without merging
    Fetch {
        #[arg(long, default_value = "origin")]
        remote: String,

        #[arg(long)]
        prune: bool,
    },

    /// Save or restore stashed changes
    Stash {
        #[arg(default_value = "push")]
        action: String,

        #[arg(short, long, default_value = "")]
        message: String,
    },

    /// Reset HEAD or unstage paths
    Reset {
        #[arg(long = "ref", default_value = "HEAD")]
        r#ref: String,

        /// soft | mixed | hard (ignored when paths are given)
        #[arg(long, default_value = "mixed")]
        mode: String,

        paths: Vec<String>,
    },
}

fn workspace_root(cli_root: Option<PathBuf>) -> Result<WorkspaceRoot> {
    let path = cli_root
        .or_else(|| std::env::var_os("WORKSPACE_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(WorkspaceRoot::new(path)?)
}

fn main() -> Result<()> {
    workroom::telemetry::init()?;
    let cli = Cli::parse();
    let root = workspace_root(cli.root)?;

    match cli.command {
        Commands::Search {
            pattern,
            path,
            glob,
            mode,
            context,
            before_context,
            after_context,
            case_insensitive,
            no_line_numbers,
            head_limit,
            multiline,
        } => {
            let options = SearchOptions {
                path,
                glob,
                output_mode: match mode {
                    Mode::FilesWithMatches => OutputMode::FilesWithMatches,
                    Mode::Content => OutputMode::Content,
                    Mode::Count => OutputMode::Count,
                },
                context,
                context_before: before_context,
                context_after: after_context,
                case_insensitive,
                line_numbers: !no_line_numbers,
                head_limit,
                multiline,
            };
            let output = search(&root, &pattern, &options)?;
            if output.is_empty() {
                println!("No matches found.");
            } else {
                println!("{output}");
            }
        }

        Commands::Read {
            file,
            offset,
            limit,
        } => {
            let options = ViewOptions { offset, limit };
            print!("{}", read_file(&root, &file, &options)?);
        }

        Commands::Write { file, content } => {
            write_file(&root, &file, &content)?;
            println!("File written: {file}");
        }

        Commands::Edit {
            file,
            old_string,
            new_string,
            replace_all,
        } => {
            let replaced = edit_file(&root, &file, &old_string, &new_string, replace_all)?;
            println!("Replaced {replaced} occurrence(s) in {file}");
        }

        Commands::Glob { pattern, path } => {
            for file in glob_files(&root, &pattern, &path)? {
                println!("{file}");
            }
        }

        Commands::Ls { path } => {
            let listing = list_directory(&root, &path)?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }

        Commands::Rm { path } => {
            delete_path(&root, &path)?;
            println!("Deleted: {path}");
        }

        Commands::Mv {
            source,
            destination,
        } => {
            move_path(&root, &source, &destination)?;
            println!("Moved {source} to {destination}");
        }

        Commands::Git(command) => run_git_command(&root, command)?,
    }

    Ok(())
}

fn run_git_command(root: &WorkspaceRoot, command: GitCommands) -> Result<()> {
    let workspace = root.path();
    match command {
        GitCommands::Status => {
            let status = git::status(workspace)?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        GitCommands::Diff {
            path,
            r#ref,
            staged,
            stat,
            commit,
        } => {
            let output = if commit.is_empty() {
                git::diff(workspace, &git::DiffOptions {
                    path,
                    r#ref,
                    staged,
                    stat,
                })?
            } else {
                git::diff_commit(workspace, &commit)?
            };
            print!("{output}");
        }
        GitCommands::Log {
            max_count,
            path,
            r#ref,
            oneline,
        } => {
            let options = git::LogOptions {
                max_count,
                path,
                r#ref,
            };
            if oneline {
                print!("{}", git::log_oneline(workspace, &options)?);
            } else {
                let commits = git::log(workspace, &options)?;
                println!("{}", serde_json::to_string_pretty(&commits)?);
            }
        }
        GitCommands::Tree {
            path,
            r#ref,
            no_recursive,
        } => {
            for file in git::tree(workspace, &path, &r#ref, !no_recursive)? {
                println!("{file}");
            }
        }
        GitCommands::Show {
            path,
            r#ref,
            no_line_numbers,
        } => {
            print!("{}", git::show(workspace, &path, &r#ref, !no_line_numbers)?);
        }
        GitCommands::Blame { path, r#ref } => {
            print!("{}", git::blame(workspace, &path, &r#ref)?);
        }
        GitCommands::Branches { all } => {
            let branches = git::branches(workspace, all)?;
            println!("{}", serde_json::to_string_pretty(&branches)?);
        }
        GitCommands::Add { paths } => {
            git::add(workspace, &paths)?;
            println!("Staged: {}", paths.join(", "));
        }
        GitCommands::Commit { message, author } => {
            print!("{}", git::commit(workspace, &message, &author)?);
        }
        GitCommands::Checkout { r#ref, create } => {
            let output = git::checkout(workspace, &r#ref, create)?;
            if output.trim().is_empty() {
                println!("Switched to '{}'", r#ref);
            } else {
                print!("{output}");
            }
        }
        GitCommands::Push {
            remote,
            branch,
            force,
        } => {
            let output = git::push(workspace, &remote, &branch, force)?;
            if output.trim().is_empty() {
                println!("Pushed successfully");
            } else {
                print!("{output}");
            }
        }
        GitCommands::Pull { remote, branch } => {
            print!("{}", git::pull(workspace, &remote, &branch)?);
        }
        GitCommands::Fetch { remote, prune } => {
            let output = git::fetch(workspace, &remote, prune)?;
            if output.trim().is_empty() {
                println!("Fetched successfully");
            } else {
                print!("{output}");
            }
        }
        GitCommands::Stash { action, message } => {
            print!("{}", git::stash(workspace, &action, &message)?);
        }
        GitCommands::Reset {
            r#ref,
            mode,
            paths,
        } => {
            let output = git::reset(workspace, &r#ref, &mode, &paths)?;
            if output.trim().is_empty() {
                println!("Reset to {}", r#ref);
            } else {
                print!("{output}");
            }
        }
    }
    Ok(())
}
