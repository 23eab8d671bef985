use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "teamview",
    version,
    about = "View-state core of a team-messaging client",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Store snapshot (JSON) to read.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the unread toast for a channel.
    Toast {
        /// Channel to inspect.
        #[arg(long)]
        channel: String,

        /// The viewport is scrolled to the newest post.
        #[arg(long)]
        at_latest: bool,

        /// Posts currently below the viewport.
        #[arg(long, value_name = "POST_ID")]
        below: Vec<String>,

        /// Print props and decision as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Open the forward modal for a post.
    Forward {
        /// Post to forward.
        #[arg(long)]
        post: String,

        /// Search term typed into the channel picker.
        #[arg(long)]
        search: Option<String>,

        /// Destination channel.
        #[arg(long)]
        channel: Option<String>,

        /// Comment to attach.
        #[arg(long)]
        comment: Option<String>,
    },

    /// Print the "Executing Commands" help page.
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toast_subcommand() {
        let args = CliArgs::parse_from([
            "teamview", "toast", "--channel", "c1", "--below", "p1", "--below", "p2", "--json",
        ]);

        match args.command {
            Command::Toast {
                channel,
                at_latest,
                below,
                json,
            } => {
                assert_eq!(channel, "c1");
                assert!(!at_latest);
                assert_eq!(below, vec!["p1", "p2"]);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["teamview", "help", "--snapshot", "s.json"]);

        assert!(matches!(args.command, Command::Help));
        assert_eq!(args.snapshot, Some(PathBuf::from("s.json")));
    }
}
