// Command line definition for the `sxcu` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sxcu", version, about = "CLI for accessing the sxcu.net API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// `.sxcu` file describing the subdomain to upload to.
    /// Defaults to <config dir>/sxcu/config.sxcu when it exists.
    #[arg(long, global = true, env = "SXCU_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload an image or file
    Upload(UploadArgs),
    /// Upload text; reads stdin or prompts when --text is not given
    Paste(PasteArgs),
    /// Create a short link
    #[command(name = "createlink")]
    CreateLink {
        /// URL to redirect to
        url: String,
    },
    /// Show metadata of an uploaded file
    Meta {
        /// File id or file URL
        file: String,
    },
    /// Delete an upload using its delete URL
    Delete {
        delete_url: String,
    },
    /// List public subdomains
    Subdomains {
        /// Number of entries to show, -1 for all
        #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
        count: i64,
    },
    /// Manage collections
    #[command(subcommand)]
    Collection(CollectionCommands),
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Path of the file to upload
    pub path: PathBuf,

    /// Collection id to upload into
    #[arg(long, value_name = "ID")]
    pub collection: Option<String>,

    /// Token of a private collection
    #[arg(long, value_name = "TOKEN", requires = "collection")]
    pub collection_token: Option<String>,

    /// Return a direct link instead of the file's page
    #[arg(long)]
    pub no_embed: bool,

    /// Delete the upload after 24 hours
    #[arg(long)]
    pub self_destruct: bool,
}

#[derive(Args, Debug)]
pub struct PasteArgs {
    /// Text to upload
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommands {
    /// Create a new collection
    Create {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        private: bool,
        #[arg(long)]
        unlisted: bool,
    },
    /// Show a collection and its files
    Show { id: String },
    /// Edit a collection
    Edit {
        id: String,
        #[arg(long)]
        token: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        unlisted: Option<bool>,
        /// Generate a new collection token
        #[arg(long)]
        regen_token: bool,
        /// Remove all files from the collection
        #[arg(long)]
        empty: bool,
        #[arg(long)]
        delete: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upload() {
        let cli = Cli::parse_from([
            "sxcu",
            "upload",
            "cat.png",
            "--collection",
            "abc",
            "--collection-token",
            "tok",
            "--no-embed",
        ]);
        match cli.command {
            Commands::Upload(args) => {
                assert_eq!(args.path, PathBuf::from("cat.png"));
                assert_eq!(args.collection.as_deref(), Some("abc"));
                assert_eq!(args.collection_token.as_deref(), Some("tok"));
                assert!(args.no_embed);
                assert!(!args.self_destruct);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_subdomains_all() {
        let cli = Cli::parse_from(["sxcu", "subdomains", "--count", "-1"]);
        assert!(matches!(cli.command, Commands::Subdomains { count: -1 }));
    }

    #[test]
    fn test_collection_token_requires_collection() {
        let result = Cli::try_parse_from(["sxcu", "upload", "a.png", "--collection-token", "t"]);
        assert!(result.is_err());
    }
}
