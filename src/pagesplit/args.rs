use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("PAGESPLIT_GIT_HASH");
    const COMMIT_DATE: &str = env!("PAGESPLIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("PAGESPLIT_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "pagesplit", version = get_version())]
#[command(about = "Per-page layout overrides for scanned documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project file to operate on (defaults to the configured project file in the data directory)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Data directory holding config.json (overrides PAGESPLIT_HOME)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show page records (all stored pages if none given)
    #[command(alias = "ls")]
    Show {
        /// Pages (e.g. scans/001.tif or book.tif#3)
        pages: Vec<String>,
    },

    /// Override the layout type of pages
    Layout {
        /// auto, single-page-uncut, page-plus-offcut or two-pages
        layout_type: String,

        #[arg(required = true, num_args = 1..)]
        pages: Vec<String>,
    },

    /// Remove the layout override of pages
    ClearLayout {
        #[arg(required = true, num_args = 1..)]
        pages: Vec<String>,
    },

    /// Store computed params for a page from a JSON file
    Params { page: String, params_file: PathBuf },

    /// Forget computed params of pages
    ClearParams {
        #[arg(required = true, num_args = 1..)]
        pages: Vec<String>,
    },

    /// Set the default layout type for all pages
    Default { layout_type: String },

    /// Point pages under one path at another
    Relink { from: PathBuf, to: PathBuf },

    /// Forget all page records and reset the default
    Reset,

    /// Get or set configuration
    Config {
        /// Configuration key (project-file, on-conflict)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
