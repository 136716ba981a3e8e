use clap::Subcommand;

/// Agreement portfolio commands. `--file` is a JSON array of agreements.
#[derive(Clone, Debug, Subcommand)]
pub enum AgreementsCommands {
    /// List agreements, optionally filtered.
    List {
        #[arg(long)]
        file: String,
        #[arg(long)]
        status: Option<String>,
        /// Case-insensitive match on title or counterparty.
        #[arg(long)]
        search: Option<String>,
    },
    /// Portfolio summary: counts per status, total value, high-risk count.
    Analytics {
        #[arg(long)]
        file: String,
    },
    /// Move an agreement to a new status and save the file.
    Transition {
        #[arg(long)]
        file: String,
        #[arg(long)]
        id: String,
        /// Target status: draft, review, approved, active, expired.
        #[arg(long)]
        to: String,
    },
}
