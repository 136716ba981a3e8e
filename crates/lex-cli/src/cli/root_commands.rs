use clap::Subcommand;

use crate::cli::subcommands::{AgreementsCommands, AiCommands, AuthCommands, OrgCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign up, sign out, and session status.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// The signed-in user's organization.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// AI clause drafting and risk analysis.
    Ai {
        #[command(subcommand)]
        action: AiCommands,
    },
    /// Agreement portfolio stored in a local JSON file.
    Agreements {
        #[command(subcommand)]
        action: AgreementsCommands,
    },
}
