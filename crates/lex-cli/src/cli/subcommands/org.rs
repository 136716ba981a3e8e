use clap::Subcommand;

/// Organization commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// Show the signed-in user's organization.
    Show,
    /// Create or update the signed-in user's organization.
    Complete {
        #[arg(long)]
        name: String,
        /// Headquarters location.
        #[arg(long)]
        hq: String,
        /// Billing plan: monthly, 1_year, 2_year, 5_year.
        #[arg(long, default_value = "monthly")]
        plan: String,
    },
}
