use clap::Subcommand;

/// AI drafting commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AiCommands {
    /// Draft one clause of an agreement.
    Draft {
        /// Clause heading, e.g. "Confidentiality".
        #[arg(long)]
        clause: String,
        /// Agreement title.
        #[arg(long)]
        title: String,
        #[arg(long)]
        counterparty: String,
        /// Agreement type, e.g. NDA or SaaS.
        #[arg(long)]
        kind: String,
    },
    /// Rate an agreement's risk.
    Risk {
        /// Agreement text.
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,
        /// File containing the agreement text.
        #[arg(long)]
        file: Option<String>,
    },
}
