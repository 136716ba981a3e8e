use lex_auth::SessionManager;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthSignupArgs;
use crate::commands::shared::session::{profile, ready};
use crate::output::output;

#[derive(Serialize)]
struct AuthSignupResponse {
    email: String,
    requires_confirmation: bool,
    organization_id: Option<String>,
    note: Option<String>,
}

pub async fn handle(
    args: &AuthSignupArgs,
    manager: &SessionManager,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let profile = profile(&args.org_name, &args.hq, &args.plan)?;
    ready(manager).await?;

    let outcome = manager.sign_up(&args.email, &args.password, profile).await?;
    let organization_id = manager.snapshot().organization.map(|org| org.id);

    output(
        &AuthSignupResponse {
            email: args.email.clone(),
            requires_confirmation: outcome.requires_confirmation,
            organization_id,
            note: outcome
                .requires_confirmation
                .then(|| "check your inbox to confirm the account, then run 'lex auth signin'".into()),
        },
        flags.format,
    )
}
