use lex_auth::SessionManager;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthSigninArgs;
use crate::commands::shared::session::{ready, settle};
use crate::output::output;

#[derive(Serialize)]
struct AuthSigninResponse {
    authenticated: bool,
    user_id: String,
    email: Option<String>,
    expires_at: Option<String>,
}

pub async fn handle(
    args: &AuthSigninArgs,
    manager: &SessionManager,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let previous = ready(manager).await?.session.map(|s| s.access_token);

    manager.sign_in(&args.email, &args.password).await?;

    // The new session arrives through the listener, not the action.
    let snapshot = settle(manager, |snapshot| {
        snapshot.session.as_ref().map(|session| &session.access_token) != previous.as_ref()
    })
    .await?;
    let session = snapshot
        .session
        .ok_or_else(|| anyhow::anyhow!("sign in succeeded but no session was delivered"))?;

    output(
        &AuthSigninResponse {
            authenticated: true,
            user_id: session.user.id,
            email: session.user.email,
            expires_at: session.expires_at.map(|at| at.to_rfc3339()),
        },
        flags.format,
    )
}
