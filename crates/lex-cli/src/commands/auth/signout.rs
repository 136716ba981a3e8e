use lex_auth::SessionManager;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::session::ready;
use crate::output::output;

#[derive(Serialize)]
struct AuthSignoutResponse {
    signed_out: bool,
}

pub async fn handle(manager: &SessionManager, flags: &GlobalFlags) -> anyhow::Result<()> {
    ready(manager).await?;
    manager.sign_out().await?;
    output(&AuthSignoutResponse { signed_out: true }, flags.format)
}
