mod signin;
mod signout;
mod signup;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `lex auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let manager = ctx.session_manager()?;
    match action {
        AuthCommands::Signin(args) => signin::handle(args, &manager, flags).await,
        AuthCommands::Signup(args) => signup::handle(args, &manager, flags).await,
        AuthCommands::Signout => signout::handle(&manager, flags).await,
        AuthCommands::Status => status::handle(&manager, flags).await,
    }
}
