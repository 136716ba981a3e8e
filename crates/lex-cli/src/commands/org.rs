use serde::Serialize;

use lex_core::entities::Organization;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::commands::shared::session::{profile, ready};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct OrgResponse {
    organization: Option<Organization>,
    plan_title: Option<&'static str>,
    is_org_admin: bool,
}

/// Handle `lex org`.
pub async fn handle(
    action: &OrgCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let manager = ctx.session_manager()?;
    ready(&manager).await?;

    if let OrgCommands::Complete { name, hq, plan } = action {
        manager
            .complete_organization_profile(profile(name, hq, plan)?)
            .await?;
    }

    let snapshot = manager.snapshot();
    if snapshot.session.is_none() {
        anyhow::bail!("not signed in; run 'lex auth signin' first");
    }
    output(
        &OrgResponse {
            plan_title: snapshot.organization.as_ref().map(|org| org.plan.title()),
            organization: snapshot.organization,
            is_org_admin: snapshot.is_org_admin,
        },
        flags.format,
    )
}
