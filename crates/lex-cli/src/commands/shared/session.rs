use std::time::Duration;

use lex_auth::{SessionManager, SessionSnapshot};
use lex_core::entities::OrganizationProfile;
use lex_core::enums::BillingPlan;

use crate::commands::shared::parse::parse_enum;

/// How long a command waits for session events after an action.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Start from a fully hydrated state so initial hydration cannot race the
/// command's own action.
pub async fn ready(manager: &SessionManager) -> anyhow::Result<SessionSnapshot> {
    tokio::time::timeout(SETTLE_TIMEOUT, manager.ready())
        .await
        .map_err(|_| anyhow::anyhow!("timed out restoring the session"))
}

/// Wait for the listener to deliver a state matching `predicate`.
pub async fn settle(
    manager: &SessionManager,
    predicate: impl FnMut(&SessionSnapshot) -> bool,
) -> anyhow::Result<SessionSnapshot> {
    let mut watcher = manager.watch();
    tokio::time::timeout(SETTLE_TIMEOUT, watcher.wait_for(predicate))
        .await
        .map_err(|_| anyhow::anyhow!("timed out waiting for the session to update"))?
        .ok_or_else(|| anyhow::anyhow!("session manager stopped"))
}

pub fn profile(name: &str, hq: &str, plan: &str) -> anyhow::Result<OrganizationProfile> {
    Ok(OrganizationProfile {
        name: name.to_string(),
        hq_location: hq.to_string(),
        plan: parse_enum::<BillingPlan>(plan, "plan")?,
    })
}
