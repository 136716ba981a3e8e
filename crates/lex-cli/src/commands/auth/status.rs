use lex_auth::{SessionManager, SessionSnapshot};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::session::ready;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    expires_at: Option<String>,
    organization: Option<String>,
    is_org_admin: bool,
    note: Option<String>,
}

impl From<SessionSnapshot> for AuthStatusResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        let note = match (&snapshot.session, &snapshot.organization) {
            (None, _) => Some("not signed in".to_string()),
            (Some(_), None) => {
                Some("no organization yet; run 'lex org complete' to set one up".to_string())
            }
            (Some(_), Some(_)) => None,
        };
        Self {
            authenticated: snapshot.session.is_some(),
            user_id: snapshot.user.as_ref().map(|u| u.id.clone()),
            email: snapshot.user.and_then(|u| u.email),
            expires_at: snapshot
                .session
                .and_then(|s| s.expires_at)
                .map(|at| at.to_rfc3339()),
            organization: snapshot.organization.map(|org| org.name),
            is_org_admin: snapshot.is_org_admin,
            note,
        }
    }
}

pub async fn handle(manager: &SessionManager, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = ready(manager).await?;
    output(&AuthStatusResponse::from(snapshot), flags.format)
}
