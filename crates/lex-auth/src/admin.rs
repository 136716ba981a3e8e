use lex_core::entities::{Organization, User};

/// Whether `user` administers `organization`: both present and the
/// organization is owned by that user.
#[must_use]
pub fn is_org_admin(user: Option<&User>, organization: Option<&Organization>) -> bool {
    match (user, organization) {
        (Some(user), Some(organization)) => organization.user_id == user.id,
        _ => false,
    }
}
