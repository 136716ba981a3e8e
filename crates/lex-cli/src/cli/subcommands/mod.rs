pub mod agreements;
pub mod ai;
pub mod auth;
pub mod org;

pub use agreements::AgreementsCommands;
pub use ai::AiCommands;
pub use auth::AuthCommands;
pub use org::OrgCommands;
