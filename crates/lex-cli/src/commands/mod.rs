pub mod agreements;
pub mod ai;
pub mod auth;
pub mod dispatch;
pub mod org;
pub mod shared;
