//! Entity structs for all LexCorp domain objects.
//!
//! `User` and `Session` mirror what the identity provider hands out;
//! `Organization` maps to the `organizations` table. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod agreement;
mod brand;
mod organization;
mod session;
mod template;

pub use agreement::Agreement;
pub use brand::{BrandSettings, SUPPORTED_FONTS};
pub use organization::{NewOrganization, Organization, OrganizationProfile};
pub use session::{Session, User};
pub use template::{Direction, Template, TemplateBlock};
