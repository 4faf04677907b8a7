//! Repository modules. Each adds methods to `SkrDb` via `impl SkrDb` blocks.

pub mod account;
pub mod external_auth;

/// ID prefix for external-auth links.
pub const PREFIX_EXTERNAL_AUTH: &str = "ext";
