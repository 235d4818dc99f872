pub mod claims;
pub mod config;
pub mod error;
pub mod extractors;
pub mod roles;
pub mod signer;

pub use claims::Claims;
pub use config::TokenConfig;
pub use error::{AuthError, AuthResult};
pub use extractors::AuthContext;
pub use roles::Role;
pub use signer::TokenService;
