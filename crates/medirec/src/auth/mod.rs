//! Bearer-token authentication: credential verification, token issuance,
//! and the middleware guarding the record-keeping routes.

pub mod middleware;
pub mod router;
pub mod service;
pub mod token;
pub mod users;

pub use middleware::require_bearer;
pub use router::auth_router;
pub use service::{AuthResponse, AuthService, LoginRequest};
pub use token::{AuthError, Claims, TokenService};
pub use users::{DirectoryError, UserAccount, UserDirectory};
