pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{extract_bearer_token, Claims, IssuedToken, JwtConfig, JwtManager};
pub use middleware::require_auth;
pub use password::{hash_password, verify_password};
