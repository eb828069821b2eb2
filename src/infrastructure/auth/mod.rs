//! Authentication infrastructure module
//!
//! HS256 JWT issuing and validation for signed-in users.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtService};
