//! Domain entities representing core business objects.

pub mod role;
pub mod token;
pub mod user;
pub mod venture;


// Re-export commonly used types
pub use role::{Permission, Role, ADMIN_ROLE, DEFAULT_ROLE};
pub use token::{Claims, JWT_AUDIENCE, JWT_ISSUER};
pub use user::User;
pub use venture::{Venture, VentureAffiliation};
