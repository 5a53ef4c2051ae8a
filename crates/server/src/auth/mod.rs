pub mod identity;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use identity::AuthenticatedUser;
pub use jwt::{Claims, JwtManager};
pub use middleware::AuthLayer;
pub use password::{hash_password, verify_password};
