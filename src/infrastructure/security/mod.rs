pub mod password;

pub use password::{PasswordHasher, MAX_COST, MIN_COST};
