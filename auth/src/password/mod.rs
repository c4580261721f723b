pub mod argon2;
pub mod errors;

/// Argon2 cost parameters accepted by [`PasswordHasher::with_params`].
pub use ::argon2::Params as HashParams;

pub use self::argon2::PasswordHasher;
pub use self::errors::PasswordError;
