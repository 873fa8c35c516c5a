//! Authentication ports.

/// Token service for bearer credentials.
///
/// Tokens are opaque to the rest of the system: they carry the user's email
/// as subject and nothing else the core relies on.
pub trait TokenService: Send + Sync {
    /// Issue a token for the given email.
    fn issue(&self, email: &str) -> Result<String, AuthError>;

    /// Verify a token and recover the subject email.
    fn verify(&self, token: &str) -> Result<String, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
