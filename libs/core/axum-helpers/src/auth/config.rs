use subtle::ConstantTimeEq;

/// The configured API token.
///
/// An empty token disables authentication entirely.
///
/// ```ignore
/// let auth = BearerAuth::new("s3cret");
/// assert!(auth.verify("s3cret"));
///
/// let open = BearerAuth::disabled();
/// assert!(!open.is_enabled());
/// ```
#[derive(Clone, Default)]
pub struct BearerAuth {
    secret: String,
}

impl BearerAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Exact, constant-time comparison against the configured token
    pub fn verify(&self, candidate: &str) -> bool {
        self.secret.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_disables_auth() {
        assert!(!BearerAuth::new("").is_enabled());
        assert!(!BearerAuth::disabled().is_enabled());
        assert!(BearerAuth::new("token").is_enabled());
    }

    #[test]
    fn test_verify_requires_exact_match() {
        let auth = BearerAuth::new("s3cret");
        assert!(auth.verify("s3cret"));
        assert!(!auth.verify("S3CRET"));
        assert!(!auth.verify("s3cret "));
        assert!(!auth.verify("s3c"));
        assert!(!auth.verify(""));
    }

    #[test]
    fn test_debug_does_not_print_secret() {
        let rendered = format!("{:?}", BearerAuth::new("s3cret"));
        assert!(!rendered.contains("s3cret"));
    }
}
