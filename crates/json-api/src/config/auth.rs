//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Bearer token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Token lifetime in hours; 0 issues tokens that never expire
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value_t = 10)]
    pub token_ttl_hours: u32,
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> Option<SignedDuration> {
        (self.token_ttl_hours > 0)
            .then(|| SignedDuration::from_hours(i64::from(self.token_ttl_hours)))
    }
}
