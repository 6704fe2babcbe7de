use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Origin of the remote delivery platform, scheme included, no path.
    pub platform_base_url: String,
    pub platform_timeout_secs: u64,
    pub platform_user_agent: String,
    /// Domain substituted into forwarded `Set-Cookie` lines so platform
    /// cookies become valid for this service's own host.
    pub cookie_domain: String,
}

impl AppConfig {
    /// Bare domain of the platform base URL, used as the source side of the
    /// `Set-Cookie` domain rewrite.
    #[must_use]
    pub fn platform_domain(&self) -> String {
        let rest = self
            .platform_base_url
            .split("://")
            .nth(1)
            .unwrap_or(&self.platform_base_url);
        rest.split('/').next().unwrap_or(rest).to_owned()
    }
}
