//! Gateway configuration.
//!
//! Everything is resolved once at startup (CLI flags plus the `API_TOKEN`
//! environment variable) and shared immutably as `Arc<GatewayConfig>`.
//! Nothing reads ambient globals after startup, which keeps handlers
//! testable with fake secrets and upstream URLs.

use clap::Parser;

/// Upstream chat endpoint of the reference deployment.
pub const DEFAULT_UPSTREAM_URL: &str = "https://deepseek.rkui.cn/api/chat";

/// User-agent matching the browser traffic the upstream expects.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

#[derive(Debug, Parser)]
#[command(name = "deepgate", about = "OpenAI-compatible gateway for an upstream chat service")]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Upstream chat endpoint.
    #[arg(long, default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Bearer token clients must present. The default exists for local
    /// development only; override it in any real deployment.
    #[arg(long, env = "API_TOKEN", default_value = "sk-114514", hide_env_values = true)]
    pub api_token: String,

    /// User-agent sent with upstream requests.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

/// Immutable process-wide settings, injected into components as a
/// constructor dependency.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Secret compared verbatim against the inbound bearer credential.
    pub api_token: String,
    /// Full URL of the upstream chat endpoint.
    pub upstream_url: String,
    /// `Origin` header value for upstream requests.
    pub origin: String,
    /// `Referer` header value for upstream requests.
    pub referer: String,
    /// User-agent string for upstream requests.
    pub user_agent: String,
}

impl GatewayConfig {
    /// Build a config, deriving `Origin`/`Referer` from the upstream URL
    /// so the request looks like it came from the upstream's own page.
    pub fn new(api_token: String, upstream_url: String, user_agent: String) -> Self {
        let origin = origin_of(&upstream_url);
        let referer = format!("{}/", origin);
        Self {
            api_token,
            upstream_url,
            origin,
            referer,
            user_agent,
        }
    }
}

impl From<Cli> for GatewayConfig {
    fn from(cli: Cli) -> Self {
        Self::new(cli.api_token, cli.upstream_url, cli.user_agent)
    }
}

/// Scheme plus authority of a URL, without the trailing path.
fn origin_of(url: &str) -> String {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[scheme_end..].find('/') {
        Some(i) => url[..scheme_end + i].to_string(),
        None => url.trim_end_matches('/').to_string(),
    }
}
