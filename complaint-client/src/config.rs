//! Client configuration

/// Client configuration for connecting to the complaint server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Admin JWT token
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

/// 功能卡片后端地址 (检测 / 仿真)
///
/// 这两个服务不属于投诉服务器, 地址是完整 URL
#[derive(Debug, Clone)]
pub struct FeatureEndpoints {
    pub detection_url: String,
    pub simulation_url: String,
}

impl FeatureEndpoints {
    pub fn new(detection_url: impl Into<String>, simulation_url: impl Into<String>) -> Self {
        Self {
            detection_url: detection_url.into(),
            simulation_url: simulation_url.into(),
        }
    }

    /// Both endpoints on one host: `{base}/detect-helmet-plate`, `{base}/run-simulation`
    pub fn on_host(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self::new(
            format!("{base}/detect-helmet-plate"),
            format!("{base}/run-simulation"),
        )
    }
}

impl Default for FeatureEndpoints {
    fn default() -> Self {
        Self::on_host("http://localhost:5000")
    }
}
