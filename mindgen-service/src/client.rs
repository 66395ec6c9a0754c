use crate::error::{ErrorBody, Result, ServiceError};
use crate::server::HealthStatus;
use mindgen_core::{Corpus, GenerationRequest, MindMapResponse, generate_mindmap};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Local,
}

pub struct MindMapClient {
    client: Client,
    base_url: Url,
}

impl MindMapClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, 10)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("mindgen/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", path, e)))
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<MindMapResponse> {
        let url = self.endpoint("generate_mindmap")?;
        debug!("POST {}", url);

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| format!("请求失败: {}", status.as_u16()));
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint("health")?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Ask the remote service, and generate locally from `corpus` if that
    /// fails for any reason. A blank keyword fails either way.
    pub async fn generate_or_fallback(
        &self,
        corpus: &Corpus,
        request: &GenerationRequest,
    ) -> Result<(MindMapResponse, Origin)> {
        match self.generate(request).await {
            Ok(response) => {
                info!("Received outline from {}", self.base_url);
                Ok((response, Origin::Remote))
            }
            Err(e) => {
                warn!("Remote generation failed, using local corpus: {}", e);
                let response = generate_mindmap(corpus, request)?;
                Ok((response, Origin::Local))
            }
        }
    }
}
