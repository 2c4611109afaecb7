//! 功能卡片客户端 (车牌/头盔检测, 交通仿真)
//!
//! 响应内容不做解析, 检测结果原样返回为 JSON

use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::http::handle_response;
use crate::{ClientConfig, ClientResult, FeatureEndpoints};

/// Reply of the simulation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationMessage {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct FeatureClient {
    client: Client,
    endpoints: FeatureEndpoints,
}

impl FeatureClient {
    /// Only `timeout` is taken from `config`; the endpoints are absolute
    pub fn new(config: &ClientConfig, endpoints: FeatureEndpoints) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &FeatureEndpoints {
        &self.endpoints
    }

    /// Upload one image as the `file` part
    pub async fn detect(
        &self,
        filename: impl Into<String>,
        bytes: Vec<u8>,
    ) -> ClientResult<serde_json::Value> {
        let filename = filename.into();
        let media_type = mime_guess::from_path(&filename).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(media_type.essence_str())?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoints.detection_url)
            .multipart(form)
            .send()
            .await?;
        handle_response(response).await
    }

    pub async fn run_simulation(&self) -> ClientResult<SimulationMessage> {
        let response = self
            .client
            .get(&self.endpoints.simulation_url)
            .send()
            .await?;
        handle_response(response).await
    }
}
