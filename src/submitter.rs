use anyhow::Context;
use reqwest::{Client, Url};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};
use zklink_sdk_config::ClientConfig;
use zklink_types::ZkLinkSignature;

use crate::rpc::RpcRequest;
use crate::TxSignature;

/// Posts `sendTransaction` requests to a zkLink node. Requests are sent once, failures
/// are returned to the caller as they are.
#[derive(Debug)]
pub struct RpcSubmitter {
    client: Client,
    url: Url,
    next_id: AtomicU64,
}

impl RpcSubmitter {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.request_timeout())
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build http client")?;
        let url = Url::parse(&config.rpc_url)
            .with_context(|| format!("Invalid rpc url: {}", config.rpc_url))?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends any JSON-RPC request and returns the raw JSON response body.
    pub async fn request(&self, request: &RpcRequest) -> anyhow::Result<Value> {
        debug!(id = request.id, method = %request.method, "rpc request");
        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to send {} to {}", request.method, self.url))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("Invalid json response, status: {status}"))?;
        if !status.is_success() {
            crate::warn!(%status, "rpc request {} failed: {}", request.id, body);
        }
        Ok(body)
    }

    pub async fn send_transaction(
        &self,
        tx_signature: &TxSignature,
        submitter_signature: Option<&ZkLinkSignature>,
    ) -> anyhow::Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::send_transaction(id, tx_signature, submitter_signature)?;
        let response = self.request(&request).await?;
        info!(
            id,
            tx_hash = %tx_signature.tx.tx_hash(),
            "sendTransaction response: {}",
            response
        );
        Ok(response)
    }
}
