//! Chat transport and file storage
//!
//! The engine is transport-agnostic: inbound events arrive as normalized
//! `InboundEvent` values (the webhook surface deserializes them), and
//! replies leave through the `ChatTransport` trait. The default transport
//! POSTs to an external chat gateway; tests substitute a capturing fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// One incoming message from a chat channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Channel-scoped sender id (e.g. a WhatsApp JID).
    pub sender: String,
    #[serde(flatten)]
    pub payload: InboundPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundPayload {
    Text {
        text: String,
    },
    Document {
        filename: String,
        mime: String,
        #[serde(with = "b64")]
        data: Vec<u8>,
    },
    Image,
}

/// One outgoing message to a chat channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub to: String,
    #[serde(flatten)]
    pub body: OutboundBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutboundBody {
    Text {
        text: String,
    },
    Document {
        filename: String,
        mime: String,
        #[serde(with = "b64")]
        data: Vec<u8>,
    },
}

impl OutboundMessage {
    pub fn text(to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            body: OutboundBody::Text { text: text.into() },
        }
    }

    pub fn document(
        to: impl Into<String>,
        filename: impl Into<String>,
        mime: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            to: to.into(),
            body: OutboundBody::Document {
                filename: filename.into(),
                mime: mime.into(),
                data,
            },
        }
    }
}

/// Base64 (standard alphabet) for binary payloads in JSON.
mod b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Gateway request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gateway rejected message: {0}")]
    Rejected(String),
}

/// Outbound delivery seam.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError>;
}

/// Delivers messages by POSTing JSON to an external chat gateway.
pub struct HttpGatewayTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGatewayTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        // A hung gateway must not pin a worker; delivery failures are
        // logged and the next event proceeds.
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpGatewayTransport {
    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError> {
        let url = format!("{}/send", self.base_url.trim_end_matches('/'));
        let response = self.client.post(&url).json(&message).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected(format!("{status}: {body}")));
        }
        Ok(())
    }
}

/// Blob storage seam for uploaded résumés.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn put(&self, name: &str, data: &[u8]) -> std::io::Result<()>;
    async fn get(&self, name: &str) -> std::io::Result<Vec<u8>>;
    async fn exists(&self, name: &str) -> bool;
}

/// Stores blobs as flat files under a root directory.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, name: &str, data: &[u8]) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(name), data).await
    }

    async fn get(&self, name: &str) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.root.join(name)).await
    }

    async fn exists(&self, name: &str) -> bool {
        tokio::fs::try_exists(self.root.join(name))
            .await
            .unwrap_or(false)
    }
}
