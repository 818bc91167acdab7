// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::NotificationSettings;
use crate::domain::models::notification::NotificationRequest;
use crate::domain::services::notification_service::NotificationDispatcher;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// 推送网关分发器
///
/// 将通知请求以签名JSON的形式投递到推送网关。请求带有限定
/// 超时，超时按投递失败处理；投递语义为尽力而为，去重由网关
/// 按幂等键完成。
pub struct PushDispatcher {
    /// HTTP 客户端
    client: reqwest::Client,
    /// 网关URL
    gateway_url: String,
    /// 签名密钥
    secret: String,
}

impl PushDispatcher {
    /// 创建新的推送网关分发器
    pub fn new(settings: &NotificationSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            gateway_url: settings.gateway_url.clone(),
            secret: settings.secret.clone(),
        }
    }

    /// 为负载生成签名
    fn generate_signature(&self, payload: &str, timestamp: i64) -> String {
        let message = format!("{}.{}", timestamp, payload);
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());
        let result = mac.finalize();
        hex::encode(result.into_bytes())
    }
}

#[async_trait]
impl NotificationDispatcher for PushDispatcher {
    async fn notify(&self, request: &NotificationRequest) -> Result<()> {
        let timestamp = chrono::Utc::now().timestamp();
        let payload_str = serde_json::to_string(request)?;
        let signature = self.generate_signature(&payload_str, timestamp);

        let response = self
            .client
            .post(&self.gateway_url)
            .header("Content-Type", "application/json")
            .header("X-Tasksla-Signature", signature)
            .header("X-Tasksla-Timestamp", timestamp.to_string())
            .header("X-Tasksla-Idempotency-Key", request.idempotency_key())
            .json(request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Notification delivery failed with status {}: {}",
                status,
                body
            ))
        }
    }
}

#[cfg(test)]
#[path = "push_dispatcher_test.rs"]
mod tests;
