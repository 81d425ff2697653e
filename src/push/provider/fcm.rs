use crate::error::{Result, ServerError};
use crate::push::provider::provider_trait::{PushProvider, SendReceipt};
use crate::push::types::{NotificationPayload, Token};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error};

/// FCM (Firebase Cloud Messaging) Provider
///
/// 使用 FCM HTTP v1 API
pub struct FcmProvider {
    client: Client,
    project_id: String,
    access_token: String, // OAuth 2.0 access token
}

impl FcmProvider {
    /// 创建新的 FCM Provider
    ///
    /// # 参数
    /// - project_id: Firebase 项目 ID
    /// - access_token: OAuth 2.0 access token（从 service account 获取）
    pub fn new(project_id: String, access_token: String) -> Self {
        Self {
            client: Client::new(),
            project_id,
            access_token,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.project_id
        )
    }

    /// 构建单条 FCM 消息体
    fn build_fcm_message(&self, token: &Token, payload: &NotificationPayload) -> serde_json::Value {
        json!({
            "message": {
                "token": token,
                "notification": {
                    "title": payload.title,
                    "body": payload.body
                },
                "data": payload.data,
                "android": {
                    "priority": "high"
                },
                "apns": {
                    "headers": {
                        "apns-priority": "10"
                    }
                }
            }
        })
    }

    /// 投递单条消息，失败时返回 Delivery 错误
    async fn send_one(&self, token: &Token, payload: &NotificationPayload) -> Result<()> {
        let body = self.build_fcm_message(token, payload);

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ServerError::Delivery(format!("FCM request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ServerError::Delivery(format!(
                "FCM push failed: status={}, error={}",
                status, error_text
            )))
        }
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    /// HTTP v1 没有服务端 multicast 端点，这里按官方 SDK sendEach 的方式
    /// 在客户端逐条投递并聚合回执；单条失败只计入 failure_count
    async fn send_to_many(
        &self,
        tokens: &[Token],
        payload: &NotificationPayload,
    ) -> Result<SendReceipt> {
        let mut receipt = SendReceipt::default();

        for token in tokens {
            match self.send_one(token, payload).await {
                Ok(()) => receipt.success_count += 1,
                Err(e) => {
                    receipt.failure_count += 1;
                    debug!("[FCM] Token delivery failed: {}", e);
                }
            }
        }

        debug!(
            "[FCM] Multicast done: attempted={}, success={}, failed={}",
            tokens.len(),
            receipt.success_count,
            receipt.failure_count
        );

        Ok(receipt)
    }

    async fn send_to_one(&self, token: &Token, payload: &NotificationPayload) -> Result<()> {
        if let Err(e) = self.send_one(token, payload).await {
            error!("[FCM] Push failed: {}", e);
            return Err(e);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fcm"
    }
}
