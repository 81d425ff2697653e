use crate::error::{Result, ServerError};
use crate::push::provider::provider_trait::{PushProvider, SendReceipt};
use crate::push::types::{NotificationPayload, Token};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

/// Mock Provider（用于测试和未配置 FCM 时的降级）
///
/// 不调用真实 API，记录每次调用并打印日志。
/// 测试可以通过 fail_calls 让第 N 次调用整体失败，验证批次隔离。
#[derive(Default)]
pub struct MockProvider {
    calls: Mutex<Vec<RecordedCall>>,
    fail_calls: Mutex<Vec<usize>>,
}

/// 一次 Provider 调用的记录
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// 本次调用携带的令牌（单发路径记录一个）
    pub tokens: Vec<Token>,
    pub title: String,
    /// true 表示走 send_to_one 路径
    pub single: bool,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 让指定序号（从 0 开始，按调用顺序）的调用返回错误
    pub fn fail_calls(&self, indices: &[usize]) {
        *self.fail_calls.lock() = indices.to_vec();
    }

    /// 已记录的调用（包括失败的）
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn record(&self, tokens: Vec<Token>, payload: &NotificationPayload, single: bool) -> Result<()> {
        let mut calls = self.calls.lock();
        let index = calls.len();
        calls.push(RecordedCall {
            tokens,
            title: payload.title.clone(),
            single,
        });

        if self.fail_calls.lock().contains(&index) {
            return Err(ServerError::Delivery(format!(
                "mock delivery failure injected for call {}",
                index
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PushProvider for MockProvider {
    async fn send_to_many(
        &self,
        tokens: &[Token],
        payload: &NotificationPayload,
    ) -> Result<SendReceipt> {
        let count = tokens.len() as u32;
        self.record(tokens.to_vec(), payload, false)?;

        info!(
            "[MOCK PUSH] Multicast: tokens={}, title={}",
            tokens.len(),
            payload.title
        );

        Ok(SendReceipt {
            success_count: count,
            failure_count: 0,
        })
    }

    async fn send_to_one(&self, token: &Token, payload: &NotificationPayload) -> Result<()> {
        self.record(vec![token.clone()], payload, true)?;

        info!(
            "[MOCK PUSH] Single send: token={}, title={}",
            token, payload.title
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
