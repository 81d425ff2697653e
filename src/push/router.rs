use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::events::DomainEvent;
use crate::error::Result;
use crate::infra::event_bus::EventBus;
use crate::infra::metrics;
use crate::push::dispatcher::BatchDispatcher;
use crate::push::message;
use crate::push::types::{DispatchOutcome, DispatchTarget};
use crate::repository::{NotificationRepository, TokenSource};

/// Event Router（事件路由器）
///
/// 职责：
/// - 订阅 EventBus 上的 DomainEvent
/// - 为每种事件选择派发目标并构建 payload
/// - 解析令牌后交给 BatchDispatcher
/// - 汇总日志、指标与审计记录
///
/// 派发之间不共享可变状态，多个事件可以由独立任务并发处理
pub struct EventRouter {
    token_source: Arc<dyn TokenSource>,
    dispatcher: BatchDispatcher,
    notifications: Option<Arc<NotificationRepository>>,
}

impl EventRouter {
    pub fn new(token_source: Arc<dyn TokenSource>, dispatcher: BatchDispatcher) -> Self {
        Self {
            token_source,
            dispatcher,
            notifications: None,
        }
    }

    /// 创建带审计记录的 Router（写入 ordercast_notifications）
    pub fn with_notification_log(
        token_source: Arc<dyn TokenSource>,
        dispatcher: BatchDispatcher,
        notifications: Arc<NotificationRepository>,
    ) -> Self {
        Self {
            token_source,
            dispatcher,
            notifications: Some(notifications),
        }
    }

    /// 事件类型 -> 派发目标的固定绑定
    fn target_for(event: &DomainEvent) -> DispatchTarget {
        match event {
            DomainEvent::OrderCreated { .. } => DispatchTarget::AllAdmins,
            DomainEvent::OrderStatusChanged { user_id, .. } => {
                DispatchTarget::SingleUser(user_id.clone())
            }
            DomainEvent::OfferCreated { .. } => DispatchTarget::AllUsers,
        }
    }

    /// 启动 Router，消费事件直到总线关闭
    pub async fn start(&self, event_bus: Arc<EventBus>) -> Result<()> {
        let mut receiver = event_bus.subscribe();

        info!("[ROUTER] Started, provider={}", self.dispatcher.provider_name());

        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.handle_event(event).await {
                        error!("[ROUTER] Dispatch aborted: {}", e);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("[ROUTER] Event bus lagged, {} event(s) dropped", skipped);
                    metrics::record_event_bus_lagged();
                }
                Err(RecvError::Closed) => {
                    info!("[ROUTER] Event bus closed, stopping");
                    return Ok(());
                }
            }
        }
    }

    /// 处理单个事件，返回按批次排列的派发结果
    ///
    /// 只有令牌解析失败会向上返回错误（该次派发中止）；
    /// 投递失败全部留在 outcome 里
    pub async fn handle_event(&self, event: DomainEvent) -> Result<Vec<DispatchOutcome>> {
        let dispatch_id = Uuid::new_v4().to_string();
        let kind = event.kind();

        let payload = match message::build(&event) {
            Some(payload) => payload,
            None => {
                // 策略跳过：状态未变化、未识别状态或未激活优惠
                info!(
                    "[ROUTER] Skipped by policy: dispatch_id={}, event={}",
                    dispatch_id, kind
                );
                metrics::record_skipped(kind);
                return Ok(Vec::new());
            }
        };

        let target = Self::target_for(&event);
        debug!(
            "[ROUTER] Resolving tokens: dispatch_id={}, event={}, target={}",
            dispatch_id,
            kind,
            target.as_str()
        );

        let tokens = match self.token_source.resolve(&target).await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(
                    "[ROUTER] Token resolution failed: dispatch_id={}, event={}: {}",
                    dispatch_id, kind, e
                );
                metrics::record_resolution_failure(kind);
                return Err(e);
            }
        };

        if tokens.is_empty() {
            info!(
                "[ROUTER] No recipients: dispatch_id={}, event={}, target={}",
                dispatch_id,
                kind,
                target.as_str()
            );
            metrics::record_empty_recipients(kind);
            return Ok(Vec::new());
        }

        // 单目标通知走专用单发路径，多目标走批次路径
        let outcomes = match &target {
            DispatchTarget::SingleUser(_) => {
                vec![self.dispatcher.dispatch_single(&payload, &tokens[0]).await]
            }
            _ => self.dispatcher.dispatch(&payload, &tokens).await,
        };

        let success: u32 = outcomes.iter().map(|o| o.success_count).sum();
        let failed: u32 = outcomes.iter().map(|o| o.failure_count).sum();
        let failed_batches = outcomes.iter().filter(|o| o.error.is_some()).count();

        metrics::record_dispatch(kind);
        metrics::record_tokens_attempted(tokens.len() as u64);
        metrics::record_batches(outcomes.len() as u64, failed_batches as u64);

        info!(
            "[ROUTER] Dispatch done: dispatch_id={}, event={}, tokens={}, batches={}, success={}, failed={}",
            dispatch_id,
            kind,
            tokens.len(),
            outcomes.len(),
            success,
            failed
        );

        // 审计记录失败只打日志，不影响派发结果
        if let Some(repo) = &self.notifications {
            if let Err(e) = repo
                .record(
                    &dispatch_id,
                    kind,
                    &payload.title,
                    &payload.body,
                    tokens.len() as i64,
                )
                .await
            {
                warn!(
                    "[ROUTER] Failed to record notification: dispatch_id={}: {}",
                    dispatch_id, e
                );
            }
        }

        Ok(outcomes)
    }
}
