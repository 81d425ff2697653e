use tokio::sync::broadcast;
use crate::domain::events::DomainEvent;
use crate::error::Result;

/// In-process Event Bus（进程内事件总线）
///
/// 外部事件源（文档存储触发器、MQ 消费者等）把 DomainEvent 发布到这里，
/// EventRouter 订阅后执行派发。未来可以替换为持久化队列
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// 创建新的事件总线
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1000);
        Self { sender }
    }

    /// 发布事件
    pub fn publish(&self, event: DomainEvent) -> Result<()> {
        self.sender.send(event).map_err(|e| {
            crate::error::ServerError::Internal(format!("Event bus error: {}", e))
        })?;
        Ok(())
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
