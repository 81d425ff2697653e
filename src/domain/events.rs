use serde::{Deserialize, Serialize};

/// Domain Events（领域事件）
///
/// 由外部事件源（文档存储触发器、消息队列等）构造并发布到 EventBus。
/// 每个事件只构造一次，派发过程中不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// 新订单已创建
    OrderCreated {
        order_id: String,
        user_name: String,
        total: f64,
    },

    /// 订单状态已变更
    ///
    /// previous_status / new_status 保留事件源的原始字符串，
    /// 识别与跳过逻辑在 MessageBuilder 中处理
    OrderStatusChanged {
        order_id: String,
        user_id: String,
        previous_status: String,
        new_status: String,
    },

    /// 新优惠活动已创建
    OfferCreated {
        offer_id: String,
        title: String,
        description: Option<String>,
        discount: Option<String>,
        is_active: bool,
    },
}

impl DomainEvent {
    /// 事件类型标识（用于日志与指标 label）
    pub fn kind(&self) -> &'static str {
        match self {
            DomainEvent::OrderCreated { .. } => "order_created",
            DomainEvent::OrderStatusChanged { .. } => "order_status_changed",
            DomainEvent::OfferCreated { .. } => "offer_created",
        }
    }
}

/// 已识别的订单状态集合
///
/// 事件源之外的状态值（如 "pending"）解析失败，对应通知被跳过
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Preparing,
    OnTheWay,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Preparing => "preparing",
            OrderStatus::OnTheWay => "on_the_way",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "preparing" => Some(OrderStatus::Preparing),
            "on_the_way" => Some(OrderStatus::OnTheWay),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}
