use crate::domain::events::{DomainEvent, OrderStatus};
use crate::push::types::NotificationPayload;

/// 点击通知后客户端的处理动作（Flutter 客户端约定）
const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// 状态 -> 通知文案映射表
///
/// 新增状态只需在这里加一行，派发逻辑不用动
const STATUS_MESSAGES: &[(OrderStatus, &str, &str)] = &[
    (
        OrderStatus::Preparing,
        "👨‍🍳 Order is Being Prepared!",
        "Your delicious meal is being cooked with care.",
    ),
    (
        OrderStatus::OnTheWay,
        "🚗 Order is On the Way!",
        "Your food is heading to you. Get ready!",
    ),
    (
        OrderStatus::Delivered,
        "✅ Order Delivered!",
        "Your order has been delivered. Enjoy your meal!",
    ),
    (
        OrderStatus::Cancelled,
        "❌ Order Cancelled",
        "Your order has been cancelled.",
    ),
];

fn status_message(status: OrderStatus) -> Option<(&'static str, &'static str)> {
    STATUS_MESSAGES
        .iter()
        .find(|(s, _, _)| *s == status)
        .map(|(_, title, body)| (*title, *body))
}

/// 将领域事件映射为通知 Payload（纯函数，无 I/O）
///
/// 返回 None 表示按策略跳过：
/// - 状态未变化或状态不在识别集合内
/// - 优惠活动未激活
pub fn build(event: &DomainEvent) -> Option<NotificationPayload> {
    match event {
        DomainEvent::OrderCreated {
            order_id,
            user_name,
            total,
        } => Some(
            NotificationPayload::new(
                "🔔 New Order Received!",
                format!("Order from {} - ₦{:.0}", user_name, total),
            )
            .with_data("orderId", order_id.clone())
            .with_data("type", "new_order")
            .with_data("click_action", CLICK_ACTION),
        ),

        DomainEvent::OrderStatusChanged {
            order_id,
            previous_status,
            new_status,
            ..
        } => {
            // 状态未变化的更新不通知
            if previous_status == new_status {
                return None;
            }
            let status = OrderStatus::from_str(new_status)?;
            let (title, body) = status_message(status)?;
            Some(
                NotificationPayload::new(title, body)
                    .with_data("orderId", order_id.clone())
                    .with_data("status", status.as_str())
                    .with_data("type", "order_status")
                    .with_data("click_action", CLICK_ACTION),
            )
        }

        DomainEvent::OfferCreated {
            offer_id,
            title,
            description,
            discount,
            is_active,
        } => {
            if !is_active {
                return None;
            }
            Some(
                NotificationPayload::new(
                    format!("🎉 {}", title),
                    description
                        .clone()
                        .unwrap_or_else(|| "Check out our special offer!".to_string()),
                )
                .with_data("offerId", offer_id.clone())
                .with_data("type", "special_offer")
                .with_data("discount", discount.clone().unwrap_or_default())
                .with_data("click_action", CLICK_ACTION),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_event(previous: &str, new: &str) -> DomainEvent {
        DomainEvent::OrderStatusChanged {
            order_id: "order-1".to_string(),
            user_id: "u1".to_string(),
            previous_status: previous.to_string(),
            new_status: new.to_string(),
        }
    }

    #[test]
    fn order_created_payload() {
        let event = DomainEvent::OrderCreated {
            order_id: "order-42".to_string(),
            user_name: "Ada".to_string(),
            total: 1500.0,
        };

        let payload = build(&event).unwrap();
        assert_eq!(payload.title, "🔔 New Order Received!");
        assert_eq!(payload.body, "Order from Ada - ₦1500");
        assert_eq!(payload.data.get("orderId").unwrap(), "order-42");
        assert_eq!(payload.data.get("type").unwrap(), "new_order");
        assert_eq!(
            payload.data.get("click_action").unwrap(),
            "FLUTTER_NOTIFICATION_CLICK"
        );
    }

    #[test]
    fn order_total_rounds_to_whole_naira() {
        let event = DomainEvent::OrderCreated {
            order_id: "order-43".to_string(),
            user_name: "Bola".to_string(),
            total: 2499.75,
        };

        let payload = build(&event).unwrap();
        assert_eq!(payload.body, "Order from Bola - ₦2500");
    }

    #[test]
    fn status_change_builds_from_table() {
        let payload = build(&status_event("preparing", "on_the_way")).unwrap();
        assert_eq!(payload.title, "🚗 Order is On the Way!");
        assert_eq!(payload.body, "Your food is heading to you. Get ready!");
        assert_eq!(payload.data.get("status").unwrap(), "on_the_way");
        assert_eq!(payload.data.get("type").unwrap(), "order_status");
    }

    #[test]
    fn noop_status_transition_is_skipped() {
        assert!(build(&status_event("preparing", "preparing")).is_none());
    }

    #[test]
    fn unrecognized_status_is_skipped() {
        assert!(build(&status_event("preparing", "pending")).is_none());
        assert!(build(&status_event("preparing", "refunded")).is_none());
    }

    #[test]
    fn all_recognized_statuses_have_messages() {
        for status in ["preparing", "on_the_way", "delivered", "cancelled"] {
            let payload = build(&status_event("created", status)).unwrap();
            assert!(!payload.title.is_empty());
            assert!(!payload.body.is_empty());
        }
    }

    #[test]
    fn inactive_offer_is_skipped() {
        let event = DomainEvent::OfferCreated {
            offer_id: "offer-1".to_string(),
            title: "Weekend Special".to_string(),
            description: Some("Half price jollof".to_string()),
            discount: Some("50%".to_string()),
            is_active: false,
        };
        assert!(build(&event).is_none());
    }

    #[test]
    fn offer_without_description_uses_fallback_body() {
        let event = DomainEvent::OfferCreated {
            offer_id: "offer-2".to_string(),
            title: "Flash Sale".to_string(),
            description: None,
            discount: None,
            is_active: true,
        };

        let payload = build(&event).unwrap();
        assert_eq!(payload.title, "🎉 Flash Sale");
        assert_eq!(payload.body, "Check out our special offer!");
        assert_eq!(payload.data.get("discount").unwrap(), "");
        assert_eq!(payload.data.get("type").unwrap(), "special_offer");
    }
}
