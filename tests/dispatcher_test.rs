use std::sync::Arc;

use ordercast::push::dispatcher::{BatchDispatcher, PROVIDER_BATCH_LIMIT};
use ordercast::push::provider::MockProvider;
use ordercast::push::types::{NotificationPayload, Token};

/// 创建测试用 payload
fn test_payload() -> NotificationPayload {
    NotificationPayload::new("🎉 Weekend Special", "Half price jollof")
        .with_data("type", "special_offer")
}

/// 生成 n 个有序令牌
fn tokens(n: usize) -> Vec<Token> {
    (0..n).map(|i| format!("token-{}", i)).collect()
}

#[tokio::test]
async fn empty_tokens_is_a_noop() {
    let provider = Arc::new(MockProvider::new());
    let dispatcher = BatchDispatcher::new(provider.clone());

    let outcomes = dispatcher.dispatch(&test_payload(), &[]).await;

    assert!(outcomes.is_empty());
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn twelve_hundred_tokens_make_three_batches() {
    let provider = Arc::new(MockProvider::new());
    let dispatcher = BatchDispatcher::new(provider.clone());

    let tokens = tokens(1200);
    let outcomes = dispatcher.dispatch(&test_payload(), &tokens).await;

    assert_eq!(outcomes.len(), 3);
    let calls = provider.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].tokens.len(), 500);
    assert_eq!(calls[1].tokens.len(), 500);
    assert_eq!(calls[2].tokens.len(), 200);

    // 批次序号与尝试数
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.batch_index, i);
        assert_eq!(outcome.attempted, calls[i].tokens.len());
        assert!(outcome.error.is_none());
    }
}

#[tokio::test]
async fn batching_preserves_input_order() {
    let provider = Arc::new(MockProvider::new());
    let dispatcher = BatchDispatcher::new(provider.clone());

    let tokens = tokens(1023);
    dispatcher.dispatch(&test_payload(), &tokens).await;

    let flattened: Vec<Token> = provider
        .calls()
        .into_iter()
        .flat_map(|call| call.tokens)
        .collect();
    assert_eq!(flattened, tokens);
}

#[tokio::test]
async fn batch_count_is_ceil_of_tokens_over_limit() {
    for n in [1usize, 2, 499, 500, 501, 999, 1000, 1001] {
        let provider = Arc::new(MockProvider::new());
        let dispatcher = BatchDispatcher::new(provider);

        let outcomes = dispatcher.dispatch(&test_payload(), &tokens(n)).await;
        assert_eq!(
            outcomes.len(),
            n.div_ceil(PROVIDER_BATCH_LIMIT),
            "unexpected batch count for n={}",
            n
        );
    }
}

#[tokio::test]
async fn middle_batch_failure_does_not_stop_siblings() {
    let provider = Arc::new(MockProvider::new());
    provider.fail_calls(&[1]); // 第二批失败
    let dispatcher = BatchDispatcher::new(provider.clone());

    let outcomes = dispatcher.dispatch(&test_payload(), &tokens(1200)).await;

    // 三批全部被尝试
    assert_eq!(provider.calls().len(), 3);
    assert_eq!(outcomes.len(), 3);

    assert!(outcomes[0].error.is_none());
    assert!(outcomes[1].error.is_some());
    assert!(outcomes[2].error.is_none());

    // 失败批次的 failure_count 覆盖整批
    assert_eq!(outcomes[1].attempted, 500);
    assert_eq!(outcomes[1].success_count, 0);
    assert_eq!(outcomes[1].failure_count, 500);
    assert_eq!(outcomes[0].success_count, 500);
    assert_eq!(outcomes[2].success_count, 200);
}

#[tokio::test]
async fn single_send_path_uses_one_token_call() {
    let provider = Arc::new(MockProvider::new());
    let dispatcher = BatchDispatcher::new(provider.clone());

    let token = "user-token-1".to_string();
    let outcome = dispatcher.dispatch_single(&test_payload(), &token).await;

    assert_eq!(outcome.attempted, 1);
    assert_eq!(outcome.success_count, 1);
    assert!(outcome.error.is_none());

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].single);
    assert_eq!(calls[0].tokens, vec![token]);
}

#[tokio::test]
async fn single_send_failure_is_captured_in_outcome() {
    let provider = Arc::new(MockProvider::new());
    provider.fail_calls(&[0]);
    let dispatcher = BatchDispatcher::new(provider);

    let outcome = dispatcher
        .dispatch_single(&test_payload(), &"user-token-1".to_string())
        .await;

    assert!(outcome.error.is_some());
    assert_eq!(outcome.success_count, 0);
    assert_eq!(outcome.failure_count, 1);
}
