//! Prometheus 指标：派发次数、批次成败、策略跳过、清理行数等
//!
//! 通过 `init()` 安装全局 Recorder 并启动内置 HTTP 抓取端点。

use std::net::SocketAddr;

/// 指标名称
const COUNTER_DISPATCH_TOTAL: &str = "ordercast_dispatch_total";
const COUNTER_BATCHES_SENT: &str = "ordercast_batches_sent_total";
const COUNTER_BATCH_FAILURES: &str = "ordercast_batch_failures_total";
const COUNTER_TOKENS_ATTEMPTED: &str = "ordercast_tokens_attempted_total";
const COUNTER_SKIPPED: &str = "ordercast_skipped_total";
const COUNTER_EMPTY_RECIPIENTS: &str = "ordercast_empty_recipients_total";
const COUNTER_RESOLUTION_FAILURES: &str = "ordercast_resolution_failures_total";
const COUNTER_RETENTION_DELETED: &str = "ordercast_retention_deleted_total";
const COUNTER_EVENT_BUS_LAGGED: &str = "ordercast_event_bus_lagged_total";

/// 初始化 Prometheus 指标（安装全局 Recorder，并在 addr 上暴露抓取端点）。
/// 仅需在进程内调用一次；重复调用会返回 Err。
pub fn init(addr: SocketAddr) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    Ok(())
}

/// 记录一次派发（按事件类型）。
pub fn record_dispatch(event_kind: &str) {
    metrics::counter!(COUNTER_DISPATCH_TOTAL, "event" => event_kind.to_string()).increment(1);
}

/// 记录批次结果：发送总数与失败数。
pub fn record_batches(sent: u64, failed: u64) {
    metrics::counter!(COUNTER_BATCHES_SENT).increment(sent);
    if failed > 0 {
        metrics::counter!(COUNTER_BATCH_FAILURES).increment(failed);
    }
}

/// 记录尝试投递的令牌数。
pub fn record_tokens_attempted(count: u64) {
    metrics::counter!(COUNTER_TOKENS_ATTEMPTED).increment(count);
}

/// 记录一次策略跳过（状态未变化、未识别状态、未激活优惠）。
pub fn record_skipped(event_kind: &str) {
    metrics::counter!(COUNTER_SKIPPED, "event" => event_kind.to_string()).increment(1);
}

/// 记录一次"无接收者" no-op。
pub fn record_empty_recipients(event_kind: &str) {
    metrics::counter!(COUNTER_EMPTY_RECIPIENTS, "event" => event_kind.to_string()).increment(1);
}

/// 记录一次令牌解析失败（派发中止）。
pub fn record_resolution_failure(event_kind: &str) {
    metrics::counter!(COUNTER_RESOLUTION_FAILURES, "event" => event_kind.to_string()).increment(1);
}

/// 记录清理删除的通知行数。
pub fn record_retention_deleted(count: u64) {
    metrics::counter!(COUNTER_RETENTION_DELETED).increment(count);
}

/// 记录 EventBus lagged 次数（Counter）。
pub fn record_event_bus_lagged() {
    metrics::counter!(COUNTER_EVENT_BUS_LAGGED).increment(1);
}
