use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// 设备推送令牌（来源不保证唯一，重复令牌最多造成重复通知，无害）
pub type Token = String;

/// 通知 Payload
///
/// 每个事件构造一次；同一次派发的所有批次共享同一份 payload，构造后不再修改
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: HashMap::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// 派发目标（决定 TokenSource 执行哪种查询）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DispatchTarget {
    /// 单个用户（状态变更通知）
    SingleUser(String),
    /// 全部管理员设备（新订单通知）
    AllAdmins,
    /// 全部用户设备（优惠活动通知）
    AllUsers,
}

impl DispatchTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchTarget::SingleUser(_) => "single_user",
            DispatchTarget::AllAdmins => "all_admins",
            DispatchTarget::AllUsers => "all_users",
        }
    }
}

/// 单个批次的派发结果
///
/// 批次失败只记录在自己的 outcome 中，不影响其它批次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// 批次序号（按输入令牌顺序，从 0 开始）
    pub batch_index: usize,
    /// 本批次尝试投递的令牌数
    pub attempted: usize,
    /// Provider 报告的成功数
    pub success_count: u32,
    /// Provider 报告的失败数
    pub failure_count: u32,
    /// 批次级错误（Provider 调用整体失败时填充）
    pub error: Option<String>,
}

impl DispatchOutcome {
    /// 成功批次的 outcome
    pub fn delivered(batch_index: usize, attempted: usize, success_count: u32, failure_count: u32) -> Self {
        Self {
            batch_index,
            attempted,
            success_count,
            failure_count,
            error: None,
        }
    }

    /// 整批失败的 outcome
    pub fn failed(batch_index: usize, attempted: usize, error: String) -> Self {
        Self {
            batch_index,
            attempted,
            success_count: 0,
            failure_count: attempted as u32,
            error: Some(error),
        }
    }
}
