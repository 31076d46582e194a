//! 订阅（电话账号）标识。

use std::{fmt, sync::Arc};

/// 一个射频订阅端点（SIM 卡槽 / 电话账号）的不透明标识。
///
/// # 教案式说明
/// - **意图 (Why)**：追踪器只把订阅标识当作映射键使用，不关心其内部结构；
/// - **契约 (What)**：内部以 `Arc<str>` 保存账号 ID，克隆廉价，可安全跨线程共享；创建后不可变；
/// - **风险 (Trade-offs)**：比较基于字符串全文，调用方需保证同一账号始终以相同的规范形式构造。
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SubscriptionKey(Arc<str>);

impl SubscriptionKey {
    /// 以账号 ID 构造订阅标识。
    pub fn new(account_id: impl Into<String>) -> Self {
        Self(Arc::<str>::from(account_id.into()))
    }

    /// 账号 ID 的字符串视图。
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubscriptionKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SubscriptionKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
