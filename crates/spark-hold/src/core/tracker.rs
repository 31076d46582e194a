//! # HoldTracker：保持能力准入追踪器
//!
//! ## 核心意图（Why）
//! - 维护“订阅 → 呼叫腿分组”的映射，并在每次成员变化或射频模式变化后，重新推导每条呼叫腿是否允许保持；
//! - 呼叫建立、拆除与射频模式通知可能来自不同线程，映射与分组必须显式同步。
//!
//! ## 架构定位（Where）
//! - 由外部呼叫生命周期管理器（连接服务）驱动，追踪器只写回呼叫腿上的保持标记，不掌控呼叫腿生命周期；
//! - 射频模式通过 [`RadioModeProbe`] 在每次重算时实时读取，从不缓存。
//!
//! ## 行为契约（What）
//! - `add_leg`：按对象身份去重，重复注册为无操作；成功插入后重算该订阅；
//! - `remove_leg`：订阅未知或呼叫腿不在分组中时为无操作，且不触发重算；成功移除后重算该订阅，
//!   被移除的呼叫腿不会再被写入；
//! - `recompute_all`：遍历全部已知订阅逐一重算；
//! - 重算规则：子腿一律写 `false`；顶层呼叫统一写 `顶层数量 <= 限额`。
//!
//! ## 并发模型（How）
//! - 以 `DashMap` 保存分组；`add_leg`/`remove_leg` 在同一把分片写锁内完成“变更 + 重算”，
//!   调用方观察到的是一个原子步骤；
//! - `recompute` 同样持有写锁，保证同一分组的两次重算不会交错写入；
//! - 射频探针与呼叫腿 setter 均在持锁期间调用，二者都不得回调追踪器。
//!
//! ## 风险提示（Trade-offs）
//! - `recompute_all` 对每个订阅独立读取射频状态，遍历期间模式若发生变化，不同订阅可能基于不同快照得出结论；
//! - 空分组不会被回收，重算空分组不产生任何写入。

use std::{fmt, hash::Hash, sync::Arc};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::core::{
    leg::{LegKind, LegRef, same_leg},
    policy::HoldLimits,
    radio::RadioModeProbe,
    subscription::SubscriptionKey,
};

/// 单次重算的诊断摘要，调用方可以忽略。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecomputeOutcome {
    /// 参与限额比较的顶层呼叫数量。
    pub top_level_count: usize,
    /// 分组中的会议子腿数量。
    pub child_count: usize,
    /// 本次查表得到的限额。
    pub limit: usize,
    /// 写给顶层呼叫的保持标记。
    pub holdable: bool,
}

/// 保持能力准入追踪器。
///
/// # 教案式注释
/// - **意图 (Why)**：封装并发安全存储，避免连接服务直接操作映射与标记；
/// - **契约 (What)**：`K` 为订阅标识，仅要求可比较、可哈希；呼叫腿以 [`LegRef`] 共享引用形式登记；
/// - **风险 (Trade-offs)**：`DashMap` 写锁在重算期间覆盖整个分片，探针实现必须足够轻量。
pub struct HoldTracker<K = SubscriptionKey>
where
    K: Eq + Hash,
{
    groups: DashMap<K, Vec<LegRef>>,
    radio: Arc<dyn RadioModeProbe>,
    limits: HoldLimits,
}

impl<K> HoldTracker<K>
where
    K: Eq + Hash + fmt::Debug,
{
    /// 以射频探针与默认限额构造追踪器。
    pub fn new(radio: Arc<dyn RadioModeProbe>) -> Self {
        Self::with_limits(radio, HoldLimits::default())
    }

    /// 以射频探针与指定限额构造追踪器。
    ///
    /// 限额应事先经过 [`HoldLimits::validate`]，通常来自 [`HoldConfig`](crate::config::HoldConfig)。
    pub fn with_limits(radio: Arc<dyn RadioModeProbe>, limits: HoldLimits) -> Self {
        Self {
            groups: DashMap::new(),
            radio,
            limits,
        }
    }

    /// 当前使用的限额表。
    pub fn limits(&self) -> HoldLimits {
        self.limits
    }

    /// 将呼叫腿登记到订阅分组中。
    ///
    /// # 教案式注释
    /// - **意图 (Why)**：呼叫建立时调用；首次出现的订阅会创建空分组；
    /// - **契约 (What)**：
    ///   - 以对象身份判断是否已登记，重复登记为无操作且不触发重算；
    ///   - 成功插入后在同一把写锁内重算该订阅；
    ///   - 返回值表示分组成员是否发生变化，调用方可以忽略。
    pub fn add_leg(&self, key: K, leg: LegRef) -> bool {
        let mut group = self.groups.entry(key).or_default();
        if group.iter().any(|existing| same_leg(existing, &leg)) {
            trace!(subscription = ?group.key(), "leg already registered");
            return false;
        }

        group.push(leg);
        self.apply(group.key(), group.value());
        true
    }

    /// 将呼叫腿从订阅分组中移除。
    ///
    /// # 教案式注释
    /// - **意图 (Why)**：呼叫销毁时调用，剩余呼叫腿需要重新评估；
    /// - **契约 (What)**：
    ///   - 订阅未知或呼叫腿不在分组中时直接返回 `false`，不产生任何写入；
    ///   - 成功移除后保持剩余呼叫腿的插入顺序，并重算该订阅；
    ///   - 被移除的呼叫腿不会再被写入；
    ///   - 分组变空后仍保留在映射中。
    pub fn remove_leg(&self, key: &K, leg: &LegRef) -> bool {
        let Some(mut group) = self.groups.get_mut(key) else {
            return false;
        };
        let Some(index) = group.iter().position(|existing| same_leg(existing, leg)) else {
            return false;
        };

        group.remove(index);
        self.apply(group.key(), group.value());
        true
    }

    /// 重算单个订阅的保持标记。
    ///
    /// 订阅未知时返回 `None`。呼叫腿种类发生变化（例如并入会议）后，宿主应对所属订阅调用本方法。
    pub fn recompute(&self, key: &K) -> Option<RecomputeOutcome> {
        let group = self.groups.get_mut(key)?;
        Some(self.apply(group.key(), group.value()))
    }

    /// 重算全部订阅，返回访问过的订阅数量。
    ///
    /// # 教案式注释
    /// - **意图 (Why)**：射频模式切换会同时影响所有订阅的限额，必须整体重算；
    /// - **契约 (What)**：每个订阅独立读取射频状态，不保证跨订阅快照一致。
    pub fn recompute_all(&self) -> usize {
        let mut visited = 0;
        for group in self.groups.iter_mut() {
            self.apply(group.key(), group.value());
            visited += 1;
        }
        debug!(visited, "recomputed hold capability for all subscriptions");
        visited
    }

    /// 订阅分组中的呼叫腿数量；订阅未知时返回 `None`。
    pub fn group_len(&self, key: &K) -> Option<usize> {
        self.groups.get(key).map(|group| group.len())
    }

    /// 呼叫腿是否登记在订阅分组中。
    pub fn contains(&self, key: &K, leg: &LegRef) -> bool {
        self.groups
            .get(key)
            .is_some_and(|group| group.iter().any(|existing| same_leg(existing, leg)))
    }

    /// 已知订阅的快照。
    pub fn subscriptions(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.groups.iter().map(|group| group.key().clone()).collect()
    }

    /// 已知订阅数量（包含空分组）。
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// 是否尚未见过任何订阅。
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 在已持有分组锁的前提下推导并写回保持标记。
    fn apply(&self, key: &K, legs: &[LegRef]) -> RecomputeOutcome {
        let kinds: Vec<LegKind> = legs.iter().map(|leg| leg.kind()).collect();
        let top_level_count = kinds
            .iter()
            .filter(|kind| **kind == LegKind::TopLevel)
            .count();

        let snapshot = self.radio.snapshot();
        let limit = self.limits.limit_for(snapshot);
        let holdable = top_level_count <= limit;
        trace!(
            subscription = ?key,
            top_level_count,
            limit,
            holdable,
            mode = ?snapshot.mode,
            multiple_held_calls = snapshot.multiple_held_calls,
            "recomputed hold capability"
        );

        for (leg, kind) in legs.iter().zip(&kinds) {
            leg.set_holdable(*kind == LegKind::TopLevel && holdable);
        }

        RecomputeOutcome {
            top_level_count,
            child_count: legs.len() - top_level_count,
            limit,
            holdable,
        }
    }
}

impl<K> fmt::Debug for HoldTracker<K>
where
    K: Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<(String, usize)> = self
            .groups
            .iter()
            .map(|group| (format!("{:?}", group.key()), group.len()))
            .collect();
        f.debug_struct("HoldTracker")
            .field("groups", &groups)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}
