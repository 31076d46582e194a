//! # 保持限额决策表
//!
//! ## 核心意图（Why）
//! - 共享射频通路最多维持“一路活动 + 一路保持”，独立射频通路（或共享模式下的放宽条件）可维持
//!   “一路活动 + 两路保持”；
//! - 将两个限额常量命名并集中在 [`HoldLimits`] 中，使决策表可以脱离追踪器单独测试，也可由配置覆盖。
//!
//! ## 决策表（What）
//!
//! | 射频模式          | 多路保持 | 限额                  |
//! |-------------------|----------|-----------------------|
//! | `SharedRadio`     | 否       | `shared_radio`（1）   |
//! | `SharedRadio`     | 是       | `independent_radio`（2）|
//! | `IndependentRadio`| 任意     | `independent_radio`（2）|
//!
//! 判定式为 `顶层呼叫数 <= 限额`：比较对象是分组中已有的顶层呼叫数量，而不是“数量减一”。

use serde::{Deserialize, Serialize};

use crate::{
    core::radio::{MultiSimMode, RadioSnapshot},
    error::HoldError,
};

/// 共享射频（DSDS）模式下的保持限额。
pub const SHARED_RADIO_MAX_HOLDABLE_CALLS: usize = 1;

/// 独立射频（DSDA）或放宽条件下的保持限额。
pub const INDEPENDENT_RADIO_MAX_HOLDABLE_CALLS: usize = 2;

/// 射频模式到保持限额的映射。
///
/// # 教案式说明
/// - **意图 (Why)**：以显式数据而非嵌套布尔表达式承载策略，便于审阅与覆盖；
/// - **契约 (What)**：`shared_radio` 必须至少为 1 且不大于 `independent_radio`，由
///   [`validate`](Self::validate) 校验；
/// - **风险 (Trade-offs)**：覆盖默认值会改变所有订阅的准入结果，应仅用于实验或特定硬件。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoldLimits {
    /// 共享射频、无放宽条件时的限额。
    pub shared_radio: usize,
    /// 独立射频或放宽条件下的限额。
    pub independent_radio: usize,
}

impl Default for HoldLimits {
    fn default() -> Self {
        Self::new(
            SHARED_RADIO_MAX_HOLDABLE_CALLS,
            INDEPENDENT_RADIO_MAX_HOLDABLE_CALLS,
        )
    }
}

impl HoldLimits {
    /// 以给定限额构造。
    pub const fn new(shared_radio: usize, independent_radio: usize) -> Self {
        Self {
            shared_radio,
            independent_radio,
        }
    }

    /// 根据射频快照查表得到限额。
    pub fn limit_for(&self, snapshot: RadioSnapshot) -> usize {
        match (snapshot.mode, snapshot.multiple_held_calls) {
            (MultiSimMode::SharedRadio, false) => self.shared_radio,
            (MultiSimMode::SharedRadio, true) | (MultiSimMode::IndependentRadio, _) => {
                self.independent_radio
            }
        }
    }

    /// 给定顶层呼叫数量时，分组是否允许保持。
    pub fn admits(&self, top_level_count: usize, snapshot: RadioSnapshot) -> bool {
        top_level_count <= self.limit_for(snapshot)
    }

    /// 校验限额组合是否合理。
    pub fn validate(&self) -> Result<(), HoldError> {
        if self.shared_radio == 0 || self.shared_radio > self.independent_radio {
            return Err(HoldError::InvalidLimits {
                shared_radio: self.shared_radio,
                independent_radio: self.independent_radio,
            });
        }
        Ok(())
    }
}
