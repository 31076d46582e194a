//! # 多 SIM 射频模式探针
//!
//! ## 核心意图（Why）
//! - 射频模式可能在通话中途异步切换（例如 DSDS 与 DSDA 之间的重配置），因此追踪器从不缓存模式，
//!   每次重算都通过 [`RadioModeProbe`] 重新读取；
//! - 探针同时回答“共享射频模式下是否已有多于一路被保持的呼叫”，该条件会临时放宽限额。
//!
//! ## 行为契约（What）
//! - 探针在追踪器持有分片锁期间被调用，不得回调追踪器，也不应阻塞；
//! - [`RadioModeProbe::snapshot`] 在独立射频模式下不会查询保持呼叫数量，与决策表的短路语义一致。

use std::sync::atomic::{AtomicBool, Ordering};

/// 多 SIM 射频工作模式。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MultiSimMode {
    /// 两个 SIM 共享同一射频通路（DSDS），同一时刻仅一路可处于活动状态。
    SharedRadio,
    /// 两个 SIM 各自拥有活动射频通路（DSDA），或正处于 DSDS/DSDA 过渡期。
    IndependentRadio,
}

/// 一次重算所读取到的射频状态。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RadioSnapshot {
    /// 当前射频模式。
    pub mode: MultiSimMode,
    /// 共享射频模式下，跨订阅是否已存在多于一路被保持的呼叫。
    pub multiple_held_calls: bool,
}

impl RadioSnapshot {
    /// 共享射频、无放宽条件。
    pub const fn shared() -> Self {
        Self {
            mode: MultiSimMode::SharedRadio,
            multiple_held_calls: false,
        }
    }

    /// 独立射频。
    pub const fn independent() -> Self {
        Self {
            mode: MultiSimMode::IndependentRadio,
            multiple_held_calls: false,
        }
    }

    /// 是否处于“共享射频 + 多路保持”的放宽状态。
    pub const fn is_widened(self) -> bool {
        matches!(self.mode, MultiSimMode::SharedRadio) && self.multiple_held_calls
    }
}

/// 宿主平台提供的射频模式查询接口。
///
/// # 教案式说明
/// - **意图 (Why)**：把平台查询抽象为 trait，使追踪器可在测试中以原子状态替身驱动；
/// - **契约 (What)**：每次调用都应返回最新值；实现需满足 `Send + Sync`，以便追踪器跨线程共享；
/// - **风险 (Trade-offs)**：`recompute_all` 对每个订阅独立调用探针，两次调用之间模式可能变化，
///   追踪器不提供跨订阅的一致性快照。
pub trait RadioModeProbe: Send + Sync {
    /// 当前多 SIM 射频模式。
    fn multi_sim_mode(&self) -> MultiSimMode;

    /// 共享射频模式下，跨订阅是否已存在多于一路被保持的呼叫。
    fn has_multiple_held_calls(&self) -> bool;

    /// 读取一次射频状态。
    fn snapshot(&self) -> RadioSnapshot {
        let mode = self.multi_sim_mode();
        let multiple_held_calls =
            mode == MultiSimMode::SharedRadio && self.has_multiple_held_calls();
        RadioSnapshot {
            mode,
            multiple_held_calls,
        }
    }
}

/// 由宿主主动推送模式变化的射频状态。
///
/// 宿主在收到平台通知后写入新值，再调用
/// [`HoldTracker::recompute_all`](crate::core::tracker::HoldTracker::recompute_all)。
#[derive(Debug)]
pub struct SharedRadioState {
    independent: AtomicBool,
    multiple_held_calls: AtomicBool,
}

impl SharedRadioState {
    /// 以初始模式构造。
    pub fn new(mode: MultiSimMode) -> Self {
        Self {
            independent: AtomicBool::new(mode == MultiSimMode::IndependentRadio),
            multiple_held_calls: AtomicBool::new(false),
        }
    }

    /// 写入新的射频模式。
    pub fn set_mode(&self, mode: MultiSimMode) {
        self.independent
            .store(mode == MultiSimMode::IndependentRadio, Ordering::Release);
    }

    /// 写入“多路保持”条件。
    pub fn set_multiple_held_calls(&self, value: bool) {
        self.multiple_held_calls.store(value, Ordering::Release);
    }
}

impl Default for SharedRadioState {
    fn default() -> Self {
        Self::new(MultiSimMode::SharedRadio)
    }
}

impl RadioModeProbe for SharedRadioState {
    fn multi_sim_mode(&self) -> MultiSimMode {
        if self.independent.load(Ordering::Acquire) {
            MultiSimMode::IndependentRadio
        } else {
            MultiSimMode::SharedRadio
        }
    }

    fn has_multiple_held_calls(&self) -> bool {
        self.multiple_held_calls.load(Ordering::Acquire)
    }
}
