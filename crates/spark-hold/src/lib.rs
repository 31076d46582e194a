//! # spark-hold
//!
//! ## 定位与职责（Why）
//! - 为多订阅（多 SIM）电话栈提供“呼叫保持能力”准入控制：在呼叫腿增删或多 SIM 射频模式切换时，
//!   重新判定每条呼叫腿当前是否允许被保持；
//! - 策略依赖实时射频配置（DSDS 共享射频 / DSDA 独立射频），需要在多路并发的呼叫生命周期事件下保持一致。
//!
//! ## 架构嵌入（Where）
//! - `core` 模块承载准入追踪器、呼叫腿能力契约、射频模式探针与限额决策表；
//! - `applications` 模块收录围绕追踪器的周边协作者：通话设置入口可见性与可视语音信箱开通短信发送器；
//! - `config` 模块负责 TOML 配置解析，`error` 模块集中定义错误，`telemetry` 模块（`telemetry` 特性）
//!   负责安装 tracing Subscriber。
//!
//! ## 使用方式（How）
//! 1. 宿主实现 [`core::leg::Holdable`]（或直接使用 [`core::leg::HoldCapability`]）；
//! 2. 以射频探针构造 [`core::tracker::HoldTracker`]，通过 `Arc` 在各事件处理线程间共享；
//! 3. 呼叫腿创建/销毁时调用 `add_leg`/`remove_leg`，射频模式变化时调用 `recompute_all`。

/// 周边协作者：通话设置入口可见性、可视语音信箱开通短信发送器。
pub mod applications;

/// 配置入口。
pub mod config;

/// 保持能力准入的核心逻辑。
///
/// - **意图说明 (Why)**：集中维护订阅到呼叫腿的映射，以及由射频模式推导出的保持能力标记；
/// - **契约定位 (What)**：追踪器本身不可失败，所有输入要么被接受要么被静默忽略。
pub mod core;

/// 错误类型与诊断信息集中声明处。
pub mod error;

#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use crate::config::HoldConfig;
pub use crate::core::{
    leg::{HoldCapability, Holdable, LegKind, LegRef},
    policy::{HoldLimits, INDEPENDENT_RADIO_MAX_HOLDABLE_CALLS, SHARED_RADIO_MAX_HOLDABLE_CALLS},
    radio::{MultiSimMode, RadioModeProbe, RadioSnapshot, SharedRadioState},
    subscription::SubscriptionKey,
    tracker::{HoldTracker, RecomputeOutcome},
};
pub use crate::error::HoldError;
