//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 追踪器本身不可失败：未知订阅、重复或缺失的呼叫腿都被静默忽略；
//! - 可失败的只有外围边界：配置解析与校验、可视语音信箱端口校验、tracing Subscriber 安装。
//!
//! ## 设计要求（What）
//! - 所有错误派生 `thiserror::Error`，可直接交给 `anyhow` 等上层框架处理；
//! - 上下文以 `String` 保存，使错误保持 `Clone + Eq`，便于测试直接比较。

use thiserror::Error;

/// spark-hold 的错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：聚合配置、协作者与可观测性安装的失败路径，便于宿主在启动流程中统一处理；
/// - **契约 (What)**：所有变体均为 `Send + Sync + 'static`，可安全跨线程传播；
/// - **设计权衡 (Trade-offs)**：底层解析错误被转换为文本，牺牲错误链换取可比较性。
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HoldError {
    /// TOML 配置无法解析。
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    /// 限额组合不合理：共享射频限额为 0，或大于独立射频限额。
    #[error(
        "invalid hold limits: shared radio limit {shared_radio} must be in 1..={independent_radio}"
    )]
    InvalidLimits {
        shared_radio: usize,
        independent_radio: usize,
    },

    /// 运营商配置的应用端口超出 16 位短信数据端口范围。
    #[error("application port {port} does not fit a 16-bit SMS data port")]
    InvalidApplicationPort { port: i32 },

    /// 日志过滤指令无法解析。
    #[error("invalid log filter `{directives}`: {detail}")]
    InvalidLogFilter { directives: String, detail: String },

    /// tracing Subscriber 已由本 crate 安装过。
    #[error("telemetry has already been installed")]
    TelemetryAlreadyInstalled,

    /// 设置全局 tracing Subscriber 失败，通常是宿主已自行安装。
    #[error("failed to install global tracing subscriber: {detail}")]
    TelemetryInstall { detail: String },
}

impl From<toml::de::Error> for HoldError {
    fn from(value: toml::de::Error) -> Self {
        HoldError::InvalidConfig {
            detail: value.message().to_owned(),
        }
    }
}
