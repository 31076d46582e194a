//! # 配置
//!
//! ## 核心意图（Why）
//! - 宿主以 TOML 文本提供可调参数：保持限额表、通话设置入口的访问限制开关、日志过滤指令；
//! - 所有字段都有默认值，空文档即得到默认配置。
//!
//! ## 文档格式（What）
//!
//! ```toml
//! [limits]
//! shared_radio = 1
//! independent_radio = 2
//!
//! [call_options]
//! enforce_restriction = true
//!
//! [telemetry]
//! filter = "info"
//! ```
//!
//! 未知字段会被拒绝，避免拼写错误静默失效。

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    applications::call_options::CallOptionsPolicy, core::policy::HoldLimits, error::HoldError,
};

/// 默认日志过滤指令。
pub const DEFAULT_LOG_FILTER: &str = "info";

/// 顶层配置。
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoldConfig {
    /// 保持限额表。
    pub limits: HoldLimits,
    /// 通话设置入口可见性策略。
    pub call_options: CallOptionsPolicy,
    /// 日志配置。
    pub telemetry: TelemetryConfig,
}

/// 日志配置。
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// `EnvFilter` 语法的过滤指令；环境变量 `RUST_LOG` 存在时优先。
    pub filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl HoldConfig {
    /// 从 TOML 文本解析并校验配置。
    ///
    /// # 教案式注释
    /// - **契约 (What)**：语法或字段错误返回 [`HoldError::InvalidConfig`]；限额不合理返回
    ///   [`HoldError::InvalidLimits`]；
    /// - **后置条件**：返回的配置可直接交给 [`HoldTracker::with_limits`](crate::core::tracker::HoldTracker::with_limits)。
    pub fn from_toml_str(source: &str) -> Result<Self, HoldError> {
        let config: HoldConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// 读取并解析配置文件。
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HoldError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| HoldError::InvalidConfig {
            detail: format!("failed to read `{}`: {err}", path.display()),
        })?;
        Self::from_toml_str(&source)
    }

    /// 校验各字段之间的约束。
    pub fn validate(&self) -> Result<(), HoldError> {
        self.limits.validate()
    }
}
