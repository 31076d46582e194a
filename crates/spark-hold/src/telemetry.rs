//! # telemetry：tracing Subscriber 一次性安装
//!
//! ## 核心意图（Why）
//! - 追踪器通过 `tracing` 宏输出结构化日志（订阅、顶层数量、限额、结论），宿主若没有自行装配 Subscriber，
//!   可调用 [`install`] 获得 `fmt + EnvFilter` 输出；
//! - 环境变量 `RUST_LOG` 存在时优先生效，否则使用配置中的过滤指令。
//!
//! ## 行为契约（What）
//! - 过滤指令先于任何全局状态变更进行解析，非法指令返回 [`HoldError::InvalidLogFilter`]；
//! - 重复调用返回 [`HoldError::TelemetryAlreadyInstalled`]；宿主已设置全局 Subscriber 时返回
//!   [`HoldError::TelemetryInstall`]。

use std::sync::OnceLock;

use tracing::dispatcher;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

use crate::{config::TelemetryConfig, error::HoldError};

/// 安装状态的全局标记，确保 `install` 仅执行一次。
static INSTALLED: OnceLock<()> = OnceLock::new();

/// 按配置安装全局 tracing Subscriber。
///
/// # 教案式说明
/// - **逻辑（How）**：
///   1. 解析过滤指令（`RUST_LOG` 优先）；
///   2. 检查是否重复安装或宿主已设置 Subscriber；
///   3. 组装 `registry + EnvFilter + fmt` 并设置为全局默认。
pub fn install(config: &TelemetryConfig) -> Result<(), HoldError> {
    let filter = build_env_filter(&config.filter)?;

    if INSTALLED.get().is_some() {
        return Err(HoldError::TelemetryAlreadyInstalled);
    }
    if dispatcher::has_been_set() {
        return Err(HoldError::TelemetryInstall {
            detail: "a global subscriber is already set".to_owned(),
        });
    }

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber).map_err(|err| {
        HoldError::TelemetryInstall {
            detail: err.to_string(),
        }
    })?;

    INSTALLED
        .set(())
        .map_err(|_| HoldError::TelemetryAlreadyInstalled)
}

fn build_env_filter(directives: &str) -> Result<EnvFilter, HoldError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(directives).map_err(|err| HoldError::InvalidLogFilter {
        directives: directives.to_owned(),
        detail: err.to_string(),
    })
}
