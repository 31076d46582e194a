//! # 通话设置入口可见性
//!
//! ## 核心意图（Why）
//! - 通话设置页针对每个订阅暴露三个补充业务入口：呼叫转移、呼叫限制、附加通话设置；
//! - 每个入口是否出现由运营商配置决定，并受“禁止配置移动网络”的用户限制约束。
//!
//! ## 判定规则（What）
//! - 呼叫转移：配置存在且 `call_forwarding_visibility_bool` 为真；
//! - 附加通话设置：配置存在且呼叫等待或主叫号码显示两项之一为真；
//! - 呼叫限制：配置存在且 `call_barring_visibility_bool` 为真；
//! - 当策略开启限制校验且用户受限时，三个入口全部隐藏；
//! - 缺失的配置键按 `false` 处理。
//!
//! ## 页面状态（How）
//! - [`CallOptionsScreen`] 保存决策结果，并跟踪飞行模式下补充业务是否可用（只影响已暴露的入口）；
//! - 非 GSM 制式下整页禁用。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::HoldError;

/// 运营商配置键：呼叫转移入口是否可见。
pub const KEY_CALL_FORWARDING_VISIBILITY_BOOL: &str = "call_forwarding_visibility_bool";
/// 运营商配置键：呼叫限制入口是否可见。
pub const KEY_CALL_BARRING_VISIBILITY_BOOL: &str = "call_barring_visibility_bool";
/// 运营商配置键：附加设置中的呼叫等待是否可见。
pub const KEY_ADDITIONAL_SETTINGS_CALL_WAITING_VISIBILITY_BOOL: &str =
    "additional_settings_call_waiting_visibility_bool";
/// 运营商配置键：附加设置中的主叫号码显示是否可见。
pub const KEY_ADDITIONAL_SETTINGS_CALLER_ID_VISIBILITY_BOOL: &str =
    "additional_settings_caller_id_visibility_bool";
/// 运营商配置键：是否使用通用（非 GSM 专属）通话设置标题。
pub const KEY_COMMON_CALL_SETTINGS_SUPPORT_BOOL: &str = "config_common_callsettings_support_bool";

/// 入口可见性策略，来自 [`HoldConfig`](crate::config::HoldConfig)。
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallOptionsPolicy {
    /// 是否在用户被禁止配置移动网络时隐藏全部入口。
    pub enforce_restriction: bool,
}

impl Default for CallOptionsPolicy {
    fn default() -> Self {
        Self {
            enforce_restriction: true,
        }
    }
}

/// 某个订阅的运营商配置布尔项集合。
///
/// 未出现的键读取为 `false`。
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarrierConfig {
    flags: BTreeMap<String, bool>,
}

impl CarrierConfig {
    /// 空配置。
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 TOML 键值表解析。
    pub fn from_toml_str(source: &str) -> Result<Self, HoldError> {
        Ok(toml::from_str(source)?)
    }

    /// 以构建器方式写入一个布尔项。
    #[must_use]
    pub fn with_flag(mut self, key: impl Into<String>, value: bool) -> Self {
        self.flags.insert(key.into(), value);
        self
    }

    /// 读取布尔项，缺失时为 `false`。
    pub fn get_bool(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }
}

/// 通话设置页上的补充业务入口。
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CallOptionEntry {
    CallForwarding,
    AdditionalCallSettings,
    CallBarring,
}

impl CallOptionEntry {
    /// 全部入口，按页面顺序排列。
    pub const ALL: [CallOptionEntry; 3] = [
        CallOptionEntry::CallForwarding,
        CallOptionEntry::AdditionalCallSettings,
        CallOptionEntry::CallBarring,
    ];

    /// 页面中的稳定键名。
    pub const fn key(self) -> &'static str {
        match self {
            Self::CallForwarding => "call_forwarding_key",
            Self::AdditionalCallSettings => "additional_gsm_call_settings_key",
            Self::CallBarring => "call_barring_key",
        }
    }

    /// 入口点击后进入的子页面。
    pub const fn target(self) -> SettingsScreen {
        match self {
            Self::CallForwarding => SettingsScreen::CallForwarding,
            Self::AdditionalCallSettings => SettingsScreen::AdditionalCallOptions,
            Self::CallBarring => SettingsScreen::CallBarring,
        }
    }

    fn visible_in(self, carrier: &CarrierConfig) -> bool {
        match self {
            Self::CallForwarding => carrier.get_bool(KEY_CALL_FORWARDING_VISIBILITY_BOOL),
            Self::AdditionalCallSettings => {
                carrier.get_bool(KEY_ADDITIONAL_SETTINGS_CALL_WAITING_VISIBILITY_BOOL)
                    || carrier.get_bool(KEY_ADDITIONAL_SETTINGS_CALLER_ID_VISIBILITY_BOOL)
            }
            Self::CallBarring => carrier.get_bool(KEY_CALL_BARRING_VISIBILITY_BOOL),
        }
    }
}

/// 入口指向的子页面。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SettingsScreen {
    CallForwarding,
    AdditionalCallOptions,
    CallBarring,
}

/// 单个入口的可见性结论。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EntryVisibility {
    /// 暴露入口，并连接到对应子页面。
    Exposed(SettingsScreen),
    /// 从页面中移除。
    Hidden,
}

impl EntryVisibility {
    pub fn is_exposed(self) -> bool {
        matches!(self, Self::Exposed(_))
    }
}

/// 页面标题风格。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScreenTitle {
    /// 运营商声明支持通用通话设置。
    Common,
    /// GSM 专属设置。
    Gsm,
}

/// 宿主电话的制式。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PhoneType {
    Gsm,
    Cdma,
    Sip,
    Other,
}

/// 三个入口的可见性决策与页面标题。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CallOptionsLayout {
    pub call_forwarding: EntryVisibility,
    pub additional_call_settings: EntryVisibility,
    pub call_barring: EntryVisibility,
    pub title: ScreenTitle,
}

impl CallOptionsLayout {
    /// 根据运营商配置与用户限制推导页面布局。
    ///
    /// # 教案式注释
    /// - **输入 (What)**：
    ///   - `policy`：是否执行“禁止配置移动网络”校验；
    ///   - `carrier`：订阅的运营商配置，缺失时所有入口隐藏；
    ///   - `mobile_network_config_restricted`：当前用户是否受该限制；
    /// - **输出**：三个入口的 [`EntryVisibility`] 与标题风格；受限隐藏时记录一条 info 日志。
    pub fn resolve(
        policy: &CallOptionsPolicy,
        carrier: Option<&CarrierConfig>,
        mobile_network_config_restricted: bool,
    ) -> Self {
        let gated = policy.enforce_restriction && mobile_network_config_restricted;
        if gated {
            info!(
                "mobile network configs are restricted, hiding call forwarding, \
                 additional call settings and call barring"
            );
        }

        let decide = |entry: CallOptionEntry| match carrier {
            Some(carrier) if !gated && entry.visible_in(carrier) => {
                EntryVisibility::Exposed(entry.target())
            }
            _ => EntryVisibility::Hidden,
        };

        let common = carrier.is_some_and(|c| c.get_bool(KEY_COMMON_CALL_SETTINGS_SUPPORT_BOOL));

        Self {
            call_forwarding: decide(CallOptionEntry::CallForwarding),
            additional_call_settings: decide(CallOptionEntry::AdditionalCallSettings),
            call_barring: decide(CallOptionEntry::CallBarring),
            title: if common {
                ScreenTitle::Common
            } else {
                ScreenTitle::Gsm
            },
        }
    }

    /// 查询单个入口的结论。
    pub fn visibility(&self, entry: CallOptionEntry) -> EntryVisibility {
        match entry {
            CallOptionEntry::CallForwarding => self.call_forwarding,
            CallOptionEntry::AdditionalCallSettings => self.additional_call_settings,
            CallOptionEntry::CallBarring => self.call_barring,
        }
    }

    /// 已暴露的入口，按页面顺序。
    pub fn exposed(&self) -> Vec<CallOptionEntry> {
        CallOptionEntry::ALL
            .into_iter()
            .filter(|entry| self.visibility(*entry).is_exposed())
            .collect()
    }
}

/// 通话设置页的运行期状态。
#[derive(Clone, Debug)]
pub struct CallOptionsScreen {
    layout: CallOptionsLayout,
    screen_enabled: bool,
    entries_enabled: bool,
}

impl CallOptionsScreen {
    /// 以布局与电话制式打开页面；非 GSM 制式整页禁用。
    pub fn open(layout: CallOptionsLayout, phone_type: PhoneType) -> Self {
        Self {
            layout,
            screen_enabled: phone_type == PhoneType::Gsm,
            entries_enabled: true,
        }
    }

    /// 飞行模式变化后，按补充业务是否可用统一启用/禁用已暴露的入口。
    pub fn set_entries_enabled(&mut self, allowed: bool) {
        self.entries_enabled = allowed;
    }

    pub fn layout(&self) -> &CallOptionsLayout {
        &self.layout
    }

    pub fn is_screen_enabled(&self) -> bool {
        self.screen_enabled
    }

    /// 入口当前是否可点击：需已暴露、页面启用且补充业务可用。
    pub fn is_entry_enabled(&self, entry: CallOptionEntry) -> bool {
        self.screen_enabled && self.entries_enabled && self.layout.visibility(entry).is_exposed()
    }
}
