//! # applications 模块说明
//!
//! ## 设计定位（Why）
//! - 收录围绕保持追踪器的周边协作者，它们与追踪器同属连接服务一侧，但不参与保持准入；
//! - 只保留其中的纯决策逻辑，界面与短信发送等平台细节由宿主通过 trait 注入。
//!
//! ## 子模块（What）
//! - `call_options`：根据运营商配置与用户限制决定通话设置入口的可见性；
//! - `vvm`：由运营商配置构造可视语音信箱开通短信发送器。

pub mod call_options;
pub mod vvm;
