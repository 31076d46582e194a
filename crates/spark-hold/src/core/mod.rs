//! # core 模块说明
//!
//! - `subscription`：订阅（电话账号）标识；
//! - `leg`：呼叫腿的保持能力契约，由宿主实现；
//! - `radio`：多 SIM 射频模式的外部查询接口；
//! - `policy`：射频模式 × 放宽条件 → 限额的决策表；
//! - `tracker`：订阅 → 呼叫腿分组的并发映射与重算逻辑。

pub mod leg;
pub mod policy;
pub mod radio;
pub mod subscription;
pub mod tracker;
