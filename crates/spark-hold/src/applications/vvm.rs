//! # 可视语音信箱开通短信发送器
//!
//! ## 核心意图（Why）
//! - 可视语音信箱（VVM）通过向运营商号码发送数据短信完成开通与状态查询；
//! - 发送器由协议实现构造，本模块只负责从运营商配置中取出目的号码、应用端口与订阅 ID 并做校验。
//!
//! ## 行为契约（What）
//! - 目的号码缺失或为空：记录告警并返回 `Ok(None)`，表示该运营商不支持；
//! - 应用端口必须落在 16 位数据短信端口范围内，否则返回 [`HoldError::InvalidApplicationPort`]；
//! - 其余情况交由 [`VisualVoicemailProtocol::create_message_sender`] 构造发送器。

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::HoldError;

/// 运营商的 VVM 配置。
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VvmCarrierConfig {
    /// 短信所走的订阅 ID。
    pub subscription_id: i32,
    /// 数据短信的应用端口。
    pub application_port: i32,
    /// 运营商接收开通短信的号码。
    pub destination_number: Option<String>,
}

/// 协议实现：决定开通短信的具体格式与发送方式。
pub trait VisualVoicemailProtocol {
    /// 构造出的发送器类型。
    type Sender;

    /// 以订阅、端口与目的号码构造发送器。
    fn create_message_sender(
        &self,
        subscription_id: i32,
        application_port: u16,
        destination_number: &str,
    ) -> Self::Sender;
}

/// 已解析的发送目标，可作为简单协议的发送器。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ProvisioningSender {
    pub subscription_id: i32,
    pub application_port: u16,
    pub destination_number: String,
}

/// 以 [`ProvisioningSender`] 作为发送器的 OMTP 协议。
#[derive(Clone, Copy, Debug, Default)]
pub struct OmtpProtocol;

impl VisualVoicemailProtocol for OmtpProtocol {
    type Sender = ProvisioningSender;

    fn create_message_sender(
        &self,
        subscription_id: i32,
        application_port: u16,
        destination_number: &str,
    ) -> ProvisioningSender {
        ProvisioningSender {
            subscription_id,
            application_port,
            destination_number: destination_number.to_owned(),
        }
    }
}

/// 根据运营商配置构造开通短信发送器。
pub fn message_sender<P>(
    protocol: &P,
    config: &VvmCarrierConfig,
) -> Result<Option<P::Sender>, HoldError>
where
    P: VisualVoicemailProtocol + ?Sized,
{
    let Some(destination) = config
        .destination_number
        .as_deref()
        .filter(|number| !number.is_empty())
    else {
        warn!(
            subscription_id = config.subscription_id,
            "no destination number for this carrier"
        );
        return Ok(None);
    };

    let port = u16::try_from(config.application_port).map_err(|_| {
        HoldError::InvalidApplicationPort {
            port: config.application_port,
        }
    })?;

    Ok(Some(protocol.create_message_sender(
        config.subscription_id,
        port,
        destination,
    )))
}
