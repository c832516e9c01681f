//! 生成服务契约
//!
//! 外部生成模型服务只通过这里的请求/流接口暴露：
//! 请求 = 模型名 + 有序的内容片段（二进制或文本）+ 采样温度，
//! 响应 = 异步的文本片段流。

use std::future::Future;

use futures::stream::BoxStream;

use crate::error::ServiceError;
use crate::models::{BinaryAttachment, Credential};

/// 固定的低采样温度，倾向于稳定、结构良好的输出
pub const GENERATION_TEMPERATURE: f32 = 0.3;

/// 请求中的一个内容片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Binary(BinaryAttachment),
    Text(String),
}

/// 发给生成服务的请求
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub model_id: String,
    pub parts: Vec<ContentPart>,
    pub temperature: f32,
}

/// 服务返回的片段流：有限、单次消费
pub type FragmentStream = BoxStream<'static, Result<String, ServiceError>>;

/// 生成模型服务
pub trait GenerativeService {
    /// 发起一次流式生成
    ///
    /// 建立连接失败（鉴权、模型不存在、网络）在这里直接返回错误；
    /// 之后的失败以流中的 `Err` 出现。
    fn stream_content(
        &self,
        credential: &Credential,
        request: ServiceRequest,
    ) -> impl Future<Output = Result<FragmentStream, ServiceError>> + Send;
}
