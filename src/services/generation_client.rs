//! 生成客户端 - 业务能力层
//!
//! 只负责"发起一次生成"能力：检查凭证、选择模型、组装内容片段、
//! 把服务的回复变成片段序列。错误不做分类，分类由调用方负责。

use futures::{future, StreamExt};
use tracing::{debug, info};

use crate::clients::{
    ContentPart, FragmentStream, GenerativeService, ServiceRequest, GENERATION_TEMPERATURE,
};
use crate::error::{AppError, PreconditionError};
use crate::models::{resolve_model, Credential, GenerationRequest};
use crate::services::prompt_builder::build_instruction;
use crate::utils::logging::truncate_text;

/// 生成客户端
pub struct GenerationClient<S> {
    service: S,
}

impl<S: GenerativeService> GenerationClient<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// 本次请求实际使用的模型
    pub fn model_for(&self, request: &GenerationRequest) -> String {
        resolve_model(&request.model_selector, request.attachments.len())
    }

    /// 组装服务请求：附件在前（保持顺序），指令文本在最后
    pub fn build_service_request(&self, request: &GenerationRequest) -> ServiceRequest {
        let instruction = build_instruction(
            request.desired_count,
            request.question_kind,
            &request.topic_text,
        );

        let mut parts: Vec<ContentPart> = request
            .attachments
            .iter()
            .cloned()
            .map(ContentPart::Binary)
            .collect();
        parts.push(ContentPart::Text(instruction));

        ServiceRequest {
            model_id: self.model_for(request),
            parts,
            temperature: GENERATION_TEMPERATURE,
        }
    }

    /// 发起流式生成
    ///
    /// 凭证为空时直接返回前置条件错误，不发起任何调用。
    /// 返回的流跳过空片段。
    pub async fn stream(
        &self,
        credential: &Credential,
        request: &GenerationRequest,
    ) -> Result<FragmentStream, AppError> {
        if credential.is_empty() {
            return Err(PreconditionError::MissingCredential.into());
        }

        let service_request = self.build_service_request(request);
        info!(
            "🤖 使用模型 {} 生成 {} 道题目 ({})，附件 {} 个",
            service_request.model_id,
            request.desired_count,
            request.question_kind.short_name(),
            request.attachments.len()
        );
        debug!("主题: {}", truncate_text(&request.topic_text, 60));

        let stream = self
            .service
            .stream_content(credential, service_request)
            .await?;

        Ok(stream
            .filter(|item| future::ready(!matches!(item, Ok(text) if text.is_empty())))
            .boxed())
    }
}
