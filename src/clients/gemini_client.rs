//! Gemini 客户端
//!
//! 通过 Gemini 的 OpenAI 兼容接口发起流式生成。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 附件以 base64 data URI 的形式放进用户消息
//! - API 地址可配置，兼容其他 OpenAI 风格的服务

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ImageDetail, ImageUrl,
    },
    Client,
};
use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, warn};

use crate::clients::generative_service::{
    ContentPart, FragmentStream, GenerativeService, ServiceRequest,
};
use crate::config::Config;
use crate::error::ServiceError;
use crate::models::Credential;

/// Gemini 客户端
pub struct GeminiClient {
    api_base_url: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    fn client(&self, credential: &Credential) -> Client<OpenAIConfig> {
        let openai_config = OpenAIConfig::new()
            .with_api_key(credential.expose())
            .with_api_base(&self.api_base_url);
        Client::with_config(openai_config)
    }
}

impl GenerativeService for GeminiClient {
    async fn stream_content(
        &self,
        credential: &Credential,
        request: ServiceRequest,
    ) -> Result<FragmentStream, ServiceError> {
        debug!(
            "调用生成服务，模型: {}，内容片段: {}",
            request.model_id,
            request.parts.len()
        );

        let model_id = request.model_id.clone();
        let chat_request = build_chat_request(request).map_err(to_service_error)?;

        let stream = self
            .client(credential)
            .chat()
            .create_stream(chat_request)
            .await
            .map_err(|e| {
                warn!("生成服务调用失败 (模型: {}): {}", model_id, e);
                to_service_error(e)
            })?;

        debug!("生成服务已开始返回数据");

        let fragments = stream.map(|item| {
            item.map(|response| {
                response
                    .choices
                    .into_iter()
                    .filter_map(|choice| choice.delta.content)
                    .collect::<String>()
            })
            .map_err(to_service_error)
        });

        Ok(fragments.boxed())
    }
}

/// 把服务请求转换为 chat completion 请求：所有内容放进同一条用户消息，顺序不变
fn build_chat_request(request: ServiceRequest) -> Result<CreateChatCompletionRequest, OpenAIError> {
    let content_parts: Vec<ChatCompletionRequestUserMessageContentPart> = request
        .parts
        .into_iter()
        .map(|part| match part {
            ContentPart::Binary(attachment) => {
                ChatCompletionRequestUserMessageContentPart::ImageUrl(
                    ChatCompletionRequestMessageContentPartImage {
                        image_url: ImageUrl {
                            url: attachment.to_data_uri(),
                            detail: Some(ImageDetail::Auto),
                        },
                    },
                )
            }
            ContentPart::Text(text) => ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText { text },
            ),
        })
        .collect();

    let user_msg = ChatCompletionRequestUserMessageArgs::default()
        .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
        .build()?;

    CreateChatCompletionRequestArgs::default()
        .model(request.model_id)
        .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
        .temperature(request.temperature)
        .stream(true)
        .build()
}

/// 尽量保留结构化的错误码，其余只保留原始消息
fn to_service_error(err: OpenAIError) -> ServiceError {
    match err {
        OpenAIError::ApiError(api_error) => {
            let error = ServiceError::new(api_error.message.clone());
            match api_error.code.clone() {
                Some(code) => error.with_code(code),
                None => error,
            }
        }
        OpenAIError::JSONDeserialize(source, content) => from_error_body(&content)
            .unwrap_or_else(|| ServiceError::new(format!("{}: {}", source, content))),
        other => ServiceError::new(other.to_string()),
    }
}

/// 解析 Gemini 的错误响应体：`{"error": {..}}` 或 `[{"error": {..}}]`
///
/// 数字 `code` 是 HTTP 状态码，`status`（或字符串 `code`）是错误码。
fn from_error_body(content: &str) -> Option<ServiceError> {
    let value: Value = serde_json::from_str(content).ok()?;
    let body = match &value {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let detail = body.get("error")?;

    let message = detail
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(content);
    let mut error = ServiceError::new(message);

    match detail.get("code") {
        Some(Value::Number(n)) => {
            if let Some(status) = n.as_u64().and_then(|c| u16::try_from(c).ok()) {
                error = error.with_status(status);
            }
        }
        Some(Value::String(code)) => error = error.with_code(code.clone()),
        _ => {}
    }
    if let Some(status) = detail.get("status").and_then(Value::as_str) {
        error = error.with_code(status);
    }
    Some(error)
}
