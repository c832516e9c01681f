//! 生成失败的分类
//!
//! 优先使用服务返回的结构化信息（HTTP 状态码、错误码）；
//! 只有拿不到结构化信息时才退回到匹配错误消息中的关键字。
//! 关键字匹配依赖上游服务的措辞，属于最后手段。

use crate::error::ServiceError;

const ERROR_HEADLINE: &str = "**Error: Failed to generate content.**";

const CREDENTIAL_CODES: &[&str] = &[
    "invalid_api_key",
    "api_key_invalid",
    "permission_denied",
    "unauthenticated",
];
const MODEL_NOT_FOUND_CODES: &[&str] = &["model_not_found", "not_found"];

/// 失败类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// API Key 无效或缺失
    CredentialInvalid,
    /// 模型不存在或不兼容
    ModelNotFound,
    /// 其他（网络、配额等）
    Connectivity,
}

/// 对服务错误分类
pub fn classify(error: &ServiceError) -> FailureKind {
    if let Some(kind) = classify_structured(error) {
        return kind;
    }
    classify_by_message(&error.message)
}

fn classify_structured(error: &ServiceError) -> Option<FailureKind> {
    match error.status {
        Some(401) | Some(403) => return Some(FailureKind::CredentialInvalid),
        Some(404) => return Some(FailureKind::ModelNotFound),
        _ => {}
    }

    let code = error.code.as_deref()?.to_ascii_lowercase();
    if CREDENTIAL_CODES.contains(&code.as_str()) {
        Some(FailureKind::CredentialInvalid)
    } else if MODEL_NOT_FOUND_CODES.contains(&code.as_str()) || code == "404" {
        Some(FailureKind::ModelNotFound)
    } else {
        None
    }
}

fn classify_by_message(message: &str) -> FailureKind {
    if message.to_ascii_lowercase().contains("api key") {
        FailureKind::CredentialInvalid
    } else if message.contains("404") {
        FailureKind::ModelNotFound
    } else {
        FailureKind::Connectivity
    }
}

/// 追加到文档中的错误块
pub fn failure_message(kind: FailureKind, attempted_model: &str) -> String {
    match kind {
        FailureKind::CredentialInvalid => {
            format!("{} Invalid or missing API Key.", ERROR_HEADLINE)
        }
        FailureKind::ModelNotFound => format!(
            "{} Model '{}' not found or incompatible.",
            ERROR_HEADLINE, attempted_model
        ),
        FailureKind::Connectivity => format!(
            "{} Please check your connection and try again.",
            ERROR_HEADLINE
        ),
    }
}
