use crate::error::FileError;
use crate::models::model_catalog::ATTACHMENT_MIME_TYPES;
use crate::models::request::BinaryAttachment;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 根据扩展名判断 MIME 类型（只接受图片和 PDF）
pub fn detect_mime_type(path: &Path) -> Result<&'static str, FileError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .and_then(|ext| ATTACHMENT_MIME_TYPES.get(ext.as_str()).copied())
        .ok_or_else(|| FileError::UnsupportedType {
            path: path.display().to_string(),
        })
}

/// 读取单个文件并转为 base64 附件
pub async fn load_attachment(path: &Path) -> Result<BinaryAttachment, FileError> {
    let mime_type = detect_mime_type(path)?;

    let bytes = fs::read(path)
        .await
        .map_err(|e| FileError::read_failed(path.display().to_string(), e))?;

    tracing::info!(
        "正在加载附件: {} ({}, {} 字节)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        mime_type,
        bytes.len()
    );

    Ok(BinaryAttachment::new(mime_type, STANDARD.encode(bytes)))
}

/// 并发读取所有附件，结果顺序与输入一致
pub async fn load_attachments(paths: &[PathBuf]) -> Result<Vec<BinaryAttachment>, FileError> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let attachments = try_join_all(paths.iter().map(|path| load_attachment(path))).await?;
    tracing::info!("成功加载 {} 个附件", attachments.len());

    Ok(attachments)
}
