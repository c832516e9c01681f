//! 模型目录
//!
//! 自动选择只有两个分支：有附件用视觉模型，否则用快速文本模型。

use phf::phf_map;

use crate::models::ModelSelector;

/// 无附件时使用的快速文本模型
pub const FAST_TEXT_MODEL: &str = "gemini-2.5-flash";
/// 有附件时使用的视觉模型
pub const VISION_MODEL: &str = "gemini-2.5-flash-image";

/// 预置模型及说明
pub const MODEL_PRESETS: &[(&str, &str)] = &[
    ("auto", "Auto (Recommended)"),
    (FAST_TEXT_MODEL, "Gemini 2.5 Flash (Fastest)"),
    (VISION_MODEL, "Gemini 2.5 Flash Image"),
    ("gemini-3-pro-preview", "Gemini 3.0 Pro (High IQ)"),
];

/// 附件扩展名到 MIME 类型
pub static ATTACHMENT_MIME_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "pdf" => "application/pdf",
    "png" => "image/png",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "webp" => "image/webp",
    "gif" => "image/gif",
    "heic" => "image/heic",
    "heif" => "image/heif",
};

/// 解析最终使用的模型名称
pub fn resolve_model(selector: &ModelSelector, attachment_count: usize) -> String {
    match selector {
        ModelSelector::Explicit(name) => name.clone(),
        ModelSelector::Auto if attachment_count > 0 => VISION_MODEL.to_string(),
        ModelSelector::Auto => FAST_TEXT_MODEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_without_attachments() {
        assert_eq!(resolve_model(&ModelSelector::Auto, 0), FAST_TEXT_MODEL);
    }

    #[test]
    fn test_auto_with_attachments() {
        assert_eq!(resolve_model(&ModelSelector::Auto, 1), VISION_MODEL);
        assert_eq!(resolve_model(&ModelSelector::Auto, 5), VISION_MODEL);
    }

    #[test]
    fn test_explicit_is_verbatim() {
        let selector = ModelSelector::Explicit("my-custom-model".to_string());
        assert_eq!(resolve_model(&selector, 0), "my-custom-model");
        assert_eq!(resolve_model(&selector, 3), "my-custom-model");
    }

    #[test]
    fn test_presets_start_with_auto() {
        assert_eq!(MODEL_PRESETS[0].0, "auto");
        assert!(MODEL_PRESETS.iter().any(|(name, _)| *name == VISION_MODEL));
        assert!(MODEL_PRESETS.iter().any(|(name, _)| *name == FAST_TEXT_MODEL));
    }

    #[test]
    fn test_mime_lookup() {
        assert_eq!(ATTACHMENT_MIME_TYPES.get("pdf"), Some(&"application/pdf"));
        assert_eq!(ATTACHMENT_MIME_TYPES.get("txt"), None);
    }
}
