use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::FileError;
use crate::export::file_name::export_path;

/// 把当前文本原样写成 `.md` 文件
pub async fn export_markdown(text: &str, dir: &Path, prefix: &str) -> Result<PathBuf, FileError> {
    let path = export_path(dir, prefix, "md");
    tokio::fs::write(&path, text)
        .await
        .map_err(|e| FileError::write_failed(path.display().to_string(), e))?;
    info!("✓ 已导出 Markdown: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_text_unchanged() {
        let dir = std::env::temp_dir().join(format!("examcraft-md-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let text = "**1.** What is $x$?\n\n**(A)** 1";
        let path = export_markdown(text, &dir, "paper").await.unwrap();

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("md"));
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), text);
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_dir_is_write_error() {
        let dir = Path::new("/nonexistent/examcraft/dir");
        let err = export_markdown("x", dir, "paper").await.unwrap_err();
        assert!(matches!(err, FileError::WriteFailed { .. }));
    }
}
