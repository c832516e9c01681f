use std::path::{Path, PathBuf};

use chrono::Utc;

/// 导出文件路径：`<dir>/<prefix>-<毫秒时间戳>.<ext>`
pub fn export_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    export_path_at(dir, prefix, extension, Utc::now().timestamp_millis())
}

pub(crate) fn export_path_at(dir: &Path, prefix: &str, extension: &str, millis: i64) -> PathBuf {
    dir.join(format!("{}-{}.{}", prefix, millis, extension))
}
