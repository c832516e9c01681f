//! 导出
//!
//! 三种导出方式都以当前页面（或当前文本）为准，文件名带毫秒时间戳。

pub mod file_name;
pub mod markdown_export;
pub mod print;
pub mod snapshot;

pub use file_name::export_path;
pub use markdown_export::export_markdown;
pub use print::PrintExporter;
pub use snapshot::{PaperBounds, SnapshotExporter};
