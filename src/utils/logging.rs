/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数。日志写到 stderr，stdout 留给生成的文本。
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::SessionStatus;

/// 初始化日志
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 debug 或 info。
pub fn init(verbose: bool) {
    let default_level = if verbose { "examcraft=debug" } else { "examcraft=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, model: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 ExamCraft 启动");
    info!("🤖 模型: {}", model);
    info!(
        "📝 题目: {} 道 | {}",
        config.question_count, config.question_kind
    );
    info!(
        "📐 排版: {}px | {} 栏",
        config.font_size_px, config.column_count
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(status: SessionStatus, text: &str, exported: &[std::path::PathBuf]) {
    info!("\n{}", "=".repeat(60));
    info!("📊 生成结束: {:?}", status);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📄 文本长度: {} 字符", text.chars().count());
    for path in exported {
        info!("💾 已保存: {}", path.display());
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("试卷生成", 2), "试卷...");
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
