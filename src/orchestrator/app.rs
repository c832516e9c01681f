//! 单次运行 - 编排层
//!
//! ## 核心功能
//!
//! 1. **组装请求**：读取附件，结合配置和命令行参数构造 `GenerationRequest`
//! 2. **驱动生成**：交给 `GenerationFlow`，片段实时写到 stdout
//! 3. **实时预览**：配置了调试端口时，把每次变化推给浏览器里的预览页面
//! 4. **导出**：生成结束后按需打印 PDF、截图 PNG、保存 Markdown
//!
//! 导出失败只提示，不影响已生成的文本。

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::{Browser, Page};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::browser;
use crate::clients::{GeminiClient, GenerativeService};
use crate::config::Config;
use crate::error::{AppError, PreconditionError};
use crate::export::{export_markdown, PrintExporter, SnapshotExporter};
use crate::infrastructure::DocumentPage;
use crate::models::{load_attachments, Credential, GenerationRequest, RenderConfig, SessionStatus};
use crate::orchestrator::preview::{spawn_preview, PreviewFrame};
use crate::render::{render, PageAssets};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::{GenerationFlow, SessionContext};

/// 本次运行的输入和导出选项
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 主题文本（可为空，但此时必须有附件）
    pub topic: String,
    /// 附件路径（图片或 PDF），按顺序发送
    pub attachments: Vec<PathBuf>,
    pub export_pdf: bool,
    pub export_png: bool,
    pub export_markdown: bool,
    /// 是否把片段实时写到 stdout
    pub echo: bool,
}

impl RunOptions {
    fn needs_browser(&self) -> bool {
        self.export_pdf || self.export_png
    }
}

/// 运行结果
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub status: SessionStatus,
    pub text: String,
    pub exported: Vec<PathBuf>,
}

/// 持有的浏览器：自己启动的要负责关闭，连接上的不关
struct PaperBrowser {
    browser: Browser,
    page: Page,
    owned: bool,
}

impl PaperBrowser {
    async fn close(mut self) {
        if !self.owned {
            return;
        }
        if let Err(e) = self.browser.close().await {
            warn!("关闭无头浏览器失败: {}", e);
        }
        let _ = self.browser.wait().await;
    }
}

/// 应用主结构
pub struct App<S = GeminiClient> {
    config: Config,
    ctx: SessionContext,
    flow: GenerationFlow<S>,
}

impl App<GeminiClient> {
    pub fn new(config: Config, credential: Credential) -> Self {
        let service = GeminiClient::new(&config);
        Self::with_service(config, credential, service)
    }
}

impl<S: GenerativeService> App<S> {
    pub fn with_service(config: Config, credential: Credential, service: S) -> Self {
        Self {
            config,
            ctx: SessionContext::new(credential),
            flow: GenerationFlow::new(service),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    fn page_assets(&self) -> PageAssets {
        PageAssets {
            katex_base_url: self.config.katex_base_url.clone(),
        }
    }

    fn typeset_timeout(&self) -> Duration {
        Duration::from_millis(self.config.typeset_timeout_ms)
    }

    /// 运行一次生成并按需导出
    ///
    /// 前置条件、配置、附件读取错误以 `Err` 返回，此时没有发出任何请求；
    /// 生成失败写进文本，返回 `Ok`，状态为 `Failed`。
    /// 凭证最先检查，缺失时不读取任何附件。
    pub async fn run(&mut self, options: &RunOptions) -> Result<RunOutcome, AppError> {
        if self.ctx.credential.is_empty() {
            return Err(PreconditionError::MissingCredential.into());
        }
        let render_config = self.config.render_config()?;
        let attachments = load_attachments(&options.attachments).await?;
        let request = GenerationRequest::new(
            self.config.model_selector(),
            attachments,
            options.topic.clone(),
            self.config.question_count,
            self.config.question_kind,
        )?;
        GenerationFlow::<S>::check_preconditions(&self.ctx, &request)?;

        let model = self.flow.client().model_for(&request);
        log_startup(&self.config, &model);

        let preview_browser = self.open_preview_browser().await;
        let (frames_tx, frames_rx) = watch::channel(PreviewFrame::default());
        let preview_task = preview_browser.as_ref().map(|b| {
            spawn_preview(
                DocumentPage::new(b.page.clone(), self.typeset_timeout()),
                render_config,
                self.page_assets(),
                frames_rx,
            )
        });

        let mut printed = 0usize;
        let echo = options.echo;
        let status = self
            .flow
            .run(&mut self.ctx, &request, |session| {
                let text = session.text();
                if echo {
                    let delta = text.get(printed..).unwrap_or(text);
                    print!("{}", delta);
                    let _ = std::io::stdout().flush();
                }
                printed = text.len();
                frames_tx.send_replace(PreviewFrame {
                    text: text.to_string(),
                    streaming: session.is_streaming(),
                });
            })
            .await?;
        if echo {
            println!();
        }

        drop(frames_tx);
        if let Some(task) = preview_task {
            if let Err(e) = task.await {
                warn!("预览任务异常退出: {}", e);
            }
        }

        if let Some(message) = self.ctx.session.error_message() {
            warn!("生成失败: {}", message);
        }
        let text = self.ctx.session.text().to_string();
        let exported = self
            .export(options, &text, &render_config, preview_browser)
            .await;

        print_final_stats(status, &text, &exported);
        Ok(RunOutcome {
            status,
            text,
            exported,
        })
    }

    async fn open_preview_browser(&self) -> Option<PaperBrowser> {
        let port = self.config.preview_debug_port?;
        match browser::connect_to_browser_and_page(port).await {
            Ok((browser, page)) => Some(PaperBrowser {
                browser,
                page,
                owned: false,
            }),
            Err(e) => {
                warn!("无法打开实时预览，继续生成: {}", e);
                None
            }
        }
    }

    async fn open_export_browser(
        &self,
        existing: Option<PaperBrowser>,
    ) -> Result<PaperBrowser, AppError> {
        if let Some(b) = existing {
            return Ok(b);
        }
        let (browser, page) =
            browser::launch_headless_browser(self.config.browser_executable.as_deref()).await?;
        Ok(PaperBrowser {
            browser,
            page,
            owned: true,
        })
    }

    /// 按需导出，失败只记录
    async fn export(
        &self,
        options: &RunOptions,
        text: &str,
        render_config: &RenderConfig,
        preview_browser: Option<PaperBrowser>,
    ) -> Vec<PathBuf> {
        let mut exported = Vec::new();
        let wants_any = options.needs_browser() || options.export_markdown;
        if !wants_any {
            return exported;
        }
        if text.trim().is_empty() {
            warn!("⚠️ 文档为空，跳过导出");
            return exported;
        }
        let dir = &self.config.output_dir;
        let prefix = &self.config.file_prefix;

        if options.export_markdown {
            match export_markdown(text, dir, prefix).await {
                Ok(path) => exported.push(path),
                Err(e) => error!("Markdown 导出失败: {}", e),
            }
        }

        if !options.needs_browser() {
            return exported;
        }

        let paper_browser = match self.open_export_browser(preview_browser).await {
            Ok(b) => b,
            Err(e) => {
                error!("无法打开浏览器，跳过 PDF/PNG 导出: {}", e);
                return exported;
            }
        };
        let page = DocumentPage::new(paper_browser.page.clone(), self.typeset_timeout());
        let document = render(text, render_config, false);

        match page.show(&document, &self.page_assets()).await {
            Ok(()) => {
                if options.export_pdf {
                    match PrintExporter::new(&page).print(dir, prefix).await {
                        Ok(path) => exported.push(path),
                        Err(e) => error!("PDF 导出失败: {}", e),
                    }
                }
                if options.export_png {
                    match SnapshotExporter::new(&page).capture(dir, prefix).await {
                        Ok(path) => exported.push(path),
                        Err(e) => {
                            error!("图片导出失败: {}", e);
                            eprintln!("{}", e.user_notice());
                        }
                    }
                }
            }
            Err(e) => error!("无法显示最终文档，跳过 PDF/PNG 导出: {}", e),
        }

        paper_browser.close().await;
        info!("导出完成: {} 个文件", exported.len());
        exported
    }
}
