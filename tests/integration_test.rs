use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::stream::{self, StreamExt};

use examcraft::browser::launch_headless_browser;
use examcraft::clients::{ContentPart, FragmentStream, GenerativeService, ServiceRequest};
use examcraft::error::{AppError, PreconditionError, ServiceError};
use examcraft::export::{PrintExporter, SnapshotExporter};
use examcraft::models::{SessionStatus, VISION_MODEL};
use examcraft::render::{render, PageAssets};
use examcraft::workflow::{GenerationFlow, SessionContext};
use examcraft::{App, Config, Credential, DocumentPage, GenerationRequest, RenderConfig, RunOptions};

/// 按预设脚本返回片段的生成服务，记录收到的每个请求
#[derive(Clone, Default)]
struct ScriptedService {
    fragments: Vec<Result<String, ServiceError>>,
    open_error: Option<ServiceError>,
    requests: Arc<Mutex<Vec<ServiceRequest>>>,
}

impl ScriptedService {
    fn with_fragments(fragments: Vec<String>) -> Self {
        Self {
            fragments: fragments.into_iter().map(Ok).collect(),
            ..Default::default()
        }
    }

    fn failing_on_open(error: ServiceError) -> Self {
        Self {
            open_error: Some(error),
            ..Default::default()
        }
    }

    fn requests(&self) -> Vec<ServiceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl GenerativeService for ScriptedService {
    fn stream_content(
        &self,
        _credential: &Credential,
        request: ServiceRequest,
    ) -> impl Future<Output = Result<FragmentStream, ServiceError>> + Send {
        self.requests.lock().unwrap().push(request);
        let fragments = self.fragments.clone();
        let open_error = self.open_error.clone();
        async move {
            match open_error {
                Some(e) => Err(e),
                None => Ok(stream::iter(fragments).boxed()),
            }
        }
    }
}

fn quiet_options(topic: &str, attachments: Vec<PathBuf>) -> RunOptions {
    RunOptions {
        topic: topic.to_string(),
        attachments,
        echo: false,
        ..Default::default()
    }
}

fn mcq_fragments(count: usize) -> Vec<String> {
    (1..=count)
        .flat_map(|i| {
            vec![
                format!("**{}.** What is ${} + {}$? ", i, i, i),
                format!("**(A)** {} **(B)** {} ", i, i * 2),
                format!("**(C)** {} **(D)** {}\n\n", i * 3, i * 4),
            ]
        })
        .collect()
}

fn temp_image(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("examcraft-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]).unwrap();
    path
}

#[tokio::test]
async fn test_empty_credential_never_calls_service() {
    let service = ScriptedService::with_fragments(vec!["x".into()]);
    let mut app = App::with_service(Config::default(), Credential::new(""), service.clone());

    let err = app
        .run(&quiet_options("Photosynthesis", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Precondition(PreconditionError::MissingCredential)
    ));
    assert!(service.requests().is_empty());
    assert_eq!(app.context().session.text(), "");
}

#[tokio::test]
async fn test_empty_credential_checked_before_attachments() {
    let service = ScriptedService::with_fragments(vec!["x".into()]);
    let mut app = App::with_service(Config::default(), Credential::new(""), service.clone());

    let err = app
        .run(&quiet_options(
            "Topic",
            vec![PathBuf::from("/nonexistent/scan.png")],
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Precondition(PreconditionError::MissingCredential)
    ));
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn test_missing_source_never_calls_service() {
    let service = ScriptedService::with_fragments(vec!["x".into()]);
    let mut app = App::with_service(Config::default(), Credential::new("key"), service.clone());

    let err = app.run(&quiet_options("   ", vec![])).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Precondition(PreconditionError::MissingSource)
    ));
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn test_image_attachment_selects_vision_model() {
    let service = ScriptedService::with_fragments(mcq_fragments(10));
    let config = Config {
        question_count: 10,
        ..Config::default()
    };
    let mut app = App::with_service(config, Credential::new("key"), service.clone());

    let outcome = app
        .run(&quiet_options("", vec![temp_image("diagram.png")]))
        .await
        .unwrap();

    assert_eq!(outcome.status, SessionStatus::Done);
    assert!(outcome.exported.is_empty());

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model_id, VISION_MODEL);
    assert!(matches!(&requests[0].parts[0], ContentPart::Binary(a) if a.mime_type == "image/png"));
    match requests[0].parts.last() {
        Some(ContentPart::Text(instruction)) => {
            assert!(instruction.contains("Generate 10 exam questions."))
        }
        other => panic!("最后一个片段应该是指令文本: {:?}", other),
    }

    for i in 1..=10 {
        assert!(outcome.text.contains(&format!("**{}.**", i)));
    }
    for option in ["**(A)**", "**(B)**", "**(C)**", "**(D)**"] {
        assert_eq!(outcome.text.matches(option).count(), 10);
    }
}

#[tokio::test]
async fn test_unknown_model_appends_error_block() {
    let service = ScriptedService::failing_on_open(
        ServiceError::new("[404 Not Found] models/foo-bar is not found").with_status(404),
    );
    let config = Config {
        model: "foo-bar".to_string(),
        ..Config::default()
    };
    let mut app = App::with_service(config, Credential::new("key"), service.clone());

    let outcome = app
        .run(&quiet_options("Thermodynamics", vec![]))
        .await
        .unwrap();

    assert_eq!(outcome.status, SessionStatus::Failed);
    assert_eq!(service.requests()[0].model_id, "foo-bar");
    assert!(outcome
        .text
        .ends_with("Model 'foo-bar' not found or incompatible."));
}

#[tokio::test]
async fn test_markdown_export_writes_final_text() {
    let dir = std::env::temp_dir().join(format!("examcraft-md-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let service = ScriptedService::with_fragments(mcq_fragments(2));
    let config = Config {
        output_dir: dir.clone(),
        question_count: 2,
        ..Config::default()
    };
    let mut app = App::with_service(config, Credential::new("key"), service);

    let options = RunOptions {
        export_markdown: true,
        ..quiet_options("Arithmetic", vec![])
    };
    let outcome = app.run(&options).await.unwrap();

    assert_eq!(outcome.exported.len(), 1);
    let saved = std::fs::read_to_string(&outcome.exported[0]).unwrap();
    assert_eq!(saved, outcome.text);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_flow_accumulates_mid_stream_failure() {
    let mut fragments: Vec<Result<String, ServiceError>> =
        mcq_fragments(1).into_iter().map(Ok).collect();
    fragments.push(Err(ServiceError::new("connection reset by peer")));
    let service = ScriptedService {
        fragments,
        ..Default::default()
    };
    let flow = GenerationFlow::new(service);
    let mut ctx = SessionContext::new(Credential::new("key"));
    let request = GenerationRequest::new(
        "auto".parse().unwrap(),
        vec![],
        "Algebra",
        1,
        Default::default(),
    )
    .unwrap();

    let mut updates = 0;
    let status = tokio_test::block_on(flow.run(&mut ctx, &request, |_| updates += 1)).unwrap();

    assert_eq!(status, SessionStatus::Failed);
    assert_eq!(updates, 4);
    assert!(ctx.session.text().starts_with("**1.**"));
    assert!(ctx
        .session
        .text()
        .ends_with("Please check your connection and try again."));
}

// ========== 需要本机浏览器的测试 ==========

fn png_height(bytes: &[u8]) -> u32 {
    // IHDR: 8 字节签名 + 4 字节长度 + 4 字节类型 + 宽 + 高
    u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]])
}

fn long_paper() -> String {
    mcq_fragments(120).concat()
}

#[tokio::test]
#[ignore] // 需要本机安装 Chrome/Chromium：cargo test -- --ignored
async fn test_png_captures_beyond_viewport() {
    let (mut browser, page) = launch_headless_browser(None).await.expect("启动浏览器失败");
    let page = DocumentPage::new(page, Duration::from_secs(5));
    let document = render(&long_paper(), &RenderConfig::new(11.0, 1).unwrap(), true);
    page.show(&document, &PageAssets { katex_base_url: Config::default().katex_base_url })
        .await
        .expect("显示文档失败");

    let dir = std::env::temp_dir();
    let path = SnapshotExporter::new(&page)
        .capture(&dir, "examcraft-it")
        .await
        .expect("截图失败");
    let bytes = std::fs::read(&path).unwrap();

    assert_eq!(&bytes[1..4], b"PNG");
    assert!(png_height(&bytes) > 2 * 1024, "截图应该包含视口之外的内容");

    let cursor_visible: bool = page
        .eval_as("document.querySelector('.stream-cursor').offsetParent !== null")
        .await
        .unwrap();
    assert!(cursor_visible, "截图结束后光标应该恢复显示");

    std::fs::remove_file(&path).unwrap();
    browser.close().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_print_writes_pdf() {
    let (mut browser, page) = launch_headless_browser(None).await.expect("启动浏览器失败");
    let page = DocumentPage::new(page, Duration::from_secs(5));
    let document = render(&long_paper(), &RenderConfig::default(), false);
    page.show(&document, &PageAssets { katex_base_url: Config::default().katex_base_url })
        .await
        .expect("显示文档失败");

    let path = PrintExporter::new(&page)
        .print(&std::env::temp_dir(), "examcraft-it")
        .await
        .expect("打印失败");
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    std::fs::remove_file(&path).unwrap();
    browser.close().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_scroll_to_bottom_follows_long_paper() {
    let (mut browser, page) = launch_headless_browser(None).await.expect("启动浏览器失败");
    let page = DocumentPage::new(page, Duration::from_secs(5));
    let document = render(&long_paper(), &RenderConfig::new(11.0, 1).unwrap(), true);
    page.show(&document, &PageAssets { katex_base_url: Config::default().katex_base_url })
        .await
        .expect("显示文档失败");

    let offset = page.scroll_to_bottom().await.expect("滚动失败");
    assert!(offset > 0.0, "长文档应该滚动到视口之外");

    browser.close().await.unwrap();
}
