mod app_service;
mod app_state;
mod commands;
mod config;
mod fixtures;
mod ui;
mod views;

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::app_service::DashboardService;
use crate::app_state::{App, AppEvent};
use crate::commands::AppCommand;
use crate::config::AppConfig;
use crate::fixtures::Dataset;
use crate::ui::draw;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let log_dir = std::path::PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir).context("无法创建日志目录")?;
    let log_path = log_dir.join(format!("app-{}.log", ts));
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("无法创建日志文件 {}", log_path.display()))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file))) // TUI 占用终端，日志写文件
        .filter_level(log::LevelFilter::Warn)
        .filter_module("erpdash", log::LevelFilter::Info)
        .init();

    let mut startup_info = Vec::new();

    let current_dir = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    startup_info.push(format!("当前工作目录: {}", current_dir.display()));

    // 加载 .env（不存在时只用系统环境变量）
    match dotenv::dotenv() {
        Ok(path) => startup_info.push(format!("✓ 已加载 .env 文件: {}", path.display())),
        Err(_) => startup_info.push("⚠ 未找到 .env 文件，使用系统环境变量".to_string()),
    }

    let config = AppConfig::from_env().context("配置无效")?;
    log::info!("config: {:?}", config);
    startup_info.push(format!(
        "✓ seed {}, 基准日 {}, 税率 {}%",
        config.fixture.seed, config.fixture.anchor, config.fixture.tax_rate
    ));

    let dataset = Arc::new(Dataset::generate(&config.fixture));
    startup_info.push(format!(
        "✓ 已生成模拟数据: {} 名员工, {} 个客户, {} 个商品",
        dataset.employees.len(),
        dataset.customers.len(),
        dataset.products.len()
    ));

    // 创建核心 Channel
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<AppCommand>();
    let (evt_tx, evt_rx) = mpsc::unbounded_channel::<AppEvent>();

    // 启动单后台任务模型 (Actor)
    let service = DashboardService::new(dataset, config.api_latency_ms, evt_tx);
    tokio::spawn(service.run(cmd_rx));

    // TUI 初始化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        startup_info,
        config.fixture.seed,
        config.page_size,
        cmd_tx,
        evt_rx,
    );
    // 首屏是仪表盘，先拉一次统计
    let _ = app.cmd_tx.send(AppCommand::Stats);

    let res = match app.evt_rx.take() {
        Some(rx) => run_app_loop(&mut terminal, &mut app, rx).await,
        None => Ok(()),
    };

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = res {
        log::error!("ui loop failed: {}", e);
    }
    res.context("界面运行出错")
}

async fn run_app_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut evt_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        while let Ok(event) = evt_rx.try_recv() {
            app.handle_event(event);
        }

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key_event(key.code) {
                    let _ = app.cmd_tx.send(AppCommand::Quit);
                    return Ok(());
                }
            }
        }
    }
}
