use crate::app_state::AppEvent;
use crate::commands::app_command::HELP_TEXT;
use crate::commands::{edit, AppCommand};
use crate::fixtures::{Dataset, FixtureConfig};
use crate::views::{build_detail, build_rows, DashboardStats, ViewKind};
use anyhow::Context;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

/// 后台 actor：持有只读数据集，按命令生成页面数据
pub struct DashboardService {
    dataset: Arc<Dataset>,
    latency_ms: u64,
    evt_tx: mpsc::UnboundedSender<AppEvent>,
}

impl DashboardService {
    pub fn new(
        dataset: Arc<Dataset>,
        latency_ms: u64,
        evt_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            dataset,
            latency_ms,
            evt_tx,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// 消费命令直到发送端关闭或收到 Quit
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<AppCommand>) {
        while let Some(cmd) = cmd_rx.recv().await {
            if !self.handle(cmd).await {
                break;
            }
        }
        info!("dashboard service stopped");
    }

    /// 返回 false 表示应当退出
    pub async fn handle(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::LoadView { view, seq } => {
                let ds = self.dataset.clone();
                let tx = self.evt_tx.clone();
                let latency = self.latency_ms;
                // 模拟接口延迟，期间 UI 仍可响应
                tokio::spawn(async move {
                    sleep(Duration::from_millis(latency)).await;
                    let rows = build_rows(view, &ds);
                    let _ = tx.send(AppEvent::Rows { view, seq, rows });
                });
            }
            AppCommand::GetDetail { view, id } => {
                let detail = build_detail(view, &id, &self.dataset);
                if detail.is_none() {
                    warn!("detail not found: {:?} {}", view, id);
                }
                let _ = self.evt_tx.send(AppEvent::Detail(detail));
            }
            AppCommand::Stats => {
                let stats = DashboardStats::compute(&self.dataset);
                let _ = self.evt_tx.send(AppEvent::Stats(stats));
            }
            AppCommand::DepartmentAdd { name } => {
                self.spawn_edit(edit::department_add(&name));
            }
            AppCommand::EmployeeStatus { id, status } => {
                self.spawn_edit(edit::employee_status(&self.dataset, &id, &status));
            }
            AppCommand::LeadStatus { id, status } => {
                self.spawn_edit(edit::lead_status(&self.dataset, &id, &status));
            }
            AppCommand::Regenerate { seed } => {
                let config = FixtureConfig {
                    seed,
                    ..self.dataset.config.clone()
                };
                self.dataset = Arc::new(Dataset::generate(&config));
                info!("dataset regenerated with seed {}", seed);
                let _ = self
                    .evt_tx
                    .send(AppEvent::Message(format!("✓ 已使用 seed {} 重新生成数据", seed)));
                let _ = self.evt_tx.send(AppEvent::DatasetReplaced { seed });
            }
            AppCommand::Export { path } => match export_json(&self.dataset, Path::new(&path)).await
            {
                Ok(bytes) => {
                    info!("exported dataset to {} ({} bytes)", path, bytes);
                    let _ = self
                        .evt_tx
                        .send(AppEvent::Message(format!("✓ 已导出到 {} ({} 字节)", path, bytes)));
                }
                Err(e) => {
                    warn!("export failed: {:#}", e);
                    let _ = self
                        .evt_tx
                        .send(AppEvent::Error(format!("✗ 导出失败: {:#}", e)));
                }
            },
            AppCommand::Help => {
                let _ = self.evt_tx.send(AppEvent::Message(HELP_TEXT.to_string()));
            }
            AppCommand::Quit => {
                let _ = self.evt_tx.send(AppEvent::Message("收到退出命令".to_string()));
                return false;
            }
            AppCommand::Unknown(msg) => {
                let msg = if msg.is_empty() {
                    "空命令".to_string()
                } else {
                    msg
                };
                let _ = self.evt_tx.send(AppEvent::Error(format!("✗ {}", msg)));
            }
        }
        true
    }

    fn spawn_edit(&self, result: Result<edit::LocalEdit, edit::CommandError>) {
        let tx = self.evt_tx.clone();
        let latency = self.latency_ms;
        tokio::spawn(async move {
            edit::run(result, latency, tx).await;
        });
    }
}

/// 把整个数据集写成格式化 JSON，返回写入的字节数
pub async fn export_json(ds: &Dataset, path: &Path) -> anyhow::Result<usize> {
    let json = serde_json::to_string_pretty(ds).context("序列化数据集失败")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("无法创建目录 {}", parent.display()))?;
    }
    tokio::fs::write(path, json.as_bytes())
        .await
        .with_context(|| format!("无法写入 {}", path.display()))?;
    Ok(json.len())
}
