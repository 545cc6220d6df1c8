use crate::app_state::AppEvent;
use crate::fixtures::model::{EmployeeStatus, LeadStatus};
use crate::fixtures::Dataset;
use log::warn;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

/// 只作用于当前页面本地状态的“修改”，不会写回数据集
#[derive(Debug, Clone, PartialEq)]
pub enum LocalEdit {
    DepartmentAdded { name: String },
    EmployeeStatusChanged { id: String, status: EmployeeStatus },
    LeadStatusChanged { id: String, status: LeadStatus },
}

impl LocalEdit {
    pub fn describe(&self) -> String {
        match self {
            LocalEdit::DepartmentAdded { name } => format!("部门已添加: {}", name),
            LocalEdit::EmployeeStatusChanged { id, status } => {
                format!("员工 {} 状态已更新为 {}", id, status)
            }
            LocalEdit::LeadStatusChanged { id, status } => {
                format!("线索 {} 状态已更新为 {}", id, status)
            }
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("{0} 为必填项")]
    Required(&'static str),
    #[error("无效的状态: {0}")]
    InvalidStatus(String),
    #[error("未找到记录: {0}")]
    NotFound(String),
}

pub fn department_add(name: &str) -> Result<LocalEdit, CommandError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::Required("部门名称"));
    }
    Ok(LocalEdit::DepartmentAdded {
        name: name.to_string(),
    })
}

pub fn employee_status(ds: &Dataset, id: &str, status: &str) -> Result<LocalEdit, CommandError> {
    if id.trim().is_empty() {
        return Err(CommandError::Required("员工 ID"));
    }
    if status.trim().is_empty() {
        return Err(CommandError::Required("状态"));
    }
    let status = EmployeeStatus::parse_loose(status)
        .ok_or_else(|| CommandError::InvalidStatus(status.to_string()))?;
    let emp = ds
        .get_employee_by_id(id)
        .ok_or_else(|| CommandError::NotFound(id.to_string()))?;
    Ok(LocalEdit::EmployeeStatusChanged {
        id: emp.id.clone(),
        status,
    })
}

pub fn lead_status(ds: &Dataset, id: &str, status: &str) -> Result<LocalEdit, CommandError> {
    if id.trim().is_empty() {
        return Err(CommandError::Required("线索 ID"));
    }
    if status.trim().is_empty() {
        return Err(CommandError::Required("状态"));
    }
    let status = LeadStatus::parse_loose(status)
        .ok_or_else(|| CommandError::InvalidStatus(status.to_string()))?;
    let lead = ds
        .get_lead_by_id(id)
        .ok_or_else(|| CommandError::NotFound(id.to_string()))?;
    Ok(LocalEdit::LeadStatusChanged {
        id: lead.id.clone(),
        status,
    })
}

/// 模拟一次保存请求：校验失败立即报错，成功则等待假延迟后回报
pub async fn run(
    edit: Result<LocalEdit, CommandError>,
    latency_ms: u64,
    evt_tx: mpsc::UnboundedSender<AppEvent>,
) {
    match edit {
        Ok(edit) => {
            let _ = evt_tx.send(AppEvent::Log(format!("正在保存: {}", edit.describe())));
            sleep(Duration::from_millis(latency_ms)).await;
            let _ = evt_tx.send(AppEvent::Message(format!("✓ {}", edit.describe())));
            let _ = evt_tx.send(AppEvent::Edit(edit));
        }
        Err(e) => {
            warn!("edit rejected: {}", e);
            let _ = evt_tx.send(AppEvent::Error(format!("✗ {}", e)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureConfig;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        Dataset::generate(&FixtureConfig::new(
            42,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        ))
    }

    #[test]
    fn test_department_add_requires_name() {
        assert_eq!(department_add("  "), Err(CommandError::Required("部门名称")));
        assert_eq!(
            department_add(" Legal "),
            Ok(LocalEdit::DepartmentAdded {
                name: "Legal".to_string()
            })
        );
    }

    #[test]
    fn test_employee_status_validation() {
        let ds = dataset();
        assert_eq!(
            employee_status(&ds, "EMP-0001", "on leave"),
            Ok(LocalEdit::EmployeeStatusChanged {
                id: "EMP-0001".to_string(),
                status: EmployeeStatus::OnLeave
            })
        );
        assert_eq!(
            employee_status(&ds, "EMP-0001", ""),
            Err(CommandError::Required("状态"))
        );
        assert_eq!(
            employee_status(&ds, "EMP-0001", "retired"),
            Err(CommandError::InvalidStatus("retired".to_string()))
        );
        assert_eq!(
            employee_status(&ds, "EMP-9999", "active"),
            Err(CommandError::NotFound("EMP-9999".to_string()))
        );
    }

    #[test]
    fn test_lead_status_validation() {
        let ds = dataset();
        assert!(lead_status(&ds, "LEAD-0001", "negotiation").is_ok());
        assert!(lead_status(&ds, "", "won").is_err());
    }

    #[tokio::test]
    async fn test_run_reports_success_after_latency() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        run(department_add("Legal"), 0, tx).await;
        let mut events = Vec::new();
        while let Ok(e) = rx.try_recv() {
            events.push(e);
        }
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[1], AppEvent::Message(m) if m.starts_with('✓')));
        assert!(matches!(
            &events[2],
            AppEvent::Edit(LocalEdit::DepartmentAdded { name }) if name == "Legal"
        ));
    }

    #[tokio::test]
    async fn test_run_reports_validation_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        run(department_add(""), 0, tx).await;
        match rx.try_recv() {
            Ok(AppEvent::Error(msg)) => assert!(msg.contains("部门名称")),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }
}
