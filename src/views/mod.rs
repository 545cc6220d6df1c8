pub mod query;
pub mod rows;
pub mod stats;

pub use query::ListQuery;
pub use rows::{build_detail, build_rows, RecordDetail, RowSummary};
pub use stats::DashboardStats;

use crate::fixtures::model::*;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum ViewKind {
    Dashboard,
    Customers,
    Leads,
    Products,
    Projects,
    Quotations,
    Invoices,
    Employees,
    Departments,
    Attendance,
    Payroll,
    Recruitment,
}

impl ViewKind {
    /// 左侧菜单顺序
    pub const MENU: &'static [ViewKind] = &[
        ViewKind::Dashboard,
        ViewKind::Customers,
        ViewKind::Leads,
        ViewKind::Products,
        ViewKind::Projects,
        ViewKind::Quotations,
        ViewKind::Invoices,
        ViewKind::Employees,
        ViewKind::Departments,
        ViewKind::Attendance,
        ViewKind::Payroll,
        ViewKind::Recruitment,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Dashboard => "仪表盘",
            ViewKind::Customers => "客户",
            ViewKind::Leads => "销售线索",
            ViewKind::Products => "商品库存",
            ViewKind::Projects => "项目",
            ViewKind::Quotations => "报价单",
            ViewKind::Invoices => "发票",
            ViewKind::Employees => "员工",
            ViewKind::Departments => "部门",
            ViewKind::Attendance => "考勤",
            ViewKind::Payroll => "薪资",
            ViewKind::Recruitment => "招聘",
        }
    }

    /// 表头（不含 id 和状态列）
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ViewKind::Dashboard => &[],
            ViewKind::Customers => &["公司", "联系人", "行业", "城市", "信用额度", "累计收入"],
            ViewKind::Leads => &["公司", "联系人", "来源", "预估金额", "概率", "负责人"],
            ViewKind::Products => &["SKU", "名称", "类别", "售价", "库存", "最低库存"],
            ViewKind::Projects => &["名称", "客户", "负责人", "预算", "已用", "完成度"],
            ViewKind::Quotations => &["编号", "客户", "明细", "小计", "税额", "总额"],
            ViewKind::Invoices => &["编号", "客户", "总额", "已付", "未付", "到期日"],
            ViewKind::Employees => &["工号", "姓名", "部门", "职位", "入职日期", "年薪"],
            ViewKind::Departments => &["部门", "人数", "在职", "负责人", "年薪合计"],
            ViewKind::Attendance => &["日期", "员工", "签到", "签退", "工时"],
            ViewKind::Payroll => &["期间", "员工", "基本工资", "津贴", "扣除", "实发"],
            ViewKind::Recruitment => &["职位", "候选人", "申请日期", "评分"],
        }
    }

    /// 该页面可用于筛选的状态取值（按 f 键循环）
    pub fn statuses(&self) -> Vec<&'static str> {
        fn labels<T: Copy>(all: &[T], label: fn(&T) -> &'static str) -> Vec<&'static str> {
            all.iter().map(label).collect()
        }
        match self {
            ViewKind::Dashboard | ViewKind::Departments => Vec::new(),
            ViewKind::Customers => labels(CustomerStatus::ALL, CustomerStatus::label),
            ViewKind::Leads => labels(LeadStatus::ALL, LeadStatus::label),
            ViewKind::Products => vec!["In Stock", "Low Stock", "Out of Stock"],
            ViewKind::Projects => labels(ProjectStatus::ALL, ProjectStatus::label),
            ViewKind::Quotations => labels(QuotationStatus::ALL, QuotationStatus::label),
            ViewKind::Invoices => labels(InvoiceStatus::ALL, InvoiceStatus::label),
            ViewKind::Employees => labels(EmployeeStatus::ALL, EmployeeStatus::label),
            ViewKind::Attendance => labels(AttendanceStatus::ALL, AttendanceStatus::label),
            ViewKind::Payroll => labels(PayrollStatus::ALL, PayrollStatus::label),
            ViewKind::Recruitment => labels(ApplicationStatus::ALL, ApplicationStatus::label),
        }
    }

    pub fn next_status(&self, current: Option<&str>) -> Option<String> {
        let all = self.statuses();
        match current {
            None => all.first().map(|s| s.to_string()),
            Some(cur) => {
                let pos = all.iter().position(|s| *s == cur)?;
                all.get(pos + 1).map(|s| s.to_string())
            }
        }
    }
}

/// 金额展示：千分位 + 两位小数
pub fn format_currency(v: f64) -> String {
    let negative = v < 0.0;
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(216.0), "$216.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-1000.5), "-$1,000.50");
    }

    #[test]
    fn test_status_cycle() {
        let v = ViewKind::Employees;
        assert_eq!(v.next_status(None).as_deref(), Some("Active"));
        assert_eq!(v.next_status(Some("Active")).as_deref(), Some("On Leave"));
        assert_eq!(v.next_status(Some("Terminated")), None);
        assert_eq!(ViewKind::Departments.next_status(None), None);
    }

    #[test]
    fn test_menu_headers() {
        for v in ViewKind::MENU {
            if *v != ViewKind::Dashboard {
                assert!(!v.headers().is_empty());
            }
        }
    }
}
