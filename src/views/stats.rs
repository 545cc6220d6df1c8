use crate::fixtures::model::*;
use crate::fixtures::Dataset;
use crate::views::{format_currency, ViewKind};
use serde::Serialize;

/// 分母为 0 时返回 0
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_revenue: f64,
    pub customers: usize,
    pub active_customers: usize,
    pub active_projects: usize,
    pub low_stock: usize,
    pub outstanding_receivables: f64,
    pub pipeline_value: f64,
    /// 已成交 / 已结束（成交 + 丢失）
    pub lead_conversion_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesStats {
    pub quotations: usize,
    pub quotation_acceptance_rate: f64,
    pub quoted_value: f64,
    pub invoices: usize,
    pub paid_total: f64,
    pub overdue_total: f64,
    pub overdue_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryStats {
    pub products: usize,
    pub stock_value: f64,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HrStats {
    pub headcount: usize,
    pub active: usize,
    pub on_leave: usize,
    pub terminated: usize,
    pub departments: usize,
    /// 基准日出勤率（Present/Late/Half Day 计为出勤）
    pub attendance_rate: f64,
    pub late_today: usize,
    pub payroll_period: String,
    pub payroll_net: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecruitmentStats {
    pub open_postings: usize,
    pub openings: u32,
    pub applications: usize,
    pub in_pipeline: usize,
    pub interviews: usize,
    pub offers: usize,
    pub hired: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub overview: OverviewStats,
    pub sales: SalesStats,
    pub inventory: InventoryStats,
    pub hr: HrStats,
    pub recruitment: RecruitmentStats,
}

impl DashboardStats {
    pub fn compute(ds: &Dataset) -> Self {
        Self {
            overview: overview(ds),
            sales: sales(ds),
            inventory: inventory(ds),
            hr: hr(ds),
            recruitment: recruitment(ds),
        }
    }

    /// 列表页顶部的统计卡片
    pub fn page_cards(&self, view: ViewKind) -> Vec<(&'static str, String)> {
        let pct = |v: f64| format!("{:.1}%", v);
        match view {
            ViewKind::Dashboard => Vec::new(),
            ViewKind::Customers => vec![
                ("客户", self.overview.customers.to_string()),
                ("活跃", self.overview.active_customers.to_string()),
                ("总收入", format_currency(self.overview.total_revenue)),
            ],
            ViewKind::Leads => vec![
                ("销售管道", format_currency(self.overview.pipeline_value)),
                ("转化率", pct(self.overview.lead_conversion_rate)),
            ],
            ViewKind::Products => vec![
                ("商品", self.inventory.products.to_string()),
                ("库存价值", format_currency(self.inventory.stock_value)),
                ("低库存", self.inventory.low_stock.to_string()),
                ("缺货", self.inventory.out_of_stock.to_string()),
            ],
            ViewKind::Projects => vec![("进行中", self.overview.active_projects.to_string())],
            ViewKind::Quotations => vec![
                ("报价单", self.sales.quotations.to_string()),
                ("接受率", pct(self.sales.quotation_acceptance_rate)),
                ("报价总额", format_currency(self.sales.quoted_value)),
            ],
            ViewKind::Invoices => vec![
                ("已收款", format_currency(self.sales.paid_total)),
                ("应收未收", format_currency(self.overview.outstanding_receivables)),
                ("逾期", format_currency(self.sales.overdue_total)),
            ],
            ViewKind::Employees | ViewKind::Departments => vec![
                ("员工", self.hr.headcount.to_string()),
                ("在职", self.hr.active.to_string()),
                ("休假", self.hr.on_leave.to_string()),
                ("部门", self.hr.departments.to_string()),
            ],
            ViewKind::Attendance => vec![
                ("今日出勤率", pct(self.hr.attendance_rate)),
                ("今日迟到", self.hr.late_today.to_string()),
            ],
            ViewKind::Payroll => vec![
                ("最近期间", self.hr.payroll_period.clone()),
                ("实发合计", format_currency(self.hr.payroll_net)),
            ],
            ViewKind::Recruitment => vec![
                ("开放职位", self.recruitment.open_postings.to_string()),
                ("流程中", self.recruitment.in_pipeline.to_string()),
                ("已录用", self.recruitment.hired.to_string()),
            ],
        }
    }
}

pub fn overview(ds: &Dataset) -> OverviewStats {
    let won = ds.leads.iter().filter(|l| l.status == LeadStatus::Won).count();
    let lost = ds.leads.iter().filter(|l| l.status == LeadStatus::Lost).count();
    OverviewStats {
        total_revenue: ds.get_total_revenue(),
        customers: ds.customers.len(),
        active_customers: ds
            .customers
            .iter()
            .filter(|c| c.status == CustomerStatus::Active)
            .count(),
        active_projects: ds.get_active_projects().len(),
        low_stock: ds.get_low_stock_products().len(),
        outstanding_receivables: ds.get_outstanding_receivables(),
        pipeline_value: ds.get_pipeline_value(),
        lead_conversion_rate: percent(won, won + lost),
    }
}

pub fn sales(ds: &Dataset) -> SalesStats {
    let accepted = ds
        .quotations
        .iter()
        .filter(|q| q.status == QuotationStatus::Accepted)
        .count();
    let decided = ds
        .quotations
        .iter()
        .filter(|q| {
            matches!(
                q.status,
                QuotationStatus::Accepted | QuotationStatus::Rejected | QuotationStatus::Expired
            )
        })
        .count();
    let overdue: Vec<&Invoice> = ds
        .invoices
        .filter_by(|i| i.status == InvoiceStatus::Overdue);
    SalesStats {
        quotations: ds.quotations.len(),
        quotation_acceptance_rate: percent(accepted, decided),
        quoted_value: ds.quotations.iter().map(|q| q.total_amount).sum(),
        invoices: ds.invoices.len(),
        paid_total: ds.invoices.iter().map(|i| i.paid_amount).sum(),
        overdue_total: overdue.iter().map(|i| i.remaining_amount).sum(),
        overdue_count: overdue.len(),
    }
}

pub fn inventory(ds: &Dataset) -> InventoryStats {
    InventoryStats {
        products: ds.products.len(),
        stock_value: ds
            .products
            .iter()
            .map(|p| p.cost_price * p.current_stock as f64)
            .sum(),
        low_stock: ds.get_low_stock_products().len(),
        out_of_stock: ds.get_out_of_stock_products().len(),
    }
}

pub fn hr(ds: &Dataset) -> HrStats {
    let count = |s: EmployeeStatus| ds.employees.iter().filter(|e| e.status == s).count();
    let today = ds.config.anchor;
    let todays: Vec<&Attendance> = ds.attendance.filter_by(|a| a.date == today);
    let attended = todays
        .iter()
        .filter(|a| {
            matches!(
                a.status,
                AttendanceStatus::Present | AttendanceStatus::Late | AttendanceStatus::HalfDay
            )
        })
        .count();
    let period = ds.latest_payroll_period().unwrap_or_default().to_string();
    HrStats {
        headcount: ds.employees.len(),
        active: count(EmployeeStatus::Active),
        on_leave: count(EmployeeStatus::OnLeave),
        terminated: count(EmployeeStatus::Terminated),
        departments: ds.get_departments().len(),
        attendance_rate: percent(attended, todays.len()),
        late_today: todays
            .iter()
            .filter(|a| a.status == AttendanceStatus::Late)
            .count(),
        payroll_net: ds
            .payroll
            .iter()
            .filter(|p| p.period == period)
            .map(|p| p.net_salary)
            .sum(),
        payroll_period: period,
    }
}

pub fn recruitment(ds: &Dataset) -> RecruitmentStats {
    let by = |s: ApplicationStatus| ds.applications.iter().filter(|a| a.status == s).count();
    let open: Vec<&JobPosting> = ds.job_postings.filter_by(|j| j.status == JobStatus::Open);
    RecruitmentStats {
        open_postings: open.len(),
        openings: open.iter().map(|j| j.openings).sum(),
        applications: ds.applications.len(),
        in_pipeline: ds
            .applications
            .iter()
            .filter(|a| !matches!(a.status, ApplicationStatus::Hired | ApplicationStatus::Rejected))
            .count(),
        interviews: by(ApplicationStatus::Interview),
        offers: by(ApplicationStatus::Offer),
        hired: by(ApplicationStatus::Hired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FixtureConfig, FixtureCounts};
    use chrono::NaiveDate;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_percent_zero_denominator() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn test_dashboard_matches_helpers() {
        let ds = Dataset::generate(&FixtureConfig::new(42, anchor()));
        let stats = DashboardStats::compute(&ds);
        assert_eq!(stats.overview.total_revenue, ds.get_total_revenue());
        assert_eq!(stats.overview.low_stock, ds.get_low_stock_products().len());
        assert_eq!(stats.inventory.low_stock, stats.overview.low_stock);
        assert_eq!(
            stats.hr.active + stats.hr.on_leave + stats.hr.terminated,
            stats.hr.headcount
        );
        assert_eq!(stats.hr.payroll_period, "2026-10");
        assert!(stats.hr.attendance_rate >= 0.0 && stats.hr.attendance_rate <= 100.0);
        assert!(stats.recruitment.in_pipeline <= stats.recruitment.applications);
    }

    #[test]
    fn test_empty_dataset_stats() {
        let mut cfg = FixtureConfig::new(1, anchor());
        cfg.counts = FixtureCounts {
            employees: 0,
            customers: 0,
            products: 0,
            leads: 0,
            projects: 0,
            quotations: 0,
            invoices: 0,
            job_postings: 0,
            candidates: 0,
            applications: 0,
            attendance_days: 30,
            payroll_months: 3,
        };
        let ds = Dataset::generate(&cfg);
        let stats = DashboardStats::compute(&ds);
        assert_eq!(stats.overview.total_revenue, 0.0);
        assert_eq!(stats.overview.lead_conversion_rate, 0.0);
        assert_eq!(stats.sales.quotation_acceptance_rate, 0.0);
        assert_eq!(stats.hr.attendance_rate, 0.0);
        assert_eq!(stats.hr.payroll_period, "");
        assert_eq!(stats.recruitment.openings, 0);
    }

    #[test]
    fn test_page_cards() {
        let ds = Dataset::generate(&FixtureConfig::new(42, anchor()));
        let stats = DashboardStats::compute(&ds);
        assert!(stats.page_cards(ViewKind::Dashboard).is_empty());
        for view in ViewKind::MENU.iter().skip(1) {
            assert!(!stats.page_cards(*view).is_empty(), "{:?}", view);
        }
        let cards = stats.page_cards(ViewKind::Payroll);
        assert_eq!(cards[0].1, "2026-10");
    }
}
