use crate::fixtures::generator::{FixtureConfig, FixtureGenerator};
use crate::fixtures::model::*;
use log::info;
use serde::Serialize;
use std::collections::HashMap;

/// 记录数组 + 构造时一次性建立的 id 索引
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Table<T> {
    rows: Vec<T>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl<T: Record> Table<T> {
    pub fn new(rows: Vec<T>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            // 与线性扫描语义一致：重复 id 只保留第一条
            index.entry(row.id().to_string()).or_insert(pos);
        }
        Self { rows, index }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).and_then(|&pos| self.rows.get(pos))
    }

    /// 按生成顺序返回全部匹配项
    pub fn filter_by<F>(&self, pred: F) -> Vec<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.iter().filter(|r| pred(r)).collect()
    }

    pub fn all(&self) -> &[T] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl<T: PartialEq> PartialEq for Table<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

/// 一次生成、之后只读的完整数据集
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub config: FixtureConfig,
    pub employees: Table<Employee>,
    pub customers: Table<Customer>,
    pub products: Table<Product>,
    pub leads: Table<Lead>,
    pub projects: Table<Project>,
    pub quotations: Table<Quotation>,
    pub invoices: Table<Invoice>,
    pub attendance: Table<Attendance>,
    pub payroll: Table<Payroll>,
    pub job_postings: Table<JobPosting>,
    pub candidates: Table<Candidate>,
    pub applications: Table<JobApplication>,
}

impl Dataset {
    pub fn generate(config: &FixtureConfig) -> Self {
        let counts = &config.counts;
        let mut gen = FixtureGenerator::new(config.seed, config.anchor, config.tax_rate);

        // 生成顺序固定：子记录只从已生成的父记录里取外键
        let employees = gen.generate_employees(counts.employees);
        let customers = gen.generate_customers(counts.customers);
        let products = gen.generate_products(counts.products);
        let leads = gen.generate_leads(counts.leads, &employees);
        let projects = gen.generate_projects(counts.projects, &customers, &employees);
        let quotations = gen.generate_quotations(counts.quotations, &customers, &products);
        let invoices =
            gen.generate_invoices(counts.invoices, &customers, &products, &quotations);
        let attendance = gen.generate_attendance(&employees, counts.attendance_days);
        let payroll = gen.generate_payroll(&employees, counts.payroll_months);
        let job_postings = gen.generate_job_postings(counts.job_postings);
        let candidates = gen.generate_candidates(counts.candidates);
        let applications =
            gen.generate_applications(counts.applications, &job_postings, &candidates);

        info!(
            "fixture dataset generated: seed={} anchor={} employees={} customers={} products={} invoices={} attendance={}",
            config.seed,
            config.anchor,
            employees.len(),
            customers.len(),
            products.len(),
            invoices.len(),
            attendance.len()
        );

        Self {
            config: config.clone(),
            employees: Table::new(employees),
            customers: Table::new(customers),
            products: Table::new(products),
            leads: Table::new(leads),
            projects: Table::new(projects),
            quotations: Table::new(quotations),
            invoices: Table::new(invoices),
            attendance: Table::new(attendance),
            payroll: Table::new(payroll),
            job_postings: Table::new(job_postings),
            candidates: Table::new(candidates),
            applications: Table::new(applications),
        }
    }

    // ---- 按 id 查找 ----

    pub fn get_employee_by_id(&self, id: &str) -> Option<&Employee> {
        self.employees.get(id)
    }

    pub fn get_customer_by_id(&self, id: &str) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn get_product_by_id(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn get_lead_by_id(&self, id: &str) -> Option<&Lead> {
        self.leads.get(id)
    }

    pub fn get_project_by_id(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn get_quotation_by_id(&self, id: &str) -> Option<&Quotation> {
        self.quotations.get(id)
    }

    pub fn get_invoice_by_id(&self, id: &str) -> Option<&Invoice> {
        self.invoices.get(id)
    }

    pub fn get_payroll_by_id(&self, id: &str) -> Option<&Payroll> {
        self.payroll.get(id)
    }

    pub fn get_job_posting_by_id(&self, id: &str) -> Option<&JobPosting> {
        self.job_postings.get(id)
    }

    pub fn get_candidate_by_id(&self, id: &str) -> Option<&Candidate> {
        self.candidates.get(id)
    }

    pub fn get_application_by_id(&self, id: &str) -> Option<&JobApplication> {
        self.applications.get(id)
    }

    pub fn get_attendance_by_id(&self, id: &str) -> Option<&Attendance> {
        self.attendance.get(id)
    }

    // ---- 按外键过滤（保持生成顺序） ----

    pub fn get_projects_by_customer(&self, customer_id: &str) -> Vec<&Project> {
        self.projects.filter_by(|p| p.customer_id == customer_id)
    }

    pub fn get_quotations_by_customer(&self, customer_id: &str) -> Vec<&Quotation> {
        self.quotations.filter_by(|q| q.customer_id == customer_id)
    }

    pub fn get_invoices_by_customer(&self, customer_id: &str) -> Vec<&Invoice> {
        self.invoices.filter_by(|i| i.customer_id == customer_id)
    }

    pub fn get_leads_by_assignee(&self, employee_id: &str) -> Vec<&Lead> {
        self.leads.filter_by(|l| l.assigned_to == employee_id)
    }

    pub fn get_attendance_by_employee(&self, employee_id: &str) -> Vec<&Attendance> {
        self.attendance.filter_by(|a| a.employee_id == employee_id)
    }

    pub fn get_payroll_by_employee(&self, employee_id: &str) -> Vec<&Payroll> {
        self.payroll.filter_by(|p| p.employee_id == employee_id)
    }

    pub fn get_employees_by_department(&self, department: &str) -> Vec<&Employee> {
        self.employees.filter_by(|e| e.department == department)
    }

    pub fn get_applications_by_job(&self, job_id: &str) -> Vec<&JobApplication> {
        self.applications.filter_by(|a| a.job_id == job_id)
    }

    pub fn get_applications_by_candidate(&self, candidate_id: &str) -> Vec<&JobApplication> {
        self.applications.filter_by(|a| a.candidate_id == candidate_id)
    }

    // ---- 聚合（每次调用都重新计算） ----

    pub fn get_total_revenue(&self) -> f64 {
        self.customers.iter().map(|c| c.total_revenue).sum()
    }

    pub fn get_active_projects(&self) -> Vec<&Project> {
        self.projects
            .filter_by(|p| p.status == ProjectStatus::InProgress)
    }

    pub fn get_low_stock_products(&self) -> Vec<&Product> {
        self.products
            .filter_by(|p| p.current_stock <= p.min_stock_level)
    }

    pub fn get_out_of_stock_products(&self) -> Vec<&Product> {
        self.products.filter_by(|p| p.current_stock == 0)
    }

    pub fn get_outstanding_receivables(&self) -> f64 {
        self.invoices
            .iter()
            .filter(|i| i.status != InvoiceStatus::Cancelled)
            .map(|i| i.remaining_amount)
            .sum()
    }

    /// 未结束线索的加权金额：Σ estimated_value × probability%
    pub fn get_pipeline_value(&self) -> f64 {
        self.leads
            .iter()
            .filter(|l| !matches!(l.status, LeadStatus::Won | LeadStatus::Lost))
            .map(|l| l.estimated_value * l.probability as f64 / 100.0)
            .sum()
    }

    /// 部门列表，按首次出现的顺序
    pub fn get_departments(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in self.employees.iter() {
            if !out.contains(&e.department.as_str()) {
                out.push(&e.department);
            }
        }
        out
    }

    /// 最新的工资期（YYYY-MM 字符串可直接比较）
    pub fn latest_payroll_period(&self) -> Option<&str> {
        self.payroll.iter().map(|p| p.period.as_str()).max()
    }

    // ---- 展示用名称，找不到时给占位文本 ----

    pub fn employee_name(&self, id: &str) -> String {
        self.get_employee_by_id(id)
            .map(|e| e.full_name())
            .unwrap_or_else(|| "Unknown Employee".to_string())
    }

    pub fn customer_name(&self, id: &str) -> String {
        self.get_customer_by_id(id)
            .map(|c| c.company_name.clone())
            .unwrap_or_else(|| "Unknown Customer".to_string())
    }

    pub fn job_title(&self, id: &str) -> String {
        self.get_job_posting_by_id(id)
            .map(|j| j.title.clone())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn candidate_name(&self, id: &str) -> String {
        self.get_candidate_by_id(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "N/A".to_string())
    }
}
