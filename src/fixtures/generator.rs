use crate::fixtures::model::*;
use crate::fixtures::totals::{compute_totals, line_total, round_money};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime};
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::{CompanyName, Industry, Profession};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Sales",
    "Marketing",
    "Finance",
    "Human Resources",
    "Operations",
    "Customer Support",
];

const POSITIONS: &[(&str, &[&str])] = &[
    (
        "Engineering",
        &["Software Engineer", "Senior Engineer", "QA Engineer", "DevOps Engineer"],
    ),
    ("Sales", &["Account Executive", "Sales Manager", "Sales Representative"]),
    ("Marketing", &["Marketing Specialist", "Content Writer", "SEO Analyst"]),
    ("Finance", &["Accountant", "Financial Analyst", "Controller"]),
    ("Human Resources", &["HR Generalist", "Recruiter", "HR Manager"]),
    ("Operations", &["Operations Analyst", "Logistics Coordinator"]),
    ("Customer Support", &["Support Agent", "Support Lead"]),
];

const PRODUCT_CATEGORIES: &[(&str, &[&str])] = &[
    ("Electronics", &["Monitor", "Laptop", "Headset", "Webcam", "Docking Station"]),
    ("Office Supplies", &["Paper Ream", "Stapler", "Toner Cartridge", "Notebook"]),
    ("Furniture", &["Office Chair", "Standing Desk", "Filing Cabinet", "Bookshelf"]),
    ("Software", &["Antivirus License", "Office Suite", "Design Suite", "CRM Seat"]),
    ("Networking", &["Router", "Switch", "Access Point", "Patch Cable"]),
];

const UNITS: &[&str] = &["pcs", "box", "set", "license"];

const LEAD_SOURCES: &[&str] = &[
    "Website",
    "Referral",
    "Trade Show",
    "Cold Call",
    "LinkedIn",
    "Email Campaign",
];

const CANDIDATE_SOURCES: &[&str] = &["LinkedIn", "Referral", "Job Board", "Career Site", "Agency"];

const SKILLS: &[&str] = &[
    "Rust",
    "TypeScript",
    "SQL",
    "Excel",
    "Negotiation",
    "Project Management",
    "Accounting",
    "Copywriting",
    "Customer Service",
    "Data Analysis",
    "Recruiting",
    "Public Speaking",
];

const MILESTONE_NAMES: &[&str] = &[
    "Kickoff",
    "Requirements",
    "Design Review",
    "Implementation",
    "Testing",
    "UAT",
    "Go Live",
];

/// 每种记录的生成数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureCounts {
    pub employees: usize,
    pub customers: usize,
    pub products: usize,
    pub leads: usize,
    pub projects: usize,
    pub quotations: usize,
    pub invoices: usize,
    pub job_postings: usize,
    pub candidates: usize,
    pub applications: usize,
    pub attendance_days: u32,
    pub payroll_months: u32,
}

impl Default for FixtureCounts {
    fn default() -> Self {
        Self {
            employees: 30,
            customers: 50,
            products: 120,
            leads: 80,
            projects: 30,
            quotations: 60,
            invoices: 80,
            job_postings: 15,
            candidates: 100,
            applications: 150,
            attendance_days: 30,
            payroll_months: 3,
        }
    }
}

/// 数据集构造参数：同一份配置总是得到同一份数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureConfig {
    pub seed: u64,
    /// 所有相对日期（“最近 30 天”等）都以此为基准
    pub anchor: NaiveDate,
    pub tax_rate: f64,
    pub counts: FixtureCounts,
}

impl FixtureConfig {
    pub fn new(seed: u64, anchor: NaiveDate) -> Self {
        Self {
            seed,
            anchor,
            tax_rate: 8.0,
            counts: FixtureCounts::default(),
        }
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self::new(42, Local::now().date_naive())
    }
}

pub fn seq_id(prefix: &str, n: usize) -> String {
    format!("{}-{:04}", prefix, n)
}

/// 带种子的伪随机记录生成器
pub struct FixtureGenerator {
    rng: StdRng,
    anchor: NaiveDate,
    tax_rate: f64,
}

impl FixtureGenerator {
    pub fn new(seed: u64, anchor: NaiveDate, tax_rate: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            anchor,
            tax_rate,
        }
    }

    fn days_ago(&mut self, min: i64, max: i64) -> NaiveDate {
        self.anchor - Duration::days(self.rng.gen_range(min..=max))
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn weighted<T: Copy>(&mut self, table: &[(T, u32)]) -> T {
        let total: u32 = table.iter().map(|(_, w)| *w).sum();
        let mut roll = self.rng.gen_range(0..total.max(1));
        for (value, w) in table {
            if roll < *w {
                return *value;
            }
            roll -= *w;
        }
        table[table.len() - 1].0
    }

    fn money(&mut self, min: f64, max: f64) -> f64 {
        round_money(self.rng.gen_range(min..max))
    }

    pub fn generate_employees(&mut self, count: usize) -> Vec<Employee> {
        let mut managers: HashMap<String, String> = HashMap::new();
        let mut out = Vec::with_capacity(count);

        for n in 1..=count {
            let id = seq_id("EMP", n);
            let first_name: String = FirstName().fake_with_rng(&mut self.rng);
            let last_name: String = LastName().fake_with_rng(&mut self.rng);
            // 前几位员工依次分配到各部门，保证每个部门都有负责人
            let department = if n <= DEPARTMENTS.len() {
                DEPARTMENTS[n - 1]
            } else {
                self.pick(DEPARTMENTS)
            };
            let positions = POSITIONS
                .iter()
                .find(|(d, _)| *d == department)
                .map(|(_, p)| *p)
                .unwrap_or(&["Associate"]);
            let position = self.pick(positions).to_string();
            let status = self.weighted(&[
                (EmployeeStatus::Active, 85),
                (EmployeeStatus::OnLeave, 10),
                (EmployeeStatus::Terminated, 5),
            ]);
            let manager_id = managers.get(department).cloned();
            if manager_id.is_none() {
                managers.insert(department.to_string(), id.clone());
            }

            out.push(Employee {
                email: format!(
                    "{}.{}@erpdash.example",
                    first_name.to_ascii_lowercase(),
                    last_name.to_ascii_lowercase()
                ),
                phone: PhoneNumber().fake_with_rng(&mut self.rng),
                employee_code: format!("E{}", 1000 + n),
                department: department.to_string(),
                position,
                hire_date: self.days_ago(30, 3650),
                salary: round_money(self.rng.gen_range(40..150) as f64 * 1000.0),
                status,
                manager_id,
                id,
                first_name,
                last_name,
            });
        }
        out
    }

    pub fn generate_customers(&mut self, count: usize) -> Vec<Customer> {
        (1..=count)
            .map(|n| {
                let building: String = BuildingNumber().fake_with_rng(&mut self.rng);
                let street: String = StreetName().fake_with_rng(&mut self.rng);
                Customer {
                    id: seq_id("CUS", n),
                    company_name: CompanyName().fake_with_rng(&mut self.rng),
                    contact_person: Name().fake_with_rng(&mut self.rng),
                    email: SafeEmail().fake_with_rng(&mut self.rng),
                    phone: PhoneNumber().fake_with_rng(&mut self.rng),
                    address: Address {
                        street: format!("{} {}", building, street),
                        city: CityName().fake_with_rng(&mut self.rng),
                        state: StateAbbr().fake_with_rng(&mut self.rng),
                        postal_code: ZipCode().fake_with_rng(&mut self.rng),
                        country: "USA".to_string(),
                    },
                    industry: Industry().fake_with_rng(&mut self.rng),
                    credit_limit: *[10_000.0, 25_000.0, 50_000.0, 100_000.0, 250_000.0]
                        .choose(&mut self.rng)
                        .unwrap_or(&10_000.0),
                    total_revenue: self.money(5_000.0, 500_000.0),
                    status: self.weighted(&[
                        (CustomerStatus::Active, 85),
                        (CustomerStatus::Inactive, 15),
                    ]),
                    created_at: self.days_ago(30, 1000),
                }
            })
            .collect()
    }

    pub fn generate_products(&mut self, count: usize) -> Vec<Product> {
        (1..=count)
            .map(|n| {
                let (category, names) = *PRODUCT_CATEGORIES
                    .choose(&mut self.rng)
                    .unwrap_or(&PRODUCT_CATEGORIES[0]);
                let base = self.pick(names);
                let cost_price = self.money(5.0, 1500.0);
                let margin = self.rng.gen_range(1.15..1.8);
                let min_stock_level = self.rng.gen_range(5..30);
                let max_stock_level = min_stock_level + self.rng.gen_range(50..300);
                // 约 1/5 的商品库存低于阈值
                let current_stock = if self.rng.gen_bool(0.2) {
                    self.rng.gen_range(0..=min_stock_level)
                } else {
                    self.rng.gen_range(min_stock_level + 1..=max_stock_level)
                };
                let code: String = category.chars().take(3).collect();
                Product {
                    id: seq_id("PRD", n),
                    sku: format!("{}-{:05}", code.to_ascii_uppercase(), self.rng.gen_range(0..100_000)),
                    name: format!("{} {}", base, self.rng.gen_range(100..999)),
                    category: category.to_string(),
                    unit: self.pick(UNITS).to_string(),
                    selling_price: round_money(cost_price * margin),
                    cost_price,
                    current_stock,
                    min_stock_level,
                    max_stock_level,
                    supplier: CompanyName().fake_with_rng(&mut self.rng),
                    is_active: self.rng.gen_bool(0.9),
                }
            })
            .collect()
    }

    pub fn generate_leads(&mut self, count: usize, employees: &[Employee]) -> Vec<Lead> {
        let sales: Vec<&Employee> = employees
            .iter()
            .filter(|e| e.department == "Sales")
            .collect();
        (1..=count)
            .map(|n| {
                let status = self.weighted(&[
                    (LeadStatus::New, 20),
                    (LeadStatus::Contacted, 18),
                    (LeadStatus::Qualified, 16),
                    (LeadStatus::Proposal, 14),
                    (LeadStatus::Negotiation, 10),
                    (LeadStatus::Won, 12),
                    (LeadStatus::Lost, 10),
                ]);
                let probability = match status {
                    LeadStatus::New => 10,
                    LeadStatus::Contacted => 20,
                    LeadStatus::Qualified => 40,
                    LeadStatus::Proposal => 60,
                    LeadStatus::Negotiation => 80,
                    LeadStatus::Won => 100,
                    LeadStatus::Lost => 0,
                };
                // 优先分配给销售部门，没有销售时退回任意员工
                let assigned_to = sales
                    .choose(&mut self.rng)
                    .map(|e| e.id.clone())
                    .or_else(|| employees.choose(&mut self.rng).map(|e| e.id.clone()))
                    .unwrap_or_default();
                Lead {
                    id: seq_id("LEAD", n),
                    company_name: CompanyName().fake_with_rng(&mut self.rng),
                    contact_name: Name().fake_with_rng(&mut self.rng),
                    email: SafeEmail().fake_with_rng(&mut self.rng),
                    source: self.pick(LEAD_SOURCES).to_string(),
                    status,
                    estimated_value: (self.rng.gen_range(50..2000) * 100) as f64,
                    probability,
                    assigned_to,
                    created_at: self.days_ago(0, 180),
                }
            })
            .collect()
    }

    pub fn generate_projects(
        &mut self,
        count: usize,
        customers: &[Customer],
        employees: &[Employee],
    ) -> Vec<Project> {
        if customers.is_empty() {
            return Vec::new();
        }
        (1..=count)
            .map(|n| {
                let customer_id = customers
                    .choose(&mut self.rng)
                    .map(|c| c.id.clone())
                    .unwrap_or_default();
                let manager_id = employees
                    .choose(&mut self.rng)
                    .map(|e| e.id.clone())
                    .unwrap_or_default();
                let status = self.weighted(&[
                    (ProjectStatus::Planning, 15),
                    (ProjectStatus::InProgress, 45),
                    (ProjectStatus::OnHold, 10),
                    (ProjectStatus::Completed, 25),
                    (ProjectStatus::Cancelled, 5),
                ]);
                let start_date = self.days_ago(30, 365);
                let end_date = start_date + Duration::days(self.rng.gen_range(60..=300));
                let milestones = self.generate_milestones(n, status, start_date, end_date);
                let done = milestones.iter().filter(|m| m.completed).count();
                let completion_percentage = if milestones.is_empty() {
                    0
                } else {
                    ((done as f64 / milestones.len() as f64) * 100.0).round() as u8
                };
                let budget = (self.rng.gen_range(20..500) * 1000) as f64;
                let spent_ratio = completion_percentage as f64 / 100.0 * self.rng.gen_range(0.8..1.2);
                let name: String = Profession().fake_with_rng(&mut self.rng);
                Project {
                    id: seq_id("PRJ", n),
                    name: format!("{} Platform Rollout", name),
                    customer_id,
                    manager_id,
                    status,
                    start_date,
                    end_date,
                    spent: round_money(budget * spent_ratio),
                    budget,
                    milestones,
                    completion_percentage,
                }
            })
            .collect()
    }

    fn generate_milestones(
        &mut self,
        project_seq: usize,
        status: ProjectStatus,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Milestone> {
        let count = self.rng.gen_range(3..=6usize);
        let span = (end - start).num_days().max(1);
        let done = match status {
            ProjectStatus::Completed => count,
            ProjectStatus::Planning => 0,
            _ => self.rng.gen_range(0..count),
        };
        (0..count)
            .map(|i| Milestone {
                id: format!("MS-{:04}-{}", project_seq, i + 1),
                name: MILESTONE_NAMES[i % MILESTONE_NAMES.len()].to_string(),
                due_date: start + Duration::days(span * (i as i64 + 1) / count as i64),
                completed: i < done,
            })
            .collect()
    }

    fn generate_items(&mut self, products: &[Product]) -> Vec<LineItem> {
        let n = self.rng.gen_range(1..=5usize);
        let picked: Vec<&Product> = products.choose_multiple(&mut self.rng, n).collect();
        picked
            .into_iter()
            .map(|p| {
                let quantity = self.rng.gen_range(1..=20);
                LineItem {
                    product_id: p.id.clone(),
                    description: p.name.clone(),
                    quantity,
                    unit_price: p.selling_price,
                    total: line_total(quantity, p.selling_price),
                }
            })
            .collect()
    }

    fn discount_for(&mut self, items: &[LineItem]) -> f64 {
        let subtotal: f64 = items.iter().map(|i| i.total).sum();
        let rate = self.weighted(&[(0.0, 60), (0.05, 25), (0.10, 15)]);
        round_money(subtotal * rate)
    }

    pub fn generate_quotations(
        &mut self,
        count: usize,
        customers: &[Customer],
        products: &[Product],
    ) -> Vec<Quotation> {
        if customers.is_empty() || products.is_empty() {
            return Vec::new();
        }
        (1..=count)
            .map(|n| {
                let customer_id = customers
                    .choose(&mut self.rng)
                    .map(|c| c.id.clone())
                    .unwrap_or_default();
                let items = self.generate_items(products);
                let discount = self.discount_for(&items);
                let totals = compute_totals(&items, self.tax_rate, discount);
                let issue_date = self.days_ago(0, 120);
                let valid_until = issue_date + Duration::days(30);
                let mut status = self.weighted(&[
                    (QuotationStatus::Draft, 15),
                    (QuotationStatus::Sent, 30),
                    (QuotationStatus::Accepted, 30),
                    (QuotationStatus::Rejected, 15),
                    (QuotationStatus::Expired, 10),
                ]);
                if status == QuotationStatus::Sent && valid_until < self.anchor {
                    status = QuotationStatus::Expired;
                }
                Quotation {
                    id: seq_id("QUO", n),
                    number: format!("Q-{}-{:04}", issue_date.year(), n),
                    customer_id,
                    items,
                    subtotal: totals.subtotal,
                    tax_rate: self.tax_rate,
                    tax_amount: totals.tax_amount,
                    discount_amount: totals.discount_amount,
                    total_amount: totals.total_amount,
                    status,
                    issue_date,
                    valid_until,
                }
            })
            .collect()
    }

    pub fn generate_invoices(
        &mut self,
        count: usize,
        customers: &[Customer],
        products: &[Product],
        quotations: &[Quotation],
    ) -> Vec<Invoice> {
        if customers.is_empty() || products.is_empty() {
            return Vec::new();
        }
        let accepted: Vec<&Quotation> = quotations
            .iter()
            .filter(|q| q.status == QuotationStatus::Accepted)
            .collect();

        (1..=count)
            .map(|n| {
                // 部分发票由已接受的报价单转化而来
                let source = if self.rng.gen_bool(0.4) {
                    accepted.choose(&mut self.rng).copied()
                } else {
                    None
                };
                let (customer_id, quotation_id, items, discount) = match source {
                    Some(q) => (
                        q.customer_id.clone(),
                        Some(q.id.clone()),
                        q.items.clone(),
                        q.discount_amount,
                    ),
                    None => {
                        let customer_id = customers
                            .choose(&mut self.rng)
                            .map(|c| c.id.clone())
                            .unwrap_or_default();
                        let items = self.generate_items(products);
                        let discount = self.discount_for(&items);
                        (customer_id, None, items, discount)
                    }
                };
                let totals = compute_totals(&items, self.tax_rate, discount);
                let issue_date = self.days_ago(0, 150);
                let due_date = issue_date + Duration::days(30);
                let mut status = self.weighted(&[
                    (InvoiceStatus::Draft, 10),
                    (InvoiceStatus::Sent, 30),
                    (InvoiceStatus::Paid, 35),
                    (InvoiceStatus::PartiallyPaid, 15),
                    (InvoiceStatus::Cancelled, 5),
                    (InvoiceStatus::Overdue, 5),
                ]);
                if status == InvoiceStatus::Sent && due_date < self.anchor {
                    status = InvoiceStatus::Overdue;
                }
                let paid_amount = match status {
                    InvoiceStatus::Paid => totals.total_amount,
                    InvoiceStatus::PartiallyPaid => {
                        round_money(totals.total_amount * self.rng.gen_range(0.2..0.8))
                    }
                    _ => 0.0,
                };
                Invoice {
                    id: seq_id("INV", n),
                    number: format!("INV-{}-{:04}", issue_date.year(), n),
                    customer_id,
                    quotation_id,
                    items,
                    subtotal: totals.subtotal,
                    tax_rate: self.tax_rate,
                    tax_amount: totals.tax_amount,
                    discount_amount: totals.discount_amount,
                    total_amount: totals.total_amount,
                    paid_amount,
                    remaining_amount: round_money(totals.total_amount - paid_amount),
                    status,
                    issue_date,
                    due_date,
                }
            })
            .collect()
    }

    /// 每位员工最近 `days` 天每天一条记录（以 anchor 为最后一天）
    pub fn generate_attendance(&mut self, employees: &[Employee], days: u32) -> Vec<Attendance> {
        let mut out = Vec::with_capacity(employees.len() * days as usize);
        let mut n = 0usize;
        for emp in employees {
            for d in (0..days as i64).rev() {
                n += 1;
                let date = self.anchor - Duration::days(d);
                let status = self.weighted(&[
                    (AttendanceStatus::Present, 75),
                    (AttendanceStatus::Late, 10),
                    (AttendanceStatus::HalfDay, 5),
                    (AttendanceStatus::Absent, 5),
                    (AttendanceStatus::Leave, 5),
                ]);
                let (check_in, check_out) = match status {
                    AttendanceStatus::Present => (
                        NaiveTime::from_hms_opt(8, self.rng.gen_range(0..60), 0),
                        NaiveTime::from_hms_opt(self.rng.gen_range(17..19), self.rng.gen_range(0..60), 0),
                    ),
                    AttendanceStatus::Late => (
                        NaiveTime::from_hms_opt(self.rng.gen_range(9..11), self.rng.gen_range(15..60), 0),
                        NaiveTime::from_hms_opt(self.rng.gen_range(17..19), self.rng.gen_range(0..60), 0),
                    ),
                    AttendanceStatus::HalfDay => (
                        NaiveTime::from_hms_opt(9, self.rng.gen_range(0..30), 0),
                        NaiveTime::from_hms_opt(13, self.rng.gen_range(0..30), 0),
                    ),
                    AttendanceStatus::Absent | AttendanceStatus::Leave => (None, None),
                };
                let work_hours = match (check_in, check_out) {
                    (Some(i), Some(o)) => round_money((o - i).num_minutes() as f64 / 60.0),
                    _ => 0.0,
                };
                out.push(Attendance {
                    id: seq_id("ATT", n),
                    employee_id: emp.id.clone(),
                    date,
                    check_in,
                    check_out,
                    status,
                    work_hours,
                });
            }
        }
        out
    }

    /// 每位员工最近 `months` 个月的工资单，最新一期在前
    pub fn generate_payroll(&mut self, employees: &[Employee], months: u32) -> Vec<Payroll> {
        let mut out = Vec::with_capacity(employees.len() * months as usize);
        let mut n = 0usize;
        for emp in employees {
            for back in 0..months {
                n += 1;
                let (year, month) = shift_month(self.anchor.year(), self.anchor.month(), back);
                let basic_salary = round_money(emp.salary / 12.0);
                let allowances = round_money(basic_salary * self.rng.gen_range(0.05..0.15));
                let overtime = self.money(0.0, 500.0);
                let deductions = self.money(50.0, 300.0);
                let tax = round_money((basic_salary + allowances + overtime) * 0.15);
                let status = if back == 0 {
                    self.weighted(&[(PayrollStatus::Pending, 60), (PayrollStatus::Processed, 40)])
                } else {
                    PayrollStatus::Paid
                };
                let pay_date = match status {
                    PayrollStatus::Paid => {
                        let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
                        NaiveDate::from_ymd_opt(ny, nm, 1)
                    }
                    _ => None,
                };
                out.push(Payroll {
                    id: seq_id("PAY", n),
                    employee_id: emp.id.clone(),
                    period: format!("{:04}-{:02}", year, month),
                    net_salary: round_money(
                        basic_salary + allowances + overtime - deductions - tax,
                    ),
                    basic_salary,
                    allowances,
                    overtime,
                    deductions,
                    tax,
                    status,
                    pay_date,
                });
            }
        }
        out
    }

    pub fn generate_job_postings(&mut self, count: usize) -> Vec<JobPosting> {
        (1..=count)
            .map(|n| {
                let (department, positions) =
                    *POSITIONS.choose(&mut self.rng).unwrap_or(&POSITIONS[0]);
                let salary_min = (self.rng.gen_range(40..90) * 1000) as f64;
                let posted_date = self.days_ago(0, 90);
                let location = if self.rng.gen_bool(0.3) {
                    "Remote".to_string()
                } else {
                    CityName().fake_with_rng(&mut self.rng)
                };
                JobPosting {
                    id: seq_id("JOB", n),
                    title: self.pick(positions).to_string(),
                    department: department.to_string(),
                    location,
                    employment_type: self.weighted(&[
                        (EmploymentType::FullTime, 70),
                        (EmploymentType::PartTime, 10),
                        (EmploymentType::Contract, 12),
                        (EmploymentType::Internship, 8),
                    ]),
                    status: self.weighted(&[
                        (JobStatus::Open, 60),
                        (JobStatus::OnHold, 10),
                        (JobStatus::Closed, 20),
                        (JobStatus::Draft, 10),
                    ]),
                    salary_max: salary_min + (self.rng.gen_range(10..40) * 1000) as f64,
                    salary_min,
                    openings: self.rng.gen_range(1..=5),
                    posted_date,
                    closing_date: posted_date + Duration::days(45),
                }
            })
            .collect()
    }

    pub fn generate_candidates(&mut self, count: usize) -> Vec<Candidate> {
        (1..=count)
            .map(|n| {
                let skill_count = self.rng.gen_range(2..=5);
                Candidate {
                    id: seq_id("CAN", n),
                    name: Name().fake_with_rng(&mut self.rng),
                    email: SafeEmail().fake_with_rng(&mut self.rng),
                    phone: PhoneNumber().fake_with_rng(&mut self.rng),
                    current_position: Profession().fake_with_rng(&mut self.rng),
                    experience_years: self.rng.gen_range(0..=20),
                    skills: SKILLS
                        .choose_multiple(&mut self.rng, skill_count)
                        .map(|s| s.to_string())
                        .collect(),
                    source: self.pick(CANDIDATE_SOURCES).to_string(),
                    rating: self.rng.gen_range(1..=5),
                }
            })
            .collect()
    }

    pub fn generate_applications(
        &mut self,
        count: usize,
        jobs: &[JobPosting],
        candidates: &[Candidate],
    ) -> Vec<JobApplication> {
        if jobs.is_empty() || candidates.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(count);
        for n in 1..=count {
            let (Some(job), Some(candidate)) =
                (jobs.choose(&mut self.rng), candidates.choose(&mut self.rng))
            else {
                break;
            };
            let applied = job.posted_date + Duration::days(self.rng.gen_range(0..30));
            out.push(JobApplication {
                id: seq_id("APP", n),
                job_id: job.id.clone(),
                candidate_id: candidate.id.clone(),
                status: self.weighted(&[
                    (ApplicationStatus::Applied, 30),
                    (ApplicationStatus::Screening, 20),
                    (ApplicationStatus::Interview, 18),
                    (ApplicationStatus::Offer, 7),
                    (ApplicationStatus::Hired, 5),
                    (ApplicationStatus::Rejected, 20),
                ]),
                applied_date: applied.min(self.anchor),
                score: self.rng.gen_range(40..=100),
            });
        }
        out
    }
}

/// 往前推 `back` 个月，返回 (year, month)
pub fn shift_month(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + (month as i32 - 1) - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(2026, 10, 0), (2026, 10));
        assert_eq!(shift_month(2026, 10, 9), (2026, 1));
        assert_eq!(shift_month(2026, 1, 1), (2025, 12));
        assert_eq!(shift_month(2026, 3, 15), (2024, 12));
    }

    #[test]
    fn test_generate_employees() {
        let mut gen = FixtureGenerator::new(42, anchor(), 8.0);
        let employees = gen.generate_employees(20);
        assert_eq!(employees.len(), 20);
        for (i, e) in employees.iter().enumerate() {
            assert_eq!(e.id, seq_id("EMP", i + 1));
        }
        // 每个部门都有负责人
        for dept in DEPARTMENTS {
            assert!(employees
                .iter()
                .any(|e| &e.department == dept && e.manager_id.is_none()));
        }
    }

    #[test]
    fn test_same_seed_same_records() {
        let a = FixtureGenerator::new(7, anchor(), 8.0).generate_customers(10);
        let b = FixtureGenerator::new(7, anchor(), 8.0).generate_customers(10);
        assert_eq!(a, b);
        let c = FixtureGenerator::new(8, anchor(), 8.0).generate_customers(10);
        assert_ne!(a, c);
    }

    #[test]
    fn test_attendance_covers_window() {
        let mut gen = FixtureGenerator::new(1, anchor(), 8.0);
        let employees = gen.generate_employees(3);
        let att = gen.generate_attendance(&employees, 30);
        assert_eq!(att.len(), 90);
        let first = att.iter().filter(|a| a.employee_id == "EMP-0001");
        let dates: Vec<NaiveDate> = first.map(|a| a.date).collect();
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[29], anchor());
        assert_eq!(dates[0], anchor() - Duration::days(29));
        for a in &att {
            if a.check_in.is_none() {
                assert_eq!(a.work_hours, 0.0);
            } else {
                assert!(a.work_hours > 0.0);
            }
        }
    }

    #[test]
    fn test_invoice_remaining_amount() {
        let mut gen = FixtureGenerator::new(3, anchor(), 8.0);
        let customers = gen.generate_customers(5);
        let products = gen.generate_products(20);
        let quotes = gen.generate_quotations(10, &customers, &products);
        let invoices = gen.generate_invoices(30, &customers, &products, &quotes);
        assert_eq!(invoices.len(), 30);
        for inv in &invoices {
            assert_eq!(
                inv.remaining_amount,
                round_money(inv.total_amount - inv.paid_amount)
            );
            let t = compute_totals(&inv.items, inv.tax_rate, inv.discount_amount);
            assert_eq!(t.total_amount, inv.total_amount);
            if inv.status == InvoiceStatus::Paid {
                assert_eq!(inv.remaining_amount, 0.0);
            }
        }
    }

    #[test]
    fn test_empty_parents_yield_empty_children() {
        let mut gen = FixtureGenerator::new(3, anchor(), 8.0);
        assert!(gen.generate_projects(5, &[], &[]).is_empty());
        assert!(gen.generate_quotations(5, &[], &[]).is_empty());
        assert!(gen.generate_applications(5, &[], &[]).is_empty());
    }

    #[test]
    fn test_project_completion_matches_milestones() {
        let mut gen = FixtureGenerator::new(11, anchor(), 8.0);
        let customers = gen.generate_customers(5);
        let employees = gen.generate_employees(10);
        for p in gen.generate_projects(20, &customers, &employees) {
            let done = p.milestones.iter().filter(|m| m.completed).count();
            let expected = ((done as f64 / p.milestones.len() as f64) * 100.0).round() as u8;
            assert_eq!(p.completion_percentage, expected);
            if p.status == ProjectStatus::Completed {
                assert_eq!(p.completion_percentage, 100);
            }
        }
    }
}
