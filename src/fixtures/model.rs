use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 所有记录都有字符串主键，外键也按字符串保存（不做引用完整性校验）
pub trait Record {
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

/// 状态枚举：统一提供展示标签和全部取值（用于筛选切换）
macro_rules! status_enum {
    ($name:ident { $($variant:ident => $label:literal),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),*
                }
            }

            /// 宽松解析：忽略大小写、空格、下划线和连字符
            #[allow(dead_code)]
            pub fn parse_loose(s: &str) -> Option<Self> {
                let norm: String = s
                    .chars()
                    .filter(|c| !matches!(c, ' ' | '_' | '-'))
                    .collect::<String>()
                    .to_ascii_lowercase();
                Self::ALL.iter().copied().find(|v| {
                    v.label()
                        .chars()
                        .filter(|c| !matches!(c, ' ' | '_' | '-'))
                        .collect::<String>()
                        .to_ascii_lowercase()
                        == norm
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

status_enum!(CustomerStatus {
    Active => "Active",
    Inactive => "Inactive",
});

status_enum!(LeadStatus {
    New => "New",
    Contacted => "Contacted",
    Qualified => "Qualified",
    Proposal => "Proposal",
    Negotiation => "Negotiation",
    Won => "Won",
    Lost => "Lost",
});

status_enum!(ProjectStatus {
    Planning => "Planning",
    InProgress => "In Progress",
    OnHold => "On Hold",
    Completed => "Completed",
    Cancelled => "Cancelled",
});

status_enum!(QuotationStatus {
    Draft => "Draft",
    Sent => "Sent",
    Accepted => "Accepted",
    Rejected => "Rejected",
    Expired => "Expired",
});

status_enum!(InvoiceStatus {
    Draft => "Draft",
    Sent => "Sent",
    Paid => "Paid",
    PartiallyPaid => "Partially Paid",
    Overdue => "Overdue",
    Cancelled => "Cancelled",
});

status_enum!(EmployeeStatus {
    Active => "Active",
    OnLeave => "On Leave",
    Terminated => "Terminated",
});

status_enum!(AttendanceStatus {
    Present => "Present",
    Late => "Late",
    HalfDay => "Half Day",
    Absent => "Absent",
    Leave => "Leave",
});

status_enum!(PayrollStatus {
    Pending => "Pending",
    Processed => "Processed",
    Paid => "Paid",
});

status_enum!(EmploymentType {
    FullTime => "Full-time",
    PartTime => "Part-time",
    Contract => "Contract",
    Internship => "Internship",
});

status_enum!(JobStatus {
    Open => "Open",
    OnHold => "On Hold",
    Closed => "Closed",
    Draft => "Draft",
});

status_enum!(ApplicationStatus {
    Applied => "Applied",
    Screening => "Screening",
    Interview => "Interview",
    Offer => "Offer",
    Hired => "Hired",
    Rejected => "Rejected",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub current_stock: u32,
    pub min_stock_level: u32,
    pub max_stock_level: u32,
    pub supplier: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub industry: String,
    pub credit_limit: f64,
    // 随机值，不由发票汇总而来
    pub total_revenue: f64,
    pub status: CustomerStatus,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub source: String,
    pub status: LeadStatus,
    pub estimated_value: f64,
    pub probability: u8,
    pub assigned_to: String,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub due_date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub customer_id: String,
    pub manager_id: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub spent: f64,
    pub milestones: Vec<Milestone>,
    pub completion_percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub status: QuotationStatus,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    pub quotation_id: Option<String>,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub paid_amount: f64,
    // 生成时计算一次，之后不再维护
    pub remaining_amount: f64,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub status: EmployeeStatus,
    pub manager_id: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub work_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payroll {
    pub id: String,
    pub employee_id: String,
    /// YYYY-MM
    pub period: String,
    pub basic_salary: f64,
    pub allowances: f64,
    pub overtime: f64,
    pub deductions: f64,
    pub tax: f64,
    pub net_salary: f64,
    pub status: PayrollStatus,
    pub pay_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub status: JobStatus,
    pub salary_min: f64,
    pub salary_max: f64,
    pub openings: u32,
    pub posted_date: NaiveDate,
    pub closing_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub current_position: String,
    pub experience_years: u8,
    pub skills: Vec<String>,
    pub source: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: String,
    pub job_id: String,
    pub candidate_id: String,
    pub status: ApplicationStatus,
    pub applied_date: NaiveDate,
    pub score: u8,
}

impl_record!(
    Product,
    Customer,
    Lead,
    Project,
    Quotation,
    Invoice,
    Employee,
    Attendance,
    Payroll,
    JobPosting,
    Candidate,
    JobApplication,
);
