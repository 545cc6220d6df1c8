use crate::fixtures::model::*;
use crate::fixtures::Dataset;
use crate::views::{format_currency, ViewKind};

/// 列表页的一行：状态单独一列，便于筛选和着色
#[derive(Debug, Clone, PartialEq)]
pub struct RowSummary {
    pub id: String,
    pub status: String,
    pub cells: Vec<String>,
    pub search_text: String,
}

impl RowSummary {
    fn new(id: &str, status: &str, cells: Vec<String>) -> Self {
        let search_text = format!("{} {} {}", id, status, cells.join(" "));
        Self {
            id: id.to_string(),
            status: status.to_string(),
            cells,
            search_text,
        }
    }

    /// 本地修改状态，同步更新搜索文本
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.search_text = format!("{} {} {}", self.id, self.status, self.cells.join(" "));
    }
}

/// 详情面板：标题 + 键值对
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDetail {
    pub title: String,
    pub fields: Vec<(String, String)>,
}

pub fn stock_status(p: &Product) -> &'static str {
    if p.current_stock == 0 {
        "Out of Stock"
    } else if p.current_stock <= p.min_stock_level {
        "Low Stock"
    } else {
        "In Stock"
    }
}

fn time_or_dash(t: Option<chrono::NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn build_rows(view: ViewKind, ds: &Dataset) -> Vec<RowSummary> {
    match view {
        ViewKind::Dashboard => Vec::new(),
        ViewKind::Customers => ds
            .customers
            .iter()
            .map(|c| {
                RowSummary::new(
                    &c.id,
                    c.status.label(),
                    vec![
                        c.company_name.clone(),
                        c.contact_person.clone(),
                        c.industry.clone(),
                        c.address.city.clone(),
                        format_currency(c.credit_limit),
                        format_currency(c.total_revenue),
                    ],
                )
            })
            .collect(),
        ViewKind::Leads => ds
            .leads
            .iter()
            .map(|l| {
                RowSummary::new(
                    &l.id,
                    l.status.label(),
                    vec![
                        l.company_name.clone(),
                        l.contact_name.clone(),
                        l.source.clone(),
                        format_currency(l.estimated_value),
                        format!("{}%", l.probability),
                        ds.employee_name(&l.assigned_to),
                    ],
                )
            })
            .collect(),
        ViewKind::Products => ds
            .products
            .iter()
            .map(|p| {
                RowSummary::new(
                    &p.id,
                    stock_status(p),
                    vec![
                        p.sku.clone(),
                        p.name.clone(),
                        p.category.clone(),
                        format_currency(p.selling_price),
                        format!("{} {}", p.current_stock, p.unit),
                        p.min_stock_level.to_string(),
                    ],
                )
            })
            .collect(),
        ViewKind::Projects => ds
            .projects
            .iter()
            .map(|p| {
                RowSummary::new(
                    &p.id,
                    p.status.label(),
                    vec![
                        p.name.clone(),
                        ds.customer_name(&p.customer_id),
                        ds.employee_name(&p.manager_id),
                        format_currency(p.budget),
                        format_currency(p.spent),
                        format!("{}%", p.completion_percentage),
                    ],
                )
            })
            .collect(),
        ViewKind::Quotations => ds
            .quotations
            .iter()
            .map(|q| {
                RowSummary::new(
                    &q.id,
                    q.status.label(),
                    vec![
                        q.number.clone(),
                        ds.customer_name(&q.customer_id),
                        q.items.len().to_string(),
                        format_currency(q.subtotal),
                        format_currency(q.tax_amount),
                        format_currency(q.total_amount),
                    ],
                )
            })
            .collect(),
        ViewKind::Invoices => ds
            .invoices
            .iter()
            .map(|i| {
                RowSummary::new(
                    &i.id,
                    i.status.label(),
                    vec![
                        i.number.clone(),
                        ds.customer_name(&i.customer_id),
                        format_currency(i.total_amount),
                        format_currency(i.paid_amount),
                        format_currency(i.remaining_amount),
                        i.due_date.to_string(),
                    ],
                )
            })
            .collect(),
        ViewKind::Employees => ds
            .employees
            .iter()
            .map(|e| {
                RowSummary::new(
                    &e.id,
                    e.status.label(),
                    vec![
                        e.employee_code.clone(),
                        e.full_name(),
                        e.department.clone(),
                        e.position.clone(),
                        e.hire_date.to_string(),
                        format_currency(e.salary),
                    ],
                )
            })
            .collect(),
        ViewKind::Departments => ds
            .get_departments()
            .into_iter()
            .map(|d| {
                let members = ds.get_employees_by_department(d);
                let active = members
                    .iter()
                    .filter(|e| e.status == EmployeeStatus::Active)
                    .count();
                let head = members
                    .iter()
                    .find(|e| e.manager_id.is_none())
                    .map(|e| e.full_name())
                    .unwrap_or_else(|| "N/A".to_string());
                let payroll: f64 = members.iter().map(|e| e.salary).sum();
                department_row(d, members.len(), active, &head, payroll)
            })
            .collect(),
        ViewKind::Attendance => ds
            .attendance
            .iter()
            .map(|a| {
                RowSummary::new(
                    &a.id,
                    a.status.label(),
                    vec![
                        a.date.to_string(),
                        ds.employee_name(&a.employee_id),
                        time_or_dash(a.check_in),
                        time_or_dash(a.check_out),
                        format!("{:.2}", a.work_hours),
                    ],
                )
            })
            .collect(),
        ViewKind::Payroll => ds
            .payroll
            .iter()
            .map(|p| {
                RowSummary::new(
                    &p.id,
                    p.status.label(),
                    vec![
                        p.period.clone(),
                        ds.employee_name(&p.employee_id),
                        format_currency(p.basic_salary),
                        format_currency(p.allowances + p.overtime),
                        format_currency(p.deductions + p.tax),
                        format_currency(p.net_salary),
                    ],
                )
            })
            .collect(),
        ViewKind::Recruitment => ds
            .applications
            .iter()
            .map(|a| {
                RowSummary::new(
                    &a.id,
                    a.status.label(),
                    vec![
                        ds.job_title(&a.job_id),
                        ds.candidate_name(&a.candidate_id),
                        a.applied_date.to_string(),
                        a.score.to_string(),
                    ],
                )
            })
            .collect(),
    }
}

/// 部门行的 id 就是部门名
pub fn department_row(
    name: &str,
    headcount: usize,
    active: usize,
    head: &str,
    payroll: f64,
) -> RowSummary {
    RowSummary::new(
        name,
        "",
        vec![
            name.to_string(),
            headcount.to_string(),
            active.to_string(),
            head.to_string(),
            format_currency(payroll),
        ],
    )
}

fn field(k: &str, v: impl Into<String>) -> (String, String) {
    (k.to_string(), v.into())
}

fn items_fields(items: &[LineItem], out: &mut Vec<(String, String)>) {
    for (i, item) in items.iter().enumerate() {
        out.push(field(
            &format!("明细 {}", i + 1),
            format!(
                "{} × {} @ {} = {}",
                item.description,
                item.quantity,
                format_currency(item.unit_price),
                format_currency(item.total)
            ),
        ));
    }
}

pub fn build_detail(view: ViewKind, id: &str, ds: &Dataset) -> Option<RecordDetail> {
    match view {
        ViewKind::Dashboard => None,
        ViewKind::Customers => ds.get_customer_by_id(id).map(|c| {
            let projects = ds.get_projects_by_customer(&c.id);
            let invoices = ds.get_invoices_by_customer(&c.id);
            let outstanding: f64 = invoices.iter().map(|i| i.remaining_amount).sum();
            RecordDetail {
                title: c.company_name.clone(),
                fields: vec![
                    field("ID", c.id.clone()),
                    field("联系人", c.contact_person.clone()),
                    field("邮箱", c.email.clone()),
                    field("电话", c.phone.clone()),
                    field(
                        "地址",
                        format!(
                            "{}, {}, {} {}, {}",
                            c.address.street,
                            c.address.city,
                            c.address.state,
                            c.address.postal_code,
                            c.address.country
                        ),
                    ),
                    field("行业", c.industry.clone()),
                    field("状态", c.status.label()),
                    field("信用额度", format_currency(c.credit_limit)),
                    field("累计收入", format_currency(c.total_revenue)),
                    field("项目数", projects.len().to_string()),
                    field("报价单数", ds.get_quotations_by_customer(&c.id).len().to_string()),
                    field("发票数", invoices.len().to_string()),
                    field("未收款", format_currency(outstanding)),
                    field("创建日期", c.created_at.to_string()),
                ],
            }
        }),
        ViewKind::Leads => ds.get_lead_by_id(id).map(|l| RecordDetail {
            title: l.company_name.clone(),
            fields: vec![
                field("ID", l.id.clone()),
                field("联系人", l.contact_name.clone()),
                field("邮箱", l.email.clone()),
                field("来源", l.source.clone()),
                field("状态", l.status.label()),
                field("预估金额", format_currency(l.estimated_value)),
                field("成交概率", format!("{}%", l.probability)),
                field(
                    "加权金额",
                    format_currency(l.estimated_value * l.probability as f64 / 100.0),
                ),
                field("负责人", ds.employee_name(&l.assigned_to)),
                field("创建日期", l.created_at.to_string()),
            ],
        }),
        ViewKind::Products => ds.get_product_by_id(id).map(|p| {
            let margin = if p.selling_price > 0.0 {
                (p.selling_price - p.cost_price) / p.selling_price * 100.0
            } else {
                0.0
            };
            RecordDetail {
                title: p.name.clone(),
                fields: vec![
                    field("ID", p.id.clone()),
                    field("SKU", p.sku.clone()),
                    field("类别", p.category.clone()),
                    field("单位", p.unit.clone()),
                    field("成本价", format_currency(p.cost_price)),
                    field("售价", format_currency(p.selling_price)),
                    field("毛利率", format!("{:.1}%", margin)),
                    field("当前库存", p.current_stock.to_string()),
                    field("库存区间", format!("{} - {}", p.min_stock_level, p.max_stock_level)),
                    field("库存状态", stock_status(p)),
                    field("库存价值", format_currency(p.cost_price * p.current_stock as f64)),
                    field("供应商", p.supplier.clone()),
                    field("上架", if p.is_active { "是" } else { "否" }),
                ],
            }
        }),
        ViewKind::Projects => ds.get_project_by_id(id).map(|p| {
            let mut fields = vec![
                field("ID", p.id.clone()),
                field("客户", ds.customer_name(&p.customer_id)),
                field("负责人", ds.employee_name(&p.manager_id)),
                field("状态", p.status.label()),
                field("周期", format!("{} ~ {}", p.start_date, p.end_date)),
                field("预算", format_currency(p.budget)),
                field("已用", format_currency(p.spent)),
                field("完成度", format!("{}%", p.completion_percentage)),
            ];
            for m in &p.milestones {
                fields.push(field(
                    &format!("里程碑 {}", m.id),
                    format!(
                        "{} {} {}",
                        if m.completed { "✓" } else { "○" },
                        m.name,
                        m.due_date
                    ),
                ));
            }
            RecordDetail {
                title: p.name.clone(),
                fields,
            }
        }),
        ViewKind::Quotations => ds.get_quotation_by_id(id).map(|q| {
            let mut fields = vec![
                field("ID", q.id.clone()),
                field("客户", ds.customer_name(&q.customer_id)),
                field("状态", q.status.label()),
                field("开具日期", q.issue_date.to_string()),
                field("有效期至", q.valid_until.to_string()),
            ];
            items_fields(&q.items, &mut fields);
            fields.push(field("小计", format_currency(q.subtotal)));
            fields.push(field("折扣", format_currency(q.discount_amount)));
            fields.push(field(
                &format!("税额 ({}%)", q.tax_rate),
                format_currency(q.tax_amount),
            ));
            fields.push(field("总额", format_currency(q.total_amount)));
            RecordDetail {
                title: q.number.clone(),
                fields,
            }
        }),
        ViewKind::Invoices => ds.get_invoice_by_id(id).map(|i| {
            let mut fields = vec![
                field("ID", i.id.clone()),
                field("客户", ds.customer_name(&i.customer_id)),
                field(
                    "来源报价单",
                    i.quotation_id
                        .as_deref()
                        .and_then(|q| ds.get_quotation_by_id(q))
                        .map(|q| q.number.clone())
                        .unwrap_or_else(|| "N/A".to_string()),
                ),
                field("状态", i.status.label()),
                field("开具日期", i.issue_date.to_string()),
                field("到期日", i.due_date.to_string()),
            ];
            items_fields(&i.items, &mut fields);
            fields.push(field("小计", format_currency(i.subtotal)));
            fields.push(field("折扣", format_currency(i.discount_amount)));
            fields.push(field(
                &format!("税额 ({}%)", i.tax_rate),
                format_currency(i.tax_amount),
            ));
            fields.push(field("总额", format_currency(i.total_amount)));
            fields.push(field("已付", format_currency(i.paid_amount)));
            fields.push(field("未付", format_currency(i.remaining_amount)));
            RecordDetail {
                title: i.number.clone(),
                fields,
            }
        }),
        ViewKind::Employees => ds.get_employee_by_id(id).map(|e| {
            let attendance = ds.get_attendance_by_employee(&e.id);
            let present = attendance
                .iter()
                .filter(|a| {
                    matches!(
                        a.status,
                        AttendanceStatus::Present | AttendanceStatus::Late | AttendanceStatus::HalfDay
                    )
                })
                .count();
            RecordDetail {
                title: e.full_name(),
                fields: vec![
                    field("ID", e.id.clone()),
                    field("工号", e.employee_code.clone()),
                    field("邮箱", e.email.clone()),
                    field("电话", e.phone.clone()),
                    field("部门", e.department.clone()),
                    field("职位", e.position.clone()),
                    field("状态", e.status.label()),
                    field("入职日期", e.hire_date.to_string()),
                    field("年薪", format_currency(e.salary)),
                    field(
                        "上级",
                        e.manager_id
                            .as_deref()
                            .map(|m| ds.employee_name(m))
                            .unwrap_or_else(|| "N/A".to_string()),
                    ),
                    field("出勤天数", format!("{}/{}", present, attendance.len())),
                    field("负责线索", ds.get_leads_by_assignee(&e.id).len().to_string()),
                ],
            }
        }),
        ViewKind::Departments => {
            let members = ds.get_employees_by_department(id);
            if members.is_empty() {
                return None;
            }
            let mut fields = vec![field("人数", members.len().to_string())];
            for e in members {
                fields.push(field(&e.id, format!("{} · {} · {}", e.full_name(), e.position, e.status)));
            }
            Some(RecordDetail {
                title: id.to_string(),
                fields,
            })
        }
        ViewKind::Attendance => ds.get_attendance_by_id(id).map(|a| RecordDetail {
            title: format!("{} {}", ds.employee_name(&a.employee_id), a.date),
            fields: vec![
                field("ID", a.id.clone()),
                field("状态", a.status.label()),
                field("签到", time_or_dash(a.check_in)),
                field("签退", time_or_dash(a.check_out)),
                field("工时", format!("{:.2}", a.work_hours)),
            ],
        }),
        ViewKind::Payroll => ds.get_payroll_by_id(id).map(|p| RecordDetail {
            title: format!("{} {}", ds.employee_name(&p.employee_id), p.period),
            fields: vec![
                field("ID", p.id.clone()),
                field("基本工资", format_currency(p.basic_salary)),
                field("津贴", format_currency(p.allowances)),
                field("加班", format_currency(p.overtime)),
                field("扣除", format_currency(p.deductions)),
                field("个税", format_currency(p.tax)),
                field("实发", format_currency(p.net_salary)),
                field("状态", p.status.label()),
                field(
                    "发放日期",
                    p.pay_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "N/A".to_string()),
                ),
            ],
        }),
        ViewKind::Recruitment => ds.get_application_by_id(id).map(|a| {
            let mut fields = vec![
                field("ID", a.id.clone()),
                field("职位", ds.job_title(&a.job_id)),
                field("状态", a.status.label()),
                field("申请日期", a.applied_date.to_string()),
                field("评分", a.score.to_string()),
            ];
            if let Some(job) = ds.get_job_posting_by_id(&a.job_id) {
                fields.push(field("部门", job.department.clone()));
                fields.push(field("地点", job.location.clone()));
                fields.push(field("类型", job.employment_type.label()));
                fields.push(field(
                    "薪资范围",
                    format!(
                        "{} - {}",
                        format_currency(job.salary_min),
                        format_currency(job.salary_max)
                    ),
                ));
                fields.push(field(
                    "该职位申请数",
                    ds.get_applications_by_job(&job.id).len().to_string(),
                ));
            }
            if let Some(c) = ds.get_candidate_by_id(&a.candidate_id) {
                fields.push(field("邮箱", c.email.clone()));
                fields.push(field("当前职位", c.current_position.clone()));
                fields.push(field("工作年限", c.experience_years.to_string()));
                fields.push(field("技能", c.skills.join(", ")));
                fields.push(field("评级", "★".repeat(c.rating as usize)));
                let others: Vec<String> = ds
                    .get_applications_by_candidate(&c.id)
                    .iter()
                    .filter(|o| o.id != a.id)
                    .map(|o| format!("{} ({})", ds.job_title(&o.job_id), o.status))
                    .collect();
                fields.push(field(
                    "其他申请",
                    if others.is_empty() {
                        "无".to_string()
                    } else {
                        others.join(", ")
                    },
                ));
            }
            RecordDetail {
                title: ds.candidate_name(&a.candidate_id),
                fields,
            }
        }),
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
    fn test_rows_cover_every_record() {
        let ds = dataset();
        assert_eq!(build_rows(ViewKind::Customers, &ds).len(), ds.customers.len());
        assert_eq!(build_rows(ViewKind::Attendance, &ds).len(), ds.attendance.len());
        assert_eq!(
            build_rows(ViewKind::Departments, &ds).len(),
            ds.get_departments().len()
        );
        assert!(build_rows(ViewKind::Dashboard, &ds).is_empty());
    }

    #[test]
    fn test_row_cells_match_headers() {
        let ds = dataset();
        for view in ViewKind::MENU {
            for row in build_rows(*view, &ds).iter().take(3) {
                assert_eq!(row.cells.len(), view.headers().len(), "{:?}", view);
            }
        }
    }

    #[test]
    fn test_row_status_in_vocabulary() {
        let ds = dataset();
        for view in ViewKind::MENU {
            let statuses = view.statuses();
            if statuses.is_empty() {
                continue;
            }
            for row in build_rows(*view, &ds) {
                assert!(statuses.contains(&row.status.as_str()), "{:?} {}", view, row.status);
            }
        }
    }

    #[test]
    fn test_recruitment_detail_counts_applications() {
        let ds = dataset();
        let app = &ds.applications.all()[0];
        let d = build_detail(ViewKind::Recruitment, &app.id, &ds).unwrap();
        let value = |k: &str| {
            d.fields
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(
            value("该职位申请数"),
            ds.get_applications_by_job(&app.job_id).len().to_string()
        );
        let others = ds.get_applications_by_candidate(&app.candidate_id).len() - 1;
        if others == 0 {
            assert_eq!(value("其他申请"), "无");
        } else {
            assert_eq!(value("其他申请").split(", ").count(), others);
        }

        let att = &ds.attendance.all()[0];
        assert!(build_detail(ViewKind::Attendance, &att.id, &ds).is_some());
        assert!(build_detail(ViewKind::Attendance, "ATT-999999", &ds).is_none());
    }

    #[test]
    fn test_detail_lookup() {
        let ds = dataset();
        let emp = &ds.employees.all()[0];
        let d = build_detail(ViewKind::Employees, &emp.id, &ds).unwrap();
        assert_eq!(d.title, emp.full_name());
        assert!(build_detail(ViewKind::Employees, "EMP-9999", &ds).is_none());
        assert!(build_detail(ViewKind::Departments, "Nowhere", &ds).is_none());
        assert!(build_detail(ViewKind::Departments, "Sales", &ds).is_some());
    }

    #[test]
    fn test_stock_status() {
        let ds = dataset();
        for p in ds.products.iter() {
            let s = stock_status(p);
            assert_eq!(
                s == "In Stock",
                p.current_stock > p.min_stock_level,
                "{}",
                p.id
            );
        }
    }
}
