use crate::app_state::{App, FocusArea, InputMode};
use crate::views::{format_currency, ViewKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    // 创建布局
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 顶部标题栏
            Constraint::Min(0),    // 中间内容区域
            Constraint::Length(10), // 底部命令/日志区域
        ])
        .split(f.size());

    render_top_bar(f, chunks[0], app);

    // 中间内容区域（左侧菜单 + 主视图）
    let middle_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(0)])
        .split(chunks[1]);

    render_left_menu(f, middle_chunks[0], app);
    render_main_view(f, middle_chunks[1], app);
    render_bottom_bar(f, chunks[2], app);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    }
}

/// 状态文字的颜色
fn status_color(status: &str) -> Color {
    match status {
        "Active" | "Won" | "Completed" | "Accepted" | "Paid" | "Present" | "Processed"
        | "Open" | "Hired" | "In Stock" => Color::Green,
        "New" | "Draft" | "Pending" | "Planning" | "Applied" | "Screening" => Color::Cyan,
        "On Leave" | "Late" | "Half Day" | "Leave" | "Sent" | "Partially Paid" | "On Hold"
        | "Low Stock" | "Interview" | "Offer" | "Qualified" | "Proposal" | "Negotiation"
        | "Contacted" | "In Progress" => Color::Yellow,
        "Terminated" | "Lost" | "Rejected" | "Overdue" | "Absent" | "Cancelled" | "Closed"
        | "Expired" | "Inactive" | "Out of Stock" => Color::Red,
        _ => Color::Gray,
    }
}

fn render_top_bar(f: &mut Frame, area: Rect, app: &App) {
    let title = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));

    let title_text = Line::from(vec![
        Span::styled(
            " ERP 仪表盘 ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - 模拟数据 (seed {})", app.seed)),
    ]);

    let paragraph = Paragraph::new(title_text)
        .block(title)
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_left_menu(f: &mut Frame, area: Rect, app: &App) {
    let menu_items: Vec<ListItem> = ViewKind::MENU
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let is_selected = i == app.menu_selected_index;
            let is_active = *view == app.view_mode;

            let style = if is_selected {
                if app.focus_area == FocusArea::Menu {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                }
            } else if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_active { "● " } else { "○ " };
            ListItem::new(format!("{}{}", prefix, view.title())).style(style)
        })
        .collect();

    let title = if app.focus_area == FocusArea::Menu {
        "菜单 (Enter)"
    } else {
        "菜单 (← 切换)"
    };

    let menu = List::new(menu_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(focus_style(app.focus_area == FocusArea::Menu)),
    );

    f.render_widget(menu, area);
}

fn render_main_view(f: &mut Frame, area: Rect, app: &mut App) {
    if app.view_mode == ViewKind::Dashboard {
        render_dashboard(f, area, app);
        return;
    }

    let vertical = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    render_page_cards(f, vertical[0], app);
    let area = vertical[1];

    if app.show_detail {
        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        render_table(f, chunks[0], app);
        render_detail(f, chunks[1], app);
    } else {
        render_table(f, area, app);
    }
}

fn render_page_cards(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for (label, value) in app.stats.page_cards(app.view_mode) {
        spans.push(Span::raw(format!(" {}: ", label)));
        spans.push(Span::styled(
            value,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("  │"));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("概览")
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(paragraph, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let view = app.view_mode;
    let focused = app.focus_area == FocusArea::MainView;
    let has_status = !view.statuses().is_empty();

    let mut header_cells = vec![Cell::from("ID")];
    header_cells.extend(view.headers().iter().map(|h| Cell::from(*h)));
    if has_status {
        header_cells.push(Cell::from("状态"));
    }
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let page = app.current_page();
    let rows: Vec<Row> = page
        .items
        .iter()
        .map(|r| {
            let mut cells = vec![Cell::from(r.id.clone())];
            cells.extend(r.cells.iter().map(|c| Cell::from(c.clone())));
            if has_status {
                cells.push(
                    Cell::from(r.status.clone())
                        .style(Style::default().fg(status_color(&r.status))),
                );
            }
            Row::new(cells)
        })
        .collect();

    let col_count = 1 + view.headers().len() + usize::from(has_status);
    let widths = vec![Constraint::Ratio(1, col_count as u32); col_count];

    let status_filter = app.query.status.as_deref().unwrap_or("ALL");
    let search_info = if app.query.search.is_empty() {
        String::new()
    } else {
        format!(" 搜索: \"{}\"", app.query.search)
    };
    let mut title = format!(
        "{} [Filter: {}]{} 第 {}/{} 页, 共 {} 条",
        view.title(),
        status_filter,
        search_info,
        page.page + 1,
        page.total_pages,
        page.total
    );
    if focused {
        title.push_str(" (f 筛选, n/p 翻页, Enter 详情)");
    }
    let loading = !app.loaded;
    drop(page);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(focus_style(focused)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    if loading {
        let paragraph = Paragraph::new("正在加载数据...").block(
            Block::default()
                .borders(Borders::ALL)
                .title(view.title())
                .style(focus_style(focused)),
        );
        f.render_widget(paragraph, area);
        return;
    }

    app.table_state.select(Some(app.selected_index));
    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let (title, lines) = match app.selected_detail {
        Some(ref detail) => {
            let lines: Vec<Line> = detail
                .fields
                .iter()
                .map(|(k, v)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{}: ", k),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(v.as_str()),
                    ])
                })
                .collect();
            (format!("{} (↑↓ 滚动, x 关闭)", detail.title), lines)
        }
        None => ("详细信息".to_string(), vec![Line::from("正在加载详情...")]),
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    f.render_widget(paragraph, area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("--- {} ---", title),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )])
}

fn metric(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {:<10}: ", label)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let s = &app.stats;
    let focused = app.focus_area == FocusArea::MainView;

    let rows = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[1]);

    let overview = vec![
        section("总览"),
        metric("总收入", format_currency(s.overview.total_revenue), Color::Green),
        metric(
            "活跃客户",
            format!("{} / {}", s.overview.active_customers, s.overview.customers),
            Color::White,
        ),
        metric("进行中项目", s.overview.active_projects.to_string(), Color::Cyan),
        metric(
            "应收未收",
            format_currency(s.overview.outstanding_receivables),
            Color::Yellow,
        ),
        metric("销售管道", format_currency(s.overview.pipeline_value), Color::Cyan),
        metric(
            "线索转化率",
            format!("{:.1}%", s.overview.lead_conversion_rate),
            Color::White,
        ),
        metric("低库存", s.overview.low_stock.to_string(), Color::Red),
    ];

    let sales = vec![
        section("销售"),
        metric("报价单", s.sales.quotations.to_string(), Color::White),
        metric(
            "报价接受率",
            format!("{:.1}%", s.sales.quotation_acceptance_rate),
            Color::White,
        ),
        metric("报价总额", format_currency(s.sales.quoted_value), Color::Cyan),
        metric("发票", s.sales.invoices.to_string(), Color::White),
        metric("已收款", format_currency(s.sales.paid_total), Color::Green),
        metric(
            "逾期",
            format!(
                "{} ({} 张)",
                format_currency(s.sales.overdue_total),
                s.sales.overdue_count
            ),
            Color::Red,
        ),
    ];

    let inventory = vec![
        section("库存"),
        metric("商品数", s.inventory.products.to_string(), Color::White),
        metric("库存价值", format_currency(s.inventory.stock_value), Color::Cyan),
        metric("低库存", s.inventory.low_stock.to_string(), Color::Yellow),
        metric("缺货", s.inventory.out_of_stock.to_string(), Color::Red),
    ];

    let hr = vec![
        section("人事"),
        metric("员工总数", s.hr.headcount.to_string(), Color::White),
        metric(
            "在职/休假/离职",
            format!("{} / {} / {}", s.hr.active, s.hr.on_leave, s.hr.terminated),
            Color::White,
        ),
        metric("部门", s.hr.departments.to_string(), Color::White),
        metric("今日出勤率", format!("{:.1}%", s.hr.attendance_rate), Color::Green),
        metric("今日迟到", s.hr.late_today.to_string(), Color::Yellow),
        metric(
            "最近薪资",
            format!("{} {}", s.hr.payroll_period, format_currency(s.hr.payroll_net)),
            Color::Cyan,
        ),
    ];

    let recruitment = vec![
        section("招聘"),
        metric(
            "开放职位",
            format!("{} ({} 个名额)", s.recruitment.open_postings, s.recruitment.openings),
            Color::White,
        ),
        metric("申请", s.recruitment.applications.to_string(), Color::White),
        metric("流程中", s.recruitment.in_pipeline.to_string(), Color::Cyan),
        metric("面试", s.recruitment.interviews.to_string(), Color::Yellow),
        metric("Offer", s.recruitment.offers.to_string(), Color::Yellow),
        metric("已录用", s.recruitment.hired.to_string(), Color::Green),
    ];

    let cards = [
        (overview, top[0]),
        (sales, top[1]),
        (inventory, bottom[0]),
        (hr, bottom[1]),
        (recruitment, bottom[2]),
    ];
    for (lines, rect) in cards {
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .style(focus_style(focused)),
        );
        f.render_widget(paragraph, rect);
    }
}

fn render_bottom_bar(f: &mut Frame, area: Rect, app: &App) {
    let bottom_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    // 命令输入区域
    let command_prompt = if app.input_mode == InputMode::Command {
        let mut spans = vec![Span::styled(
            "命令: ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];
        let cur = app.command_cursor.min(app.command_input.len());
        let (left, right) = app.command_input.split_at(cur);
        spans.push(Span::raw(left));
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(right));

        // 补全建议用灰色显示
        if let Some(hint) = app.get_completion_hint() {
            spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }

        vec![
            Line::from(spans),
            Line::from("Enter执行 Esc取消 Tab补全 ←→光标 Home/End ↑历史 ↓下一条"),
        ]
    } else {
        vec![
            Line::from(vec![
                Span::styled("命令: ", Style::default().fg(Color::Yellow)),
                Span::raw("(按 / 进入命令模式, 输入 help 查看命令)"),
            ]),
            Line::from("f筛选 n/p翻页 r刷新 ←→切换 ↑↓导航 Enter/c确认 x返回 q退出"),
        ]
    };
    let command_paragraph = Paragraph::new(command_prompt).block(
        Block::default()
            .borders(Borders::ALL)
            .title(if app.input_mode == InputMode::Command {
                "命令输入模式"
            } else {
                "命令输入"
            })
            .style(if app.input_mode == InputMode::Command {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            }),
    );
    f.render_widget(command_paragraph, bottom_chunks[0]);

    // 最新的在顶部
    let log_items: Vec<ListItem> = app
        .log_messages
        .iter()
        .rev()
        .take(20)
        .map(|msg| {
            let style = if msg.starts_with('✓') {
                Style::default().fg(Color::Green)
            } else if msg.starts_with('✗') {
                Style::default().fg(Color::Red)
            } else if msg.starts_with('⚠') {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(msg.as_str()).style(style)
        })
        .collect();

    let log = List::new(log_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("日志 (共 {} 条)", app.log_messages.len()))
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(log, bottom_chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppEvent;
    use crate::fixtures::{Dataset, FixtureConfig};
    use crate::views::build_rows;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_every_view() {
        let ds = Dataset::generate(&FixtureConfig::new(
            42,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        ));
        let (cmd_tx, _cmd_rx) = mpsc::unbounded_channel();
        let (_evt_tx, evt_rx) = mpsc::unbounded_channel();
        let mut app = App::new(Vec::new(), 42, 10, cmd_tx, evt_rx);
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();

        for view in ViewKind::MENU {
            app.switch_view(*view);
            app.handle_event(AppEvent::Rows {
                view: *view,
                seq: app.load_seq,
                rows: build_rows(*view, &ds),
            });
            terminal.draw(|f| draw(f, &mut app)).unwrap();
        }
        assert!(buffer_text(&terminal).contains("seed 42"));
    }

    #[test]
    fn test_loaded_empty_view_renders_table() {
        let (cmd_tx, _cmd_rx) = mpsc::unbounded_channel();
        let (_evt_tx, evt_rx) = mpsc::unbounded_channel();
        let mut app = App::new(Vec::new(), 42, 10, cmd_tx, evt_rx);
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();

        app.switch_view(ViewKind::Customers);
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(!buffer_text(&terminal).contains("[Filter: ALL]"));

        app.handle_event(AppEvent::Rows {
            view: ViewKind::Customers,
            seq: app.load_seq,
            rows: Vec::new(),
        });
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("[Filter: ALL]"));
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color("Active"), Color::Green);
        assert_eq!(status_color("Overdue"), Color::Red);
        assert_eq!(status_color("???"), Color::Gray);
    }
}
