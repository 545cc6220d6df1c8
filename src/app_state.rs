use crate::commands::{AppCommand, LocalEdit};
use crate::views::query::{self, Page};
use crate::views::rows::department_row;
use crate::views::{DashboardStats, ListQuery, RecordDetail, RowSummary, ViewKind};
use crossterm::event::KeyCode;
use ratatui::widgets::TableState;
use std::str::FromStr;
use tokio::sync::mpsc;

#[derive(PartialEq, Debug, Clone)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(PartialEq, Debug, Clone)]
pub enum FocusArea {
    Menu,     // 焦点在左侧菜单
    MainView, // 焦点在主视图
}

#[derive(Debug)]
pub enum AppEvent {
    Log(String),
    Message(String),
    Error(String),
    Rows {
        view: ViewKind,
        seq: u64,
        rows: Vec<RowSummary>,
    },
    Detail(Option<RecordDetail>),
    Stats(DashboardStats),
    Edit(LocalEdit),
    DatasetReplaced {
        seed: u64,
    },
}

pub struct App {
    pub view_mode: ViewKind,
    pub input_mode: InputMode,
    pub focus_area: FocusArea,
    pub menu_selected_index: usize,
    // 当前页面的行数据；本地修改只落在这里，切换页面即丢弃
    pub rows_all: Vec<RowSummary>,
    /// 每次请求页面数据自增；只接受最新一次请求的结果
    pub load_seq: u64,
    pub loaded: bool,
    // 行数据到达前完成的修改，等加载完成后再应用
    pending_edits: Vec<LocalEdit>,
    pub query: ListQuery,
    pub selected_index: usize,
    pub table_state: TableState,
    pub show_detail: bool,
    pub selected_detail: Option<RecordDetail>,
    pub detail_scroll: u16,
    pub stats: DashboardStats,
    pub seed: u64,
    pub command_input: String,
    pub command_cursor: usize,
    pub command_history: Vec<String>,
    pub command_history_index: Option<usize>,
    pub log_messages: Vec<String>,
    pub cmd_tx: mpsc::UnboundedSender<AppCommand>,
    pub evt_rx: Option<mpsc::UnboundedReceiver<AppEvent>>,
}

impl App {
    pub fn new(
        startup_info: Vec<String>,
        seed: u64,
        page_size: usize,
        cmd_tx: mpsc::UnboundedSender<AppCommand>,
        evt_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> App {
        let mut log_messages = vec!["应用已启动".to_string()];
        log_messages.extend(startup_info);

        App {
            view_mode: ViewKind::Dashboard,
            input_mode: InputMode::Normal,
            focus_area: FocusArea::Menu,
            menu_selected_index: 0,
            rows_all: Vec::new(),
            load_seq: 0,
            loaded: true,
            pending_edits: Vec::new(),
            query: ListQuery::new(page_size),
            selected_index: 0,
            table_state: {
                let mut s = TableState::default();
                s.select(Some(0));
                s
            },
            show_detail: false,
            selected_detail: None,
            detail_scroll: 0,
            stats: DashboardStats::default(),
            seed,
            command_input: String::new(),
            command_cursor: 0,
            command_history: Vec::new(),
            command_history_index: None,
            log_messages,
            cmd_tx,
            evt_rx: Some(evt_rx),
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// 获取当前的补全建议
    pub fn get_completion_hint(&self) -> Option<String> {
        let commands = [
            "filter", "page", "dept", "employee", "lead", "seed", "export", "stats", "help",
            "quit",
        ];
        let input = self.command_input.trim();

        if input.is_empty() {
            return None;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.len() == 1 {
            match parts[0] {
                "dept" => return Some(" add".to_string()),
                "employee" | "lead" => return Some(" status".to_string()),
                _ => {}
            }
            for cmd in commands {
                if cmd.starts_with(parts[0]) && cmd != parts[0] {
                    return Some(cmd[parts[0].len()..].to_string());
                }
            }
            return None;
        }
        if parts[0] == "filter" && parts.len() == 2 {
            let cur = parts[1];
            if "clear".starts_with(cur) && cur != "clear" {
                return Some("clear"[cur.len()..].to_string());
            }
        }
        None
    }

    /// 当前页（已筛选、已分页）的行
    pub fn current_page(&self) -> Page<&RowSummary> {
        query::apply(&self.rows_all, &self.query)
    }

    pub fn selected_row(&self) -> Option<RowSummary> {
        self.current_page()
            .items
            .get(self.selected_index)
            .map(|r| (*r).clone())
    }

    pub fn clamp_selection(&mut self) {
        let (page, len) = {
            let p = self.current_page();
            (p.page, p.items.len())
        };
        self.query.page = page;
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
        self.table_state.select(Some(self.selected_index));
    }

    /// 切换页面：重置筛选条件，丢弃本地修改，重新向后台请求数据
    pub fn switch_view(&mut self, view: ViewKind) {
        self.view_mode = view;
        if let Some(pos) = ViewKind::MENU.iter().position(|v| *v == view) {
            self.menu_selected_index = pos;
        }
        self.rows_all.clear();
        self.query.reset();
        self.selected_index = 0;
        self.show_detail = false;
        self.selected_detail = None;
        self.detail_scroll = 0;
        self.table_state.select(Some(0));
        self.load_seq += 1;
        self.loaded = view == ViewKind::Dashboard;
        if !self.loaded {
            let _ = self.cmd_tx.send(AppCommand::LoadView {
                view,
                seq: self.load_seq,
            });
        }
        // 每个页面顶部都有统计卡片
        let _ = self.cmd_tx.send(AppCommand::Stats);
    }

    /// 请求详情数据
    pub fn request_detail(&mut self) {
        if let Some(row) = self.selected_row() {
            self.detail_scroll = 0;
            self.show_detail = true;
            self.selected_detail = None;
            let _ = self.cmd_tx.send(AppCommand::GetDetail {
                view: self.view_mode,
                id: row.id,
            });
        }
    }

    pub fn set_filter(&mut self, args: &str) {
        let args = args.trim();
        if args.is_empty() || args == "clear" || args == "--clear" {
            self.query.search.clear();
        } else {
            self.query.search = args.to_string();
        }
        self.query.page = 0;
        self.selected_index = 0;
        self.clamp_selection();
    }

    pub fn cycle_status_filter(&mut self) {
        self.query.status = self.view_mode.next_status(self.query.status.as_deref());
        self.query.page = 0;
        self.selected_index = 0;
        self.clamp_selection();
    }

    pub fn next_page(&mut self) {
        let (page, total_pages) = {
            let p = self.current_page();
            (p.page, p.total_pages)
        };
        if page + 1 < total_pages {
            self.query.page = page + 1;
            self.selected_index = 0;
            self.clamp_selection();
        }
    }

    pub fn prev_page(&mut self) {
        if self.query.page > 0 {
            self.query.page -= 1;
            self.selected_index = 0;
            self.clamp_selection();
        }
    }

    /// 把模拟保存的结果应用到当前页面
    pub fn apply_local_edit(&mut self, edit: LocalEdit) {
        let applied = match (&edit, self.view_mode) {
            (LocalEdit::DepartmentAdded { name }, ViewKind::Departments) => {
                self.rows_all.push(department_row(name, 0, 0, "N/A", 0.0));
                true
            }
            (LocalEdit::EmployeeStatusChanged { id, status }, ViewKind::Employees) => {
                self.set_row_status(id, status.label())
            }
            (LocalEdit::LeadStatusChanged { id, status }, ViewKind::Leads) => {
                self.set_row_status(id, status.label())
            }
            _ => false,
        };
        if !applied {
            self.add_log(format!(
                "⚠ 修改仅作用于对应页面，当前页面 [{}] 未变化",
                self.view_mode.title()
            ));
        }
        self.clamp_selection();
    }

    fn set_row_status(&mut self, id: &str, status: &str) -> bool {
        match self.rows_all.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.set_status(status);
                true
            }
            None => false,
        }
    }

    /// 处理后台 actor 发来的事件
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Log(msg) => self.log_messages.push(msg),
            AppEvent::Message(msg) => self.log_messages.push(msg),
            AppEvent::Error(msg) => self.log_messages.push(msg),
            AppEvent::Rows { view, seq, rows } => {
                // 丢弃已离开页面或已被新请求取代的结果
                if view == self.view_mode && seq == self.load_seq {
                    self.rows_all = rows;
                    self.loaded = true;
                    for edit in std::mem::take(&mut self.pending_edits) {
                        self.apply_local_edit(edit);
                    }
                    self.clamp_selection();
                }
            }
            AppEvent::Detail(detail) => {
                if detail.is_none() {
                    self.log_messages.push("✗ 未找到对应记录".to_string());
                }
                self.selected_detail = detail;
            }
            AppEvent::Stats(stats) => {
                self.stats = stats;
            }
            AppEvent::Edit(edit) => {
                if self.loaded {
                    self.apply_local_edit(edit);
                } else {
                    self.pending_edits.push(edit);
                }
            }
            AppEvent::DatasetReplaced { seed } => {
                self.seed = seed;
                let view = self.view_mode;
                self.switch_view(view);
            }
        }
    }

    fn finish_command(&mut self, cmd_owned: String) {
        self.command_history.push(cmd_owned);
        self.command_history_index = None;
        self.command_input.clear();
        self.command_cursor = 0;
        self.input_mode = InputMode::Normal;
    }

    pub fn handle_key_event(&mut self, key: KeyCode) -> bool {
        if self.input_mode == InputMode::Command {
            match key {
                KeyCode::Enter => {
                    let cmd_owned = self.command_input.trim().to_string();
                    if cmd_owned.is_empty() || cmd_owned == "q" {
                        self.command_input.clear();
                        self.command_cursor = 0;
                        self.input_mode = InputMode::Normal;
                        return false;
                    }

                    // filter / page 只改本地状态，不经过后台
                    let (head, rest) = cmd_owned
                        .split_once(char::is_whitespace)
                        .unwrap_or((cmd_owned.as_str(), ""));
                    let (head, rest) = (head.to_string(), rest.trim().to_string());
                    if head == "filter" {
                        self.set_filter(&rest);
                        self.finish_command(cmd_owned);
                        return false;
                    }
                    if head == "page" {
                        match rest.parse::<usize>() {
                            Ok(n) if n >= 1 => {
                                self.query.page = n - 1;
                                self.selected_index = 0;
                                self.clamp_selection();
                            }
                            _ => self.add_log("✗ 用法: page <n>（从 1 开始）".to_string()),
                        }
                        self.finish_command(cmd_owned);
                        return false;
                    }

                    let app_cmd = AppCommand::from_str(&cmd_owned)
                        .unwrap_or_else(|_| AppCommand::Unknown(cmd_owned.clone()));
                    let quit = app_cmd == AppCommand::Quit;
                    let _ = self.cmd_tx.send(app_cmd);
                    self.finish_command(cmd_owned);
                    return quit;
                }
                KeyCode::Esc => {
                    self.command_input.clear();
                    self.command_cursor = 0;
                    self.input_mode = InputMode::Normal;
                    return false;
                }
                KeyCode::Tab => {
                    if let Some(hint) = self.get_completion_hint() {
                        let insert = format!("{} ", hint);
                        self.command_input.insert_str(self.command_cursor, &insert);
                        self.command_cursor += insert.len();
                    }
                    return false;
                }
                KeyCode::Up => {
                    if self.command_history.is_empty() {
                        return false;
                    }
                    let next = match self.command_history_index {
                        None => self.command_history.len().saturating_sub(1),
                        Some(i) => i.saturating_sub(1),
                    };
                    self.command_history_index = Some(next);
                    if let Some(cmd) = self.command_history.get(next) {
                        self.command_input = cmd.clone();
                        self.command_cursor = self.command_input.len();
                    }
                    return false;
                }
                KeyCode::Down => {
                    let Some(i) = self.command_history_index else {
                        return false;
                    };
                    let next = i + 1;
                    if next >= self.command_history.len() {
                        self.command_history_index = None;
                        self.command_input.clear();
                        self.command_cursor = 0;
                        return false;
                    }
                    self.command_history_index = Some(next);
                    if let Some(cmd) = self.command_history.get(next) {
                        self.command_input = cmd.clone();
                        self.command_cursor = self.command_input.len();
                    }
                    return false;
                }
                KeyCode::Backspace => {
                    if self.command_cursor > 0 {
                        let idx = prev_char_boundary(&self.command_input, self.command_cursor);
                        self.command_input.remove(idx);
                        self.command_cursor = idx;
                    }
                    return false;
                }
                KeyCode::Delete => {
                    if self.command_cursor < self.command_input.len() {
                        self.command_input.remove(self.command_cursor);
                    }
                    return false;
                }
                KeyCode::Left => {
                    if self.command_cursor > 0 {
                        self.command_cursor =
                            prev_char_boundary(&self.command_input, self.command_cursor);
                    }
                    return false;
                }
                KeyCode::Right => {
                    if let Some(c) = self.command_input[self.command_cursor..].chars().next() {
                        self.command_cursor += c.len_utf8();
                    }
                    return false;
                }
                KeyCode::Home => {
                    self.command_cursor = 0;
                    return false;
                }
                KeyCode::End => {
                    self.command_cursor = self.command_input.len();
                    return false;
                }
                KeyCode::Char(c) => {
                    self.command_input.insert(self.command_cursor, c);
                    self.command_cursor += c.len_utf8();
                    return false;
                }
                _ => return false,
            }
        }

        // 正常模式下的按键处理
        match key {
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Command;
                self.command_input.clear();
                self.command_cursor = 0;
                false
            }
            KeyCode::Char('q') => true,
            KeyCode::Left => {
                self.focus_area = FocusArea::Menu;
                false
            }
            KeyCode::Right => {
                self.focus_area = FocusArea::MainView;
                false
            }
            KeyCode::Up => {
                if self.focus_area == FocusArea::Menu {
                    if self.menu_selected_index > 0 {
                        self.menu_selected_index -= 1;
                    }
                } else if self.show_detail {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                } else if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.table_state.select(Some(self.selected_index));
                }
                false
            }
            KeyCode::Down => {
                if self.focus_area == FocusArea::Menu {
                    if self.menu_selected_index < ViewKind::MENU.len() - 1 {
                        self.menu_selected_index += 1;
                    }
                } else if self.show_detail {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                } else if self.selected_index + 1 < self.current_page().items.len() {
                    self.selected_index += 1;
                    self.table_state.select(Some(self.selected_index));
                }
                false
            }
            KeyCode::Enter | KeyCode::Char('c') => {
                if self.focus_area == FocusArea::Menu {
                    if let Some(view) = ViewKind::MENU.get(self.menu_selected_index).copied() {
                        self.switch_view(view);
                    }
                    self.focus_area = FocusArea::MainView;
                } else if self.view_mode != ViewKind::Dashboard && !self.show_detail {
                    self.request_detail();
                }
                false
            }
            KeyCode::Char('x') | KeyCode::Esc => {
                self.show_detail = false;
                false
            }
            KeyCode::Char('f') => {
                if self.focus_area == FocusArea::MainView && !self.show_detail {
                    self.cycle_status_filter();
                }
                false
            }
            KeyCode::Char('n') | KeyCode::PageDown => {
                self.next_page();
                false
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                self.prev_page();
                false
            }
            KeyCode::Char('r') => {
                // 重新加载当前页面（本地修改会被丢弃）
                let view = self.view_mode;
                self.switch_view(view);
                false
            }
            _ => false,
        }
    }
}

fn prev_char_boundary(s: &str, idx: usize) -> usize {
    s[..idx]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::model::{EmployeeStatus, LeadStatus};

    fn app() -> (App, mpsc::UnboundedReceiver<AppCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (_evt_tx, evt_rx) = mpsc::unbounded_channel();
        (App::new(Vec::new(), 42, 2, cmd_tx, evt_rx), cmd_rx)
    }

    fn row(id: &str, status: &str, text: &str) -> RowSummary {
        let mut r = department_row(text, 0, 0, "N/A", 0.0);
        r.id = id.to_string();
        r.set_status(status);
        r
    }

    fn load(app: &mut App, view: ViewKind, rows: Vec<RowSummary>) {
        app.switch_view(view);
        let seq = app.load_seq;
        app.handle_event(AppEvent::Rows { view, seq, rows });
    }

    fn type_command(app: &mut App, cmd: &str) -> bool {
        app.handle_key_event(KeyCode::Char('/'));
        for c in cmd.chars() {
            app.handle_key_event(KeyCode::Char(c));
        }
        app.handle_key_event(KeyCode::Enter)
    }

    #[test]
    fn test_switch_view_requests_data() {
        let (mut app, mut rx) = app();
        app.switch_view(ViewKind::Employees);
        assert_eq!(
            rx.try_recv().unwrap(),
            AppCommand::LoadView {
                view: ViewKind::Employees,
                seq: 1,
            }
        );
        assert_eq!(rx.try_recv().unwrap(), AppCommand::Stats);
        app.switch_view(ViewKind::Dashboard);
        assert_eq!(rx.try_recv().unwrap(), AppCommand::Stats);
        assert!(rx.try_recv().is_err());
        assert_eq!(app.menu_selected_index, 0);
    }

    #[test]
    fn test_stale_rows_ignored() {
        let (mut app, _rx) = app();
        app.switch_view(ViewKind::Employees);
        app.handle_event(AppEvent::Rows {
            view: ViewKind::Leads,
            seq: app.load_seq,
            rows: vec![row("LEAD-0001", "New", "x")],
        });
        assert!(app.rows_all.is_empty());
        assert!(!app.loaded);

        // 重新加载后，上一次请求的结果作废
        let old_seq = app.load_seq;
        app.switch_view(ViewKind::Employees);
        app.handle_event(AppEvent::Rows {
            view: ViewKind::Employees,
            seq: old_seq,
            rows: vec![row("EMP-0001", "Active", "x")],
        });
        assert!(app.rows_all.is_empty());
        assert!(!app.loaded);
    }

    #[test]
    fn test_pagination_and_filter() {
        let (mut app, _rx) = app();
        load(
            &mut app,
            ViewKind::Employees,
            vec![
                row("EMP-0001", "Active", "alpha"),
                row("EMP-0002", "Active", "beta"),
                row("EMP-0003", "On Leave", "gamma"),
            ],
        );
        assert_eq!(app.current_page().total_pages, 2);
        app.next_page();
        assert_eq!(app.current_page().items[0].id, "EMP-0003");
        app.next_page();
        assert_eq!(app.query.page, 1);
        app.prev_page();
        assert_eq!(app.query.page, 0);

        type_command(&mut app, "filter beta");
        let page = app.current_page();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, "EMP-0002");

        type_command(&mut app, "filter clear");
        assert_eq!(app.current_page().total, 3);

        app.cycle_status_filter();
        assert_eq!(app.query.status.as_deref(), Some("Active"));
        assert_eq!(app.current_page().total, 2);
    }

    #[test]
    fn test_page_command() {
        let (mut app, _rx) = app();
        load(
            &mut app,
            ViewKind::Employees,
            (1..=5)
                .map(|i| row(&format!("EMP-000{}", i), "Active", "x"))
                .collect(),
        );
        type_command(&mut app, "page 3");
        assert_eq!(app.query.page, 2);
        type_command(&mut app, "page 99");
        assert_eq!(app.query.page, 2);
        type_command(&mut app, "page 0");
        assert!(app.log_messages.last().unwrap().contains("page"));
    }

    #[test]
    fn test_local_edit_applies_to_current_view_only() {
        let (mut app, _rx) = app();
        load(
            &mut app,
            ViewKind::Employees,
            vec![row("EMP-0001", "Active", "alpha")],
        );
        app.handle_event(AppEvent::Edit(LocalEdit::EmployeeStatusChanged {
            id: "EMP-0001".to_string(),
            status: EmployeeStatus::Terminated,
        }));
        assert_eq!(app.rows_all[0].status, "Terminated");
        assert!(app.rows_all[0].search_text.contains("Terminated"));

        app.handle_event(AppEvent::Edit(LocalEdit::LeadStatusChanged {
            id: "LEAD-0001".to_string(),
            status: LeadStatus::Won,
        }));
        assert!(app.log_messages.last().unwrap().starts_with('⚠'));

        // 切换页面后本地修改消失
        app.switch_view(ViewKind::Employees);
        assert!(app.rows_all.is_empty());
    }

    #[test]
    fn test_department_add_appends_row() {
        let (mut app, _rx) = app();
        load(&mut app, ViewKind::Departments, Vec::new());
        app.handle_event(AppEvent::Edit(LocalEdit::DepartmentAdded {
            name: "Legal".to_string(),
        }));
        assert_eq!(app.rows_all.len(), 1);
        assert_eq!(app.rows_all[0].id, "Legal");
    }

    #[test]
    fn test_edit_before_rows_arrive_is_kept() {
        let (mut app, _rx) = app();
        load(&mut app, ViewKind::Employees, vec![row("EMP-0001", "Active", "x")]);
        // 保存成功的消息先于新页面的数据到达
        app.switch_view(ViewKind::Departments);
        app.handle_event(AppEvent::Message("✓ 部门已添加: Legal".to_string()));
        app.handle_event(AppEvent::Edit(LocalEdit::DepartmentAdded {
            name: "Legal".to_string(),
        }));
        assert!(app.rows_all.is_empty());

        let seq = app.load_seq;
        app.handle_event(AppEvent::Rows {
            view: ViewKind::Departments,
            seq,
            rows: vec![row("Sales", "", "Sales")],
        });
        let ids: Vec<&str> = app.rows_all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Sales", "Legal"]);
        assert!(app.loaded);
    }

    #[test]
    fn test_pending_edit_for_other_view_warns() {
        let (mut app, _rx) = app();
        app.switch_view(ViewKind::Leads);
        app.handle_event(AppEvent::Edit(LocalEdit::DepartmentAdded {
            name: "Legal".to_string(),
        }));
        let seq = app.load_seq;
        app.handle_event(AppEvent::Rows {
            view: ViewKind::Leads,
            seq,
            rows: vec![row("LEAD-0001", "New", "x")],
        });
        assert_eq!(app.rows_all.len(), 1);
        assert!(app.log_messages.last().unwrap().starts_with('⚠'));
    }

    #[test]
    fn test_local_commands_match_whole_word() {
        let (mut app, mut rx) = app();
        load(
            &mut app,
            ViewKind::Employees,
            (1..=5)
                .map(|i| row(&format!("EMP-000{}", i), "Active", "x"))
                .collect(),
        );
        while rx.try_recv().is_ok() {}

        type_command(&mut app, "pages 2");
        assert_eq!(app.query.page, 0);
        assert!(matches!(rx.try_recv().unwrap(), AppCommand::Unknown(_)));

        type_command(&mut app, "filterfoo");
        assert!(app.query.search.is_empty());
        assert!(matches!(rx.try_recv().unwrap(), AppCommand::Unknown(_)));

        type_command(&mut app, "filter   EMP-0002 ");
        assert_eq!(app.query.search, "EMP-0002");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_command_forwarded_and_quit() {
        let (mut app, mut rx) = app();
        assert!(!type_command(&mut app, "seed 7"));
        assert_eq!(rx.try_recv().unwrap(), AppCommand::Regenerate { seed: 7 });
        assert!(type_command(&mut app, "quit"));
        assert_eq!(app.command_history.len(), 2);
    }

    #[test]
    fn test_menu_enter_switches_view() {
        let (mut app, mut rx) = app();
        app.handle_key_event(KeyCode::Down);
        app.handle_key_event(KeyCode::Enter);
        assert_eq!(app.view_mode, ViewKind::Customers);
        assert_eq!(app.focus_area, FocusArea::MainView);
        assert_eq!(
            rx.try_recv().unwrap(),
            AppCommand::LoadView {
                view: ViewKind::Customers,
                seq: 1,
            }
        );
    }

    #[test]
    fn test_request_detail() {
        let (mut app, mut rx) = app();
        load(
            &mut app,
            ViewKind::Employees,
            vec![row("EMP-0001", "Active", "alpha")],
        );
        while rx.try_recv().is_ok() {}
        app.focus_area = FocusArea::MainView;
        app.handle_key_event(KeyCode::Enter);
        assert!(app.show_detail);
        assert_eq!(
            rx.try_recv().unwrap(),
            AppCommand::GetDetail {
                view: ViewKind::Employees,
                id: "EMP-0001".to_string()
            }
        );
        app.handle_key_event(KeyCode::Char('x'));
        assert!(!app.show_detail);
    }

    #[test]
    fn test_completion_hint() {
        let (mut app, _rx) = app();
        app.command_input = "fil".to_string();
        assert_eq!(app.get_completion_hint().as_deref(), Some("ter"));
        app.command_input = "dept".to_string();
        assert_eq!(app.get_completion_hint().as_deref(), Some(" add"));
        app.command_input = "filter cl".to_string();
        assert_eq!(app.get_completion_hint().as_deref(), Some("ear"));
    }

    #[test]
    fn test_command_input_multibyte() {
        let (mut app, _rx) = app();
        app.handle_key_event(KeyCode::Char('/'));
        for c in "部门".chars() {
            app.handle_key_event(KeyCode::Char(c));
        }
        app.handle_key_event(KeyCode::Left);
        app.handle_key_event(KeyCode::Backspace);
        assert_eq!(app.command_input, "门");
        assert_eq!(app.command_cursor, 0);
    }
}
