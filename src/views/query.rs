use crate::views::rows::RowSummary;
use regex::{Regex, RegexBuilder};

/// 列表页的客户端筛选条件
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: String,
    /// 从 0 开始
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            status: None,
            search: String::new(),
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.status = None;
        self.search.clear();
        self.page = 0;
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

enum Matcher {
    All,
    Literal(String),
    Pattern(Regex),
}

impl Matcher {
    /// `/pattern/` 视为正则，其余按不区分大小写的子串匹配；正则非法时退回字面量
    fn build(search: &str) -> Matcher {
        let s = search.trim();
        if s.is_empty() {
            return Matcher::All;
        }
        if s.len() >= 2 && s.starts_with('/') && s.ends_with('/') {
            let inner = &s[1..s.len() - 1];
            match RegexBuilder::new(inner).case_insensitive(true).build() {
                Ok(re) => return Matcher::Pattern(re),
                Err(e) => {
                    log::warn!("invalid search pattern {:?}: {}", inner, e);
                    return Matcher::Literal(inner.to_lowercase());
                }
            }
        }
        Matcher::Literal(s.to_lowercase())
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Literal(needle) => text.to_lowercase().contains(needle),
            Matcher::Pattern(re) => re.is_match(text),
        }
    }
}

/// 按状态和关键字过滤，保持原有顺序
pub fn filter_rows<'a>(rows: &'a [RowSummary], query: &ListQuery) -> Vec<&'a RowSummary> {
    let matcher = Matcher::build(&query.search);
    rows.iter()
        .filter(|r| {
            if let Some(status) = &query.status {
                if &r.status != status {
                    return false;
                }
            }
            matcher.is_match(&r.search_text)
        })
        .collect()
}

/// 分页；页码越界时夹到最后一页，总页数至少为 1
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = page.min(total_pages - 1);
    let start = page * page_size;
    let end = (start + page_size).min(total);
    Page {
        items: items.get(start..end).map(|s| s.to_vec()).unwrap_or_default(),
        page,
        total_pages,
        total,
    }
}

pub fn apply<'a>(rows: &'a [RowSummary], query: &ListQuery) -> Page<&'a RowSummary> {
    let filtered = filter_rows(rows, query);
    paginate(&filtered, query.page, query.page_size)
}
