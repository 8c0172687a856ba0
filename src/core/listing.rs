use crate::core::pagination::{self, PageItem};
use crate::core::rate::{rate, Rate};
use crate::domain::model::{Institution, ListQuery};
use crate::utils::error::Result;
use crate::utils::validation::normalize_letter;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const PAGE_SIZE: usize = 20;

/// Active selection mode. Search and letter never coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Search(String),
    Letter(char),
}

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// The 1-based `page` window of `items`. Pages outside the collection are empty.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Everything the list screen shows, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListViewModel {
    filter: Filter,
    current_page: usize,
    schools: Vec<Institution>,
    loading: bool,
}

impl Default for ListViewModel {
    fn default() -> Self {
        Self {
            filter: Filter::All,
            current_page: 1,
            schools: Vec::new(),
            loading: false,
        }
    }
}

impl ListViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn search_term(&self) -> &str {
        match &self.filter {
            Filter::Search(term) => term,
            _ => "",
        }
    }

    pub fn letter(&self) -> Option<char> {
        match self.filter {
            Filter::Letter(c) => Some(c),
            _ => None,
        }
    }

    /// Switches to free-text search, dropping any letter filter. A blank
    /// term means no filter at all.
    pub fn set_search(&mut self, term: &str) {
        self.filter = if term.trim().is_empty() {
            Filter::All
        } else {
            Filter::Search(term.to_string())
        };
        self.current_page = 1;
    }

    /// Switches to the alphabet filter, dropping any search term.
    pub fn set_letter(&mut self, letter: char) -> Result<()> {
        self.filter = Filter::Letter(normalize_letter(letter)?);
        self.current_page = 1;
        Ok(())
    }

    pub fn clear_filter(&mut self) {
        self.filter = Filter::All;
        self.current_page = 1;
    }

    pub fn query(&self, limit: usize) -> ListQuery {
        let (q, letter) = match &self.filter {
            Filter::All => (None, None),
            Filter::Search(term) => (Some(term.trim().to_string()), None),
            Filter::Letter(c) => (None, Some(*c)),
        };
        ListQuery {
            q,
            letter,
            limit: Some(limit),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn apply_results(&mut self, schools: Vec<Institution>) {
        self.schools = schools;
        self.loading = false;
        self.current_page = 1;
    }

    /// The "no data" state every failed fetch ends in.
    pub fn clear_results(&mut self) {
        self.apply_results(Vec::new());
    }

    pub fn schools(&self) -> &[Institution] {
        &self.schools
    }

    pub fn total_count(&self) -> usize {
        self.schools.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.schools.len(), PAGE_SIZE)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Moves to `page`, clamped into `[1, total_pages]`. Returns the page landed on.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages().max(1));
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    pub fn page(&self) -> PageView<'_> {
        let schools = page_slice(&self.schools, self.current_page, PAGE_SIZE);
        let range = if schools.is_empty() {
            None
        } else {
            let first = (self.current_page - 1) * PAGE_SIZE + 1;
            Some(first..=first + schools.len() - 1)
        };

        PageView {
            schools,
            current_page: self.current_page,
            total_pages: self.total_pages(),
            total_count: self.schools.len(),
            range,
        }
    }

    pub fn page_items(&self) -> Vec<PageItem> {
        pagination::generate(self.current_page, self.total_pages())
    }
}

/// One page of the list plus the metadata shown around it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub schools: &'a [Institution],
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    /// 1-based indices of the first and last displayed institution.
    pub range: Option<RangeInclusive<usize>>,
}

impl<'a> PageView<'a> {
    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }

    pub fn rows(&self) -> Vec<InstitutionRow<'a>> {
        self.schools.iter().map(InstitutionRow::new).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstitutionRow<'a> {
    pub institution: &'a Institution,
    pub overall_rate: Rate,
    pub international_rate: Rate,
}

impl<'a> InstitutionRow<'a> {
    pub fn new(institution: &'a Institution) -> Self {
        Self {
            institution,
            overall_rate: rate(institution.total_admitted, institution.total_applicants),
            international_rate: rate(
                institution.admitted_international,
                institution.applicants_international,
            ),
        }
    }
}
