use serde::{Deserialize, Serialize};

use crate::db::models::api::{Pagination, ResponseMeta};

pub const PROFILE_TASKS_PER_PAGE: i64 = 5;
pub const TASKS_PER_PAGE: i64 = 6;
pub const PROJECTS_PER_PAGE: i64 = 8;
pub const TEAMS_PER_PAGE: i64 = 8;
pub const PROJECT_TASKS_PER_PAGE: i64 = 8;
pub const TEAM_PROJECTS_PER_PAGE: i64 = 4;

/// `?page=` kept as raw text so that garbage falls back to the first page
/// instead of rejecting the request.
#[derive(Deserialize, Default, Debug)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// 1-indexed page arithmetic over a known row count.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    total_count: i64,
    per_page: i64,
}

impl Paginator {
    pub fn new(total_count: i64, per_page: i64) -> Self {
        Self {
            total_count: total_count.max(0),
            per_page: per_page.max(1),
        }
    }

    /// An empty result still has one (empty) page.
    pub fn num_pages(&self) -> i64 {
        if self.total_count == 0 {
            1
        } else {
            (self.total_count + self.per_page - 1) / self.per_page
        }
    }

    /// Resolves the requested page, clamping out-of-range numbers to the
    /// first or last page.
    pub fn page_number(&self, requested: Option<&str>) -> i64 {
        let Some(page) = requested.and_then(|raw| raw.trim().parse::<i64>().ok()) else {
            return 1;
        };
        page.clamp(1, self.num_pages())
    }

    pub fn offset(&self, page: i64) -> i64 {
        (page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn pagination(&self, page: i64) -> Pagination {
        Pagination {
            page,
            per_page: self.per_page,
            total_pages: self.num_pages(),
            has_next: page < self.num_pages(),
            has_prev: page > 1,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub total_count: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, paginator: &Paginator, page: i64) -> Self {
        Self {
            items,
            pagination: paginator.pagination(page),
            total_count: paginator.total_count,
        }
    }

    /// Slices an already loaded list.
    pub fn from_vec(all: Vec<T>, per_page: i64, requested: Option<&str>) -> Self {
        let paginator = Paginator::new(all.len() as i64, per_page);
        let page = paginator.page_number(requested);
        let items = all
            .into_iter()
            .skip(paginator.offset(page) as usize)
            .take(paginator.limit() as usize)
            .collect();
        Self::new(items, &paginator, page)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
            total_count: self.total_count,
        }
    }

    /// Splits into the list body and the envelope metadata.
    pub fn into_parts(self) -> (Vec<T>, ResponseMeta) {
        (
            self.items,
            ResponseMeta {
                pagination: Some(self.pagination),
                total_count: Some(self.total_count),
            },
        )
    }
}
