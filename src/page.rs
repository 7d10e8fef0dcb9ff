//! Paged query results.

use crate::row::Row;

/// Pagination request: the page wanted and whether totals should be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    pub enable: bool,
    pub current_page: i64,
    pub page_size: i64,
}

impl Pageable {
    pub fn new(current_page: i64, page_size: i64) -> Self {
        Self {
            enable: true,
            current_page,
            page_size,
        }
    }

    /// All rows on one notional page, no counting.
    pub fn unpaged() -> Self {
        Self {
            enable: false,
            current_page: 1,
            page_size: -1,
        }
    }

    /// True when the request actually restricts the result set.
    pub fn limits_rows(&self) -> bool {
        self.enable && self.page_size > 0
    }
}

/// A full page: the rows plus total record and page counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub page_size: i64,
    pub total_records: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Assemble a page, deriving the page count from the record count.
    ///
    /// An unlimited request reports everything as a single page.
    pub fn of(data: Vec<T>, pageable: Pageable, total_records: i64) -> Self {
        let (current_page, page_size, total_pages) = if pageable.limits_rows() {
            let size = pageable.page_size;
            let mut pages = total_records / size;
            if total_records % size != 0 {
                pages += 1;
            }
            (pageable.current_page.max(1), size, pages)
        } else {
            (1, total_records, 1)
        };
        Self {
            data,
            current_page,
            page_size,
            total_pages,
            total_records,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_records: self.total_records,
            total_pages: self.total_pages,
        }
    }
}

/// A lightweight page: the rows and position only, no count query behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLite<T> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub page_size: i64,
}

impl<T> PageLite<T> {
    pub fn of(data: Vec<T>, pageable: Pageable) -> Self {
        if pageable.limits_rows() {
            Self {
                data,
                current_page: pageable.current_page.max(1),
                page_size: pageable.page_size,
            }
        } else {
            let size = data.len() as i64;
            Self {
                data,
                current_page: 1,
                page_size: size,
            }
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageLite<U> {
        PageLite {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

pub type RowPage = Page<Row>;
