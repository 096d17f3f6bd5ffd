// crates/shared-kernel/src/infrastructure/pagination.rs

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Requête de pagination normalisée : `page >= 1`, `limit >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Clamp des entrées brutes : page invalide → 1, limit invalide → défaut
    pub fn normalize(page: i64, limit: i64) -> Self {
        let page = if page < 1 { 1 } else { u32::try_from(page).unwrap_or(u32::MAX) };
        let limit = if limit < 1 {
            DEFAULT_PAGE_LIMIT
        } else {
            u32::try_from(limit).unwrap_or(u32::MAX)
        };
        Self { page, limit }
    }

    pub fn first() -> Self {
        Self { page: 1, limit: DEFAULT_PAGE_LIMIT }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn has_next(&self, total: u64) -> bool {
        u64::from(self.page) * u64::from(self.limit) < total
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub has_next: bool,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
            has_next: request.has_next(total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            has_next: self.has_next,
        }
    }
}
