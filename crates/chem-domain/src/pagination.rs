//! Paginación limit/offset compartida por listados e historiales.

use serde::{Deserialize, Serialize};

use crate::DomainError;

pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_LIMIT: i64 = 10;

/// Ventana validada: `limit` en [1,100], `offset` >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageRequestFields")]
pub struct PageRequest {
    limit: i64,
    offset: i64,
}

impl PageRequest {
    pub fn new(limit: i64, offset: i64) -> Result<Self, DomainError> {
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(DomainError::validation(format!("limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {limit}")));
        }
        if offset < 0 {
            return Err(DomainError::validation(format!("offset must be >= 0, got {offset}")));
        }
        Ok(PageRequest { limit, offset })
    }
    pub fn limit(&self) -> i64 { self.limit }
    pub fn offset(&self) -> i64 { self.offset }

    /// Índices `[start, end)` de la ventana sobre una colección de `len`
    /// elementos ya ordenada.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(len);
        let end = start.saturating_add(self.limit as usize).min(len);
        (start, end)
    }
}

#[derive(Deserialize)]
struct PageRequestFields {
    limit: i64,
    offset: i64,
}

impl TryFrom<PageRequestFields> for PageRequest {
    type Error = DomainError;

    fn try_from(f: PageRequestFields) -> Result<Self, Self::Error> {
        PageRequest::new(f.limit, f.offset)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest { limit: DEFAULT_LIMIT, offset: 0 }
    }
}

/// Página de resultados. `total` es el conteo completo sin ventana.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: PageRequest, total: i64, results: Vec<T>) -> Self {
        Page { total, limit: request.limit(), offset: request.offset(), results }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
        where F: FnMut(T) -> U
    {
        Page { total: self.total,
               limit: self.limit,
               offset: self.offset,
               results: self.results.into_iter().map(f).collect() }
    }
}
