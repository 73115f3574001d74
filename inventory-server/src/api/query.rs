//! Shared list-query parameters
//!
//! Every backend list endpoint paginates the same way; the gateway forwards
//! these parameters untouched.

use serde::Deserialize;

/// Pagination and search parameters accepted by list endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Key/value pairs for the backend request
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_skip_absent_fields() {
        let query = ListQuery {
            page: Some(2),
            page_size: None,
            search: Some("ibuprofen".to_string()),
        };
        assert_eq!(
            query.params(),
            vec![("page", "2".to_string()), ("search", "ibuprofen".to_string())]
        );
        assert!(ListQuery::default().params().is_empty());
    }
}
