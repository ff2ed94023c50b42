use serde::{Deserialize, Serialize};

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of records matching the query, when `count` was requested.
    #[serde(
        rename = "@recordsetCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recordset_count: Option<u64>,
    /// Link to the next page, absent on the last one.
    #[serde(rename = "@nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    /// The records of this page.
    #[serde(default = "Vec::new", alias = "value")]
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Returns `true` when another page is available.
    pub fn has_next(&self) -> bool {
        self.next_link.is_some()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            recordset_count: None,
            next_link: None,
            items: Vec::new(),
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
