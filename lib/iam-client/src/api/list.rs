use crate::client::CallQuery;

/// Query options of list operations.
///
/// Unset options are not sent:
///
/// ```rust
/// use iam_client::api::ListOptions;
///
/// let options = ListOptions::new()
///     .with_filter("name eq 'Finance'")
///     .with_top(25)
///     .with_count(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    filter: Option<String>,
    top: Option<u32>,
    skip: Option<u32>,
    order_by: Option<String>,
    count: Option<bool>,
    count_only: Option<bool>,
}

impl ListOptions {
    /// Creates options without any parameter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `$filter` expression.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the maximum number of records returned.
    #[must_use]
    pub fn with_top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// Sets the number of records skipped.
    #[must_use]
    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the `$orderBy` expression, such as `name desc`.
    #[must_use]
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Requests the total number of matching records.
    #[must_use]
    pub fn with_count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    /// Requests the total number of matching records without the records.
    #[must_use]
    pub fn with_count_only(mut self, count_only: bool) -> Self {
        self.count_only = Some(count_only);
        self
    }

    pub(crate) fn to_query(&self) -> CallQuery {
        CallQuery::new()
            .add_param("$filter", &self.filter)
            .add_param("top", self.top)
            .add_param("skip", self.skip)
            .add_param("$orderBy", &self.order_by)
            .add_param("count", self.count)
            .add_param("countOnly", self.count_only)
    }
}
