//! Search request options

/// Options passed along with a search query.
///
/// Zero values mean "use the cluster default" and are left out of the
/// request sent to Elasticsearch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Number of documents to skip
    pub from: u64,
    /// Number of documents to return
    pub size: u64,
    /// Fields to sort by followed by direction, i.e. `["price:desc", "title:asc"]`.
    /// Order is significant and a field may repeat.
    pub sort: Vec<String>,
    /// Lucene filter expression, ANDed with the main query when non-empty
    pub filter: String,
}

impl SearchOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the skip count
    pub fn with_from(mut self, from: u64) -> Self {
        self.from = from;
        self
    }

    /// Set the page size
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Append a sort token
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    /// Set the filter expression
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Build the query string sent to the cluster: the phrase itself, widened
    /// with ` AND (<filter>)` when a filter is set.
    pub fn compose_query(&self, phrase: &str) -> String {
        if self.filter.is_empty() {
            phrase.to_string()
        } else {
            format!("{phrase} AND ({})", self.filter)
        }
    }

    /// URL query parameters for the options that differ from the cluster default
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.from > 0 {
            params.push(("from", self.from.to_string()));
        }
        if self.size > 0 {
            params.push(("size", self.size.to_string()));
        }
        if !self.sort.is_empty() {
            params.push(("sort", self.sort.join(",")));
        }
        params
    }
}
