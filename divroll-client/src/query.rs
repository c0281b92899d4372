//! Pagination, sorting and filter parameters for collection reads.

/// Parameters passed verbatim to a collection read.
///
/// `query` is an already-built filter expression; it is not interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    /// Link names to expand in each result.
    pub include: Vec<String>,
    /// Ask the server for the total count.
    pub count: bool,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn include(mut self, link_name: impl Into<String>) -> Self {
        self.include.push(link_name.into());
        self
    }

    #[must_use]
    pub fn with_count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Query-string pairs in a stable order; unset parameters are omitted.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip".to_string(), skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(query) = &self.query {
            pairs.push(("query".to_string(), query.clone()));
        }
        pairs.extend(include_pair(&self.include));
        if self.count {
            pairs.push(("count".to_string(), "true".to_string()));
        }
        pairs
    }
}

/// `include=a,b` for a non-empty list of link names.
pub(crate) fn include_pair<S: AsRef<str>>(names: &[S]) -> Option<(String, String)> {
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    divroll_model::link::include_param(&names).map(|joined| ("include".to_string(), joined))
}
