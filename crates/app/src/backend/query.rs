//! PostgREST query strings.

use std::fmt::Display;

use smallvec::SmallVec;

/// Filters, ordering and paging for one PostgREST request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: SmallVec<[(String, String); 6]>,
}

impl Query {
    /// An empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns (and embedded resources) to return.
    #[must_use]
    pub fn select(self, columns: &str) -> Self {
        self.param("select", columns)
    }

    /// `column = value`.
    #[must_use]
    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("eq.{value}"))
    }

    /// `column > value`.
    #[must_use]
    pub fn gt(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("gt.{value}"))
    }

    /// `column >= value`.
    #[must_use]
    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("gte.{value}"))
    }

    /// `column` is one of `values`.
    #[must_use]
    pub fn in_list<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let values = values
            .into_iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",");

        self.param(column, format!("in.({values})"))
    }

    /// Newest first by `column`.
    #[must_use]
    pub fn order_desc(self, column: &str) -> Self {
        self.param("order", format!("{column}.desc"))
    }

    /// Oldest first by `column`.
    #[must_use]
    pub fn order_asc(self, column: &str) -> Self {
        self.param("order", format!("{column}.asc"))
    }

    /// At most `count` rows.
    #[must_use]
    pub fn limit(self, count: usize) -> Self {
        self.param("limit", count.to_string())
    }

    /// Query-string pairs, in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &Query) -> Vec<(&str, &str)> {
        query
            .pairs()
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    #[test]
    fn builds_filters_in_order() {
        let query = Query::new()
            .select("*")
            .eq("store_id", "abc")
            .order_desc("created_at")
            .limit(20);

        assert_eq!(
            pairs(&query),
            [
                ("select", "*"),
                ("store_id", "eq.abc"),
                ("order", "created_at.desc"),
                ("limit", "20"),
            ]
        );
    }

    #[test]
    fn in_list_joins_values() {
        let query = Query::new().in_list("id", ["a", "b", "c"]);

        assert_eq!(pairs(&query), [("id", "in.(a,b,c)")]);
    }

    #[test]
    fn gte_keeps_the_boundary() {
        let query = Query::new().eq("store_id", "s1").gte("created_at", "2025-01-01T00:00:00Z");

        assert_eq!(
            pairs(&query),
            [
                ("store_id", "eq.s1"),
                ("created_at", "gte.2025-01-01T00:00:00Z"),
            ]
        );
    }

    #[test]
    fn gt_and_ascending_order() {
        let query = Query::new().gt("created_at", "2025-01-01T00:00:00Z").order_asc("created_at");

        assert_eq!(
            pairs(&query),
            [
                ("created_at", "gt.2025-01-01T00:00:00Z"),
                ("order", "created_at.asc"),
            ]
        );
    }
}
