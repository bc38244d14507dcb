//! Small helpers for building filtered listings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::types::ToSql;

/// Optional created-at bounds shared by every admin listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// One stored row, surfaced to the admin API as id + timestamp + the full
/// column payload rendered server-side with `to_jsonb`.
#[derive(Debug, Clone, Serialize)]
pub struct StoredRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub data: serde_json::Value,
}

/// Incremental WHERE-clause builder over positional parameters.
#[derive(Default)]
pub(crate) struct Conditions<'a> {
    clauses: Vec<String>,
    params: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Conditions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `expr $n` as a condition, binding `value` as parameter n.
    pub fn push(&mut self, expr: &str, value: &'a (dyn ToSql + Sync)) {
        self.params.push(value);
        self.clauses.push(format!("{expr} ${}", self.params.len()));
    }

    /// Bind a parameter without adding a condition (LIMIT/OFFSET); returns
    /// its positional index.
    pub fn bind(&mut self, value: &'a (dyn ToSql + Sync)) -> usize {
        self.params.push(value);
        self.params.len()
    }

    pub fn push_range(&mut self, column: &str, range: &'a DateRange) {
        if let Some(ref start) = range.start_date {
            self.push(&format!("{column} >="), start);
        }
        if let Some(ref end) = range.end_date {
            self.push(&format!("{column} <="), end);
        }
    }

    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn params(&self) -> &[&'a (dyn ToSql + Sync)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_conditions_render_no_where() {
        let conditions = Conditions::new();
        assert_eq!(conditions.where_clause(), "");
        assert!(conditions.params().is_empty());
    }

    #[test]
    fn conditions_number_parameters_in_order() {
        let min = 10.0_f64;
        let max = 90.0_f64;
        let mut conditions = Conditions::new();
        conditions.push("probability_percent >=", &min);
        conditions.push("probability_percent <=", &max);

        assert_eq!(
            conditions.where_clause(),
            " WHERE probability_percent >= $1 AND probability_percent <= $2"
        );
        assert_eq!(conditions.params().len(), 2);
    }

    #[test]
    fn bind_continues_the_numbering() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let limit = 20_i64;
        let range = DateRange {
            start_date: Some(start),
            end_date: None,
        };

        let mut conditions = Conditions::new();
        conditions.push_range("created_at", &range);
        let index = conditions.bind(&limit);

        assert_eq!(conditions.where_clause(), " WHERE created_at >= $1");
        assert_eq!(index, 2);
    }
}
