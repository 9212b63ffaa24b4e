use crate::bound_check::Division;
use crate::{DateBoundError, Result};

/// Error raised by an external warehouse client. Passed through untouched
pub type ReadError = Box<dyn std::error::Error + Send + Sync>;

/// A credential-scoped client able to run a SQL query against a named
/// deployment environment
pub trait WarehouseReader {
    fn read(
        &self,
        query: &str,
        env: &str,
        schema: Option<&str>,
        cache: bool,
    ) -> std::result::Result<TabularResult, ReadError>;
}

/// # TabularResult
///
/// Rows returned by a warehouse query, with named columns. Cells are already
/// coerced to strings by the reader; SQL `NULL` is `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularResult {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl TabularResult {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with `NULL`s and long rows are
    /// truncated to the column count
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn with_row<S: Into<String>>(mut self, row: impl IntoIterator<Item = Option<S>>) -> Self {
        self.push_row(row.into_iter().map(|c| c.map(Into::into)).collect());
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in the first row
    pub fn first_row_value(&self, column: &str) -> Result<&str> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| DateBoundError::MissingColumn(column.to_string()))?;
        let row = self.rows.first().ok_or(DateBoundError::EmptyResult)?;
        row[idx]
            .as_deref()
            .ok_or_else(|| DateBoundError::NullValue(column.to_string()))
    }
}

/// The two division-scoped readers. Each division has its own credentials,
/// so queries must go to the matching reader
pub struct Readers {
    ccg: Box<dyn WarehouseReader>,
    lsg: Box<dyn WarehouseReader>,
}

impl Readers {
    pub fn new(ccg: impl WarehouseReader + 'static, lsg: impl WarehouseReader + 'static) -> Self {
        Self {
            ccg: Box::new(ccg),
            lsg: Box::new(lsg),
        }
    }

    pub fn for_division(&self, division: Division) -> &dyn WarehouseReader {
        match division {
            Division::Ccg => self.ccg.as_ref(),
            Division::Lsg => self.lsg.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl WarehouseReader for Named {
        fn read(
            &self,
            _query: &str,
            _env: &str,
            _schema: Option<&str>,
            _cache: bool,
        ) -> std::result::Result<TabularResult, ReadError> {
            Ok(TabularResult::new(["reader"]).with_row([Some(self.0)]))
        }
    }

    #[test]
    fn first_row_value() {
        let t = TabularResult::new(["max_date", "min_date"])
            .with_row([Some("20230601"), Some("20230101")])
            .with_row([Some("20990101"), Some("19000101")]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.first_row_value("max_date").unwrap(), "20230601");
        assert_eq!(t.first_row_value("min_date").unwrap(), "20230101");
    }

    #[test]
    fn missing_column_empty_and_null() {
        let t = TabularResult::new(["max_date", "min_date"]);
        assert!(t.is_empty());
        assert!(matches!(
            t.first_row_value("max_date"),
            Err(DateBoundError::EmptyResult)
        ));
        assert!(matches!(
            t.first_row_value("maxdate"),
            Err(DateBoundError::MissingColumn(c)) if c == "maxdate"
        ));

        let t = t.with_row([None::<&str>, None]);
        assert!(matches!(
            t.first_row_value("min_date"),
            Err(DateBoundError::NullValue(c)) if c == "min_date"
        ));
    }

    #[test]
    fn short_rows_are_padded() {
        let t = TabularResult::new(["a", "b"]).with_row([Some("1")]);
        assert_eq!(t.first_row_value("a").unwrap(), "1");
        assert!(matches!(
            t.first_row_value("b"),
            Err(DateBoundError::NullValue(_))
        ));
    }

    #[test]
    fn readers_select_by_division() {
        let readers = Readers::new(Named("ccg"), Named("lsg"));
        for (division, expected) in [(Division::Ccg, "ccg"), (Division::Lsg, "lsg")] {
            let t = readers
                .for_division(division)
                .read("SELECT 1", "prod", None, false)
                .unwrap();
            assert_eq!(t.first_row_value("reader").unwrap(), expected);
        }
    }
}
