use serde::{Deserialize, Serialize};

/// One cell of a lab report table.
///
/// Ingest only ever produces `Text` and `Missing`; `Number` appears once a
/// unit conversion has been applied to a cell. Censored measurements
/// (`"<0.01"`, `">250"`) stay `Text` all the way through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Textual form of the cell, if it has one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            CellValue::Number(_) | CellValue::Missing => None,
        }
    }
}

/// A named column with its cells in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// True when every cell in the column is missing.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(CellValue::is_missing)
    }
}

/// An ordered collection of named columns, all the same length.
///
/// Constructed once per input file by the ingest layer, then mutated in
/// place by the conversion stages. Transforms operate column-at-a-time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<Column>,
}

impl RawTable {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |column| column.cells.len())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Remove and return the named column, preserving the order of the rest.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let index = self.columns.iter().position(|column| column.name == name)?;
        Some(self.columns.remove(index))
    }

    /// Drop every listed column that is present. Absent names are ignored.
    pub fn drop_columns(&mut self, names: &[String]) {
        self.columns
            .retain(|column| !names.iter().any(|name| *name == column.name));
    }

    /// Drop columns whose cells are all missing.
    pub fn drop_empty_columns(&mut self) {
        self.columns.retain(|column| !column.is_empty());
    }
}
