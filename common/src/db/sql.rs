// SQL fragment builders for partial updates and filtered queries
//
// Only placeholders are generated for values; column names come from
// compile-time allow-lists and are the only text interpolated into SQL.

use crate::db::client::SqlValue;
use crate::errors::ValidationError;

/// Allow-list of the fields an entity accepts in a partial update
///
/// Each entry maps a logical field name to exactly one column name.
/// Identity entries (`("title", "title")`) state that the column carries
/// the field's own name.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Column for a logical field, or `None` when the field is not allowed
    pub fn column(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(name, _)| *name)
    }
}

/// SET clause of an UPDATE statement and the values bound to it
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    /// `"col1"=$1, "col2"=$2, ...`
    pub set_cols: String,
    /// `values[i - 1]` binds placeholder `$i`
    pub values: Vec<SqlValue>,
}

impl SetClause {
    /// Index of the first placeholder after the SET values
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build the SET clause for a partial update
///
/// Entries are processed in the order given; entry `i` (1-based) becomes
/// `"<column>"=$i`.
///
/// # Errors
/// - `ValidationError::NoData` if `data` is empty
/// - `ValidationError::UnknownField` if a field is not in `fields`
pub fn sql_for_partial_update<'a, I>(data: I, fields: &FieldMap) -> Result<SetClause, ValidationError>
where
    I: IntoIterator<Item = (&'a str, SqlValue)>,
{
    let mut cols = Vec::new();
    let mut values = Vec::new();

    for (field, value) in data {
        let column = fields
            .column(field)
            .ok_or_else(|| ValidationError::UnknownField(field.to_string()))?;
        values.push(value);
        cols.push(format!("\"{}\"=${}", column, values.len()));
    }

    if values.is_empty() {
        return Err(ValidationError::NoData);
    }

    Ok(SetClause {
        set_cols: cols.join(", "),
        values,
    })
}

/// Ordered list of WHERE predicates joined with AND
#[derive(Debug, Default, Clone)]
pub struct WhereClause {
    conditions: Vec<String>,
    values: Vec<SqlValue>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition whose single `$` is replaced by the next placeholder
    pub fn and_param(&mut self, template: &str, value: impl Into<SqlValue>) -> &mut Self {
        self.values.push(value.into());
        let placeholder = format!("${}", self.values.len());
        self.conditions.push(template.replacen('$', &placeholder, 1));
        self
    }

    /// Add a condition without parameters
    pub fn and_raw(&mut self, condition: &str) -> &mut Self {
        self.conditions.push(condition.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// ` WHERE c1 AND c2 ...`, or an empty string when there are no conditions
    pub fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }
}
