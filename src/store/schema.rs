//! Database schema: DDL and the description embedded in prompts

/// One table as shown to the language model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDescription {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableDescription {
    /// `- Table employees (id, name, department, salary)`
    pub fn prompt_line(&self) -> String {
        format!("- Table {} ({})", self.name, self.columns.join(", "))
    }
}

pub const EMPLOYEES: TableDescription = TableDescription {
    name: "employees",
    columns: &["id", "name", "department", "salary"],
};

/// Tables exposed to the model
pub const TABLES: &[TableDescription] = &[EMPLOYEES];

pub const CREATE_EMPLOYEES: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT,
    department TEXT,
    salary REAL
)";

pub const CREATE_EMPLOYEES_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS ix_employees_name ON employees (name)";

/// Schema description for the prompt, one line per table
pub fn describe(tables: &[TableDescription]) -> String {
    tables
        .iter()
        .map(TableDescription::prompt_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_employees() {
        assert_eq!(describe(TABLES), "- Table employees (id, name, department, salary)");
    }
}
