//! Table creation and sample data

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::{info, warn};

use crate::store::schema::{CREATE_EMPLOYEES, CREATE_EMPLOYEES_NAME_INDEX};

/// Sample employee row
#[derive(Clone, Debug, PartialEq)]
pub struct Employee {
    pub name: &'static str,
    pub department: &'static str,
    pub salary: f64,
}

pub const SAMPLE_EMPLOYEES: &[Employee] = &[
    Employee { name: "Alice", department: "HR", salary: 60000.0 },
    Employee { name: "Bob", department: "Engineering", salary: 45000.0 },
    Employee { name: "Charlie", department: "Sales", salary: 75000.0 },
    Employee { name: "David", department: "Engineering", salary: 50000.0 },
    Employee { name: "Eva", department: "Marketing", salary: 55000.0 },
];

/// What seeding did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted(usize),
    AlreadySeeded,
}

/// Create tables
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!("{};\n{};", CREATE_EMPLOYEES, CREATE_EMPLOYEES_NAME_INDEX))
        .context("Failed to create employees table")?;
    Ok(())
}

/// Insert sample employees if the table is empty
pub fn seed_db(conn: &mut Connection) -> Result<SeedOutcome> {
    let existing: i64 = conn
        .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
        .context("Failed to count employees")?;
    if existing > 0 {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let tx = conn.transaction().context("Failed to start seed transaction")?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO employees (name, department, salary) VALUES (?1, ?2, ?3)",
        )?;
        for employee in SAMPLE_EMPLOYEES {
            insert.execute(params![employee.name, employee.department, employee.salary])?;
        }
    }
    tx.commit().context("Failed to commit seed data")?;

    Ok(SeedOutcome::Inserted(SAMPLE_EMPLOYEES.len()))
}

/// Open (creating if needed) the database file, create tables and seed
pub fn prepare_database(path: &Path) -> Result<SeedOutcome> {
    let mut conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    init_db(&conn)?;
    info!("Database and tables ready at {}", path.display());

    let outcome = seed_db(&mut conn)?;
    match outcome {
        SeedOutcome::Inserted(count) => info!("Seeded {} employees", count),
        SeedOutcome::AlreadySeeded => warn!("Employees table already has data, skipping seed"),
    }
    Ok(outcome)
}
