use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "count")]
pub enum SeedOutcome {
    /// The table was empty and this many sample rows were inserted
    Seeded(usize),
    /// The table already held this many rows
    Skipped(i64),
}
