use anyhow::Result;
use pointcmp::compare::{unique_count, Relationship, SetComparator};
use pointcmp::Point;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::io::Write;

/// Outcome of one comparison, as printed by the CLI.
#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(serialize_with = "relationship_name")]
    pub relationship: Relationship,
    pub strategy: &'static str,
    pub points_a: usize,
    pub points_b: usize,
    pub unique_a: usize,
    pub unique_b: usize,
}

fn relationship_name<S: Serializer>(r: &Relationship, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(r.name())
}

impl Report {
    pub fn build(cmp: &dyn SetComparator, a: &[Point], b: &[Point]) -> Self {
        let relationship = cmp.compare(a, b);
        let report = Self {
            relationship,
            strategy: cmp.name(),
            points_a: a.len(),
            points_b: b.len(),
            unique_a: unique_count(a),
            unique_b: unique_count(b),
        };
        tracing::info!(
            relationship = relationship.name(),
            strategy = report.strategy,
            unique_a = report.unique_a,
            unique_b = report.unique_b,
            "compare"
        );
        report
    }

    /// One line with the relationship name, or a pretty JSON document.
    pub fn write_to<W: Write>(&self, mut out: W, as_json: bool) -> Result<()> {
        if as_json {
            writeln!(out, "{}", serde_json::to_string_pretty(self)?)?;
        } else {
            writeln!(out, "{}", self.relationship.name())?;
        }
        Ok(())
    }
}

/// Process exit status for a relationship; parse/IO failures use `EXIT_INTERNAL_ERROR`.
pub fn exit_status(r: Relationship) -> u8 {
    match r {
        Relationship::Equal => 0,
        Relationship::ASubsetOfB => 1,
        Relationship::BSubsetOfA => 2,
        Relationship::NotEqual => 3,
    }
}

pub const EXIT_INTERNAL_ERROR: u8 = 4;

pub fn version_info() -> Value {
    json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": pointcmp::VERSION,
        "code_rev": current_git_rev(),
    })
}

pub fn current_git_rev() -> String {
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    option_env!("GIT_COMMIT")
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string()
}
