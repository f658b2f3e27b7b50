//! Table formatting for CLI output.

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::asg::FindResult;
use crate::asg::projector::MatchResult;

/// One table row per matched group.
#[derive(Debug, Clone, Tabled)]
struct GroupRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "MIN")]
    min: i32,
    #[tabled(rename = "MAX")]
    max: i32,
    #[tabled(rename = "DESIRED")]
    desired: i32,
    #[tabled(rename = "INSTANCES")]
    instances: usize,
    #[tabled(rename = "HEALTHY")]
    healthy: usize,
    #[tabled(rename = "VIABLE")]
    viable: usize,
}

impl From<&MatchResult> for GroupRow {
    fn from(r: &MatchResult) -> Self {
        Self {
            name: r.name.clone(),
            min: r.min_size,
            max: r.max_size,
            desired: r.desired_capacity,
            instances: r.instance_count(),
            healthy: r.healthy_instances,
            viable: r.viable_instances,
        }
    }
}

/// Render matched groups as a plain table followed by a count line.
pub fn render_table(result: &FindResult) -> String {
    let rows: Vec<GroupRow> = result.as_groups.iter().map(GroupRow::from).collect();
    let count = rows.len();

    let mut table = Table::new(rows);
    table.with(Style::blank());

    format!(
        "{}\n\n{} {} Auto Scaling Group(s) matched",
        table,
        "Found".bright_blue().bold(),
        count.to_string().bright_yellow().bold()
    )
}
