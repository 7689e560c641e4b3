use chrono::{DateTime, Utc};
use comfy_table::{ContentArrangement, Table, presets};

use nodescope_types::{ClusterSnapshot, DisplayOptions, NodeRecord, OperatorInfo, VersionInfo};

use crate::status::{age_cell, cpu_cell, memory_cell, role_label, status_string};
use crate::symbols::{SYM_DEGRADED, SYM_NOT_READY, SYM_PENDING, SYM_UNKNOWN_NODE, SYM_VERSION, legend};

/// One report: a sorted snapshot plus its optional trailer blocks,
/// rendered as text for stdout.
///
/// The snapshot is sorted once at construction and never mutated again;
/// the report also pins its own timestamp, so repeated renders produce
/// byte-identical output.
pub struct Report {
    snapshot: ClusterSnapshot,
    version: Option<VersionInfo>,
    operators: Vec<OperatorInfo>,
    options: DisplayOptions,
    generated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(mut snapshot: ClusterSnapshot, options: DisplayOptions) -> Self {
        snapshot.sort_by_role();
        Self {
            snapshot,
            version: None,
            operators: Vec::new(),
            options,
            generated_at: Utc::now(),
        }
    }

    pub fn with_version(mut self, version: VersionInfo) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_operators(mut self, operators: Vec<OperatorInfo>) -> Self {
        self.operators = operators;
        self
    }

    /// Pin the report time; node ages are computed against it.
    pub fn generated_at(mut self, when: DateTime<Utc>) -> Self {
        self.generated_at = when;
        self
    }

    /// Render the full report: node table, version line, unhealthy
    /// operators, and the legend when requested.
    pub fn render(&self) -> String {
        let mut out = self.render_table();
        if self.options.show_version {
            if let Some(line) = self.version_line() {
                out.push_str(&line);
                out.push('\n');
            }
        }
        if self.options.show_operators {
            if let Some(block) = self.operators_block() {
                out.push_str(&block);
            }
        }
        if self.options.show_keys {
            out.push('\n');
            out.push_str(&legend());
        }
        out
    }

    fn render_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![" ", "NODE", "MACHINE", "ROLE", "AGE", "STATUS"];
        if self.options.show_usage {
            header.push("CPU");
            header.push("MEMORY");
        }
        table.set_header(header);

        for record in self.snapshot.records() {
            table.add_row(self.record_row(record));
        }

        // Footer row closing off the table body.
        table.add_row(vec![String::new()]);

        let mut out = table.to_string();
        out.push('\n');
        out
    }

    fn record_row(&self, record: &NodeRecord) -> Vec<String> {
        let mut row = Vec::new();

        row.push(if record.ready {
            String::new()
        } else {
            SYM_NOT_READY.to_string()
        });

        row.push(if record.node_name.is_empty() {
            SYM_UNKNOWN_NODE.to_string()
        } else {
            record.node_name.clone()
        });

        row.push(record.machine_name.clone());
        row.push(role_label(&record.roles));
        row.push(age_cell(record.created, self.generated_at));
        row.push(status_string(record));

        if self.options.show_usage {
            row.push(record.cpu.as_ref().map(cpu_cell).unwrap_or_default());
            row.push(record.memory.as_ref().map(memory_cell).unwrap_or_default());
        }

        row
    }

    fn version_line(&self) -> Option<String> {
        let version = self.version.as_ref()?;
        let mut line = format!(" {SYM_VERSION} Version: ");
        if let Some(current) = version.current() {
            line.push_str(current);
        }
        if let Some(pending) = version.pending() {
            line.push_str(&format!("  {SYM_PENDING}  {pending}"));
        }
        Some(line)
    }

    fn operators_block(&self) -> Option<String> {
        let mut report = String::new();
        for operator in &self.operators {
            for condition in &operator.conditions {
                if condition.condition_type == "Available" && condition.status == "False" {
                    report.push_str(&format!(" {SYM_NOT_READY} {} (down)\n", operator.name));
                    break;
                }
                if condition.condition_type == "Degraded" && condition.status == "True" {
                    report.push_str(&format!(" {SYM_DEGRADED} {} (degraded)\n", operator.name));
                }
            }
        }
        if report.is_empty() {
            return None;
        }
        Some(format!(" Unhealthy Cluster Operators:\n{report}"))
    }
}
