use chrono::{DateTime, Utc};

use nodescope_types::{NodeRecord, ResourceMetric};

use crate::symbols::{
    SYM_CORDONED, SYM_DELETING, SYM_DISK_PRESSURE, SYM_FAILED, SYM_HOT, SYM_INFRA, SYM_MASTER,
    SYM_MEMORY_PRESSURE, SYM_PROVISIONING, SYM_UPDATING, SYM_WORKER,
};

/// Utilization percentage above which a resource gets the hot marker.
const HOT_THRESHOLD: f64 = 90.0;

/// Compact condition string for one record: updating, cordoned, machine
/// phase, memory pressure, disk pressure, in that fixed order. Empty
/// when no condition applies.
pub fn status_string(record: &NodeRecord) -> String {
    let mut status = String::new();
    if record.updating {
        status.push(SYM_UPDATING);
    }
    if record.cordoned {
        status.push(SYM_CORDONED);
    }
    match record.machine_phase.as_str() {
        "Failed" => status.push(SYM_FAILED),
        "Deleting" => status.push(SYM_DELETING),
        "Provisioned" | "Provisioning" => status.push(SYM_PROVISIONING),
        _ => {}
    }
    if record.memory_pressure {
        status.push(SYM_MEMORY_PRESSURE);
    }
    if record.disk_pressure {
        status.push(SYM_DISK_PRESSURE);
    }
    status
}

/// Human-friendly label for the highest-priority role present, "-" when
/// the record has none.
pub fn role_label(roles: &[String]) -> String {
    if roles.is_empty() {
        return "-".to_string();
    }
    if roles.iter().any(|r| r == "master") {
        return format!("{SYM_MASTER}  master");
    }
    if roles.iter().any(|r| r == "infra") {
        return format!("{SYM_INFRA} infra");
    }
    if roles.iter().any(|r| r == "worker") {
        return format!("{SYM_WORKER} worker");
    }
    roles[0].clone()
}

/// CPU cell: "{millicores}m ({pct}%)", hot-marked above the threshold.
/// Empty until usage has been annotated.
pub fn cpu_cell(metric: &ResourceMetric) -> String {
    match metric.utilization {
        Some(used) => with_percent(format!("{used}m"), metric),
        None => String::new(),
    }
}

/// Memory cell: "{mebibytes}Mi ({pct}%)", hot-marked above the threshold.
/// Empty until usage has been annotated.
pub fn memory_cell(metric: &ResourceMetric) -> String {
    match metric.utilization {
        Some(used) => with_percent(format!("{}Mi", used >> 20), metric),
        None => String::new(),
    }
}

/// Append the percentage when it is defined. Allocatable zero leaves the
/// bare value rather than dividing.
fn with_percent(value: String, metric: &ResourceMetric) -> String {
    match metric.percent() {
        Some(pct) => {
            let mut cell = format!("{} ({}%)", value, pct as i64);
            if pct > HOT_THRESHOLD {
                cell.push(SYM_HOT);
            }
            cell
        }
        None => value,
    }
}

/// Compact age in the largest applicable units, kubectl style.
pub fn age_cell(created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created) = created else {
        return String::new();
    };
    let secs = (now - created).num_seconds().max(0);
    let days = secs / 86_400;
    let hours = secs % 86_400 / 3_600;
    let minutes = secs % 3_600 / 60;
    if days > 0 {
        format!("{days}d{hours}h")
    } else if hours > 0 {
        format!("{hours}h{minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{secs}s")
    }
}
