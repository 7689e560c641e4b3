//! Symbol vocabulary for the rendered report.

pub const SYM_NOT_READY: char = '🚨';
pub const SYM_UNKNOWN_NODE: char = '❓';
pub const SYM_UPDATING: char = '🔧';
pub const SYM_CORDONED: char = '🚧';
pub const SYM_FAILED: char = '❌';
pub const SYM_DELETING: char = '🗑';
pub const SYM_PROVISIONING: char = '⬆';
pub const SYM_MEMORY_PRESSURE: char = '💥';
pub const SYM_DISK_PRESSURE: char = '💾';
pub const SYM_HOT: char = '🔥';
pub const SYM_MASTER: char = '🏛';
pub const SYM_INFRA: char = '🧱';
pub const SYM_WORKER: char = '👷';
pub const SYM_VERSION: char = '⚙';
pub const SYM_PENDING: char = '🔜';
pub const SYM_DEGRADED: char = '⚠';

/// Legend block explaining every symbol, emitted on request.
pub fn legend() -> String {
    format!(
        "{SYM_MASTER}  Master Node\t\t{SYM_INFRA}  Infra Node\t\t{SYM_WORKER}  Worker Node\t\t\
         {SYM_UNKNOWN_NODE}  Missing Node\t{SYM_NOT_READY}  Not Ready\n\
         {SYM_CORDONED}  Cordoned\t\t{SYM_UPDATING}  Updating\t\t{SYM_FAILED}  Failed\t\t\
         {SYM_DELETING}  Deleting\t\t{SYM_PROVISIONING}  Provisioning\n\
         {SYM_DISK_PRESSURE}  Disk Pressure\t{SYM_MEMORY_PRESSURE}  Memory Pressure\t\
         {SYM_HOT}  Resource is hot\n"
    )
}
