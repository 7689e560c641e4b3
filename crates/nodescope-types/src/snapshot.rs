use std::collections::HashMap;

use crate::{NodeRecord, RecordError};

/// In-memory aggregate of merged node records for one report.
///
/// Records live in insertion-ordered storage; two non-owning index maps
/// (by node name and by machine name) point into it, so a lookup by
/// either name lands on the same record.
#[derive(Clone, Debug, Default)]
pub struct ClusterSnapshot {
    records: Vec<NodeRecord>,
    by_node: HashMap<String, usize>,
    by_machine: HashMap<String, usize>,
}

impl ClusterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in their current order.
    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    /// Look up a record by node name or machine name.
    pub fn get(&self, name: &str) -> Option<&NodeRecord> {
        self.index_of(name).map(|idx| &self.records[idx])
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.by_node
            .get(name)
            .or_else(|| self.by_machine.get(name))
            .copied()
    }

    /// Insert a record as a new entry.
    ///
    /// Node extraction runs before machine extraction, so node-derived
    /// records always arrive here.
    pub fn insert(&mut self, record: NodeRecord) -> Result<(), RecordError> {
        if !record.has_identity() {
            return Err(RecordError::MissingIdentity);
        }
        let idx = self.records.len();
        if !record.node_name.is_empty() {
            self.by_node.insert(record.node_name.clone(), idx);
        }
        if !record.machine_name.is_empty() {
            self.by_machine.insert(record.machine_name.clone(), idx);
        }
        self.records.push(record);
        Ok(())
    }

    /// Fold a machine-derived record into the snapshot.
    ///
    /// A machine with no bound node becomes a standalone entry. A machine
    /// whose node is present contributes only its phase; every
    /// node-sourced field stays authoritative. A machine naming a node
    /// that was never pulled is dropped.
    pub fn merge_machine(&mut self, record: NodeRecord) -> Result<(), RecordError> {
        if record.node_name.is_empty() {
            let mut record = record;
            record.missing = true;
            return self.insert(record);
        }
        if let Some(&idx) = self.by_node.get(record.node_name.as_str()) {
            self.records[idx].machine_phase = record.machine_phase;
        }
        Ok(())
    }

    /// Attach usage readings to an already-merged record.
    ///
    /// Unknown names are skipped, and utilization is only ever attached
    /// where allocatable data is already present.
    pub fn apply_usage(&mut self, name: &str, cpu_millis: i64, memory_bytes: i64) {
        let Some(idx) = self.index_of(name) else {
            return;
        };
        let record = &mut self.records[idx];
        if let Some(cpu) = record.cpu.as_mut() {
            cpu.utilization = Some(cpu_millis);
        }
        if let Some(memory) = record.memory.as_mut() {
            memory.utilization = Some(memory_bytes);
        }
    }

    /// Stable-sort records by their leading role: master, infra, worker,
    /// then everything else. Ties keep their relative input order.
    pub fn sort_by_role(&mut self) {
        self.records
            .sort_by_key(|r| role_sort_order(r.roles.first().map(String::as_str)));
        self.reindex();
    }

    fn reindex(&mut self) {
        self.by_node.clear();
        self.by_machine.clear();
        for (idx, record) in self.records.iter().enumerate() {
            if !record.node_name.is_empty() {
                self.by_node.insert(record.node_name.clone(), idx);
            }
            if !record.machine_name.is_empty() {
                self.by_machine.insert(record.machine_name.clone(), idx);
            }
        }
    }
}

fn role_sort_order(role: Option<&str>) -> u8 {
    match role {
        Some("master") => 0,
        Some("infra") => 1,
        Some("worker") => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceMetric;

    fn node_record(name: &str, roles: &[&str]) -> NodeRecord {
        NodeRecord {
            node_name: name.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ..NodeRecord::default()
        }
    }

    fn machine_record(machine: &str, node: &str, phase: &str) -> NodeRecord {
        NodeRecord {
            machine_name: machine.to_string(),
            node_name: node.to_string(),
            machine_phase: phase.to_string(),
            ..NodeRecord::default()
        }
    }

    fn snapshot_of(records: Vec<NodeRecord>) -> ClusterSnapshot {
        let mut snapshot = ClusterSnapshot::new();
        for record in records {
            snapshot.insert(record).unwrap();
        }
        snapshot
    }

    #[test]
    fn test_insert_requires_identity() {
        let mut snapshot = ClusterSnapshot::new();
        assert_eq!(
            snapshot.insert(NodeRecord::default()),
            Err(RecordError::MissingIdentity)
        );
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_get_by_either_name() {
        let mut record = node_record("node-a", &["worker"]);
        record.machine_name = "machine-a".to_string();
        let snapshot = snapshot_of(vec![record]);

        let by_node = snapshot.get("node-a").unwrap();
        let by_machine = snapshot.get("machine-a").unwrap();
        assert_eq!(by_node, by_machine);
        assert!(snapshot.get("").is_none());
        assert!(snapshot.get("nope").is_none());
    }

    #[test]
    fn test_merge_machine_without_node_is_standalone() {
        let mut snapshot = snapshot_of(vec![node_record("node-a", &[])]);
        snapshot
            .merge_machine(machine_record("machine-b", "", "Provisioning"))
            .unwrap();

        assert_eq!(snapshot.len(), 2);
        let standalone = snapshot.get("machine-b").unwrap();
        assert!(standalone.missing);
        assert_eq!(standalone.machine_phase, "Provisioning");
    }

    #[test]
    fn test_merge_machine_sets_phase_only() {
        let full = NodeRecord {
            node_name: "node-a".to_string(),
            machine_name: "machine-a".to_string(),
            internal_ip: "10.0.0.1".to_string(),
            roles: vec!["worker".to_string()],
            ready: true,
            cordoned: true,
            updating: true,
            cpu: Some(ResourceMetric::new(4000)),
            memory: Some(ResourceMetric::new(1 << 34)),
            ..NodeRecord::default()
        };
        let mut snapshot = snapshot_of(vec![full.clone()]);

        snapshot
            .merge_machine(machine_record("machine-a", "node-a", "Deleting"))
            .unwrap();

        let mut expected = full;
        expected.machine_phase = "Deleting".to_string();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("node-a").unwrap(), &expected);
    }

    #[test]
    fn test_merge_machine_unknown_node_is_dropped() {
        let mut snapshot = snapshot_of(vec![node_record("node-a", &[])]);
        let before = snapshot.records().to_vec();

        snapshot
            .merge_machine(machine_record("machine-x", "node-gone", "Failed"))
            .unwrap();

        assert_eq!(snapshot.records(), before.as_slice());
    }

    #[test]
    fn test_merge_sizes_with_disjoint_names() {
        let mut snapshot = snapshot_of(vec![
            node_record("node-a", &[]),
            node_record("node-b", &[]),
            node_record("node-c", &[]),
        ]);

        // One bound, one unbound, one dangling reference.
        snapshot
            .merge_machine(machine_record("machine-a", "node-a", "Running"))
            .unwrap();
        snapshot
            .merge_machine(machine_record("machine-d", "", "Provisioning"))
            .unwrap();
        snapshot
            .merge_machine(machine_record("machine-e", "node-z", "Running"))
            .unwrap();

        assert_eq!(snapshot.len(), 4);
    }

    #[test]
    fn test_apply_usage_unknown_node_is_ignored() {
        let mut snapshot = snapshot_of(vec![node_record("node-a", &[])]);
        let before = snapshot.records().to_vec();

        snapshot.apply_usage("node-z", 100, 200);

        assert_eq!(snapshot.records(), before.as_slice());
    }

    #[test]
    fn test_apply_usage_requires_allocatable() {
        let mut with_metrics = node_record("node-a", &[]);
        with_metrics.cpu = Some(ResourceMetric::new(4000));
        with_metrics.memory = Some(ResourceMetric::new(1 << 34));
        let mut snapshot = snapshot_of(vec![with_metrics, node_record("node-b", &[])]);

        snapshot.apply_usage("node-a", 1500, 1 << 33);
        snapshot.apply_usage("node-b", 1500, 1 << 33);

        let annotated = snapshot.get("node-a").unwrap();
        assert_eq!(annotated.cpu.unwrap().utilization, Some(1500));
        assert_eq!(annotated.memory.unwrap().utilization, Some(1 << 33));

        // No allocatable data, nothing to attach to.
        let bare = snapshot.get("node-b").unwrap();
        assert!(bare.cpu.is_none());
        assert!(bare.memory.is_none());
    }

    #[test]
    fn test_sort_by_role_orders_master_infra_worker() {
        let mut snapshot = snapshot_of(vec![
            node_record("w", &["worker"]),
            node_record("m", &["master"]),
            node_record("i", &["infra"]),
        ]);
        snapshot.sort_by_role();

        let order: Vec<&str> = snapshot
            .records()
            .iter()
            .map(|r| r.node_name.as_str())
            .collect();
        assert_eq!(order, ["m", "i", "w"]);
    }

    #[test]
    fn test_sort_by_role_unknown_roles_last() {
        let mut snapshot = snapshot_of(vec![
            node_record("i", &["infra"]),
            node_record("m", &["master"]),
            node_record("x", &["nothing"]),
            node_record("w", &["worker"]),
        ]);
        snapshot.sort_by_role();

        let order: Vec<&str> = snapshot
            .records()
            .iter()
            .map(|r| r.node_name.as_str())
            .collect();
        assert_eq!(order, ["m", "i", "w", "x"]);
    }

    #[test]
    fn test_sort_by_role_is_stable() {
        let mut snapshot = snapshot_of(vec![
            node_record("i1", &["infra"]),
            node_record("m1", &["master"]),
            node_record("i2", &["infra"]),
            node_record("m2", &["master"]),
        ]);
        snapshot.sort_by_role();

        let order: Vec<&str> = snapshot
            .records()
            .iter()
            .map(|r| r.node_name.as_str())
            .collect();
        assert_eq!(order, ["m1", "m2", "i1", "i2"]);
    }

    #[test]
    fn test_sort_by_role_empty_roles_last_in_input_order() {
        let mut snapshot = snapshot_of(vec![
            node_record("e1", &[]),
            node_record("i", &["infra"]),
            node_record("e2", &[]),
            node_record("m", &["master"]),
        ]);
        snapshot.sort_by_role();

        let order: Vec<&str> = snapshot
            .records()
            .iter()
            .map(|r| r.node_name.as_str())
            .collect();
        assert_eq!(order, ["m", "i", "e1", "e2"]);
    }

    #[test]
    fn test_lookup_survives_sorting() {
        let mut snapshot = snapshot_of(vec![
            node_record("w", &["worker"]),
            node_record("m", &["master"]),
        ]);
        snapshot.sort_by_role();

        assert_eq!(snapshot.get("w").unwrap().node_name, "w");
        assert_eq!(snapshot.get("m").unwrap().node_name, "m");
    }
}
