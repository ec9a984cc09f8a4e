use super::config::KpiConfig;

/// Caller-owned undo/redo stack for KPI configuration edits.
///
/// Holds immutable snapshots and a cursor to the current one. Recording a new
/// snapshot after an undo drops everything past the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigHistory {
    snapshots: Vec<KpiConfig>,
    cursor: usize,
}

impl ConfigHistory {
    pub fn new(initial: KpiConfig) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &KpiConfig {
        &self.snapshots[self.cursor]
    }

    /// Pushes `config` as the new current snapshot. Recording a value equal to
    /// the current snapshot is a no-op.
    pub fn record(&mut self, config: KpiConfig) {
        if *self.current() == config {
            return;
        }

        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(config);
        self.cursor += 1;
    }

    pub fn undo(&mut self) -> Option<&KpiConfig> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&KpiConfig> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}

impl Default for ConfigHistory {
    fn default() -> Self {
        Self::new(KpiConfig::default())
    }
}
