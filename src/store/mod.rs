//! # Dataset and Run Store
//!
//! [`ModelStore`] owns the six measurement tables and the list of
//! optimization runs. It is an ordinary value handed by reference to
//! whatever needs it; the process-wide singleton of the browser tool has
//! no equivalent here. Construction, seeding and reset are plain
//! lifecycle calls.

use log::{debug, info};
use uuid::Uuid;

use crate::model::{AntennaParameters, DatasetKey, Run, Substrate, SweepTable};

/// In-memory collection of measurement tables and runs.
///
/// Every [`DatasetKey`] always has a table; lookups never fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelStore {
    datasets: [SweepTable; 6],
    runs: Vec<Run>,
}

impl ModelStore {
    /// A store with anchor-seeded tables and no runs
    pub fn new() -> Self {
        Self {
            datasets: std::array::from_fn(|_| SweepTable::new()),
            runs: Vec::new(),
        }
    }

    /// A store seeded with the two stock configurations the tool ships
    /// with: "Jeans Config" and "Felt Config", both with the widened
    /// outer ring (w1 = 4.28 mm).
    pub fn with_default_runs() -> Self {
        let mut store = Self::new();

        let jeans = store.add_run();
        jeans.name = "Jeans Config".to_string();
        jeans.parameters = AntennaParameters {
            substrate: Substrate::Jeans,
            w1: 4.28,
            ..Default::default()
        };

        let felt = store.add_run();
        felt.name = "Felt Config".to_string();
        felt.parameters = AntennaParameters {
            w1: 4.28,
            ..Default::default()
        };

        store
    }

    /// Table for one dataset bucket
    pub fn dataset(&self, key: DatasetKey) -> &SweepTable {
        &self.datasets[key.index()]
    }

    /// Mutable table for one dataset bucket
    pub fn dataset_mut(&mut self, key: DatasetKey) -> &mut SweepTable {
        &mut self.datasets[key.index()]
    }

    /// All runs in creation order
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Append a new run named `Run N` and return it
    pub fn add_run(&mut self) -> &mut Run {
        let name = format!("Run {}", self.runs.len() + 1);
        debug!("adding run {name}");
        self.runs.push(Run::new(name));
        // Just pushed, so the list is non-empty.
        let index = self.runs.len() - 1;
        &mut self.runs[index]
    }

    /// Remove the run with the given id; returns whether it existed
    pub fn delete_run(&mut self, id: Uuid) -> bool {
        let before = self.runs.len();
        self.runs.retain(|run| run.id != id);
        before != self.runs.len()
    }

    /// Run by id
    pub fn run(&self, id: Uuid) -> Option<&Run> {
        self.runs.iter().find(|run| run.id == id)
    }

    /// Mutable run by id
    pub fn run_mut(&mut self, id: Uuid) -> Option<&mut Run> {
        self.runs.iter_mut().find(|run| run.id == id)
    }

    /// Replace the whole run list (snapshot restore)
    pub fn replace_runs(&mut self, runs: Vec<Run>) {
        info!("replacing {} run(s) with {}", self.runs.len(), runs.len());
        self.runs = runs;
    }

    /// Empty every dataset table, keeping the runs
    pub fn clear_all_data(&mut self) {
        info!("clearing all dataset tables");
        for table in &mut self.datasets {
            table.rows.clear();
        }
    }
}

impl Default for ModelStore {
    fn default() -> Self {
        Self::new()
    }
}
