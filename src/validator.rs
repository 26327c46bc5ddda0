//! # State Validation
//!
//! Consistency checks over a [`ModelStore`]: geometry sanity for every
//! run, value sanity for every dataset table, and re-parseability of
//! stored raw input. Produces a [`StateReport`] that renders plain or
//! colorized (with the `colorized_output` feature).

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::model::{validate_amplitude, validate_glucose, DatasetKey, Run};
use crate::parser;
use crate::store::ModelStore;

/// Outcome of a single check
#[derive(Debug, Clone)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed but something looks unfinished
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// One named check result
#[derive(Debug, Clone)]
pub struct StateCheck {
    /// What was checked, e.g. `dataset felt_2_ring`
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
}

impl StateCheck {
    fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Complete validation report for a store
#[derive(Debug)]
pub struct StateReport {
    /// Individual check results
    pub checks: Vec<StateCheck>,
    /// What was validated (a state file path, usually)
    pub subject: String,
}

impl StateReport {
    /// Empty report for the given subject
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            subject: subject.into(),
        }
    }

    /// Whether any check failed
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Whether any check produced a warning
    pub fn has_warnings(&self) -> bool {
        self.checks
            .iter()
            .any(|c| matches!(c.status, CheckStatus::Warning(_)))
    }

    /// Number of passing checks
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Warning(_)))
            .count()
    }

    /// Number of failures
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Format with colors when the `colorized_output` feature is on
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();

            output.push_str(&format!(
                "{}\n",
                style("State Validation Report").bold().cyan()
            ));
            output.push_str(&format!("{}\n", style("=======================").cyan()));
            output.push_str(&format!(
                "{}: {}\n\n",
                style("Subject").bold(),
                self.subject
            ));

            for check in &self.checks {
                let (symbol, color_fn): (_, fn(&str) -> console::StyledObject<&str>) =
                    match &check.status {
                        CheckStatus::Ok => (OK, |s| style(s).green()),
                        CheckStatus::Warning(_) => (WARN, |s| style(s).yellow()),
                        CheckStatus::Failed(_) => (FAIL, |s| style(s).red()),
                    };

                output.push_str(&format!("[{}] {}", symbol, color_fn(&check.name)));

                match &check.status {
                    CheckStatus::Ok => output.push('\n'),
                    CheckStatus::Warning(msg) => {
                        output.push_str(&format!(
                            " - {}: {}\n",
                            style("WARNING").yellow().bold(),
                            msg
                        ));
                    }
                    CheckStatus::Failed(msg) => {
                        output.push_str(&format!(
                            " - {}: {}\n",
                            style("FAILED").red().bold(),
                            msg
                        ));
                    }
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} passed, {} warnings, {} failed\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }

    fn add_table_check(&mut self, key: DatasetKey, store: &ModelStore) {
        let name = format!("dataset {key}");
        let table = store.dataset(key);

        if table.rows.is_empty() {
            self.checks
                .push(StateCheck::warning(name, "table has no rows"));
            return;
        }

        let mut unfilled = 0usize;
        for (i, row) in table.rows.iter().enumerate() {
            if validate_glucose(row.glucose).is_err() {
                self.checks.push(StateCheck::failed(
                    name,
                    format!("row {i}: invalid glucose level {}", row.glucose),
                ));
                return;
            }
            for sample in [&row.s11, &row.s21] {
                if sample.frequency < 0.0
                    || !sample.frequency.is_finite()
                    || validate_amplitude(sample.amplitude).is_err()
                {
                    self.checks.push(StateCheck::failed(
                        name,
                        format!("row {i}: invalid measured value"),
                    ));
                    return;
                }
                if sample.frequency == 0.0 {
                    unfilled += 1;
                }
            }
        }

        if unfilled > 0 {
            self.checks.push(StateCheck::warning(
                name,
                format!("{unfilled} sample(s) still at 0 GHz"),
            ));
        } else {
            self.checks.push(StateCheck::ok(name));
        }
    }

    fn add_run_check(&mut self, run: &Run) {
        let name = format!("run \"{}\"", run.name);

        if let Err(e) = run.parameters.validate() {
            self.checks.push(StateCheck::failed(name, e.to_string()));
            return;
        }

        if !run.raw_input.trim().is_empty() {
            if let Err(e) = parser::parse(&run.raw_input) {
                self.checks.push(StateCheck::warning(
                    name,
                    format!("stored input no longer parses: {e}"),
                ));
                return;
            }
        }

        self.checks.push(StateCheck::ok(name));
    }
}

impl fmt::Display for StateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "State Validation Report")?;
        writeln!(f, "=======================")?;
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f)?;

        for check in &self.checks {
            let symbol = match &check.status {
                CheckStatus::Ok => "✓",
                CheckStatus::Warning(_) => "⚠",
                CheckStatus::Failed(_) => "✗",
            };

            write!(f, "[{}] {}", symbol, check.name)?;

            match &check.status {
                CheckStatus::Ok => writeln!(f)?,
                CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                CheckStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )
    }
}

/// Run all consistency checks over a store.
pub fn validate_store(store: &ModelStore, subject: impl Into<String>) -> StateReport {
    let mut report = StateReport::new(subject);

    for key in DatasetKey::ALL {
        report.add_table_check(key, store);
    }
    for run in store.runs() {
        report.add_run_check(run);
    }

    report
}
