//! # LayerKit Replay
//!
//! Replays a JSON script of history actions against a [`LayerStore`] and
//! records what each step did. Scripts look like:
//!
//! ```json
//! {
//!   "maxHistory": 10,
//!   "elements": [{"id": "r1", "type": "rect", "x": 0, "y": 0, "width": 10, "height": 20}],
//!   "steps": [
//!     {"op": "init", "snapshot": {"layers": [...]}},
//!     {"op": "apply", "snapshot": {"layers": [...]}},
//!     {"op": "undo"},
//!     {"op": "redo"},
//!     {"op": "bounds", "selected": ["r1"]}
//!   ]
//! }
//! ```

use layerkit_core::{LayersSnapshot, Result};
use layerkit_designer::{selection_bounds, BoundingBox, Element};
use layerkit_history::{HistoryAction, LayerStore, Outcome, StoreEvent, StoreOptions};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// One scripted step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Init { snapshot: LayersSnapshot },
    Apply { snapshot: LayersSnapshot },
    Undo,
    Redo,
    /// Compute the overlay box for the given ids against the script's elements
    Bounds { selected: Vec<String> },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Apply { .. } => "apply",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Bounds { .. } => "bounds",
        }
    }
}

/// A replay script
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Overrides the configured undo depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_history: Option<usize>,
    #[serde(default)]
    pub elements: Vec<Element>,
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded script {} with {} steps",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }
}

/// What a single step did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub index: usize,
    pub op: &'static str,
    /// Store outcome; `None` for bounds queries
    pub outcome: Option<Outcome>,
    pub revision: Option<u64>,
    pub undo_depth: usize,
    pub redo_depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    /// Validation failure for scripted snapshots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<String>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:<3} {:<6}", self.index, self.op)?;
        if let Some(outcome) = self.outcome {
            write!(f, " {:<14}", outcome.to_string())?;
        }
        match self.revision {
            Some(rev) => write!(f, " rev={}", rev)?,
            None => write!(f, " rev=-")?,
        }
        write!(f, " undo={} redo={}", self.undo_depth, self.redo_depth)?;
        if self.op == "bounds" {
            match &self.bounds {
                Some(b) => write!(
                    f,
                    " bounds=({:.3}, {:.3}, {:.3} x {:.3})",
                    b.x, b.y, b.width, b.height
                )?,
                None => write!(f, " bounds=none")?,
            }
        }
        if let Some(reason) = &self.invalid {
            write!(f, " INVALID: {}", reason)?;
        }
        Ok(())
    }
}

/// Result of a full replay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub final_snapshot: Option<LayersSnapshot>,
}

impl ReplayReport {
    /// Number of scripted snapshots that failed validation
    pub fn invalid_count(&self) -> usize {
        self.steps.iter().filter(|s| s.invalid.is_some()).count()
    }
}

/// Validation failure message for a scripted snapshot, logged as a warning
fn check_snapshot(index: usize, op: &str, snapshot: &LayersSnapshot) -> Option<String> {
    snapshot.validate().err().map(|e| {
        tracing::warn!("Step {} ({}) has an invalid snapshot: {}", index, op, e);
        e.to_string()
    })
}

/// Run `script` against a fresh store built from `options`.
///
/// Invalid snapshots are logged and still dispatched; the store accepts any
/// snapshot it is given.
pub fn run(script: Script, mut options: StoreOptions) -> ReplayReport {
    if let Some(max_history) = script.max_history {
        options.max_history = max_history;
    }

    let store = LayerStore::with_options(options);
    let last_event: Arc<Mutex<Option<StoreEvent>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&last_event);
    store.subscribe(move |event| {
        *sink.lock() = Some(*event);
    });

    let Script {
        elements, steps, ..
    } = script;

    let mut reports = Vec::with_capacity(steps.len());
    for (index, step) in steps.into_iter().enumerate() {
        let op = step.name();
        let mut invalid = None;
        let mut bounds = None;

        let action = match step {
            Step::Init { snapshot } => {
                invalid = check_snapshot(index, op, &snapshot);
                Some(HistoryAction::Init(snapshot))
            }
            Step::Apply { snapshot } => {
                invalid = check_snapshot(index, op, &snapshot);
                Some(HistoryAction::Apply(snapshot))
            }
            Step::Undo => Some(HistoryAction::Undo),
            Step::Redo => Some(HistoryAction::Redo),
            Step::Bounds { selected } => {
                bounds = selection_bounds(&selected, &elements);
                None
            }
        };

        let outcome = action.map(|action| {
            *last_event.lock() = None;
            store.dispatch(action);
            let event = *last_event.lock();
            event.map(|e| e.outcome).unwrap_or(Outcome::NoOp)
        });

        let report = StepReport {
            index,
            op,
            outcome,
            revision: store.get_snapshot().map(|s| s.revision),
            undo_depth: store.undo_depth(),
            redo_depth: store.redo_depth(),
            bounds,
            invalid,
        };
        tracing::debug!("{}", report);
        reports.push(report);
    }

    ReplayReport {
        steps: reports,
        final_snapshot: store.get_snapshot(),
    }
}
