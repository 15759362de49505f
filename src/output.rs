//! Thread-safe output protocol shared by every algorithm.
//!
//! `update_solution`/`update_bound`/`algorithm_end` are the only mutation
//! points; all of them serialize through one mutex, so the certificate file
//! on disk always corresponds to the last solution announced, never to an
//! intermediate state.

use crate::graph::Weight;
use crate::time::Timer;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Callback invoked on every accepted improvement. Mirrors the source's
/// `new_solution_callback` hook.
pub type SolutionCallback = Arc<dyn Fn(&[usize], Weight) + Send + Sync>;

/// One JSON event: either a new incumbent or a tightened bound.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    #[serde(rename = "Value", skip_serializing_if = "Option::is_none")]
    pub value: Option<Weight>,
    #[serde(rename = "Bound", skip_serializing_if = "Option::is_none")]
    pub bound: Option<Weight>,
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "String")]
    pub tag: String,
}

/// The `Solution{NumberOfVertices, Feasible, Weight}` object.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionSummary {
    #[serde(rename = "NumberOfVertices")]
    pub number_of_vertices: usize,
    #[serde(rename = "Feasible")]
    pub feasible: bool,
    #[serde(rename = "Weight")]
    pub weight: Weight,
}

/// Full JSON report produced by `algorithm_end`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    #[serde(rename = "Solution")]
    pub solution: SolutionSummary,
    #[serde(rename = "Value")]
    pub value: Weight,
    #[serde(rename = "Bound")]
    pub bound: Weight,
    #[serde(rename = "AbsoluteOptimalityGap")]
    pub absolute_optimality_gap: Weight,
    #[serde(rename = "RelativeOptimalityGap")]
    pub relative_optimality_gap: f64,
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(flatten)]
    pub events: EventLog,
}

/// `Solution1..k` / `Bound1..k` flattened event entries.
#[derive(Debug, Clone, Default)]
pub struct EventLog(pub Vec<Event>);

impl Serialize for EventLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;
        let mut solution_idx = 0usize;
        let mut bound_idx = 0usize;
        for event in &self.0 {
            if event.value.is_some() {
                solution_idx += 1;
                map.serialize_entry(&format!("Solution{solution_idx}"), event)?;
            } else {
                bound_idx += 1;
                map.serialize_entry(&format!("Bound{bound_idx}"), event)?;
            }
        }
        map.end()
    }
}

struct State {
    best_solution: Option<Vec<usize>>,
    best_value: Option<Weight>,
    bound: Option<Weight>,
    generation: u64,
    events: Vec<Event>,
    ended: bool,
}

/// Shared sink for the best-known solution and bound of one solve
/// invocation. Cheap to clone (an `Arc` around a mutex); every worker of a
/// multi-threaded best-first search shares one instance.
#[derive(Clone)]
pub struct Output {
    state: Arc<Mutex<State>>,
    timer: Timer,
    certificate_path: Option<PathBuf>,
    callback: Option<SolutionCallback>,
}

impl Output {
    /// Creates a fresh output with no incumbent and an unbounded bound.
    pub fn new(timer: Timer) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                best_solution: None,
                best_value: None,
                bound: None,
                generation: 0,
                events: Vec::new(),
                ended: false,
            })),
            timer,
            certificate_path: None,
            callback: None,
        }
    }

    /// Attaches a certificate file path: every accepted solution is
    /// persisted there immediately.
    pub fn with_certificate(mut self, path: PathBuf) -> Self {
        self.certificate_path = Some(path);
        self
    }

    /// Attaches a `new_solution_callback` hook.
    pub fn with_callback(mut self, callback: SolutionCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// The shared timer this output was created with.
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Current best known value, if any feasible solution was found.
    pub fn best_value(&self) -> Option<Weight> {
        self.state.lock().unwrap().best_value
    }

    /// Current best known bound (`None` means unbounded / not yet set).
    pub fn bound(&self) -> Option<Weight> {
        self.state.lock().unwrap().bound
    }

    /// Reports a feasible candidate. Accepted iff it strictly improves the
    /// current best value; returns whether it was accepted.
    ///
    /// On acceptance: replaces the incumbent, bumps the generation counter,
    /// persists the certificate (if a path is attached), and invokes the
    /// callback — all while still holding the lock, so a reader of the
    /// certificate file never observes a half-written update.
    pub fn update_solution(&self, candidate: &[usize], weight: Weight, tag: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.best_value.is_some_and(|best| weight <= best) {
            return false;
        }
        state.best_solution = Some(candidate.to_vec());
        state.best_value = Some(weight);
        state.generation += 1;
        state.events.push(Event {
            value: Some(weight),
            bound: None,
            time: self.timer.elapsed().as_secs_f64(),
            tag: tag.to_string(),
        });
        if let Some(path) = &self.certificate_path {
            if let Err(err) = write_certificate(path, candidate) {
                tracing::warn!(?err, "failed to persist certificate");
            }
        }
        tracing::info!(weight, tag, "new incumbent");
        if let Some(callback) = &self.callback {
            callback(candidate, weight);
        }
        true
    }

    /// Reports a tightened upper bound. Accepted iff it is strictly below
    /// the current bound (or no bound was set yet).
    pub fn update_bound(&self, new_bound: Weight, tag: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.bound.is_some_and(|bound| new_bound >= bound) {
            return false;
        }
        state.bound = Some(new_bound);
        state.events.push(Event {
            value: None,
            bound: Some(new_bound),
            time: self.timer.elapsed().as_secs_f64(),
            tag: tag.to_string(),
        });
        tracing::info!(bound = new_bound, tag, "tightened bound");
        true
    }

    /// Freezes the output and builds the final summary. Idempotent.
    pub fn algorithm_end(&self, number_of_vertices: usize) -> JsonOutput {
        let mut state = self.state.lock().unwrap();
        state.ended = true;
        let feasible = state.best_solution.is_some();
        let value = state.best_value.unwrap_or(0);
        let bound = state.bound.unwrap_or(value);
        let summary = JsonOutput {
            solution: SolutionSummary {
                number_of_vertices,
                feasible,
                weight: value,
            },
            value,
            bound,
            absolute_optimality_gap: (bound - value).abs(),
            relative_optimality_gap: if value != 0 {
                (bound - value).abs() as f64 / value.abs() as f64
            } else {
                0.0
            },
            time: self.timer.elapsed().as_secs_f64(),
            events: EventLog(state.events.clone()),
        };
        tracing::info!(
            value,
            bound,
            optimal = feasible && value == bound,
            "algorithm end"
        );
        summary
    }

    /// Current best solution as a vertex id list, if any.
    pub fn best_solution(&self) -> Option<Vec<usize>> {
        self.state.lock().unwrap().best_solution.clone()
    }
}

impl JsonOutput {
    /// Whether the reported solution is proven optimal.
    pub fn optimal(&self) -> bool {
        self.solution.feasible && self.value == self.bound
    }
}

/// Writes the plain-text certificate: whitespace-separated 0-indexed vertex
/// ids, newline-terminated.
fn write_certificate(path: &PathBuf, vertices: &[usize]) -> io::Result<()> {
    let mut text = vertices
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    text.push('\n');
    // Certificates are written atomically-ish via a temp file + rename so a
    // fatal error elsewhere never leaves a half-written certificate on disk.
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[allow(dead_code)]
fn duration_to_secs(d: Duration) -> f64 {
    d.as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_strict_improvements_are_accepted() {
        let output = Output::new(Timer::new(None));
        assert!(output.update_solution(&[0, 1], 5, "greedy"));
        assert!(!output.update_solution(&[1], 3, "worse"));
        assert!(output.update_solution(&[0, 1, 2], 8, "better"));
        assert_eq!(output.best_value(), Some(8));
    }

    #[test]
    fn bound_only_tightens() {
        let output = Output::new(Timer::new(None));
        assert!(output.update_bound(100, "initial"));
        assert!(!output.update_bound(120, "looser"));
        assert!(output.update_bound(90, "tighter"));
        assert_eq!(output.bound(), Some(90));
    }

    #[test]
    fn optimal_iff_value_equals_bound() {
        let output = Output::new(Timer::new(None));
        output.update_solution(&[0], 4, "greedy");
        output.update_bound(4, "core");
        let summary = output.algorithm_end(1);
        assert!(summary.optimal());
    }

    #[test]
    fn infeasible_run_reports_not_optimal() {
        let output = Output::new(Timer::new(None));
        output.update_bound(10, "core");
        let summary = output.algorithm_end(5);
        assert!(!summary.optimal());
        assert!(!summary.solution.feasible);
    }

    #[test]
    fn callback_fires_on_improvement_only() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let output = Output::new(Timer::new(None))
            .with_callback(Arc::new(move |_sol, _w| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            }));
        output.update_solution(&[0], 1, "a");
        output.update_solution(&[0], 1, "a-again");
        output.update_solution(&[0, 1], 2, "b");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
