use serde::Serialize;
use std::time::Duration;


#[derive(Debug, Clone)]
pub struct AlertParams {
    pub window: Duration,
    /// Hits per second.
    pub threshold: f64,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertState {
    Green,
    Red,
}

/// A RED or GREEN transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub state: AlertState,
    pub ts: i64,
    pub rate: f64,
    pub threshold: f64,
    pub total_hits: u64,
    pub window_secs: f64,
}

/// Edge-triggered high-traffic alert over the averaged hit rate of the retention window.
#[derive(Debug, Clone)]
pub struct AlertMonitor {
    params: AlertParams,
    state: AlertState,
}

impl AlertMonitor {
    pub fn new(params: AlertParams) -> Self {
        Self {
            params,
            state: AlertState::Green,
        }
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn params(&self) -> &AlertParams {
        &self.params
    }

    pub fn rate(&self, running_hits: u64) -> f64 {
        running_hits as f64 / self.params.window.as_secs_f64()
    }

    /// Re-evaluate against the current running total. Only a state change yields an event.
    pub fn evaluate(&mut self, ts: i64, running_hits: u64) -> Option<AlertEvent> {
        let rate = self.rate(running_hits);

        let next = match self.state {
            AlertState::Green if rate > self.params.threshold => AlertState::Red,
            AlertState::Red if rate <= self.params.threshold => AlertState::Green,
            _ => return None,
        };
        self.state = next;

        tracing::info!(
            state = ?next,
            ts,
            rate,
            threshold = self.params.threshold,
            total_hits = running_hits,
            "alert state changed"
        );

        Some(AlertEvent {
            state: next,
            ts,
            rate,
            threshold: self.params.threshold,
            total_hits: running_hits,
            window_secs: self.params.window.as_secs_f64(),
        })
    }
}
