use serde::Serialize;
use std::collections::VecDeque;

/// Samples kept for the trend series; the visible recent list shows fewer.
pub const SERIES_WINDOW: usize = 20;
pub const RECENT_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PulseZone {
    Low,
    Normal,
    High,
}

pub fn pulse_zone(bpm: u32) -> PulseZone {
    if bpm < 60 {
        PulseZone::Low
    } else if bpm <= 100 {
        PulseZone::Normal
    } else {
        PulseZone::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PulseSample {
    pub bpm: u32,
    pub at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PulseStatus {
    Idle,
    Receiving,
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseView {
    pub latest_bpm: Option<u32>,
    pub zone: Option<PulseZone>,
    pub recent: Vec<PulseSample>,
    pub series: Vec<u32>,
    pub status: PulseStatus,
}

/// Rolling window over decoded heart-rate samples. The transport that
/// produces them is someone else's problem; this only consumes
/// `on_sample(bpm)` notifications and a failure signal.
#[derive(Debug)]
pub struct PulseMonitor {
    samples: VecDeque<PulseSample>,
    status: PulseStatus,
}

impl PulseMonitor {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(SERIES_WINDOW),
            status: PulseStatus::Idle,
        }
    }

    pub fn on_sample(&mut self, bpm: u32, at_ms: i64) {
        if self.samples.len() == SERIES_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(PulseSample { bpm, at: at_ms });
        self.status = PulseStatus::Receiving;
    }

    /// Records a peripheral failure. Existing samples stay visible so the
    /// feature degrades instead of disappearing.
    pub fn mark_unavailable(&mut self, reason: impl Into<String>) {
        self.status = PulseStatus::Unavailable {
            reason: reason.into(),
        };
    }

    pub fn view(&self) -> PulseView {
        let latest = self.samples.back().copied();
        PulseView {
            latest_bpm: latest.map(|sample| sample.bpm),
            zone: latest.map(|sample| pulse_zone(sample.bpm)),
            recent: self
                .samples
                .iter()
                .rev()
                .take(RECENT_WINDOW)
                .copied()
                .collect(),
            series: self.samples.iter().map(|sample| sample.bpm).collect(),
            status: self.status.clone(),
        }
    }
}

impl Default for PulseMonitor {
    fn default() -> Self {
        Self::new()
    }
}
