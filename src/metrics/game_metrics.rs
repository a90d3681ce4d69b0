use std::time::{Duration, Instant};

use crate::game::{FoodKind, TickReport};

/// Session counters shown next to the field. Nothing here outlives the process.
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub rounds_finished: u32,
    pub apples_eaten: u32,
    pub golden_apples_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            rounds_finished: 0,
            apples_eaten: 0,
            golden_apples_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.round_start.elapsed();
    }

    /// Track the score while it is live, so the best score survives a restart
    pub fn observe_score(&mut self, score: u32) {
        self.high_score = self.high_score.max(score);
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_round_end(&mut self, final_score: u32) {
        self.rounds_finished += 1;
        self.observe_score(final_score);
        self.on_round_start();
    }

    pub fn record_tick(&mut self, report: &TickReport) {
        for kind in &report.eaten {
            match kind {
                FoodKind::Regular => self.apples_eaten += 1,
                FoodKind::Golden => self.golden_apples_eaten += 1,
            }
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
