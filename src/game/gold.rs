use crate::models::GoldSample;

/// Sample roughly once per 10 seconds of game time
const SAMPLE_PERIOD_SECS: i64 = 10;

/// Append-only gold differential buffer, scoped to one game session.
///
/// Sampling is time-based rather than tick-based: a sample is taken when the
/// game clock enters the first second of a 10-second window, so polling
/// cadence and jitter change nothing beyond that one-second tolerance.
#[derive(Debug, Default)]
pub struct GoldHistory {
    samples: Vec<GoldSample>,
}

impl GoldHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample if the clock is inside a sampling window and that
    /// window has not been sampled yet. Sub-second polling would otherwise
    /// hit the same window several times.
    pub fn record(&mut self, game_time: f64, blue_gold: i64, red_gold: i64) {
        if game_time <= 0.0 {
            return;
        }

        let whole_seconds = game_time.floor() as i64;
        if whole_seconds % SAMPLE_PERIOD_SECS >= 1 {
            return;
        }

        if self.samples.last().map(|s| s.time) == Some(whole_seconds) {
            return;
        }

        self.samples.push(GoldSample {
            time: whole_seconds,
            blue_gold,
            red_gold,
            diff: blue_gold - red_gold,
        });
    }

    /// Current buffer contents, readable at any time
    pub fn samples(&self) -> &[GoldSample] {
        &self.samples
    }

    /// Clear the buffer; called exactly on game-start detection
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
