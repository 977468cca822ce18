use tracing::debug;

/// Counts generation boundaries reported by the engine.
///
/// The count only ever goes up by one per boundary signal. Callers must
/// invoke [`GenerationTracker::on_boundary`] once per true signal; filtering
/// out non-boundary ticks is their job.
#[derive(Debug, Clone)]
pub struct GenerationTracker {
    count: u64,
    label: String,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self {
            count: 0,
            label: format_generations(0),
        }
    }

    pub fn on_boundary(&mut self) {
        self.count += 1;
        self.label = format_generations(self.count);
        debug!(generation = self.count, "generation boundary");
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// The user-visible `Generations: {n}` text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for GenerationTracker {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_generations(count: u64) -> String {
    format!("Generations: {count}")
}
