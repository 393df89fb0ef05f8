// Sat Oct 17 2026 - Alex

use std::thread;
use std::time::Duration;

/// Toy workload for the `run` command: doubles its input after an optional
/// delay, failing on every `fail_every`-th input.
#[derive(Debug, Clone, Copy)]
pub struct DoublingJob {
    pub delay: Duration,
    pub fail_every: Option<u64>,
}

impl DoublingJob {
    pub fn run(&self, input: u64) -> Result<u64, String> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        match self.fail_every {
            Some(k) if k > 0 && input % k == 0 => Err(format!("input {} rejected", input)),
            _ => input.checked_mul(2).ok_or_else(|| format!("input {} overflows", input)),
        }
    }
}
