//! Per-worker run metrics.
//!
//! Each [`Simulation`](crate::Simulation) accumulates a [`WorkerMetrics`]
//! as it steps; the [`Cluster`](crate::Cluster) merges them into the
//! [`RunReport`](crate::RunReport).

use std::time::Duration;

use calor_solver::HaloStats;

/// Timing and traffic counters for one worker, or the sum over several.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkerMetrics {
    /// Stencil updates performed.
    pub steps: u64,
    /// Halo messages and cells.
    pub halo: HaloStats,
    /// Time spent in halo exchange, edge boundary included.
    pub halo_time: Duration,
    /// Time spent in the stencil update.
    pub stencil_time: Duration,
    /// Time spent gathering, output included on the coordinator.
    pub gather_time: Duration,
    /// Gathers taken part in, final gather included.
    pub gathers: u64,
    /// Heater cells written, summed over steps.
    pub injected_cells: u64,
}

impl WorkerMetrics {
    /// Add `other` into `self`.
    pub fn merge(&mut self, other: &WorkerMetrics) {
        self.steps += other.steps;
        self.halo.merge(other.halo);
        self.halo_time += other.halo_time;
        self.stencil_time += other.stencil_time;
        self.gather_time += other.gather_time;
        self.gathers += other.gathers;
        self.injected_cells += other.injected_cells;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = WorkerMetrics::default();
        assert_eq!(m.steps, 0);
        assert_eq!(m.halo, HaloStats::default());
        assert_eq!(m.halo_time, Duration::ZERO);
        assert_eq!(m.gathers, 0);
    }

    #[test]
    fn merge_sums_every_counter() {
        let a = WorkerMetrics {
            steps: 3,
            halo: HaloStats {
                messages_sent: 6,
                messages_received: 6,
                cells_sent: 24,
            },
            halo_time: Duration::from_millis(2),
            stencil_time: Duration::from_millis(5),
            gather_time: Duration::from_millis(1),
            gathers: 2,
            injected_cells: 9,
        };
        let mut total = WorkerMetrics::default();
        total.merge(&a);
        total.merge(&a);
        assert_eq!(total.steps, 6);
        assert_eq!(total.halo.cells_sent, 48);
        assert_eq!(total.stencil_time, Duration::from_millis(10));
        assert_eq!(total.gathers, 4);
        assert_eq!(total.injected_cells, 18);
    }
}
