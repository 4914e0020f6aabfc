use std::collections::HashSet;

/// Bookkeeping for one stream of background renders.
///
/// `epoch` moves forward on every reset; a batch finishing under an older
/// epoch no longer owns any of the counters.
#[derive(Debug, Default)]
pub(super) struct RenderLane {
    loading: HashSet<usize>,
    inflight_tasks: usize,
    epoch: u64,
}

impl RenderLane {
    pub(super) fn reset(&mut self) {
        self.loading.clear();
        self.inflight_tasks = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Whether another batch may start. Leftover loading marks with nothing
    /// in flight are dropped here.
    pub(super) fn has_capacity(&mut self, max_parallel_tasks: usize) -> bool {
        if self.inflight_tasks == 0 && !self.loading.is_empty() {
            self.loading.clear();
        }
        self.inflight_tasks < max_parallel_tasks
    }

    pub(super) fn is_loading(&self, ix: usize) -> bool {
        self.loading.contains(&ix)
    }

    pub(super) fn start(&mut self, pending: &[usize]) -> u64 {
        self.loading.extend(pending.iter().copied());
        self.inflight_tasks = self.inflight_tasks.saturating_add(1);
        self.epoch
    }

    /// Settles a batch started under `epoch`. Returns `false` for a stale
    /// batch, whose results must be dropped without touching the counters.
    pub(super) fn finish(&mut self, epoch: u64, requested: &[usize]) -> bool {
        if self.epoch != epoch {
            return false;
        }

        self.inflight_tasks = self.inflight_tasks.saturating_sub(1);
        for ix in requested {
            self.loading.remove(ix);
        }
        true
    }

    #[cfg(test)]
    fn inflight_tasks(&self) -> usize {
        self.inflight_tasks
    }
}

/// Requested pages that did not come back with an image.
pub(super) fn failed_pages(requested: &[usize], loaded: &HashSet<usize>) -> Vec<usize> {
    requested
        .iter()
        .copied()
        .filter(|ix| !loaded.contains(ix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finished_batch_frees_its_slot() {
        let mut lane = RenderLane::default();
        assert!(lane.has_capacity(1));
        let epoch = lane.start(&[0, 1]);
        assert!(lane.is_loading(1));
        assert!(!lane.has_capacity(1));

        assert!(lane.finish(epoch, &[0, 1]));
        assert_eq!(lane.inflight_tasks(), 0);
        assert!(!lane.is_loading(0));
        assert!(lane.has_capacity(1));
    }

    #[test]
    fn stale_batch_leaves_new_epoch_counters_alone() {
        let mut lane = RenderLane::default();
        let stale = lane.start(&[3]);
        lane.reset();
        let fresh = lane.start(&[3]);
        assert_ne!(stale, fresh);

        assert!(!lane.finish(stale, &[3]));
        assert_eq!(lane.inflight_tasks(), 1);
        assert!(lane.is_loading(3));
        assert!(!lane.has_capacity(1));

        assert!(lane.finish(fresh, &[3]));
        assert_eq!(lane.inflight_tasks(), 0);
        assert!(lane.has_capacity(1));
    }

    #[test]
    fn idle_lane_drops_leftover_loading_marks() {
        let mut lane = RenderLane::default();
        let epoch = lane.start(&[5]);
        assert!(lane.finish(epoch, &[]));
        assert!(lane.is_loading(5));

        assert!(lane.has_capacity(1));
        assert!(!lane.is_loading(5));
    }

    #[test]
    fn pages_missing_from_result_are_failed() {
        let loaded: HashSet<usize> = [2, 4].into_iter().collect();
        assert_eq!(failed_pages(&[2, 3, 4, 5], &loaded), vec![3, 5]);
        assert_eq!(failed_pages(&[2, 4], &loaded), Vec::<usize>::new());
    }
}
