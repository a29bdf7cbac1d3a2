/// What one frame learned from the scroll container.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollSample {
    pub delta: f64,
    pub progress: f64,
    pub force: f64,
}

/// Tracks the previous scroll offset so each frame can turn page motion into wind.
#[derive(Debug, Default)]
pub struct ScrollSampler {
    last_offset: f64,
}

impl ScrollSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(
        &mut self,
        offset: f64,
        viewport_height: f64,
        max_progress: f64,
        force_scale: f64,
    ) -> ScrollSample {
        let delta = offset - self.last_offset;
        self.last_offset = offset;

        let progress = if viewport_height > 0.0 {
            (offset / viewport_height).max(0.0).min(max_progress)
        } else {
            0.0
        };

        ScrollSample {
            delta,
            progress,
            // Scrolling down pushes particles up
            force: -delta * force_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_down_produces_upward_force() {
        let mut sampler = ScrollSampler::new();
        let sample = sampler.sample(100.0, 800.0, 2.0, 0.05);
        assert_eq!(sample.delta, 100.0);
        assert_eq!(sample.force, -5.0);
        assert_eq!(sample.progress, 0.125);

        let still = sampler.sample(100.0, 800.0, 2.0, 0.05);
        assert_eq!(still.delta, 0.0);
        assert_eq!(still.force, 0.0);
    }

    #[test]
    fn progress_is_clamped_to_last_section() {
        let mut sampler = ScrollSampler::new();
        assert_eq!(sampler.sample(5000.0, 800.0, 2.0, 0.05).progress, 2.0);
        assert_eq!(sampler.sample(-40.0, 800.0, 2.0, 0.05).progress, 0.0);
    }

    #[test]
    fn zero_viewport_reads_as_top_of_page() {
        let mut sampler = ScrollSampler::new();
        assert_eq!(sampler.sample(300.0, 0.0, 2.0, 0.05).progress, 0.0);
    }
}
