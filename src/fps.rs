/// Counts frames and closes the count once per elapsed second of frame time.
#[derive(Debug, Default)]
pub struct FrameCounter {
    frames: u32,
    window_start: Option<f64>,
}

impl FrameCounter {
    pub const WINDOW_MS: f64 = 1000.0;

    pub fn new() -> Self {
        Self::default()
    }

    // Returns the completed count when `time` crosses a second boundary. The
    // first frame only opens the window
    pub fn tick(&mut self, time: f64) -> Option<u32> {
        let start = match self.window_start {
            Some(start) => start,
            None => {
                self.window_start = Some(time);
                return None;
            }
        };
        self.frames += 1;
        if time - start >= Self::WINDOW_MS {
            let fps = self.frames;
            self.frames = 0;
            self.window_start = Some(time);
            Some(fps)
        } else {
            None
        }
    }
}
