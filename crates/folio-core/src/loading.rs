use crate::constants::LOADING_STEP;

/// Fake progress counter on the loading screen.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadingCounter {
    count: f32,
}

impl LoadingCounter {
    /// One timer tick; returns `true` once the counter has reached 100.
    pub fn tick(&mut self) -> bool {
        self.count = (self.count + LOADING_STEP).min(100.0);
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.count >= 100.0
    }

    /// Zero-padded percentage, e.g. `"007%"`.
    pub fn label(&self) -> String {
        format!("{:03}%", self.count.floor() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_to_one_hundred() {
        let mut c = LoadingCounter::default();
        assert_eq!(c.label(), "000%");
        c.tick();
        assert_eq!(c.label(), "001%");
        let mut ticks = 1;
        while !c.tick() {
            ticks += 1;
        }
        assert_eq!(ticks + 1, 67); // ceil(100 / 1.5)
        assert_eq!(c.label(), "100%");
    }
}
