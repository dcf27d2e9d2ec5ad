/// Running coin score for one session. Only ever increases until restart.
#[derive(Debug, Clone, Copy)]
pub struct ScoreTracker {
    value: u32,
    coin_value: u32,
}

impl ScoreTracker {
    pub fn new(coin_value: u32) -> Self {
        Self {
            value: 0,
            coin_value,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Add one coin's worth and return the new total.
    pub fn collect_coin(&mut self) -> u32 {
        self.value = self.value.saturating_add(self.coin_value);
        self.value
    }

    /// Text handed to the score display.
    pub fn text(&self) -> String {
        format!("Score: {}", self.value)
    }
}
