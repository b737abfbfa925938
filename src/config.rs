pub struct BackOfficeConfig {
    /// Consecutive premiums, with no claim in between, that lower the
    /// owner's risk profile by one.
    pub premium_streak_threshold: u32,
    /// Seed for policy-number generation. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl BackOfficeConfig {
    pub fn canonical() -> Self {
        BackOfficeConfig {
            premium_streak_threshold: 3,
            seed: None,
        }
    }

    /// Canonical settings with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        BackOfficeConfig { seed: Some(seed), ..Self::canonical() }
    }
}

impl Default for BackOfficeConfig {
    fn default() -> Self {
        Self::canonical()
    }
}
