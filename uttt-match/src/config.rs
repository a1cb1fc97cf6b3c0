//! Configuration types for match play
//!
//! Level 4 - Utilities and configuration

/// Games each agent plays as the first player, as on the platform
pub const DEFAULT_GAMES_PER_SIDE: usize = 20;

/// Base seed when none is given
pub const DEFAULT_SEED: u64 = 42;

/// Match configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Games per colour assignment; the match plays twice as many
    pub games_per_side: usize,
    /// Base random seed (None = 42)
    pub seed: Option<u64>,
    /// Whether to run games in parallel
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games_per_side: DEFAULT_GAMES_PER_SIDE,
            seed: None,
            parallel: true,
        }
    }
}

impl MatchConfig {
    /// Create config with specified games per side
    pub fn new(games_per_side: usize) -> Self {
        Self {
            games_per_side,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run games one after another
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn total_games(&self) -> usize {
        self.games_per_side * 2
    }

    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}
