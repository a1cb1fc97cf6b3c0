//! Match play - a series of games between agent A and agent B
//!
//! Level 2 - Phase-level implementation

use rayon::prelude::*;
use uttt_core::{GameHistory, MatchFeed, MatchRecord, Result, Scores, Winner};

use crate::config::MatchConfig;
use crate::game_runner::{play_random_game, GameRecord};

/// Result of a match
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchResult {
    /// Score from agent A's point of view
    pub scores: Scores,
    /// Finished games in index order
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    pub fn games_played(&self) -> usize {
        self.games.len()
    }

    /// Average number of placements per game
    pub fn avg_moves(&self) -> f32 {
        if self.games.is_empty() {
            0.0
        } else {
            self.games.iter().map(GameRecord::moves).sum::<usize>() as f32 / self.games.len() as f32
        }
    }

    /// Colour outcome of each game, undecided games counted as stalemates
    pub fn winners(&self) -> Vec<Winner> {
        self.games
            .iter()
            .map(|g| g.overall_winner.unwrap_or(Winner::Stalemate))
            .collect()
    }

    /// Decoded record with 1-based game ids
    pub fn to_record(&self) -> MatchRecord {
        let mut record = MatchRecord::new();
        for game in &self.games {
            record.insert_game(game.index as u32 + 1, game.history());
        }
        record.set_scores(self.scores);
        record.set_winners(self.winners());
        record
    }

    /// Match feed in the backend's event format
    pub fn to_feed(&self) -> Result<MatchFeed> {
        self.to_record().to_feed()
    }
}

/// Play a match between two random agents (Level 2 phase)
///
/// Plays `2 * games_per_side` games, alternating which agent moves first.
pub fn play_match(config: &MatchConfig) -> Result<MatchResult> {
    play_match_with_callback(config, |_| {})
}

/// Play a match, reporting each finished game to `on_game`
///
/// With parallel play the callback runs on worker threads in completion order.
pub fn play_match_with_callback<F>(config: &MatchConfig, on_game: F) -> Result<MatchResult>
where
    F: Fn(&GameRecord) + Sync,
{
    if config.games_per_side == 0 {
        return Ok(MatchResult::default());
    }

    tracing::info!(
        games = config.total_games(),
        seed = config.base_seed(),
        parallel = config.parallel,
        "starting match"
    );

    let game_configs = prepare_game_configs(config);
    let games = if config.parallel {
        execute_games_parallel(&game_configs, &on_game)?
    } else {
        execute_games(&game_configs, &on_game)?
    };

    let result = aggregate_results(games);
    tracing::info!(
        a_wins = result.scores.a_wins,
        b_wins = result.scores.b_wins,
        draws = result.scores.draws,
        "match finished"
    );

    Ok(result)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Configuration for a single game in a match
#[derive(Clone, Copy)]
struct GameConfig {
    /// Whether agent A plays Red this game
    a_is_red: bool,
    /// Game index (for seeding)
    game_index: usize,
    seed: u64,
}

/// Prepare game configurations for a match
fn prepare_game_configs(config: &MatchConfig) -> Vec<GameConfig> {
    let base_seed = config.base_seed();

    (0..config.total_games())
        .map(|i| GameConfig {
            a_is_red: i % 2 == 0, // Alternate colors
            game_index: i,
            // Agent B takes seed + 1, so games step by two
            seed: base_seed.wrapping_add(2 * i as u64),
        })
        .collect()
}

/// Execute games sequentially
fn execute_games<F>(game_configs: &[GameConfig], on_game: &F) -> Result<Vec<GameRecord>>
where
    F: Fn(&GameRecord) + Sync,
{
    game_configs
        .iter()
        .map(|gc| play_single_game(gc, on_game))
        .collect()
}

/// Execute games in parallel using rayon
fn execute_games_parallel<F>(game_configs: &[GameConfig], on_game: &F) -> Result<Vec<GameRecord>>
where
    F: Fn(&GameRecord) + Sync,
{
    game_configs
        .par_iter()
        .map(|gc| play_single_game(gc, on_game))
        .collect()
}

fn play_single_game<F>(gc: &GameConfig, on_game: &F) -> Result<GameRecord>
where
    F: Fn(&GameRecord) + Sync,
{
    let record = play_random_game(gc.game_index, gc.a_is_red, gc.seed)?;
    on_game(&record);
    Ok(record)
}

/// Aggregate game records into a match result
fn aggregate_results(games: Vec<GameRecord>) -> MatchResult {
    let mut scores = Scores::default();
    for game in &games {
        scores.tally(game.overall_winner, game.a_is_red);
    }

    MatchResult { scores, games }
}
