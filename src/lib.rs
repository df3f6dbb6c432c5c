//! Decision engine for limit Texas Hold-Em.
//!
//! Three coupled layers: an exhaustive 7-card [`evaluation::Evaluator`],
//! a Monte Carlo [`simulation::Simulator`] built on it, and an incremental
//! [`search::SearchTree`] that caches win/total statistics at every betting
//! node reached across many hands. [`players::SearchPlayer`] turns those
//! statistics into fold/call/bet decisions.
pub mod betting;
pub mod cards;
pub mod evaluation;
pub mod players;
pub mod search;
pub mod simulation;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Balances, bets and pots in whole currency units.
pub type Chips = i32;
/// Win rates and UCB scores.
pub type Probability = f32;
/// Expected chips won or lost by a decision.
pub type Utility = f32;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// TABLE PARAMETERS
// ============================================================================
/// Small blind amount.
pub const S_BLIND: Chips = 5;
/// Big blind amount.
pub const B_BLIND: Chips = 10;
/// Fixed raise size on top of the call amount.
pub const RAISE: Chips = 10;
/// Betting laps per phase. The last lap is call/fold only.
pub const MAX_BID_ROUNDS: u8 = 3;
/// Largest table the 52-card shoe can deal a full board to.
pub const MAX_SEATS: usize = 23;

// ============================================================================
// ROLLOUTS
// ============================================================================
/// Monte Carlo trials per win-odds estimate.
pub const ROLLOUT_TRIALS: usize = 100;
/// Fresh board completions per post-flop simulation step.
pub const CARD_BRANCHING: usize = 3;

// ============================================================================
// TREE SEARCH
// ============================================================================
/// UCB1 exploration constant.
pub const EXPLORATION: Probability = std::f32::consts::SQRT_2;
/// Smallest compute budget a build may be asked for.
pub const MIN_COMPUTE_TIME: std::time::Duration = std::time::Duration::from_millis(1);
/// Default build budget for the search player.
pub const COMPUTE_TIME: std::time::Duration = std::time::Duration::from_millis(50);
/// Default iteration cap for the search player.
pub const MAX_NODES: usize = 4096;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
