//! Match state machine.
//!
//! A match moves through `RoundStart -> Playing -> RoundEnd` once per
//! round and stops in `MatchEnd` when a cumulative score reaches the
//! target. The `Match` owns the set, both hands and the chain, and every
//! mutation of them goes through its entry points:
//!
//! - [`Match::start_round`]
//! - [`Match::draw_until_playable`]
//! - [`Match::play_tile`]
//! - [`Match::advance_turn`]
//! - [`Match::settle_round`] / [`Match::settle_tie`]
//!
//! ```
//! use domino_engine::game::{MatchBuilder, MatchPhase};
//!
//! let mut game = MatchBuilder::new().target_score(30).build(42);
//! game.start_round().unwrap();
//! assert_eq!(game.phase(), MatchPhase::Playing);
//! assert_eq!(game.tile_count(), 28);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::chain::{Chain, PlacedTile};
use crate::core::{GameError, GameRng, MatchConfig, PlayerId, PlayerMap, RandomSource};
use crate::tiles::{Hand, Side, Tile, TileSet};

/// Where the match is in its round cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the first round to be dealt.
    RoundStart,
    /// A round is being played.
    Playing,
    /// A round was settled and the next one may start.
    RoundEnd,
    /// A player reached the target score.
    MatchEnd,
}

/// Bookkeeping for the turn in progress.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Tiles drawn this turn.
    pub drawn: u32,
    /// The player found no playable tile and could not draw.
    pub passed: bool,
    /// Tile placed this turn, if any.
    pub placed: Option<PlacedTile>,
}

/// Result of [`Match::draw_until_playable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Tiles drawn by this call.
    pub drawn: u32,
    /// The set ran out before a playable tile turned up.
    pub passed: bool,
}

/// Settlement of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number, starting at 1.
    pub round: u32,
    /// `None` when both players were deadlocked.
    pub winner: Option<PlayerId>,
    /// Pips left in the loser's hand, credited to the winner.
    pub points: u32,
    /// Cumulative scores after settlement.
    pub scores: PlayerMap<u32>,
}

/// A round in progress plus the match totals carried across rounds, for
/// checkpoints and set-ups.
///
/// [`Match::restore`] trusts the caller that the containers partition
/// one tile set. The turn in progress is not part of the checkpoint; a
/// restored match starts the active player's turn afresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub round: u32,
    pub set: TileSet,
    pub hands: PlayerMap<Hand>,
    pub chain: Chain,
    pub active: PlayerId,
    pub scores: PlayerMap<u32>,
    /// Winner of the last settled round; starts the next one.
    pub last_winner: Option<PlayerId>,
    pub draw_totals: PlayerMap<u32>,
    pub pass_totals: PlayerMap<u32>,
}

impl RoundState {
    /// A first-round position with zero scores and totals.
    pub fn new(set: TileSet, hands: PlayerMap<Hand>, chain: Chain, active: PlayerId) -> Self {
        Self {
            round: 1,
            set,
            hands,
            chain,
            active,
            scores: PlayerMap::with_value(0),
            last_winner: None,
            draw_totals: PlayerMap::with_value(0),
            pass_totals: PlayerMap::with_value(0),
        }
    }
}

/// A two-player match.
#[derive(Clone, Debug)]
pub struct Match<R: RandomSource = GameRng> {
    config: MatchConfig,
    rng: R,
    phase: MatchPhase,
    round: u32,

    set: TileSet,
    hands: PlayerMap<Hand>,
    chain: Chain,

    active: PlayerId,
    initial_turn: Option<PlayerId>,
    first_turn: Option<PlayerId>,
    turn: TurnState,
    last_winner: Option<PlayerId>,

    scores: PlayerMap<u32>,
    draw_totals: PlayerMap<u32>,
    pass_totals: PlayerMap<u32>,
    results: Vec<RoundResult>,
}

impl Match<GameRng> {
    /// Create a match driven by a seeded [`GameRng`].
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        Self::with_rng(config, GameRng::new(seed))
    }
}

impl<R: RandomSource> Match<R> {
    /// Create a match drawing its randomness from `rng`.
    ///
    /// Panics if `config` is invalid.
    pub fn with_rng(config: MatchConfig, rng: R) -> Self {
        config.validate();
        let set = TileSet::generate();
        Self {
            config,
            rng,
            phase: MatchPhase::RoundStart,
            round: 0,
            set,
            hands: PlayerMap::with_default(),
            chain: Chain::new(),
            active: PlayerId::ONE,
            initial_turn: None,
            first_turn: None,
            turn: TurnState::default(),
            last_winner: None,
            scores: PlayerMap::with_value(0),
            draw_totals: PlayerMap::with_value(0),
            pass_totals: PlayerMap::with_value(0),
            results: Vec::new(),
        }
    }

    /// Resume a round from explicit containers, in the `Playing` phase.
    pub fn restore(config: MatchConfig, rng: R, state: RoundState) -> Self {
        let mut game = Self::with_rng(config, rng);
        game.round = state.round;
        game.set = state.set;
        game.hands = state.hands;
        game.chain = state.chain;
        game.scores = state.scores;
        game.last_winner = state.last_winner;
        game.draw_totals = state.draw_totals;
        game.pass_totals = state.pass_totals;
        game.active = state.active;
        game.initial_turn = Some(state.active);
        game.first_turn = Some(state.active);
        game.phase = MatchPhase::Playing;
        game
    }

    /// Snapshot of the current round's containers.
    pub fn round_state(&self) -> RoundState {
        RoundState {
            round: self.round,
            set: self.set.clone(),
            hands: self.hands.clone(),
            chain: self.chain.clone(),
            active: self.active,
            scores: self.scores.clone(),
            last_winner: self.last_winner,
            draw_totals: self.draw_totals.clone(),
            pass_totals: self.pass_totals.clone(),
        }
    }

    // === Read-only views ===

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Rounds started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::MatchEnd
    }

    /// Whose turn it is.
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// Starting player of the current round.
    pub fn initial_turn(&self) -> Option<PlayerId> {
        self.initial_turn
    }

    /// Starting player of the first round.
    pub fn first_turn(&self) -> Option<PlayerId> {
        self.first_turn
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn set(&self) -> &TileSet {
        &self.set
    }

    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    /// Tiles drawn per player over the whole match.
    pub fn draw_totals(&self) -> &PlayerMap<u32> {
        &self.draw_totals
    }

    /// Passed turns per player over the whole match.
    pub fn pass_totals(&self) -> &PlayerMap<u32> {
        &self.pass_totals
    }

    /// Settled rounds, oldest first.
    pub fn round_results(&self) -> &[RoundResult] {
        &self.results
    }

    /// Tiles across the set, both hands and the chain.
    pub fn tile_count(&self) -> usize {
        self.set.len() + self.hands.values().map(Hand::count).sum::<usize>() + self.chain.len()
    }

    // === Round setup ===

    /// Deal a new round.
    ///
    /// Scores carry over. Round 1, and any round after a deadlocked one,
    /// opens with a comparison draw; otherwise the previous winner starts.
    /// Returns the starting player.
    #[instrument(skip(self))]
    pub fn start_round(&mut self) -> Result<PlayerId, GameError> {
        match self.phase {
            MatchPhase::MatchEnd => return Err(GameError::MatchOver),
            MatchPhase::Playing => return Err(GameError::InvalidPhase(self.phase)),
            MatchPhase::RoundStart | MatchPhase::RoundEnd => {}
        }

        let mut set = TileSet::generate();
        let mut hands: PlayerMap<Hand> = PlayerMap::with_default();
        for (_, hand) in hands.iter_mut() {
            hand.draw_initial(&mut set, &mut self.rng, self.config.hand_size)?;
        }

        let mut chain = Chain::new();
        chain.set_start_tile(set.draw_random(&mut self.rng)?)?;

        let starter = match self.last_winner {
            Some(winner) => winner,
            None => Self::comparison_draw(&mut self.rng, &mut set)?,
        };

        self.set = set;
        self.hands = hands;
        self.chain = chain;
        self.round += 1;
        self.active = starter;
        self.initial_turn = Some(starter);
        self.first_turn.get_or_insert(starter);
        self.turn = TurnState::default();
        self.phase = MatchPhase::Playing;

        info!(round = self.round, %starter, "round started");
        Ok(starter)
    }

    /// Each player draws one tile; the higher pip sum starts, an exact
    /// tie goes to a coin flip. Both tiles go back into the set.
    fn comparison_draw(rng: &mut R, set: &mut TileSet) -> Result<PlayerId, GameError> {
        let one = set.draw_random(rng)?;
        let two = set.draw_random(rng)?;
        let starter = match one.pip_sum().cmp(&two.pip_sum()) {
            Ordering::Greater => PlayerId::ONE,
            Ordering::Less => PlayerId::TWO,
            Ordering::Equal => {
                if rng.coin_flip() {
                    PlayerId::ONE
                } else {
                    PlayerId::TWO
                }
            }
        };
        debug!(%one, %two, %starter, "comparison draw");
        set.return_tile(one);
        set.return_tile(two);
        Ok(starter)
    }

    // === Turn rules ===

    /// True if no held tile fits either end of the chain.
    pub fn must_draw(&self, player: PlayerId) -> bool {
        self.hands[player].playable(&self.chain).next().is_none()
    }

    /// True if the player must draw and the set is empty.
    pub fn must_skip(&self, player: PlayerId) -> bool {
        self.set.is_empty() && self.must_draw(player)
    }

    /// True if both players are deadlocked.
    pub fn is_tie(&self) -> bool {
        self.phase == MatchPhase::Playing && PlayerId::all().all(|p| self.must_skip(p))
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        if self.phase != MatchPhase::Playing {
            return Err(GameError::InvalidPhase(self.phase));
        }
        Ok(())
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), GameError> {
        self.ensure_playing()?;
        if player != self.active {
            warn!(%player, active = %self.active, "acted out of turn");
            return Err(GameError::NotYourTurn(player));
        }
        Ok(())
    }

    /// Draw until the player holds a playable tile.
    ///
    /// If the set runs out first, the turn is marked as passed.
    #[instrument(skip(self))]
    pub fn draw_until_playable(&mut self, player: PlayerId) -> Result<DrawOutcome, GameError> {
        self.ensure_turn(player)?;

        let mut drawn = 0;
        while self.must_draw(player) {
            if self.set.is_empty() {
                if !self.turn.passed {
                    self.turn.passed = true;
                    self.pass_totals[player] += 1;
                    info!(%player, drawn, "no playable tile, turn passed");
                }
                break;
            }
            self.hands[player].draw(&mut self.set, &mut self.rng)?;
            drawn += 1;
        }

        self.turn.drawn += drawn;
        self.draw_totals[player] += drawn;
        Ok(DrawOutcome {
            drawn,
            passed: self.turn.passed,
        })
    }

    /// Move `tile` from the player's hand onto `side` of the chain.
    ///
    /// Nothing changes if the move is rejected.
    #[instrument(skip(self, tile), fields(tile = %tile))]
    pub fn play_tile(&mut self, player: PlayerId, tile: Tile, side: Side) -> Result<PlacedTile, GameError> {
        self.ensure_turn(player)?;

        let hand = &self.hands[player];
        if hand.is_empty() {
            return Err(GameError::EmptyHand(player));
        }
        if !hand.contains(&tile) {
            warn!("tile is not in this hand");
            return Err(GameError::TileNotFound(tile));
        }
        if !self.chain.can_add_on(&tile, side) {
            debug!("illegal placement rejected");
            return Err(GameError::NoCompatibleTile { tile, side });
        }

        let held = self.hands[player].remove(&tile)?;
        match self.chain.append(held, side) {
            Ok(placed) => {
                self.turn.placed = Some(placed);
                Ok(placed)
            }
            Err(err) => {
                self.hands[player].push(held);
                Err(err)
            }
        }
    }

    /// Hand the turn to the other player.
    pub fn advance_turn(&mut self) -> Result<PlayerId, GameError> {
        self.ensure_playing()?;
        self.active = self.active.opponent();
        self.turn = TurnState::default();
        Ok(self.active)
    }

    // === Settlement ===

    /// True if either hand is empty.
    pub fn check_round_win(&self) -> bool {
        self.hands.values().any(Hand::is_empty)
    }

    /// True if either cumulative score reached the target.
    pub fn check_match_win(&self) -> bool {
        self.scores.values().any(|&s| s >= self.config.target_score)
    }

    /// The player whose score reached the target, if any.
    pub fn match_winner(&self) -> Option<PlayerId> {
        PlayerId::all().find(|&p| self.scores[p] >= self.config.target_score)
    }

    /// Credit the player who emptied their hand with the pips left in
    /// the other hand.
    #[instrument(skip(self))]
    pub fn settle_round(&mut self) -> Result<RoundResult, GameError> {
        self.ensure_playing()?;

        let winner = match (
            self.hands[PlayerId::ONE].is_empty(),
            self.hands[PlayerId::TWO].is_empty(),
        ) {
            (true, true) => return Err(GameError::BothHandsEmpty),
            (false, false) => return Err(GameError::RoundNotOver),
            (true, false) => PlayerId::ONE,
            (false, true) => PlayerId::TWO,
        };

        let points = self.hands[winner.opponent()].sum_pips();
        self.scores[winner] += points;
        self.last_winner = Some(winner);
        info!(%winner, points, score = self.scores[winner], "round won");

        Ok(self.finish_round(Some(winner), points))
    }

    /// End a round where both players are deadlocked. Scores do not change.
    pub fn settle_tie(&mut self) -> Result<RoundResult, GameError> {
        self.ensure_playing()?;
        if !self.is_tie() {
            return Err(GameError::RoundNotOver);
        }
        self.last_winner = None;
        info!(round = self.round, "round deadlocked, no score");
        Ok(self.finish_round(None, 0))
    }

    fn finish_round(&mut self, winner: Option<PlayerId>, points: u32) -> RoundResult {
        let result = RoundResult {
            round: self.round,
            winner,
            points,
            scores: self.scores.clone(),
        };
        self.results.push(result.clone());

        self.phase = if self.check_match_win() {
            info!(winner = ?self.match_winner(), "match over");
            MatchPhase::MatchEnd
        } else {
            MatchPhase::RoundEnd
        };
        result
    }
}
