//! Turn, round and match drivers.
//!
//! The drivers only sequence the match entry points; every rule lives in
//! [`Match`]. A turn goes:
//!
//! 1. draw until playable, if nothing in hand fits
//! 2. pass if the set ran out first
//! 3. otherwise ask the move source, re-prompting on rejected moves
//!
//! A turn that gives up after [`MAX_MOVE_ATTEMPTS`] rejections leaves the
//! round in play; calling [`play_round`] again resumes it.

use tracing::{debug, info, warn};

use super::state::{Match, MatchPhase, RoundResult};
use super::strategy::MoveSource;
use crate::chain::PlacedTile;
use crate::core::{GameError, PlayerMap, RandomSource};
use crate::record::{MatchRecord, Recorder, RoundRecord, RoundStartRecord, TurnEndRecord, TurnStartRecord};

/// Rejected submissions allowed per turn before the driver gives up.
pub const MAX_MOVE_ATTEMPTS: usize = 8;

/// What happened on one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A tile was placed after drawing `drawn` tiles.
    Played { placed: PlacedTile, drawn: u32 },
    /// No playable tile and nothing left to draw.
    Passed { drawn: u32 },
}

/// Move sources for both seats.
pub type Seats<'a> = PlayerMap<&'a mut dyn MoveSource>;

/// Seat two move sources, player one first.
pub fn seats<'a>(one: &'a mut dyn MoveSource, two: &'a mut dyn MoveSource) -> Seats<'a> {
    PlayerMap::from_pair(one, two)
}

/// Play the active player's turn. Does not advance the turn.
pub fn play_turn<R: RandomSource>(game: &mut Match<R>, source: &mut dyn MoveSource) -> Result<TurnOutcome, GameError> {
    let player = game.active_player();

    let drawn = if game.must_draw(player) {
        let outcome = game.draw_until_playable(player)?;
        if outcome.passed {
            return Ok(TurnOutcome::Passed { drawn: outcome.drawn });
        }
        outcome.drawn
    } else {
        0
    };

    let mut last_error = GameError::NoMoveChosen(player);
    for _ in 0..MAX_MOVE_ATTEMPTS {
        let Some(mv) = source.choose_move(player, game.hand(player), game.chain()) else {
            return Err(GameError::NoMoveChosen(player));
        };
        match game.play_tile(player, mv.tile, mv.side) {
            Ok(placed) => return Ok(TurnOutcome::Played { placed, drawn }),
            Err(err) => {
                warn!(%player, tile = %mv.tile, side = %mv.side, error = %err, "move rejected");
                source.on_rejected(player, &mv, &err);
                last_error = err;
            }
        }
    }
    Err(last_error)
}

/// Play one round to settlement.
///
/// Deals a new round, or resumes the current one if a previous call
/// returned while the round was still in play.
pub fn play_round<R: RandomSource>(
    game: &mut Match<R>,
    seats: &mut Seats<'_>,
    recorder: &mut dyn Recorder,
) -> Result<RoundResult, GameError> {
    if game.phase() == MatchPhase::Playing {
        debug!(round = game.round(), active = %game.active_player(), "resuming round");
    } else {
        game.start_round()?;
        recorder.round_started(&RoundStartRecord::capture(game));
    }

    loop {
        if game.is_tie() {
            let result = game.settle_tie()?;
            recorder.round_ended(&RoundRecord::capture(game, &result));
            return Ok(result);
        }

        recorder.turn_started(&TurnStartRecord::capture(game));
        let active = game.active_player();
        play_turn(game, &mut *seats[active])?;
        recorder.turn_ended(&TurnEndRecord::capture(game));

        if game.check_round_win() {
            let result = game.settle_round()?;
            recorder.round_ended(&RoundRecord::capture(game, &result));
            return Ok(result);
        }

        game.advance_turn()?;
    }
}

/// Play rounds until a player reaches the target score.
pub fn play_match<R: RandomSource>(
    game: &mut Match<R>,
    seats: &mut Seats<'_>,
    recorder: &mut dyn Recorder,
) -> Result<MatchRecord, GameError> {
    while !game.is_over() {
        play_round(game, seats, recorder)?;
    }

    let record = MatchRecord::capture(game);
    info!(winner = record.winner, rounds = record.round_count, "match finished");
    recorder.match_ended(&record);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Chain;
    use crate::core::{MatchConfig, PlayerId, ScriptedRng};
    use crate::game::state::RoundState;
    use crate::game::strategy::{FirstPlayable, Move, ScriptedMoves};
    use crate::game::MatchBuilder;
    use crate::record::{MatchLog, NullRecorder};
    use crate::tiles::{Hand, Side, Tile, TileSet};

    fn restored(hands: [&[Tile]; 2], start: Tile, set: &[Tile]) -> Match<ScriptedRng> {
        let mut chain = Chain::new();
        chain.set_start_tile(start).unwrap();
        Match::restore(
            MatchConfig::default(),
            ScriptedRng::first(),
            RoundState::new(
                TileSet::from_tiles(set.iter().copied()),
                PlayerMap::from_pair(
                    Hand::from_tiles(hands[0].iter().copied()),
                    Hand::from_tiles(hands[1].iter().copied()),
                ),
                chain,
                PlayerId::ONE,
            ),
        )
    }

    #[test]
    fn test_turn_reprompts_after_rejection() {
        let mut game = restored(
            [&[Tile::new(3, 5), Tile::new(2, 6)], &[Tile::new(1, 1)]],
            Tile::new(2, 3),
            &[],
        );
        let mut source = ScriptedMoves::new([
            Move::new(Tile::new(3, 5), Side::Left),
            Move::new(Tile::new(3, 5), Side::Right),
        ]);

        let outcome = play_turn(&mut game, &mut source).unwrap();
        assert!(matches!(outcome, TurnOutcome::Played { drawn: 0, .. }));
        assert_eq!(source.rejected().len(), 1);
        assert_eq!(game.chain().right_pip(), Some(5));
    }

    #[test]
    fn test_turn_passes_on_deadlock() {
        let mut game = restored([&[Tile::new(0, 1)], &[Tile::new(3, 5)]], Tile::new(2, 3), &[]);
        let outcome = play_turn(&mut game, &mut FirstPlayable).unwrap();
        assert_eq!(outcome, TurnOutcome::Passed { drawn: 0 });
        assert_eq!(game.hand(PlayerId::ONE).count(), 1);
    }

    #[test]
    fn test_turn_declined_move() {
        let mut game = restored([&[Tile::new(3, 5)], &[Tile::new(1, 1)]], Tile::new(2, 3), &[]);
        let mut source = ScriptedMoves::default();
        assert_eq!(
            play_turn(&mut game, &mut source),
            Err(GameError::NoMoveChosen(PlayerId::ONE))
        );
    }

    #[test]
    fn test_deadlock_after_last_placement() {
        // Player 1 plays 3-5, then both are stuck with an empty set.
        let mut game = restored(
            [&[Tile::new(3, 5), Tile::new(0, 0)], &[Tile::new(1, 1), Tile::new(6, 6)]],
            Tile::new(2, 3),
            &[],
        );
        play_turn(&mut game, &mut FirstPlayable).unwrap();
        game.advance_turn().unwrap();
        assert!(game.is_tie());

        let result = game.settle_tie().unwrap();
        let mut log = MatchLog::new();
        log.round_ended(&RoundRecord::capture(&game, &result));
        assert_eq!(result.winner, None);
        assert_eq!(log.rounds[0].winner, 0);
        assert_eq!(log.rounds[0].chain_layout, "0:2|3 1:3|5");
    }

    #[test]
    fn test_round_records_checkpoints() {
        let mut game = MatchBuilder::new().build(3);
        let (mut one, mut two) = (FirstPlayable, FirstPlayable);
        let mut seats = seats(&mut one, &mut two);
        let mut log = MatchLog::new();

        let result = play_round(&mut game, &mut seats, &mut log).unwrap();

        assert_eq!(log.round_starts.len(), 1);
        assert_eq!(log.rounds.len(), 1);
        assert_eq!(log.turn_starts.len(), log.turn_ends.len());
        assert!(!log.turn_ends.is_empty());
        assert_eq!(log.rounds[0].points_gained, result.points);
        assert_eq!(game.tile_count(), 28);
    }

    /// Always submits the chain's start tile, which no hand holds.
    #[derive(Default)]
    struct StartTileMover {
        rejected: usize,
    }

    impl MoveSource for StartTileMover {
        fn choose_move(&mut self, _player: PlayerId, _hand: &Hand, chain: &Chain) -> Option<Move> {
            chain.start_tile().map(|t| Move::new(*t, Side::Left))
        }

        fn on_rejected(&mut self, _player: PlayerId, _attempted: &Move, _error: &GameError) {
            self.rejected += 1;
        }
    }

    #[test]
    fn test_round_resumes_after_rejected_turn() {
        let mut game = restored(
            [&[Tile::new(3, 5), Tile::new(0, 0)], &[Tile::new(1, 1), Tile::new(6, 6)]],
            Tile::new(2, 3),
            &[],
        );
        let (mut one, mut two) = (StartTileMover::default(), StartTileMover::default());
        let mut log = MatchLog::new();

        let err = play_round(&mut game, &mut seats(&mut one, &mut two), &mut log).unwrap_err();
        assert_eq!(err, GameError::TileNotFound(Tile::new(2, 3)));
        assert_eq!(one.rejected, MAX_MOVE_ATTEMPTS);
        assert_eq!(game.phase(), MatchPhase::Playing);
        assert_eq!(game.active_player(), PlayerId::ONE);
        assert_eq!(game.tile_count(), 5);

        let (mut one, mut two) = (FirstPlayable, FirstPlayable);
        let result = play_round(&mut game, &mut seats(&mut one, &mut two), &mut log).unwrap();

        assert_eq!(result.winner, None);
        assert_eq!(game.phase(), MatchPhase::RoundEnd);
        assert_eq!(game.round(), 1);
        assert_eq!(game.chain().right_pip(), Some(5));
        assert!(log.round_starts.is_empty());
        assert_eq!(log.rounds.len(), 1);
    }

    #[test]
    fn test_full_match_reaches_target() {
        let mut game = MatchBuilder::new().target_score(30).build(42);
        let (mut one, mut two) = (FirstPlayable, FirstPlayable);
        let mut seats = seats(&mut one, &mut two);

        let record = play_match(&mut game, &mut seats, &mut NullRecorder).unwrap();

        assert!(game.is_over());
        let winner = game.match_winner().unwrap();
        assert!(game.score(winner) >= 30);
        assert_eq!(record.winner, winner.number());
        assert_eq!(record.round_count as usize, game.round_results().len());
    }
}
