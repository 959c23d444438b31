//! One game: the board, its score and the cascade in flight.
//! The view drives it through [`GameAction`]s via `use_reducer`.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::rc::Rc;
use yew::Reducible;

use crate::cascade::{Cascade, CascadeObserver, NoPacing, resolve};
use crate::config::GameConfig;
use crate::model::{Board, Cell, Color, MatchSet, Palette, SwapProposal};
use crate::swap::{SwapOutcome, attempt_swap};
use crate::util::clog;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub total: u64,
    /// Points of the most recent cascade step.
    pub last_delta: u32,
    /// Steps in the current cascade so far.
    pub chain: u32,
    pub best_chain: u32,
    pub moves: u32,
    pub tiles_cleared: u64,
}

impl ScoreBoard {
    fn begin_chain(&mut self) {
        self.chain = 0;
        self.moves = self.moves.saturating_add(1);
    }
}

impl CascadeObserver for ScoreBoard {
    fn on_score_delta(&mut self, points: u32) {
        self.total = self.total.saturating_add(points as u64);
        self.last_delta = points;
        self.chain += 1;
        self.best_chain = self.best_chain.max(self.chain);
    }

    fn on_match_cleared(&mut self, cleared: &[(Cell, Color)]) {
        self.tiles_cleared = self.tiles_cleared.saturating_add(cleared.len() as u64);
        clog(&format!("cleared {} tiles (chain {})", cleared.len(), self.chain));
    }
}

#[derive(Clone, Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub palette: Palette,
    pub board: Board,
    pub score: ScoreBoard,
    /// Cells cleared by the latest cascade step, drawn as a flash.
    pub highlighted: MatchSet,
    /// Bumped on every change the view must redraw.
    pub version: u64,
    pub game_id: u32,
    cascade: Option<Cascade>,
    rng: SmallRng,
}

// SmallRng has no equality; a session is identified by its game and version.
impl PartialEq for GameSession {
    fn eq(&self, other: &Self) -> bool {
        self.game_id == other.game_id && self.version == other.version
    }
}

#[derive(Clone, Debug)]
pub enum GameAction {
    NewGame,
    Swap(SwapProposal),
    CascadeTick,
}

impl GameSession {
    /// Builds the first board from `config`. An invalid or too small palette
    /// falls back to the default one.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let palette = config.palette().unwrap_or_else(|e| {
            clog(&format!("session: {e}; using default palette"));
            Palette::default()
        });
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = Board::generate(config.rows, config.cols, &palette, &mut rng, config.max_resample);
        Self {
            config,
            palette,
            board,
            score: ScoreBoard::default(),
            highlighted: MatchSet::new(),
            version: 0,
            game_id: 0,
            cascade: None,
            rng,
        }
    }

    /// True while a cascade still has steps to run; input is ignored then.
    pub fn is_busy(&self) -> bool {
        self.cascade.is_some()
    }

    fn new_game(&mut self) {
        self.board = Board::generate(
            self.config.rows,
            self.config.cols,
            &self.palette,
            &mut self.rng,
            self.config.max_resample,
        );
        self.score = ScoreBoard::default();
        self.highlighted.clear();
        self.cascade = None;
        self.game_id = self.game_id.wrapping_add(1);
        clog(&format!("new game #{}", self.game_id));
    }

    fn swap(&mut self, p: SwapProposal) {
        match attempt_swap(&mut self.board, p.from, p.to) {
            Err(e) => clog(&format!("swap ignored: {e}")),
            Ok(SwapOutcome::Rejected) => {
                clog(&format!("swap {} -> {} rejected, no match", p.from, p.to));
                self.highlighted.clear();
            }
            Ok(SwapOutcome::Accepted(matches)) => {
                self.score.begin_chain();
                if self.config.cascade_delay_ms == 0 {
                    let summary = resolve(
                        &mut self.board,
                        matches,
                        &self.palette,
                        &mut self.rng,
                        &mut self.score,
                        &mut NoPacing,
                    );
                    clog(&format!(
                        "cascade settled after {} steps, +{}",
                        summary.steps, summary.points
                    ));
                    self.highlighted = summary.last_cleared;
                } else {
                    self.cascade = Some(Cascade::new(matches));
                    self.advance_cascade();
                }
            }
        }
    }

    fn advance_cascade(&mut self) {
        let Some(cascade) = self.cascade.as_mut() else {
            return;
        };
        if let Some(step) = cascade.step(&mut self.board, &self.palette, &mut self.rng, &mut self.score) {
            clog(&format!("cascade step {}: +{}", step.depth, step.points));
            self.highlighted = step.cleared;
        }
        if cascade.is_settled() {
            self.cascade = None;
        }
    }
}

impl Reducible for GameSession {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        let mut new = (*self).clone();
        match action {
            NewGame => new.new_game(),
            Swap(p) => {
                if new.is_busy() {
                    return self;
                }
                new.swap(p);
            }
            CascadeTick => {
                if !new.is_busy() {
                    return self;
                }
                new.advance_cascade();
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}
