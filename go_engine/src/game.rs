use serde::{Deserialize, Serialize};

use crate::action::{Action, GameStatus, ProposalKind};
use crate::board::{Board, Point};
use crate::color::Color;
use crate::error::{DecodeError, RuleViolation};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Prisoners {
    pub white: u32,
    pub black: u32,
}

/// Authoritative state of one Go game. `apply` is the only way to mutate it;
/// every accepted action bumps `version` by exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    status: GameStatus,
    turn: Color,
    prisoners: Prisoners,
    komi: f32,
    version: u64,
    pass_count: u8,
    previous_board: Option<Board>,
    dead_marks: Vec<Point>,
    pending_proposal: Option<(Color, ProposalKind)>,
    final_score: Option<(f32, f32)>,
}

impl Game {
    pub fn new(size: u16, komi: f32) -> Self {
        Self {
            board: Board::new(size),
            status: GameStatus::Play,
            turn: Color::White,
            prisoners: Prisoners::default(),
            komi,
            version: 0,
            pass_count: 0,
            previous_board: None,
            dead_marks: Vec::new(),
            pending_proposal: None,
            final_score: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn prisoners(&self) -> Prisoners {
        self.prisoners
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn final_score(&self) -> Option<(f32, f32)> {
        self.final_score
    }

    pub fn encode(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("Game encoding is infallible for in-memory state")
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        postcard::from_bytes(bytes).map_err(DecodeError)
    }

    /// Apply `action` as `color`, mutating in place. On success, `version`
    /// has been incremented by exactly one. On failure, state is unchanged.
    pub fn apply(&mut self, color: Color, action: Action) -> Result<(), RuleViolation> {
        match (self.status, action) {
            (GameStatus::Complete, _) => Err(RuleViolation::WrongPhase),

            (GameStatus::Play, Action::Place { point }) => self.apply_place(color, point),
            (GameStatus::Play, Action::Pass) => self.apply_pass(color),

            (GameStatus::Endgame, Action::MarkDead { point }) => self.apply_mark_dead(color, point),
            (GameStatus::Endgame, Action::RequestScoring) => {
                self.apply_propose(color, ProposalKind::Scoring)
            }

            (_, Action::ProposeDraw) => self.apply_propose(color, ProposalKind::Draw),
            (_, Action::Accept) => self.apply_respond(color, true),
            (_, Action::Reject) => self.apply_respond(color, false),

            _ => Err(RuleViolation::WrongPhase),
        }
    }

    fn apply_place(&mut self, color: Color, point: Point) -> Result<(), RuleViolation> {
        if self.pending_proposal.is_some() {
            return Err(RuleViolation::ProposalPending);
        }
        if color != self.turn {
            return Err(RuleViolation::NotYourTurn);
        }
        if !self.board.in_bounds(point) {
            return Err(RuleViolation::OutOfBounds);
        }
        if self.board.get(point).is_some() {
            return Err(RuleViolation::OccupiedPoint);
        }

        let board_before = self.board.clone();

        let mut attempt = self.board.clone();
        attempt.set(point, Some(color));

        // Capture any opposing groups left with no liberties.
        let mut captured = 0u32;
        for n in attempt.neighbors(point) {
            if attempt.get(n) == Some(color.opposite()) {
                let group = attempt.group(n);
                if attempt.liberties(&group) == 0 {
                    captured += group.len() as u32;
                    for p in group {
                        attempt.set(p, None);
                    }
                }
            }
        }

        // Suicide check: the placed group must have a liberty after captures.
        let own_group = attempt.group(point);
        if attempt.liberties(&own_group) == 0 {
            return Err(RuleViolation::Suicide);
        }

        // Simple ko: the resulting position may not recreate the position
        // immediately prior to the opponent's last move.
        if let Some(prev) = &self.previous_board {
            if *prev == attempt {
                return Err(RuleViolation::Ko);
            }
        }

        match color {
            Color::White => self.prisoners.white += captured,
            Color::Black => self.prisoners.black += captured,
        }

        self.previous_board = Some(board_before);
        self.board = attempt;
        self.turn = color.opposite();
        self.pass_count = 0;
        self.version += 1;
        Ok(())
    }

    fn apply_pass(&mut self, color: Color) -> Result<(), RuleViolation> {
        if self.pending_proposal.is_some() {
            return Err(RuleViolation::ProposalPending);
        }
        if color != self.turn {
            return Err(RuleViolation::NotYourTurn);
        }

        self.turn = color.opposite();
        self.pass_count += 1;
        if self.pass_count >= 2 {
            self.status = GameStatus::Endgame;
            self.pass_count = 0;
        }
        self.version += 1;
        Ok(())
    }

    fn apply_mark_dead(&mut self, _color: Color, point: Point) -> Result<(), RuleViolation> {
        if self.pending_proposal.is_some() {
            return Err(RuleViolation::ProposalPending);
        }
        if self.board.get(point).is_none() {
            return Err(RuleViolation::EmptyPoint);
        }

        let group = self.board.group(point);
        if group.iter().any(|p| self.dead_marks.contains(p)) {
            // Group is already marked dead; toggle the whole group back to alive.
            self.dead_marks.retain(|p| !group.contains(p));
        } else {
            self.dead_marks.extend(group);
        }

        self.version += 1;
        Ok(())
    }

    fn apply_propose(&mut self, color: Color, kind: ProposalKind) -> Result<(), RuleViolation> {
        if self.pending_proposal.is_some() {
            return Err(RuleViolation::ProposalPending);
        }

        self.pending_proposal = Some((color, kind));
        self.version += 1;
        Ok(())
    }

    fn apply_respond(&mut self, color: Color, accept: bool) -> Result<(), RuleViolation> {
        let Some((proposer, kind)) = self.pending_proposal else {
            return Err(RuleViolation::NoProposal);
        };
        if color == proposer {
            return Err(RuleViolation::CannotRespondToOwnProposal);
        }

        self.pending_proposal = None;

        if accept {
            match kind {
                ProposalKind::Draw => {
                    self.final_score = Some((self.komi, 0.0));
                }
                ProposalKind::Scoring => {
                    self.final_score = Some(self.score());
                }
            }
            self.status = GameStatus::Complete;
        }

        self.version += 1;
        Ok(())
    }

    /// Chinese (area) scoring: stones on the board plus territory reachable
    /// only from one color, with komi added to white. Dead-marked stones are
    /// removed (and credited to the opponent as prisoners) before counting.
    fn score(&self) -> (f32, f32) {
        let mut board = self.board.clone();

        for &p in &self.dead_marks {
            board.set(p, None);
        }

        let mut white_area = 0f32;
        let mut black_area = 0f32;
        let mut visited = std::collections::HashSet::new();

        for p in board.points() {
            match board.get(p) {
                Some(Color::White) => white_area += 1.0,
                Some(Color::Black) => black_area += 1.0,
                None => {
                    if visited.contains(&p) {
                        continue;
                    }
                    let (region, border) = board.empty_region(p);
                    visited.extend(region.iter().copied());
                    if border.len() == 1 {
                        if border.contains(&Color::White) {
                            white_area += region.len() as f32;
                        } else {
                            black_area += region.len() as f32;
                        }
                    }
                }
            }
        }

        (white_area + self.komi, black_area)
    }
}
