// Pluggable move selection. The bridge only ever sees the wire-level
// `GameStatusDto` (the rules engine's own board/group/liberty algorithms live
// in `go_engine`, which this crate does not depend on), so the default
// policy re-derives just enough of that — connected groups and liberties —
// directly over the DTO board to make a reasonable move.

use protocol::{ActionTypeDto, ColorDto, CoordsDto, GameStatusDto, GameStatusValue};

/// One proposed move: an action type plus the coordinates it applies to, if any.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub action_type: ActionTypeDto,
    pub coords: Option<CoordsDto>,
}

impl Move {
    pub fn place(row: u16, col: u16) -> Self {
        Self {
            action_type: ActionTypeDto::Place,
            coords: Some(CoordsDto { row, col }),
        }
    }

    pub fn pass() -> Self {
        Self {
            action_type: ActionTypeDto::Pass,
            coords: None,
        }
    }

    pub fn request_scoring() -> Self {
        Self {
            action_type: ActionTypeDto::RequestScoring,
            coords: None,
        }
    }
}

/// A capability an AI bridge task holds to decide what to do on its turn.
/// Implementors should be cheap to construct; one instance is created per
/// bridge task.
pub trait AiPolicy: Send + Sync {
    fn select_action(&self, status: &GameStatusDto, our_color: ColorDto) -> Move;
}

/// Prefers captures, avoids obvious self-atari, otherwise plays the first
/// legal empty point scanning from the center outward. Passes once no
/// improving move exists. Exists to exercise the bridge end to end, not to
/// play strong Go.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicPolicy;

impl AiPolicy for HeuristicPolicy {
    fn select_action(&self, status: &GameStatusDto, our_color: ColorDto) -> Move {
        if status.status == GameStatusValue::Endgame {
            return Move::request_scoring();
        }

        let board = Board::from_dto(&status.board);

        if let Some(capture) = board.find_capturing_move(our_color) {
            return Move::place(capture.0, capture.1);
        }

        for (row, col) in board.points_from_center_outward() {
            if board.get(row, col).is_some() {
                continue;
            }
            if !board.is_self_atari(row, col, our_color) {
                return Move::place(row, col);
            }
        }

        Move::pass()
    }
}

struct Board {
    size: u16,
    cells: Vec<Option<ColorDto>>,
}

impl Board {
    fn from_dto(rows: &[Vec<Option<ColorDto>>]) -> Self {
        let size = rows.len() as u16;
        let mut cells = Vec::with_capacity(rows.len() * rows.len());
        for row in rows {
            cells.extend_from_slice(row);
        }
        Self { size, cells }
    }

    fn index(&self, row: u16, col: u16) -> usize {
        row as usize * self.size as usize + col as usize
    }

    fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && row < self.size as i32 && col < self.size as i32
    }

    fn get(&self, row: u16, col: u16) -> Option<ColorDto> {
        self.cells[self.index(row, col)]
    }

    fn neighbors(&self, row: u16, col: u16) -> Vec<(u16, u16)> {
        [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(|(dr, dc)| {
                let r = row as i32 + dr;
                let c = col as i32 + dc;
                self.in_bounds(r, c).then(|| (r as u16, c as u16))
            })
            .collect()
    }

    /// Connected group containing `(row, col)`, or empty if that point is unoccupied.
    fn group(&self, row: u16, col: u16) -> Vec<(u16, u16)> {
        let Some(color) = self.get(row, col) else {
            return Vec::new();
        };
        let mut seen = std::collections::HashSet::new();
        let mut queue = std::collections::VecDeque::new();
        queue.push_back((row, col));
        seen.insert((row, col));
        while let Some((r, c)) = queue.pop_front() {
            for (nr, nc) in self.neighbors(r, c) {
                if self.get(nr, nc) == Some(color) && seen.insert((nr, nc)) {
                    queue.push_back((nr, nc));
                }
            }
        }
        seen.into_iter().collect()
    }

    fn liberties(&self, group: &[(u16, u16)]) -> usize {
        let mut libs = std::collections::HashSet::new();
        for &(r, c) in group {
            for (nr, nc) in self.neighbors(r, c) {
                if self.get(nr, nc).is_none() {
                    libs.insert((nr, nc));
                }
            }
        }
        libs.len()
    }

    /// An opponent group in atari (one liberty) whose liberty we could fill.
    fn find_capturing_move(&self, our_color: ColorDto) -> Option<(u16, u16)> {
        let opponent = match our_color {
            ColorDto::White => ColorDto::Black,
            ColorDto::Black => ColorDto::White,
        };
        let mut seen = std::collections::HashSet::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if seen.contains(&(row, col)) || self.get(row, col) != Some(opponent) {
                    continue;
                }
                let group = self.group(row, col);
                for &p in &group {
                    seen.insert(p);
                }
                if self.liberties(&group) == 1 {
                    let lib = self
                        .neighbors_of_group(&group)
                        .into_iter()
                        .find(|&(r, c)| self.get(r, c).is_none());
                    if let Some(p) = lib {
                        return Some(p);
                    }
                }
            }
        }
        None
    }

    fn neighbors_of_group(&self, group: &[(u16, u16)]) -> Vec<(u16, u16)> {
        let mut out = Vec::new();
        for &(r, c) in group {
            out.extend(self.neighbors(r, c));
        }
        out
    }

    /// True if placing at `(row, col)` would leave our own group with zero
    /// liberties without first emptying an opponent group (a rough, local
    /// stand-in for the rules engine's real suicide check).
    fn is_self_atari(&self, row: u16, col: u16, our_color: ColorDto) -> bool {
        let mut hypothetical = Board {
            size: self.size,
            cells: self.cells.clone(),
        };
        let idx = hypothetical.index(row, col);
        hypothetical.cells[idx] = Some(our_color);

        let group = hypothetical.group(row, col);
        hypothetical.liberties(&group) == 0
    }

    fn points_from_center_outward(&self) -> Vec<(u16, u16)> {
        let center = (self.size.saturating_sub(1)) as f32 / 2.0;
        let mut points: Vec<(u16, u16)> = (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .collect();
        points.sort_by(|&(r1, c1), &(r2, c2)| {
            let d1 = (r1 as f32 - center).powi(2) + (c1 as f32 - center).powi(2);
            let d2 = (r2 as f32 - center).powi(2) + (c2 as f32 - center).powi(2);
            d1.partial_cmp(&d2).unwrap()
        });
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::PrisonersDto;

    fn status_with_board(size: u16, stones: &[(u16, u16, ColorDto)]) -> GameStatusDto {
        let mut board = vec![vec![None; size as usize]; size as usize];
        for &(row, col, color) in stones {
            board[row as usize][col as usize] = Some(color);
        }
        GameStatusDto {
            board,
            status: GameStatusValue::Play,
            komi: 6.5,
            prisoners: PrisonersDto { white: 0, black: 0 },
            turn: ColorDto::White,
            time_played: 0.0,
        }
    }

    #[test]
    fn plays_a_capturing_move_when_one_is_available() {
        // Black stone at (1,1) surrounded on three sides by white; the
        // fourth side is the only liberty and also the capturing move.
        let status = status_with_board(
            9,
            &[
                (1, 1, ColorDto::Black),
                (0, 1, ColorDto::White),
                (1, 0, ColorDto::White),
                (2, 1, ColorDto::White),
            ],
        );
        let mv = HeuristicPolicy.select_action(&status, ColorDto::White);
        assert_eq!(mv.action_type, ActionTypeDto::Place);
        assert_eq!(mv.coords, Some(CoordsDto { row: 1, col: 2 }));
    }

    #[test]
    fn plays_near_center_on_an_empty_board() {
        let status = status_with_board(9, &[]);
        let mv = HeuristicPolicy.select_action(&status, ColorDto::White);
        assert_eq!(mv.action_type, ActionTypeDto::Place);
        let coords = mv.coords.unwrap();
        assert_eq!((coords.row, coords.col), (4, 4));
    }

    #[test]
    fn requests_scoring_in_the_endgame_phase() {
        let mut status = status_with_board(9, &[]);
        status.status = GameStatusValue::Endgame;
        let mv = HeuristicPolicy.select_action(&status, ColorDto::White);
        assert_eq!(mv.action_type, ActionTypeDto::RequestScoring);
        assert!(mv.coords.is_none());
    }
}
