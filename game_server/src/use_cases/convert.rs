// Conversions between the wire DTOs (`protocol`) and the rules engine
// (`go_engine`). Free functions, not `From` impls: both types are foreign to
// this crate, so the orphan rule rules out trait impls here.

use protocol::{ActionTypeDto, ColorDto, CoordsDto, GameStatusValue};

pub fn color_from_dto(color: ColorDto) -> go_engine::Color {
    match color {
        ColorDto::White => go_engine::Color::White,
        ColorDto::Black => go_engine::Color::Black,
    }
}

pub fn color_to_dto(color: go_engine::Color) -> ColorDto {
    match color {
        go_engine::Color::White => ColorDto::White,
        go_engine::Color::Black => ColorDto::Black,
    }
}

pub fn status_to_dto(status: go_engine::GameStatus) -> GameStatusValue {
    match status {
        go_engine::GameStatus::Play => GameStatusValue::Play,
        go_engine::GameStatus::Endgame => GameStatusValue::Endgame,
        go_engine::GameStatus::Complete => GameStatusValue::Complete,
    }
}

/// `coords` is required for `Place`/`MarkDead`, ignored otherwise. Missing
/// coordinates for those two map to `OutOfBounds` rather than a panic.
pub fn action_from_dto(
    action_type: ActionTypeDto,
    coords: Option<CoordsDto>,
) -> go_engine::Action {
    let point = coords.map(|c| go_engine::Point::new(c.row, c.col));
    match action_type {
        ActionTypeDto::Place => go_engine::Action::Place {
            point: point.unwrap_or(go_engine::Point::new(u16::MAX, u16::MAX)),
        },
        ActionTypeDto::Pass => go_engine::Action::Pass,
        ActionTypeDto::MarkDead => go_engine::Action::MarkDead {
            point: point.unwrap_or(go_engine::Point::new(u16::MAX, u16::MAX)),
        },
        ActionTypeDto::ProposeDraw => go_engine::Action::ProposeDraw,
        ActionTypeDto::RequestScoring => go_engine::Action::RequestScoring,
        ActionTypeDto::Accept => go_engine::Action::Accept,
        ActionTypeDto::Reject => go_engine::Action::Reject,
    }
}

pub fn board_to_dto(board: &go_engine::Board) -> Vec<Vec<Option<ColorDto>>> {
    (0..board.size())
        .map(|row| {
            (0..board.size())
                .map(|col| board.get(go_engine::Point::new(row, col)).map(color_to_dto))
                .collect()
        })
        .collect()
}
