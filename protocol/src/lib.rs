//! Wire DTOs shared between `game_server` and `ai_client`. JSON over
//! WebSocket, tagged the same way `game_server`'s original arcade protocol
//! was: `{"type": "...", "data": {...}}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorDto {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vs {
    Human,
    Computer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionTypeDto {
    Place,
    Pass,
    MarkDead,
    ProposeDraw,
    RequestScoring,
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordsDto {
    pub row: u16,
    pub col: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "new_game")]
    NewGame(NewGameRequest),
    #[serde(rename = "join_game")]
    JoinGame(JoinGameRequest),
    #[serde(rename = "game_action")]
    GameAction(GameActionRequest),
    #[serde(rename = "chat_message")]
    ChatMessage(ChatMessageRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub vs: Vs,
    pub color: ColorDto,
    pub size: u16,
    pub komi: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGameRequest {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameActionRequest {
    pub key: String,
    pub action_type: ActionTypeDto,
    #[serde(default)]
    pub coords: Option<CoordsDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub key: String,
    pub text: String,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "message_type", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "new_game_response")]
    NewGameResponse(GameResponseDto),
    #[serde(rename = "join_game_response")]
    JoinGameResponse(GameResponseDto),
    #[serde(rename = "game_action_response")]
    GameActionResponse(ActionResponseDto),
    #[serde(rename = "game_status")]
    GameStatus(GameStatusDto),
    #[serde(rename = "chat")]
    Chat(Vec<ChatEntryDto>),
    #[serde(rename = "opponent_connected")]
    OpponentConnected { opponent_connected: bool },
    #[serde(rename = "error")]
    Error { explanation: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysDto {
    pub white: String,
    pub black: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponseDto {
    pub success: bool,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub keys: Option<KeysDto>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub your_color: Option<ColorDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponseDto {
    pub success: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatusValue {
    Play,
    Endgame,
    Complete,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PrisonersDto {
    pub white: u32,
    pub black: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatusDto {
    pub board: Vec<Vec<Option<ColorDto>>>,
    pub status: GameStatusValue,
    pub komi: f32,
    pub prisoners: PrisonersDto,
    pub turn: ColorDto,
    #[serde(rename = "timePlayed")]
    pub time_played: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntryDto {
    pub timestamp: f64,
    pub color: ColorDto,
    pub text: String,
    pub id: i64,
}
