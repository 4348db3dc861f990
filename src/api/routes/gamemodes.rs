use axum::Json;
use serde::Serialize;

use crate::models::{Gamemode, GAMEMODES};

#[derive(Debug, Serialize)]
pub struct GamemodesResponse {
    pub gamemodes: &'static [Gamemode],
}

pub async fn list_gamemodes() -> Json<GamemodesResponse> {
    Json(GamemodesResponse {
        gamemodes: GAMEMODES,
    })
}
