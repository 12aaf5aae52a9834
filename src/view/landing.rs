use std::sync::Arc;

use tracing::{info, warn};

use super::route::Route;
use crate::infrastructure::client::jammer_client::JammerClientTrait;

/// The only thing the landing screen remembers: the room the backend says
/// this session is in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandingState {
    pub room_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingMsg {
    UserInRoomLoaded(Option<String>),
    RoomCleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingView {
    Redirect(Route),
    Menu { join: Route, create: Route },
}

impl LandingState {
    pub fn update(&mut self, msg: LandingMsg) {
        match msg {
            LandingMsg::UserInRoomLoaded(code) => {
                self.room_code = code.filter(|code| !code.is_empty());
            }
            LandingMsg::RoomCleared => self.room_code = None,
        }
    }

    pub fn render(&self) -> LandingView {
        match &self.room_code {
            Some(code) => LandingView::Redirect(Route::room(code.as_str())),
            None => LandingView::Menu {
                join: Route::Join,
                create: Route::Create,
            },
        }
    }
}

pub struct LandingController {
    client: Arc<dyn JammerClientTrait>,
    state: LandingState,
}

impl LandingController {
    pub fn new(client: Arc<dyn JammerClientTrait>) -> Self {
        LandingController {
            client,
            state: LandingState::default(),
        }
    }

    /// Asks the backend which room this session is in. A failed request
    /// leaves the state untouched and the menu stays up.
    pub async fn mount(&mut self) {
        match self.client.user_in_room().await {
            Ok(code) => {
                info!("Session room: {:?}", code);
                self.state.update(LandingMsg::UserInRoomLoaded(code));
            }
            Err(e) => warn!("Could not look up the session room: {}", e),
        }
    }

    pub fn clear_room_code(&mut self) {
        self.state.update(LandingMsg::RoomCleared);
    }

    pub fn state(&self) -> &LandingState {
        &self.state
    }

    pub fn render(&self) -> LandingView {
        self.state.render()
    }
}
