use std::sync::Arc;

use tracing::{info, warn};

use super::event::{AppEvent, EventSender};
use super::route::Route;
use crate::error::JammerError;
use crate::infrastructure::client::jammer_client::JammerClientTrait;

pub const ROOM_NOT_FOUND: &str = "Room not found.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinState {
    pub room_code: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinMsg {
    CodeTyped(String),
    Joined,
    Rejected,
}

impl JoinState {
    pub fn update(&mut self, msg: JoinMsg) -> Vec<AppEvent> {
        match msg {
            JoinMsg::CodeTyped(code) => {
                self.room_code = code.trim().to_string();
                self.error = None;
                vec![]
            }
            JoinMsg::Joined => {
                self.error = None;
                vec![AppEvent::Navigate(Route::room(self.room_code.as_str()))]
            }
            JoinMsg::Rejected => {
                self.error = Some(ROOM_NOT_FOUND.to_string());
                vec![]
            }
        }
    }
}

pub struct JoinController {
    client: Arc<dyn JammerClientTrait>,
    events: EventSender,
    state: JoinState,
}

impl JoinController {
    pub fn new(client: Arc<dyn JammerClientTrait>, events: EventSender) -> Self {
        JoinController {
            client,
            events,
            state: JoinState::default(),
        }
    }

    pub fn state(&self) -> &JoinState {
        &self.state
    }

    pub fn type_code(&mut self, code: &str) {
        self.apply(JoinMsg::CodeTyped(code.to_string()));
    }

    /// Only a non-success answer shows the error; a transport failure is
    /// logged and changes nothing.
    pub async fn submit(&mut self) {
        let msg = match self.client.join_room(&self.state.room_code).await {
            Ok(()) => {
                info!("Joined room {}", self.state.room_code);
                JoinMsg::Joined
            }
            Err(JammerError::Status { status, .. }) => {
                info!("Join of {} refused with {}", self.state.room_code, status);
                JoinMsg::Rejected
            }
            Err(e) => {
                warn!("Join request failed: {}", e);
                return;
            }
        };
        self.apply(msg);
    }

    fn apply(&mut self, msg: JoinMsg) {
        for event in self.state.update(msg) {
            self.events.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_code_is_trimmed_and_clears_the_error() {
        let mut state = JoinState {
            room_code: String::new(),
            error: Some(ROOM_NOT_FOUND.to_string()),
        };
        state.update(JoinMsg::CodeTyped("  ABCD \n".to_string()));
        assert_eq!(state.room_code, "ABCD");
        assert_eq!(state.error, None);
    }

    #[test]
    fn join_navigates_to_the_typed_room() {
        let mut state = JoinState::default();
        state.update(JoinMsg::CodeTyped("ABCD".to_string()));
        assert_eq!(
            state.update(JoinMsg::Joined),
            vec![AppEvent::Navigate(Route::room("ABCD"))]
        );
    }

    #[test]
    fn rejection_stays_put_with_an_error() {
        let mut state = JoinState::default();
        assert!(state.update(JoinMsg::Rejected).is_empty());
        assert_eq!(state.error.as_deref(), Some(ROOM_NOT_FOUND));
    }
}
