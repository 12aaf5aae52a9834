use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use super::event::{AppEvent, EventSender};
use super::route::Route;
use crate::infrastructure::client::jammer_client::JammerClientTrait;
use crate::infrastructure::jammer_client::model::jammer_model::{
    CreateRoomRequest, RoomDetails, UpdateRoomRequest,
};

pub const DEFAULT_VOTES_TO_SKIP: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update { room_code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormNotice {
    Updated,
    UpdateFailed,
}

impl fmt::Display for FormNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormNotice::Updated => write!(f, "Room updated successfully!"),
            FormNotice::UpdateFailed => write!(f, "Error updating room..."),
        }
    }
}

/// Create-room form, also used as the host's settings form in update mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomFormState {
    pub mode: FormMode,
    pub votes_to_skip: u32,
    pub guest_can_pause: bool,
    pub notice: Option<FormNotice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoomFormMsg {
    SetVotesToSkip(u32),
    SetGuestCanPause(bool),
    Created(RoomDetails),
    Updated,
    UpdateFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    Emit(AppEvent),
    /// Ask the owning room screen to reload its details.
    RefreshRoom,
}

impl RoomFormState {
    pub fn for_create() -> Self {
        RoomFormState {
            mode: FormMode::Create,
            votes_to_skip: DEFAULT_VOTES_TO_SKIP,
            guest_can_pause: true,
            notice: None,
        }
    }

    pub fn for_update(room_code: &str, votes_to_skip: u32, guest_can_pause: bool) -> Self {
        RoomFormState {
            mode: FormMode::Update {
                room_code: room_code.to_string(),
            },
            votes_to_skip: votes_to_skip.max(1),
            guest_can_pause,
            notice: None,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, FormMode::Update { .. })
    }

    pub fn update(&mut self, msg: RoomFormMsg) -> Vec<FormEffect> {
        match msg {
            RoomFormMsg::SetVotesToSkip(votes) => {
                self.votes_to_skip = votes.max(1);
                vec![]
            }
            RoomFormMsg::SetGuestCanPause(value) => {
                self.guest_can_pause = value;
                vec![]
            }
            RoomFormMsg::Created(room) => {
                self.notice = None;
                vec![FormEffect::Emit(AppEvent::Navigate(Route::room(room.code)))]
            }
            RoomFormMsg::Updated => {
                self.notice = Some(FormNotice::Updated);
                vec![FormEffect::RefreshRoom]
            }
            RoomFormMsg::UpdateFailed => {
                self.notice = Some(FormNotice::UpdateFailed);
                vec![]
            }
        }
    }

    pub fn create_request(&self) -> CreateRoomRequest {
        CreateRoomRequest {
            votes_to_skip: self.votes_to_skip,
            guest_can_pause: self.guest_can_pause,
        }
    }

    pub fn update_request(&self) -> Option<UpdateRoomRequest> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Update { room_code } => Some(UpdateRoomRequest {
                code: room_code.clone(),
                votes_to_skip: self.votes_to_skip,
                guest_can_pause: self.guest_can_pause,
            }),
        }
    }
}

/// Drives the form when it is mounted on its own at `/create`.
pub struct CreateRoomController {
    client: Arc<dyn JammerClientTrait>,
    events: EventSender,
    state: RoomFormState,
}

impl CreateRoomController {
    pub fn new(client: Arc<dyn JammerClientTrait>, events: EventSender) -> Self {
        CreateRoomController {
            client,
            events,
            state: RoomFormState::for_create(),
        }
    }

    pub fn state(&self) -> &RoomFormState {
        &self.state
    }

    pub fn set_votes_to_skip(&mut self, votes: u32) {
        self.apply(RoomFormMsg::SetVotesToSkip(votes));
    }

    pub fn set_guest_can_pause(&mut self, value: bool) {
        self.apply(RoomFormMsg::SetGuestCanPause(value));
    }

    /// A failed create is only logged; the form stays as it was.
    pub async fn submit(&mut self) {
        let request = self.state.create_request();
        match self.client.create_room(&request).await {
            Ok(room) => {
                info!("Created room {}", room.code);
                self.apply(RoomFormMsg::Created(room));
            }
            Err(e) => warn!("Room creation failed: {}", e),
        }
    }

    fn apply(&mut self, msg: RoomFormMsg) {
        for effect in self.state.update(msg) {
            match effect {
                FormEffect::Emit(event) => self.events.emit(event),
                FormEffect::RefreshRoom => {}
            }
        }
    }
}
