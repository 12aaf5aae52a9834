use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::event::{AppEvent, EventSender};
use super::room_form::{FormEffect, RoomFormMsg, RoomFormState, DEFAULT_VOTES_TO_SKIP};
use super::route::Route;
use crate::error::JammerError;
use crate::infrastructure::client::jammer_client::JammerClientTrait;
use crate::infrastructure::jammer_client::model::jammer_model::{CurrentSong, RoomDetails};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomState {
    room_code: String,
    pub votes_to_skip: u32,
    pub guest_can_pause: bool,
    pub is_host: bool,
    pub show_settings: bool,
    pub spotify_authenticated: bool,
    pub song: Option<CurrentSong>,
    /// Present exactly while `show_settings` is on.
    pub settings_form: Option<RoomFormState>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoomMsg {
    DetailsLoaded(RoomDetails),
    /// get-room answered with a non-success status.
    DetailsRejected,
    AuthStatusLoaded(bool),
    AuthUrlLoaded(String),
    SongLoaded(Option<CurrentSong>),
    ShowSettings(bool),
    Settings(RoomFormMsg),
    /// leave-room finished, whatever the backend said.
    Left,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEffect {
    AuthenticatePlayback,
    FetchAuthUrl,
    RefreshDetails,
    Emit(AppEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomView {
    Settings(RoomFormState),
    Normal {
        code: String,
        song: Option<CurrentSong>,
        show_settings_button: bool,
    },
}

impl RoomState {
    pub fn new(room_code: &str) -> Self {
        RoomState {
            room_code: room_code.to_string(),
            votes_to_skip: DEFAULT_VOTES_TO_SKIP,
            guest_can_pause: false,
            is_host: false,
            show_settings: false,
            spotify_authenticated: false,
            song: None,
            settings_form: None,
        }
    }

    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    /// Applies one message in arrival order; the last answer for a field wins.
    pub fn update(&mut self, msg: RoomMsg) -> Vec<RoomEffect> {
        match msg {
            RoomMsg::DetailsLoaded(details) => {
                self.votes_to_skip = details.votes_to_skip;
                self.guest_can_pause = details.guest_can_pause;
                self.is_host = details.is_host;
                match self.is_host {
                    true => vec![RoomEffect::AuthenticatePlayback],
                    false => vec![],
                }
            }
            RoomMsg::DetailsRejected | RoomMsg::Left => vec![
                RoomEffect::Emit(AppEvent::LeftRoom),
                RoomEffect::Emit(AppEvent::Navigate(Route::Landing)),
            ],
            RoomMsg::AuthStatusLoaded(status) => {
                self.spotify_authenticated = status;
                match status {
                    true => vec![],
                    false => vec![RoomEffect::FetchAuthUrl],
                }
            }
            RoomMsg::AuthUrlLoaded(url) => vec![RoomEffect::Emit(AppEvent::ExternalRedirect(url))],
            RoomMsg::SongLoaded(song) => {
                self.song = song;
                vec![]
            }
            RoomMsg::ShowSettings(value) => {
                self.show_settings = value;
                self.settings_form = match value {
                    true => Some(RoomFormState::for_update(
                        &self.room_code,
                        self.votes_to_skip,
                        self.guest_can_pause,
                    )),
                    false => None,
                };
                vec![]
            }
            RoomMsg::Settings(form_msg) => {
                let Some(form) = self.settings_form.as_mut() else {
                    return vec![];
                };
                form.update(form_msg)
                    .into_iter()
                    .map(|effect| match effect {
                        FormEffect::Emit(event) => RoomEffect::Emit(event),
                        FormEffect::RefreshRoom => RoomEffect::RefreshDetails,
                    })
                    .collect()
            }
        }
    }

    pub fn render(&self) -> RoomView {
        match (&self.settings_form, self.show_settings) {
            (Some(form), true) => RoomView::Settings(form.clone()),
            _ => RoomView::Normal {
                code: self.room_code.clone(),
                song: self.song.clone(),
                show_settings_button: self.is_host,
            },
        }
    }
}

pub struct RoomController {
    client: Arc<dyn JammerClientTrait>,
    events: EventSender,
    state: RoomState,
}

impl RoomController {
    pub fn new(client: Arc<dyn JammerClientTrait>, events: EventSender, room_code: &str) -> Self {
        RoomController {
            client,
            events,
            state: RoomState::new(room_code),
        }
    }

    /// Builds the screen and loads the room straight away.
    pub async fn open(client: Arc<dyn JammerClientTrait>, events: EventSender, room_code: &str) -> Self {
        let mut controller = Self::new(client, events, room_code);
        controller.load_room_details().await;
        controller
    }

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    pub fn render(&self) -> RoomView {
        self.state.render()
    }

    pub async fn load_room_details(&mut self) {
        let msg = self.fetch_details().await;
        if let Some(msg) = msg {
            self.dispatch(msg).await;
        }
    }

    pub async fn authenticate_playback(&mut self) {
        self.drive(vec![RoomEffect::AuthenticatePlayback]).await;
    }

    /// A non-success answer or a payload that does not look like a song
    /// both clear the song.
    pub async fn fetch_current_song(&mut self) {
        let song = match self.client.current_song().await {
            Ok(payload) => {
                let song = CurrentSong::from_payload(payload);
                if song.is_none() {
                    debug!("Current song payload did not match the schema");
                }
                song
            }
            Err(JammerError::Status { status, .. }) => {
                debug!("No current song ({})", status);
                None
            }
            Err(e) => {
                warn!("Current song request failed: {}", e);
                return;
            }
        };
        self.dispatch(RoomMsg::SongLoaded(song)).await;
    }

    pub async fn leave_room(&mut self) {
        match self.client.leave_room().await {
            Ok(status) => info!("Left room {} ({})", self.state.room_code, status),
            Err(e) => warn!("Leave request for {} failed: {}", self.state.room_code, e),
        }
        self.dispatch(RoomMsg::Left).await;
    }

    pub fn show_settings(&mut self, value: bool) {
        self.apply_local(RoomMsg::ShowSettings(value));
    }

    pub fn edit_settings(&mut self, votes_to_skip: u32, guest_can_pause: bool) {
        self.apply_local(RoomMsg::Settings(RoomFormMsg::SetVotesToSkip(votes_to_skip)));
        self.apply_local(RoomMsg::Settings(RoomFormMsg::SetGuestCanPause(guest_can_pause)));
    }

    // Local edits must stay off the network.
    fn apply_local(&mut self, msg: RoomMsg) {
        let effects = self.state.update(msg);
        debug_assert!(effects.is_empty(), "local room message produced {:?}", effects);
    }

    /// Sends the settings form. Does nothing outside settings mode.
    pub async fn submit_settings(&mut self) {
        let Some(request) = self
            .state
            .settings_form
            .as_ref()
            .and_then(RoomFormState::update_request)
        else {
            return;
        };

        let msg = match self.client.update_room(&request).await {
            Ok(room) => {
                info!("Updated room {}", room.code);
                RoomFormMsg::Updated
            }
            Err(e) => {
                warn!("Room update failed: {}", e);
                RoomFormMsg::UpdateFailed
            }
        };
        self.dispatch(RoomMsg::Settings(msg)).await;
    }

    async fn fetch_details(&self) -> Option<RoomMsg> {
        match self.client.get_room(&self.state.room_code).await {
            Ok(details) => Some(RoomMsg::DetailsLoaded(details)),
            Err(JammerError::Status { status, .. }) => {
                info!("Room {} is gone ({})", self.state.room_code, status);
                Some(RoomMsg::DetailsRejected)
            }
            Err(e) => {
                warn!("Room lookup for {} failed: {}", self.state.room_code, e);
                None
            }
        }
    }

    async fn dispatch(&mut self, msg: RoomMsg) {
        let effects = self.state.update(msg);
        self.drive(effects).await;
    }

    // Runs effects in order; answers go back through the reducer and may queue more.
    async fn drive(&mut self, effects: Vec<RoomEffect>) {
        let mut pending: VecDeque<RoomEffect> = effects.into();
        while let Some(effect) = pending.pop_front() {
            if let Some(msg) = self.run(effect).await {
                pending.extend(self.state.update(msg));
            }
        }
    }

    async fn run(&self, effect: RoomEffect) -> Option<RoomMsg> {
        match effect {
            RoomEffect::AuthenticatePlayback => match self.client.is_authenticated().await {
                Ok(status) => Some(RoomMsg::AuthStatusLoaded(status)),
                Err(e) => {
                    warn!("Playback auth check failed: {}", e);
                    None
                }
            },
            RoomEffect::FetchAuthUrl => match self.client.get_auth_url().await {
                Ok(url) => Some(RoomMsg::AuthUrlLoaded(url)),
                Err(e) => {
                    warn!("Could not get the playback auth url: {}", e);
                    None
                }
            },
            RoomEffect::RefreshDetails => self.fetch_details().await,
            RoomEffect::Emit(event) => {
                self.events.emit(event);
                None
            }
        }
    }
}
