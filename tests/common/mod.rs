#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::{FutureExt, StreamExt};
use http::StatusCode;
use serde_json::{json, Value};

use music_jammer_client::jammer_model::{CreateRoomRequest, RoomDetails, UpdateRoomRequest};
use music_jammer_client::view::{AppEvent, EventReceiver};
use music_jammer_client::{JammerClientTrait, JammerError};

pub const AUTH_URL: &str = "https://accounts.spotify.example/authorize?client_id=jammer";

/// In-memory backend. Rooms missing from `rooms` answer 404.
pub struct FakeClient {
    pub user_room: Mutex<Option<String>>,
    pub rooms: Mutex<HashMap<String, RoomDetails>>,
    pub authenticated: Mutex<bool>,
    pub song: Mutex<Result<Value, StatusCode>>,
    pub leave_status: Mutex<Result<StatusCode, ()>>,
    pub update_status: Mutex<StatusCode>,
    pub create_status: Mutex<StatusCode>,
    pub created_code: String,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeClient {
    fn default() -> Self {
        FakeClient {
            user_room: Mutex::new(None),
            rooms: Mutex::new(HashMap::new()),
            authenticated: Mutex::new(true),
            song: Mutex::new(Err(StatusCode::NO_CONTENT)),
            leave_status: Mutex::new(Ok(StatusCode::OK)),
            update_status: Mutex::new(StatusCode::OK),
            create_status: Mutex::new(StatusCode::CREATED),
            created_code: "NEWROOM".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeClient {
    pub fn with_room(self, votes_to_skip: u32, guest_can_pause: bool, is_host: bool) -> Self {
        self.rooms
            .lock()
            .unwrap()
            .insert("ABCD".to_string(), room("ABCD", votes_to_skip, guest_can_pause, is_host));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

fn status_error(path: &str, status: StatusCode) -> JammerError {
    JammerError::Status {
        path: path.to_string(),
        status,
    }
}

pub fn room(code: &str, votes_to_skip: u32, guest_can_pause: bool, is_host: bool) -> RoomDetails {
    RoomDetails {
        code: code.to_string(),
        votes_to_skip,
        guest_can_pause,
        is_host,
    }
}

pub fn song_payload() -> Value {
    json!({
        "title": "So What",
        "artist": "Miles Davis",
        "duration": 562000,
        "time": 1000,
        "image_url": "https://i.scdn.co/image/so-what",
        "is_playing": true,
        "votes": 0,
        "votes_required": 2,
        "id": "4vLYewWIvqHfKtJDk8c8tq"
    })
}

/// Everything sent so far, without waiting.
pub fn sent(receiver: &mut EventReceiver) -> Vec<AppEvent> {
    std::iter::from_fn(|| receiver.next().now_or_never().flatten()).collect()
}

#[async_trait]
impl JammerClientTrait for FakeClient {
    async fn user_in_room(&self) -> Result<Option<String>, JammerError> {
        self.record("user_in_room");
        Ok(self.user_room.lock().unwrap().clone())
    }

    async fn get_room(&self, code: &str) -> Result<RoomDetails, JammerError> {
        self.record(format!("get_room {code}"));
        self.rooms
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or_else(|| status_error("api/get-room", StatusCode::NOT_FOUND))
    }

    async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomDetails, JammerError> {
        self.record(format!(
            "create_room {} {}",
            request.votes_to_skip, request.guest_can_pause
        ));
        let status = *self.create_status.lock().unwrap();
        if !status.is_success() {
            return Err(status_error("api/create-room", status));
        }
        let created = room(
            &self.created_code,
            request.votes_to_skip,
            request.guest_can_pause,
            true,
        );
        self.rooms
            .lock()
            .unwrap()
            .insert(created.code.clone(), created.clone());
        Ok(created)
    }

    async fn join_room(&self, code: &str) -> Result<(), JammerError> {
        self.record(format!("join_room {code}"));
        match self.rooms.lock().unwrap().contains_key(code) {
            true => Ok(()),
            false => Err(status_error("api/join-room", StatusCode::BAD_REQUEST)),
        }
    }

    async fn update_room(&self, request: &UpdateRoomRequest) -> Result<RoomDetails, JammerError> {
        self.record(format!(
            "update_room {} {} {}",
            request.code, request.votes_to_skip, request.guest_can_pause
        ));
        let status = *self.update_status.lock().unwrap();
        if !status.is_success() {
            return Err(status_error("api/update-room", status));
        }
        let mut rooms = self.rooms.lock().unwrap();
        let stored = rooms
            .get_mut(&request.code)
            .ok_or_else(|| status_error("api/update-room", StatusCode::NOT_FOUND))?;
        stored.votes_to_skip = request.votes_to_skip;
        stored.guest_can_pause = request.guest_can_pause;
        Ok(stored.clone())
    }

    async fn leave_room(&self) -> Result<StatusCode, JammerError> {
        self.record("leave_room");
        *self.user_room.lock().unwrap() = None;
        match *self.leave_status.lock().unwrap() {
            Ok(status) => Ok(status),
            Err(()) => Err(JammerError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "backend down",
            ))),
        }
    }

    async fn is_authenticated(&self) -> Result<bool, JammerError> {
        self.record("is_authenticated");
        Ok(*self.authenticated.lock().unwrap())
    }

    async fn get_auth_url(&self) -> Result<String, JammerError> {
        self.record("get_auth_url");
        Ok(AUTH_URL.to_string())
    }

    async fn current_song(&self) -> Result<Value, JammerError> {
        self.record("current_song");
        match self.song.lock().unwrap().clone() {
            Ok(payload) => Ok(payload),
            Err(status) if status == StatusCode::NO_CONTENT => Ok(Value::Null),
            Err(status) => Err(status_error("spotify/current-song", status)),
        }
    }
}
