pub mod jammer_model {
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    #[derive(Deserialize, Debug, Clone)]
    pub struct UserInRoomResponse {
        pub code: Option<String>,
    }

    /// Room as returned by get-room, create-room and update-room. Fields the
    /// client never reads (`id`, `host`, `created_at`) are skipped.
    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct RoomDetails {
        pub code: String,
        pub votes_to_skip: u32,
        pub guest_can_pause: bool,
        #[serde(default)]
        pub is_host: bool,
    }

    #[derive(Serialize, Debug, Clone, PartialEq)]
    pub struct CreateRoomRequest {
        pub votes_to_skip: u32,
        pub guest_can_pause: bool,
    }

    #[derive(Serialize, Debug, Clone, PartialEq)]
    pub struct UpdateRoomRequest {
        pub code: String,
        pub votes_to_skip: u32,
        pub guest_can_pause: bool,
    }

    #[derive(Serialize, Debug, Clone, PartialEq)]
    pub struct JoinRoomRequest {
        pub code: String,
    }

    #[derive(Deserialize, Debug, Clone)]
    pub struct AuthStatusResponse {
        pub status: bool,
    }

    #[derive(Deserialize, Debug, Clone)]
    pub struct AuthUrlResponse {
        pub url: String,
    }

    /// Now-playing snapshot. `duration` and `time` are milliseconds.
    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
    pub struct CurrentSong {
        pub title: String,
        pub artist: String,
        pub duration: u64,
        pub time: u64,
        pub image_url: String,
        pub is_playing: bool,
        pub votes: u32,
        pub votes_required: u32,
        pub id: String,
    }

    impl CurrentSong {
        /// Any payload that does not match the schema yields `None`.
        pub fn from_payload(payload: Value) -> Option<Self> {
            serde_json::from_value(payload).ok()
        }

        /// Playback progress in percent, clamped to 0..=100.
        pub fn progress_percent(&self) -> u8 {
            if self.duration == 0 {
                return 0;
            }
            let time = u128::from(self.time.min(self.duration));
            (time * 100 / u128::from(self.duration)) as u8
        }
    }

}
