pub mod jammer_client {
    use async_trait::async_trait;
    use http::StatusCode;
    use reqwest::header::CONTENT_TYPE;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use serde_json::Value;
    use tracing::debug;
    use url::Url;

    use crate::error::JammerError;
    use crate::infrastructure::jammer_client::model::jammer_model::{
        AuthStatusResponse, AuthUrlResponse, CreateRoomRequest, JoinRoomRequest, RoomDetails,
        UpdateRoomRequest, UserInRoomResponse,
    };

    pub const USER_IN_ROOM: &str = "api/user-in-room";
    pub const GET_ROOM: &str = "api/get-room";
    pub const CREATE_ROOM: &str = "api/create-room";
    pub const JOIN_ROOM: &str = "api/join-room";
    pub const UPDATE_ROOM: &str = "api/update-room";
    pub const LEAVE_ROOM: &str = "api/leave-room";
    pub const IS_AUTHENTICATED: &str = "spotify/is-authenticated";
    pub const GET_AUTH_URL: &str = "spotify/get-auth-url";
    pub const CURRENT_SONG: &str = "spotify/current-song";

    /// Every backend call the screens make. Non-success answers come back as
    /// `JammerError::Status`; callers decide which of those matter.
    #[async_trait]
    pub trait JammerClientTrait: Sync + Send {
        async fn user_in_room(&self) -> Result<Option<String>, JammerError>;
        async fn get_room(&self, code: &str) -> Result<RoomDetails, JammerError>;
        async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomDetails, JammerError>;
        async fn join_room(&self, code: &str) -> Result<(), JammerError>;
        async fn update_room(&self, request: &UpdateRoomRequest) -> Result<RoomDetails, JammerError>;
        /// Hands back whatever status the backend answered with, success or not.
        async fn leave_room(&self) -> Result<StatusCode, JammerError>;
        async fn is_authenticated(&self) -> Result<bool, JammerError>;
        async fn get_auth_url(&self) -> Result<String, JammerError>;
        /// Raw now-playing body; `Value::Null` when nothing is playing.
        async fn current_song(&self) -> Result<Value, JammerError>;
    }

    pub struct JammerClient {
        base_url: Url,
        http: reqwest::Client,
    }

    impl JammerClient {
        /// The backend tracks users by session cookie, so the cookie store is
        /// always on.
        pub fn new(base_url: Url) -> Result<Self, JammerError> {
            let http = reqwest::Client::builder().cookie_store(true).build()?;
            Ok(JammerClient { base_url, http })
        }

        pub fn endpoint(&self, path: &str) -> Result<Url, JammerError> {
            Ok(self.base_url.join(path)?)
        }

        pub fn room_endpoint(&self, code: &str) -> Result<Url, JammerError> {
            let mut url = self.endpoint(GET_ROOM)?;
            url.query_pairs_mut().append_pair("code", code);
            Ok(url)
        }

        async fn get_json<T: DeserializeOwned>(&self, path: &str, url: Url) -> Result<T, JammerError> {
            debug!("GET {}", url);
            let response = self.http.get(url).send().await?;
            let response = ensure_success(path, response)?;
            Ok(response.json().await?)
        }

        async fn send_json<B, T>(
            &self,
            method: reqwest::Method,
            path: &str,
            body: &B,
        ) -> Result<T, JammerError>
        where
            B: Serialize + Sync,
            T: DeserializeOwned,
        {
            let url = self.endpoint(path)?;
            debug!("{} {}", method, url);
            let response = self
                .http
                .request(method, url)
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(body)?)
                .send()
                .await?;
            let response = ensure_success(path, response)?;
            Ok(response.json().await?)
        }
    }

    fn ensure_success(path: &str, response: reqwest::Response) -> Result<reqwest::Response, JammerError> {
        let status = response.status();
        match status.is_success() {
            true => Ok(response),
            false => {
                debug!("{} failed with {}", path, status);
                Err(JammerError::Status {
                    path: path.to_string(),
                    status,
                })
            }
        }
    }

    #[async_trait]
    impl JammerClientTrait for JammerClient {
        async fn user_in_room(&self) -> Result<Option<String>, JammerError> {
            let response: UserInRoomResponse =
                self.get_json(USER_IN_ROOM, self.endpoint(USER_IN_ROOM)?).await?;
            Ok(response.code)
        }

        async fn get_room(&self, code: &str) -> Result<RoomDetails, JammerError> {
            self.get_json(GET_ROOM, self.room_endpoint(code)?).await
        }

        async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomDetails, JammerError> {
            self.send_json(reqwest::Method::POST, CREATE_ROOM, request).await
        }

        async fn join_room(&self, code: &str) -> Result<(), JammerError> {
            let request = JoinRoomRequest {
                code: code.to_string(),
            };
            let _: Value = self.send_json(reqwest::Method::POST, JOIN_ROOM, &request).await?;
            Ok(())
        }

        async fn update_room(&self, request: &UpdateRoomRequest) -> Result<RoomDetails, JammerError> {
            self.send_json(reqwest::Method::PATCH, UPDATE_ROOM, request).await
        }

        async fn leave_room(&self) -> Result<StatusCode, JammerError> {
            let url = self.endpoint(LEAVE_ROOM)?;
            debug!("POST {}", url);
            let response = self
                .http
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .send()
                .await?;
            Ok(response.status())
        }

        async fn is_authenticated(&self) -> Result<bool, JammerError> {
            let response: AuthStatusResponse = self
                .get_json(IS_AUTHENTICATED, self.endpoint(IS_AUTHENTICATED)?)
                .await?;
            Ok(response.status)
        }

        async fn get_auth_url(&self) -> Result<String, JammerError> {
            let response: AuthUrlResponse =
                self.get_json(GET_AUTH_URL, self.endpoint(GET_AUTH_URL)?).await?;
            Ok(response.url)
        }

        async fn current_song(&self) -> Result<Value, JammerError> {
            let url = self.endpoint(CURRENT_SONG)?;
            debug!("GET {}", url);
            let response = self.http.get(url).send().await?;
            if response.status() == StatusCode::NO_CONTENT {
                return Ok(Value::Null);
            }
            let response = ensure_success(CURRENT_SONG, response)?;
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body).unwrap_or_else(|e| {
                debug!("Current song body is not JSON: {}", e);
                Value::Null
            }))
        }
    }

}
