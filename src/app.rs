//! Top-level shell: owns the current route, the landing screen's state and
//! whichever screen is mounted, and applies the events screens send up.

use std::sync::Arc;

use futures_util::{FutureExt, StreamExt};
use tracing::{debug, info};

use crate::infrastructure::client::jammer_client::JammerClientTrait;
use crate::view::join::{JoinController, JoinState};
use crate::view::landing::{LandingController, LandingView};
use crate::view::room::{RoomController, RoomView};
use crate::view::room_form::{CreateRoomController, RoomFormState};
use crate::view::{channel, AppEvent, EventReceiver, EventSender, Route};

pub enum Screen {
    Landing,
    Join(JoinController),
    Create(CreateRoomController),
    Room(RoomController),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppView {
    Landing(LandingView),
    Join(JoinState),
    Create(RoomFormState),
    Room(RoomView),
}

/// What the user can ask for from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    Join(Option<String>),
    Create {
        votes_to_skip: Option<u32>,
        guest_can_pause: Option<bool>,
    },
    Settings,
    Close,
    Update {
        votes_to_skip: u32,
        guest_can_pause: bool,
    },
    Leave,
    Song,
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    client: Arc<dyn JammerClientTrait>,
    events: EventSender,
    receiver: EventReceiver,
    route: Route,
    landing: LandingController,
    screen: Screen,
    redirect: Option<String>,
}

impl App {
    pub fn new(client: Arc<dyn JammerClientTrait>) -> Self {
        let (events, receiver) = channel();
        App {
            landing: LandingController::new(client.clone()),
            client,
            events,
            receiver,
            route: Route::Landing,
            screen: Screen::Landing,
            redirect: None,
        }
    }

    /// Mounts the landing screen, following its redirect if the session is
    /// already in a room.
    pub async fn start(&mut self) {
        self.landing.mount().await;
        self.navigate(Route::Landing).await;
        self.drain_events().await;
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn stored_room_code(&self) -> Option<&str> {
        self.landing.state().room_code.as_deref()
    }

    pub fn in_room(&self) -> bool {
        matches!(self.screen, Screen::Room(_))
    }

    /// The last external page a screen asked to open, if not yet shown.
    pub fn take_redirect(&mut self) -> Option<String> {
        self.redirect.take()
    }

    pub fn render(&self) -> AppView {
        match &self.screen {
            Screen::Landing => AppView::Landing(self.landing.render()),
            Screen::Join(join) => AppView::Join(join.state().clone()),
            Screen::Create(create) => AppView::Create(create.state().clone()),
            Screen::Room(room) => AppView::Room(room.render()),
        }
    }

    pub async fn navigate(&mut self, route: Route) {
        // The landing route doubles as "go to my room" while a code is stored.
        let route = match (route, self.landing.render()) {
            (Route::Landing, LandingView::Redirect(target)) => target,
            (route, _) => route,
        };
        info!("Navigating to {}", route);

        self.screen = match &route {
            Route::Landing => Screen::Landing,
            Route::Join => Screen::Join(JoinController::new(self.client.clone(), self.events.clone())),
            Route::Create => Screen::Create(CreateRoomController::new(
                self.client.clone(),
                self.events.clone(),
            )),
            Route::Room { code } => Screen::Room(
                RoomController::open(self.client.clone(), self.events.clone(), code).await,
            ),
        };
        self.route = route;
    }

    pub async fn handle_event(&mut self, event: AppEvent) {
        debug!("Handling {:?}", event);
        match event {
            AppEvent::Navigate(route) => self.navigate(route).await,
            AppEvent::LeftRoom => self.landing.clear_room_code(),
            AppEvent::ExternalRedirect(url) => {
                info!("Playback authorization needed at {}", url);
                self.redirect = Some(url);
            }
        }
    }

    /// Applies queued events in the order screens sent them.
    pub async fn drain_events(&mut self) {
        loop {
            let Some(Some(event)) = self.receiver.next().now_or_never() else {
                break;
            };
            self.handle_event(event).await;
        }
    }

    /// Polls the now-playing snapshot. Returns whether the song changed.
    pub async fn poll_song(&mut self) -> bool {
        let Screen::Room(room) = &mut self.screen else {
            return false;
        };
        let before = room.state().song.clone();
        room.fetch_current_song().await;
        room.state().song != before
    }

    /// Runs one command. `Err` carries a hint when the command makes no
    /// sense on the current screen.
    pub async fn execute(&mut self, command: Command) -> Result<Flow, &'static str> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {}
            Command::Home => {
                if self.in_room() {
                    return Err("leave the room first");
                }
                self.navigate(Route::Landing).await;
            }
            Command::Join(code) => {
                if self.in_room() {
                    return Err("leave the room first");
                }
                if !matches!(self.screen, Screen::Join(_)) {
                    self.navigate(Route::Join).await;
                }
                if let (Some(code), Screen::Join(join)) = (code, &mut self.screen) {
                    join.type_code(&code);
                    join.submit().await;
                }
            }
            Command::Create {
                votes_to_skip,
                guest_can_pause,
            } => {
                if self.in_room() {
                    return Err("leave the room first");
                }
                if !matches!(self.screen, Screen::Create(_)) {
                    self.navigate(Route::Create).await;
                }
                if let Screen::Create(create) = &mut self.screen {
                    if let Some(votes) = votes_to_skip {
                        create.set_votes_to_skip(votes);
                    }
                    if let Some(value) = guest_can_pause {
                        create.set_guest_can_pause(value);
                    }
                    create.submit().await;
                }
            }
            Command::Settings => {
                let room = self.room_mut()?;
                if !room.state().is_host {
                    return Err("only the host can change settings");
                }
                room.show_settings(true);
            }
            Command::Close => self.room_mut()?.show_settings(false),
            Command::Update {
                votes_to_skip,
                guest_can_pause,
            } => {
                let room = self.room_mut()?;
                if !room.state().show_settings {
                    return Err("open the settings first");
                }
                room.edit_settings(votes_to_skip, guest_can_pause);
                room.submit_settings().await;
            }
            Command::Leave => self.room_mut()?.leave_room().await,
            Command::Song => self.room_mut()?.fetch_current_song().await,
            Command::Refresh => self.room_mut()?.load_room_details().await,
        }
        self.drain_events().await;
        Ok(Flow::Continue)
    }

    fn room_mut(&mut self) -> Result<&mut RoomController, &'static str> {
        match &mut self.screen {
            Screen::Room(room) => Ok(room),
            _ => Err("not in a room"),
        }
    }
}
