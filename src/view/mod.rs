//! Screens of the client. Each screen is a plain state struct with an
//! `update` reducer and a `render` function, plus a controller that talks to
//! the backend and feeds the answers back through the reducer.

pub mod event;
pub mod join;
pub mod landing;
pub mod room;
pub mod room_form;
pub mod route;

pub use event::{channel, AppEvent, EventReceiver, EventSender};
pub use route::Route;
