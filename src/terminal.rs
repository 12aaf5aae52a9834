//! Line-oriented front end: reads commands from stdin, prints the mounted
//! screen, and polls the current song while inside a room.

use std::fmt::Write as _;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::app::{App, AppView, Command, Flow};
use crate::error::JammerError;
use crate::infrastructure::jammer_client::model::jammer_model::CurrentSong;
use crate::view::landing::LandingView;
use crate::view::room::RoomView;
use crate::view::room_form::RoomFormState;

pub const HELP: &str = "\
commands:
  join [code]              open the join screen, or join a room directly
  create [votes] [yes|no]  create a room (votes to skip, guests can pause)
  home                     back to the landing screen
  settings                 host only: open room settings
  update <votes> <yes|no>  host only: save settings
  close                    close room settings
  song                     fetch the current song now
  refresh                  reload room details
  leave                    leave the room
  help                     show this text
  quit                     exit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Err("type `help` for the list of commands".to_string());
    };
    let args: Vec<&str> = words.collect();

    let command = match (name.to_lowercase().as_str(), args.as_slice()) {
        ("home", []) => Command::Home,
        ("join", []) => Command::Join(None),
        ("join", [code]) => Command::Join(Some(code.to_string())),
        ("create", []) => Command::Create {
            votes_to_skip: None,
            guest_can_pause: None,
        },
        ("create", [votes]) => Command::Create {
            votes_to_skip: Some(parse_votes(votes)?),
            guest_can_pause: None,
        },
        ("create", [votes, pause]) => Command::Create {
            votes_to_skip: Some(parse_votes(votes)?),
            guest_can_pause: Some(parse_flag(pause)?),
        },
        ("settings", []) => Command::Settings,
        ("close", []) => Command::Close,
        ("update", [votes, pause]) => Command::Update {
            votes_to_skip: parse_votes(votes)?,
            guest_can_pause: parse_flag(pause)?,
        },
        ("leave", []) => Command::Leave,
        ("song", []) => Command::Song,
        ("refresh", []) => Command::Refresh,
        ("help", _) | ("?", _) => Command::Help,
        ("quit", []) | ("exit", []) => Command::Quit,
        (name, _) => return Err(format!("unknown command or arguments: {name}")),
    };
    Ok(command)
}

fn parse_votes(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(votes) if votes >= 1 => Ok(votes),
        _ => Err(format!("votes to skip must be a positive number, got {raw}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "yes" | "y" | "true" | "on" => Ok(true),
        "no" | "n" | "false" | "off" => Ok(false),
        _ => Err(format!("expected yes or no, got {raw}")),
    }
}

pub fn render_view(view: &AppView) -> String {
    let mut out = String::new();
    match view {
        AppView::Landing(LandingView::Menu { join, create }) => {
            let _ = writeln!(out, "== Music Jammer ==");
            let _ = writeln!(out, "[join]   Join A Room    ({join})");
            let _ = write!(out, "[create] Create A Room  ({create})");
        }
        AppView::Landing(LandingView::Redirect(route)) => {
            let _ = write!(out, "Redirecting to {route}");
        }
        AppView::Join(join) => {
            let _ = writeln!(out, "== Join A Room ==");
            let code: &str = if join.room_code.is_empty() { "-" } else { &join.room_code };
            let _ = write!(out, "Code: {code}");
            if let Some(error) = &join.error {
                let _ = write!(out, "\n{error}");
            }
        }
        AppView::Create(form) => render_form(&mut out, form),
        AppView::Room(RoomView::Settings(form)) => render_form(&mut out, form),
        AppView::Room(RoomView::Normal {
            code,
            song,
            show_settings_button,
        }) => {
            let _ = write!(out, "Code: {code}");
            if let Some(song) = song {
                let _ = write!(out, "\n{}", render_song(song));
            }
            if *show_settings_button {
                let _ = write!(out, "\n[settings] Settings");
            }
            let _ = write!(out, "\n[leave]    Leave Room");
        }
    }
    out
}

fn render_form(out: &mut String, form: &RoomFormState) {
    let title = if form.is_update() { "Update Room" } else { "Create A Room" };
    let pause = if form.guest_can_pause { "Play/Pause" } else { "No Control" };
    let _ = writeln!(out, "== {title} ==");
    let _ = writeln!(out, "Votes required to skip song: {}", form.votes_to_skip);
    let _ = write!(out, "Guest control of playback: {pause}");
    if let Some(notice) = form.notice {
        let _ = write!(out, "\n{notice}");
    }
    if form.is_update() {
        let _ = write!(out, "\n[close]    Close");
    }
}

pub fn render_song(song: &CurrentSong) -> String {
    let state = if song.is_playing { "playing" } else { "paused" };
    format!(
        "{} - {} [{}] {}% ({} / {} skip votes)",
        song.title,
        song.artist,
        state,
        song.progress_percent(),
        song.votes,
        song.votes_required
    )
}

fn show(app: &mut App) {
    println!("{}", render_view(&app.render()));
    if let Some(url) = app.take_redirect() {
        println!("Open this page to authorize playback: {url}");
    }
}

pub async fn run(mut app: App, poll_interval: Duration) -> Result<(), JammerError> {
    app.start().await;
    show(&mut app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut poll = tokio::time::interval(poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(command) => match app.execute(command).await {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => show(&mut app),
                        Err(hint) => println!("{hint}"),
                    },
                    Err(message) => println!("{message}"),
                }
            }
            _ = poll.tick(), if app.in_room() => {
                let changed = app.poll_song().await;
                app.drain_events().await;
                if changed && matches!(app.render(), AppView::Room(RoomView::Normal { .. })) {
                    show(&mut app);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Route;

    #[test]
    fn parses_room_commands() {
        assert_eq!(parse_command("join ABCD"), Ok(Command::Join(Some("ABCD".to_string()))));
        assert_eq!(parse_command("  LEAVE "), Ok(Command::Leave));
        assert_eq!(
            parse_command("create 3 no"),
            Ok(Command::Create {
                votes_to_skip: Some(3),
                guest_can_pause: Some(false)
            })
        );
        assert_eq!(
            parse_command("update 4 yes"),
            Ok(Command::Update {
                votes_to_skip: 4,
                guest_can_pause: true
            })
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_command("create 0").is_err());
        assert!(parse_command("update 3 maybe").is_err());
        assert!(parse_command("update 3").is_err());
        assert!(parse_command("dance").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn menu_lists_both_actions() {
        let text = render_view(&AppView::Landing(LandingView::Menu {
            join: Route::Join,
            create: Route::Create,
        }));
        assert!(text.contains("Join A Room"));
        assert!(text.contains("Create A Room"));
    }

    #[test]
    fn guest_room_has_no_settings_entry() {
        let text = render_view(&AppView::Room(RoomView::Normal {
            code: "ABCD".to_string(),
            song: None,
            show_settings_button: false,
        }));
        assert!(text.starts_with("Code: ABCD"));
        assert!(!text.contains("Settings"));
        assert!(text.contains("Leave Room"));
    }

    #[test]
    fn settings_form_shows_notice() {
        let mut form = RoomFormState::for_update("ABCD", 3, false);
        form.update(crate::view::room_form::RoomFormMsg::UpdateFailed);
        let text = render_view(&AppView::Room(RoomView::Settings(form)));
        assert!(text.contains("Update Room"));
        assert!(text.contains("Votes required to skip song: 3"));
        assert!(text.contains("Error updating room..."));
    }
}
