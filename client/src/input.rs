use std::time::Duration;

use common::{log, InputEvent};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::key_map::{map_key, KeyCommand};

/// How long one poll blocks before checking whether the session is gone.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Forwards one key event. Returns false once reading should stop: on a quit
/// key or when the session has dropped its receiver.
pub fn forward_key(key: KeyEvent, input_tx: &mpsc::UnboundedSender<InputEvent>) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }

    match map_key(key) {
        Some(KeyCommand::Game(event)) => input_tx.send(event).is_ok(),
        Some(KeyCommand::Quit) => false,
        None => true,
    }
}

fn read_keys(input_tx: mpsc::UnboundedSender<InputEvent>) {
    while !input_tx.is_closed() {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                log!("Failed to poll terminal events: {}", e);
                break;
            }
        }

        match event::read() {
            Ok(Event::Key(key)) => {
                if !forward_key(key, &input_tx) {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                log!("Failed to read terminal event: {}", e);
                break;
            }
        }
    }
}

/// Reads key presses on a blocking thread until a quit key. Returning drops
/// `input_tx`, which ends the session.
pub async fn read_terminal(input_tx: mpsc::UnboundedSender<InputEvent>) {
    if let Err(e) = tokio::task::spawn_blocking(move || read_keys(input_tx)).await {
        log!("Key reader stopped: {}", e);
    }
}
