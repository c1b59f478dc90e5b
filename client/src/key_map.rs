use common::{Direction, InputEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Game(InputEvent),
    Quit,
}

/// Maps one key press to a command. Unknown keys map to `None` and are
/// ignored by the caller.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyCommand::Quit);
    }

    let command = match key.code {
        KeyCode::Up => turn(Direction::Up),
        KeyCode::Right => turn(Direction::Right),
        KeyCode::Down => turn(Direction::Down),
        KeyCode::Left => turn(Direction::Left),
        KeyCode::Esc => KeyCommand::Quit,
        KeyCode::Enter => KeyCommand::Game(InputEvent::PlayToggleRequested),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' | 'k' => turn(Direction::Up),
            'd' | 'l' => turn(Direction::Right),
            's' | 'j' => turn(Direction::Down),
            'a' | 'h' => turn(Direction::Left),
            'p' | ' ' => KeyCommand::Game(InputEvent::PlayToggleRequested),
            'r' => KeyCommand::Game(InputEvent::ResetRequested),
            'q' => KeyCommand::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

fn turn(direction: Direction) -> KeyCommand {
    KeyCommand::Game(InputEvent::DirectionRequested(direction))
}
