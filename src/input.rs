use crate::actions::PetAction;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Act(PetAction),
    Quit,
}

#[derive(Clone, Debug)]
pub struct InputEvent {
    pub key: KeyCode,
    pub mods: KeyModifiers,
}

/// Drains pending key presses, waiting at most `wait` for the first one.
pub fn collect_input(wait: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();
    let mut timeout = wait;
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 32 {
                    break;
                }
            }
        }
        timeout = Duration::ZERO;
    }
    Ok(out)
}

pub fn map_event(ev: &InputEvent) -> Option<Command> {
    if ev.mods.contains(KeyModifiers::CONTROL) {
        return match ev.key {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }
    match ev.key {
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::Act(PetAction::Feed)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Act(PetAction::Play)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Act(PetAction::Sleep)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Act(PetAction::Clean)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Act(PetAction::ToggleRadio)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
