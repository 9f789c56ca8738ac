use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Input the app reacts to.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    Key(KeyEvent),
    Click { column: u16, row: u16 },
    Resize,
}

pub fn poll_event(timeout: Duration) -> color_eyre::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn next_event(timeout: Duration) -> color_eyre::Result<Option<AppEvent>> {
    loop {
        match poll_event(timeout)? {
            Some(ev) => match translate(ev) {
                Some(app_event) => return Ok(Some(app_event)),
                None => continue,
            },
            None => return Ok(None),
        }
    }
}

fn translate(ev: Event) -> Option<AppEvent> {
    match ev {
        // Windows reports releases too
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(AppEvent::Click { column, row }),
        Event::Resize(_, _) => Some(AppEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn left_clicks_and_presses_pass_through() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert!(matches!(translate(click), Some(AppEvent::Click { column: 4, row: 7 })));

        let press = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(matches!(translate(press), Some(AppEvent::Key(_))));
    }

    #[test]
    fn other_events_are_dropped() {
        let right = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert!(translate(right).is_none());
        assert!(translate(Event::FocusGained).is_none());
    }
}
