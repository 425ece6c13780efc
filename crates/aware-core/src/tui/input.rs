//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::table::TableState;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Handled in place (or ignored).
    None,
    /// Quit the application.
    Quit,
    /// Reload the table from its data source.
    Refresh,
    /// Copy the selected row's copy column.
    Copy,
    /// Open the selected row.
    Execute,
    /// Switch between short and full help.
    ToggleHelp,
}

/// Applies navigation keys to the table and maps the rest to actions.
///
/// Navigation is forwarded even when the table is blurred; the table itself
/// ignores it then.
pub fn handle_key(table: &mut TableState, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => return KeyAction::Quit,
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => return KeyAction::Refresh,
        KeyCode::Char('c') | KeyCode::Char('C') => return KeyAction::Copy,
        KeyCode::Enter => return KeyAction::Execute,
        KeyCode::Char('?') => return KeyAction::ToggleHelp,

        KeyCode::Up | KeyCode::Char('k') => table.move_up(1),
        KeyCode::Down | KeyCode::Char('j') => table.move_down(1),
        KeyCode::PageUp | KeyCode::Char('b') => table.page_up(),
        KeyCode::PageDown | KeyCode::Char('f') | KeyCode::Char(' ') => table.page_down(),
        KeyCode::Char('u') => table.half_page_up(),
        KeyCode::Char('d') => table.half_page_down(),
        KeyCode::Home | KeyCode::Char('g') => table.goto_top(),
        KeyCode::End | KeyCode::Char('G') => table.goto_bottom(),
        KeyCode::Esc => table.toggle_focus(),
        _ => {}
    }

    KeyAction::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, TableOptions};
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn table() -> TableState {
        TableOptions::new()
            .columns(vec![Column::new("N")])
            .rows((0..100).map(|i| vec![i.to_string()]).collect())
            .size(40, 10)
            .focused(true)
            .build()
            .unwrap()
    }

    #[test]
    fn line_movement_keys() {
        let mut t = table();
        handle_key(&mut t, key(KeyCode::Char('j')));
        handle_key(&mut t, key(KeyCode::Down));
        assert_eq!(t.cursor(), 2);
        handle_key(&mut t, key(KeyCode::Char('k')));
        assert_eq!(t.cursor(), 1);
        handle_key(&mut t, key(KeyCode::Up));
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn page_keys() {
        let mut t = table();
        handle_key(&mut t, key(KeyCode::Char('f')));
        assert_eq!(t.cursor(), 10);
        handle_key(&mut t, key(KeyCode::Char(' ')));
        assert_eq!(t.cursor(), 20);
        handle_key(&mut t, key(KeyCode::PageUp));
        assert_eq!(t.cursor(), 10);
        handle_key(&mut t, key(KeyCode::Char('d')));
        assert_eq!(t.cursor(), 15);
        handle_key(&mut t, ctrl('u'));
        assert_eq!(t.cursor(), 10);
    }

    #[test]
    fn top_and_bottom_keys() {
        let mut t = table();
        handle_key(&mut t, key(KeyCode::Char('G')));
        assert_eq!(t.cursor(), 99);
        assert_eq!(t.viewport().offset, 90);
        handle_key(&mut t, key(KeyCode::Home));
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn esc_toggles_focus_and_blocks_navigation() {
        let mut t = table();
        assert_eq!(handle_key(&mut t, key(KeyCode::Esc)), KeyAction::None);
        assert!(!t.is_focused());
        handle_key(&mut t, key(KeyCode::Char('j')));
        assert_eq!(t.cursor(), 0);
        handle_key(&mut t, key(KeyCode::Esc));
        assert!(t.is_focused());
    }

    #[test]
    fn action_keys() {
        let mut t = table();
        assert_eq!(handle_key(&mut t, key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handle_key(&mut t, ctrl('c')), KeyAction::Quit);
        assert_eq!(handle_key(&mut t, key(KeyCode::Char('c'))), KeyAction::Copy);
        assert_eq!(handle_key(&mut t, key(KeyCode::Char('r'))), KeyAction::Refresh);
        assert_eq!(handle_key(&mut t, key(KeyCode::Enter)), KeyAction::Execute);
        assert_eq!(
            handle_key(&mut t, key(KeyCode::Char('?'))),
            KeyAction::ToggleHelp
        );
        assert_eq!(handle_key(&mut t, key(KeyCode::Char('x'))), KeyAction::None);
    }

    #[test]
    fn uppercase_refresh_and_copy() {
        let mut t = table();
        assert_eq!(handle_key(&mut t, key(KeyCode::Char('R'))), KeyAction::Refresh);
        assert_eq!(handle_key(&mut t, key(KeyCode::Char('C'))), KeyAction::Copy);
        assert_eq!(handle_key(&mut t, ctrl('C')), KeyAction::Quit);
    }
}
