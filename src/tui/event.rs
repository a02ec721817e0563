//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to application state changes. Handles a
//! focus-shifting model where key behavior depends on the focused panel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

/// What the event loop should do after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing further; state was updated in place
    None,
    /// Exit the application
    Quit,
    /// Submit the pending question (the loop owns the blocking call so it
    /// can draw the thinking frame first)
    Submit,
}

/// Handles a keyboard event and updates the app state accordingly.
///
/// # Event Handling
///
/// - `Ctrl+C`: quit (from any focus state)
/// - `Ctrl+R`: reset the conversation, keeping model and context settings
/// - `Tab` / `Shift+Tab`: cycle focus between panels
/// - `Esc`: return to the question input
/// - When `Input` focused: character input edits the question, Enter submits
/// - When `Sidebar` focused: j/k cycles the model, Space toggles context
/// - When `Conversation` focused: j/k scrolls the transcript
/// - `q` quits when focus is not on the input (there it types)
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    // Global quit and reset chords - work from any focus state
    if key.modifiers == KeyModifiers::CONTROL {
        match key.code {
            KeyCode::Char('c') => return Action::Quit,
            KeyCode::Char('r') => {
                app.reset_conversation();
                return Action::None;
            }
            _ => {}
        }
    }

    // Global focus cycling with Tab / Shift+Tab (BackTab)
    if key.code == KeyCode::Tab {
        app.next_focus();
        return Action::None;
    }
    if key.code == KeyCode::BackTab {
        app.prev_focus();
        return Action::None;
    }

    // Global Esc - return to the question input
    if key.code == KeyCode::Esc {
        app.reset_focus();
        return Action::None;
    }

    // Focus-specific handling
    match app.focus() {
        Focus::Input => handle_input(app, key),
        Focus::Sidebar => handle_sidebar(app, key),
        Focus::Conversation => handle_conversation(app, key),
    }
}

/// Handles keyboard input when the question input is focused.
///
/// Accepts character input and backspace for editing, Enter to submit.
fn handle_input(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_input_char(c);
        }
        KeyCode::Backspace => {
            app.pop_input_char();
        }
        KeyCode::Enter => {
            return Action::Submit;
        }
        _ => {
            // Ignore other keys while typing
        }
    }
    Action::None
}

/// Handles keyboard input when the sidebar is focused.
///
/// Supports Vim-style model cycling (j/k, also arrow keys) and Space to
/// toggle the context setting.
fn handle_sidebar(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => {
            return Action::Quit;
        }
        KeyCode::Char('j') | KeyCode::Down if key.modifiers.is_empty() => {
            app.select_next_model();
        }
        KeyCode::Char('k') | KeyCode::Up if key.modifiers.is_empty() => {
            app.select_previous_model();
        }
        KeyCode::Char(' ') => {
            app.toggle_context();
        }
        _ => {
            // Ignore other keys in the sidebar
        }
    }
    Action::None
}

/// Handles keyboard input when the conversation transcript is focused.
///
/// Supports Vim-style scrolling (j/k, also arrow keys).
fn handle_conversation(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => {
            return Action::Quit;
        }
        KeyCode::Char('j') | KeyCode::Down if key.modifiers.is_empty() => {
            app.scroll_history_down(1);
        }
        KeyCode::Char('k') | KeyCode::Up if key.modifiers.is_empty() => {
            app.scroll_history_up(1);
        }
        _ => {
            // Ignore other keys in the transcript
        }
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelSelection;
    use crate::tui::app::test_support::canned_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_c_quits_from_any_focus() {
        let mut app = canned_app(false);
        assert_eq!(handle_key_event(&mut app, ctrl('c')), Action::Quit);

        app.next_focus();
        assert_eq!(handle_key_event(&mut app, ctrl('c')), Action::Quit);

        app.next_focus();
        assert_eq!(handle_key_event(&mut app, ctrl('c')), Action::Quit);
    }

    #[test]
    fn q_quits_outside_the_input_but_types_inside_it() {
        let mut app = canned_app(false);

        // In the input, 'q' is just a character
        assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('q'))), Action::None);
        assert_eq!(app.session().pending_question(), "q");

        // In the sidebar and transcript it quits
        app.next_focus();
        assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('q'))), Action::Quit);
        app.next_focus();
        assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn tab_cycles_focus() {
        let mut app = canned_app(false);
        assert_eq!(app.focus(), Focus::Input);

        assert_eq!(handle_key_event(&mut app, key(KeyCode::Tab)), Action::None);
        assert_eq!(app.focus(), Focus::Sidebar);

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Conversation);

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Input);
    }

    #[test]
    fn shift_tab_cycles_focus_backwards() {
        let mut app = canned_app(false);

        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        handle_key_event(&mut app, back_tab);
        assert_eq!(app.focus(), Focus::Conversation);

        handle_key_event(&mut app, back_tab);
        assert_eq!(app.focus(), Focus::Sidebar);

        handle_key_event(&mut app, back_tab);
        assert_eq!(app.focus(), Focus::Input);
    }

    #[test]
    fn esc_returns_focus_to_input() {
        let mut app = canned_app(false);
        app.next_focus();
        assert_eq!(app.focus(), Focus::Sidebar);

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.focus(), Focus::Input);
    }

    #[test]
    fn typing_edits_the_pending_question() {
        let mut app = canned_app(false);

        handle_key_event(&mut app, key(KeyCode::Char('h')));
        handle_key_event(&mut app, key(KeyCode::Char('i')));
        assert_eq!(app.session().pending_question(), "hi");

        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.session().pending_question(), "h");

        // Shift-modified characters still type
        let shifted = KeyEvent::new(KeyCode::Char('I'), KeyModifiers::SHIFT);
        handle_key_event(&mut app, shifted);
        assert_eq!(app.session().pending_question(), "hI");
    }

    #[test]
    fn backspace_on_empty_input_is_safe() {
        let mut app = canned_app(false);
        handle_key_event(&mut app, key(KeyCode::Backspace));
        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.session().pending_question(), "");
    }

    #[test]
    fn enter_in_input_requests_submission() {
        let mut app = canned_app(false);
        handle_key_event(&mut app, key(KeyCode::Char('x')));

        assert_eq!(handle_key_event(&mut app, key(KeyCode::Enter)), Action::Submit);
        // The handler itself does not submit; the loop does
        assert_eq!(app.session().pending_question(), "x");
    }

    #[test]
    fn sidebar_keys_cycle_model_and_toggle_context() {
        let mut app = canned_app(false);
        app.next_focus();
        assert_eq!(app.focus(), Focus::Sidebar);

        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.session().model(), ModelSelection::MetaLlama3_70bInstruct);

        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.session().model(), ModelSelection::DbrxInstruct);

        assert!(!app.session().use_context());
        handle_key_event(&mut app, key(KeyCode::Char(' ')));
        assert!(app.session().use_context());
        handle_key_event(&mut app, key(KeyCode::Char(' ')));
        assert!(!app.session().use_context());
    }

    #[test]
    fn sidebar_keys_do_not_leak_into_the_input() {
        let mut app = canned_app(false);
        assert_eq!(app.focus(), Focus::Input);

        // j/k/space in the input are ordinary characters
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        handle_key_event(&mut app, key(KeyCode::Char(' ')));
        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.session().pending_question(), "j k");
        assert_eq!(app.session().model(), ModelSelection::DbrxInstruct);
    }

    #[test]
    fn conversation_keys_scroll_the_transcript() {
        let mut app = canned_app(false);
        app.next_focus();
        app.next_focus();
        assert_eq!(app.focus(), Focus::Conversation);

        handle_key_event(&mut app, key(KeyCode::Char('j')));
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.history_scroll(), 2);

        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.history_scroll(), 1);
    }

    #[test]
    fn ctrl_r_resets_the_conversation_from_any_focus() {
        let mut app = canned_app(false);
        app.toggle_context();
        for c in "A question".chars() {
            app.push_input_char(c);
        }
        app.submit();
        assert_eq!(app.session().history().len(), 2);

        app.next_focus();
        assert_eq!(handle_key_event(&mut app, ctrl('r')), Action::None);

        assert!(app.session().history().is_empty());
        // Settings survive the reset
        assert!(app.session().use_context());
    }
}
