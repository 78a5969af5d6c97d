use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Duration;

use crate::state::EntryDirection;

/// Processed input events for the application
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Quit the application
    Quit,
    /// Leave a content page for the village
    Back,
    /// Head for the page behind a door (arrow keys or 1/2/3)
    Go(EntryDirection),
    /// Skip the intro or the speech bubble's typing
    Skip,
    /// Toggle help overlay
    ToggleHelp,
    /// Close help (any key when help is shown)
    CloseHelp,
    /// Move to the next contact form field
    NextField,
    /// Send the contact form
    Submit,
    /// Character typed into the focused field
    CharInput(char),
    /// Delete the last character of the focused field
    Backspace,
    /// Stop editing the contact form
    LeaveField,
    /// Mouse hover at position
    MouseHover { x: u16, y: u16 },
    /// Mouse click at position
    MouseClick { x: u16, y: u16 },
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// No event
    None,
}

/// Input handler for processing terminal events
pub struct InputHandler {
    help_visible: bool,
    text_entry: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            help_visible: false,
            text_entry: false,
        }
    }

    /// Set help visibility state
    pub fn set_help_visible(&mut self, visible: bool) {
        self.help_visible = visible;
    }

    /// Keys go to the focused form field while this is set
    pub fn set_text_entry(&mut self, active: bool) {
        self.text_entry = active;
    }

    pub fn is_text_entry(&self) -> bool {
        self.text_entry
    }

    /// Poll for input events with timeout
    pub fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        if event::poll(timeout).ok()? {
            self.translate(event::read().ok()?)
        } else {
            None
        }
    }

    /// Map a raw terminal event to an app event
    pub fn translate(&self, event: Event) -> Option<InputEvent> {
        match event {
            // Windows reports releases too; only presses count
            Event::Key(key_event) if key_event.kind == KeyEventKind::Release => None,
            Event::Key(key_event) => Some(self.handle_key(key_event)),
            Event::Mouse(mouse_event) => Some(self.handle_mouse(mouse_event)),
            Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
            _ => None,
        }
    }

    /// Handle keyboard input
    fn handle_key(&self, event: KeyEvent) -> InputEvent {
        // Ctrl+C always quits
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return InputEvent::Quit;
        }

        // If help is visible, any key closes it
        if self.help_visible {
            return InputEvent::CloseHelp;
        }

        if self.text_entry {
            return self.handle_text_key(event);
        }

        match event.code {
            KeyCode::Char('q') => InputEvent::Quit,

            KeyCode::Esc | KeyCode::Char('b') => InputEvent::Back,

            // Doors
            KeyCode::Left | KeyCode::Char('1') => InputEvent::Go(EntryDirection::Left),
            KeyCode::Up | KeyCode::Char('2') => InputEvent::Go(EntryDirection::Up),
            KeyCode::Right | KeyCode::Char('3') => InputEvent::Go(EntryDirection::Right),

            KeyCode::Char(' ') => InputEvent::Skip,

            // Contact form
            KeyCode::Tab => InputEvent::NextField,
            KeyCode::Enter => InputEvent::Submit,

            // Help
            KeyCode::Char('?') => InputEvent::ToggleHelp,

            _ => InputEvent::None,
        }
    }

    /// Handle keyboard input while a form field has focus
    fn handle_text_key(&self, event: KeyEvent) -> InputEvent {
        match event.code {
            KeyCode::Esc => InputEvent::LeaveField,
            KeyCode::Tab => InputEvent::NextField,
            KeyCode::Enter => InputEvent::Submit,
            KeyCode::Backspace => InputEvent::Backspace,
            KeyCode::Char(c) => InputEvent::CharInput(c),
            _ => InputEvent::None,
        }
    }

    /// Handle mouse input
    fn handle_mouse(&self, event: MouseEvent) -> InputEvent {
        match event.kind {
            MouseEventKind::Moved => InputEvent::MouseHover {
                x: event.column,
                y: event.row,
            },
            MouseEventKind::Down(MouseButton::Left) => InputEvent::MouseClick {
                x: event.column,
                y: event.row,
            },
            _ => InputEvent::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
