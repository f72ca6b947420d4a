use crossterm::event::{KeyCode, KeyModifiers};
use log::{debug, warn};

use crate::domain::model::viewport::{COL_STEP, CONTROL_BOOST, ROW_STEP};
use crate::infrastructure::input::KeyInput;
use crate::interface_adapter::controller::PagerAction;

/// Converts decoded keys into `PagerAction`s.
///
/// Arrow keys scroll one step; with Control held the step grows by
/// `CONTROL_BOOST`. Keys without a binding yield `None` and cause no redraw.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, input: &KeyInput) -> Option<PagerAction> {
        let event = match input {
            KeyInput::Key { event, .. } => event,
            KeyInput::Unrecognized { raw } => {
                debug!("Ignoring unrecognized input {raw:02x?}");
                return None;
            }
            KeyInput::Error { message } => {
                warn!("Ignoring input error: {message}");
                return None;
            }
        };

        let boost = if event.modifiers.contains(KeyModifiers::CONTROL) {
            CONTROL_BOOST
        } else {
            0
        };

        let action = match event.code {
            KeyCode::Esc => PagerAction::Quit,
            KeyCode::Down => PagerAction::ScrollDown(ROW_STEP + boost),
            KeyCode::Up => PagerAction::ScrollUp(ROW_STEP + boost),
            KeyCode::Right => PagerAction::ScrollRight(COL_STEP + boost),
            KeyCode::Left => PagerAction::ScrollLeft(COL_STEP + boost),
            KeyCode::PageDown => PagerAction::PageDown,
            KeyCode::PageUp => PagerAction::PageUp,
            KeyCode::Enter => PagerAction::ReportCursor,
            _ => {
                debug!("No binding for {:02x?}", input.raw());
                return None;
            }
        };
        Some(action)
    }
}
