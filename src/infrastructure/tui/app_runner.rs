use std::io::Write;

use log::{debug, info};

use crate::infrastructure::input::KeySubscription;
use crate::infrastructure::terminal::Surface;
use crate::infrastructure::tui::input::InputHandler;
use crate::infrastructure::tui::widgets::Window;
use crate::interface_adapter::controller::{PagerAction, PagerController};
use crate::interface_adapter::port::TerminalModePort;

type TerminalController<W, M> = PagerController<Surface<W, M>>;

/// Run the pager until Escape is pressed or input ends.
///
/// The surface is closed (rendition reset, terminal mode restored) on every
/// exit path, including errors from the loop.
pub fn run<W: Write, M: TerminalModePort>(
    mut controller: TerminalController<W, M>,
) -> anyhow::Result<()> {
    // === Initialization ===
    let input_handler = InputHandler::new();

    // === Main loop ===
    let result = init(&mut controller)
        .and_then(|keys| main_loop(&mut controller, &input_handler, &keys));

    // === Cleanup (always runs) ===
    let closed = controller.usecase_mut().surface_mut().close();

    result?;
    closed?;
    Ok(())
}

/// Take the key stream, draw the frame once and render the first page.
fn init<W: Write, M: TerminalModePort>(
    controller: &mut TerminalController<W, M>,
) -> anyhow::Result<KeySubscription> {
    let usecase = controller.usecase_mut();
    let keys = usecase.surface_mut().subscribe()?;

    usecase.begin_frame();
    let (row, col, rows, cols) = usecase.layout().frame();
    let window = Window::new(row, col, rows, cols);
    window.draw(usecase.surface_mut());
    window.clear(usecase.surface_mut());
    usecase.capture_chrome();
    usecase.render()?;

    Ok(keys)
}

fn main_loop<W: Write, M: TerminalModePort>(
    controller: &mut TerminalController<W, M>,
    input_handler: &InputHandler,
    keys: &KeySubscription,
) -> anyhow::Result<()> {
    while let Some(input) = keys.recv() {
        let Some(action) = input_handler.handle(&input) else {
            continue;
        };
        debug!("Action {action:?}");

        match action {
            PagerAction::Quit => {
                controller.dispatch(action)?;
                info!("Quit requested");
                return Ok(());
            }
            PagerAction::ReportCursor => {
                let pos = controller.usecase_mut().surface_mut().cursor_pos()?;
                info!("Cursor position {pos}");
            }
            _ => controller.dispatch(action)?,
        }
    }

    info!("Input ended");
    Ok(())
}
