use crate::domain::model::viewport::PAGE_STEP;
use crate::interface_adapter::port::SurfacePort;
use crate::shared::error::AppError;
use crate::usecase::pager_usecase::PagerUsecase;

/// Pager actions (infrastructure-independent).
///
/// The input handler converts decoded keys into `PagerAction`s, and
/// `PagerController::dispatch` forwards them. Scroll distances are already
/// resolved (including any Control boost) by the time an action exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    ScrollDown(usize),
    ScrollUp(usize),
    ScrollRight(usize),
    ScrollLeft(usize),
    PageDown,
    PageUp,
    ReportCursor,
    Quit,
}

/// Thin controller that translates `PagerAction`s into usecase calls.
pub struct PagerController<S: SurfacePort> {
    usecase: PagerUsecase<S>,
}

impl<S: SurfacePort> PagerController<S> {
    pub fn new(usecase: PagerUsecase<S>) -> Self {
        Self { usecase }
    }

    /// Dispatch an action to the underlying usecase.
    ///
    /// `PagerAction::ReportCursor` is a no-op here: querying the cursor needs
    /// the concrete terminal, so the app runner handles it before dispatching.
    /// `PagerAction::Quit` clears the screen; leaving the loop is up to the
    /// caller.
    pub fn dispatch(&mut self, action: PagerAction) -> Result<(), AppError> {
        match action {
            PagerAction::ScrollDown(n) => self.usecase.scroll(signed(n), 0),
            PagerAction::ScrollUp(n) => self.usecase.scroll(-signed(n), 0),
            PagerAction::ScrollRight(n) => self.usecase.scroll(0, signed(n)),
            PagerAction::ScrollLeft(n) => self.usecase.scroll(0, -signed(n)),
            PagerAction::PageDown => self.usecase.scroll(signed(PAGE_STEP), 0),
            PagerAction::PageUp => self.usecase.scroll(-signed(PAGE_STEP), 0),
            PagerAction::ReportCursor => Ok(()),
            PagerAction::Quit => self.usecase.finish(),
        }
    }

    #[cfg(test)]
    pub fn usecase(&self) -> &PagerUsecase<S> {
        &self.usecase
    }

    pub fn usecase_mut(&mut self) -> &mut PagerUsecase<S> {
        &mut self.usecase
    }
}

fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}
