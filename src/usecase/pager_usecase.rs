use log::debug;

use crate::domain::model::{LineBuffer, PageLayout, Viewport, clip_line};
use crate::domain::primitive::{SavedScreen, Theme};
use crate::interface_adapter::port::SurfacePort;
use crate::shared::error::AppError;

const SEPARATOR: &str = "━";
const COLUMN_BAR: &str = "│";

/// Scrolls a [`LineBuffer`] inside the frame drawn on a surface.
///
/// The frame (everything queued between [`begin_frame`](Self::begin_frame)
/// and [`capture_chrome`](Self::capture_chrome)) is snapshotted once and
/// replayed before every redraw, so only the text area is rendered again.
pub struct PagerUsecase<S: SurfacePort> {
    surface: S,
    lines: LineBuffer,
    viewport: Viewport,
    layout: PageLayout,
    theme: Theme,
    chrome: Option<SavedScreen>,
}

impl<S: SurfacePort> PagerUsecase<S> {
    pub fn new(surface: S, lines: LineBuffer) -> Self {
        let layout = PageLayout::for_size(surface.size());
        Self {
            surface,
            lines,
            viewport: Viewport::new(),
            layout,
            theme: Theme::DEFAULT,
            chrome: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[cfg(test)]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Clear the screen and select the chrome color for whatever is drawn next.
    pub fn begin_frame(&mut self) {
        self.surface.clear().style(self.theme.chrome);
    }

    /// Snapshot everything queued since `begin_frame` as the chrome.
    pub fn capture_chrome(&mut self) {
        let chrome = self.surface.save_screen();
        debug!("Captured {} bytes of chrome", chrome.len());
        self.chrome = Some(chrome);
    }

    /// Move the viewport by a signed delta and redraw.
    pub fn scroll(&mut self, rows: isize, cols: isize) -> Result<(), AppError> {
        self.viewport.scroll_by(
            rows,
            cols,
            self.lines.len(),
            self.layout.size.rows as usize,
        );
        debug!(
            "Viewport at row {} col {}",
            self.viewport.row(),
            self.viewport.col()
        );
        self.redraw()
    }

    /// Replay the chrome and render the current viewport.
    pub fn redraw(&mut self) -> Result<(), AppError> {
        if let Some(chrome) = &self.chrome {
            self.surface.restore_screen(chrome);
        }
        self.render()
    }

    /// Render the current viewport on top of whatever is queued, then flush.
    pub fn render(&mut self) -> Result<(), AppError> {
        let layout = self.layout;
        let theme = self.theme;
        self.surface
            .goto(layout.status_row, layout.status_col)
            .style(theme.chrome)
            .print_fmt(format_args!(
                "[{}/{}]",
                self.viewport.row(),
                self.viewport.col()
            ));

        let Some(header) = self.lines.header() else {
            self.surface.reset();
            return self.surface.flush();
        };

        let width = layout.text_width;
        let offset = self.viewport.col();
        self.surface
            .goto(layout.separator_row, layout.text_col)
            .style(theme.header)
            .print(&SEPARATOR.repeat(width));
        self.surface
            .goto(layout.header_row, layout.text_col)
            .print(&display_line(header, offset, width));

        let blank = " ".repeat(width);
        let mut index = self.viewport.row();
        for (shown, row) in (layout.first_data_row..=layout.last_text_row).enumerate() {
            let text = match self.lines.line(index) {
                Some(line) if shown < layout.data_rows => display_line(line, offset, width),
                _ => blank.clone(),
            };
            self.surface
                .goto(row, layout.text_col)
                .style(theme.data)
                .print(&text);
            index += 1;
        }

        self.surface.reset();
        self.surface.flush()
    }

    /// Clear the screen for exit.
    pub fn finish(&mut self) -> Result<(), AppError> {
        self.surface.clear();
        self.surface.flush()
    }
}

fn display_line(line: &str, offset: usize, width: usize) -> String {
    clip_line(line, offset, width).replace('|', COLUMN_BAR)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::primitive::TerminalSize;
    use crate::infrastructure::terminal::Surface;
    use crate::test_support::{RecordingMode, ScreenModel, SharedBuf, open_test_surface};

    type TestUsecase = PagerUsecase<Surface<SharedBuf, RecordingMode>>;

    fn table(rows: usize) -> LineBuffer {
        let mut lines = vec!["id | name ".to_string()];
        lines.extend((1..rows).map(|i| format!("{i:>2} | row{i:<3}")));
        LineBuffer::new(lines)
    }

    fn started(lines: LineBuffer) -> (TestUsecase, SharedBuf) {
        let (surface, out) = open_test_surface(TerminalSize::FALLBACK);
        let mut usecase = PagerUsecase::new(surface, lines);
        usecase.begin_frame();
        usecase.capture_chrome();
        usecase.render().unwrap();
        (usecase, out)
    }

    /// Screen after replaying only what the most recent frame wrote.
    fn screen_since(out: &SharedBuf, from: usize) -> ScreenModel {
        ScreenModel::from_bytes(TerminalSize::FALLBACK, &out.contents()[from..])
    }

    // =========================================================================
    // Tests: rendering
    // =========================================================================

    #[test]
    fn first_render_shows_header_and_first_page() {
        let (_usecase, out) = started(table(50));
        let screen = screen_since(&out, 0);

        assert_eq!(screen.row_text(1).trim(), "[1/0]");
        assert_eq!(screen.row_text(2).trim(), "id │ name");
        assert!(screen.row_text(3).trim().starts_with("━━━"));
        assert_eq!(screen.row_text(4).trim(), "1 │ row1");
        assert_eq!(screen.row_text(21).trim(), "18 │ row18");
        assert_eq!(screen.row_text(22).trim(), "");
    }

    #[test]
    fn status_is_echoed_fifteen_columns_from_the_right() {
        let (_usecase, out) = started(table(10));
        let screen = screen_since(&out, 0);
        assert_eq!(&screen.row_text(1)[64..], "[1/0]");
    }

    #[test]
    fn header_and_data_use_distinct_styles() {
        let (_usecase, out) = started(table(10));
        let screen = screen_since(&out, 0);

        assert_eq!(screen.style_at(2, 2), Theme::DEFAULT.header);
        assert_eq!(screen.style_at(3, 2), Theme::DEFAULT.header);
        assert_eq!(screen.style_at(4, 2), Theme::DEFAULT.data);
    }

    #[test]
    fn configured_theme_replaces_default_styles() {
        use crate::domain::primitive::{Color, Intensity, Style};

        let mut theme = Theme::DEFAULT;
        theme.data = Style {
            fg: Color::Yellow,
            bg: Color::Black,
            intensity: Intensity::Normal,
        };
        let (surface, out) = open_test_surface(TerminalSize::FALLBACK);
        let mut usecase = PagerUsecase::new(surface, table(10)).with_theme(theme);
        usecase.begin_frame();
        usecase.capture_chrome();
        usecase.render().unwrap();

        let screen = screen_since(&out, 0);
        assert_eq!(screen.style_at(4, 2), theme.data);
        assert_eq!(screen.style_at(2, 2), Theme::DEFAULT.header);
    }

    #[test]
    fn short_buffer_blanks_remaining_rows() {
        let (_usecase, out) = started(table(3));
        let screen = screen_since(&out, 0);

        assert_eq!(screen.row_text(5).trim(), "2 │ row2");
        for row in 6..=23 {
            assert_eq!(screen.row_text(row), "", "row {row}");
            assert_eq!(screen.style_at(row, 2), Theme::DEFAULT.data);
        }
    }

    #[test]
    fn empty_buffer_renders_status_only() {
        let (usecase, out) = started(LineBuffer::default());
        let screen = screen_since(&out, 0);

        assert_eq!(screen.row_text(1).trim(), "[1/0]");
        assert_eq!(screen.row_text(2), "");
        assert_eq!(usecase.viewport(), Viewport::new());
    }

    #[test]
    fn redraw_is_deterministic() {
        let (mut usecase, out) = started(table(50));
        usecase.scroll(3, 2).unwrap();

        let mark = out.contents().len();
        usecase.redraw().unwrap();
        let first = out.contents()[mark..].to_vec();
        usecase.redraw().unwrap();
        let second = out.contents()[mark + first.len()..].to_vec();

        assert_eq!(first, second);
    }

    // =========================================================================
    // Tests: scrolling
    // =========================================================================

    #[test]
    fn scroll_down_shifts_data_under_fixed_header() {
        let (mut usecase, out) = started(table(50));
        let mark = out.contents().len();
        usecase.scroll(1, 0).unwrap();
        let screen = screen_since(&out, mark);

        assert_eq!(screen.row_text(1).trim(), "[2/0]");
        assert_eq!(screen.row_text(2).trim(), "id │ name");
        assert_eq!(screen.row_text(4).trim(), "2 │ row2");
    }

    #[test]
    fn scroll_down_stops_at_last_page() {
        let (mut usecase, _) = started(table(50));
        for _ in 0..100 {
            usecase.scroll(1, 0).unwrap();
        }
        assert_eq!(usecase.viewport().row(), 32);
    }

    #[test]
    fn scroll_up_stops_below_header() {
        let (mut usecase, _) = started(table(50));
        usecase.scroll(-5, 0).unwrap();
        assert_eq!(usecase.viewport().row(), 1);
    }

    #[test]
    fn horizontal_scroll_clips_every_line() {
        let (mut usecase, out) = started(table(10));
        let mark = out.contents().len();
        usecase.scroll(0, 5).unwrap();
        let screen = screen_since(&out, mark);

        assert_eq!(screen.row_text(2).trim(), "name");
        assert_eq!(screen.row_text(4).trim(), "row1");
    }

    #[test]
    fn scrolling_past_longest_line_shows_blank_rows() {
        let (mut usecase, out) = started(table(10));
        let mark = out.contents().len();
        usecase.scroll(0, 200).unwrap();
        let screen = screen_since(&out, mark);

        assert_eq!(usecase.viewport().col(), 200);
        assert_eq!(screen.row_text(2), "");
        assert_eq!(screen.row_text(4), "");
    }

    #[test]
    fn finish_clears_screen() {
        let (mut usecase, out) = started(table(10));
        let mark = out.contents().len();
        usecase.finish().unwrap();
        assert_eq!(&out.contents()[mark..], b"\x1b[2J\x1b[H");
    }
}
