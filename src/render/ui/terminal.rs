//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer using ratatui for a
//! cross-platform terminal interface. It only draws; rotation state arrives through the
//! `ViewState` maintained by the application.

use crate::error::Result;
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const ACTIVE_PREFIX: &str = " ● ";
const INACTIVE_PREFIX: &str = " ○ ";

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// Build the visible banner rows, highlighting the active one
    fn banner_lines<'a>(view_state: &'a ViewState, theme: &ColorTheme) -> Vec<Line<'a>> {
        let page = view_state.lines_per_page() as usize;
        view_state
            .banners
            .iter()
            .enumerate()
            .skip(view_state.first_visible_row())
            .take(page)
            .map(|(idx, banner)| {
                if view_state.active == Some(idx) {
                    Line::from(vec![
                        Span::styled(ACTIVE_PREFIX, theme.active_banner),
                        Span::styled(banner.label.as_str(), theme.active_banner),
                    ])
                } else {
                    let style = theme.inactive_banner();
                    Line::from(vec![
                        Span::styled(INACTIVE_PREFIX, style),
                        Span::styled(banner.label.as_str(), style),
                    ])
                }
            })
            .collect()
    }

    fn render_banners(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        if view_state.banners.is_empty() {
            let notice = Paragraph::new("No banners to rotate")
                .style(Style::default().fg(theme.error_text));
            frame.render_widget(notice, area);
            return;
        }

        let paragraph = Paragraph::new(Self::banner_lines(view_state, theme));
        frame.render_widget(paragraph, area);
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let size = frame.size();

                // Split screen: banner list and status line
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
                    .split(size);

                Self::render_banners(frame, chunks[0], view_state, theme);
                Self::render_status(frame, chunks[1], view_state, theme);
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            terminal.show_cursor()?;
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
