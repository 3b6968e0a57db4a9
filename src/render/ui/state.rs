//! UI state management structures
//!
//! The view state mirrors the banner set for display. The active banner is updated from
//! `Rotation` events rather than by re-reading element classes, so a frame never shows a
//! transition half-applied.

use crate::rotator::Rotation;
use std::time::Duration;

/// One banner row as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub label: String,
}

/// Display state for the banner list
#[derive(Debug)]
pub struct ViewState {
    /// Banners in rotation order
    pub banners: Vec<BannerView>,

    /// Index of the banner carrying the active marker, if any
    pub active: Option<usize>,

    /// Transitions seen so far
    pub ticks: u64,

    /// Rotation period, shown in the status line
    pub period: Duration,

    /// Status line content
    pub status_line: StatusLine,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(
        labels: Vec<String>,
        active: Option<usize>,
        period: Duration,
        viewport_width: u16,
        viewport_height: u16,
    ) -> Self {
        let active = active.filter(|&idx| idx < labels.len());
        Self {
            banners: labels
                .into_iter()
                .map(|label| BannerView { label })
                .collect(),
            active,
            ticks: 0,
            period,
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
        }
    }

    /// Rows available for banners (viewport height minus status line)
    pub fn lines_per_page(&self) -> u16 {
        self.viewport_height.saturating_sub(1)
    }

    /// First banner row to draw so the active banner stays visible
    pub fn first_visible_row(&self) -> usize {
        let page = self.lines_per_page() as usize;
        match self.active {
            Some(active) if page > 0 && active >= page => active + 1 - page,
            _ => 0,
        }
    }

    pub fn apply_rotation(&mut self, rotation: Rotation) {
        if rotation.current < self.banners.len() {
            self.active = Some(rotation.current);
        }
        self.ticks = rotation.tick;
    }

    /// Update terminal dimensions. Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        self.status_line
            .format_status_line(self.active, self.banners.len(), self.ticks, self.period)
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    /// Create a new status line
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn format_status_line(
        &self,
        active: Option<usize>,
        total: usize,
        ticks: u64,
        period: Duration,
    ) -> String {
        let position = match (active, total) {
            (_, 0) => "No banners".to_string(),
            (Some(idx), _) => format!("Banner {}/{}", idx + 1, total),
            (None, _) => format!("Banner -/{}", total),
        };
        let base = format!(
            "{} | tick {} | every {:.1}s",
            position,
            ticks,
            period.as_secs_f64()
        );

        match self.message {
            Some(ref message) => format!("{} | {}", base, message),
            None => base,
        }
    }
}
