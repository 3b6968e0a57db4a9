//! Application orchestration layer
//!
//! Wires a document, the rotator and a UI together. The rotator runs on the tokio
//! scheduler and reports each transition over a channel; the event loop folds those and
//! the user's input into the view state.

pub mod runtime;

use crate::banner::BannerSet;
use crate::config::RotatorConfig;
use crate::error::{Result, RotatorError};
use crate::host::{ElementRef, IntervalHandle, MemoryDocument, TokioScheduler};
use crate::input::InputAction;
use crate::render::ui::{UIRenderer, ViewState};
use crate::render::RenderLoopState;
use crate::rotator::{Rotation, Rotator};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Display label for a banner: its `src`, else its `alt`, else tag and position.
pub fn banner_label(element: &ElementRef, index: usize) -> String {
    element
        .attribute("src")
        .or_else(|| element.attribute("alt"))
        .unwrap_or_else(|| format!("<{}> #{}", element.tag_name(), index + 1))
}

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    config: RotatorConfig,
    document: MemoryDocument,
    ui_renderer: Box<dyn UIRenderer>,
}

impl Application {
    pub fn new(
        config: RotatorConfig,
        document: MemoryDocument,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            document,
            ui_renderer,
        })
    }

    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    fn banners(&self) -> Result<BannerSet<ElementRef>> {
        let selector = self.config.parsed_selector()?;
        Ok(BannerSet::query(&self.document, &selector))
    }

    fn labels(banners: &BannerSet<ElementRef>) -> Vec<String> {
        banners
            .iter()
            .enumerate()
            .map(|(idx, element)| banner_label(element, idx))
            .collect()
    }

    /// Start rotating on the current tokio runtime. The handle is `None` for an empty set.
    fn start_rotation(
        &self,
        banners: BannerSet<ElementRef>,
    ) -> Result<(Option<IntervalHandle>, UnboundedReceiver<Rotation>)> {
        let scheduler = TokioScheduler::current()?;
        let (rotation_tx, rotation_rx) = mpsc::unbounded_channel();
        let handle = Rotator::new(banners)
            .with_marker(self.config.active_class.clone())
            .with_observer(rotation_tx)
            .start(&scheduler, self.config.period())?;
        Ok((handle, rotation_rx))
    }

    /// Run the interactive display, reading keys from the terminal until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread =
            runtime::spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let result = self.run_with_input(input_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        if input_thread.join().is_err() {
            log::warn!("input thread panicked");
        }
        result
    }

    /// Run the interactive display against an arbitrary source of input actions.
    ///
    /// Returns once a `Quit` action arrives or the input channel closes.
    pub async fn run_with_input(
        &mut self,
        mut input_rx: UnboundedReceiver<InputAction>,
    ) -> Result<()> {
        let banners = self.banners()?;

        self.ui_renderer.initialize()?;
        let result = self.event_loop(banners, &mut input_rx).await;
        let cleanup = self.ui_renderer.cleanup();

        result.and(cleanup)
    }

    async fn event_loop(
        &mut self,
        banners: BannerSet<ElementRef>,
        input_rx: &mut UnboundedReceiver<InputAction>,
    ) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let active = banners
            .marked_indices(&self.config.active_class)
            .first()
            .copied();
        let mut view_state = ViewState::new(
            Self::labels(&banners),
            active,
            self.config.period(),
            width,
            height,
        );

        let (handle, mut rotation_rx) = self.start_rotation(banners)?;
        if handle.is_none() {
            view_state.status_line.set_message(format!(
                "nothing matches '{}'",
                self.config.selector
            ));
        }

        let mut render_state = RenderLoopState::new();
        let outcome = loop {
            if render_state.needs_redraw() {
                if let Err(err) = self.ui_renderer.render(&view_state) {
                    break Err(err);
                }
                render_state.mark_drawn();
            }

            tokio::select! {
                action = input_rx.recv() => match action {
                    Some(action) => {
                        if !render_state.process_action(action, &mut view_state) {
                            break Ok(());
                        }
                    }
                    None => break Ok(()),
                },
                Some(rotation) = rotation_rx.recv() => {
                    render_state.apply_rotation(rotation, &mut view_state);
                }
            }
        };

        if let Some(handle) = handle {
            handle.cancel();
        }
        outcome
    }

    /// Rotate without a UI, logging each transition at `info`.
    ///
    /// Stops after `max_ticks` transitions when given, otherwise on Ctrl-C. Returns the
    /// number of transitions observed.
    pub async fn run_headless(&self, max_ticks: Option<u64>) -> Result<u64> {
        let banners = self.banners()?;
        let labels = Self::labels(&banners);

        let (handle, mut rotation_rx) = self.start_rotation(banners)?;
        let Some(handle) = handle else {
            log::info!(
                "no banners match '{}', nothing to rotate",
                self.config.selector
            );
            return Ok(0);
        };
        log::info!(
            "rotating {} banner(s) every {:?}",
            labels.len(),
            self.config.period()
        );

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut seen = 0;
        while max_ticks.map_or(true, |max| seen < max) {
            tokio::select! {
                Some(rotation) = rotation_rx.recv() => {
                    seen = rotation.tick;
                    log::info!(
                        "tick {}: {} -> {}",
                        rotation.tick,
                        labels.get(rotation.previous).map_or("?", String::as_str),
                        labels.get(rotation.current).map_or("?", String::as_str),
                    );
                }
                interrupted = &mut ctrl_c => {
                    interrupted.map_err(|err| RotatorError::io("waiting for Ctrl-C", err))?;
                    log::info!("interrupted after {} transition(s)", seen);
                    break;
                }
            }
        }

        handle.cancel();
        Ok(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ui::MockUIRenderer;
    use tokio::time;

    fn app_with(sources: &[&str], renderer: MockUIRenderer) -> Application {
        let config = RotatorConfig::default();
        let document = MemoryDocument::image_slider(sources.iter().copied(), &config.active_class);
        Application::new(config, document, Box::new(renderer)).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = RotatorConfig {
            interval_ms: 0,
            ..RotatorConfig::default()
        };
        let result = Application::new(
            config,
            MemoryDocument::new(),
            Box::new(MockUIRenderer::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn labels_fall_back_to_tag_and_position() {
        let with_src = ElementRef::new("img").with_attribute("src", "hero.png");
        let with_alt = ElementRef::new("img").with_attribute("alt", "Harvest");
        let bare = ElementRef::new("img");

        assert_eq!(banner_label(&with_src, 0), "hero.png");
        assert_eq!(banner_label(&with_alt, 1), "Harvest");
        assert_eq!(banner_label(&bare, 2), "<img> #3");
    }

    #[tokio::test(start_paused = true)]
    async fn interactive_loop_renders_each_rotation() {
        let renderer = MockUIRenderer::new();
        let record = renderer.record();
        let mut app = app_with(&["a.png", "b.png", "c.png"], renderer);

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(12_500)).await;
            let _ = input_tx.send(InputAction::Quit);
        });

        tokio_test::assert_ok!(app.run_with_input(input_rx).await);

        let record = record.lock().unwrap();
        assert_eq!(
            record.active_history,
            vec![Some(0), Some(1), Some(2), Some(0)]
        );
        assert_eq!(
            record.last_status.as_deref(),
            Some("Banner 1/3 | tick 3 | every 4.0s")
        );
        assert!(record.cleaned_up);
    }

    #[tokio::test(start_paused = true)]
    async fn interactive_loop_with_no_banners_waits_for_quit() {
        let renderer = MockUIRenderer::new();
        let record = renderer.record();
        let mut app = app_with(&[], renderer);

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(20)).await;
            let _ = input_tx.send(InputAction::Quit);
        });

        app.run_with_input(input_rx).await.unwrap();

        let record = record.lock().unwrap();
        assert_eq!(record.active_history, vec![None]);
        assert_eq!(
            record.last_status.as_deref(),
            Some("No banners | tick 0 | every 4.0s | nothing matches '.image-slider img'")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closing_input_ends_the_loop() {
        let mut app = app_with(&["a.png"], MockUIRenderer::new());
        let (input_tx, input_rx) = mpsc::unbounded_channel::<InputAction>();
        drop(input_tx);
        assert!(app.run_with_input(input_rx).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn headless_stops_after_requested_ticks() {
        let app = app_with(&["a.png", "b.png"], MockUIRenderer::new());
        let seen = app.run_headless(Some(5)).await.unwrap();
        assert_eq!(seen, 5);
        assert_eq!(
            app.banners().unwrap().marked_indices("active"),
            vec![1]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn headless_with_no_banners_returns_immediately() {
        let app = app_with(&[], MockUIRenderer::new());
        assert_eq!(app.run_headless(Some(3)).await.unwrap(), 0);
    }
}
