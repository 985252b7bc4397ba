//! Application event loop

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::api::ProgressSink;
use crate::course::Course;
use crate::learning::{CourseViewer, NavigationError, SubmissionOutcome, submit_in_background};
use crate::theme::Theme;
use crate::ui;
use state::{AppState, Effect, Screen};

/// The main application
pub struct App {
    /// Current application state
    state: AppState,

    /// Where finished lessons are persisted
    sink: Arc<dyn ProgressSink>,

    /// Outcomes of background progress submissions
    outcomes_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<SubmissionOutcome>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance for an already loaded course
    pub fn new(course: Course, sink: Arc<dyn ProgressSink>, auto_advance: Duration) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

        Ok(Self {
            state: AppState::new(initial_screen(course, auto_advance)),
            sink,
            outcomes_tx,
            outcomes_rx,
            terminal,
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let theme = Theme::default();

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.state, &theme);
            })?;

            // Handle events
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let in_quiz = self.state.in_quiz();
                        if let Some(action) = input::key_to_action(key.code, key.modifiers, in_quiz)
                        {
                            match self.state.apply(action, Instant::now()) {
                                Effect::Quit => break,
                                Effect::Submit(report) => {
                                    submit_in_background(
                                        self.sink.clone(),
                                        report,
                                        self.outcomes_tx.clone(),
                                    );
                                }
                                Effect::None => {}
                            }
                        }
                    }
                }
            }

            self.drain_outcomes();

            // Deferred lesson change after a finished quiz
            if let Some(viewer) = self.state.viewer_mut() {
                viewer.tick(Instant::now());
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Pick up finished progress submissions without waiting
    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            if let Some(viewer) = self.state.viewer_mut() {
                viewer.record_submission(&outcome);
            }
            self.state.take_notice();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Course screen, or the terminal empty state for a course without lessons
fn initial_screen(course: Course, auto_advance: Duration) -> Screen {
    let title = course.title.clone();
    match CourseViewer::new(course) {
        Ok(viewer) => Screen::Course(Box::new(viewer.with_auto_advance_delay(auto_advance))),
        Err(NavigationError::EmptyCourse) => Screen::Empty {
            title,
            message: "This course has no lessons yet.".to_string(),
        },
        Err(e) => Screen::Empty { title, message: e.to_string() },
    }
}
