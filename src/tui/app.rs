use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::domain::config::DevTermConfig;
use crate::domain::error::DevTermResult;
use crate::infrastructure::roster::{RosterClient, RosterPoller};

use super::{
    event::{AppEvent, EventHandler},
    state::AppState,
    ui::{draw_ui, ActiveView},
};

pub struct App {
    state: AppState,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    event_handler: EventHandler,
    roster_poller: Option<RosterPoller>,
    should_quit: bool,
    last_tick: Instant,
    tick_rate: Duration,
}

impl App {
    pub fn new(config: DevTermConfig) -> DevTermResult<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            state: AppState::new(config),
            terminal,
            event_handler: EventHandler::new(),
            roster_poller: None,
            should_quit: false,
            last_tick: Instant::now(),
            tick_rate: Duration::from_millis(100),
        })
    }

    pub async fn run(&mut self) -> DevTermResult<()> {
        self.start_roster_poller()?;

        loop {
            if let Ok(true) = event::poll(self.tick_rate) {
                if let Ok(evt) = event::read() {
                    match evt {
                        Event::Key(key) => {
                            let app_event = self.event_handler.handle_key_event(key, &mut self.state);
                            if let Some(app_event) = app_event {
                                self.apply(app_event)?;
                            }
                        }
                        Event::Resize(width, height) => {
                            self.state.terminal_size = (width, height);
                        }
                        _ => {}
                    }
                }
            }

            if self.last_tick.elapsed() >= self.tick_rate {
                self.tick();
                self.last_tick = Instant::now();
            }

            self.terminal.draw(|f| draw_ui(f, &mut self.state))?;

            if self.should_quit {
                break;
            }
        }

        // Leaving the app tears down any live session with it.
        self.state.close_session();
        Ok(())
    }

    fn apply(&mut self, event: AppEvent) -> DevTermResult<()> {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
            }
            AppEvent::Connect(device_id) => {
                // The roster poll belongs to the device list view only.
                self.roster_poller = None;
                self.state.open_session(device_id);
            }
            AppEvent::Disconnect => {
                self.state.close_session();
                self.start_roster_poller()?;
            }
            AppEvent::SendInput => {
                if let Some(controller) = self.state.controller.as_mut() {
                    if let Err(e) = controller.send_input() {
                        self.state.set_status_message(e.to_string());
                    }
                }
            }
            AppEvent::ClearTranscript => {
                if let Some(controller) = self.state.controller.as_mut() {
                    controller.clear();
                }
            }
            AppEvent::ToggleInputMode => {
                if let Some(controller) = self.state.controller.as_mut() {
                    controller.toggle_mode();
                }
            }
            AppEvent::ToggleAutoScroll => {
                if let Some(controller) = self.state.controller.as_mut() {
                    controller.toggle_auto_scroll();
                }
            }
        }
        Ok(())
    }

    fn tick(&mut self) {
        if self.state.active_view == ActiveView::Devices {
            if let Some(poller) = self.roster_poller.as_mut() {
                if let Some(devices) = poller.try_latest() {
                    if !devices.is_empty() {
                        self.state.clear_status_message();
                    }
                    self.state.set_devices(devices);
                }
            }
        }

        self.state.tick();
    }

    fn start_roster_poller(&mut self) -> DevTermResult<()> {
        let config = self.state.config();
        let client = RosterClient::new(
            config.server.devices_url(),
            Duration::from_millis(config.global.connect_timeout_ms),
        )?;
        let interval = Duration::from_millis(config.global.poll_interval_ms);
        self.roster_poller = Some(RosterPoller::start(client, interval));
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
