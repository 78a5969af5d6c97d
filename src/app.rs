use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
    Terminal,
};
use tokio::sync::mpsc;

use crate::animation::{AnimationLoop, LoadingProgress};
use crate::config::VillageConfig;
use crate::error::ContactError;
use crate::input::{InputEvent, InputHandler};
use crate::pages::{ContactClient, ContactPage, MapView, PageRouter};
use crate::render::{
    map, pages, AboutWidget, ContactWidget, EdgeArrows, FadeOverlay, HelpOverlay, LoadingScreen,
    MapWidget, ProjectsWidget, StatusBar,
};
use crate::state::{Page, Route};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub village: VillageConfig,
    pub play_intro: bool,
    pub show_loading: bool,
    pub loading_duration: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            village: VillageConfig::default(),
            play_intro: true,
            show_loading: true,
            loading_duration: Duration::from_millis(2000),
        }
    }
}

/// What fills the screen right now
enum Screen {
    Loading(LoadingProgress),
    Map(MapView),
    Projects,
    About,
    Contact(ContactPage),
}

type ContactResult = Result<String, ContactError>;

/// Main application state
pub struct App {
    config: AppConfig,
    router: PageRouter,
    screen: Screen,
    animation_loop: AnimationLoop,
    input_handler: InputHandler,

    /// Terminal width in columns, fed to the viewport watcher
    columns: u16,
    /// Last drawn area above the status bar, for mouse hit tests
    last_main_area: Option<Rect>,
    intro_played: bool,
    show_help: bool,

    contact_client: ContactClient,
    contact_tx: mpsc::UnboundedSender<ContactResult>,
    contact_rx: mpsc::UnboundedReceiver<ContactResult>,

    running: bool,
}

impl App {
    pub fn new(config: AppConfig, columns: u16) -> Self {
        let (contact_tx, contact_rx) = mpsc::unbounded_channel();
        let router = PageRouter::new(Route::default(), config.village.timing.page_fade());
        let contact_client = ContactClient::new(config.village.contact_endpoint.clone());

        let mut app = Self {
            screen: Screen::Loading(LoadingProgress::new(config.loading_duration)),
            config,
            router,
            animation_loop: AnimationLoop::new(),
            input_handler: InputHandler::new(),
            columns,
            last_main_area: None,
            intro_played: false,
            show_help: false,
            contact_client,
            contact_tx,
            contact_rx,
            running: true,
        };
        if !app.config.show_loading {
            let route = *app.router.current();
            app.mount(route);
        }
        app
    }

    /// Run the application
    pub async fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        // Cleanup terminal, even when the loop failed
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let size = terminal.size()?;
        if size.width != self.columns {
            self.handle_event(InputEvent::Resize {
                width: size.width,
                height: size.height,
            });
        }

        while self.is_running() {
            self.handle_input();
            self.process_contact_results();

            if self.animation_loop.should_render() {
                let dt = self.animation_loop.delta();
                self.update(dt);

                terminal.draw(|frame| {
                    let area = frame.area();
                    self.last_main_area = Some(main_area(area));
                    self.render(area, frame.buffer_mut());
                })?;

                self.animation_loop.frame_rendered();
            }

            // Small sleep to prevent busy loop
            tokio::time::sleep(self.animation_loop.time_until_next_frame()).await;
        }

        tracing::info!(frames = self.animation_loop.frame_count(), "shutting down");
        Ok(())
    }

    pub fn current_page(&self) -> Page {
        match &self.screen {
            Screen::Loading(_) => Page::Map,
            Screen::Map(_) => Page::Map,
            Screen::Projects => Page::Projects,
            Screen::About => Page::About,
            Screen::Contact(_) => Page::Contact,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Replace the current screen with the one for `route`
    fn mount(&mut self, route: Route) {
        if let Screen::Map(map) = &mut self.screen {
            map.teardown();
        }

        self.screen = match route.page {
            Page::Map => {
                let play_intro = self.config.play_intro && !self.intro_played;
                self.intro_played = true;
                Screen::Map(MapView::mount(&self.config.village, &route, self.columns, play_intro))
            }
            Page::Projects => Screen::Projects,
            Page::About => Screen::About,
            Page::Contact => Screen::Contact(ContactPage::new()),
        };
        self.input_handler.set_text_entry(false);
        tracing::debug!(route = %route, "screen mounted");
    }

    /// Advance every animation by one frame
    fn update(&mut self, dt: Duration) {
        match &mut self.screen {
            Screen::Loading(progress) => {
                progress.tick(dt);
                if progress.is_done() {
                    tracing::info!("loading finished");
                    let route = *self.router.current();
                    self.mount(route);
                }
                // The router's reveal waits until the first real page is up
                return;
            }
            Screen::Map(map) => map.tick(dt, &mut self.router),
            Screen::Projects | Screen::About | Screen::Contact(_) => {}
        }

        self.router.tick(dt);
        if let Some((_, to)) = self.router.apply_pending() {
            self.mount(to);
        }
    }

    fn process_contact_results(&mut self) {
        while let Ok(result) = self.contact_rx.try_recv() {
            match &mut self.screen {
                Screen::Contact(page) => {
                    page.finish_submit(result);
                    self.input_handler.set_text_entry(page.is_editing());
                }
                _ => tracing::debug!(ok = result.is_ok(), "contact result arrived after leaving the page"),
            }
        }
    }

    /// Handle user input
    fn handle_input(&mut self) {
        let timeout = Duration::from_millis(1);

        if let Some(event) = self.input_handler.poll(timeout) {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.running = false,

            InputEvent::ToggleHelp => {
                self.show_help = !self.show_help;
                self.input_handler.set_help_visible(self.show_help);
            }

            InputEvent::CloseHelp => {
                self.show_help = false;
                self.input_handler.set_help_visible(false);
            }

            InputEvent::Back => {
                if !matches!(self.screen, Screen::Map(_) | Screen::Loading(_)) {
                    self.router.back_to_map();
                }
            }

            InputEvent::Go(entry) => match &mut self.screen {
                Screen::Map(map) => match map.activate(entry) {
                    Ok(started) => tracing::debug!(?entry, started, "door requested"),
                    Err(e) => tracing::error!(error = %e, "cannot walk to door"),
                },
                Screen::Loading(_) => {}
                _ => {
                    if Page::behind(entry) != self.current_page() {
                        self.router.go_through(entry);
                    }
                }
            },

            InputEvent::Skip => match &mut self.screen {
                Screen::Map(map) => map.skip(),
                Screen::Loading(progress) => {
                    progress.tick(self.config.loading_duration);
                }
                _ => {}
            },

            InputEvent::NextField => {
                if let Screen::Contact(page) = &mut self.screen {
                    page.focus_next();
                    self.input_handler.set_text_entry(true);
                }
            }

            InputEvent::LeaveField => {
                if let Screen::Contact(page) = &mut self.screen {
                    page.unfocus();
                }
                self.input_handler.set_text_entry(false);
            }

            InputEvent::CharInput(ch) => {
                if let Screen::Contact(page) = &mut self.screen {
                    page.input(ch);
                }
            }

            InputEvent::Backspace => {
                if let Screen::Contact(page) = &mut self.screen {
                    page.backspace();
                }
            }

            InputEvent::Submit => self.submit_contact(),

            InputEvent::MouseHover { x, y } => {
                let field = self.map_field();
                if let Screen::Map(map) = &mut self.screen {
                    map.hover(field.map(|field| (field, x, y)));
                }
            }

            InputEvent::MouseClick { x, y } => self.click(x, y),

            InputEvent::Resize { width, .. } => {
                self.columns = width;
                if let Screen::Map(map) = &mut self.screen {
                    map.resize(width);
                }
            }

            InputEvent::None => {}
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        let field = self.map_field();
        let edge = self
            .last_main_area
            .and_then(|area| pages::edge_at(area, x, y));

        match &mut self.screen {
            Screen::Map(map) => {
                let Some(field) = field else { return };
                if let Err(e) = map.click(field, x, y) {
                    tracing::error!(error = %e, "cannot walk to door");
                }
            }
            Screen::Loading(_) => {}
            _ => {
                if let Some(entry) = edge.filter(|e| Page::behind(*e) != self.current_page()) {
                    self.router.go_through(entry);
                }
            }
        }
    }

    /// Validate the form and post it on a background task
    fn submit_contact(&mut self) {
        let Screen::Contact(page) = &mut self.screen else {
            return;
        };
        let Some(form) = page.begin_submit() else {
            return;
        };

        let client = self.contact_client.clone();
        let tx = self.contact_tx.clone();
        tokio::spawn(async move {
            let result = client.submit(&form).await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, "contact submission failed");
            }
            // The app may already be gone
            let _ = tx.send(result);
        });
    }

    /// Cells the village was last drawn into, inside its border
    fn map_field(&self) -> Option<Rect> {
        self.last_main_area.map(map::inner)
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if let Screen::Loading(progress) = &self.screen {
            LoadingScreen::new(progress).render(area, buf);
            return;
        }

        let main = main_area(area);
        // Content stays undrawn while the page change holds on black
        if self.router.reveal().content_visible() {
            match &self.screen {
                Screen::Map(map) => MapWidget::new(map).render(main, buf),
                Screen::Projects => ProjectsWidget.render(main, buf),
                Screen::About => AboutWidget.render(main, buf),
                Screen::Contact(page) => ContactWidget::new(page).render(main, buf),
                Screen::Loading(_) => {}
            }
            if !matches!(self.screen, Screen::Map(_)) {
                EdgeArrows::new(self.current_page()).render(main, buf);
            }
        }

        let reveal = self.router.reveal().opacity();
        if reveal > 0.0 {
            FadeOverlay::new(reveal).render(main, buf);
        }

        if area.height > 0 {
            let status_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            let (mode, phase, mascot) = match &self.screen {
                Screen::Map(map) => (
                    Some(map.mode()),
                    Some(map.walk_phase()),
                    Some(map.position_state().position()),
                ),
                _ => (None, None, None),
            };
            let hint = self
                .input_handler
                .is_text_entry()
                .then_some("Tab:next Enter:send Esc:done");
            StatusBar::new(self.router.current())
                .mode(mode)
                .phase(phase)
                .mascot(mascot)
                .fps(self.animation_loop.fps())
                .hint(hint)
                .render(status_area, buf);
        }

        if self.show_help {
            HelpOverlay.render(area, buf);
        }
    }
}

/// Everything above the status bar
fn main_area(area: Rect) -> Rect {
    Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreography::WalkPhase;
    use crate::state::{Direction, EntryDirection};

    fn quiet_app() -> App {
        let config = AppConfig {
            play_intro: false,
            show_loading: false,
            ..AppConfig::default()
        };
        App::new(config, 120)
    }

    fn run_frames(app: &mut App, frames: usize) {
        for _ in 0..frames {
            app.update(Duration::from_millis(50));
        }
    }

    fn map(app: &App) -> &MapView {
        match &app.screen {
            Screen::Map(map) => map,
            _ => panic!("not on the map"),
        }
    }

    #[test]
    fn test_key_walk_reaches_page_and_back() {
        let mut app = quiet_app();
        app.handle_event(InputEvent::Go(EntryDirection::Up));
        assert_eq!(map(&app).walk_phase(), WalkPhase::LegOne);

        run_frames(&mut app, 40);
        assert_eq!(app.current_page(), Page::About);
        assert_eq!(app.router.current().to_string(), "/about?entry=up");

        app.handle_event(InputEvent::Back);
        run_frames(&mut app, 1);
        assert_eq!(app.current_page(), Page::Map);
        let state = map(&app).position_state();
        assert_eq!(state.position(), app.config.village.desktop.crossroad);
        assert_eq!(state.direction(), Direction::Front);
    }

    #[test]
    fn test_edge_arrow_keys_switch_pages() {
        let mut app = quiet_app();
        app.router.go_through(EntryDirection::Left);
        run_frames(&mut app, 1);
        assert_eq!(app.current_page(), Page::Projects);

        // Already here
        app.handle_event(InputEvent::Go(EntryDirection::Left));
        run_frames(&mut app, 1);
        assert_eq!(app.current_page(), Page::Projects);

        app.handle_event(InputEvent::Go(EntryDirection::Right));
        run_frames(&mut app, 1);
        assert_eq!(app.current_page(), Page::Contact);
    }

    #[test]
    fn test_loading_then_map() {
        let config = AppConfig {
            play_intro: false,
            loading_duration: Duration::from_millis(200),
            ..AppConfig::default()
        };
        let mut app = App::new(config, 120);
        assert!(matches!(app.screen, Screen::Loading(_)));
        run_frames(&mut app, 5);
        assert_eq!(app.current_page(), Page::Map);
        assert!(matches!(app.screen, Screen::Map(_)));
    }

    #[test]
    fn test_resize_reaches_map() {
        let mut app = quiet_app();
        app.handle_event(InputEvent::Resize { width: 60, height: 30 });
        let map = map(&app);
        assert_eq!(map.position_state().position(), app.config.village.mobile.default);
    }

    #[test]
    fn test_contact_typing_and_invalid_submit() {
        let mut app = quiet_app();
        app.router.go_through(EntryDirection::Right);
        run_frames(&mut app, 1);

        app.handle_event(InputEvent::NextField);
        assert!(app.input_handler.is_text_entry());
        for ch in "Ada".chars() {
            app.handle_event(InputEvent::CharInput(ch));
        }
        app.handle_event(InputEvent::Submit);

        let Screen::Contact(page) = &app.screen else {
            panic!("not on contact");
        };
        assert_eq!(page.form.name, "Ada");
        assert!(matches!(page.status(), crate::pages::SubmitStatus::Failed(_)));

        app.handle_event(InputEvent::LeaveField);
        assert!(!app.input_handler.is_text_entry());
    }

    #[test]
    fn test_click_on_drawn_building_corners() {
        let screen = Rect::new(0, 0, 120, 40);
        let field = map::inner(main_area(screen));
        let hotspots = quiet_app().config.village.desktop.hotspots.clone();

        for hotspot in &hotspots {
            let cells = hotspot.bounds.to_cells(field);
            for (x, y) in [(cells.left(), cells.top()), (cells.right() - 1, cells.bottom() - 1)] {
                let mut app = quiet_app();
                app.last_main_area = Some(main_area(screen));

                app.handle_event(InputEvent::MouseHover { x, y });
                assert_eq!(map(&app).hovered(), Some(hotspot.entry), "{} at ({}, {})", hotspot.name, x, y);

                app.handle_event(InputEvent::MouseClick { x, y });
                assert_eq!(map(&app).walk_phase(), WalkPhase::LegOne, "{} at ({}, {})", hotspot.name, x, y);
            }
        }
    }

    #[test]
    fn test_page_content_waits_for_reveal() {
        let mut app = quiet_app();
        let area = Rect::new(0, 0, 100, 40);
        app.router.go_through(EntryDirection::Left);
        app.update(Duration::ZERO);

        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        let drawn = |buf: &Buffer| {
            (0..area.height).any(|y| {
                let row: String = (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect();
                row.contains("Esc: back to the village")
            })
        };
        assert!(!drawn(&buf));

        run_frames(&mut app, 30);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        assert!(drawn(&buf));
    }

    #[test]
    fn test_quit() {
        let mut app = quiet_app();
        app.handle_event(InputEvent::Quit);
        assert!(!app.is_running());
    }

    #[test]
    fn test_render_every_screen() {
        let mut app = quiet_app();
        let area = Rect::new(0, 0, 100, 40);
        for entry in EntryDirection::ALL {
            app.router.go_through(entry);
            run_frames(&mut app, 30);
            let mut buf = Buffer::empty(area);
            app.render(area, &mut buf);
        }
        app.show_help = true;
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
    }
}
