//! ═══════════════════════════════════════════════════════════════════════════════
//! APP STATE — Pages, Sessions and Forms
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Each page that runs a simulation owns its `SessionDriver` only while it is
//! visible. Leaving the page drops the driver, which cancels its ticker.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::time::Instant;

use mindwave::animation::{Carousel, Rotator};
use mindwave::forms::{LoginForm, RegisterForm};
use mindwave::routes::Transition;
use mindwave::{
    Band, MindwaveConfig, Navigator, Route, SessionDriver, SessionSnapshot, SimulationSession,
};

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Navigate(Route),
    NextPage,
    PrevPage,
    Back,
    ToggleRun,
    CycleSpan,
    Reset,
    CarouselNext,
    CarouselPrev,
    CycleBand,
    ToggleAnalysis,
    FocusNext,
    FocusPrev,
    Input(char),
    Backspace,
    ToggleReveal,
    Submit,
    Quit,
}

/// Feedback line under a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub struct App {
    pub config: MindwaveConfig,
    nav: Navigator,
    /// Start of the current page visit, for animations
    entered_at: Instant,
    simulate: Option<SessionDriver>,
    demo: Option<SessionDriver>,
    /// Primary session state at the moment Simulate was left
    last_primary: Option<SessionSnapshot>,
    pub carousel: Carousel,
    pub rotator: Rotator,
    pub selected_band: Band,
    pub show_analysis: bool,
    pub register: RegisterForm,
    pub login: LoginForm,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: MindwaveConfig, start: Route) -> Self {
        let mut app = Self {
            config,
            nav: Navigator::new(start),
            entered_at: Instant::now(),
            simulate: None,
            demo: None,
            last_primary: None,
            carousel: Carousel::simulate_panels(),
            rotator: Rotator::default(),
            selected_band: Band::Alpha,
            show_analysis: false,
            register: RegisterForm::new(),
            login: LoginForm::new(),
            notice: None,
            should_quit: false,
        };
        app.enter(start);
        app
    }

    pub fn route(&self) -> Route {
        self.nav.current()
    }

    pub fn entered_at(&self) -> Instant {
        self.entered_at
    }

    pub fn simulate_snapshot(&self) -> Option<SessionSnapshot> {
        self.simulate.as_ref().map(|d| d.snapshot())
    }

    pub fn demo_snapshot(&self) -> Option<SessionSnapshot> {
        self.demo.as_ref().map(|d| d.snapshot())
    }

    pub fn last_primary(&self) -> Option<&SessionSnapshot> {
        self.last_primary.as_ref()
    }

    /// Driver of the page on screen, if it has one
    fn active_driver(&mut self) -> Option<&mut SessionDriver> {
        match self.nav.current() {
            Route::Simulate => self.simulate.as_mut(),
            Route::Results => self.demo.as_mut(),
            _ => None,
        }
    }

    pub fn is_form_page(&self) -> bool {
        matches!(self.route(), Route::Register | Route::Login)
    }

    pub fn can_go_back(&self) -> bool {
        self.nav.can_go_back()
    }

    fn enter(&mut self, route: Route) {
        self.entered_at = Instant::now();
        self.notice = None;
        match route {
            Route::Simulate => {
                let mut driver = SessionDriver::new(SimulationSession::primary(&self.config));
                driver.start();
                self.simulate = Some(driver);
            }
            Route::Results => {
                self.demo = Some(SessionDriver::new(SimulationSession::demo(&self.config)));
            }
            _ => {}
        }
    }

    fn leave(&mut self, route: Route) {
        match route {
            Route::Simulate => {
                if let Some(mut driver) = self.simulate.take() {
                    driver.stop();
                    self.last_primary = Some(driver.snapshot());
                }
            }
            Route::Results => {
                self.demo = None;
            }
            _ => {}
        }
    }

    fn transition(&mut self, transition: Option<Transition>) {
        if let Some(t) = transition {
            self.leave(t.from);
            self.enter(t.to);
            tracing::info!(from = %t.from, to = %t.to, "page changed");
        }
    }

    pub fn navigate(&mut self, route: Route) {
        let t = self.nav.navigate(route);
        self.transition(t);
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Quit => self.should_quit = true,
            Intent::Navigate(route) => self.navigate(route),
            Intent::NextPage => self.navigate(self.route().next()),
            Intent::PrevPage => self.navigate(self.route().prev()),
            Intent::Back => {
                let t = self.nav.back();
                self.transition(t);
            }
            Intent::ToggleRun => {
                if let Some(driver) = self.active_driver() {
                    driver.toggle();
                }
            }
            Intent::CycleSpan => {
                if let Some(driver) = self.active_driver() {
                    driver.cycle_span();
                }
            }
            Intent::Reset => {
                if let Some(driver) = self.active_driver() {
                    driver.reset();
                }
            }
            Intent::CarouselNext => {
                self.carousel.next();
            }
            Intent::CarouselPrev => {
                self.carousel.prev();
            }
            Intent::CycleBand => self.selected_band = self.selected_band.next(),
            Intent::ToggleAnalysis => self.show_analysis = !self.show_analysis,
            Intent::FocusNext => match self.route() {
                Route::Register => self.register.focus_next(),
                Route::Login => self.login.focus_next(),
                _ => {}
            },
            Intent::FocusPrev => match self.route() {
                Route::Register => self.register.focus_prev(),
                Route::Login => self.login.focus_prev(),
                _ => {}
            },
            Intent::Input(c) => match self.route() {
                Route::Register => self.register.input(c),
                Route::Login => self.login.input(c),
                _ => {}
            },
            Intent::Backspace => match self.route() {
                Route::Register => self.register.backspace(),
                Route::Login => self.login.backspace(),
                _ => {}
            },
            Intent::ToggleReveal => match self.route() {
                Route::Register => self.register.toggle_reveal(),
                Route::Login => self.login.toggle_reveal(),
                _ => {}
            },
            Intent::Submit => self.submit(),
        }
    }

    fn submit(&mut self) {
        let result = match self.route() {
            Route::Register if self.register.can_submit() => self
                .register
                .submit()
                .map(|r| format!("Account created for {}", r.email)),
            Route::Register => return,
            Route::Login => self
                .login
                .submit()
                .map(|l| format!("Signed in as {}", l.email)),
            _ => return,
        };
        self.notice = Some(match result {
            Ok(msg) => Notice::Info(msg),
            Err(e) => Notice::Error(e.to_string()),
        });
    }
}
