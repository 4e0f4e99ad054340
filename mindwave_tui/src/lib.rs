//! ═══════════════════════════════════════════════════════════════════════════════
//! MINDWAVE TUI — Terminal Dashboard
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! One page per route: Home, Simulate, Results, Profile, Register, Login.
//! Pages render `SessionSnapshot`s and turn key presses into intents; all
//! simulation state lives in `mindwave`.
//!
//! ═══════════════════════════════════════════════════════════════════════════════

pub mod display;
pub mod keys;
pub mod runner;
pub mod state;

pub use runner::DashboardRunner;
pub use state::{App, Intent, Notice};
