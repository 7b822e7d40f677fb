//! Configuration for skyfolio.
//!
//! Three files live in the platform directories:
//! - `config.toml`: animation and app tunables ([`Config`])
//! - `profile.toml`: the portfolio content ([`Profile`])
//! - `state.toml`: the persisted theme preference ([`ThemeStore`])
//!
//! Missing files fall back to defaults; malformed ones are errors.

mod config;
mod paths;
mod profile;
mod store;

pub use config::{Config, IntroSettings, SkySettings};
pub use paths::{config_path, profile_path, state_path};
pub use profile::{Profile, Section, Skill};
pub use store::ThemeStore;
