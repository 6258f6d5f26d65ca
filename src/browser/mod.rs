//! Browser automation module
//!
//! Chromium control through ChromiumOxide: one session per run, one tab per
//! page fetch.

pub mod controller;
pub mod navigation;

pub use controller::{BrowserConfig, BrowserSession};
pub use navigation::{PageNavigator, UrlValidator};
