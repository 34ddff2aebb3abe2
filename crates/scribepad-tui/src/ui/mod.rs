//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame layout, navbar, status bar and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color scheme and text styling
//! - `views`: One renderer per route (home, auth forms, articles)

pub mod input;
pub mod render;
pub mod styles;
pub mod views;
