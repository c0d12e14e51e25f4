//! Event types and observers.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gamestate`] – state transition notifications for the arcade flow
//! - [`input`] – logical key presses and releases
//! - [`menu`] – menu entry confirmations
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod audio;
pub mod gamestate;
pub mod input;
pub mod menu;
pub mod switchdebug;
