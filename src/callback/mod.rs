//! Callback management for the nuke pipeline.
//!
//! Provides the event and filter managers that wrap user-supplied trait
//! objects.

pub mod event_manager;
pub mod filter_manager;

#[cfg(test)]
mod event_callback_properties;
