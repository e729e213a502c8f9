//! Concrete host collaborators for the notification widget.
//!
//! This crate provides what a page would otherwise get from the host
//! platform:
//! - [`gateway::HttpGateway`] talks to the platform's REST API.
//! - [`push::PushHub`] fans real-time messages out to subscribers.
//! - [`events::EventHub`] is the shared document/window event surface.
//! - [`console`] routes and alerts by writing to the log.
//! - [`config`] loads and stores the on-disk configuration.

pub mod config;
pub mod console;
pub mod events;
pub mod gateway;
pub mod push;
