//! Typed message channel between one widget and its host cell.
//!
//! Each direction has its own enum so a widget can only emit
//! `changed`/`validation`/`sync` and a host can only issue
//! `update`/`reset-to-defaults`. Endpoints are created in pairs and handed to
//! the widget at construction; there is no process-wide bus.

mod channel;
mod message;

pub use channel::{Bus, HostBus, WidgetBus, channel};
pub use message::{Inbound, Outbound, Topic};
