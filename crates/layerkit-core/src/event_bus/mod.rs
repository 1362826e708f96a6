//! # Subscriber Bus Module
//!
//! Minimal observable pattern used by stores to tell views that state moved.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use layerkit_core::event_bus::SubscriberBus;
//!
//! let bus: SubscriberBus<u64> = SubscriberBus::new();
//! let id = bus.subscribe(|revision| println!("now at revision {}", revision));
//! bus.publish(&1);
//! bus.unsubscribe(id);
//! ```

mod bus;

pub use bus::*;
