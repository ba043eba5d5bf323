//! # Events Module
//!
//! Progress and diagnostic events emitted by the engines.
//!
//! ## Design
//! The engines never print. They emit events through a channel, and the
//! front end decides what to show (progress bar, warnings, nothing).
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Fingerprint(FingerprintEvent::Unreadable { path, .. }) = event {
//!             eprintln!("skipped {}", path.display());
//!         }
//!     }
//! });
//!
//! engine.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
