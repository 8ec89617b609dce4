#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod id;
pub mod manager;
pub mod telemetry;
pub mod toast;
pub mod types;

pub use id::{IdGenerator, SequentialIds, ToastId, UuidIds};
pub use manager::{Subscription, ToastManager};
pub use toast::{Dismiss, Toast, ToastInput};
pub use types::ToastKind;

pub type Result<T> = std::result::Result<T, error::Error>;
