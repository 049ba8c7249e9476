//! Anniversary notification engine.
//!
//! Consumes an employee snapshot export, classifies each person into a
//! single outcome category, reconciles the employment timelines of people
//! who left and came back, and sends tenure and birthday anniversary
//! notifications: monthly look-ahead rosters for HR and managers, and
//! same-day greetings and digests.
//!
//! All date logic runs against an injectable reference date, so the same
//! snapshot replayed with the same date yields the same messages.
//!
//! # Example
//!
//! ```no_run
//! use anniversary_engine::batch::run_batch;
//! use anniversary_engine::config::ConfigLoader;
//! use anniversary_engine::notify::{Dispatcher, Environment, NullMailer};
//! use anniversary_engine::source::FixedSnapshot;
//!
//! # fn main() -> anniversary_engine::error::EngineResult<()> {
//! let loader = ConfigLoader::load("./config/default")?;
//! let config = loader.config();
//! let dispatcher = Dispatcher::new(
//!     NullMailer,
//!     Environment::Test,
//!     config.recipients().test.clone(),
//! );
//! let mut source = FixedSnapshot::new(vec![]);
//! let summary = run_batch(&mut source, &dispatcher, config, None)?;
//! println!("sent {} messages", summary.messages_sent);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod processing;
pub mod source;
