//! Daily-journal backend for the Focus Guard browser extension.
//!
//! Notes are plain markdown files, one per day, inside a user's vault
//! (`<vault>/Progress/YYYY-MM-DD.md`). On top of that this crate computes:
//!
//! - **Streak**: consecutive days with a note that differs from the blank
//!   template, plus a 7-day activity window.
//! - **Carryover**: unfinished `- [ ]` tasks from the last week, minus anything
//!   ticked off anywhere in that week.
//! - **New-day note**: the template with carried tasks spliced into "Today's focus".
//!
//! # Modules
//!
//! - [`config`]: TOML config, env overrides, and the shared reloadable handle
//! - [`error`]: error taxonomy
//! - [`store`]: Note storage by calendar date
//! - [`journal`]: Template, task extraction, streak, carryover, and the service facade

pub mod config;
pub mod error;
pub mod journal;
pub mod store;
