//! Session domain module.
//!
//! A session is the persisted description of all open tabs and which one is
//! active. Tab content lives outside the session document, in one side file
//! per tab, so the document stays small.
//!
//! # Module Structure
//!
//! - `model`: The session document (`Session`, `SessionTab`)
//! - `repository`: The persistence abstraction (`SessionRepository`) and load outcomes

mod model;
mod repository;

pub use model::{Session, SessionTab};
pub use repository::{RestoredSession, SessionLoad, SessionRepository};
