//! REST API surface.
//!
//! - [`chat`]: orchestrated chat, JSON and SSE variants
//! - [`knowledge`]: document collection CRUD and stats
//! - [`threads`]: conversation thread management

pub mod chat;
pub mod knowledge;
pub mod threads;
