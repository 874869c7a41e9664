//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session handle from context; route-level data
//! loading stays in `pages`.

pub mod auth_modal;
pub mod guard;
pub mod navbar;
pub mod trip_card;
