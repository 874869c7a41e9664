//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped loading and submission and delegates
//! rendering details to `components`. Access control is applied around the
//! pages by the guard components in `app`, never inside them.

pub mod dashboard;
pub mod landing;
pub mod trip_detail;
pub mod trip_form;
