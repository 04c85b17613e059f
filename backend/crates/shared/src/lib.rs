//! Shared Kernel
//!
//! Vocabulary shared by every Origo crate:
//! - The unified [`error::app_error::AppError`] and its result alias
//! - [`error::kind::ErrorKind`], the HTTP-facing error classification
//! - Rendering as an axum response (feature `axum`)
//!
//! Only things whose meaning is identical across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
