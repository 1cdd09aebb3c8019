//! GitHub webhook verification and dispatch
//!
//! This module contains everything needed to turn one raw webhook delivery
//! into a response: signature verification, payload decoding, event
//! classification and branch routing.
//!
//! ## Submodules
//!
//! - [`handler`] - The verify → decode → classify → route flow
//! - [`schemas`] - Data structures for the incoming event and the response
//! - [`security`] - Constant-time x-hub-signature verification

pub mod handler;
pub mod schemas;
pub mod security;
