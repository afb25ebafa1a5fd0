//! # stepdown-image
//!
//! Image construction as a pure function: a typed recipe is parsed,
//! validated, and rendered into the runtime image descriptor. The same
//! recipe always renders the same bytes, so a digest of the rendering
//! identifies the build.

pub mod recipe;
pub mod render;
pub mod validator;
