// SPDX-License-Identifier: MIT

pub mod security;
pub mod session;

pub use session::{require_session, AuthUser};
