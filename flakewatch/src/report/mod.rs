//! Report rendering.
//!
//! Pure emitters turning collected reports into output documents:
//!
//! - [`text`] - one `[number|count]: title` line per issue
//! - [`html`] - self-contained Bootstrap dashboard page
//!
//! Neither emitter sorts. Callers pick the ordering; by convention
//! text and HTML receive count-sorted reports while JSON comes
//! straight off the controller in collection order.

pub mod html;
pub mod text;
