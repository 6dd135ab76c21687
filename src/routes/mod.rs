mod general;
mod health_check;
mod helpers;

pub use general::*;
pub use health_check::health_check;
pub use helpers::{error_chain_fmt, prepare_html_template};
