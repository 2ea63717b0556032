mod args;
pub mod check;
mod run;

pub use args::{CheckArgs, RunArgs};
pub use check::check;
pub use run::run;
