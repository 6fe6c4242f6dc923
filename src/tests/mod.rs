#[macro_use]
mod util;

mod properties;
