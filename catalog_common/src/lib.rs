mod centavos;
mod helpers;
mod secret;

pub use centavos::{Centavos, CentavosConversionError, BRL_SYMBOL};
pub use helpers::{is_truthy, parse_boolean_flag};
pub use secret::Secret;
