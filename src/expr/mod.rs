pub mod cond;
pub mod value;

pub use cond::{Criterion, Group, Joiner, Key};
pub use value::{IntoValue, Value};
