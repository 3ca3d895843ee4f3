pub mod stack;
pub mod stack_value;

pub use stack::Stack;
pub use stack_value::{StackValue, ERROR_PREFIX};
