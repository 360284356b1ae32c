mod error;
mod tvm_stack_entry;
mod tvm_success;

pub use error::*;
pub use tvm_stack_entry::*;
pub use tvm_success::*;
