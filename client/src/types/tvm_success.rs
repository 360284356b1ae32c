use crate::types::TvmStackEntry;

/// Result of a get-method run as reported by the chain provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TvmSuccess {
    pub vm_log: Option<String>,
    pub vm_exit_code: i32,
    pub stack: Vec<TvmStackEntry>,
    pub gas_used: i32,
}

impl TvmSuccess {
    /// Successful run with the given result stack.
    pub fn with_stack(stack: Vec<TvmStackEntry>) -> TvmSuccess {
        TvmSuccess {
            vm_log: None,
            vm_exit_code: 0,
            stack,
            gas_used: 0,
        }
    }

    pub fn exit_code_is_success(&self) -> bool {
        // 1 is the alternative success code of TVM
        self.vm_exit_code == 0 || self.vm_exit_code == 1
    }
}
