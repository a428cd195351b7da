//! Uniform result returned by every mutating operation.

/// Outcome of an install/update/uninstall or source mutation.
///
/// Exactly one of `message` and `error_message` carries the narrative,
/// depending on `success`; use [`OperationResult::success`] and
/// [`OperationResult::failure`] to build values.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct OperationResult {
    /// Whether the operation is considered to have succeeded.
    pub success: bool,
    /// Narrative for successful operations.
    pub message: String,
    /// Narrative for failed operations.
    pub error_message: String,
    /// Exit code of the tool, when one was observed.
    pub exit_code: Option<i32>,
    /// Raw tool output.
    pub output: String,
}

impl OperationResult {
    /// Successful result carrying `message`.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Failed result carrying `error_message`.
    #[must_use]
    pub fn failure(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: error_message.into(),
            ..Self::default()
        }
    }

    /// Attach the raw tool output verbatim.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Attach the tool's exit code.
    #[must_use]
    pub const fn with_exit_code(mut self, exit_code: Option<i32>) -> Self {
        self.exit_code = exit_code;
        self
    }

    /// Whichever narrative is primary for this result.
    #[must_use]
    pub fn narrative(&self) -> &str {
        if self.success {
            &self.message
        } else {
            &self.error_message
        }
    }
}
