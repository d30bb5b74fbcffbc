use crate::error::CapabilityError;

/// Records which features the generated client actually exercises. The
/// operation-stub generator raises flags as it walks the contract; the
/// utility synthesizer reads them once stub generation is complete.
///
/// Flags are monotonic for the duration of a generation run: once raised
/// they stay raised, and an attempt to lower one fails with
/// [`CapabilityError::IllegalTransition`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClientCapabilities {
    query_params_found: bool,
    headers_found: bool,
    request_body_encoding_found: bool,
}

impl ClientCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise `query_params_found` when at least one query parameter is seen.
    pub fn set_query_params_found(&mut self, flag: bool) -> Result<(), CapabilityError> {
        if self.query_params_found && !flag {
            return Err(CapabilityError::IllegalTransition("query_params_found"));
        }
        self.query_params_found = flag;
        Ok(())
    }

    /// Raise `headers_found` when at least one header parameter is seen.
    pub fn set_headers_found(&mut self, flag: bool) -> Result<(), CapabilityError> {
        if self.headers_found && !flag {
            return Err(CapabilityError::IllegalTransition("headers_found"));
        }
        self.headers_found = flag;
        Ok(())
    }

    /// Raise `request_body_encoding_found` when at least one operation takes
    /// a URL-encoded request body.
    pub fn set_request_body_encoding_found(&mut self, flag: bool) -> Result<(), CapabilityError> {
        if self.request_body_encoding_found && !flag {
            return Err(CapabilityError::IllegalTransition(
                "request_body_encoding_found",
            ));
        }
        self.request_body_encoding_found = flag;
        Ok(())
    }

    pub fn query_params_found(&self) -> bool {
        self.query_params_found
    }

    pub fn headers_found(&self) -> bool {
        self.headers_found
    }

    pub fn request_body_encoding_found(&self) -> bool {
        self.request_body_encoding_found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_start_lowered() {
        let caps = ClientCapabilities::new();
        assert!(!caps.query_params_found());
        assert!(!caps.headers_found());
        assert!(!caps.request_body_encoding_found());
    }

    #[test]
    fn raising_is_idempotent() {
        let mut caps = ClientCapabilities::new();
        caps.set_headers_found(true).unwrap();
        caps.set_headers_found(true).unwrap();
        assert!(caps.headers_found());
    }

    #[test]
    fn lowering_a_raised_flag_is_an_illegal_transition() {
        let mut caps = ClientCapabilities::new();
        caps.set_query_params_found(true).unwrap();
        let err = caps.set_query_params_found(false).unwrap_err();
        assert!(matches!(err, CapabilityError::IllegalTransition(_)));
        assert!(caps.query_params_found());
    }

    #[test]
    fn setting_false_on_a_lowered_flag_is_allowed() {
        let mut caps = ClientCapabilities::new();
        caps.set_request_body_encoding_found(false).unwrap();
        assert!(!caps.request_body_encoding_found());
    }
}
