use thiserror::Error;

/// Constructor-level validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// An identifier that becomes a ledger key was empty
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    /// A proposal must aggregate at least one subject
    #[error("proposal {0} references no subjects")]
    EmptySubjectList(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EntityError::EmptyIdentifier("record id");
        assert_eq!(err.to_string(), "record id must not be empty");

        let err = EntityError::EmptySubjectList("P1".to_string());
        assert_eq!(err.to_string(), "proposal P1 references no subjects");
    }
}
