use thiserror::Error;

/// Resolution failures thrown out of `make`/`get`/`call`.
///
/// Every failure is synchronous and deterministic for a given binding state;
/// the container never substitutes a silent null for a failed resolution.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("NOT FOUND: no binding, alias, instance, or class metadata for '{abstract_key}'")]
    NotFound { abstract_key: String },

    #[error("RESOLUTION ERROR: {message}")]
    Resolution { message: String },

    #[error("CIRCULAR DEPENDENCY: {}", .chain.join(" -> "))]
    CircularDependency { chain: Vec<String> },

    #[error("UNRESOLVABLE DEPENDENCY: parameter '{parameter}' of '{class}' while resolving '{consumer}'")]
    UnresolvableDependency {
        parameter: String,
        class: String,
        consumer: String,
    },

    #[error("ALIAS LOOP: chain starting at '{alias}' exceeded {limit} hops")]
    AliasLoop { alias: String, limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_dependency_display_joins_chain() {
        let err = ContainerError::CircularDependency {
            chain: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(err.to_string(), "CIRCULAR DEPENDENCY: A -> B -> A");
    }

    #[test]
    fn test_unresolvable_dependency_names_all_parts() {
        let err = ContainerError::UnresolvableDependency {
            parameter: "logger".into(),
            class: "ReportController".into(),
            consumer: "ReportController".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("logger"));
        assert!(msg.contains("ReportController"));
    }
}
