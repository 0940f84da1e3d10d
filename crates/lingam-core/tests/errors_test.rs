//! Error codes and messages surfaced at the CLI boundary.

use lingam_core::errors::{
    ConfigError, DataError, EstimationError, GraphError, LingamError, LingamErrorCode,
};

#[test]
fn coded_strings_carry_stable_codes() {
    let e = DataError::Parse {
        line: 3,
        column: 2,
        value: "abc".to_string(),
    };
    assert_eq!(e.error_code(), "CSV_ERROR");
    assert!(e.coded_string().starts_with("[CSV_ERROR] CSV parse error at line 3, column 2"));

    let e = EstimationError::SingularMatrix {
        context: "inverse".to_string(),
    };
    assert_eq!(e.coded_string(), "[SINGULAR_MATRIX] Singular matrix in inverse");

    let e = GraphError::CycleDetected {
        path: "a -> b".to_string(),
    };
    assert_eq!(e.error_code(), "CYCLE_DETECTED");
}

#[test]
fn wrapped_data_errors_keep_their_code() {
    let e: EstimationError = DataError::ConstantColumn {
        name: "x1".to_string(),
    }
    .into();
    assert_eq!(e.error_code(), "DATA_ERROR");

    let e: EstimationError = DataError::PriorKnowledgeShape {
        expected: 3,
        rows: 2,
        cols: 2,
    }
    .into();
    assert_eq!(e.error_code(), "PRIOR_KNOWLEDGE_ERROR");
}

#[test]
fn aggregate_error_delegates_codes() {
    let cases: Vec<(LingamError, &str)> = vec![
        (DataError::NoVariables.into(), "DATA_ERROR"),
        (
            EstimationError::VariableOutOfRange {
                index: 4,
                n_variables: 3,
            }
            .into(),
            "INDEX_OUT_OF_RANGE",
        ),
        (
            GraphError::UnknownVariable {
                name: "z".to_string(),
            }
            .into(),
            "GRAPH_ERROR",
        ),
        (
            ConfigError::FileNotFound {
                path: "lingam.toml".to_string(),
            }
            .into(),
            "CONFIG_ERROR",
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code, "{err}");
        assert!(err.coded_string().starts_with(&format!("[{code}]")));
    }
}

#[test]
fn question_mark_converts_into_aggregate() {
    fn parse() -> Result<(), LingamError> {
        Err(DataError::TooFewSamples { min: 3, actual: 1 })?;
        Ok(())
    }
    assert!(matches!(
        parse(),
        Err(LingamError::Data(DataError::TooFewSamples { actual: 1, .. }))
    ));
}
