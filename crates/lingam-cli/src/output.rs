//! Writing results and reporting errors.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use lingam_core::errors::{
    ConfigError, DataError, EstimationError, GraphError, LingamError, LingamErrorCode,
};

/// Write `content` to `path`, or to stdout when no path is given.
pub fn emit(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Pretty JSON with a trailing newline. Non-finite floats become `null`.
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// `[CODE] message` for lingam errors, `[ERROR] message` for anything else.
pub fn coded_message(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<LingamError>() {
        e.coded_string()
    } else if let Some(e) = err.downcast_ref::<DataError>() {
        e.coded_string()
    } else if let Some(e) = err.downcast_ref::<EstimationError>() {
        e.coded_string()
    } else if let Some(e) = err.downcast_ref::<GraphError>() {
        e.coded_string()
    } else if let Some(e) = err.downcast_ref::<ConfigError>() {
        e.coded_string()
    } else {
        format!("[ERROR] {err:#}")
    }
}

/// Fixed-width matrix with row and column labels.
pub fn format_matrix(names: &[String], rows: &[Vec<f64>]) -> String {
    let width = names.iter().map(String::len).max().unwrap_or(0).max(8);
    let mut out = format!("{:width$}", "");
    for name in names {
        out.push_str(&format!(" {name:>width$}"));
    }
    out.push('\n');
    for (name, row) in names.iter().zip(rows) {
        out.push_str(&format!("{name:width$}"));
        for v in row {
            if v.is_nan() {
                out.push_str(&format!(" {:>width$}", "-"));
            } else {
                out.push_str(&format!(" {v:>width$.3}"));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coded_message_uses_error_code() {
        let err = anyhow::Error::new(DataError::NoVariables);
        assert_eq!(
            coded_message(&err),
            "[DATA_ERROR] Data matrix has no variables"
        );
    }

    #[test]
    fn coded_message_falls_back_for_other_errors() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(coded_message(&err), "[ERROR] boom");
    }

    #[test]
    fn matrix_marks_nan() {
        let names = vec!["a".to_string(), "b".to_string()];
        let text = format_matrix(&names, &[vec![f64::NAN, 0.5], vec![0.5, f64::NAN]]);
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("0.500"));
        assert!(text.lines().nth(1).is_some_and(|l| l.contains('-')));
    }
}
