//! `lingam bootstrap`

use serde::Serialize;

use lingam_core::config::LingamConfig;
use lingam_fast::{bootstrap, BootstrapOptions, BootstrapResult};

use super::{prepare, resolve_variable};
use crate::cli::{BootstrapArgs, ReportFormat};
use crate::output::{emit, format_matrix, to_json};

#[derive(Debug, Serialize)]
struct BootstrapReport {
    method: &'static str,
    n_sampling: usize,
    n_fits: usize,
    min_causal_effect: f64,
    variables: Vec<String>,
    directions: Vec<NamedDirection>,
    dags: Vec<NamedDag>,
    /// `probabilities[to][from]`.
    probabilities: Vec<Vec<f64>>,
    total_effects: Vec<NamedEffect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<Vec<NamedPath>>,
}

#[derive(Debug, Serialize)]
struct NamedDirection {
    from: String,
    to: String,
    count: usize,
    probability: f64,
}

#[derive(Debug, Serialize)]
struct NamedDag {
    edges: Vec<String>,
    count: usize,
    probability: f64,
}

#[derive(Debug, Serialize)]
struct NamedEffect {
    from: String,
    to: String,
    effect: f64,
    probability: f64,
}

#[derive(Debug, Serialize)]
struct NamedPath {
    path: Vec<String>,
    effect: f64,
    probability: f64,
}

pub fn run(args: &BootstrapArgs, config: &LingamConfig) -> anyhow::Result<()> {
    let (data, estimator) = prepare(&args.input, &args.model, config)?;
    let endpoints = match (&args.from, &args.to) {
        (Some(from), Some(to)) => Some((resolve_variable(&data, from)?, resolve_variable(&data, to)?)),
        _ => None,
    };

    let options = BootstrapOptions::from_config(&config.bootstrap);
    let result = bootstrap(estimator.as_ref(), &data, &options)?;

    let report = summarize(
        &result,
        estimator.method().as_str(),
        options.n_sampling,
        config.bootstrap.effective_min_causal_effect(),
        args.top,
        endpoints,
    );
    let rendered = match args.format {
        ReportFormat::Json => to_json(&report)?,
        ReportFormat::Text => render_text(&report),
    };
    emit(args.output.as_deref(), &rendered)
}

fn summarize(
    result: &BootstrapResult,
    method: &'static str,
    n_sampling: usize,
    min_causal_effect: f64,
    top: usize,
    endpoints: Option<(usize, usize)>,
) -> BootstrapReport {
    let names = result.variable_names();
    let name = |i: usize| names.get(i).cloned().unwrap_or_else(|| format!("x{i}"));
    let n_fits = result.n_fits();
    let fraction = |count: usize| count as f64 / n_fits as f64;

    let directions = result
        .causal_direction_counts(Some(top), min_causal_effect, false)
        .into_iter()
        .map(|d| NamedDirection {
            from: name(d.from),
            to: name(d.to),
            count: d.count,
            probability: fraction(d.count),
        })
        .collect();

    let dags = result
        .dag_counts(Some(top), min_causal_effect, false)
        .into_iter()
        .map(|d| NamedDag {
            edges: d
                .edges
                .iter()
                .map(|e| format!("{} -> {}", name(e.from), name(e.to)))
                .collect(),
            count: d.count,
            probability: fraction(d.count),
        })
        .collect();

    let total_effects = result
        .total_causal_effects(min_causal_effect)
        .into_iter()
        .map(|t| NamedEffect {
            from: name(t.from),
            to: name(t.to),
            effect: t.effect,
            probability: t.probability,
        })
        .collect();

    let paths = endpoints.map(|(from, to)| {
        result
            .paths(from, to, min_causal_effect)
            .into_iter()
            .map(|p| NamedPath {
                path: p.path.iter().map(|&i| name(i)).collect(),
                effect: p.effect,
                probability: p.probability,
            })
            .collect()
    });

    BootstrapReport {
        method,
        n_sampling,
        n_fits,
        min_causal_effect,
        variables: names.to_vec(),
        directions,
        dags,
        probabilities: result.probabilities(min_causal_effect),
        total_effects,
        paths,
    }
}

fn render_text(report: &BootstrapReport) -> String {
    let mut out = format!(
        "method: {}\nfits: {}/{}\n\ndirections:\n",
        report.method, report.n_fits, report.n_sampling
    );
    for d in &report.directions {
        out.push_str(&format!("  {} -> {}  {:.0}%\n", d.from, d.to, 100.0 * d.probability));
    }
    out.push_str("\nDAGs:\n");
    for (k, d) in report.dags.iter().enumerate() {
        out.push_str(&format!("  #{}  {:.0}%\n", k + 1, 100.0 * d.probability));
        for e in &d.edges {
            out.push_str(&format!("    {e}\n"));
        }
    }
    out.push_str("\nprobabilities (row = to, column = from):\n");
    out.push_str(&format_matrix(&report.variables, &report.probabilities));
    out.push_str("\ntotal effects:\n");
    for t in &report.total_effects {
        out.push_str(&format!(
            "  {} -> {}  {:.3}  ({:.0}%)\n",
            t.from,
            t.to,
            t.effect,
            100.0 * t.probability
        ));
    }
    if let Some(paths) = &report.paths {
        out.push_str("\npaths:\n");
        for p in paths {
            out.push_str(&format!(
                "  {}  {:.3}  ({:.0}%)\n",
                p.path.join(" -> "),
                p.effect,
                100.0 * p.probability
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingam_core::models::AdjacencyMatrix;

    fn result() -> BootstrapResult {
        let strong = AdjacencyMatrix::from_rows(&[vec![0.0, 0.0], vec![1.0, 0.0]]).unwrap();
        let empty = AdjacencyMatrix::zeros(2);
        let te = |v: f64| vec![vec![0.0, 0.0], vec![v, 0.0]];
        BootstrapResult::new(
            vec![strong.clone(), strong, empty],
            vec![te(1.0), te(1.0), te(0.0)],
            vec![vec![0, 1], vec![1, 0], vec![0, 0]],
            vec!["a".into(), "b".into()],
        )
    }

    #[test]
    fn summary_uses_names_and_fractions() {
        let report = summarize(&result(), "direct", 3, 0.0, 5, Some((0, 1)));
        assert_eq!(report.n_fits, 3);
        assert_eq!(report.directions.len(), 1);
        assert_eq!(report.directions[0].from, "a");
        assert_eq!(report.directions[0].to, "b");
        assert!((report.directions[0].probability - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.dags[0].edges, vec!["a -> b".to_string()]);
        let paths = report.paths.as_ref().unwrap();
        assert_eq!(paths[0].path, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn text_lists_sections() {
        let report = summarize(&result(), "direct", 3, 0.0, 5, None);
        let text = render_text(&report);
        assert!(text.contains("fits: 3/3"));
        assert!(text.contains("a -> b  67%"));
        assert!(!text.contains("paths:"));
    }
}
