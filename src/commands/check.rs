use crate::cli::setup;
use crate::config::{load_config, load_config_from, IospConfig};
use crate::core::{AnalysisUnit, CancellationToken, TableResolver};
use crate::diagnostics::Diagnostic;
use crate::io::{self, create_writer, OutputFormat, Report};
use crate::iosp::IospAnalyzer;
use crate::model::ProgramModel;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

pub struct CheckConfig {
    pub models: Vec<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub min_metric: Option<usize>,
    pub no_parallel: bool,
    pub jobs: Option<usize>,
    pub include_generated: bool,
    pub plain: bool,
}

pub fn check_models(check_config: CheckConfig) -> Result<Report> {
    let config = resolve_config(&check_config)?;

    setup::configure_color(check_config.plain, config.output.use_color);
    if config.analysis.parallel {
        setup::configure_thread_pool(config.analysis.jobs);
    }

    let units = load_units(&check_config.models)?;
    let report = analyze(&config, &units);
    info!(
        files = report.files_analyzed,
        violations = report.violation_count(),
        "Check complete"
    );

    let format = check_config
        .format
        .or(config.output.default_format)
        .unwrap_or(OutputFormat::Terminal);
    let sink = io::open_output(check_config.output.as_deref())?;
    let mut writer = create_writer(format, sink);
    writer.write_report(&report)?;

    Ok(report)
}

/// Config file (explicit or discovered) with command line overrides applied
fn resolve_config(check_config: &CheckConfig) -> Result<IospConfig> {
    let mut config = match &check_config.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };

    if let Some(min_metric) = check_config.min_metric {
        config.rule.min_metric = min_metric;
    }
    if check_config.no_parallel {
        config.analysis.parallel = false;
    }
    if let Some(jobs) = check_config.jobs {
        config.analysis.jobs = jobs;
    }
    if check_config.include_generated {
        config.analysis.include_generated = true;
    }
    Ok(config)
}

fn load_units(models: &[PathBuf]) -> Result<Vec<AnalysisUnit<TableResolver>>> {
    let mut units = Vec::new();
    for path in models {
        let loaded = ProgramModel::read_units(path)
            .with_context(|| format!("Cannot load program model {}", path.display()))?;
        tracing::debug!(model = %path.display(), files = loaded.len(), "Loaded program model");
        units.extend(loaded);
    }
    Ok(units)
}

pub fn analyze(config: &IospConfig, units: &[AnalysisUnit<TableResolver>]) -> Report {
    let analyzer = IospAnalyzer::from_config(config);
    let cancel = CancellationToken::new();

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    analyzer.analyze_units(units, &cancel, &mut diagnostics);

    Report {
        files_analyzed: units.len(),
        methods_analyzed: units.iter().map(|u| u.file.methods.len()).sum(),
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::sketch::{call, expr, method, FileSketch};
    use tempfile::TempDir;

    fn mixed_model() -> ProgramModel {
        let file = FileSketch::new("A.cs")
            .method(method("Integration", [call("Operation()").user(), expr("x == 42")]))
            .method(method("Operation", [expr("y + 1")]));
        ProgramModel {
            files: vec![file.to_model()],
        }
    }

    fn check_config(models: Vec<PathBuf>, output: PathBuf) -> CheckConfig {
        CheckConfig {
            models,
            format: Some(OutputFormat::Json),
            output: Some(output),
            config: None,
            min_metric: None,
            no_parallel: true,
            jobs: None,
            include_generated: false,
            plain: true,
        }
    }

    #[test]
    fn test_check_models_writes_report() {
        let dir = TempDir::new().unwrap();
        let model_path = dir.path().join("model.json");
        let out_path = dir.path().join("report.json");
        std::fs::write(&model_path, mixed_model().to_json().unwrap()).unwrap();

        let report = check_models(check_config(vec![model_path], out_path.clone())).unwrap();
        assert_eq!(report.files_analyzed, 1);
        assert_eq!(report.methods_analyzed, 2);
        assert_eq!(report.violation_count(), 1);
        assert_eq!(report.diagnostics[0].method_name, "Integration");

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out_path).unwrap()).unwrap();
        assert_eq!(written["diagnostics"][0]["metric"], 2);
    }

    #[test]
    fn test_min_metric_override() {
        let dir = TempDir::new().unwrap();
        let model_path = dir.path().join("model.json");
        std::fs::write(&model_path, mixed_model().to_json().unwrap()).unwrap();

        let mut config = check_config(vec![model_path], dir.path().join("r.json"));
        config.min_metric = Some(3);
        assert_eq!(check_models(config).unwrap().violation_count(), 0);
    }

    #[test]
    fn test_missing_model_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = check_config(vec![dir.path().join("absent.json")], dir.path().join("r.json"));
        assert!(check_models(config).is_err());
    }
}
