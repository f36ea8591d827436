use chrono::Local;
use std::path::{Path, PathBuf};
use std::process;
use tmac::adapters::outbound::console::StderrProgressReporter;
use tmac::adapters::outbound::filesystem::FileSystemReader;
use tmac::adapters::outbound::renderer::PlantUmlRenderer;
use tmac::application::dto::{ReportRequest, ReportResponse};
use tmac::application::factories::{
    FormatterFactory, FormatterType, PresenterFactory, PresenterType,
};
use tmac::application::read_models::ThreatReportReadModelBuilder;
use tmac::application::use_cases::GenerateReportUseCase;
use tmac::builtin;
use tmac::cli::Args;
use tmac::config::{self, ConfigFile};
use tmac::logging;
use tmac::ports::outbound::{DiagramRenderer, InputSource, ProgressReporter};
use tmac::shared::error::{ExitCode, TmacError};
use tmac::shared::security::validate_directory;
use tmac::shared::Result;
use tmac::threat_model::domain::Severity;
use tmac::threat_model::predicate::MissingAttributePolicy;

fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();

    if let Err(e) = logging::init_tracing(args.log_format) {
        eprintln!("❌ {}", e);
        process::exit(ExitCode::ApplicationError.as_i32());
    }

    match run(args) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(exit_code_for(&e).as_i32());
        }
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<TmacError>() {
        Some(TmacError::Validation { .. }) => ExitCode::InvalidArguments,
        _ => ExitCode::ApplicationError,
    }
}

/// Input sources and output location after merging flags, dotfile and built-ins
#[derive(Debug)]
struct RunInputs {
    config: InputSource,
    resources: InputSource,
    defaults: InputSource,
    security_checks: InputSource,
    endpoints: Option<InputSource>,
    output_dir: PathBuf,
}

impl RunInputs {
    /// Merges command-line flags over the dotfile
    ///
    /// # Errors
    /// Returns [`TmacError::Validation`] naming every required input that is
    /// still missing
    fn resolve(args: &Args, dotfile: ConfigFile) -> Result<Self> {
        let output_dir = args
            .output_dir
            .clone()
            .or(dotfile.output_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let security_checks = args
            .security_checks_file
            .clone()
            .or(dotfile.security_checks_file)
            .map(InputSource::Path)
            .unwrap_or_else(builtin::security_checks);

        if args.demo {
            return Ok(Self {
                config: builtin::demo_config(),
                resources: builtin::demo_resources(),
                defaults: builtin::demo_defaults(),
                security_checks,
                endpoints: Some(builtin::demo_swagger()),
                output_dir,
            });
        }

        let config = args.config_file.clone().or(dotfile.config_file);
        let resources = args.resources_file.clone().or(dotfile.resources_file);
        let defaults = args.defaults_file.clone().or(dotfile.defaults_file);

        let missing: Vec<&str> = [
            ("--resources-file", resources.is_none()),
            ("--config-file", config.is_none()),
            ("--defaults-file", defaults.is_none()),
        ]
        .into_iter()
        .filter_map(|(flag, is_missing)| is_missing.then_some(flag))
        .collect();

        match (config, resources, defaults) {
            (Some(config), Some(resources), Some(defaults)) => Ok(Self {
                config: InputSource::Path(config),
                resources: InputSource::Path(resources),
                defaults: InputSource::Path(defaults),
                security_checks,
                endpoints: args
                    .swagger_file
                    .clone()
                    .or(dotfile.swagger_file)
                    .map(InputSource::Path),
                output_dir,
            }),
            _ => Err(TmacError::Validation {
                message: format!(
                    "missing required input(s): {}\n\n💡 Hint: Pass them on the command line, record them in {}, or run with --demo",
                    missing.join(", "),
                    config::CONFIG_FILENAME
                ),
            }
            .into()),
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let progress_reporter = StderrProgressReporter::new();

    let dotfile = config::discover_config(&std::env::current_dir()?)?.unwrap_or_default();
    let inputs = RunInputs::resolve(&args, dotfile)?;

    if !args.stdout {
        validate_output_dir(&inputs.output_dir)?;
    }

    let policy = if args.lenient_missing_attributes {
        MissingAttributePolicy::TreatAsFalse
    } else {
        MissingAttributePolicy::Fail
    };

    let request = ReportRequest::new(
        inputs.config,
        inputs.resources,
        inputs.defaults,
        inputs.security_checks,
        Local::now().date_naive(),
    )
    .with_endpoints(inputs.endpoints)
    .with_missing_attribute_policy(policy);

    // Create use case with injected dependencies
    let use_case = GenerateReportUseCase::new(FileSystemReader::new(), &progress_reporter);
    let response = use_case.execute(request)?;

    let renderer = PlantUmlRenderer::new();
    let render = !args.stdout && !args.no_render && renderer.is_available();
    if !args.stdout && !args.no_render && !render {
        progress_reporter.report_error(
            "⚠️  Warning: plantuml was not found on PATH; the diagram will not be rendered",
        );
    }

    let diagram_image = render.then(|| format!("{}.svg", response.report_name));
    let model = ThreatReportReadModelBuilder::build(&response, diagram_image);

    progress_reporter.report(FormatterFactory::progress_message(FormatterType::Report));
    let report = FormatterFactory::create(FormatterType::Report).format(&model)?;

    if args.stdout {
        PresenterFactory::create(PresenterType::Stdout).present(&report)?;
        return severity_gate(&response, args.fail_on_severity);
    }

    let snapshot_type = FormatterType::Snapshot(args.snapshot_format);
    progress_reporter.report(FormatterFactory::progress_message(snapshot_type));
    let snapshot = FormatterFactory::create(snapshot_type).format(&model)?;

    let report_path = inputs
        .output_dir
        .join(format!("{}.md", response.report_name));
    PresenterFactory::create(PresenterType::File(report_path.clone())).present(&report)?;
    PresenterFactory::create(PresenterType::artefact(
        &inputs.output_dir,
        &response.report_name,
        args.snapshot_format.extension(),
    ))
    .present(&snapshot)?;

    if render {
        match renderer.render(&report_path) {
            Ok(image) => {
                progress_reporter.report(&format!("🖼️  Diagram rendered: {}", image.display()))
            }
            Err(e) => progress_reporter
                .report_error(&format!("⚠️  Warning: diagram rendering failed: {}", e)),
        }
    }

    progress_reporter.report_completion(&format!(
        "✅ Report written to {}",
        report_path.display()
    ));

    severity_gate(&response, args.fail_on_severity)
}

fn validate_output_dir(path: &Path) -> Result<()> {
    validate_directory(path).map_err(|reason| {
        TmacError::InvalidOutputDir {
            path: path.to_path_buf(),
            reason,
        }
        .into()
    })
}

fn severity_gate(response: &ReportResponse, fail_on_severity: Option<u8>) -> Result<ExitCode> {
    let Some(level) = fail_on_severity else {
        return Ok(ExitCode::Success);
    };

    let threshold = Severity::new(i64::from(level))?;
    if response.has_findings_at_or_above(threshold) {
        Ok(ExitCode::FindingsDetected)
    } else {
        Ok(ExitCode::Success)
    }
}
