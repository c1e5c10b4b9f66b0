//! droidplan CLI
//!
//! Resolves the build types of an Android project file into validated build
//! plans and drives the Gradle wrapper with them.

use anyhow::Result;
use clap::{Parser, Subcommand};
use droidplan_android::checks::check_plan;
use droidplan_android::keystore::KeystoreProperties;
use droidplan_android::{gradle, ArtifactKind, ConfigResolver, FsEnvironment, ProjectFile, Signing};
use droidplan_cli::output::{self, format_count, format_duration, Status};
use droidplan_cli::render;
use droidplan_core::config::Config;
use droidplan_core::error::{exit_codes, Error as CoreError, Result as CoreResult};
use droidplan_telemetry::{level_for_verbosity, TelemetryConfig, Timer};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "droidplan")]
#[command(about = "Resolve Android build variants into validated build plans")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project file path (overrides general.project_file)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one build type and print its plan
    Resolve {
        /// Build type (defaults to general.default_build_type)
        #[arg(short, long)]
        build_type: Option<String>,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
        /// Also print the Gradle dependencies block
        #[arg(long)]
        dependencies: bool,
    },

    /// Resolve every build type and report errors and warnings
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List build types
    Variants,

    /// Print the Gradle task producing a build type's artifact
    Task {
        #[arg(short, long)]
        build_type: Option<String>,
        /// Android App Bundle instead of APK
        #[arg(long)]
        bundle: bool,
    },

    /// Resolve a build type, then run Gradle with the plan
    Build {
        #[arg(short, long)]
        build_type: Option<String>,
        /// Android App Bundle instead of APK
        #[arg(long)]
        bundle: bool,
        /// Clean before building
        #[arg(long)]
        clean: bool,
    },
}

impl Commands {
    fn json(&self) -> bool {
        matches!(
            self,
            Self::Resolve { json: true, .. } | Self::Check { json: true, .. }
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        output::set_color(false);
    }

    let json = cli.command.json();
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_error(&e, json);
            std::process::exit(e.exit_code());
        }
    };

    droidplan_telemetry::init_with_config(&TelemetryConfig {
        log_level: level_for_verbosity(&config.schema.logging.level, cli.verbose, cli.quiet),
        json: cli.log_json || config.schema.logging.json,
        show_target: cli.verbose > 1,
    })?;

    let workspace = Workspace {
        config,
        project_override: cli.project,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Resolve {
            build_type,
            json,
            dependencies,
        } => run_resolve(&workspace, build_type, json, dependencies),
        Commands::Check { strict, json } => run_check(&workspace, strict, json),
        Commands::Variants => run_variants(&workspace),
        Commands::Task { build_type, bundle } => run_task(&workspace, build_type, bundle),
        Commands::Build {
            build_type,
            bundle,
            clean,
        } => run_build(&workspace, build_type, bundle, clean),
    };

    let exit_code = result.unwrap_or_else(|e| {
        report_error(&e, json);
        e.exit_code()
    });

    std::process::exit(exit_code);
}

/// Everything a command needs to find the project and its signing material
struct Workspace {
    config: Config,
    project_override: Option<PathBuf>,
    quiet: bool,
}

impl Workspace {
    fn project_path(&self) -> PathBuf {
        self.project_override.clone().unwrap_or_else(|| {
            self.config
                .base_dir()
                .join(&self.config.schema.general.project_file)
        })
    }

    fn load_project(&self) -> CoreResult<(PathBuf, ProjectFile)> {
        let path = self.project_path();
        let project = ProjectFile::load(&path)?;
        Ok((path, project))
    }

    fn build_type(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| self.config.schema.general.default_build_type.clone())
    }

    /// Resolver rooted at the project file's directory
    fn resolver(&self, project_path: &Path) -> CoreResult<ConfigResolver<FsEnvironment>> {
        let root = project_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let signing = &self.config.schema.signing;
        let mut env = FsEnvironment::new(root).with_env_prefix(&signing.credential_env_prefix);
        if let Some(file) = &signing.keystore_properties {
            let properties = KeystoreProperties::load(&self.config.base_dir().join(file))?;
            env = env.with_keystore_properties(properties);
        }
        Ok(ConfigResolver::new(env))
    }

    fn gradle_dir(&self) -> PathBuf {
        self.config
            .base_dir()
            .join(&self.config.schema.general.gradle_dir)
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            Status::info(message);
        }
    }
}

fn report_error(err: &CoreError, json: bool) {
    if json {
        match serde_json::to_string_pretty(&err.to_report()) {
            Ok(report) => println!("{report}"),
            Err(_) => Status::error(&err.message),
        }
        return;
    }

    Status::error(&err.message);
    if let Some(context) = &err.context {
        Status::hint(context);
    }
    if let Some(suggestion) = &err.suggestion {
        Status::hint(suggestion);
    }
}

fn print_warnings(warnings: &[droidplan_core::validation::ValidationWarning]) {
    for line in render::warning_lines(warnings) {
        Status::warning(&line);
    }
}

fn run_resolve(
    workspace: &Workspace,
    build_type: Option<String>,
    json: bool,
    dependencies: bool,
) -> CoreResult<i32> {
    let (path, project) = workspace.load_project()?;
    let build_type = workspace.build_type(build_type);
    let plan = workspace
        .resolver(&path)?
        .resolve_build_type(&project, &build_type)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(exit_codes::SUCCESS);
    }

    Status::header(&format!("{} ({})", plan.application_id, plan.build_type));
    print!("{}", render::plan_summary(&plan));
    if dependencies {
        println!();
        println!("{}", render::dependency_block(&plan));
    }
    print_warnings(check_plan(&plan).warnings());

    Ok(exit_codes::SUCCESS)
}

fn run_check(workspace: &Workspace, strict: bool, json: bool) -> CoreResult<i32> {
    droidplan_telemetry::timed_span!("check");

    let (path, project) = workspace.load_project()?;
    let resolver = workspace.resolver(&path)?;

    // the first resolution error decides the exit code; strict warnings only
    // fail the run when every build type resolved
    let mut first_error: Option<i32> = None;
    let mut strict_failed = false;
    let mut reports = Vec::new();

    for (build_type, result) in resolver.resolve_all(&project) {
        match result {
            Ok(plan) => {
                let checks = check_plan(&plan);
                let warnings = checks.warnings().to_vec();
                if let Err(e) = checks.to_result(strict) {
                    tracing::debug!(build_type = %build_type, error = %e, "Strict check failed");
                    strict_failed = true;
                }

                if !json {
                    if warnings.is_empty() {
                        Status::success(&format!("{build_type}: ok"));
                    } else {
                        Status::warning(&format!(
                            "{build_type}: {}",
                            format_count(warnings.len(), "warning", "warnings")
                        ));
                        print_warnings(&warnings);
                    }
                }
                reports.push(serde_json::json!({
                    "build_type": build_type,
                    "ok": true,
                    "warnings": warnings,
                }));
            }
            Err(e) => {
                let error = CoreError::from(e);
                first_error.get_or_insert(error.exit_code());

                if !json {
                    Status::error(&format!("{build_type}: {}", error.message));
                    if let Some(suggestion) = &error.suggestion {
                        Status::hint(suggestion);
                    }
                }
                reports.push(serde_json::json!({
                    "build_type": build_type,
                    "ok": false,
                    "error": error.to_report(),
                }));
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(match first_error {
        Some(code) => code,
        None if strict_failed => exit_codes::VALIDATION_ERROR,
        None => exit_codes::SUCCESS,
    })
}

fn run_variants(workspace: &Workspace) -> CoreResult<i32> {
    let (_, project) = workspace.load_project()?;
    let build_types = project.build_types();
    let width = build_types.iter().map(String::len).max().unwrap_or(0);

    for build_type in &build_types {
        match project.descriptor(build_type) {
            Ok(descriptor) => {
                let signing = match &descriptor.signing {
                    Signing::Debug => "debug".to_string(),
                    Signing::ReleaseKeystore { key_alias, .. } => format!("release ({key_alias})"),
                };
                println!(
                    "{build_type:<width$}  {}  {signing}",
                    descriptor.application_id
                );
            }
            Err(e) => println!("{build_type:<width$}  invalid: {e}"),
        }
    }

    Ok(exit_codes::SUCCESS)
}

fn artifact_kind(bundle: bool) -> ArtifactKind {
    if bundle {
        ArtifactKind::Bundle
    } else {
        ArtifactKind::Apk
    }
}

fn run_task(workspace: &Workspace, build_type: Option<String>, bundle: bool) -> CoreResult<i32> {
    let (path, project) = workspace.load_project()?;
    let build_type = workspace.build_type(build_type);
    let plan = workspace
        .resolver(&path)?
        .resolve_build_type(&project, &build_type)?;

    println!("{}", plan.gradle_task(artifact_kind(bundle)));
    Ok(exit_codes::SUCCESS)
}

fn run_build(
    workspace: &Workspace,
    build_type: Option<String>,
    bundle: bool,
    clean: bool,
) -> CoreResult<i32> {
    let (path, project) = workspace.load_project()?;
    let build_type = workspace.build_type(build_type);
    let plan = workspace
        .resolver(&path)?
        .resolve_build_type(&project, &build_type)?;
    print_warnings(check_plan(&plan).warnings());

    let gradle_dir = workspace.gradle_dir();

    if clean {
        workspace.info("Cleaning...");
        let result = gradle::clean(&gradle_dir)?;
        if !result.success {
            Status::error("Clean failed");
            eprintln!("{}", result.combined_output());
            return Ok(exit_codes::FAILURE);
        }
    }

    let kind = artifact_kind(bundle);
    let task = plan.gradle_task(kind);
    workspace.info(&format!("Running {task}..."));

    let timer = Timer::start(task.clone());
    let code = gradle::build(&gradle_dir, &plan, kind)?;
    let elapsed = timer.stop();

    if code == 0 {
        Status::success(&format!("{task} succeeded in {}", format_duration(elapsed)));
        Ok(exit_codes::SUCCESS)
    } else {
        Status::error(&format!("{task} failed with exit code {code}"));
        Ok(exit_codes::FAILURE)
    }
}
