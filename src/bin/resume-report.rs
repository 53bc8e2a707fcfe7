//! resume-report CLI - analyse résumés and lay the analysis out as a PDF report

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use resume_report::layout::{OverflowPolicy, WrapBudget};
use resume_report::service::{analyze, HttpAnalysisService, ServiceConfig, ENDPOINT_VAR};
use resume_report::{
    build_report, resolve_job_role, AnalysisDocument, AnalysisRequest, Report, ReportConfig,
    ResumeFile, CUSTOM_ROLE, JOB_ROLES,
};

#[derive(Parser)]
#[command(name = "resume-report")]
#[command(version)]
#[command(about = "Analyse résumés against a job role and render the analysis as a PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out an analysis already saved as text
    Render {
        /// Analysis text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Job role printed in the header and used for the filename
        #[arg(short, long, default_value = "")]
        role: String,

        /// Output file or directory (named after the role if a directory or not given)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Send a résumé to the analysis service and print the analysis
    Analyze {
        /// Résumé file (.pdf, .doc, .docx or .txt)
        #[arg(long, value_name = "FILE", conflicts_with = "text", required_unless_present = "text")]
        resume: Option<PathBuf>,

        /// Résumé text, instead of a file
        #[arg(long)]
        text: Option<String>,

        /// One of the preset roles (see `roles`), or "Custom"
        #[arg(short, long, default_value = "Software Engineer")]
        role: String,

        /// The role to use when --role is "Custom"
        #[arg(long, value_name = "ROLE")]
        custom_role: Option<String>,

        /// Job description to compare the résumé against
        #[arg(short, long, default_value = "")]
        description: String,

        /// Analysis service URL
        #[arg(long, env = ENDPOINT_VAR)]
        endpoint: Option<String>,

        /// Request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Also render the analysis into a PDF in this directory
        #[arg(long, value_name = "DIR")]
        pdf: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// List the preset job roles
    Roles,
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// JSON report configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Date printed in the header, as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// What to do when the analysis runs off the page
    #[arg(long, value_enum)]
    overflow: Option<Overflow>,

    /// Wrap paragraphs by measured width instead of character count
    #[arg(long)]
    measured: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Overflow {
    /// Stop with a notice at the bottom of the first page
    Truncate,
    /// Continue onto further pages
    Paginate,
}

impl From<Overflow> for OverflowPolicy {
    fn from(overflow: Overflow) -> Self {
        match overflow {
            Overflow::Truncate => OverflowPolicy::Truncate,
            Overflow::Paginate => OverflowPolicy::NewPage,
        }
    }
}

impl LayoutArgs {
    fn config(&self) -> Result<ReportConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_json_file(path)?,
            None => ReportConfig::default(),
        };
        if let Some(overflow) = self.overflow {
            config = config.with_overflow(overflow.into());
        }
        if self.measured {
            config = config.with_wrap(WrapBudget::Measured);
        }
        Ok(config)
    }

    fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            role,
            output,
            layout,
        } => cmd_render(&input, role, output.as_deref(), &layout),
        Commands::Analyze {
            resume,
            text,
            role,
            custom_role,
            description,
            endpoint,
            timeout,
            pdf,
            layout,
        } => {
            cmd_analyze(
                resume.as_deref(),
                text,
                resolve_job_role(&role, custom_role.as_deref().unwrap_or_default()),
                description,
                endpoint,
                timeout,
                pdf.as_deref(),
                &layout,
            )
            .await
        }
        Commands::Roles => {
            cmd_roles();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_render(
    input: &Path,
    role: String,
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let analysis = AnalysisDocument::new(text, role, layout.date());
    let report = build_report(&analysis, &layout.config()?)?;
    save(&report, output)
}

#[allow(clippy::too_many_arguments)]
async fn cmd_analyze(
    resume: Option<&Path>,
    text: Option<String>,
    job_role: String,
    description: String,
    endpoint: Option<String>,
    timeout: Option<u64>,
    pdf: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let resume = match (resume, text) {
        (Some(path), _) => Some(ResumeFile::from_path(path)?),
        (None, Some(text)) => Some(ResumeFile::from_text(text)),
        (None, None) => None,
    };
    let request = AnalysisRequest {
        resume,
        job_role,
        job_description: description,
    };

    let mut service_config = ServiceConfig::from_env();
    if let Some(endpoint) = endpoint {
        service_config.endpoint = endpoint;
    }
    if let Some(secs) = timeout {
        service_config.timeout = Duration::from_secs(secs);
    }
    let service = HttpAnalysisService::new(&service_config)?;

    let analysis = analyze(&service, &request, layout.date()).await?;
    println!("{}", analysis.text);

    if let Some(dir) = pdf {
        fs::create_dir_all(dir)?;
        let report = build_report(&analysis, &layout.config()?)?;
        save(&report, Some(dir))?;
    }
    Ok(())
}

fn cmd_roles() {
    for role in JOB_ROLES {
        if role == CUSTOM_ROLE {
            println!("{role} (use with --custom-role)");
        } else {
            println!("{role}");
        }
    }
}

fn save(report: &Report, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = match output {
        Some(dir) if dir.is_dir() => dir.join(&report.filename),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(&report.filename),
    };
    report.save(&path)?;
    eprintln!(
        "Wrote {} ({} page(s))",
        path.display(),
        report.pages().len()
    );
    if report.truncated {
        eprintln!("Note: the analysis did not fit and was truncated; try --overflow paginate");
    }
    Ok(())
}
