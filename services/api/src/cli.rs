use crate::demo::{run_demo, run_match_role, run_match_student, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use skillbridge::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "SkillBridge",
    about = "Match vocational students to industry roles and curricula by competency",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank candidates for a single role or student
    Match {
        #[command(subcommand)]
        command: MatchCommand,
    },
    /// Walk through both matching directions on the bundled sample catalog
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MatchCommand {
    /// Rank students for a role
    Role(RoleMatchArgs),
    /// Rank roles (or curriculum programs) for a student
    Student(StudentMatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// JSON catalog snapshot. Defaults to the bundled sample catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Skills CSV export that replaces the catalog's students
    #[arg(long)]
    pub(crate) skills_csv: Option<PathBuf>,
    /// Maximum number of results; zero or negative returns none
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) limit: Option<i64>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RoleMatchArgs {
    /// Role identifier
    pub(crate) role_id: String,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct StudentMatchArgs {
    /// Student identifier
    pub(crate) student_id: String,
    /// Rank curriculum programs instead of roles
    #[arg(long)]
    pub(crate) curricula: bool,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match {
            command: MatchCommand::Role(args),
        } => run_match_role(args),
        Command::Match {
            command: MatchCommand::Student(args),
        } => run_match_student(args),
        Command::Demo(args) => run_demo(args),
    }
}
