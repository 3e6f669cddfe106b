use crate::cli::Command;
use crate::context::AppContext;

pub mod appointments;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod patients;
pub mod prescriptions;
pub mod status;
pub mod teleconsult;

/// Execute one parsed command
pub async fn run(command: Command, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        Command::Auth(cmd) => auth::run(cmd, ctx).await,
        Command::Patients(cmd) => patients::run(cmd, ctx).await,
        Command::Appointments(cmd) => appointments::run(cmd, ctx).await,
        Command::Prescriptions(cmd) => prescriptions::run(cmd, ctx).await,
        Command::Billing(cmd) => billing::run(cmd, ctx).await,
        Command::Teleconsult(cmd) => teleconsult::run(cmd, ctx).await,
        Command::Dashboard => dashboard::run(ctx).await,
        Command::Status => status::run(ctx).await,
    }
}
