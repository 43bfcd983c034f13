use crate::config::AppConfig;
use crate::error::AppError;

use super::{build_app, outcome, require_session};

pub async fn run(config: &AppConfig) -> Result<(), AppError> {
    let (app, _) = build_app(config, false)?;
    require_session(&app).await?;
    outcome(app.approve_claim().await, "claim approval")
}
