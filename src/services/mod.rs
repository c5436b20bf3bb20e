pub mod aggregate;
pub mod authorization;
pub mod members;
pub mod projects;

use crate::error::ApiError;
use crate::gateway::{ProcedureCall, ProcedureGateway, ProcedureOutcome, ResultSets};

pub use aggregate::group_project_rows;
pub use authorization::{can_create_project, can_mutate_project, Caller, Role};

/// Issue a call and unwrap its data. A procedure-reported failure becomes a
/// 500 with `failure_message`; gateway errors propagate unchanged.
pub(crate) async fn call_for_rows(
    gateway: &dyn ProcedureGateway,
    call: ProcedureCall,
    failure_message: &str,
) -> Result<ResultSets, ApiError> {
    match gateway.call(&call).await? {
        ProcedureOutcome::Rows(sets) => Ok(sets),
        ProcedureOutcome::Failed { number, message } => {
            tracing::error!(
                "{} reported error {}: {}",
                call.procedure,
                number,
                message.as_deref().unwrap_or("<no message>")
            );
            Err(ApiError::internal_server_error(failure_message))
        }
    }
}
