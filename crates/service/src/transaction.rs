//! Transaction scope used by every multi-statement operation.

use std::{future::Future, pin::Pin};

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::debug;

use crate::errors::ServiceError;

/// Runs `work` on a dedicated connection inside BEGIN/COMMIT.
///
/// `Ok` commits, `Err` rolls back before the error is returned. The
/// connection goes back to the pool on every path, including a failed
/// BEGIN or COMMIT.
pub async fn in_transaction<F, T>(
    db: &DatabaseConnection,
    op: &'static str,
    work: F,
) -> Result<T, ServiceError>
where
    F: for<'c> FnOnce(
            &'c DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send + 'c>>
        + Send,
    T: Send,
{
    match db.transaction::<F, T, ServiceError>(work).await {
        Ok(v) => {
            debug!(op, "transaction committed");
            Ok(v)
        }
        Err(e) => {
            let err = ServiceError::from(e);
            debug!(op, error = %err, "transaction rolled back");
            Err(err)
        }
    }
}
