use super::record::Connection;

/// Run `f`, inside a transaction on `conn` when one is given.
///
/// Commits when `f` succeeds. When `f` fails the transaction is rolled back
/// and `f`'s error is returned unchanged; a failing rollback is only logged.
pub(crate) fn in_transaction<T, F>(conn: Option<&dyn Connection>, op: &str, f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    let Some(conn) = conn else {
        return f();
    };

    let tx = conn.begin_transaction()?;
    tracing::debug!(op, "transaction started");
    match f() {
        Ok(out) => {
            tx.commit()?;
            tracing::debug!(op, "transaction committed");
            Ok(out)
        }
        Err(err) => {
            match tx.rollback() {
                Ok(()) => tracing::debug!(op, error = %err, "transaction rolled back"),
                Err(rb) => tracing::warn!(op, error = %err, rollback_error = %rb, "rollback failed"),
            }
            Err(err)
        }
    }
}
