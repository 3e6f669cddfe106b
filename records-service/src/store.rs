// Local view of one owner-scoped table, kept in step with the remote store
use std::sync::Arc;

use database_layer::{expect_single, OwnerScope, PractitionerId, Query, RemoteStore};
use error_common::{ClinicError, ClinicResult, ErrorReporter, Notifier};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::entity::{Entity, InsertPosition};

/// Rows of one entity owned by the attached practitioner.
///
/// Every mutation goes to the remote store first; the local list is patched
/// only after the store accepted it. Failures are logged, surfaced as a
/// destructive notification and returned.
pub struct EntityStore<E: Entity> {
    remote: Arc<dyn RemoteStore>,
    reporter: ErrorReporter,
    scope: Option<OwnerScope>,
    rows: Vec<E>,
    loading: bool,
}

impl<E: Entity> EntityStore<E> {
    pub fn new(remote: Arc<dyn RemoteStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            remote,
            reporter: ErrorReporter::new(notifier).with_sanitizer(logger_redacted::redact),
            scope: None,
            rows: Vec::new(),
            loading: true,
        }
    }

    /// Bind the store to a practitioner and load their rows
    pub async fn attach(&mut self, practitioner: PractitionerId) -> ClinicResult<()> {
        if self.practitioner() != Some(&practitioner) {
            self.rows.clear();
        }
        self.scope = Some(OwnerScope::new(practitioner));
        self.fetch().await
    }

    /// Forget the practitioner and their rows
    pub fn detach(&mut self) {
        self.scope = None;
        self.rows.clear();
        self.loading = true;
    }

    pub fn practitioner(&self) -> Option<&PractitionerId> {
        self.scope.as_ref().map(OwnerScope::practitioner)
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    /// True until the first fetch for the attached practitioner has finished
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, id: Uuid) -> Option<&E> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub(crate) fn require(&self, id: Uuid) -> ClinicResult<&E> {
        self.find(id)
            .ok_or_else(|| ClinicError::NotFound(format!("{} {id}", E::NAME)))
    }

    fn scope(&self) -> ClinicResult<OwnerScope> {
        self.scope.clone().ok_or_else(ClinicError::not_signed_in)
    }

    /// Replace the local list with the practitioner's rows in table order
    pub async fn fetch(&mut self) -> ClinicResult<()> {
        let scope = self.scope()?;
        self.loading = true;
        let result = self.fetch_remote(&scope).await;
        self.loading = false;

        match result {
            Ok(rows) => {
                debug!(table = E::TABLE, count = rows.len(), "Fetched rows");
                self.rows = rows;
                Ok(())
            }
            Err(e) => {
                self.reporter.report_failure(
                    &format!("fetching {}", E::TABLE),
                    E::MESSAGES.fetch_failed,
                    &e,
                );
                Err(e)
            }
        }
    }

    /// Insert a row owned by the practitioner and place it in the local list
    pub async fn add(&mut self, draft: E::Draft) -> ClinicResult<E> {
        let scope = self.scope()?;
        E::validate_draft(&draft)?;

        match self.insert_remote(&scope, &draft).await {
            Ok(row) => {
                match E::INSERT_POSITION {
                    InsertPosition::Prepend => self.rows.insert(0, row.clone()),
                    InsertPosition::Append => self.rows.push(row.clone()),
                }
                info!(table = E::TABLE, id = %row.id(), "Row added");
                self.reporter.report_success(E::MESSAGES.added);
                Ok(row)
            }
            Err(e) => {
                self.reporter
                    .report_failure(&format!("adding {}", E::NAME), E::MESSAGES.add_failed, &e);
                Err(e)
            }
        }
    }

    /// Apply `changes` to the practitioner's row `id` and replace it locally
    pub async fn update(&mut self, id: Uuid, changes: E::Changes) -> ClinicResult<E> {
        let scope = self.scope()?;

        match self.update_remote(&scope, id, &changes).await {
            Ok(row) => {
                if let Some(slot) = self.rows.iter_mut().find(|r| r.id() == id) {
                    *slot = row.clone();
                }
                info!(table = E::TABLE, %id, "Row updated");
                self.reporter.report_success(E::MESSAGES.updated);
                Ok(row)
            }
            Err(e) => {
                self.reporter.report_failure(
                    &format!("updating {}", E::NAME),
                    E::MESSAGES.update_failed,
                    &e,
                );
                Err(e)
            }
        }
    }

    /// Delete the practitioner's row `id` and drop it locally
    pub async fn delete(&mut self, id: Uuid) -> ClinicResult<()> {
        let scope = self.scope()?;

        match self.remote.delete(E::TABLE, &scope.row(id)).await {
            Ok(()) => {
                self.rows.retain(|r| r.id() != id);
                info!(table = E::TABLE, %id, "Row deleted");
                self.reporter.report_success(E::MESSAGES.deleted);
                Ok(())
            }
            Err(e) => {
                let e = ClinicError::from(e);
                self.reporter.report_failure(
                    &format!("deleting {}", E::NAME),
                    E::MESSAGES.delete_failed,
                    &e,
                );
                Err(e)
            }
        }
    }

    async fn fetch_remote(&self, scope: &OwnerScope) -> ClinicResult<Vec<E>> {
        let query = scope.apply(Query::new().select(E::select()).order_by(E::ordering()));
        let rows = self.remote.select(E::TABLE, &query).await?;
        rows.into_iter().map(decode::<E>).collect()
    }

    async fn insert_remote(&self, scope: &OwnerScope, draft: &E::Draft) -> ClinicResult<E> {
        let payload = scope.stamp(encode(draft)?)?;
        let query = Query::new().select(E::select()).single();
        let rows = self.remote.insert(E::TABLE, payload, &query).await?;
        decode(expect_single(E::TABLE, rows)?)
    }

    async fn update_remote(&self, scope: &OwnerScope, id: Uuid, changes: &E::Changes) -> ClinicResult<E> {
        let payload = encode(changes)?;
        scope.guard_changes(&payload)?;
        let query = scope.row(id).select(E::select()).single();
        let rows = self.remote.update(E::TABLE, payload, &query).await?;
        decode(expect_single(E::TABLE, rows)?)
    }
}

fn encode<T: serde::Serialize>(payload: &T) -> ClinicResult<Value> {
    serde_json::to_value(payload)
        .map_err(|e| ClinicError::ValidationError(format!("Unencodable payload: {e}")))
}

fn decode<E: Entity>(row: Value) -> ClinicResult<E> {
    serde_json::from_value(row)
        .map_err(|e| ClinicError::StoreError(format!("Malformed {} row: {e}", E::NAME)))
}

impl<E: Entity> std::fmt::Debug for EntityStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("table", &E::TABLE)
            .field("practitioner", &self.practitioner())
            .field("rows", &self.rows.len())
            .field("loading", &self.loading)
            .finish()
    }
}
