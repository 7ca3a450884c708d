//! Embedded `PostgreSQL` cluster shared by the integration tests.
//!
//! The cluster starts once per test binary. Unprivileged runs start it in
//! process; root runs hand setup and start to the `pg_worker` helper, which
//! drops to `nobody`. Each test then works in its own database cloned from a
//! migrated template.

mod env_utils;

use self::env_utils::{env_vars_to_os, worker_env_changes};
use self::fs_utils::{sync_password_from_file, sync_port_from_pid};
use crate::test_helpers::EnvVarGuard;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::worker_process_test_api::{
    WorkerOperation, WorkerRequest, WorkerRequestArgs, run as run_worker,
};
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Status};
use rstest::fixture;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use tokio::runtime::Runtime;

/// Boxed error type used by the cluster helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<Result<ManagedCluster, String>> = OnceLock::new();
static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Shared `PostgreSQL` cluster handle for integration tests.
pub type PostgresCluster = &'static ManagedCluster;

/// Managed embedded `PostgreSQL` cluster for test lifecycles.
pub struct ManagedCluster {
    bootstrap: TestBootstrapSettings,
    env_vars: Vec<(String, Option<String>)>,
    #[expect(dead_code, reason = "Held to keep the in-process server's runtime alive")]
    runtime: Option<Runtime>,
    #[expect(dead_code, reason = "Held to keep the in-process server running")]
    postgres: Option<PostgreSQL>,
}

impl ManagedCluster {
    fn new() -> Result<Self, BoxError> {
        let worker_env = worker_env_changes()?;
        let worker_guard = EnvVarGuard::set_many(&worker_env);
        let bootstrap = bootstrap_for_tests();
        drop(worker_guard);
        let mut cluster_bootstrap = bootstrap?;
        sync_password_from_file(&mut cluster_bootstrap.settings)?;
        let env_vars = cluster_bootstrap.environment.to_env();
        let mut cluster = Self {
            bootstrap: cluster_bootstrap,
            env_vars,
            runtime: None,
            postgres: None,
        };
        match cluster.bootstrap.privileges {
            ExecutionPrivileges::Root => cluster.start_via_worker()?,
            ExecutionPrivileges::Unprivileged => cluster.start_in_process()?,
        }
        Ok(cluster)
    }

    /// Connection URL for `database` on this cluster.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.bootstrap.settings.url(database)
    }

    /// Creates `template` and runs `migrate` against its URL unless it
    /// already exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the template cannot be created or migrated; a
    /// template whose migration failed is dropped again.
    pub async fn ensure_template_exists<F>(
        &'static self,
        template: &'static str,
        migrate: F,
    ) -> Result<(), BoxError>
    where
        F: FnOnce(&str) -> Result<(), BoxError> + Send + 'static,
    {
        tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
            let _guard = template_lock();
            if self.database_exists(template)? {
                return Ok(());
            }

            self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(template)))?;
            if let Err(err) = migrate(&self.database_url(template)) {
                self.drop_database(template)?;
                return Err(err);
            }
            Ok(())
        })
        .await?
    }

    /// Clones `template` into a fresh database dropped with the returned
    /// handle.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be created.
    pub async fn temporary_database_from_template(
        &'static self,
        name: String,
        template: &'static str,
    ) -> Result<TemporaryDatabase, BoxError> {
        tokio::task::spawn_blocking(move || -> Result<TemporaryDatabase, BoxError> {
            let _guard = template_lock();
            self.execute_admin_sql(&format!(
                "CREATE DATABASE {} TEMPLATE {}",
                quote_identifier(&name),
                quote_identifier(template),
            ))?;
            Ok(TemporaryDatabase {
                url: self.database_url(&name),
                name,
                cluster: self,
            })
        })
        .await?
    }

    fn start_in_process(&mut self) -> Result<(), BoxError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let env_guard = EnvVarGuard::set_many(&env_vars_to_os(&self.env_vars));
        let mut postgres = PostgreSQL::new(self.bootstrap.settings.clone());
        let started = runtime.block_on(async {
            postgres.setup().await?;
            if !matches!(postgres.status(), Status::Started) {
                postgres.start().await?;
            }
            Ok::<(), postgresql_embedded::Error>(())
        });
        drop(env_guard);
        started?;
        self.bootstrap.settings = postgres.settings().clone();
        sync_port_from_pid(&mut self.bootstrap.settings)?;
        self.runtime = Some(runtime);
        self.postgres = Some(postgres);
        Ok(())
    }

    fn start_via_worker(&mut self) -> Result<(), BoxError> {
        self.run_worker_operation(WorkerOperation::Setup, self.bootstrap.setup_timeout)?;
        self.run_worker_operation(WorkerOperation::Start, self.bootstrap.start_timeout)?;
        sync_port_from_pid(&mut self.bootstrap.settings)?;
        Ok(())
    }

    fn run_worker_operation(
        &self,
        operation: WorkerOperation,
        timeout: Duration,
    ) -> Result<(), BoxError> {
        let worker = self.bootstrap.worker_binary.as_ref().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "PG_EMBEDDED_WORKER is not set for worker operation",
            )
        })?;
        let args = WorkerRequestArgs {
            worker: worker.as_path(),
            settings: &self.bootstrap.settings,
            env_vars: &self.env_vars,
            operation,
            timeout,
        };
        run_worker(&WorkerRequest::new(args))?;
        Ok(())
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        diesel::sql_query(sql).execute(&mut conn)?;
        Ok(())
    }

    fn drop_database(&self, db_name: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(db_name)
        ))
    }

    fn database_exists(&self, db_name: &str) -> Result<bool, BoxError> {
        #[derive(diesel::QueryableByName)]
        struct ExistsRow {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(db_name)
        .get_result::<ExistsRow>(&mut conn)?;
        Ok(row.exists)
    }
}

/// A database cloned from a template, dropped when the handle drops.
pub struct TemporaryDatabase {
    name: String,
    url: String,
    cluster: PostgresCluster,
}

impl TemporaryDatabase {
    /// Connection URL of the database.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

/// Provides the shared `PostgreSQL` cluster, starting it on first use.
#[fixture]
pub fn postgres_cluster() -> Result<PostgresCluster, BoxError> {
    SHARED_CLUSTER
        .get_or_init(start_shared_cluster)
        .as_ref()
        .map_err(|message| BoxError::from(message.clone()))
}

// Start-up blocks on its own runtime, so it runs off the test's runtime.
fn start_shared_cluster() -> Result<ManagedCluster, String> {
    std::thread::spawn(ManagedCluster::new)
        .join()
        .map_err(|_| "PostgreSQL start-up panicked".to_owned())?
        .map_err(|err| format!("failed to start PostgreSQL: {err}"))
}

fn template_lock() -> std::sync::MutexGuard<'static, ()> {
    TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::quote_identifier;
    use rstest::rstest;

    #[rstest]
    #[case("taskboard_test", "\"taskboard_test\"")]
    #[case("odd\"name", "\"odd\"\"name\"")]
    fn identifiers_are_quoted(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(quote_identifier(name), expected);
    }
}
