//! Write operations for employee nodes.
//!
//! Each mutation runs in its own write transaction. Update and delete check
//! for a matching node first and only mutate when one exists, all inside
//! the same transaction. Names are not unique, so both act on every match.

use neo4rs::{query, Txn};
use roster_core::Employee;

use crate::client::{finish_txn, GraphClient, GraphError};

impl GraphClient {
    /// Create a new Employee node. No existence check: duplicates are allowed.
    pub async fn create_employee(&self, employee: &Employee) -> Result<(), GraphError> {
        let q = query(
            "CREATE (e:Employee {name: $name, surname: $surname, position: $position})",
        )
        .param("name", employee.name.clone())
        .param("surname", employee.surname.clone())
        .param("position", employee.position.clone());

        let mut txn = self.start_txn().await?;
        let outcome = txn.run(q).await.map(Some).map_err(GraphError::from);
        finish_txn(txn, outcome).await?;

        tracing::info!(name = %employee.name, "Created employee");
        Ok(())
    }

    /// Overwrite all three properties on every node named `name`.
    ///
    /// Returns the new values, or `None` when no node has that name.
    pub async fn update_employee(
        &self,
        name: &str,
        employee: &Employee,
    ) -> Result<Option<Employee>, GraphError> {
        let mut txn = self.start_txn().await?;
        let outcome = update_in_txn(&mut txn, name, employee).await;
        finish_txn(txn, outcome).await
    }

    /// Detach-delete every node named `name`, relationships included.
    ///
    /// Returns the deleted name, or `None` when no node has that name.
    pub async fn delete_employee(&self, name: &str) -> Result<Option<String>, GraphError> {
        let mut txn = self.start_txn().await?;
        let outcome = delete_in_txn(&mut txn, name).await;
        finish_txn(txn, outcome).await
    }
}

async fn update_in_txn(
    txn: &mut Txn,
    name: &str,
    employee: &Employee,
) -> Result<Option<Employee>, GraphError> {
    let matched = count_by_name(txn, name).await?;
    if matched == 0 {
        tracing::debug!(name, "Update target not found");
        return Ok(None);
    }

    let q = query(
        "MATCH (e:Employee) WHERE e.name = $name
         SET e.name = $new_name, e.surname = $new_surname, e.position = $new_position",
    )
    .param("name", name.to_string())
    .param("new_name", employee.name.clone())
    .param("new_surname", employee.surname.clone())
    .param("new_position", employee.position.clone());
    txn.run(q).await?;

    tracing::info!(name, new_name = %employee.name, matched, "Updated employee");
    Ok(Some(employee.clone()))
}

async fn delete_in_txn(txn: &mut Txn, name: &str) -> Result<Option<String>, GraphError> {
    let matched = count_by_name(txn, name).await?;
    if matched == 0 {
        tracing::debug!(name, "Delete target not found");
        return Ok(None);
    }

    let q = query("MATCH (e:Employee) WHERE e.name = $name DETACH DELETE e")
        .param("name", name.to_string());
    txn.run(q).await?;

    tracing::info!(name, matched, "Deleted employee");
    Ok(Some(name.to_string()))
}

/// Count Employee nodes with the given name inside an open transaction.
async fn count_by_name(txn: &mut Txn, name: &str) -> Result<i64, GraphError> {
    let q = query("MATCH (e:Employee) WHERE e.name = $name RETURN count(e) AS matched")
        .param("name", name.to_string());

    let mut stream = txn.execute(q).await?;
    let mut matched = 0;
    while let Some(row) = stream.next(txn.handle()).await? {
        matched = row
            .get::<i64>("matched")
            .map_err(|e| GraphError::Serialization(format!("Failed to read match count: {e}")))?;
    }
    Ok(matched)
}
