//! In-process employee store.
//!
//! Follows the same rules as the Neo4j store (duplicate names allowed,
//! update and delete fan out to every match) without a database. Used by
//! the router tests and by `roster-api --in-memory`.

use std::sync::Arc;

use async_trait::async_trait;
use roster_core::{Employee, ListFilter, SortOrder};
use tokio::sync::RwLock;

use crate::client::GraphError;
use crate::store::EmployeeStore;

/// Employees held in a shared vector, in insertion order.
///
/// Clone is cheap and clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    employees: Arc<RwLock<Vec<Employee>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing employees.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(RwLock::new(employees)),
        }
    }

    pub async fn len(&self) -> usize {
        self.employees.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.employees.read().await.is_empty()
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Employee>, GraphError> {
        let employees = self.employees.read().await;
        let mut matched: Vec<Employee> = employees
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        let field = filter.sort_by;
        matched.sort_by(|a, b| {
            let ord = a.sort_key(field).cmp(b.sort_key(field));
            match filter.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        Ok(matched)
    }

    async fn create(&self, employee: &Employee) -> Result<(), GraphError> {
        self.employees.write().await.push(employee.clone());
        Ok(())
    }

    async fn update(
        &self,
        name: &str,
        employee: &Employee,
    ) -> Result<Option<Employee>, GraphError> {
        let mut employees = self.employees.write().await;
        let mut matched = 0;
        for e in employees.iter_mut().filter(|e| e.name == name) {
            *e = employee.clone();
            matched += 1;
        }
        Ok((matched > 0).then(|| employee.clone()))
    }

    async fn delete(&self, name: &str) -> Result<Option<String>, GraphError> {
        let mut employees = self.employees.write().await;
        let before = employees.len();
        employees.retain(|e| e.name != name);
        Ok((employees.len() < before).then(|| name.to_string()))
    }

    async fn ping(&self) -> Result<(), GraphError> {
        Ok(())
    }
}
