//! The storage seam handlers depend on.

use async_trait::async_trait;
use roster_core::{Employee, ListFilter};

use crate::client::{GraphClient, GraphError};

/// Operations the HTTP layer needs from an employee store.
///
/// The store is the only source of truth: implementations must not cache
/// employees between calls.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Employees passing the filter, in the filter's order.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Employee>, GraphError>;

    /// Add an employee. Never checks for an existing name.
    async fn create(&self, employee: &Employee) -> Result<(), GraphError>;

    /// Replace every employee named `name` with `employee`'s values.
    /// `None` when nothing matched.
    async fn update(
        &self,
        name: &str,
        employee: &Employee,
    ) -> Result<Option<Employee>, GraphError>;

    /// Remove every employee named `name`. `None` when nothing matched.
    async fn delete(&self, name: &str) -> Result<Option<String>, GraphError>;

    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), GraphError>;
}

#[async_trait]
impl EmployeeStore for GraphClient {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Employee>, GraphError> {
        self.list_employees(filter).await
    }

    async fn create(&self, employee: &Employee) -> Result<(), GraphError> {
        self.create_employee(employee).await
    }

    async fn update(
        &self,
        name: &str,
        employee: &Employee,
    ) -> Result<Option<Employee>, GraphError> {
        self.update_employee(name, employee).await
    }

    async fn delete(&self, name: &str) -> Result<Option<String>, GraphError> {
        self.delete_employee(name).await
    }

    async fn ping(&self) -> Result<(), GraphError> {
        GraphClient::ping(self).await
    }
}
