//! Read operations and Cypher query builder for employee listings.

use neo4rs::query;
use roster_core::{Employee, ListFilter};

use crate::client::{GraphClient, GraphError};

/// Build the listing query for a filter.
///
/// The position value is always bound as `$position`. Only the sort
/// property and direction are written into the text, and both come from
/// fixed allow-lists.
pub fn list_cypher(filter: &ListFilter) -> String {
    let mut cypher = String::from("MATCH (e:Employee)");
    if filter.position.is_some() {
        cypher.push_str(" WHERE e.position = $position");
    }
    cypher.push_str(&format!(
        " RETURN e ORDER BY e.{} {}",
        filter.sort_by.property(),
        filter.sort_order.keyword()
    ));
    cypher
}

impl GraphClient {
    /// List employees matching the filter, in the requested order.
    ///
    /// The query never mutates; an empty graph yields an empty list.
    pub async fn list_employees(&self, filter: &ListFilter) -> Result<Vec<Employee>, GraphError> {
        let mut q = query(&list_cypher(filter));
        if let Some(position) = &filter.position {
            q = q.param("position", position.clone());
        }

        let rows = self.query_rows(q).await?;
        let mut employees = Vec::with_capacity(rows.len());
        for row in rows {
            let node: neo4rs::Node = row.get("e").map_err(|e| {
                GraphError::Serialization(format!("Failed to deserialize employee: {e}"))
            })?;
            employees.push(node_to_employee(&node));
        }

        tracing::debug!(
            count = employees.len(),
            sort_by = %filter.sort_by,
            sort_order = %filter.sort_order,
            "Listed employees"
        );
        Ok(employees)
    }
}

/// Convert a neo4rs::Node to an Employee. Absent or non-string properties
/// become empty strings.
fn node_to_employee(node: &neo4rs::Node) -> Employee {
    Employee {
        name: string_prop(node, "name"),
        surname: string_prop(node, "surname"),
        position: string_prop(node, "position"),
    }
}

fn string_prop(node: &neo4rs::Node, key: &str) -> String {
    match node.get::<String>(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(
                node_id = node.id(),
                property = key,
                error = %e,
                "Employee property missing or not a string"
            );
            String::new()
        }
    }
}
