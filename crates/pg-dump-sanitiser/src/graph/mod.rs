//! Foreign-key dependency ordering.
//!
//! Tables are nodes in an index arena; an edge runs from a referenced table to
//! the table holding the `FOREIGN KEY`. The sort is Kahn's algorithm with each
//! ready set sorted by name, so the result depends only on the schema and not
//! on the order statements appeared in the dump.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::Config;
use crate::core::TableRegistry;
use crate::error::{Result, SanitiseError};

/// Stage label for referential errors raised while building the graph.
pub const STAGE: &str = "sorting tables";

/// Arena-indexed dependency graph.
#[derive(Debug, Default)]
struct DependencyGraph {
    names: Vec<String>,
    children: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
}

impl DependencyGraph {
    fn build(tables: &TableRegistry, config: &Config) -> Result<Self> {
        let mut graph = DependencyGraph::default();
        let mut index_of = BTreeMap::new();
        for name in tables.names().filter(|name| !config.is_excluded(name)) {
            index_of.insert(name.to_string(), graph.names.len());
            graph.names.push(name.to_string());
        }
        graph.children = vec![Vec::new(); graph.names.len()];
        graph.in_degree = vec![0; graph.names.len()];

        for (name, table) in tables.iter() {
            let Some(&child) = index_of.get(name) else {
                continue;
            };
            for parent_name in table.referenced_tables() {
                if parent_name == name || config.is_excluded(&parent_name) {
                    continue;
                }
                let parent = *index_of.get(&parent_name).ok_or_else(|| {
                    SanitiseError::referential(
                        STAGE,
                        format!("table {} references unknown table {}", name, parent_name),
                    )
                })?;
                graph.children[parent].push(child);
                graph.in_degree[child] += 1;
            }
        }

        Ok(graph)
    }

    fn into_order(mut self) -> Result<Vec<String>> {
        let mut emitted = vec![false; self.names.len()];
        let mut order = Vec::with_capacity(self.names.len());

        while order.len() < self.names.len() {
            // Node indices follow name order, so the ready set is already sorted.
            let ready: Vec<usize> = (0..self.names.len())
                .filter(|&node| !emitted[node] && self.in_degree[node] == 0)
                .collect();

            if ready.is_empty() {
                let tables = (0..self.names.len())
                    .filter(|&node| !emitted[node])
                    .map(|node| self.names[node].clone())
                    .collect();
                return Err(SanitiseError::Cycle { tables });
            }

            for node in ready {
                emitted[node] = true;
                for &child in &self.children[node] {
                    self.in_degree[child] -= 1;
                }
                order.push(self.names[node].clone());
            }
        }

        Ok(order)
    }
}

/// Order the registered tables so that every referenced table precedes the
/// tables that reference it. Excluded tables are left out.
pub fn sort_tables(tables: &TableRegistry, config: &Config) -> Result<Vec<String>> {
    let order = DependencyGraph::build(tables, config)?.into_order()?;
    debug!("Table order: {}", order.join(", "));
    Ok(order)
}
