//! Graph construction from a knowledge graph.
//!
//! # Overview
//!
//! Entities become nodes, relationships become directed edges
//! `source → target`. Node indices follow insertion order: entities in
//! input order first, then any dangling endpoints in the order their
//! relationships appear. That order is what metrics fall back on when they
//! need to break ties.
//!
//! ## Dangling References
//!
//! A relationship endpoint that names no entity is added as an implicit
//! node with no type or description, and recorded in
//! [`BuildDiagnostics::dangling_endpoints`].
//!
//! ## Repeated Records
//!
//! At most one edge exists per `(source, target)` pair. A later
//! relationship with the same endpoints overwrites the earlier edge's
//! attributes. A repeated entity name keeps its original node and takes the
//! newer attributes. Both cases are counted in the diagnostics.

use std::collections::HashMap;

use kgeval_core::{ErrorCode, KnowledgeGraph, Relationship};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument, warn};

use super::diagnostics::BuildDiagnostics;

// ---------------------------------------------------------------------------
// Node and edge attributes
// ---------------------------------------------------------------------------

/// Attributes carried by each node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAttrs {
    pub name: String,
    pub entity_type: Option<String>,
    pub description: Option<String>,
    /// `true` if the node exists only because a relationship referenced it.
    pub implicit: bool,
}

/// Attributes carried by each edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttrs {
    pub description: String,
    pub keywords: Vec<String>,
    /// Relationship weight, 1.0 when absent, zero, negative or non-finite.
    pub weight: f64,
}

impl EdgeAttrs {
    fn from_relationship(rel: &Relationship) -> (Self, bool) {
        let (weight, sanitized) = match rel.weight {
            None => (1.0, false),
            Some(w) if w.is_finite() && w > 0.0 => (w, false),
            Some(_) => (1.0, true),
        };
        let attrs = Self {
            description: rel.description.clone(),
            keywords: rel.keywords.clone().unwrap_or_default(),
            weight,
        };
        (attrs, sanitized)
    }
}

// ---------------------------------------------------------------------------
// KgGraph
// ---------------------------------------------------------------------------

/// A directed graph built from a [`KnowledgeGraph`].
#[derive(Debug, Clone)]
pub struct KgGraph {
    /// Nodes = entity names, edges = relationships.
    pub graph: DiGraph<NodeAttrs, EdgeAttrs>,
    /// Entity name → petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// Number of entity records in the input (duplicates included).
    pub entity_count: usize,
    /// Number of relationship records in the input (duplicates included).
    pub relationship_count: usize,
    /// What the builder had to tolerate.
    pub diagnostics: BuildDiagnostics,
}

impl KgGraph {
    /// Build the graph for `kg`.
    #[must_use]
    #[instrument(skip(kg), fields(entities = kg.entities.len(), relationships = kg.relationships.len()))]
    pub fn from_knowledge_graph(kg: &KnowledgeGraph) -> Self {
        let mut graph = DiGraph::<NodeAttrs, EdgeAttrs>::with_capacity(
            kg.entities.len(),
            kg.relationships.len(),
        );
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(kg.entities.len());
        let mut diagnostics = BuildDiagnostics::default();

        // Step 1: one node per distinct entity name.
        for entity in &kg.entities {
            if let Some(&idx) = node_map.get(&entity.name) {
                let node = &mut graph[idx];
                node.entity_type.clone_from(&entity.entity_type);
                node.description.clone_from(&entity.description);
                diagnostics.duplicate_entities.push(entity.name.clone());
                continue;
            }
            let idx = graph.add_node(NodeAttrs {
                name: entity.name.clone(),
                entity_type: entity.entity_type.clone(),
                description: entity.description.clone(),
                implicit: false,
            });
            node_map.insert(entity.name.clone(), idx);
        }

        if !diagnostics.duplicate_entities.is_empty() {
            debug!(
                code = %ErrorCode::DuplicateEntity,
                count = diagnostics.duplicate_entities.len(),
                "repeated entity names merged"
            );
        }

        // Step 2: one edge per distinct (source, target) pair.
        for rel in &kg.relationships {
            let source = endpoint(&mut graph, &mut node_map, &mut diagnostics, &rel.source_name);
            let target = endpoint(&mut graph, &mut node_map, &mut diagnostics, &rel.target_name);

            let (attrs, sanitized) = EdgeAttrs::from_relationship(rel);
            if sanitized {
                diagnostics.sanitized_weights += 1;
            }
            if source == target {
                diagnostics.self_loops += 1;
            }

            if let Some(edge) = graph.find_edge(source, target) {
                graph[edge] = attrs;
                diagnostics.merged_duplicate_edges += 1;
            } else {
                graph.add_edge(source, target, attrs);
            }
        }

        Self {
            graph,
            node_map,
            entity_count: kg.entities.len(),
            relationship_count: kg.relationships.len(),
            diagnostics,
        }
    }

    /// Build a graph from bare names, for tests and benchmarks.
    ///
    /// Each node becomes an entity; each pair becomes a relationship with an
    /// empty description.
    #[must_use]
    pub fn from_names(nodes: &[&str], edges: &[(&str, &str)]) -> Self {
        let kg = KnowledgeGraph::new(
            nodes.iter().map(|n| kgeval_core::Entity::new(*n)).collect(),
            edges
                .iter()
                .map(|(s, t)| Relationship::new(*s, *t, ""))
                .collect(),
            Vec::new(),
        );
        Self::from_knowledge_graph(&kg)
    }

    /// Number of distinct nodes (entities plus implicit endpoints).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for an entity name.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Return the entity name for a node.
    #[must_use]
    pub fn name(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|n| n.name.as_str())
    }

    /// Entity names in node-index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|n| n.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Resolve a relationship endpoint, creating an implicit node if needed.
fn endpoint(
    graph: &mut DiGraph<NodeAttrs, EdgeAttrs>,
    node_map: &mut HashMap<String, NodeIndex>,
    diagnostics: &mut BuildDiagnostics,
    name: &str,
) -> NodeIndex {
    if let Some(&idx) = node_map.get(name) {
        return idx;
    }

    warn!(
        code = %ErrorCode::DanglingReference,
        entity = name,
        "relationship references unknown entity; adding implicit node"
    );
    let idx = graph.add_node(NodeAttrs {
        name: name.to_string(),
        entity_type: None,
        description: None,
        implicit: true,
    });
    node_map.insert(name.to_string(), idx);
    diagnostics.dangling_endpoints.push(name.to_string());
    idx
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use kgeval_core::{Entity, Relationship};

    fn kg(entities: Vec<Entity>, relationships: Vec<Relationship>) -> KnowledgeGraph {
        KnowledgeGraph::new(entities, relationships, Vec::new())
    }

    #[test]
    fn empty_input_produces_empty_graph() {
        let graph = KgGraph::from_knowledge_graph(&KnowledgeGraph::default());
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.diagnostics.is_clean());
    }

    #[test]
    fn entities_without_relationships_are_nodes_only() {
        let graph = KgGraph::from_names(&["A", "B"], &[]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.node_index("A").is_some());
        assert!(graph.node_index("B").is_some());
    }

    #[test]
    fn edge_direction_follows_relationship() {
        let graph = KgGraph::from_names(&["A", "B"], &[("A", "B")]);
        let a = graph.node_index("A").expect("A node");
        let b = graph.node_index("B").expect("B node");
        assert!(graph.graph.contains_edge(a, b), "expected A → B");
        assert!(!graph.graph.contains_edge(b, a), "no reverse edge");
    }

    #[test]
    fn node_attributes_copied_from_entity() {
        let graph = KgGraph::from_knowledge_graph(&kg(
            vec![Entity::new("Paris").with_type("City").with_description("capital")],
            vec![],
        ));
        let idx = graph.node_index("Paris").expect("node");
        let node = &graph.graph[idx];
        assert_eq!(node.entity_type.as_deref(), Some("City"));
        assert_eq!(node.description.as_deref(), Some("capital"));
        assert!(!node.implicit);
    }

    #[test]
    fn missing_weight_defaults_to_one() {
        let graph = KgGraph::from_knowledge_graph(&kg(
            vec![Entity::new("A"), Entity::new("B"), Entity::new("C")],
            vec![
                Relationship::new("A", "B", "x"),
                Relationship::new("B", "C", "y")
                    .with_weight(0.25)
                    .with_keywords(["k"]),
            ],
        ));
        let a = graph.node_index("A").expect("A");
        let b = graph.node_index("B").expect("B");
        let c = graph.node_index("C").expect("C");

        let ab = graph.graph.find_edge(a, b).expect("A → B");
        assert!((graph.graph[ab].weight - 1.0).abs() < f64::EPSILON);
        assert!(graph.graph[ab].keywords.is_empty());

        let bc = graph.graph.find_edge(b, c).expect("B → C");
        assert!((graph.graph[bc].weight - 0.25).abs() < f64::EPSILON);
        assert_eq!(graph.graph[bc].keywords, vec!["k".to_string()]);
    }

    #[test]
    fn unusable_weight_is_replaced() {
        let graph = KgGraph::from_knowledge_graph(&kg(
            vec![Entity::new("A"), Entity::new("B")],
            vec![Relationship::new("A", "B", "x").with_weight(-3.0)],
        ));
        let edge = graph.graph.edge_indices().next().expect("edge");
        assert!((graph.graph[edge].weight - 1.0).abs() < f64::EPSILON);
        assert_eq!(graph.diagnostics.sanitized_weights, 1);
    }

    #[test]
    fn zero_weight_is_replaced() {
        let graph = KgGraph::from_knowledge_graph(&kg(
            vec![Entity::new("A"), Entity::new("B")],
            vec![Relationship::new("A", "B", "x").with_weight(0.0)],
        ));
        let edge = graph.graph.edge_indices().next().expect("edge");
        assert!((graph.graph[edge].weight - 1.0).abs() < f64::EPSILON);
        assert_eq!(graph.diagnostics.sanitized_weights, 1);
    }

    #[test]
    fn dangling_endpoints_become_implicit_nodes() {
        let graph = KgGraph::from_knowledge_graph(&kg(
            vec![Entity::new("A")],
            vec![
                Relationship::new("A", "Ghost", "haunts"),
                Relationship::new("Phantom", "Ghost", "befriends"),
            ],
        ));

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.entity_count, 1);
        assert_eq!(
            graph.diagnostics.dangling_endpoints,
            vec!["Ghost".to_string(), "Phantom".to_string()]
        );

        let ghost = graph.node_index("Ghost").expect("implicit node");
        assert!(graph.graph[ghost].implicit);
        assert!(graph.graph[ghost].entity_type.is_none());
    }

    #[test]
    fn duplicate_edges_merge_last_write_wins() {
        let graph = KgGraph::from_knowledge_graph(&kg(
            vec![Entity::new("A"), Entity::new("B")],
            vec![
                Relationship::new("A", "B", "first").with_weight(0.1),
                Relationship::new("A", "B", "second").with_weight(0.9),
            ],
        ));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.relationship_count, 2);
        assert_eq!(graph.diagnostics.merged_duplicate_edges, 1);

        let edge = graph.graph.edge_indices().next().expect("edge");
        assert_eq!(graph.graph[edge].description, "second");
        assert!((graph.graph[edge].weight - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn reverse_edges_are_distinct() {
        let graph = KgGraph::from_names(&["A", "B"], &[("A", "B"), ("B", "A")]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.diagnostics.merged_duplicate_edges, 0);
    }

    #[test]
    fn duplicate_entity_keeps_first_node() {
        let graph = KgGraph::from_knowledge_graph(&kg(
            vec![
                Entity::new("A"),
                Entity::new("B"),
                Entity::new("A").with_type("Person"),
            ],
            vec![],
        ));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.entity_count, 3);
        assert_eq!(graph.diagnostics.duplicate_entities, vec!["A".to_string()]);

        let a = graph.node_index("A").expect("A");
        assert_eq!(a.index(), 0, "first occurrence keeps its slot");
        assert_eq!(graph.graph[a].entity_type.as_deref(), Some("Person"));
    }

    #[test]
    fn self_loops_are_kept_and_counted() {
        let graph = KgGraph::from_names(&["A"], &[("A", "A")]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.diagnostics.self_loops, 1);
    }

    #[test]
    fn node_order_is_insertion_order() {
        let graph = KgGraph::from_knowledge_graph(&kg(
            vec![Entity::new("C"), Entity::new("A")],
            vec![Relationship::new("A", "Z", ""), Relationship::new("Y", "C", "")],
        ));
        let names: Vec<&str> = graph.names().collect();
        assert_eq!(names, vec!["C", "A", "Z", "Y"]);
        assert_eq!(graph.name(NodeIndex::new(2)), Some("Z"));
    }
}
