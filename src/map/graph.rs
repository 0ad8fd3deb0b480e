//! Undirected territory graph.
//!
//! Nodes are stored in insertion order and addressed by a dense `NodeIndex`.
//! Each node keeps its neighbor list; the lists are symmetric: if A lists B
//! then B lists A. Self-loops and parallel edges never appear because the
//! `GraphBuilder` rejects the former and drops the latter.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use super::territory::{Territory, TerritoryId};

/// Dense index of a node within one graph instance.
pub type NodeIndex = usize;

/// Errors raised while assembling a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate territory id {0}")]
    DuplicateId(TerritoryId),

    #[error("duplicate territory name '{0}'")]
    DuplicateName(String),

    #[error("territory {0} cannot be connected to itself")]
    SelfLoop(TerritoryId),

    #[error("unknown territory id {0}")]
    UnknownTerritory(TerritoryId),
}

/// Validating builder for `TerritoryGraph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: TerritoryGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder::default()
    }

    /// Adds a territory. Ids and names must be unique within the graph.
    pub fn add_territory(&mut self, territory: Territory) -> Result<NodeIndex, GraphError> {
        let g = &mut self.graph;
        if g.by_id.contains_key(&territory.id) {
            return Err(GraphError::DuplicateId(territory.id));
        }
        if g.by_name.contains_key(&territory.name) {
            return Err(GraphError::DuplicateName(territory.name));
        }
        let idx = g.territories.len();
        g.by_id.insert(territory.id, idx);
        g.by_name.insert(territory.name.clone(), idx);
        g.territories.push(territory);
        g.adjacency.push(Vec::new());
        Ok(idx)
    }

    /// Connects two territories. Returns false if the edge already existed.
    pub fn connect(&mut self, a: TerritoryId, b: TerritoryId) -> Result<bool, GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        let g = &mut self.graph;
        let ai = g.index_of(a).ok_or(GraphError::UnknownTerritory(a))?;
        let bi = g.index_of(b).ok_or(GraphError::UnknownTerritory(b))?;
        if g.adjacency[ai].contains(&bi) {
            debug!(from = %a, to = %b, "dropping duplicate connection");
            return Ok(false);
        }
        g.adjacency[ai].push(bi);
        g.adjacency[bi].push(ai);
        g.edge_count += 1;
        Ok(true)
    }

    /// Returns true if a territory with this id has been added.
    pub fn contains(&self, id: TerritoryId) -> bool {
        self.graph.by_id.contains_key(&id)
    }

    pub fn build(self) -> TerritoryGraph {
        self.graph
    }
}

/// Undirected, unweighted graph of territories.
#[derive(Debug, Clone, Default)]
pub struct TerritoryGraph {
    territories: Vec<Territory>,
    adjacency: Vec<Vec<NodeIndex>>,
    by_id: HashMap<TerritoryId, NodeIndex>,
    by_name: HashMap<String, NodeIndex>,
    edge_count: usize,
}

impl TerritoryGraph {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the territory at `idx`. Panics if out of range.
    pub fn territory(&self, idx: NodeIndex) -> &Territory {
        &self.territories[idx]
    }

    pub(crate) fn territory_mut(&mut self, idx: NodeIndex) -> &mut Territory {
        &mut self.territories[idx]
    }

    /// All territories in insertion order.
    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub(crate) fn territories_mut(&mut self) -> impl Iterator<Item = &mut Territory> {
        self.territories.iter_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Territory)> {
        self.territories.iter().enumerate()
    }

    /// Direct neighbors of `idx`.
    pub fn neighbors(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.adjacency[idx]
    }

    pub fn index_of(&self, id: TerritoryId) -> Option<NodeIndex> {
        self.by_id.get(&id).copied()
    }

    pub fn get(&self, id: TerritoryId) -> Option<&Territory> {
        self.index_of(id).map(|idx| &self.territories[idx])
    }

    /// Looks up a node by exact name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.by_name.get(name).copied()
    }

    /// Returns true if the two nodes share an edge.
    pub fn is_adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.adjacency[a].contains(&b)
    }

    /// Each undirected edge once, as `(lower, higher)` index pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, adj)| adj.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
    }

    /// BFS hop counts from `source` to every node; `None` where unreachable.
    pub fn hop_distances(&self, source: NodeIndex) -> Vec<Option<u32>> {
        let mut dist = vec![None; self.len()];
        if source >= self.len() {
            return dist;
        }
        dist[source] = Some(0);
        let mut queue = VecDeque::with_capacity(self.len());
        queue.push_back(source);

        while let Some(cur) = queue.pop_front() {
            let d = dist[cur].unwrap_or(0);
            for &next in &self.adjacency[cur] {
                if dist[next].is_none() {
                    dist[next] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::faction::FactionId;

    fn node(id: u32, name: &str) -> Territory {
        Territory::new(TerritoryId(id), name, FactionId(1))
    }

    /// 1 - 2 - 3 - 4, plus isolated 5.
    fn chain() -> TerritoryGraph {
        let mut b = GraphBuilder::new();
        for (id, name) in [(1, "A"), (2, "B"), (3, "C"), (4, "D"), (5, "E")] {
            b.add_territory(node(id, name)).unwrap();
        }
        b.connect(TerritoryId(1), TerritoryId(2)).unwrap();
        b.connect(TerritoryId(2), TerritoryId(3)).unwrap();
        b.connect(TerritoryId(3), TerritoryId(4)).unwrap();
        b.build()
    }

    #[test]
    fn rejects_duplicate_id_and_name() {
        let mut b = GraphBuilder::new();
        b.add_territory(node(1, "A")).unwrap();
        assert_eq!(
            b.add_territory(node(1, "Other")),
            Err(GraphError::DuplicateId(TerritoryId(1)))
        );
        assert_eq!(
            b.add_territory(node(2, "A")),
            Err(GraphError::DuplicateName("A".to_string()))
        );
    }

    #[test]
    fn rejects_self_loop_and_unknown_endpoint() {
        let mut b = GraphBuilder::new();
        b.add_territory(node(1, "A")).unwrap();
        assert_eq!(
            b.connect(TerritoryId(1), TerritoryId(1)),
            Err(GraphError::SelfLoop(TerritoryId(1)))
        );
        assert_eq!(
            b.connect(TerritoryId(1), TerritoryId(99)),
            Err(GraphError::UnknownTerritory(TerritoryId(99)))
        );
    }

    #[test]
    fn duplicate_edges_are_dropped_in_either_direction() {
        let mut b = GraphBuilder::new();
        b.add_territory(node(1, "A")).unwrap();
        b.add_territory(node(2, "B")).unwrap();
        assert_eq!(b.connect(TerritoryId(1), TerritoryId(2)), Ok(true));
        assert_eq!(b.connect(TerritoryId(1), TerritoryId(2)), Ok(false));
        assert_eq!(b.connect(TerritoryId(2), TerritoryId(1)), Ok(false));
        let g = b.build();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0]);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = chain();
        for (a, b) in g.edges() {
            assert!(g.is_adjacent(a, b));
            assert!(g.is_adjacent(b, a));
        }
        assert_eq!(g.edges().count(), g.edge_count());
    }

    #[test]
    fn lookups() {
        let g = chain();
        assert_eq!(g.find_by_name("C"), Some(2));
        assert_eq!(g.find_by_name("Z"), None);
        assert_eq!(g.index_of(TerritoryId(4)), Some(3));
        assert_eq!(g.get(TerritoryId(5)).map(|t| t.name.as_str()), Some("E"));
        assert!(g.get(TerritoryId(6)).is_none());
    }

    #[test]
    fn bfs_hop_distances() {
        let g = chain();
        let d = g.hop_distances(0);
        assert_eq!(d, vec![Some(0), Some(1), Some(2), Some(3), None]);
        assert_eq!(g.hop_distances(4), vec![None, None, None, None, Some(0)]);
    }

    #[test]
    fn hop_distances_are_symmetric() {
        let g = chain();
        for src in 0..g.len() {
            let from_src = g.hop_distances(src);
            for dst in 0..g.len() {
                assert_eq!(from_src[dst], g.hop_distances(dst)[src]);
            }
        }
    }

    #[test]
    fn empty_graph() {
        let g = GraphBuilder::new().build();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(g.hop_distances(0).is_empty());
    }
}
