//! CitationGraph: the fetched papers as a petgraph DiGraph.
//!
//! Edges run citing → cited. Only the supplied paper set becomes nodes;
//! references to papers outside it are dropped rather than materialised.
//! Per-keyword storylines are the connected components of the graph
//! restricted to the papers carrying that keyword, with edges taken as
//! undirected.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{KeywordTable, Paper, Storyline};

pub struct CitationGraph {
    /// Node weight is the paper's position in the input slice.
    pub digraph: DiGraph<usize, ()>,
    /// Maps paper id → petgraph NodeIndex.
    pub node_index: HashMap<String, NodeIndex>,
}

impl CitationGraph {
    pub fn build(papers: &[Paper]) -> Self {
        let mut digraph: DiGraph<usize, ()> = DiGraph::new();
        let mut node_index: HashMap<String, NodeIndex> = HashMap::new();

        for (i, paper) in papers.iter().enumerate() {
            if !node_index.contains_key(&paper.id) {
                let idx = digraph.add_node(i);
                node_index.insert(paper.id.clone(), idx);
            }
        }

        for paper in papers {
            let from = node_index[&paper.id];
            for cited in &paper.references {
                match node_index.get(cited) {
                    Some(&to) if to != from => {
                        digraph.update_edge(from, to, ());
                    }
                    _ => {}
                }
            }
        }

        Self {
            digraph,
            node_index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    /// True if paper `citing` cites paper `cited` (both inside the graph).
    pub fn cites(&self, citing: &str, cited: &str) -> bool {
        match (self.node_index.get(citing), self.node_index.get(cited)) {
            (Some(&a), Some(&b)) => self.digraph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Cited and citing papers of `id` together, in input order.
    pub fn neighbors(&self, id: &str) -> Vec<usize> {
        let Some(&idx) = self.node_index.get(id) else {
            return vec![];
        };
        let mut result: Vec<usize> = self
            .digraph
            .neighbors_undirected(idx)
            .map(|n| self.digraph[n])
            .collect();
        result.sort_unstable();
        result.dedup();
        result
    }

    /// Connected components among `members` (input positions), found by BFS.
    ///
    /// Seeds are taken in input order; each component is sorted by year with
    /// a stable sort.
    pub fn components(&self, papers: &[Paper], members: &[usize]) -> Vec<Vec<String>> {
        let member_set: HashSet<usize> = members.iter().copied().collect();
        let mut visited: HashSet<usize> = HashSet::new();
        let mut components = Vec::new();

        for &seed in members {
            if !visited.insert(seed) {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::from([seed]);
            while let Some(next) = queue.pop_front() {
                component.push(next);
                for nb in self.neighbors(&papers[next].id) {
                    if member_set.contains(&nb) && visited.insert(nb) {
                        queue.push_back(nb);
                    }
                }
            }
            component.sort_by_key(|&i| papers[i].year);
            components.push(component.into_iter().map(|i| papers[i].id.clone()).collect());
        }
        components
    }
}

/// Decompose every salient keyword into its storylines, in table order.
pub fn keyword_storylines(
    papers: &[Paper],
    graph: &CitationGraph,
    keywords: &KeywordTable,
) -> Vec<Storyline> {
    keywords
        .stems()
        .map(|stem| {
            let members: Vec<usize> = papers
                .iter()
                .enumerate()
                .filter(|(_, p)| p.keywords.iter().any(|k| k == stem))
                .map(|(i, _)| i)
                .collect();
            Storyline {
                keyword: stem.to_string(),
                components: graph.components(papers, &members),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_graph.rs"]
mod tests;
