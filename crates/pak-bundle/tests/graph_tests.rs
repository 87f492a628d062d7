//! Integration tests for the generic graph.

use pak_bundle::{EdgeId, Graph, NodeId};
use quickcheck_macros::quickcheck;

/// Helper to build a graph of `n` nodes named by their index
fn graph(n: usize) -> (Graph<usize, &'static str>, Vec<NodeId>) {
    let mut graph = Graph::new();
    let nodes = (0..n).map(|i| graph.add(i)).collect();
    (graph, nodes)
}

fn link(graph: &mut Graph<usize, &'static str>, from: NodeId, to: NodeId) -> EdgeId {
    let edge = graph.add_edge("link");
    assert!(graph.relate(from, to, edge));
    edge
}

/// Every attached edge is recorded at both ends, and nowhere else.
fn is_symmetric<N, E>(graph: &Graph<N, E>) -> bool {
    graph.nodes().all(|node| {
        graph.outgoing(node).iter().all(|&(edge, to)| {
            graph.incoming(to).contains(&(edge, node))
                && graph.endpoints(edge) == Some((node, to))
        }) && graph.incoming(node).iter().all(|&(edge, from)| {
            graph.outgoing(from).contains(&(edge, node))
                && graph.endpoints(edge) == Some((from, node))
        })
    })
}

#[test]
fn test_add_inserts_by_identity() {
    let mut graph: Graph<&str, ()> = Graph::new();
    let a = graph.add("same");
    let b = graph.add("same");
    assert_ne!(a, b);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.node(a), Some(&"same"));
}

#[test]
fn test_relate_sets_both_ends() {
    let (mut graph, n) = graph(2);
    let edge = link(&mut graph, n[0], n[1]);
    assert_eq!(graph.outgoing(n[0]), [(edge, n[1])]);
    assert_eq!(graph.incoming(n[1]), [(edge, n[0])]);
    assert_eq!(graph.relation(n[0], n[1]), Some(edge));
    assert_eq!(graph.relation(n[1], n[0]), None);
    assert_eq!(graph.endpoints(edge), Some((n[0], n[1])));
}

#[test]
fn test_relate_unknown_node_fails() {
    let (mut graph, n) = graph(2);
    let _ = graph.delete(n[1]);
    let edge = graph.add_edge("link");
    assert!(!graph.relate(n[0], n[1], edge));
    assert!(graph.outgoing(n[0]).is_empty());
    assert_eq!(graph.endpoints(edge), None);
}

#[test]
fn test_relate_moves_an_attached_edge() {
    let (mut graph, n) = graph(3);
    let edge = link(&mut graph, n[0], n[1]);
    assert!(graph.relate(n[2], n[1], edge));
    assert!(graph.outgoing(n[0]).is_empty());
    assert_eq!(graph.incoming(n[1]), [(edge, n[2])]);
    assert!(is_symmetric(&graph));
}

#[test]
fn test_delete_detaches_incident_edges() {
    let (mut graph, n) = graph(3);
    let ab = link(&mut graph, n[0], n[1]);
    let bc = link(&mut graph, n[1], n[2]);
    let ac = link(&mut graph, n[0], n[2]);

    assert_eq!(graph.delete(n[1]), Some(1));
    assert!(!graph.contains(n[1]));
    assert_eq!(graph.outgoing(n[0]), [(ac, n[2])]);
    assert_eq!(graph.incoming(n[2]), [(ac, n[0])]);
    assert_eq!(graph.endpoints(ab), None);
    assert_eq!(graph.endpoints(bc), None);
    assert_eq!(graph.edge(ab), Some(&"link"));
    assert_eq!(graph.delete(n[1]), None);
}

#[test]
fn test_roots_and_leaves() {
    let (mut graph, n) = graph(4);
    let _ = link(&mut graph, n[0], n[1]);
    let _ = link(&mut graph, n[1], n[2]);
    assert_eq!(graph.roots(), [n[0], n[3]]);
    assert_eq!(graph.leaves(), [n[2], n[3]]);
}

#[test]
fn test_lookup_returns_first_match() {
    let (graph, n) = graph(5);
    assert_eq!(graph.lookup(|&value| value % 2 == 1), Some(n[1]));
    assert_eq!(graph.lookup(|&value| value > 10), None);
}

#[test]
fn test_self_loop() {
    let (mut graph, n) = graph(1);
    let edge = link(&mut graph, n[0], n[0]);
    assert_eq!(graph.relation(n[0], n[0]), Some(edge));
    assert!(graph.roots().is_empty());
    let _ = graph.delete(n[0]);
    assert_eq!(graph.endpoints(edge), None);
    assert!(graph.is_empty());
}

#[test]
fn test_node_pair_mut() {
    let (mut graph, n) = graph(3);
    if let Some((a, b)) = graph.node_pair_mut(n[2], n[0]) {
        *a += 10;
        *b += 20;
    }
    assert_eq!(graph.node(n[2]), Some(&12));
    assert_eq!(graph.node(n[0]), Some(&20));
    assert!(graph.node_pair_mut(n[1], n[1]).is_none());
}

#[test]
fn test_unrelate_and_remove_edge() {
    let (mut graph, n) = graph(2);
    let edge = link(&mut graph, n[0], n[1]);
    assert!(graph.unrelate(edge));
    assert!(!graph.unrelate(edge));
    assert!(graph.incoming(n[1]).is_empty());

    assert!(graph.relate(n[0], n[1], edge));
    assert_eq!(graph.remove_edge(edge), Some("link"));
    assert!(graph.outgoing(n[0]).is_empty());
    assert_eq!(graph.edge(edge), None);
}

#[quickcheck]
fn prop_adjacency_stays_symmetric(operations: Vec<(u8, u8, u8)>) -> bool {
    let (mut graph, nodes) = graph(6);
    let mut edges: Vec<EdgeId> = Vec::new();

    for (op, a, b) in operations {
        let from = nodes[usize::from(a) % nodes.len()];
        let to = nodes[usize::from(b) % nodes.len()];
        match op % 4 {
            0 | 1 => {
                let edge = graph.add_edge("e");
                let _ = graph.relate(from, to, edge);
                edges.push(edge);
            }
            2 if !edges.is_empty() => {
                let edge = edges[usize::from(a) % edges.len()];
                let _ = graph.relate(from, to, edge);
            }
            _ => {
                let _ = graph.delete(from);
            }
        }
        if !is_symmetric(&graph) {
            return false;
        }
    }
    true
}
