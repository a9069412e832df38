use advent::helpers;
use anyhow::{Context, Result};
use petgraph::graphmap::UnGraphMap;
use std::collections::{HashMap, VecDeque};

type Component<'a> = &'a str;
type WiringGraph<'a> = UnGraphMap<Component<'a>, ()>;
type Flow<'a> = HashMap<(Component<'a>, Component<'a>), i32>;

const WIRES_TO_CUT: usize = 3;

fn parse_wiring(s: &str) -> Result<WiringGraph> {
    let mut graph = WiringGraph::new();
    for line in s.trim().lines() {
        let (name, connected) = line
            .trim()
            .split_once(": ")
            .with_context(|| format!("Invalid wiring line: {}", line))?;
        for other in connected.split_whitespace() {
            graph.add_edge(name, other, ());
        }
    }
    Ok(graph)
}

fn residual<'a>(flow: &Flow<'a>, from: Component<'a>, to: Component<'a>) -> i32 {
    1 - flow.get(&(from, to)).copied().unwrap_or_default()
}

/// Components reachable from `source` through wires with spare capacity,
/// along with the parent links of the search.
fn residual_search<'a>(
    graph: &WiringGraph<'a>,
    flow: &Flow<'a>,
    source: Component<'a>,
) -> HashMap<Component<'a>, Component<'a>> {
    let mut parents = HashMap::new();
    parents.insert(source, source);
    let mut queue = VecDeque::from(vec![source]);
    while let Some(current) = queue.pop_front() {
        for next in graph.neighbors(current) {
            if !parents.contains_key(next) && residual(flow, current, next) > 0 {
                parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }
    parents
}

/// Edmonds-Karp on unit capacities. Stops once the flow exceeds `limit`,
/// otherwise returns the size of the source side of the minimum cut.
fn source_side_of_min_cut<'a>(
    graph: &WiringGraph<'a>,
    source: Component<'a>,
    sink: Component<'a>,
    limit: usize,
) -> Option<usize> {
    let mut flow = Flow::new();
    for _ in 0..=limit {
        let parents = residual_search(graph, &flow, source);
        if !parents.contains_key(sink) {
            return Some(parents.len());
        }
        let mut node = sink;
        while node != source {
            let parent = parents[node];
            *flow.entry((parent, node)).or_default() += 1;
            *flow.entry((node, parent)).or_default() -= 1;
            node = parent;
        }
    }
    None
}

fn group_size_product(s: &str) -> Result<usize> {
    let graph = parse_wiring(s)?;
    let source = graph.nodes().next().context("No components")?;
    let total = graph.node_count();
    graph
        .nodes()
        .skip(1)
        .find_map(|sink| source_side_of_min_cut(&graph, source, sink, WIRES_TO_CUT))
        .map(|side| side * (total - side))
        .with_context(|| format!("No {} wires split the components in two", WIRES_TO_CUT))
}

fn solve_p1() -> Result<()> {
    let input = helpers::read_day_input("d25")?;
    let product = group_size_product(&input)?;
    println!("Product of the two group sizes: {}", product);
    Ok(())
}

fn main() -> Result<()> {
    solve_p1()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "
jqt: rhn xhk nvd
rsh: frs pzl lsr
xhk: hfx
cmg: qnr nvd lhk bvb
rhn: xhk bvb hfx
bvb: xhk hfx
pzl: lsr hfx nvd
qnr: nvd
ntq: jqt hfx bvb xhk
nvd: lhk
lsr: lhk
rzs: qnr cmg lsr rsh
frs: qnr lhk lsr";

    #[test]
    fn test_p1() {
        assert_eq!(group_size_product(INPUT).unwrap(), 54);
    }

    #[test]
    fn test_min_cut() {
        let graph = parse_wiring(INPUT).unwrap();
        assert_eq!(graph.node_count(), 15);
        // Same side of the cut.
        assert_eq!(source_side_of_min_cut(&graph, "jqt", "hfx", 3), None);
        assert_eq!(source_side_of_min_cut(&graph, "jqt", "cmg", 3), Some(6));
    }

    #[test]
    fn test_no_three_wire_cut() {
        let input = "
a: b c d e
b: c d e
c: d e
d: e";
        assert!(group_size_product(input).is_err());
    }
}
