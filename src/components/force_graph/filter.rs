use std::collections::HashSet;

use super::types::{GraphLink, GraphNode, LinkIdx, NodeIdx, Selection};

/// Links visible under `selection`.
///
/// A company selection keeps the links that originate from it; the target
/// side is never consulted. Unknown ids simply match nothing.
pub fn filter_links(selection: &Selection, links: &[GraphLink]) -> Vec<LinkIdx> {
	links
		.iter()
		.enumerate()
		.filter(|(_, link)| match selection {
			Selection::All => true,
			Selection::Company(id) => link.source == *id,
		})
		.map(|(i, _)| LinkIdx(i))
		.collect()
}

/// Nodes that are an endpoint of at least one active link, in node order.
pub fn active_nodes(links: &[GraphLink], active: &[LinkIdx], nodes: &[GraphNode]) -> Vec<NodeIdx> {
	let ids: HashSet<&str> = active
		.iter()
		.flat_map(|&LinkIdx(i)| [links[i].source.as_str(), links[i].target.as_str()])
		.collect();

	nodes
		.iter()
		.enumerate()
		.filter(|(_, node)| ids.contains(node.id.as_str()))
		.map(|(i, _)| NodeIdx(i))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::NodeGroup;

	fn node(id: &str, group: NodeGroup) -> GraphNode {
		GraphNode {
			id: id.into(),
			group,
		}
	}

	fn link(source: &str, target: &str, value: f64) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			value,
		}
	}

	fn sample() -> (Vec<GraphNode>, Vec<GraphLink>) {
		(
			vec![
				node("A", NodeGroup::Company),
				node("B", NodeGroup::Driver),
				node("C", NodeGroup::Anti),
				node("D", NodeGroup::Company),
				node("E", NodeGroup::Driver),
			],
			vec![
				link("A", "B", 4.0),
				link("A", "C", -2.0),
				link("D", "A", 1.0),
				link("D", "B", 0.5),
			],
		)
	}

	#[test]
	fn all_is_identity() {
		let (_, links) = sample();
		let active = filter_links(&Selection::All, &links);
		assert_eq!(active, (0..links.len()).map(LinkIdx).collect::<Vec<_>>());
	}

	#[test]
	fn company_keeps_every_outgoing_link() {
		let (_, links) = sample();
		let active = filter_links(&Selection::Company("D".into()), &links);
		assert_eq!(active, vec![LinkIdx(2), LinkIdx(3)]);
		assert!(active.iter().all(|&LinkIdx(i)| links[i].source == "D"));
	}

	#[test]
	fn filtering_ignores_targets() {
		let (nodes, links) = sample();
		// A is the target of D->A but that link is not picked up
		let active = filter_links(&Selection::Company("A".into()), &links);
		assert_eq!(active, vec![LinkIdx(0), LinkIdx(1)]);

		let active = filter_links(&Selection::Company("B".into()), &links);
		assert!(active.is_empty());
		assert!(active_nodes(&links, &active, &nodes).is_empty());
	}

	#[test]
	fn unknown_company_is_empty() {
		let (_, links) = sample();
		assert!(filter_links(&Selection::Company("Z".into()), &links).is_empty());
	}

	#[test]
	fn active_nodes_are_link_endpoints_in_node_order() {
		let (nodes, links) = sample();
		let active = vec![LinkIdx(3), LinkIdx(2)];
		assert_eq!(
			active_nodes(&links, &active, &nodes),
			vec![NodeIdx(0), NodeIdx(1), NodeIdx(3)]
		);
	}

	#[test]
	fn isolated_nodes_never_appear() {
		let (nodes, links) = sample();
		let active = filter_links(&Selection::All, &links);
		let ids: Vec<_> = active_nodes(&links, &active, &nodes)
			.into_iter()
			.map(|NodeIdx(i)| nodes[i].id.as_str())
			.collect();
		assert_eq!(ids, vec!["A", "B", "C", "D"]);
	}
}
