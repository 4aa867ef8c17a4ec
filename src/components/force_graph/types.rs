use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Category of an entity in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
	Company,
	Driver,
	Anti,
}

impl NodeGroup {
	pub fn as_str(self) -> &'static str {
		match self {
			NodeGroup::Company => "company",
			NodeGroup::Driver => "driver",
			NodeGroup::Anti => "anti",
		}
	}
}

impl fmt::Display for NodeGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	pub group: NodeGroup,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	/// Relationship weight, may be negative.
	pub value: f64,
}

impl GraphLink {
	/// Composite identity used to key the rendered line.
	pub fn key(&self) -> String {
		format!("{}-{}", self.source, self.target)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parse the `{ nodes, links }` JSON document.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Distinct company ids in node order.
	pub fn companies(&self) -> Vec<String> {
		let mut seen = std::collections::HashSet::new();
		self.nodes
			.iter()
			.filter(|n| n.group == NodeGroup::Company)
			.filter(|n| seen.insert(n.id.as_str()))
			.map(|n| n.id.clone())
			.collect()
	}
}

/// Handle of a node inside the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub usize);

/// Handle of a link inside the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkIdx(pub usize);

/// Which part of the graph is visible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	All,
	Company(String),
}

impl Selection {
	pub const ALL: &'static str = "ALL";
}

impl From<&str> for Selection {
	fn from(value: &str) -> Self {
		if value == Self::ALL {
			Selection::All
		} else {
			Selection::Company(value.to_string())
		}
	}
}

impl From<String> for Selection {
	fn from(value: String) -> Self {
		if value == Self::ALL {
			Selection::All
		} else {
			Selection::Company(value)
		}
	}
}

impl fmt::Display for Selection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Selection::All => f.write_str(Self::ALL),
			Selection::Company(id) => f.write_str(id),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = r#"{
		"nodes": [
			{"id": "A", "group": "company"},
			{"id": "B", "group": "driver"},
			{"id": "C", "group": "anti"},
			{"id": "D", "group": "company"}
		],
		"links": [
			{"source": "A", "target": "B", "value": 4},
			{"source": "A", "target": "C", "value": -2.5}
		]
	}"#;

	#[test]
	fn parses_resource_document() {
		let data = GraphData::from_json(SAMPLE).unwrap();
		assert_eq!(data.nodes.len(), 4);
		assert_eq!(data.nodes[2].group, NodeGroup::Anti);
		assert_eq!(data.links[1].value, -2.5);
		assert_eq!(data.links[0].key(), "A-B");
	}

	#[test]
	fn rejects_unknown_group() {
		let err = GraphData::from_json(r#"{"nodes":[{"id":"X","group":"robot"}],"links":[]}"#)
			.unwrap_err();
		assert!(matches!(err, GraphError::Parse(_)));
	}

	#[test]
	fn companies_are_distinct_and_ordered() {
		let mut data = GraphData::from_json(SAMPLE).unwrap();
		data.nodes.push(GraphNode {
			id: "A".into(),
			group: NodeGroup::Company,
		});
		assert_eq!(data.companies(), vec!["A".to_string(), "D".to_string()]);
	}

	#[test]
	fn selection_from_control_value() {
		assert_eq!(Selection::from("ALL"), Selection::All);
		assert_eq!(Selection::from("A"), Selection::Company("A".into()));
		assert_eq!(Selection::from("all".to_string()).to_string(), "all");
	}
}
