//! Template synthesis for clusters of normalized sequences.

pub mod miner;

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::{FallbackPolicy, TemplateConfig};
use crate::detectors::clustering::ClusterAssignment;

pub use miner::{common_substrings, SubstringMiner};

/// How a template's parts were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Parts are substrings common to every member
    Mined,
    /// Nothing was shared; the single part is the first member verbatim
    Fallback,
    /// Nothing was shared and fallback is disabled
    Absent,
    /// The cluster had no members
    Empty,
}

/// Representative skeleton of one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Cluster this template describes
    pub cluster_id: usize,

    /// Literal parts, longest first for mined templates
    pub parts: Vec<String>,

    /// Placeholder written around mined parts
    pub separator: String,

    /// Provenance of `parts`
    pub kind: TemplateKind,
}

impl Template {
    fn without_parts(cluster_id: usize, separator: &str, kind: TemplateKind) -> Self {
        Self {
            cluster_id,
            parts: Vec::new(),
            separator: separator.to_string(),
            kind,
        }
    }

    /// Textual form of the template.
    ///
    /// Mined parts are wrapped as `sep part1 sep part2 ... sep` without spaces;
    /// a fallback renders its single part verbatim.
    pub fn render(&self) -> String {
        match self.kind {
            TemplateKind::Mined => {
                let mut rendered = self.separator.clone();
                for part in &self.parts {
                    rendered.push_str(part);
                    rendered.push_str(&self.separator);
                }
                rendered
            }
            TemplateKind::Fallback => self.parts.concat(),
            TemplateKind::Absent | TemplateKind::Empty => String::new(),
        }
    }

    /// Whether the template was mined from shared substrings
    pub fn is_mined(&self) -> bool {
        self.kind == TemplateKind::Mined
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Builds one [`Template`] per cluster.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    miner: SubstringMiner,
    max_parts: usize,
    placeholder: String,
    fallback: FallbackPolicy,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::from_config(&TemplateConfig::default())
    }
}

impl TemplateBuilder {
    /// Create a builder from configuration
    pub fn from_config(config: &TemplateConfig) -> Self {
        Self {
            miner: SubstringMiner::new(config.min_substring_length)
                .with_max_base_length(config.max_base_length),
            max_parts: config.max_parts,
            placeholder: config.placeholder.clone(),
            fallback: config.fallback,
        }
    }

    /// Build the template of the members at `member_indices` of `sequences`.
    ///
    /// Indices outside `sequences` are ignored.
    pub fn build_template<S: AsRef<str>>(
        &self,
        cluster_id: usize,
        sequences: &[S],
        member_indices: &[usize],
    ) -> Template {
        let members: Vec<&str> = member_indices
            .iter()
            .filter_map(|&index| sequences.get(index))
            .map(AsRef::as_ref)
            .collect();

        let Some(&first) = members.first() else {
            return Template::without_parts(cluster_id, &self.placeholder, TemplateKind::Empty);
        };

        let parts = self.miner.top_common_substrings(&members, self.max_parts);
        if !parts.is_empty() {
            return Template {
                cluster_id,
                parts,
                separator: self.placeholder.clone(),
                kind: TemplateKind::Mined,
            };
        }

        debug!(
            cluster_id,
            members = members.len(),
            min_length = self.miner.min_length(),
            "No common substring in cluster"
        );
        match self.fallback {
            FallbackPolicy::FirstMember => Template {
                cluster_id,
                parts: vec![first.to_string()],
                separator: self.placeholder.clone(),
                kind: TemplateKind::Fallback,
            },
            FallbackPolicy::Absent => {
                Template::without_parts(cluster_id, &self.placeholder, TemplateKind::Absent)
            }
        }
    }

    /// Templates for every cluster of `assignment`, indexed by cluster id
    pub fn build_all<S: AsRef<str> + Sync>(
        &self,
        sequences: &[S],
        assignment: &ClusterAssignment,
        parallel: bool,
    ) -> Vec<Template> {
        let clusters = assignment.clusters();
        let build = |(cluster_id, members): (usize, &Vec<usize>)| {
            self.build_template(cluster_id, sequences, members)
        };

        if parallel {
            clusters.par_iter().enumerate().map(build).collect()
        } else {
            clusters.iter().enumerate().map(build).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(min_substring_length: usize) -> TemplateBuilder {
        TemplateBuilder::from_config(&TemplateConfig {
            min_substring_length,
            ..TemplateConfig::default()
        })
    }

    #[test]
    fn test_mined_template_renders_with_placeholders() {
        let sequences = ["xxifreturnyy", "zzzifreturnq"];
        let template = builder(5).build_template(0, &sequences, &[0, 1]);
        assert_eq!(template.kind, TemplateKind::Mined);
        assert_eq!(template.parts[0], "ifreturn");
        assert!(template.render().starts_with("...ifreturn..."));
        assert!(template.render().ends_with("..."));
        assert_eq!(format!("{template}"), template.render());
    }

    #[test]
    fn test_part_count_is_capped() {
        let sequences = ["abcdefghij", "abcdefghij"];
        let builder = TemplateBuilder::from_config(&TemplateConfig {
            min_substring_length: 2,
            max_parts: 3,
            ..TemplateConfig::default()
        });
        let template = builder.build_template(4, &sequences, &[0, 1]);
        assert_eq!(template.cluster_id, 4);
        assert_eq!(
            template.parts,
            vec!["abcdefghij", "abcdefghi", "bcdefghij"]
        );
        assert_eq!(
            template.render(),
            "...abcdefghij...abcdefghi...bcdefghij..."
        );
    }

    #[test]
    fn test_fallback_uses_first_member_verbatim() {
        let sequences = ["ifx==:returnx", "whilepassbreak"];
        let template = builder(10).build_template(1, &sequences, &[1, 0]);
        assert_eq!(template.kind, TemplateKind::Fallback);
        assert_eq!(template.render(), "whilepassbreak");
    }

    #[test]
    fn test_absent_policy_leaves_template_blank() {
        let builder = TemplateBuilder::from_config(&TemplateConfig {
            fallback: FallbackPolicy::Absent,
            ..TemplateConfig::default()
        });
        let template = builder.build_template(0, &["short", "other"], &[0, 1]);
        assert_eq!(template.kind, TemplateKind::Absent);
        assert!(template.parts.is_empty());
        assert_eq!(template.render(), "");
    }

    #[test]
    fn test_empty_cluster() {
        let sequences = ["anything"];
        let template = builder(3).build_template(2, &sequences, &[]);
        assert_eq!(template.kind, TemplateKind::Empty);
        assert_eq!(template.render(), "");
    }

    #[test]
    fn test_build_all_follows_assignment() {
        let sequences = [
            "defscan_tokens(self):returntokens",
            "defscan_tokens(self):tokens=[]returntokens",
            "whiletrue:pass",
        ];
        let assignment = ClusterAssignment {
            labels: vec![0, 0, 1],
            medoids: vec![0, 2],
            iterations: 1,
            converged: true,
            total_cost: 0.0,
        };
        let builder = TemplateBuilder::default();
        let serial = builder.build_all(&sequences, &assignment, false);
        let parallel = builder.build_all(&sequences, &assignment, true);

        assert_eq!(serial, parallel);
        assert_eq!(serial.len(), 2);
        assert_eq!(serial[0].kind, TemplateKind::Mined);
        assert_eq!(serial[0].parts[0], "defscan_tokens(self):");
        // A singleton is common with itself.
        assert_eq!(serial[1].kind, TemplateKind::Mined);
        assert_eq!(serial[1].parts[0], "whiletrue:pass");
    }

    #[test]
    fn test_template_serializes_kind_in_snake_case() {
        let template = builder(3).build_template(0, &["a"], &[0]);
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["kind"], "fallback");
    }
}
