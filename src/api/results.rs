//! Analysis results returned by [`crate::api::engine::CodealignEngine`].

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::sample::SampleId;
use crate::detectors::alignment::{DistanceMatrix, ScoreMatrix};
use crate::detectors::templates::Template;

/// Outcome of one similarity run over a batch of samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Per-sample metadata in input order
    pub samples: Vec<SampleSummary>,

    /// Cluster membership, indexed by cluster id
    pub clusters: Vec<ClusterSummary>,

    /// One template per cluster, indexed by cluster id
    pub templates: Vec<Template>,

    /// Pairwise alignment scores in input order
    pub score_matrix: ScoreMatrix,

    /// Distances derived from `score_matrix`
    pub distance_matrix: DistanceMatrix,

    /// Run statistics
    pub statistics: RunStatistics,
}

/// Metadata for one input sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Sample identifier
    pub id: SampleId,

    /// Cluster the sample was assigned to
    pub cluster_id: usize,

    /// Characters in the normalized form
    pub normalized_length: usize,

    /// Normalized form of the sample
    pub normalized: String,
}

/// Members of one cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Cluster id
    pub cluster_id: usize,

    /// Identifier of the cluster's medoid sample
    pub medoid_id: SampleId,

    /// Member identifiers in input order
    pub member_ids: Vec<SampleId>,
}

/// Statistics about a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Number of samples analyzed
    pub sample_count: usize,

    /// Number of clusters produced
    pub cluster_count: usize,

    /// Largest off-diagonal alignment score, if any pair existed
    pub max_score: Option<f64>,

    /// k-medoids rounds performed
    pub iterations: usize,

    /// Whether clustering converged before its iteration cap
    pub converged: bool,

    /// Sum of distances from samples to their medoids
    pub total_cost: f64,

    /// Templates built from shared substrings
    pub mined_templates: usize,

    /// Wall-clock time of the run
    pub total_duration: Duration,
}

impl AnalysisResults {
    /// Empty results for an empty batch
    pub fn empty() -> Self {
        Self {
            samples: Vec::new(),
            clusters: Vec::new(),
            templates: Vec::new(),
            score_matrix: ScoreMatrix::default(),
            distance_matrix: DistanceMatrix::default(),
            statistics: RunStatistics::default(),
        }
    }

    /// Number of samples analyzed
    pub fn samples_analyzed(&self) -> usize {
        self.samples.len()
    }

    /// Mapping from sample identifier to cluster id
    pub fn assignment_map(&self) -> HashMap<&str, usize> {
        self.samples
            .iter()
            .map(|sample| (sample.id.as_str(), sample.cluster_id))
            .collect()
    }

    /// Cluster of the sample with identifier `id`
    pub fn cluster_of(&self, id: &str) -> Option<usize> {
        self.samples
            .iter()
            .find(|sample| sample.id == id)
            .map(|sample| sample.cluster_id)
    }

    /// Template of `cluster_id`
    pub fn template_for(&self, cluster_id: usize) -> Option<&Template> {
        self.templates.get(cluster_id)
    }
}
