//! k-medoids partitioning over a distance matrix.
//!
//! Normalized code strings have no coordinate space, so a cluster cannot be
//! summarised by an averaged centroid. Each cluster is instead represented by
//! its medoid: the member with the smallest total distance to the rest of the
//! cluster. The loop alternates nearest-medoid assignment with medoid updates
//! until assignments stop changing or the iteration cap is hit.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::config::ClusteringConfig;
use crate::detectors::alignment::DistanceMatrix;

/// Result of partitioning N samples into clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// Cluster id for every sample index
    pub labels: Vec<usize>,

    /// Sample index of each cluster's medoid
    pub medoids: Vec<usize>,

    /// Assignment/update rounds performed
    pub iterations: usize,

    /// Whether assignments stabilised before the cap
    pub converged: bool,

    /// Sum of every sample's distance to its cluster medoid
    pub total_cost: f64,
}

impl ClusterAssignment {
    fn empty() -> Self {
        Self {
            labels: Vec::new(),
            medoids: Vec::new(),
            iterations: 0,
            converged: true,
            total_cost: 0.0,
        }
    }

    /// Number of clusters
    pub fn cluster_count(&self) -> usize {
        self.medoids.len()
    }

    /// Number of assigned samples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no samples were assigned
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Cluster of sample `index`
    pub fn cluster_of(&self, index: usize) -> Option<usize> {
        self.labels.get(index).copied()
    }

    /// Ascending member indices of `cluster`
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == cluster)
            .map(|(index, _)| index)
            .collect()
    }

    /// Member lists for every cluster, indexed by cluster id
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut clusters = vec![Vec::new(); self.cluster_count()];
        for (index, &label) in self.labels.iter().enumerate() {
            clusters[label].push(index);
        }
        clusters
    }
}

/// Medoid-based clusterer with a mandatory iteration cap.
#[derive(Debug, Clone)]
pub struct KMedoids {
    k: usize,
    max_iterations: usize,
    parallel: bool,
}

impl KMedoids {
    /// Create a clusterer for `k` clusters
    pub fn new(k: usize, max_iterations: usize) -> Self {
        Self {
            k,
            max_iterations: max_iterations.max(1),
            parallel: false,
        }
    }

    /// Create a clusterer from configuration
    pub fn from_config(config: &ClusteringConfig) -> Self {
        Self::new(config.k, config.max_iterations)
    }

    /// Compute nearest-medoid assignments on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Partition the samples of `distances`.
    ///
    /// `k` is clamped to `[1, N]`; with `k == N` every sample is its own
    /// cluster and with `N == 0` the assignment is empty.
    pub fn cluster(&self, distances: &DistanceMatrix) -> ClusterAssignment {
        let n = distances.len();
        if n == 0 {
            return ClusterAssignment::empty();
        }

        let k = self.k.clamp(1, n);
        if k != self.k {
            debug!(requested = self.k, effective = k, "Clamped cluster count");
        }
        if k == n {
            return ClusterAssignment {
                labels: (0..n).collect(),
                medoids: (0..n).collect(),
                iterations: 0,
                converged: true,
                total_cost: 0.0,
            };
        }

        let mut medoids = initial_medoids(distances, k);
        let mut labels = self.assign(distances, &medoids);
        let mut converged = false;
        let mut iterations = 0;

        for iteration in 1..=self.max_iterations {
            iterations = iteration;
            update_medoids(distances, &mut medoids, &mut labels);

            let next = self.assign(distances, &medoids);
            if next == labels {
                converged = true;
                break;
            }
            if iteration < self.max_iterations {
                labels = next;
            }
        }

        if !converged {
            warn!(
                iterations,
                clusters = k,
                "k-medoids reached the iteration cap without converging"
            );
        }

        let total_cost = labels
            .iter()
            .enumerate()
            .map(|(index, &label)| distances.get(index, medoids[label]))
            .sum();

        debug!(clusters = k, iterations, converged, total_cost, "Clustering finished");
        ClusterAssignment {
            labels,
            medoids,
            iterations,
            converged,
            total_cost,
        }
    }

    /// Nearest medoid for every sample.
    ///
    /// A medoid always stays in its own cluster, even when a duplicate sample
    /// is the medoid of a lower cluster. Other ties go to the lowest cluster id.
    fn assign(&self, distances: &DistanceMatrix, medoids: &[usize]) -> Vec<usize> {
        let nearest = |index: usize| nearest_cluster(distances, medoids, index);
        if self.parallel {
            (0..distances.len()).into_par_iter().map(nearest).collect()
        } else {
            (0..distances.len()).map(nearest).collect()
        }
    }
}

fn nearest_cluster(distances: &DistanceMatrix, medoids: &[usize], index: usize) -> usize {
    if let Some(own) = medoids.iter().position(|&medoid| medoid == index) {
        return own;
    }

    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (cluster, &medoid) in medoids.iter().enumerate() {
        let distance = distances.get(index, medoid);
        if distance < best_distance {
            best = cluster;
            best_distance = distance;
        }
    }
    best
}

fn total_distance(distances: &DistanceMatrix, candidate: usize, members: &[usize]) -> f64 {
    members.iter().map(|&other| distances.get(candidate, other)).sum()
}

/// Deterministic farthest-first seeding.
///
/// The first medoid is the most central sample; each next one is the sample
/// farthest from its nearest chosen medoid. Ties go to the lowest index.
fn initial_medoids(distances: &DistanceMatrix, k: usize) -> Vec<usize> {
    let n = distances.len();
    let all: Vec<usize> = (0..n).collect();

    let mut first = 0;
    let mut first_total = f64::INFINITY;
    for index in 0..n {
        let total = total_distance(distances, index, &all);
        if total < first_total {
            first = index;
            first_total = total;
        }
    }

    let mut medoids = vec![first];
    let mut is_medoid = vec![false; n];
    is_medoid[first] = true;
    let mut nearest: Vec<f64> = (0..n).map(|index| distances.get(index, first)).collect();

    while medoids.len() < k {
        let mut chosen = None;
        let mut chosen_distance = f64::NEG_INFINITY;
        for index in (0..n).filter(|&index| !is_medoid[index]) {
            if nearest[index] > chosen_distance {
                chosen = Some(index);
                chosen_distance = nearest[index];
            }
        }
        let Some(next) = chosen else {
            break;
        };

        medoids.push(next);
        is_medoid[next] = true;
        for (index, slot) in nearest.iter_mut().enumerate() {
            *slot = slot.min(distances.get(index, next));
        }
    }

    medoids
}

/// Move every medoid to its cluster's most central member, then reseed empty
/// clusters.
///
/// An empty cluster takes the sample farthest from its own medoid, drawn only
/// from clusters that keep at least one other member. Medoids of populated
/// clusters are never taken; the stale medoid of an empty cluster may be.
fn update_medoids(distances: &DistanceMatrix, medoids: &mut [usize], labels: &mut [usize]) {
    let k = medoids.len();
    let mut members = vec![Vec::new(); k];
    for (index, &label) in labels.iter().enumerate() {
        members[label].push(index);
    }

    let mut empty = Vec::new();
    for (cluster, cluster_members) in members.iter().enumerate() {
        if cluster_members.is_empty() {
            empty.push(cluster);
            continue;
        }
        let mut best = cluster_members[0];
        let mut best_total = f64::INFINITY;
        for &candidate in cluster_members {
            let total = total_distance(distances, candidate, cluster_members);
            if total < best_total {
                best = candidate;
                best_total = total;
            }
        }
        medoids[cluster] = best;
    }

    let mut sizes: Vec<usize> = members.iter().map(Vec::len).collect();
    let mut live = vec![false; labels.len()];
    for (cluster, &medoid) in medoids.iter().enumerate() {
        if sizes[cluster] > 0 {
            live[medoid] = true;
        }
    }

    for cluster in empty {
        let mut reseed = None;
        let mut reseed_distance = f64::NEG_INFINITY;
        for (index, &label) in labels.iter().enumerate() {
            if sizes[label] < 2 || live[index] {
                continue;
            }
            let distance = distances.get(index, medoids[label]);
            if distance > reseed_distance {
                reseed = Some(index);
                reseed_distance = distance;
            }
        }

        match reseed {
            Some(index) => {
                debug!(cluster, sample = index, "Reseeding empty cluster");
                sizes[labels[index]] -= 1;
                sizes[cluster] = 1;
                labels[index] = cluster;
                medoids[cluster] = index;
                live[index] = true;
            }
            None => warn!(cluster, "No sample available to reseed empty cluster"),
        }
    }
}
