//! Main analysis engine implementation.

use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::api::results::{AnalysisResults, ClusterSummary, RunStatistics, SampleSummary};
use crate::core::config::CodealignConfig;
use crate::core::errors::{CodealignError, Result};
use crate::core::sample::{ensure_unique_ids, SourceSample};
use crate::detectors::alignment::{GlobalAligner, ScoreMatrix};
use crate::detectors::clustering::KMedoids;
use crate::detectors::normalization::{CodeNormalizer, NormalizedSequence};
use crate::detectors::templates::TemplateBuilder;

/// Runs normalization, alignment, clustering and template synthesis over one
/// batch of samples.
pub struct CodealignEngine {
    config: CodealignConfig,
    aligner: GlobalAligner,
    clusterer: KMedoids,
    templates: TemplateBuilder,
    pool: Option<ThreadPool>,
}

impl CodealignEngine {
    /// Create an engine, validating the configuration first
    pub fn new(config: CodealignConfig) -> Result<Self> {
        info!("Initializing codealign engine");
        config.validate()?;

        // Fail early if the language grammar cannot be loaded.
        CodeNormalizer::new(config.normalization.clone())?;

        let parallel = config.performance.parallel;
        let pool = match config.performance.max_threads {
            Some(threads) if parallel => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        CodealignError::config_field(
                            format!("Failed to build thread pool: {e}"),
                            "performance.max_threads",
                        )
                    })?,
            ),
            _ => None,
        };

        Ok(Self {
            aligner: GlobalAligner::from_config(&config.alignment),
            clusterer: KMedoids::from_config(&config.clustering).with_parallel(parallel),
            templates: TemplateBuilder::from_config(&config.templates),
            pool,
            config,
        })
    }

    /// Current configuration
    pub fn config(&self) -> &CodealignConfig {
        &self.config
    }

    /// Analyze one batch of samples.
    ///
    /// Fails only on duplicate identifiers; everything downstream of ingestion
    /// is total.
    pub fn analyze(&self, samples: Vec<SourceSample>) -> Result<AnalysisResults> {
        ensure_unique_ids(&samples)?;
        if samples.is_empty() {
            info!("No samples to analyze");
            return Ok(AnalysisResults::empty());
        }

        match &self.pool {
            Some(pool) => pool.install(|| self.run(&samples)),
            None => self.run(&samples),
        }
    }

    /// Normalize samples in input order
    pub fn normalize(&self, samples: &[SourceSample]) -> Result<Vec<NormalizedSequence>> {
        let config = &self.config.normalization;
        if self.config.performance.parallel {
            samples
                .par_iter()
                .map_init(
                    || CodeNormalizer::new(config.clone()),
                    |normalizer, sample| match normalizer {
                        Ok(normalizer) => Ok(normalizer.normalize(sample)),
                        Err(e) => Err(CodealignError::internal(format!(
                            "Failed to create normalizer: {e}"
                        ))),
                    },
                )
                .collect()
        } else {
            let mut normalizer = CodeNormalizer::new(config.clone())?;
            Ok(samples
                .iter()
                .map(|sample| normalizer.normalize(sample))
                .collect())
        }
    }

    fn run(&self, samples: &[SourceSample]) -> Result<AnalysisResults> {
        let start = Instant::now();
        let parallel = self.config.performance.parallel;
        info!(samples = samples.len(), parallel, "Starting similarity analysis");

        let sequences = self
            .normalize(samples)
            .map_err(|e| e.with_context("normalization"))?;
        debug!(
            total_chars = sequences.iter().map(NormalizedSequence::len).sum::<usize>(),
            "Normalization complete"
        );

        let score_matrix = ScoreMatrix::compute(&sequences, &self.aligner, parallel);
        let distance_matrix = score_matrix.to_distance();
        let assignment = self.clusterer.cluster(&distance_matrix);
        let templates = self.templates.build_all(&sequences, &assignment, parallel);

        let clusters: Vec<ClusterSummary> = assignment
            .clusters()
            .into_iter()
            .enumerate()
            .map(|(cluster_id, members)| ClusterSummary {
                cluster_id,
                medoid_id: samples[assignment.medoids[cluster_id]].id().to_string(),
                member_ids: members
                    .into_iter()
                    .map(|index| samples[index].id().to_string())
                    .collect(),
            })
            .collect();

        let summaries: Vec<SampleSummary> = sequences
            .into_iter()
            .zip(&assignment.labels)
            .map(|(sequence, &cluster_id)| SampleSummary {
                normalized_length: sequence.len(),
                id: sequence.sample_id,
                cluster_id,
                normalized: sequence.text,
            })
            .collect();

        let statistics = RunStatistics {
            sample_count: summaries.len(),
            cluster_count: clusters.len(),
            max_score: score_matrix.max_score(),
            iterations: assignment.iterations,
            converged: assignment.converged,
            total_cost: assignment.total_cost,
            mined_templates: templates.iter().filter(|t| t.is_mined()).count(),
            total_duration: start.elapsed(),
        };

        info!(
            samples = statistics.sample_count,
            clusters = statistics.cluster_count,
            mined_templates = statistics.mined_templates,
            converged = statistics.converged,
            elapsed_ms = statistics.total_duration.as_millis() as u64,
            "Similarity analysis complete"
        );

        Ok(AnalysisResults {
            samples: summaries,
            clusters,
            templates,
            score_matrix,
            distance_matrix,
            statistics,
        })
    }
}
