//! Transform orchestration.
//!
//! Sequences validation, candidate resolution, external selection,
//! aggregation, assembly, and publish. Publishing is the last step and is
//! all-or-nothing: every failure before it leaves the registry exactly as
//! it was, and a cancelled selection is an ordinary outcome, not a defect.

use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::traits::{DatasetRegistry, SourceSelector};
use crate::types::{Dataset, LinkedData, PointData};

use super::aggregate::compute_all;
use super::assembler::{assemble_per_cluster, assemble_per_parent_point};
use super::error::TransformError;
use super::params::TransformParams;
use super::resolver::find_candidates;
use super::validator::validate_indices;

/// The cluster-means transform.
///
/// Computes per-dimension mean and population standard deviation for every
/// cluster of the input dataset against a user-chosen source, then
/// publishes the result as a new point dataset.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cluster_means_core::stubs::{FixedSelector, InMemoryRegistry};
/// use cluster_means_core::traits::DatasetRegistry;
/// use cluster_means_core::transform::ClusterMeansTransform;
/// use cluster_means_core::types::{Cluster, ClusterData, Dataset, PointData};
///
/// let registry = Arc::new(InMemoryRegistry::new());
/// let source = PointData::from_f32(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
/// let source_id = registry.insert(Dataset::points("base", source)).unwrap();
/// let clusters = ClusterData::new(vec![Cluster::new(vec![0, 1])]);
/// let input = registry
///     .insert(Dataset::clusters("groups", clusters).with_parent(source_id))
///     .unwrap();
///
/// let transform =
///     ClusterMeansTransform::new(registry.clone(), Arc::new(FixedSelector::pick(0)));
/// let output = transform.run(input).unwrap();
/// assert_eq!(registry.get(output).unwrap().name, "base Cluster Means");
/// ```
pub struct ClusterMeansTransform {
    registry: Arc<dyn DatasetRegistry>,
    selector: Arc<dyn SourceSelector>,
    params: TransformParams,
}

impl ClusterMeansTransform {
    /// Create a transform with default parameters.
    pub fn new(registry: Arc<dyn DatasetRegistry>, selector: Arc<dyn SourceSelector>) -> Self {
        Self {
            registry,
            selector,
            params: TransformParams::default(),
        }
    }

    /// Override the transform parameters.
    #[must_use]
    pub fn with_params(mut self, params: TransformParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &TransformParams {
        &self.params
    }

    /// Run the transform on a cluster dataset.
    ///
    /// Returns the id of the newly published point dataset.
    ///
    /// # Errors
    ///
    /// Every failure is recovered to a diagnostic here; the registry is
    /// left unchanged except for the successful-path cluster-statistics
    /// write-back and the published output.
    pub fn run(&self, input: Uuid) -> CoreResult<Uuid> {
        let result = self.run_inner(input);
        match &result {
            Ok(output) => info!(%input, %output, "cluster means transform finished"),
            Err(err) if err.is_cancellation() => {
                info!(%input, "cluster means transform cancelled, no dataset created");
            }
            Err(err) => {
                error!(%input, %err, "cluster means transform failed, no dataset created");
            }
        }
        result
    }

    fn run_inner(&self, input: Uuid) -> CoreResult<Uuid> {
        self.params.validate().map_err(CoreError::from)?;

        let cluster_dataset = self.registry.get(input)?;
        let cluster_data = cluster_dataset
            .as_clusters()
            .ok_or(CoreError::WrongDatasetKind {
                id: input,
                expected: "clusters",
            })?;

        let census = validate_indices(&cluster_data.clusters)?;
        debug!(
            clusters = cluster_data.len(),
            unique_count = census.unique_count,
            max_index = census.max_index,
            "cluster indices validated"
        );

        let candidates = find_candidates(self.registry.as_ref(), &cluster_dataset, &census)?;
        info!(
            candidates = candidates.len(),
            "offering candidate aggregation sources"
        );

        let choice = self
            .selector
            .choose(&candidates)
            .ok_or(CoreError::SelectionCancelled)?;

        // The selector contract only allows confirming an offered
        // candidate; re-check rather than trust it.
        let source = candidates
            .iter()
            .find(|candidate| candidate.id == choice.dataset)
            .cloned()
            .ok_or_else(|| {
                CoreError::invalid_selection("chosen dataset is not one of the offered candidates")
            })?;
        let source_points = source
            .as_points()
            .ok_or_else(|| CoreError::invalid_selection("chosen dataset holds no point data"))?;

        let num_dimensions = source_points.num_dimensions();
        info!(
            source = %source.name,
            dimensions = num_dimensions,
            "aggregating cluster statistics"
        );

        let view = source_points.view();
        let statistics = compute_all(
            &cluster_data.clusters,
            &view,
            self.params.degenerate_policy,
            self.params.parallel,
        )?;

        let mut updated = cluster_data.clone();
        for (cluster, stats) in updated.clusters.iter_mut().zip(&statistics) {
            match stats {
                Some(stats) => {
                    cluster.mean = stats.mean.clone();
                    cluster.stddev = stats.stddev.clone();
                }
                None => {
                    cluster.mean = vec![0.0; num_dimensions];
                    cluster.stddev = vec![0.0; num_dimensions];
                }
            }
        }

        let output_name = format!("{}{}", source.name, self.params.output_suffix);
        let dimension_names = source_points.dimension_names();
        let output_dataset = if choice.broadcast_to_parent {
            let direct_parent = self
                .registry
                .parent(input)?
                .filter(|parent| parent.is_points())
                .ok_or(TransformError::MissingDirectParent { id: input })?;
            let assembled = assemble_per_parent_point(
                &updated.clusters,
                num_dimensions,
                &direct_parent,
                source.id,
            )?;
            debug!(rows = assembled.num_rows, "assembled broadcast output");
            let data = output_data(assembled.values, num_dimensions, dimension_names)?;
            Dataset::points(output_name, data)
                .with_parent(direct_parent.id)
                .as_derived()
        } else {
            let assembled = assemble_per_cluster(&updated.clusters, num_dimensions)?;
            debug!(rows = assembled.num_rows, "assembled per-cluster output");
            let data = output_data(assembled.values, num_dimensions, dimension_names)?;
            let mut dataset = Dataset::points(output_name, data).with_parent(source.id);
            if let Some(map) = assembled.selection_map {
                dataset = dataset.with_linked_data(LinkedData::new(source.id, map));
            }
            dataset
        };

        // Publish last, all-or-nothing: statistics write-back, then the
        // single insert, then the notification.
        self.registry.update_clusters(input, updated)?;
        let output_id = self.registry.insert(output_dataset)?;
        self.registry.notify_data_changed(output_id);
        Ok(output_id)
    }
}

/// Wrap an assembled buffer as point data, copying the source's dimension
/// names verbatim.
fn output_data(
    values: Vec<f32>,
    num_dimensions: usize,
    dimension_names: &[String],
) -> CoreResult<PointData> {
    let data = PointData::from_f32(values, num_dimensions)?;
    if dimension_names.is_empty() {
        Ok(data)
    } else {
        data.with_dimension_names(dimension_names.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{DataEvent, FixedSelector, InMemoryRegistry};
    use crate::transform::params::DegenerateClusterPolicy;
    use crate::types::{Cluster, ClusterData, SelectionMap};

    /// 4 points, 2 dimensions: [[1,10],[2,20],[3,30],[4,40]], named x/y.
    fn base_points() -> PointData {
        PointData::from_f32(vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0], 2)
            .expect("valid buffer")
            .with_dimension_names(vec!["x".into(), "y".into()])
            .expect("two names")
    }

    fn two_clusters() -> ClusterData {
        ClusterData::new(vec![Cluster::new(vec![0, 2]), Cluster::new(vec![1, 3])])
    }

    struct Fixture {
        registry: Arc<InMemoryRegistry>,
        source: Uuid,
        input: Uuid,
    }

    fn fixture(clusters: ClusterData) -> Fixture {
        let registry = Arc::new(InMemoryRegistry::new());
        let source = registry
            .insert(Dataset::points("base", base_points()))
            .unwrap();
        let input = registry
            .insert(Dataset::clusters("groups", clusters).with_parent(source))
            .unwrap();
        Fixture {
            registry,
            source,
            input,
        }
    }

    fn transform(fx: &Fixture, selector: FixedSelector) -> ClusterMeansTransform {
        ClusterMeansTransform::new(fx.registry.clone(), Arc::new(selector))
    }

    #[test]
    fn aggregate_mode_end_to_end() {
        let fx = fixture(two_clusters());
        println!("=== TEST: aggregate_mode_end_to_end ===");
        println!("STATE BEFORE: 2 clusters {{0,2}} and {{1,3}} over 4 points, 2 dims");

        let output_id = transform(&fx, FixedSelector::pick(0)).run(fx.input).unwrap();

        let output = fx.registry.get(output_id).unwrap();
        let points = output.as_points().unwrap();
        println!(
            "STATE AFTER: output '{}' with {} rows",
            output.name,
            points.num_points()
        );

        assert_eq!(output.name, "base Cluster Means");
        assert_eq!(output.parent, Some(fx.source));
        assert!(!output.derived);
        assert_eq!(points.num_points(), 2);
        assert_eq!(points.num_dimensions(), 2);
        assert_eq!(points.dimension_names(), ["x", "y"]);

        let view = points.view();
        let mut row = [0.0f32; 2];
        view.copy_row(0, &mut row);
        assert_eq!(row, [2.0, 20.0]);
        view.copy_row(1, &mut row);
        assert_eq!(row, [3.0, 30.0]);

        // Round trip: output row -> original member indices.
        let linked = &output.linked[0];
        assert_eq!(linked.target, fx.source);
        assert_eq!(linked.mapping.get(0), Some(&[0u32, 2u32][..]));
        assert_eq!(linked.mapping.get(1), Some(&[1u32, 3u32][..]));

        // Statistics were written back to the cluster dataset.
        let input = fx.registry.get(fx.input).unwrap();
        let clusters = input.as_clusters().unwrap();
        assert_eq!(clusters.clusters[0].mean, [2.0, 20.0]);
        assert_eq!(clusters.clusters[0].stddev, [1.0, 10.0]);
        assert_eq!(clusters.clusters[1].mean, [3.0, 30.0]);
        assert_eq!(clusters.clusters[1].stddev, [1.0, 10.0]);

        // The publish notification fired for the output dataset.
        assert!(fx
            .registry
            .events()
            .contains(&DataEvent::DataChanged(output_id)));
        println!("[PASS] aggregate mode produced means, mapping, and notification");
    }

    #[test]
    fn duplicate_indices_abort_without_output() {
        let fx = fixture(ClusterData::new(vec![
            Cluster::new(vec![0, 1]),
            Cluster::new(vec![1, 2]),
        ]));
        let before = fx.registry.len();

        let result = transform(&fx, FixedSelector::pick(0)).run(fx.input);

        assert!(matches!(
            result,
            Err(CoreError::Transform(TransformError::DuplicateIndex { index: 1 }))
        ));
        assert_eq!(fx.registry.len(), before, "no dataset may be created");
        let input = fx.registry.get(fx.input).unwrap();
        assert!(!input.as_clusters().unwrap().clusters[0].has_statistics());
    }

    #[test]
    fn cancellation_leaves_registry_unchanged() {
        let fx = fixture(two_clusters());
        let before = fx.registry.len();

        let result = transform(&fx, FixedSelector::cancel()).run(fx.input);

        assert!(matches!(result, Err(CoreError::SelectionCancelled)));
        assert_eq!(fx.registry.len(), before);
    }

    #[test]
    fn empty_candidate_list_reads_as_cancellation() {
        let registry = Arc::new(InMemoryRegistry::new());
        // A parentless cluster dataset has no ancestors and no candidates.
        let input = registry
            .insert(Dataset::clusters("orphan", two_clusters()))
            .unwrap();
        let transform =
            ClusterMeansTransform::new(registry.clone(), Arc::new(FixedSelector::pick(0)));

        let result = transform.run(input);
        assert!(matches!(result, Err(CoreError::SelectionCancelled)));
    }

    #[test]
    fn rogue_selection_is_rejected() {
        struct RogueSelector;
        impl SourceSelector for RogueSelector {
            fn choose(&self, _candidates: &[Arc<Dataset>]) -> Option<crate::traits::SourceChoice> {
                Some(crate::traits::SourceChoice {
                    dataset: Uuid::new_v4(),
                    broadcast_to_parent: false,
                })
            }
        }

        let fx = fixture(two_clusters());
        let transform =
            ClusterMeansTransform::new(fx.registry.clone(), Arc::new(RogueSelector));

        let result = transform.run(fx.input);
        assert!(matches!(result, Err(CoreError::InvalidSelection(_))));
        assert_eq!(fx.registry.len(), 2);
    }

    #[test]
    fn point_dataset_input_is_rejected() {
        let fx = fixture(two_clusters());
        let result = transform(&fx, FixedSelector::pick(0)).run(fx.source);
        assert!(matches!(result, Err(CoreError::WrongDatasetKind { .. })));
    }

    #[test]
    fn out_of_bounds_index_fails_before_any_mutation() {
        // Four distinct indices make the 4-point source look exactly
        // partitioned to the resolver, but index 9 does not exist in it.
        let fx = fixture(ClusterData::new(vec![
            Cluster::new(vec![0, 2]),
            Cluster::new(vec![1, 9]),
        ]));
        let before = fx.registry.len();

        let result = transform(&fx, FixedSelector::pick(0)).run(fx.input);

        assert!(matches!(
            result,
            Err(CoreError::Transform(TransformError::IndexOutOfBounds { .. }))
        ));
        assert_eq!(fx.registry.len(), before);
        let input = fx.registry.get(fx.input).unwrap();
        assert!(!input.as_clusters().unwrap().clusters[1].has_statistics());
    }

    #[test]
    fn broadcast_onto_direct_parent_without_linked_data() {
        let fx = fixture(two_clusters());
        println!("=== TEST: broadcast_onto_direct_parent_without_linked_data ===");

        // The direct parent of the cluster dataset is the source itself, so
        // member indices are already parent rows.
        let output_id = transform(&fx, FixedSelector::pick_broadcast(0))
            .run(fx.input)
            .unwrap();

        let output = fx.registry.get(output_id).unwrap();
        let points = output.as_points().unwrap();
        println!("STATE AFTER: {} rows, derived={}", points.num_points(), output.derived);

        assert_eq!(points.num_points(), 4);
        assert!(output.derived);
        assert_eq!(output.parent, Some(fx.source));
        assert!(output.linked.is_empty(), "broadcast builds no new mapping");

        let view = points.view();
        let mut row = [0.0f32; 2];
        // Rows 0 and 2 carry cluster A's mean, rows 1 and 3 cluster B's.
        for index in [0usize, 2] {
            view.copy_row(index, &mut row);
            assert_eq!(row, [2.0, 20.0]);
        }
        for index in [1usize, 3] {
            view.copy_row(index, &mut row);
            assert_eq!(row, [3.0, 30.0]);
        }
        println!("[PASS] broadcast filled every member row with its cluster mean");
    }

    #[test]
    fn broadcast_translates_through_parent_linked_data() {
        let registry = Arc::new(InMemoryRegistry::new());
        let source = registry
            .insert(Dataset::points("base", base_points()))
            .unwrap();

        // Direct parent with 3 points whose linked entry maps source
        // indices {0, 1, 3} to local rows {0, 1, 2} in key order.
        let mut mapping = SelectionMap::new();
        mapping.insert(0, vec![0]);
        mapping.insert(1, vec![1]);
        mapping.insert(3, vec![2]);
        let parent_data = PointData::from_f32(vec![0.0; 6], 2).unwrap();
        let parent = registry
            .insert(
                Dataset::points("projection", parent_data)
                    .with_parent(source)
                    .with_linked_data(LinkedData::new(source, mapping)),
            )
            .unwrap();

        let input = registry
            .insert(Dataset::clusters("groups", two_clusters()).with_parent(parent))
            .unwrap();

        // Candidates: projection (3 >= max index 3), then base. Pick base.
        let transform = ClusterMeansTransform::new(
            registry.clone(),
            Arc::new(FixedSelector::pick_broadcast(1)),
        );
        let output_id = transform.run(input).unwrap();

        let output = registry.get(output_id).unwrap();
        assert_eq!(output.parent, Some(parent));
        let points = output.as_points().unwrap();
        assert_eq!(points.num_points(), 3);

        let view = points.view();
        let mut row = [0.0f32; 2];
        // Source index 0 -> row 0 (cluster A), 1 -> row 1 (cluster B),
        // 3 -> row 2 (cluster B); source index 2 has no local row.
        view.copy_row(0, &mut row);
        assert_eq!(row, [2.0, 20.0]);
        view.copy_row(1, &mut row);
        assert_eq!(row, [3.0, 30.0]);
        view.copy_row(2, &mut row);
        assert_eq!(row, [3.0, 30.0]);
    }

    #[test]
    fn degenerate_cluster_skipped_with_zero_row() {
        let fx = fixture(ClusterData::new(vec![
            Cluster::new(vec![0, 2]),
            Cluster::new(vec![]),
        ]));

        let output_id = transform(&fx, FixedSelector::pick(0)).run(fx.input).unwrap();

        let output = fx.registry.get(output_id).unwrap();
        let points = output.as_points().unwrap();
        assert_eq!(points.num_points(), 2);

        let view = points.view();
        let mut row = [0.0f32; 2];
        view.copy_row(1, &mut row);
        assert_eq!(row, [0.0, 0.0], "skipped cluster's row stays zero");

        let map = &output.linked[0].mapping;
        assert_eq!(map.get(1), Some(&[] as &[u32]));

        let input = fx.registry.get(fx.input).unwrap();
        let clusters = input.as_clusters().unwrap();
        assert_eq!(clusters.clusters[1].mean, [0.0, 0.0]);
        assert_eq!(clusters.clusters[1].stddev, [0.0, 0.0]);
    }

    #[test]
    fn degenerate_cluster_aborts_under_abort_policy() {
        let fx = fixture(ClusterData::new(vec![
            Cluster::new(vec![0, 2]),
            Cluster::new(vec![]),
        ]));
        let before = fx.registry.len();

        let transform = transform(&fx, FixedSelector::pick(0)).with_params(
            TransformParams::default().with_degenerate_policy(DegenerateClusterPolicy::Abort),
        );

        let result = transform.run(fx.input);
        assert!(matches!(
            result,
            Err(CoreError::Transform(TransformError::EmptyCluster))
        ));
        assert_eq!(fx.registry.len(), before);
    }

    #[test]
    fn invalid_params_fail_before_touching_the_registry() {
        let fx = fixture(two_clusters());
        let transform = transform(&fx, FixedSelector::pick(0))
            .with_params(TransformParams::default().with_output_suffix(""));

        let result = transform.run(fx.input);
        assert!(matches!(
            result,
            Err(CoreError::Transform(TransformError::InvalidParameter(_)))
        ));
        assert_eq!(fx.registry.len(), 2);
    }
}
