//! Employee clustering by total worked hours.
//!
//! A one-dimensional k-means: k-means++ seeding, Lloyd iterations until the
//! assignment stops changing, and several seeded restarts of which the one
//! with the lowest inertia is kept. Everything is driven by a single
//! [`StdRng`] seeded from the configuration, so the same totals always
//! produce the same assignment.
//!
//! Labels are renumbered by ascending centroid, so cluster 0 is the lowest
//! group *within one dataset*. Nothing ties a label to an hour band across
//! different uploads.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::debug;

use crate::config::ClusteringConfig;
use crate::models::{ClusterSummary, ClusteringResult, EmployeeCluster};

use super::employee_day::EmployeeDay;

/// Total worked hours per employee, ordered by employee id.
///
/// The total is the sum of the employee's non-null day means; an employee
/// whose days are all null totals zero.
pub fn employee_totals(days: &[EmployeeDay]) -> Vec<(String, Decimal)> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for day in days {
        let total = totals.entry(day.employee_id.as_str()).or_default();
        if let Some(hours) = day.mean_hours {
            *total += hours;
        }
    }
    totals
        .into_iter()
        .map(|(employee_id, total)| (employee_id.to_string(), total))
        .collect()
}

/// Outcome of one seeded k-means run.
#[derive(Debug, Clone)]
struct KMeansRun {
    centroids: Vec<f64>,
    labels: Vec<usize>,
    inertia: f64,
}

fn nearest(point: f64, centroids: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = (point - centroid).powi(2);
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best
}

fn seed_centroids(points: &[f64], k: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut centroids = vec![points[rng.gen_range(0..points.len())]];

    while centroids.len() < k {
        let distances: Vec<f64> = points.iter().map(|p| nearest(*p, &centroids).1).collect();
        let total: f64 = distances.iter().sum();

        let next = if total > 0.0 {
            let target = rng.gen_range(0.0..total);
            let mut cumulative = 0.0_f64;
            distances
                .iter()
                .position(|d| {
                    cumulative += d;
                    cumulative > target
                })
                .unwrap_or(points.len() - 1)
        } else {
            rng.gen_range(0..points.len())
        };
        centroids.push(points[next]);
    }

    centroids
}

fn lloyd(points: &[f64], mut centroids: Vec<f64>, max_iterations: usize) -> KMeansRun {
    let mut labels: Vec<usize> = points.iter().map(|p| nearest(*p, &centroids).0).collect();

    for _ in 0..max_iterations {
        let mut sums = vec![0.0_f64; centroids.len()];
        let mut counts = vec![0usize; centroids.len()];
        for (point, label) in points.iter().zip(&labels) {
            sums[*label] += point;
            counts[*label] += 1;
        }
        for (index, centroid) in centroids.iter_mut().enumerate() {
            if counts[index] > 0 {
                *centroid = sums[index] / counts[index] as f64;
            }
        }

        let next: Vec<usize> = points.iter().map(|p| nearest(*p, &centroids).0).collect();
        if next == labels {
            break;
        }
        labels = next;
    }

    let inertia: f64 = points.iter().map(|p| nearest(*p, &centroids).1).sum();
    KMeansRun {
        centroids,
        labels,
        inertia,
    }
}

/// Drops clusters no point was assigned to and renumbers the rest so that
/// centroids ascend with the label. Labels are always `0..clusters`.
fn relabel_by_centroid(run: KMeansRun) -> KMeansRun {
    let mut order: Vec<usize> = (0..run.centroids.len())
        .filter(|index| run.labels.contains(index))
        .collect();
    order.sort_by(|a, b| run.centroids[*a].total_cmp(&run.centroids[*b]));

    let mut new_label = vec![0; run.centroids.len()];
    for (rank, old) in order.iter().enumerate() {
        new_label[*old] = rank;
    }

    KMeansRun {
        centroids: order.iter().map(|old| run.centroids[*old]).collect(),
        labels: run.labels.iter().map(|old| new_label[*old]).collect(),
        inertia: run.inertia,
    }
}

/// Groups employees into `config.clusters` clusters by total worked hours.
///
/// When there are fewer distinct totals than requested clusters, the
/// number of clusters shrinks to the number of distinct totals; a cluster
/// left without employees after the iterations is dropped. Labels are
/// contiguous from 0 either way. No employees yields an empty result.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{EmployeeDay, cluster_employees};
/// use attendance_engine::config::ClusteringConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = |id: &str, hours: i64| EmployeeDay {
///     employee_id: id.to_string(),
///     record_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     mean_hours: Some(Decimal::new(hours, 0)),
/// };
/// let days = vec![day("A", 2), day("B", 3), day("C", 50), day("D", 51), day("E", 200)];
///
/// let result = cluster_employees(&days, &ClusteringConfig::default());
/// let labels: Vec<usize> = result.assignments.iter().map(|a| a.cluster).collect();
/// assert_eq!(labels, vec![0, 0, 1, 1, 2]);
/// ```
pub fn cluster_employees(days: &[EmployeeDay], config: &ClusteringConfig) -> ClusteringResult {
    let totals = employee_totals(days);
    if totals.is_empty() {
        return ClusteringResult::default();
    }

    let distinct: BTreeSet<Decimal> = totals.iter().map(|(_, total)| *total).collect();
    let k = config.clusters.min(distinct.len()).max(1);
    let points: Vec<f64> = totals
        .iter()
        .map(|(_, total)| total.to_f64().unwrap_or(0.0))
        .collect();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut best: Option<KMeansRun> = None;
    for _ in 0..config.n_init.max(1) {
        let centroids = seed_centroids(&points, k, &mut rng);
        let run = lloyd(&points, centroids, config.max_iterations);
        if best.as_ref().is_none_or(|b| run.inertia < b.inertia) {
            best = Some(run);
        }
    }
    let Some(best) = best else {
        return ClusteringResult::default();
    };
    let best = relabel_by_centroid(best);

    debug!(
        employees = points.len(),
        requested = config.clusters,
        seeded = k,
        clusters = best.centroids.len(),
        inertia = best.inertia,
        "Employees clustered"
    );

    let mut sizes = vec![0usize; best.centroids.len()];
    for label in &best.labels {
        sizes[*label] += 1;
    }

    let assignments = totals
        .into_iter()
        .zip(&best.labels)
        .map(|((employee_id, total_hours), label)| EmployeeCluster {
            employee_id,
            total_hours,
            cluster: *label,
        })
        .collect();

    let clusters = sizes
        .iter()
        .enumerate()
        .map(|(cluster, size)| ClusterSummary {
            cluster,
            employees: *size,
            centroid: Decimal::from_f64(best.centroids[cluster])
                .unwrap_or_default()
                .round_dp(2),
        })
        .collect();

    ClusteringResult {
        assignments,
        clusters,
    }
}
