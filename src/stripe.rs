//! Fan-out of scoring work across call-scoped worker threads.
//!
//! Candidates are dealt out by interleaved striding: worker `k` of `T`
//! scores buffer slots `k, k+T, k+2T, …`. Every slot is written by exactly
//! one worker, so no synchronization beyond the final join is needed, and
//! the resulting buffer is identical for any worker count.

use std::thread;

use crate::{
    error::{Error, Result},
    rank::ScoredMatch,
    score::{self, Query},
};

/// Below this many candidates a single worker always wins; thread spawn
/// and join overhead would dominate the scan.
pub const SINGLE_WORKER_CUTOFF: usize = 1000;

/// Resolve the worker count actually used for a candidate set.
pub fn effective_workers(candidates: usize, requested: usize) -> usize {
    if candidates < SINGLE_WORKER_CUTOFF {
        1
    } else {
        requested.max(1)
    }
}

/// Score every candidate, returning a buffer index-aligned with `paths`.
///
/// `effective − 1` workers run on freshly spawned threads; the last stripe
/// runs inline on the calling thread. All workers are joined before the
/// buffer is returned, and a spawn failure or worker panic fails the whole
/// call.
pub fn score_all<'a>(
    paths: &'a [String],
    query: &Query,
    requested_workers: usize,
) -> Result<Vec<ScoredMatch<'a>>> {
    let workers = effective_workers(paths.len(), requested_workers);

    let mut buffer = Vec::new();
    buffer.try_reserve_exact(paths.len())?;
    buffer.extend(paths.iter().map(|path| ScoredMatch {
        path: path.as_str(),
        score: 0.0,
    }));

    if workers == 1 {
        score_stripe(buffer.iter_mut().collect(), query);
        return Ok(buffer);
    }

    // Deal buffer slots out into interleaved stripes. The last stripe is
    // kept for the calling thread.
    let stripe_capacity = buffer.len() / workers + 1;
    let mut spawned: Vec<Vec<&mut ScoredMatch<'a>>> = (0..workers - 1)
        .map(|_| Vec::with_capacity(stripe_capacity))
        .collect();
    let mut inline: Vec<&mut ScoredMatch<'a>> = Vec::with_capacity(stripe_capacity);
    for (i, slot) in buffer.iter_mut().enumerate() {
        let k = i % workers;
        if k == workers - 1 {
            inline.push(slot);
        } else {
            spawned[k].push(slot);
        }
    }

    thread::scope(|scope| -> Result<()> {
        let mut handles = Vec::with_capacity(spawned.len());
        for stripe in spawned {
            let handle = thread::Builder::new()
                .name("pathpick-score".into())
                .spawn_scoped(scope, move || score_stripe(stripe, query))
                .map_err(Error::WorkerSpawn)?;
            handles.push(handle);
        }

        score_stripe(inline, query);

        for handle in handles {
            handle.join().map_err(|_| Error::WorkerPanic)?;
        }
        Ok(())
    })?;

    Ok(buffer)
}

fn score_stripe(stripe: Vec<&mut ScoredMatch<'_>>, query: &Query) {
    // One memo scratch per stripe, reused across its candidates.
    let mut memo = Vec::new();
    for slot in stripe {
        slot.score = score::score_into(slot.path, query, &mut memo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::SearchOptions;

    fn query(abbrev: &str) -> Query {
        Query::new(abbrev, &SearchOptions::default(), false, false)
    }

    fn sample_paths(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("dir{}/sub{}/file{}.txt", i % 7, i % 13, i))
            .collect()
    }

    #[test]
    fn small_inputs_force_a_single_worker() {
        assert_eq!(effective_workers(0, 8), 1);
        assert_eq!(effective_workers(999, 8), 1);
        assert_eq!(effective_workers(1000, 8), 8);
    }

    #[test]
    fn requested_count_has_a_floor_of_one() {
        assert_eq!(effective_workers(5000, 0), 1);
        assert_eq!(effective_workers(5000, 3), 3);
    }

    #[test]
    fn buffer_is_index_aligned_with_input() {
        let paths = sample_paths(50);
        let buffer = score_all(&paths, &query("file"), 4).unwrap();
        assert_eq!(buffer.len(), paths.len());
        for (i, entry) in buffer.iter().enumerate() {
            assert_eq!(entry.path, paths[i]);
        }
    }

    #[test]
    fn scores_are_invariant_across_worker_counts() {
        // Enough candidates to clear the single-worker cutoff.
        let paths = sample_paths(2500);
        let q = query("df1");
        let reference: Vec<f64> = score_all(&paths, &q, 1)
            .unwrap()
            .iter()
            .map(|m| m.score)
            .collect();
        for workers in [2, 3, 4, 7] {
            let scores: Vec<f64> = score_all(&paths, &q, workers)
                .unwrap()
                .iter()
                .map(|m| m.score)
                .collect();
            assert_eq!(scores, reference, "worker count {workers} changed scores");
        }
    }

    #[test]
    fn every_candidate_is_scored_exactly_once() {
        let paths = sample_paths(1200);
        let buffer = score_all(&paths, &query(""), 5).unwrap();
        // Empty query scores every visible candidate 1.0; a missed slot
        // would still carry its 0.0 placeholder.
        assert!(buffer.iter().all(|m| m.score == 1.0));
    }

    #[test]
    fn empty_candidate_set() {
        let buffer = score_all(&[], &query("a"), 4).unwrap();
        assert!(buffer.is_empty());
    }
}
