use std::path::Path;

use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    BlueprintError,
    blueprint::{self, Priority, RecommendationResult, Size},
};

/// One resolved cell of the decision tables, as stored in a snapshot line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlueprintCell {
    pub size: Size,
    pub priority: Priority,
    pub result: RecommendationResult,
}

/// A way a snapshot disagrees with the current tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotDifference {
    /// The snapshot has a different answer for this cell
    Changed {
        snapshot: BlueprintCell,
        current: RecommendationResult,
    },
    /// The snapshot does not contain this cell
    Missing { size: Size, priority: Priority },
    /// The snapshot lists this cell more than once
    Duplicate {
        size: Size,
        priority: Priority,
        copies: usize,
    },
}

impl std::fmt::Display for SnapshotDifference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotDifference::Changed { snapshot, current } => {
                let track = snapshot.priority.track();
                write!(
                    f,
                    "{track} / {} / {}: snapshot {:?} but tables give {:?}",
                    snapshot.size, snapshot.priority, snapshot.result, current
                )
            }
            SnapshotDifference::Missing { size, priority } => {
                write!(f, "{} / {size} / {priority}: missing from snapshot", priority.track())
            }
            SnapshotDifference::Duplicate {
                size,
                priority,
                copies,
            } => write!(
                f,
                "{} / {size} / {priority}: listed {copies} times in snapshot",
                priority.track()
            ),
        }
    }
}

/// Every cell of the current tables.
pub fn current_cells() -> Vec<BlueprintCell> {
    blueprint::domain()
        .map(|selection| BlueprintCell {
            size: selection.size(),
            priority: selection.priority(),
            result: blueprint::resolve(&selection),
        })
        .collect()
}

/// Write every cell of the current tables as JSON lines. Returns the number
/// of cells written.
pub fn write_snapshot(file: &Path) -> Result<usize, BlueprintError> {
    let cells = current_cells();
    let count = cells.len();
    serde_jsonlines::write_json_lines(file, cells)
        .map_err(|e| BlueprintError::WriterError { source: e })?;
    info!("Wrote {} blueprint cells to {:?}", count, file);
    Ok(count)
}

pub fn load_snapshot(file: &Path) -> Result<Vec<BlueprintCell>, BlueprintError> {
    serde_jsonlines::json_lines(file)
        .map_err(|e| BlueprintError::SnapshotLoaderError { source: e })?
        .collect::<Result<Vec<BlueprintCell>, std::io::Error>>()
        .map_err(|e| BlueprintError::SnapshotLoaderError { source: e })
}

/// Compare a snapshot against the current tables.
pub fn verify_snapshot(file: &Path) -> Result<Vec<SnapshotDifference>, BlueprintError> {
    let snapshot = load_snapshot(file)?;
    debug!("Loaded {} cells from {:?}", snapshot.len(), file);
    Ok(diff_cells(snapshot))
}

/// Every copy of a cell is checked, so a duplicate line cannot hide a
/// changed one.
pub fn diff_cells(snapshot: Vec<BlueprintCell>) -> Vec<SnapshotDifference> {
    let mut by_cell = snapshot
        .into_iter()
        .map(|cell| ((cell.size, cell.priority), cell))
        .into_group_map();

    let mut differences = Vec::new();
    for current in current_cells() {
        let Some(copies) = by_cell.remove(&(current.size, current.priority)) else {
            differences.push(SnapshotDifference::Missing {
                size: current.size,
                priority: current.priority,
            });
            continue;
        };
        if copies.len() > 1 {
            differences.push(SnapshotDifference::Duplicate {
                size: current.size,
                priority: current.priority,
                copies: copies.len(),
            });
        }
        for snapshot in copies {
            if snapshot.result != current.result {
                differences.push(SnapshotDifference::Changed {
                    snapshot,
                    current: current.result.clone(),
                });
            }
        }
    }
    differences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{SecurityPriority, Track};
    use tempfile::TempDir;

    #[test]
    fn test_current_cells_cover_domain() {
        let cells = current_cells();
        assert_eq!(cells.len(), Track::ALL.len() * Size::ALL.len() * 4);
    }

    #[test]
    fn test_write_then_verify_is_clean() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blueprint.jsonl");

        let written = write_snapshot(&path).unwrap();
        assert_eq!(written, current_cells().len());
        assert!(verify_snapshot(&path).unwrap().is_empty());
    }

    #[test]
    fn test_tampered_cell_is_reported() {
        let mut cells = current_cells();
        let target = cells
            .iter_mut()
            .find(|c| {
                c.size == Size::Medium && c.priority == Priority::Security(SecurityPriority::Night)
            })
            .unwrap();
        target.result.primary.value = "5-9".to_string();

        let differences = diff_cells(cells);
        assert_eq!(differences.len(), 1);
        match &differences[0] {
            SnapshotDifference::Changed { snapshot, current } => {
                assert_eq!(snapshot.result.primary.value, "5-9");
                assert_eq!(current.primary.value, "4-8");
            }
            other => panic!("unexpected difference {other:?}"),
        }
    }

    #[test]
    fn test_missing_cell_is_reported() {
        let mut cells = current_cells();
        let dropped = cells.pop().unwrap();

        let differences = diff_cells(cells);
        assert_eq!(
            differences,
            vec![SnapshotDifference::Missing {
                size: dropped.size,
                priority: dropped.priority,
            }]
        );
    }

    #[test]
    fn test_duplicate_cell_cannot_hide_tampering() {
        let mut cells = current_cells();
        let original = cells[0].clone();
        cells[0].result.primary.value = "99".to_string();
        cells.push(original.clone());

        let differences = diff_cells(cells);
        assert_eq!(differences.len(), 2);
        assert_eq!(
            differences[0],
            SnapshotDifference::Duplicate {
                size: original.size,
                priority: original.priority,
                copies: 2,
            }
        );
        assert!(matches!(
            &differences[1],
            SnapshotDifference::Changed { snapshot, .. } if snapshot.result.primary.value == "99"
        ));
    }

    #[test]
    fn test_exact_duplicate_is_reported() {
        let mut cells = current_cells();
        cells.push(cells[5].clone());

        let differences = diff_cells(cells);
        assert_eq!(differences.len(), 1);
        assert!(differences[0].to_string().contains("listed 2 times"));
    }

    #[test]
    fn test_missing_file_is_loader_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            verify_snapshot(&temp_dir.path().join("absent.jsonl")),
            Err(BlueprintError::SnapshotLoaderError { .. })
        ));
    }
}
