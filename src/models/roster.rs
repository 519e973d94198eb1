//! Roster model.
//!
//! This module defines the [`Roster`], an ordered collection of clinician
//! entries, and the versioned [`RosterSnapshot`] used to export and import it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::ClinicianEntry;

/// The snapshot format version written by [`Roster::to_snapshot`].
pub const ROSTER_SNAPSHOT_VERSION: u32 = 1;

/// An ordered collection of clinician entries.
///
/// Entries are only ever appended or removed from the end; an entry has no
/// identity beyond its position, and duplicates are independent.
///
/// # Example
///
/// ```
/// use coverage_engine::models::{AccountingBasis, ClinicianEntry, ClinicianType, Roster};
///
/// let mut roster = Roster::new();
/// roster.add(ClinicianEntry {
///     clinician_type: ClinicianType::Madigan,
///     day_shifts: 10,
///     night_shifts: 12,
///     basis: AccountingBasis::RotationBased { rotations: 1 },
/// });
/// assert_eq!(roster.len(), 1);
///
/// let removed = roster.remove_last().unwrap();
/// assert_eq!(removed.clinician_type, ClinicianType::Madigan);
/// assert!(roster.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<ClinicianEntry>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the end of the roster.
    pub fn add(&mut self, entry: ClinicianEntry) {
        self.entries.push(entry);
    }

    /// Removes and returns the most recently added entry.
    ///
    /// Returns [`EngineError::EmptyRoster`] when there is nothing to remove;
    /// the roster is left unchanged in that case.
    pub fn remove_last(&mut self) -> EngineResult<ClinicianEntry> {
        self.entries.pop().ok_or(EngineError::EmptyRoster)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entries in insertion order.
    pub fn all(&self) -> &[ClinicianEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the roster has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Captures the roster as a versioned snapshot.
    pub fn to_snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            version: ROSTER_SNAPSHOT_VERSION,
            exported_at: Utc::now(),
            entries: self.entries.clone(),
        }
    }

    /// Rebuilds a roster from a snapshot.
    ///
    /// Rejects unknown versions, and rejects the whole snapshot if any entry
    /// is inconsistent with its clinician type (see
    /// [`ClinicianEntry::validate`]).
    pub fn from_snapshot(snapshot: RosterSnapshot) -> EngineResult<Self> {
        if snapshot.version != ROSTER_SNAPSHOT_VERSION {
            return Err(EngineError::UnsupportedSnapshotVersion {
                found: snapshot.version,
                expected: ROSTER_SNAPSHOT_VERSION,
            });
        }

        for (index, entry) in snapshot.entries.iter().enumerate() {
            entry.validate(&format!("entries[{}]", index))?;
        }

        Ok(Self {
            entries: snapshot.entries,
        })
    }
}

/// A serialized roster with a format version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    /// Format version of the snapshot.
    pub version: u32,
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,
    /// The roster entries in insertion order.
    pub entries: Vec<ClinicianEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountingBasis, ClinicianType};

    fn madigan(rotations: u32) -> ClinicianEntry {
        ClinicianEntry {
            clinician_type: ClinicianType::Madigan,
            day_shifts: 10 * rotations,
            night_shifts: 12 * rotations,
            basis: AccountingBasis::RotationBased { rotations },
        }
    }

    fn fellow(nights: u32) -> ClinicianEntry {
        ClinicianEntry {
            clinician_type: ClinicianType::Year1Fellow,
            day_shifts: 0,
            night_shifts: nights,
            basis: AccountingBasis::Direct,
        }
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut roster = Roster::new();
        roster.add(madigan(1));
        roster.add(fellow(40));
        roster.add(madigan(3));

        let types: Vec<_> = roster.all().iter().map(|e| e.clinician_type).collect();
        assert_eq!(
            types,
            vec![
                ClinicianType::Madigan,
                ClinicianType::Year1Fellow,
                ClinicianType::Madigan
            ]
        );
    }

    #[test]
    fn test_remove_last_returns_most_recent() {
        let mut roster = Roster::new();
        roster.add(madigan(1));
        roster.add(fellow(40));

        let removed = roster.remove_last().unwrap();
        assert_eq!(removed, fellow(40));
        assert_eq!(roster.all(), &[madigan(1)]);
    }

    #[test]
    fn test_remove_last_on_empty_roster() {
        let mut roster = Roster::new();

        let result = roster.remove_last();
        assert!(matches!(result, Err(EngineError::EmptyRoster)));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_duplicates_are_independent() {
        let mut roster = Roster::new();
        roster.add(madigan(2));
        roster.add(madigan(2));

        roster.remove_last().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.all()[0], madigan(2));
    }

    #[test]
    fn test_clear_empties_roster() {
        let mut roster = Roster::new();
        roster.add(madigan(1));
        roster.add(fellow(10));

        roster.clear();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip_through_json() {
        let mut roster = Roster::new();
        roster.add(madigan(2));
        roster.add(fellow(52));

        let json = serde_json::to_string(&roster.to_snapshot()).unwrap();
        let snapshot: RosterSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.version, ROSTER_SNAPSHOT_VERSION);

        let restored = Roster::from_snapshot(snapshot).unwrap();
        assert_eq!(restored, roster);
    }

    #[test]
    fn test_snapshot_with_unknown_version_is_rejected() {
        let mut snapshot = Roster::new().to_snapshot();
        snapshot.version = 2;

        match Roster::from_snapshot(snapshot) {
            Err(EngineError::UnsupportedSnapshotVersion { found, expected }) => {
                assert_eq!(found, 2);
                assert_eq!(expected, ROSTER_SNAPSHOT_VERSION);
            }
            other => panic!("Expected UnsupportedSnapshotVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_with_inconsistent_entry_is_rejected() {
        let mut snapshot = Roster::new().to_snapshot();
        snapshot.entries = vec![
            madigan(1),
            ClinicianEntry {
                clinician_type: ClinicianType::Madigan,
                day_shifts: 1,
                night_shifts: 0,
                basis: AccountingBasis::Direct,
            },
        ];

        match Roster::from_snapshot(snapshot) {
            Err(EngineError::InvalidParameter { field, .. }) => assert_eq!(field, "entries[1]"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }
}
