//! Role-based views over seminar lists

use crate::schemas::{Seminar, SeminarType};

/// Seminars split by the viewer's role on them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Seminars the viewer advises
    pub advised: Vec<Seminar>,

    /// Seminars the viewer assesses
    pub assessed: Vec<Seminar>,
}

impl Partition {
    /// Number of seminars present in both views
    pub fn overlap_len(&self) -> usize {
        self.advised
            .iter()
            .filter(|a| self.assessed.iter().any(|b| b == *a))
            .count()
    }

    /// Number of distinct seminars across both views
    pub fn union_len(&self) -> usize {
        self.advised.len() + self.assessed.len() - self.overlap_len()
    }

    /// Apply a filter to both views
    pub fn filter(&self, filter: &SeminarFilter) -> Partition {
        Partition {
            advised: filter.apply(&self.advised),
            assessed: filter.apply(&self.assessed),
        }
    }
}

/// Split seminars into the viewer's advised and assessed views.
///
/// Order follows the input and a seminar may land in both views.
pub fn partition(seminars: &[Seminar], viewer_nip: &str) -> Partition {
    Partition {
        advised: seminars
            .iter()
            .filter(|s| s.is_advisor(viewer_nip))
            .cloned()
            .collect(),
        assessed: seminars
            .iter()
            .filter(|s| s.is_assessor(viewer_nip))
            .cloned()
            .collect(),
    }
}

/// Free-text and type filter applied after partitioning
#[derive(Debug, Clone, Default)]
pub struct SeminarFilter {
    /// Case-insensitive substring of the title or student NIM
    pub search: Option<String>,

    /// Restrict to one seminar type
    pub seminar_type: Option<SeminarType>,
}

impl SeminarFilter {
    pub fn matches(&self, seminar: &Seminar) -> bool {
        if let Some(seminar_type) = self.seminar_type {
            if seminar.seminar_type != seminar_type {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                seminar.title.to_lowercase().contains(&needle)
                    || seminar.student.nim.to_lowercase().contains(&needle)
            }
        }
    }

    pub fn apply(&self, seminars: &[Seminar]) -> Vec<Seminar> {
        seminars.iter().filter(|s| self.matches(s)).cloned().collect()
    }
}
