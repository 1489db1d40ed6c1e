//! Folder path resolution.

use std::fmt;

use crate::sheet::cell::{folder_segment, sanitize_segment};
use crate::sheet::Row;

/// Grade level used when the grade column is blank.
pub const DEFAULT_GRADE_LEVEL: &str = "Other";

/// The three-level folder a row's resources are filed under.
///
/// Every segment is non-empty and free of `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderPath {
    pub grade_level: String,
    pub math_topic: String,
    pub objective: String,
}

impl FolderPath {
    /// Resolve the folder path for a row.
    ///
    /// Blank cells fall back to [`DEFAULT_GRADE_LEVEL`] so no level is ever
    /// empty. Dot-only values (`.`, `..`) cannot name a folder and fall back
    /// the same way.
    pub fn resolve(row: &Row) -> Self {
        let segment = |cell: &str| {
            folder_segment(cell)
                .filter(|s| !is_dots_only(s))
                .unwrap_or_else(|| DEFAULT_GRADE_LEVEL.to_string())
        };

        Self {
            grade_level: segment(&row.grade_level),
            math_topic: segment(&row.math_topic),
            objective: segment(&row.objective),
        }
    }

    /// Segments from outermost to innermost.
    pub fn segments(&self) -> [&str; 3] {
        [&self.grade_level, &self.math_topic, &self.objective]
    }

    /// Display name of the deepest folder.
    pub fn leaf(&self) -> &str {
        &self.objective
    }

    /// Render the path below a channel root, e.g.
    /// `Better World Ed/3-5/Fractions/Add fractions`.
    pub fn render(&self, root: &str) -> String {
        let mut parts = vec![sanitize_segment(root)];
        parts.extend(self.segments().iter().map(|s| s.to_string()));
        parts.join("/")
    }

}

fn is_dots_only(segment: &str) -> bool {
    segment.trim().chars().all(|c| c == '.')
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments().join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(grade: &str, topic: &str, objective: &str) -> Row {
        Row {
            grade_level: grade.into(),
            math_topic: topic.into(),
            objective: objective.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_grade_level_is_other() {
        let path = FolderPath::resolve(&row("", "Fractions", "Halves"));
        assert_eq!(path.grade_level, "Other");

        let path = FolderPath::resolve(&row("  ", "Fractions", "Halves"));
        assert_eq!(path.grade_level, "Other");
    }

    #[test]
    fn test_segments_never_contain_slash() {
        let path = FolderPath::resolve(&row(
            "K/1",
            r#"=HYPERLINK("https://x.test/t","Ratios / Rates")"#,
            "Part/Whole",
        ));
        for segment in path.segments() {
            assert!(!segment.contains('/'));
            assert!(!segment.is_empty());
        }
        assert_eq!(path.math_topic, "Ratios | Rates");
    }

    #[test]
    fn test_render_and_display() {
        let path = FolderPath::resolve(&row("3-5", "Fractions", "Halves"));
        assert_eq!(path.render("Better World Ed"), "Better World Ed/3-5/Fractions/Halves");
        assert_eq!(path.leaf(), "Halves");
        assert_eq!(path.to_string(), "3-5/Fractions/Halves");
    }

    #[test]
    fn test_dot_only_segments_fall_back_to_other() {
        let path = FolderPath::resolve(&row(".", "...", ".."));
        assert_eq!(path.segments(), ["Other", "Other", "Other"]);

        // Dots inside a name are fine
        let path = FolderPath::resolve(&row("3-5", "Decimals", "0.5 vs .50"));
        assert_eq!(path.objective, "0.5 vs .50");
    }
}
