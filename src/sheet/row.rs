//! Positional row decoding.

use std::fmt;

use csv::ByteRecord;

/// Column layout of the overall database export.
pub mod columns {
    pub const GRADE_LEVEL: usize = 0;
    pub const MATH_TOPIC: usize = 1;
    pub const OBJECTIVE: usize = 2;
    pub const WRITTEN_STORY: usize = 3;
    pub const VIDEO: usize = 4;
    pub const LESSON_PLAN: usize = 5;
    pub const TOPIC_TAG: usize = 6;
}

/// The three downloadable resources attached to each objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    WrittenStory,
    Video,
    LessonPlan,
}

impl ResourceKind {
    /// Resource columns in the order they are processed.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::WrittenStory,
        ResourceKind::Video,
        ResourceKind::LessonPlan,
    ];

    /// Zero-indexed CSV column holding this resource.
    pub fn column(&self) -> usize {
        match self {
            ResourceKind::WrittenStory => columns::WRITTEN_STORY,
            ResourceKind::Video => columns::VIDEO,
            ResourceKind::LessonPlan => columns::LESSON_PLAN,
        }
    }

    /// File extension (with dot) the resource is stored under.
    pub fn extension(&self) -> &'static str {
        match self {
            ResourceKind::WrittenStory | ResourceKind::LessonPlan => ".pdf",
            ResourceKind::Video => ".mp4",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::WrittenStory => write!(f, "written story"),
            ResourceKind::Video => write!(f, "video"),
            ResourceKind::LessonPlan => write!(f, "lesson plan"),
        }
    }
}

/// One data row of the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// 1-based line in the source file, for diagnostics.
    pub line: u64,
    pub grade_level: String,
    pub math_topic: String,
    pub objective: String,
    pub written_story: String,
    pub video: String,
    pub lesson_plan: String,
    /// Not used for the folder structure.
    pub topic_tag: String,
}

impl Row {
    /// Decode a raw record. Missing trailing fields read as empty and invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn from_record(record: &ByteRecord) -> Self {
        let field = |idx: usize| {
            record
                .get(idx)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default()
        };

        Self {
            line: record.position().map(|p| p.line()).unwrap_or(0),
            grade_level: field(columns::GRADE_LEVEL),
            math_topic: field(columns::MATH_TOPIC),
            objective: field(columns::OBJECTIVE),
            written_story: field(columns::WRITTEN_STORY),
            video: field(columns::VIDEO),
            lesson_plan: field(columns::LESSON_PLAN),
            topic_tag: field(columns::TOPIC_TAG),
        }
    }

    /// Raw cell text for a resource column.
    pub fn resource(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::WrittenStory => &self.written_story,
            ResourceKind::Video => &self.video,
            ResourceKind::LessonPlan => &self.lesson_plan,
        }
    }
}
