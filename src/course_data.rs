use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use eyre::WrapErr;
use serde::{Deserialize, Serialize};

use crate::lr2ir::models::ChartReference;

/// Course data document: one entry per weekly round, carrying the chart's
/// reference scores for BPI. Mirrors the community's CourseData sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDataRoot {
    pub courses: Vec<CourseEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseEntry {
    pub round: u32,
    pub title: String,
    #[serde(default)]
    pub diff: Option<String>,
    pub course_id: u32,
    pub bmsid: String,
    #[serde(flatten)]
    pub reference: ChartReference,
}

/// In-memory index over the course data, keyed by courseid and by bmsid.
/// Loaded once per invocation; duplicate keys keep the first entry.
#[derive(Debug, Clone)]
pub struct CourseDataIndex {
    courses: Vec<CourseEntry>,
    by_course_id: HashMap<u32, usize>,
    by_bmsid: HashMap<String, usize>,
}

impl CourseDataIndex {
    pub fn load_from_path(path: &Path) -> eyre::Result<Self> {
        let file =
            File::open(path).wrap_err_with(|| format!("open course data: {}", path.display()))?;
        let reader = BufReader::new(file);
        let root: CourseDataRoot = serde_json::from_reader(reader)
            .wrap_err_with(|| format!("parse course data: {}", path.display()))?;
        Ok(Self::from_root(root))
    }

    pub fn from_root(root: CourseDataRoot) -> Self {
        let mut by_course_id = HashMap::new();
        let mut by_bmsid = HashMap::new();

        for (idx, course) in root.courses.iter().enumerate() {
            by_course_id.entry(course.course_id).or_insert(idx);
            by_bmsid.entry(course.bmsid.clone()).or_insert(idx);
        }

        Self {
            courses: root.courses,
            by_course_id,
            by_bmsid,
        }
    }

    pub fn by_course_id(&self, course_id: u32) -> Option<&CourseEntry> {
        self.by_course_id
            .get(&course_id)
            .map(|&idx| &self.courses[idx])
    }

    pub fn by_bmsid(&self, bmsid: &str) -> Option<&CourseEntry> {
        self.by_bmsid.get(bmsid).map(|&idx| &self.courses[idx])
    }

    pub fn courses(&self) -> &[CourseEntry] {
        &self.courses
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
