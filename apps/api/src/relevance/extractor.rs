//! Skill Extractor: turns raw JD text into a normalized `SkillSet`.
//!
//! Line-oriented, single pass. The capture policy is an explicit `ExtractionMode`:
//! - `Global`: every non-empty line is a candidate skill line.
//! - `Scoped`: only lines inside a "Skills" / "Requirements" / "Qualifications" block.
//! - `ScopedThenGlobal`: scoped first, global if scoped finds nothing (default).
//!
//! Never fails. Text with no recognizable skills yields an empty set.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::relevance::skills::{normalize_skill, SkillSet};

/// Headers that open a capture block (whole-label match, case-insensitive).
const SECTION_KEYWORDS: &[&str] = &["skills", "requirements", "qualifications"];

const MIN_ITEM_CHARS: usize = 2;
const MAX_ITEM_CHARS: usize = 60;
const MAX_ITEM_WORDS: usize = 6;

/// Item delimiters: comma, semicolon, pipe, or the whole word "and".
static ITEM_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),|;|\||\band\b").expect("valid delimiter regex"));

/// Numbered-list markers such as "1." or "2)" followed by whitespace.
static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}[.)]\s+").expect("valid numbered marker regex"));

/// Which lines of a JD are considered candidate skill lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    Global,
    Scoped,
    #[default]
    ScopedThenGlobal,
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "scoped" => Ok(Self::Scoped),
            "scoped_then_global" => Ok(Self::ScopedThenGlobal),
            other => Err(format!(
                "unknown extraction mode '{other}' (expected global, scoped, or scoped_then_global)"
            )),
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Global => "global",
            Self::Scoped => "scoped",
            Self::ScopedThenGlobal => "scoped_then_global",
        };
        f.write_str(label)
    }
}

/// Stateless extractor carrying its configured mode. Cheap to copy into handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillExtractor {
    pub mode: ExtractionMode,
}

impl SkillExtractor {
    pub fn new(mode: ExtractionMode) -> Self {
        Self { mode }
    }

    pub fn extract(&self, jd_text: &str) -> SkillSet {
        extract(jd_text, self.mode)
    }
}

/// Extracts required skills from a JD using the given mode.
pub fn extract(jd_text: &str, mode: ExtractionMode) -> SkillSet {
    match mode {
        ExtractionMode::Global => extract_global(jd_text),
        ExtractionMode::Scoped => extract_scoped(jd_text),
        ExtractionMode::ScopedThenGlobal => {
            let scoped = extract_scoped(jd_text);
            if scoped.is_empty() {
                extract_global(jd_text)
            } else {
                scoped
            }
        }
    }
}

fn extract_global(jd_text: &str) -> SkillSet {
    let mut skills = SkillSet::new();
    for line in jd_text.lines() {
        let line = strip_bullet(line.trim());
        if line.is_empty() {
            continue;
        }
        let (_, body) = split_label(line);
        collect_items(body, &mut skills);
    }
    skills
}

fn extract_scoped(jd_text: &str) -> SkillSet {
    let mut skills = SkillSet::new();
    let mut capturing = false;

    for line in jd_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            capturing = false;
            continue;
        }

        let line = strip_bullet(line);
        let (label, body) = split_label(line);

        if is_section_header(label.unwrap_or(line)) {
            capturing = true;
            if label.is_some() && !body.is_empty() {
                collect_items(body, &mut skills);
            }
            continue;
        }

        if capturing {
            collect_items(body, &mut skills);
        }
    }
    skills
}

/// Removes one leading bullet marker (`-`, `*`, `•`, or a numbered marker).
fn strip_bullet(line: &str) -> &str {
    if let Some(rest) = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('*'))
        .or_else(|| line.strip_prefix('•'))
    {
        return rest.trim_start();
    }
    match NUMBERED_MARKER.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Splits "Label: body" at the first colon. Lines without a colon have no label.
fn split_label(line: &str) -> (Option<&str>, &str) {
    match line.split_once(':') {
        Some((label, body)) => (Some(label.trim()), body.trim()),
        None => (None, line),
    }
}

fn is_section_header(header: &str) -> bool {
    let header = header.trim().to_lowercase();
    SECTION_KEYWORDS.contains(&header.as_str()) || header.starts_with("skills")
}

/// Splits a candidate line into items, filters noise, and inserts normalized tokens.
fn collect_items(line: &str, skills: &mut SkillSet) {
    for item in ITEM_DELIMITER.split(line) {
        let item = item.trim();
        let chars = item.chars().count();
        if !(MIN_ITEM_CHARS..=MAX_ITEM_CHARS).contains(&chars) {
            continue;
        }
        if item.split_whitespace().count() > MAX_ITEM_WORDS {
            continue;
        }
        let token = normalize_skill(item);
        if token.chars().count() >= MIN_ITEM_CHARS {
            skills.insert(token);
        }
    }
}
