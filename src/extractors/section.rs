// src/extractors/section.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// --- Constants ---
// Any line starting with this prefix closes the current section
const HEADING_PREFIX: &str = "## [";

// --- Regex Patterns (Lazy Static) ---
// Line endings accepted in a changelog: CRLF, LF, or a bare CR
static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|\n|\r").expect("Failed to compile LINE_BREAK_RE")
});

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedSection {
    pub version: String,     // Trimmed version identifier, e.g. "0.2.4"
    pub heading: String,     // The full heading line, e.g. "## [0.2.4] - 2024-01-01"
    pub heading_line: usize, // 1-based line number of the heading
    pub end_line: usize,     // 1-based line number of the next heading, or one past the last line
    pub line_count: usize,   // Lines in the trimmed body
    pub content: String,     // Trimmed body, always newline terminated
}

/// Finds the section belonging to one version in a changelog.
///
/// A heading is a line starting with `## [<version>]` followed by whitespace
/// or the end of the line. The version is escaped, so `1.2.3` only ever matches
/// the literal text `1.2.3`.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    version: String,
    heading_re: Regex,
}

impl SectionExtractor {
    /// Validates the version and builds the heading matcher for it.
    pub fn new(version: &str) -> Result<Self, ExtractError> {
        let version = version.trim();
        if version.is_empty() {
            return Err(ExtractError::InvalidInput);
        }

        let pattern = format!(r"^## \[{}\](?:\s|$)", regex::escape(version));
        let heading_re = Regex::new(&pattern).map_err(|e| ExtractError::RegexError(e.to_string()))?;
        tracing::trace!("Heading pattern for {}: {}", version, pattern);

        Ok(Self {
            version: version.to_string(),
            heading_re,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// True if `line` is the heading of this extractor's version.
    pub fn is_heading(&self, line: &str) -> bool {
        self.heading_re.is_match(line)
    }

    /// Extracts the section from a whole changelog document.
    pub fn extract(&self, document: &str) -> Result<ExtractedSection, ExtractError> {
        let document = document.strip_prefix('\u{feff}').unwrap_or(document);
        let lines = split_lines(document);
        self.extract_lines(&lines)
    }

    /// Extracts the section from a changelog already split into lines.
    pub fn extract_lines(&self, lines: &[&str]) -> Result<ExtractedSection, ExtractError> {
        // 1. First matching heading wins; later duplicates are ignored
        let start = lines
            .iter()
            .position(|line| self.is_heading(line))
            .ok_or_else(|| ExtractError::SectionNotFound(self.version.clone()))?;
        tracing::debug!("Found heading for {} at line {}: '{}'", self.version, start + 1, lines[start]);

        // 2. The section runs until the next version heading, or end of document
        let end = lines[start + 1..]
            .iter()
            .position(|line| line.starts_with(HEADING_PREFIX))
            .map_or(lines.len(), |offset| start + 1 + offset);
        if end < lines.len() {
            tracing::debug!("Section for {} ends at next heading on line {}", self.version, end + 1);
        } else {
            tracing::debug!("Section for {} runs to end of document", self.version);
        }

        // 3. Drop surrounding blank lines and render
        let body = trim_blank_lines(&lines[start + 1..end]);
        let content = render_body(body);
        tracing::debug!("Extracted {} lines ({} bytes) for {}", body.len(), content.len(), self.version);

        Ok(ExtractedSection {
            version: self.version.clone(),
            heading: lines[start].to_string(),
            heading_line: start + 1,
            end_line: end + 1,
            line_count: body.len(),
            content,
        })
    }
}

/// Splits a document into lines. A single trailing line break does not
/// produce an extra empty line.
pub fn split_lines(document: &str) -> Vec<&str> {
    if document.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = LINE_BREAK_RE.split(document).collect();
    if document.ends_with(['\n', '\r']) {
        lines.pop();
    }
    lines
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn trim_blank_lines<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let first = lines.iter().position(|line| !is_blank(line));
    let last = lines.iter().rposition(|line| !is_blank(line));
    match (first, last) {
        (Some(first), Some(last)) => &lines[first..=last],
        _ => &[],
    }
}

fn render_body(body: &[&str]) -> String {
    let mut content = body.join("\n").trim_end().to_string();
    content.push('\n');
    content
}
