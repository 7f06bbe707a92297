//! Regex heuristics for the liturgical metadata found in post titles and bodies.
//!
//! The tier order in [`Heuristics::cycle_and_day`] and the gospel marker list
//! decide the output for ambiguous titles, so both are kept stable.

use regex::Regex;

/// Book names and abbreviations followed by a chapter/verse expression.
const CITATION_PATTERN: &str = r"(?i)\b(?:Mt|Mt\.|Mateo|Mc|Mc\.|Marcos|Lc|Lc\.|Lucas|Jn|Jn\.|Juan|Hech|Hechos|Rm|Romanos|Is|Isaías|Ezq|Ezequiel)\s*[0-9IVXLivxl]+(?:[:,.\s]\s*[0-9\-–;,\s]+)?";

/// Citations containing one of these words count as gospel readings.
const GOSPEL_MARKERS: &str = r"(?i)\b(?:Lc|Lucas|Mateo|Mt|Marcos|Juan|Jn)\b";

/// Season and day names that may appear in a title without parentheses.
const SEASON_PATTERN: &str = r"(?i)\b(?:[1-3]?\s?º?\s?Domingo.*|Adviento.*|Pascua.*|Sagrado Corazón.*|Navidad.*|Cuaresma.*|Tiempo Ordinario.*|Ciclo\s?[ABCabc]|C\s?\d{4})";

const CYCLE_LETTER: &str = r"(?i)\b([ABC])\b";
const PARENTHETICAL: &str = r"\(([^()]+)\)";
const CONTENT_CYCLE: &str = r"(?i)\bCiclo\s*([ABC])\b";

/// Cycle letter and liturgical day resolved from a title (and body, for the cycle).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    pub ciclo: String,
    pub liturgical_day: String,
}

/// Gospel and non-gospel citations, each joined with `"; "`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Readings {
    pub gospel: String,
    pub other: String,
}

pub struct Heuristics {
    citation: Regex,
    gospel: Regex,
    season: Regex,
    cycle_letter: Regex,
    parenthetical: Regex,
    content_cycle: Regex,
}

impl Heuristics {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            citation: Regex::new(CITATION_PATTERN)?,
            gospel: Regex::new(GOSPEL_MARKERS)?,
            season: Regex::new(SEASON_PATTERN)?,
            cycle_letter: Regex::new(CYCLE_LETTER)?,
            parenthetical: Regex::new(PARENTHETICAL)?,
            content_cycle: Regex::new(CONTENT_CYCLE)?,
        })
    }

    /// Resolves the cycle and liturgical day.
    ///
    /// 1. A parenthetical in the title is the day; the cycle letter is searched inside it.
    /// 2. Otherwise the first season/day name in the title is the day, searched the same way.
    /// 3. If no cycle yet, `Ciclo X` in the body supplies the cycle only.
    pub fn cycle_and_day(&self, title: &str, content: &str) -> CycleInfo {
        let mut info = CycleInfo::default();

        if let Some(caps) = self.parenthetical.captures(title) {
            let candidate = caps[1].trim();
            info.ciclo = self.cycle_letter_in(candidate);
            info.liturgical_day = candidate.to_string();
        } else if let Some(m) = self.season.find(title) {
            info.liturgical_day = m.as_str().trim().to_string();
            info.ciclo = self.cycle_letter_in(m.as_str());
        }

        if info.ciclo.is_empty() {
            if let Some(caps) = self.content_cycle.captures(content) {
                info.ciclo = caps[1].to_uppercase();
            }
        }

        info
    }

    fn cycle_letter_in(&self, text: &str) -> String {
        self.cycle_letter
            .captures(text)
            .map(|caps| caps[1].to_uppercase())
            .unwrap_or_default()
    }

    /// All citations in `content`, trimmed, first occurrence order, duplicates removed.
    pub fn citations(&self, content: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for m in self.citation.find_iter(content) {
            let citation = m.as_str().trim();
            if !citation.is_empty() && !found.iter().any(|c| c == citation) {
                found.push(citation.to_string());
            }
        }
        found
    }

    pub fn is_gospel(&self, citation: &str) -> bool {
        self.gospel.is_match(citation)
    }

    /// Splits the body's citations into gospel and other readings.
    ///
    /// With no gospel match, the first citation stands in as the gospel reading.
    /// A citation never appears in both fields.
    pub fn readings(&self, content: &str) -> Readings {
        let citations = self.citations(content);

        let mut gospel: Vec<&str> = citations
            .iter()
            .filter(|c| self.is_gospel(c))
            .map(String::as_str)
            .collect();
        if gospel.is_empty() {
            if let Some(first) = citations.first() {
                gospel.push(first.as_str());
            }
        }

        let other: Vec<&str> = citations
            .iter()
            .map(String::as_str)
            .filter(|c| !gospel.contains(c))
            .collect();

        Readings {
            gospel: gospel.join("; "),
            other: other.join("; "),
        }
    }
}
