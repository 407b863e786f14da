//! Search filter — shell-style wildcard matching over the by-title index.
//!
//! The free-text term is wrapped as `*term*.*`, translated to a regex, and
//! matched case-insensitively against each file name. The term itself is
//! not sanitized: `*` and `?` inside it keep their wildcard meaning.

use regex::{Regex, RegexBuilder};

use crate::index::{CategoryIndex, IndexEntry};

/// Filter label recorded in the play log for search-originated plays.
pub fn search_label(term: &str) -> String {
    format!("searched_for:{term}")
}

/// Translate a shell wildcard pattern to an anchored regex.
/// `*` matches any run of characters, `?` a single character; everything
/// else is literal.
pub fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut body = String::with_capacity(pattern.len() * 2);
    for ch in pattern.chars() {
        match ch {
            '*' => body.push_str(".*"),
            '?' => body.push('.'),
            _ => body.push_str(&regex::escape(&ch.to_string())),
        }
    }
    RegexBuilder::new(&format!("^{body}$"))
        .case_insensitive(true)
        .build()
}

/// Filter the given index down to file names matching `*term*.*`,
/// preserving index order. An empty term matches every file that has an
/// extension.
pub fn search_titles(
    index: &CategoryIndex,
    term: &str,
) -> Result<Vec<IndexEntry>, regex::Error> {
    let re = wildcard_regex(&format!("*{term}*.*"))?;
    Ok(index
        .entries
        .iter()
        .filter(|entry| re.is_match(&entry.file_name))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn index_of(names: &[&str]) -> CategoryIndex {
        CategoryIndex {
            entries: names
                .iter()
                .map(|n| IndexEntry {
                    dir: PathBuf::from("/videos/by-title"),
                    file_name: n.to_string(),
                    group: None,
                })
                .collect(),
            group_width: 0,
        }
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let index = index_of(&["T - Artist.mp4", "Other - Song.mp4"]);
        let hits = search_titles(&index, "art").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].file_name, "T - Artist.mp4");
    }

    #[test]
    fn no_match_returns_empty() {
        let index = index_of(&["T - Artist.mp4"]);
        assert!(search_titles(&index, "zzz").unwrap().is_empty());
    }

    #[test]
    fn empty_term_matches_every_file_with_extension() {
        let index = index_of(&["a.mp4", "b.webm", "no-extension"]);
        let hits = search_titles(&index, "").unwrap();
        let names: Vec<&str> = hits.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.mp4", "b.webm"]);
    }

    #[test]
    fn results_preserve_index_order_without_omissions() {
        let index = index_of(&[
            "Alpha - One.mp4",
            "Beta - Two.mp4",
            "alphabet - Three.mp4",
        ]);
        let hits = search_titles(&index, "alpha").unwrap();
        let names: Vec<&str> = hits.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha - One.mp4", "alphabet - Three.mp4"]);
    }

    #[test]
    fn wildcards_in_term_keep_their_meaning() {
        let index = index_of(&["Smooth Operator.mp4", "Sweet Dreams.mp4"]);
        let hits = search_titles(&index, "sm*oper").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].file_name, "Smooth Operator.mp4");
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let index = index_of(&["Hey (Live).mp4", "Hey Live.mp4"]);
        let hits = search_titles(&index, "(live)").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].file_name, "Hey (Live).mp4");
    }

    #[test]
    fn search_label_format() {
        assert_eq!(search_label("abba"), "searched_for:abba");
    }
}
