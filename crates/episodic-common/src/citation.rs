//! Citation rendering for episodes.
//!
//! Produces an APA-style reference string and a BibTeX `@misc` entry from an
//! episode's authors, title, publication year, permalink and DOI.

use serde::Serialize;

use crate::{Author, Episode};

/// Both citation formats for one episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub apa: String,
    pub bibtex: String,
}

impl Citation {
    /// Render both formats for `episode`.
    pub fn for_episode(episode: &Episode) -> Self {
        let year = episode.year().to_string();
        let permalink = episode.permalink.as_deref();
        let doi = episode.doi.as_deref();
        Self {
            apa: apa(&episode.authors, &episode.title, &year, permalink, doi),
            bibtex: bibtex(&episode.authors, &episode.title, &year, permalink, doi),
        }
    }
}

/// `Last, F. M., Other, A. (year). Title. https://doi.org/...`
///
/// A DOI takes precedence over the permalink as the locator.
pub fn apa(
    authors: &[Author],
    title: &str,
    year: &str,
    permalink: Option<&str>,
    doi: Option<&str>,
) -> String {
    let names: Vec<String> = authors.iter().map(|a| apa_name(&a.name)).collect();
    let locator = match (doi, permalink) {
        (Some(doi), _) => format!("https://doi.org/{doi}"),
        (None, Some(link)) => link.to_string(),
        (None, None) => String::new(),
    };
    format!("{} ({year}). {title}. {locator}", names.join(", "))
        .trim()
        .to_string()
}

fn apa_name(full_name: &str) -> String {
    let mut words: Vec<&str> = full_name.split_whitespace().collect();
    let last = words.pop().unwrap_or_default();
    let initials: Vec<String> = words
        .iter()
        .filter_map(|w| w.chars().next())
        .map(|c| format!("{}.", c.to_uppercase()))
        .collect();
    format!("{last}, {}", initials.join(" ")).trim().to_string()
}

/// Citation key: slugified title plus year, e.g. `deep-listening-2024`.
pub fn bibtex_key(title: &str, year: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    format!("{slug}-{year}")
}

/// A `@misc` entry with `howpublished={Podcast episode}`.
pub fn bibtex(
    authors: &[Author],
    title: &str,
    year: &str,
    permalink: Option<&str>,
    doi: Option<&str>,
) -> String {
    let author_list = if authors.is_empty() {
        "Unknown".to_string()
    } else {
        authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(" and ")
    };

    let mut lines = vec![
        format!("@misc{{{},", bibtex_key(title, year)),
        format!("  title={{{title}}},"),
        format!("  author={{{author_list}}},"),
        format!("  year={{{year}}},"),
        "  howpublished={Podcast episode},".to_string(),
    ];
    if let Some(url) = permalink {
        lines.push(format!("  url={{{url}}},"));
    }
    if let Some(doi) = doi {
        lines.push(format!("  doi={{{doi}}},"));
    }
    lines.push("}".to_string());
    lines.join("\n")
}
