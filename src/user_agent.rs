// Copyright 2025 Cowboy AI, LLC.

//! Best-effort browser sniffing from a raw user agent string.
//!
//! A user agent is read as a sequence of product sections, `Name/Version`,
//! each optionally followed by a parenthesised comment whose entries are
//! separated by `"; "`. The browser family is then picked from the layout of
//! those sections. Failures yield empty strings rather than errors.

use serde::{Deserialize, Serialize};

/// One `Name/Version (comment; ...)` group of a user agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Product name
    pub name: String,
    /// Product version, empty when absent
    pub version: String,
    /// Comment entries following the product
    pub comments: Vec<String>,
}

/// Browser family and version as reported by the user agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserInfo {
    /// Family name, e.g. `Chrome`, `HeadlessChrome`, `Safari`; empty if unknown
    pub name: String,
    /// Version string exactly as reported; empty if unknown
    pub version: String,
}

impl BrowserInfo {
    fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// Whether either half is missing.
    pub fn is_incomplete(&self) -> bool {
        self.name.is_empty() || self.version.is_empty()
    }
}

const BOT_MARKERS: [&str; 2] = ["Googlebot", "bingbot"];

/// Read until `delimiter`, honouring nested parentheses when `nested` is set.
fn read_until<'a>(ua: &'a str, index: &mut usize, delimiter: u8, nested: bool) -> &'a str {
    let bytes = ua.as_bytes();
    let start = *index;
    let mut depth = 0usize;
    while *index < bytes.len() {
        let b = bytes[*index];
        if b == delimiter && depth == 0 {
            break;
        }
        if nested {
            if b == b'(' {
                depth += 1;
            } else if b == b')' {
                depth = depth.saturating_sub(1);
            }
        }
        *index += 1;
    }
    &ua[start..*index]
}

fn parse_section(ua: &str, index: &mut usize) -> Section {
    let mut section = Section::default();
    let product = read_until(ua, index, b' ', false);
    match product.split_once('/') {
        Some((name, version)) => {
            section.name = name.to_string();
            section.version = version.to_string();
        }
        None => section.name = product.to_string(),
    }

    let bytes = ua.as_bytes();
    if *index < bytes.len() && bytes[*index] == b' ' && bytes.get(*index + 1) == Some(&b'(') {
        *index += 1;
    }
    if *index < bytes.len() && bytes[*index] == b'(' {
        *index += 1;
        let comment = read_until(ua, index, b')', true);
        section.comments = comment.split("; ").map(str::to_string).collect();
        *index = (*index + 1).min(bytes.len());
    }
    while *index < bytes.len() && bytes[*index] == b' ' {
        *index += 1;
    }
    section
}

/// Split a user agent into its product sections.
pub fn parse_sections(ua: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut index = 0;
    let ua = ua.trim();
    while index < ua.len() {
        let before = index;
        sections.push(parse_section(ua, &mut index));
        if index == before {
            break;
        }
    }
    sections
}

fn is_bot(section: &Section) -> bool {
    section
        .comments
        .iter()
        .any(|c| BOT_MARKERS.iter().any(|bot| c.starts_with(bot)))
}

fn internet_explorer(first: &Section) -> BrowserInfo {
    for comment in &first.comments {
        if let Some(version) = comment.strip_prefix("MSIE ") {
            return BrowserInfo::new("Internet Explorer", version);
        }
        if let Some(version) = comment.strip_prefix("rv:") {
            return BrowserInfo::new("Internet Explorer", version);
        }
    }
    BrowserInfo::new("Internet Explorer", "")
}

fn webkit_browser(sections: &[Section], index: usize) -> BrowserInfo {
    let len = sections.len();
    let last = &sections[len - 1];
    match last.name.as_str() {
        "Edge" | "Edg" | "EdgA" | "EdgiOS" => return BrowserInfo::new("Edge", &last.version),
        "OPR" => return BrowserInfo::new("Opera", &last.version),
        _ => {}
    }
    let penultimate = &sections[len - 2];
    if matches!(penultimate.name.as_str(), "Electron" | "PhantomJS") {
        return BrowserInfo::new(&penultimate.name, &penultimate.version);
    }

    let product = &sections[index];
    let name = match product.name.as_str() {
        "Chrome" | "CriOS" => "Chrome",
        "HeadlessChrome" => "HeadlessChrome",
        "Chromium" => "Chromium",
        "FxiOS" => "Firefox",
        _ => "Safari",
    };
    BrowserInfo::new(name, &product.version)
}

/// Extract the browser family and version from a user agent.
pub fn parse_browser(ua: &str) -> BrowserInfo {
    let sections = parse_sections(ua);
    let Some(first) = sections.first() else {
        return BrowserInfo::default();
    };

    if first.name == "Opera" {
        // Presto-era Opera freezes the leading token at 9.80 and reports the
        // real release in a trailing Version/ section.
        let version = sections
            .iter()
            .rev()
            .find(|s| s.name == "Version")
            .map_or(first.version.as_str(), |s| s.version.as_str());
        return BrowserInfo::new("Opera", version);
    }

    if sections.len() < 3 {
        if first.comments.first().map(String::as_str) == Some("compatible")
            && first.comments.iter().any(|c| c.starts_with("MSIE "))
        {
            return internet_explorer(first);
        }
        return BrowserInfo::default();
    }

    let engine = &sections[1];
    let index = if sections[2].version.is_empty() && sections.len() > 3 {
        3
    } else {
        2
    };

    match engine.name.as_str() {
        "AppleWebKit" if is_bot(engine) || is_bot(first) => BrowserInfo::default(),
        "AppleWebKit" => webkit_browser(&sections, index),
        "Gecko" => {
            let product = &sections[2];
            BrowserInfo::new(&product.name, &product.version)
        }
        "like" if sections[2].name == "Gecko" => internet_explorer(first),
        _ => BrowserInfo::default(),
    }
}
