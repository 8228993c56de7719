// src/utils.rs

use crate::error::*;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static ILLEGAL_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).unwrap());

/// Replaces characters that are illegal on common filesystems with `_`
/// and trims trailing dots/spaces.
///
/// Only the end is trimmed. Leading dots and spaces are kept, so a name like
/// `.hidden notes` or ` Week 1` is not altered at the front.
pub fn sanitize_filename(name: &str) -> String {
    let name = ILLEGAL_CHARS_RE.replace_all(name, "_");
    let name = name.trim_end_matches(['.', ' ']);
    if name.is_empty() {
        return "unnamed".to_string();
    }
    name.to_string()
}

/// Parses a selection like `"8,9,6"` or `"5-7"` into 1-based numbers.
///
/// The result keeps first-seen order without duplicates. Reversed ranges are
/// accepted, and tokens outside `1..=max` or that are not numbers are dropped.
pub fn parse_selection(raw: &str, max: usize) -> Vec<usize> {
    let mut picked = Vec::new();
    let mut push = |n: usize| {
        if (1..=max).contains(&n) && !picked.contains(&n) {
            picked.push(n);
        }
    };
    for part in raw.split(',').map(str::trim) {
        if part.is_empty() {
            continue;
        }
        if let Some((start, end)) = part.split_once('-') {
            if let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>()) {
                let (lo, hi) = (start.min(end), start.max(end));
                for n in lo..=hi.min(max) {
                    push(n);
                }
            }
        } else if let Ok(n) = part.parse::<usize>() {
            push(n);
        }
    }
    picked
}

/// Builds the `/api/v1/` base URL for a Canvas domain.
///
/// A bare domain (`canvas.odu.edu/anything`) becomes `https://canvas.odu.edu/api/v1/`;
/// a value with a scheme keeps its scheme, host and port.
pub fn api_base_url(domain: &str) -> AppResult<Url> {
    let domain = domain.trim();
    let origin = if domain.contains("://") {
        let parsed = Url::parse(domain)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| AppError::UserInputError(format!("'{}' has no host", domain)))?;
        match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        }
    } else {
        let host = domain.split('/').next().unwrap_or_default();
        if host.is_empty() {
            return Err(AppError::UserInputError("Canvas domain is empty".to_string()));
        }
        format!("https://{}", host)
    };
    Ok(Url::parse(&format!("{}/api/v1/", origin))?)
}

/// Extracts the `rel="next"` target from an RFC 5988 `Link` header value.
pub fn parse_next_link(header: &str) -> Option<String> {
    let mut next = None;
    for part in header.split(',') {
        let segs: Vec<&str> = part.split(';').map(str::trim).collect();
        if segs.len() < 2 {
            continue;
        }
        let href = segs[0].trim_matches(|c| c == '<' || c == '>' || c == ' ');
        let rel = segs[1..]
            .iter()
            .filter_map(|attr| attr.strip_prefix("rel="))
            .map(|v| v.trim_matches('"'))
            .last();
        if rel == Some("next") {
            next = Some(href.to_string());
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("8,9,6", 10), vec![8, 9, 6]);
        assert_eq!(parse_selection("5-7", 10), vec![5, 6, 7]);
        assert_eq!(parse_selection("7-5", 10), vec![5, 6, 7]);
        assert_eq!(parse_selection("abc", 10), Vec::<usize>::new());

        // duplicates collapse, first occurrence wins
        assert_eq!(parse_selection("3, 1-3, 3", 5), vec![3, 1, 2]);

        // out of range and junk are dropped
        assert_eq!(parse_selection("0,1,11,x,2-x", 10), vec![1]);
        assert_eq!(parse_selection("9-12", 10), vec![9, 10]);
        assert_eq!(parse_selection("", 5), Vec::<usize>::new());
        assert_eq!(parse_selection("1", 0), Vec::<usize>::new());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Week 1: Intro/Notes. "), "Week 1_ Intro_Notes");
        assert_eq!(sanitize_filename("a\\b*c?d\"e<f>g|h"), "a_b_c_d_e_f_g_h");
        assert_eq!(sanitize_filename("tab\there\u{1}"), "tab_here_");
        assert_eq!(sanitize_filename(" .lead stays"), " .lead stays");
        assert_eq!(sanitize_filename("...  "), "unnamed");
        assert_eq!(sanitize_filename("Syllabus.pdf"), "Syllabus.pdf");
    }

    #[test]
    fn test_api_base_url() {
        assert_eq!(
            api_base_url("canvas.odu.edu").unwrap().as_str(),
            "https://canvas.odu.edu/api/v1/"
        );
        assert_eq!(
            api_base_url("  canvas.odu.edu/courses/1 ").unwrap().as_str(),
            "https://canvas.odu.edu/api/v1/"
        );
        assert_eq!(
            api_base_url("https://canvas.odu.edu/courses/188076").unwrap().as_str(),
            "https://canvas.odu.edu/api/v1/"
        );
        assert_eq!(
            api_base_url("http://127.0.0.1:8080").unwrap().as_str(),
            "http://127.0.0.1:8080/api/v1/"
        );
        assert!(api_base_url("  ").is_err());
    }

    #[test]
    fn test_parse_next_link() {
        let header = r#"<https://x/api/v1/courses?page=1&per_page=100>; rel="current", <https://x/api/v1/courses?page=2&per_page=100>; rel="next", <https://x/api/v1/courses?page=1&per_page=100>; rel="first""#;
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://x/api/v1/courses?page=2&per_page=100")
        );
        assert_eq!(parse_next_link(r#"<https://x/a?page=3>; rel="last""#), None);
        assert_eq!(parse_next_link(""), None);
        assert_eq!(parse_next_link("<https://x/a>"), None);
    }
}
