use chrono::Local;
use reqwest::Client;

use crate::{info_time, warn_time, Error, Result};

/// Checks the site's published crawling policy before touching `url`.
/// Denial is fatal unless `ignore` is set, in which case it only warns.
/// A missing or unreachable robots.txt counts as permission granted.
pub(crate) async fn check(client: &Client, url: &str, ignore: bool) -> Result<()> {
    info_time!("Checking crawling restrictions for website: {}", url);
    let (origin, path) = split_origin(url).ok_or_else(|| Error::BadUrl(url.into()))?;

    let body = match client.get(format!("{origin}/robots.txt")).send().await {
        Ok(res) if res.status().is_success() => res.text().await.unwrap_or_default(),
        _ => {
            info_time!("No robots.txt published, crawling allowed");
            return Ok(());
        }
    };

    if Rules::parse(&body).can_fetch(path) {
        info_time!("Crawling allowed");
        Ok(())
    } else if ignore {
        warn_time!("Crawling not allowed for {}, continuing anyway", url);
        Ok(())
    } else {
        Err(Error::PermissionDenied(url.into()))
    }
}

/// Splits a url into its origin and the path that follows it.
/// A url with no path component maps to the root path.
fn split_origin(url: &str) -> Option<(&str, &str)> {
    let scheme_end = url.find("://")? + 3;
    url[scheme_end..].find('/').map_or(
        Some((url, "/")),
        |i| Some((&url[..scheme_end + i], &url[scheme_end + i..])),
    )
}

/// The `Allow`/`Disallow` path prefixes of the groups that apply to every
/// agent. The scraper rotates its identifying string per request, so named
/// groups never match it and only the `*` group is kept.
#[derive(Debug, Default)]
struct Rules {
    allow: Vec<String>,
    disallow: Vec<String>,
}

impl Rules {
    fn parse(content: &str) -> Self {
        let mut rules = Rules::default();
        let mut applies = false;
        // Consecutive user-agent lines open a single shared group.
        let mut in_group_header = false;
        for line in content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match directive.trim().to_ascii_lowercase().as_str() {
                "user-agent" => {
                    if !in_group_header {
                        applies = false;
                        in_group_header = true;
                    }
                    if value == "*" {
                        applies = true;
                    }
                }
                "allow" => {
                    in_group_header = false;
                    if applies && !value.is_empty() {
                        rules.allow.push(value.to_string());
                    }
                }
                "disallow" => {
                    in_group_header = false;
                    // An empty Disallow value means the group allows everything.
                    if applies && !value.is_empty() {
                        rules.disallow.push(value.to_string());
                    }
                }
                _ => in_group_header = false,
            }
        }
        rules
    }

    /// Longest matching prefix wins; `Allow` beats `Disallow` on a tie.
    fn can_fetch(&self, path: &str) -> bool {
        let allow = longest_match(&self.allow, path);
        let disallow = longest_match(&self.disallow, path);
        match (allow, disallow) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(a), Some(d)) => a >= d,
        }
    }
}

fn longest_match(prefixes: &[String], path: &str) -> Option<usize> {
    prefixes
        .iter()
        .filter(|p| path.starts_with(p.as_str()))
        .map(|p| p.len())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_origin_and_path() {
        assert_eq!(
            split_origin("https://example.com/es/comps/12/x"),
            Some(("https://example.com", "/es/comps/12/x"))
        );
        assert_eq!(
            split_origin("https://example.com"),
            Some(("https://example.com", "/"))
        );
        assert_eq!(split_origin("not a url"), None);
    }

    #[test]
    fn disallow_all_denies() {
        let rules = Rules::parse("User-agent: *\nDisallow: /");
        assert!(!rules.can_fetch("/es/comps/12/stats"));
    }

    #[test]
    fn empty_policy_allows() {
        assert!(Rules::parse("").can_fetch("/anything"));
        assert!(Rules::parse("User-agent: *\nDisallow:").can_fetch("/anything"));
    }

    #[test]
    fn named_groups_are_ignored() {
        let rules = Rules::parse("User-agent: BadBot\nDisallow: /");
        assert!(rules.can_fetch("/es/comps/12/stats"));
    }

    #[test]
    fn longer_allow_overrides_disallow() {
        let rules = Rules::parse("User-agent: *\nDisallow: /es/\nAllow: /es/comps/");
        assert!(rules.can_fetch("/es/comps/12/stats"));
        assert!(!rules.can_fetch("/es/other"));
    }

    #[test]
    fn shared_group_headers_apply_to_all_listed_agents() {
        let rules = Rules::parse("User-agent: BadBot\nUser-agent: *\nDisallow: /private/");
        assert!(!rules.can_fetch("/private/page"));
        assert!(rules.can_fetch("/public/page"));
    }
}
