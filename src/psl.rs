//! Public Suffix List engine (C4).
//!
//! The ruleset is process-wide state behind a lock-guarded `Arc`, the way
//! spec.md §4.4/§5 asks for: `set_psl` swaps the `Arc` under a short-held
//! lock, readers clone the `Arc` (an uncontended atomic refcount bump) and
//! then search the snapshot without holding any lock.
use std::sync::{Arc, OnceLock, RwLock};

use crate::log::info;

/// One parsed PSL rule: its labels left-to-right (`"co.uk"` -> `["co",
/// "uk"]`, `"*.ck"` -> `["*", "ck"]`), and whether it's an exception
/// (`"!www.ck"`).
#[derive(Debug)]
struct Rule {
    labels: Vec<String>,
    is_exception: bool,
}

/// A parsed, queryable Public Suffix List ruleset.
#[derive(Debug)]
pub struct PslRules {
    rules: Vec<Rule>,
}

impl PslRules {
    fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parses the RFC-standard PSL text format: `//` comments, blank lines
    /// ignored, `*.x` wildcards, `!x` exceptions.
    pub fn parse(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let mut rules = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let (is_exception, rule) = match line.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, line),
            };
            let labels: Vec<String> = rule
                .split('.')
                .map(|label| label.to_ascii_lowercase())
                .collect();
            if labels.iter().any(String::is_empty) {
                continue;
            }
            rules.push(Rule { labels, is_exception });
        }
        Self { rules }
    }

    /// Longest public suffix of `host`'s labels, honoring exceptions, with
    /// the implicit `*` rule as a fallback (the last label alone).
    ///
    /// Per the canonical PSL algorithm, an exception rule always prevails
    /// over every other matching rule regardless of length: it is not
    /// merely a tie-breaker against a same-length plain rule, it overrides
    /// even a longer one.
    pub fn public_suffix(&self, host: &str) -> String {
        if host.is_empty() {
            return String::new();
        }
        let host_labels: Vec<&str> = host.split('.').collect();

        let mut best_len = 0usize;
        let mut exception_len: Option<usize> = None;

        for rule in &self.rules {
            let len = rule.labels.len();
            if len == 0 || len > host_labels.len() {
                continue;
            }
            let candidate = &host_labels[host_labels.len() - len..];
            if rule_matches(rule, candidate) {
                if rule.is_exception {
                    exception_len = Some(exception_len.map_or(len, |best| best.max(len)));
                } else if len > best_len {
                    best_len = len;
                }
            }
        }

        let suffix_len = if let Some(len) = exception_len {
            len - 1
        } else if best_len == 0 {
            // default rule "*": public suffix is the last label
            1.min(host_labels.len())
        } else {
            best_len
        };

        host_labels[host_labels.len() - suffix_len..].join(".")
    }

    /// The pay-level domain: one label above the suffix, plus the suffix.
    /// Empty when `host` has no label above its suffix, or `host` is empty.
    pub fn pld(&self, host: &str) -> String {
        if host.is_empty() {
            return String::new();
        }
        let suffix = self.public_suffix(host);
        let host_labels: Vec<&str> = host.split('.').collect();
        let suffix_labels: Vec<&str> = if suffix.is_empty() {
            Vec::new()
        } else {
            suffix.split('.').collect()
        };
        if host_labels.len() <= suffix_labels.len() {
            return String::new();
        }
        host_labels[host_labels.len() - suffix_labels.len() - 1..].join(".")
    }

    /// The public suffix itself, derived as `pld` with its leftmost label
    /// dropped (matches `url.py`'s `tld` property).
    pub fn tld(&self, host: &str) -> String {
        let pld = self.pld(host);
        if pld.is_empty() {
            return String::new();
        }
        match pld.split_once('.') {
            Some((_, rest)) => rest.to_owned(),
            None => String::new(),
        }
    }
}

fn rule_matches(rule: &Rule, candidate: &[&str]) -> bool {
    rule.labels
        .iter()
        .zip(candidate)
        .all(|(rule_label, host_label)| {
            rule_label == "*" || rule_label.eq_ignore_ascii_case(host_label)
        })
}

static RULES: OnceLock<RwLock<Arc<PslRules>>> = OnceLock::new();

fn global() -> &'static RwLock<Arc<PslRules>> {
    RULES.get_or_init(|| RwLock::new(Arc::new(PslRules::empty())))
}

/// A lock-free snapshot of the current ruleset.
pub fn current() -> Arc<PslRules> {
    global().read().expect("psl rwlock poisoned").clone()
}

/// Replaces the global PSL ruleset, returning the previous one so callers
/// (notably tests) can restore it.
pub fn set_psl(bytes: impl AsRef<[u8]>) -> Arc<PslRules> {
    let parsed = Arc::new(PslRules::parse(bytes.as_ref()));
    info!("replacing public suffix list ({} rules)", parsed.rules.len());
    let mut guard = global().write().expect("psl rwlock poisoned");
    std::mem::replace(&mut *guard, parsed)
}

/// RAII guard returned by [`set_psl_scoped`]; restores the prior ruleset
/// when dropped, so tests can swap the PSL temporarily without leaking
/// state into other tests.
#[derive(Debug)]
#[must_use]
pub struct PslGuard {
    previous: Option<Arc<PslRules>>,
}

impl Drop for PslGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let mut guard = global().write().expect("psl rwlock poisoned");
            *guard = previous;
        }
    }
}

/// Replaces the global PSL ruleset and returns a guard that restores the
/// previous ruleset when it goes out of scope.
pub fn set_psl_scoped(bytes: impl AsRef<[u8]>) -> PslGuard {
    let previous = set_psl(bytes);
    PslGuard { previous: Some(previous) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The global PSL is process-wide state; serialize tests that swap it so
    // they don't observe each other's rulesets under parallel test execution.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn uk_then_co_uk_swap() {
        let _serialize = TEST_LOCK.lock().unwrap();
        let _guard = set_psl_scoped("uk");
        let rules = current();
        assert_eq!(rules.pld("foo.co.uk"), "co.uk");
        assert_eq!(rules.tld("foo.co.uk"), "uk");

        let _guard2 = set_psl_scoped("co.uk");
        let rules = current();
        assert_eq!(rules.pld("foo.co.uk"), "foo.co.uk");
        assert_eq!(rules.tld("foo.co.uk"), "co.uk");
    }

    #[test]
    fn wildcard_and_exception() {
        let _serialize = TEST_LOCK.lock().unwrap();
        let _guard = set_psl_scoped("*.ck\n!www.ck\n");
        let rules = current();
        // "www.ck" is an exception to the "*.ck" wildcard: "ck" is the
        // suffix, "www" is a registrable label.
        assert_eq!(rules.public_suffix("www.ck"), "ck");
        // any other label under .ck falls under the wildcard rule.
        assert_eq!(rules.public_suffix("foo.ck"), "foo.ck");
    }

    #[test]
    fn exception_overrides_a_longer_matching_rule() {
        let _serialize = TEST_LOCK.lock().unwrap();
        // "a.www.ck" matches both "!www.ck" (2 labels, exception) and the
        // unrelated longer literal rule "a.www.ck" (3 labels, plain). The
        // exception must win even though it's the shorter match.
        let _guard = set_psl_scoped("*.ck\n!www.ck\na.www.ck\n");
        let rules = current();
        assert_eq!(rules.public_suffix("a.www.ck"), "ck");
    }

    #[test]
    fn empty_host() {
        let _serialize = TEST_LOCK.lock().unwrap();
        let rules = current();
        assert_eq!(rules.pld(""), "");
        assert_eq!(rules.tld(""), "");
    }

    #[test]
    fn default_rule_for_unknown_tld() {
        let _serialize = TEST_LOCK.lock().unwrap();
        let _guard = set_psl_scoped("");
        let rules = current();
        assert_eq!(rules.public_suffix("example.zzz"), "zzz");
        assert_eq!(rules.pld("example.zzz"), "example.zzz");
    }
}
