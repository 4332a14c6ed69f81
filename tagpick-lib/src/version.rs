use std::cmp::Ordering;
use std::fmt;

/// Strips a single leading `v` or `V` from a tag for display.
///
/// Example outputs:
/// - v0.6.5 -> 0.6.5
/// - V1.2 -> 1.2
/// - v -> v
pub fn normalize_tag(tag: &str) -> &str {
    let tag = tag.trim();
    match tag.strip_prefix(&['v', 'V'][..]) {
        Some(rest) if !rest.is_empty() => rest,
        _ => tag,
    }
}

/// Ordered key of a version-like display string.
///
/// Any number of numeric core segments is accepted (`1`, `1.2.3`, `0.2.7.4`),
/// optionally followed by a `-` and dot separated prerelease identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionKey {
    pub core: Vec<u64>,
    pub prerelease: Option<Vec<String>>,
}

impl VersionKey {
    /// Returns `None` unless the whole string is version-like, which requires a leading digit.
    pub fn parse(display: &str) -> Option<Self> {
        let s = display.trim();
        if !s.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        let (main, prerelease) = match s.split_once('-') {
            Some((main, pre)) => (main, Some(pre)),
            None => (s, None),
        };

        let core = main
            .split('.')
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                segment.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>()?;

        let prerelease = prerelease.map(|pre| {
            if pre.is_empty() {
                Vec::new()
            } else {
                pre.split('.').map(str::to_string).collect()
            }
        });

        Some(VersionKey { core, prerelease })
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Precedence of `self` relative to `other`.
    ///
    /// Missing core segments count as zero, so `1.0` and `1.0.0` are equal.
    /// A release outranks any prerelease of the same core.
    pub fn precedence(&self, other: &Self) -> Ordering {
        let len = self.core.len().max(other.core.len());
        let segment = |core: &[u64], i: usize| core.get(i).copied().unwrap_or(0);
        for i in 0..len {
            let ord = segment(&self.core, i).cmp(&segment(&other.core, i));
            if ord.is_ne() {
                return ord;
            }
        }

        match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => compare_prerelease(a, b),
        }
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self
            .core
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{core}")?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre.join("."))?;
        }
        Ok(())
    }
}

fn numeric_identifier(ident: &str) -> Option<u64> {
    if ident.is_empty() || !ident.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    ident.parse().ok()
}

fn compare_prerelease(a: &[String], b: &[String]) -> Ordering {
    for (ai, bi) in a.iter().zip(b) {
        let ord = match (numeric_identifier(ai), numeric_identifier(bi)) {
            (Some(an), Some(bn)) => an.cmp(&bn),
            // Numeric identifiers have lower precedence than alphanumeric ones
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => ai.cmp(bi),
        };
        if ord.is_ne() {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Orders two display strings, ascending.
///
/// Version-like strings rank above everything else; two non-version strings
/// compare lexically.
fn compare_display(
    a_key: Option<&VersionKey>,
    a: &str,
    b_key: Option<&VersionKey>,
    b: &str,
) -> Ordering {
    match (a_key, b_key) {
        (Some(ak), Some(bk)) => ak.precedence(bk),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Returns true if `a_disp` should sort ahead of `b_disp` in descending order.
pub fn greater(a_disp: &str, b_disp: &str) -> bool {
    let a = VersionKey::parse(a_disp);
    let b = VersionKey::parse(b_disp);
    compare_display(a.as_ref(), a_disp, b.as_ref(), b_disp).is_gt()
}

/// A tag as shown in the version list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagItem {
    /// Exact tag from the remote, e.g. `v0.6.5`. Used for selection and downloads.
    pub raw: String,
    /// Tag with the leading `v` stripped, e.g. `0.6.5`.
    pub display: String,
    pub key: Option<VersionKey>,
    pub is_latest: bool,
}

impl TagItem {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let display = normalize_tag(&raw).to_string();
        let key = VersionKey::parse(&display);
        TagItem {
            raw,
            display,
            key,
            is_latest: false,
        }
    }

    pub fn title(&self) -> String {
        if self.is_latest {
            format!("{}  (latest)", self.display)
        } else {
            self.display.clone()
        }
    }

    /// Descending list order: highest precedence first, ties broken by raw tag descending.
    fn list_order(&self, other: &Self) -> Ordering {
        compare_display(
            other.key.as_ref(),
            &other.display,
            self.key.as_ref(),
            &self.display,
        )
        .then_with(|| other.raw.cmp(&self.raw))
    }
}

/// Builds the version list from raw tags, highest first, with the first item marked latest.
pub fn rank_tags<I, S>(tags: I) -> Vec<TagItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut items: Vec<TagItem> = tags.into_iter().map(TagItem::new).collect();
    items.sort_by(TagItem::list_order);
    if let Some(first) = items.first_mut() {
        first.is_latest = true;
    }
    items
}
