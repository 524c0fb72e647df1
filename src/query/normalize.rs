use std::collections::HashMap;
use std::num::IntErrorKind;

use super::plan::{QueryPlan, SortKey, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Query-string parameters as received, before any validation
pub type RawParams = HashMap<String, String>;

const PAGE_KEYS: &[&str] = &["page"];
const PAGE_SIZE_KEYS: &[&str] = &["pageSize"];
const SORT_KEYS: &[&str] = &["orderBy", "sortKey"];
const FILTER_KEYS: &[&str] = &["keyword", "filterText"];

/// Turn raw list parameters into a [`QueryPlan`].
///
/// Never fails: malformed or out-of-range values fall back to defaults or
/// are clamped, so a typo from an old client still gets a page back.
/// `allowed` is the resource's sort allow-list; anything outside it means
/// `recent`.
pub fn normalize(raw: &RawParams, allowed: &[SortKey]) -> QueryPlan {
    let page = parse_page(lookup(raw, PAGE_KEYS));
    let page_size = parse_page_size(lookup(raw, PAGE_SIZE_KEYS));
    let sort_key = parse_sort_key(lookup(raw, SORT_KEYS), allowed);

    QueryPlan::new(page, page_size, sort_key, lookup(raw, FILTER_KEYS))
}

/// First non-blank value among `keys`, in order of precedence
fn lookup<'a>(raw: &'a RawParams, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .map(String::as_str)
        .find(|value| !value.trim().is_empty())
}

/// Integer parse that saturates on overflow instead of failing
fn parse_int(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(v) => Some(v),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn parse_page(raw: Option<&str>) -> u32 {
    match raw.and_then(parse_int) {
        Some(v) if v >= 1 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => DEFAULT_PAGE,
    }
}

fn parse_page_size(raw: Option<&str>) -> u32 {
    match raw.and_then(parse_int) {
        Some(v) => v.clamp(1, i64::from(MAX_PAGE_SIZE)) as u32,
        None => DEFAULT_PAGE_SIZE,
    }
}

fn parse_sort_key(raw: Option<&str>, allowed: &[SortKey]) -> SortKey {
    raw.and_then(SortKey::parse)
        .filter(|key| allowed.contains(key))
        .unwrap_or(SortKey::Recent)
}
