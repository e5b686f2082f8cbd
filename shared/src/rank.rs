use crate::model::{LeaderboardEntry, LeaderboardPage, PageRequest, Standing};

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slice out 1-based page `page`. Out-of-range pages (including 0) are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> LeaderboardPage<T> {
    let total_pages = total_pages(items.len(), page_size);
    if page == 0 || page > total_pages {
        return LeaderboardPage { data: Vec::new(), total_pages };
    }
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    LeaderboardPage { data: items[start..end].to_vec(), total_pages }
}

/// Paginated or full-data mode; `total_pages` is computed either way.
pub fn select<T: Clone>(items: &[T], request: PageRequest, page_size: usize) -> LeaderboardPage<T> {
    match request {
        PageRequest::Page(page) => paginate(items, page, page_size),
        PageRequest::Full => LeaderboardPage {
            data: items.to_vec(),
            total_pages: total_pages(items.len(), page_size),
        },
    }
}

// Stable, so equal scores keep spreadsheet order.
fn ranked(entries: &[LeaderboardEntry]) -> Vec<&LeaderboardEntry> {
    let mut sorted: Vec<&LeaderboardEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.sparks.total_cmp(&a.sparks));
    sorted
}

/// 1-based rank of `address` by score, ties broken by original order.
///
/// Works on a sorted copy of references; `entries` keeps its order.
pub fn rank_of(entries: &[LeaderboardEntry], address: &str) -> Option<usize> {
    ranked(entries)
        .iter()
        .position(|e| e.matches_address(address))
        .map(|i| i + 1)
}

/// The whole sheet in rank order, each entry tagged with its rank.
pub fn standings(entries: &[LeaderboardEntry]) -> Vec<Standing> {
    ranked(entries)
        .into_iter()
        .enumerate()
        .map(|(i, entry)| Standing { rank: i + 1, entry: entry.clone() })
        .collect()
}

/// Case-insensitive substring search on address. Ranks are preserved.
pub fn search(standings: &[Standing], term: &str) -> Vec<Standing> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return standings.to_vec();
    }
    standings
        .iter()
        .filter(|s| s.entry.address.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

/// One slot in the pagination control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Page links around `current`: first and last always, `radius` pages on
/// either side of the current one, and an ellipsis for each longer gap.
pub fn page_window(current: usize, total: usize, radius: usize) -> Vec<PageLink> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let lo = current.saturating_sub(radius).max(1);
    let hi = (current + radius).min(total);

    let mut pages: Vec<usize> = vec![1, total];
    pages.extend(lo..=hi);
    pages.sort_unstable();
    pages.dedup();

    let mut links = Vec::with_capacity(pages.len() + 2);
    let mut prev = 0;
    for page in pages {
        match page - prev {
            1 => {}
            // A gap of one page is cheaper to show than an ellipsis.
            2 => links.push(PageLink::Page(page - 1)),
            _ => links.push(PageLink::Ellipsis),
        }
        links.push(PageLink::Page(page));
        prev = page;
    }
    links
}
