use crate::model::Period;

const OVERALL_ALIASES: &[&str] = &["Leaderboard", "overall", "firewall", "sparks"];

/// Names a period's sheet may go by, most specific first.
pub fn aliases(period: Period) -> Vec<String> {
    match period {
        Period::Overall => OVERALL_ALIASES.iter().map(|s| s.to_string()).collect(),
        Period::Week(n) => vec![format!("week {n}"), format!("week{n}")],
    }
}

/// Pick the workbook sheet that best represents `period`.
///
/// Priority: exact alias, then case-insensitive alias ignoring surrounding
/// whitespace, then the first sheet (in workbook order) containing an alias.
/// Returns `None` when nothing qualifies so callers can render an empty board.
pub fn resolve_sheet<'a>(names: &[&'a str], period: Period) -> Option<&'a str> {
    let aliases = aliases(period);

    for alias in &aliases {
        if let Some(name) = names.iter().copied().find(|n| *n == alias.as_str()) {
            return Some(name);
        }
    }

    for alias in &aliases {
        let alias = alias.to_lowercase();
        if let Some(name) = names.iter().copied().find(|n| n.trim().to_lowercase() == alias) {
            return Some(name);
        }
    }

    for &name in names {
        let lower = name.to_lowercase();
        if period == Period::Overall && week_number(name).is_some() {
            continue;
        }
        if aliases
            .iter()
            .any(|alias| contains_alias(&lower, &alias.to_lowercase(), period))
        {
            return Some(name);
        }
    }

    None
}

// `week 1` must not claim `week 10`.
fn contains_alias(haystack: &str, alias: &str, period: Period) -> bool {
    haystack.match_indices(alias).any(|(at, m)| match period {
        Period::Overall => true,
        Period::Week(_) => !haystack[at + m.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit()),
    })
}

/// Week number named by a sheet (`Week 3`, `week3`, `Week_12 results`), if any.
pub fn week_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    lower.match_indices("week").find_map(|(at, m)| {
        let rest = lower[at + m.len()..].trim_start_matches([' ', '_', '-']);
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse::<u32>().ok().filter(|n| *n > 0)
    })
}

/// Every week number named by some sheet, ascending and de-duplicated.
pub fn discover_weeks(names: &[&str]) -> Vec<u32> {
    let mut weeks: Vec<u32> = names.iter().filter_map(|n| week_number(n)).collect();
    weeks.sort_unstable();
    weeks.dedup();
    weeks
}
