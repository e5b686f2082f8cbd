//! Share card: a 600x315 SVG summary plus the tweet that goes with it.

use crate::model::{format_sparks, truncate_address};

pub const CARD_WIDTH: u32 = 600;
pub const CARD_HEIGHT: u32 = 315;

const ATTRIBUTION: &str = "@magicianafk";
const HASHTAG: &str = "#FirewallGenesis";
const INTENT_BASE: &str = "https://twitter.com/intent/tweet";

#[derive(Clone, Debug, PartialEq)]
pub struct ShareCard {
    pub sparks: f64,
    pub address: String,
    pub rank: Option<usize>,
}

impl ShareCard {
    pub fn new(sparks: f64, address: impl Into<String>, rank: Option<usize>) -> Self {
        Self { sparks, address: address.into(), rank }
    }

    pub fn to_svg(&self) -> String {
        let sparks = format_sparks(self.sparks);
        let address = escape(&truncate_address(&self.address, 10, 8));

        let badge = match self.rank {
            Some(rank) => format!(
                r##"<g transform="translate(472,32)"><rect width="96" height="40" rx="20" fill="{fill}"/><text x="48" y="27" text-anchor="middle" font-size="20" font-weight="700" fill="#1f1300">#{rank}</text></g>"##,
                fill = badge_fill(rank),
            ),
            None => String::new(),
        };

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#8b5cf6" stop-opacity="0.95"/><stop offset="1" stop-color="#eab308" stop-opacity="0.95"/></linearGradient></defs>
<rect width="{w}" height="{h}" rx="16" fill="url(#bg)"/>
<g font-family="Inter, Helvetica, Arial, sans-serif" fill="#ffffff">
<text x="32" y="72" font-size="40" font-weight="700">Firewall Genesis</text>
<text x="32" y="140" font-size="30" font-weight="600">🔥 {sparks} Sparks</text>
<text x="32" y="176" font-size="16" opacity="0.9">{address}</text>
<text x="32" y="283" font-size="15" opacity="0.9">Created with ❤️ by {ATTRIBUTION}</text>
</g>
{badge}
</svg>"##,
            w = CARD_WIDTH,
            h = CARD_HEIGHT,
        )
    }

    pub fn share_text(&self) -> String {
        let sparks = format_sparks(self.sparks);
        let standing = match self.rank {
            Some(rank) => format!("Ranked #{rank} and climbing! 📈"),
            None => "Climbing every week! 📈".to_string(),
        };
        format!(
            "🔥 JUST BROKE {sparks} SPARKS IN @UseFirewall GENESIS! 🔥\n\n\
             Sitting on a massive {sparks} Sparks. {standing}\n\
             The grind is paying off BIG TIME. 🚀\n\n\
             Check your own Sparks balance on the dashboard built by {ATTRIBUTION}\n\n\
             WHO'S WITH ME FOR THE NEXT MILESTONE? 👀\n\n\
             {HASHTAG}"
        )
    }

    pub fn intent_url(&self) -> String {
        format!("{INTENT_BASE}?text={}", urlencoding::encode(&self.share_text()))
    }

    /// Download name for the exported image, e.g. `sparks-0x1234.png`.
    pub fn file_name(&self, extension: &str) -> String {
        let stem: String = self
            .address
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(10)
            .collect();
        if stem.is_empty() {
            format!("sparks-card.{extension}")
        } else {
            format!("sparks-{stem}.{extension}")
        }
    }
}

fn badge_fill(rank: usize) -> &'static str {
    match rank {
        1 => "#facc15",
        2 => "#e5e7eb",
        3 => "#f59e0b",
        _ => "#fde68a",
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_has_fixed_size_and_content() {
        let card = ShareCard::new(1200.0, "0x1234567890abcdef1234567890abcdef12345678", Some(3));
        let svg = card.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="600" height="315""#));
        assert!(svg.contains("1200 Sparks"));
        assert!(svg.contains("0x12345678…12345678"));
        assert!(svg.contains("#3"));
        assert!(svg.contains("@magicianafk"));
    }

    #[test]
    fn test_svg_without_rank_has_no_badge() {
        let svg = ShareCard::new(5.5, "0xabc", None).to_svg();
        assert!(!svg.contains("<g transform"));
        assert!(svg.contains("5.5 Sparks"));
    }

    #[test]
    fn test_address_is_escaped() {
        let svg = ShareCard::new(1.0, "<b>&", None).to_svg();
        assert!(svg.contains("&lt;b&gt;&amp;"));
    }

    #[test]
    fn test_share_text_and_intent() {
        let card = ShareCard::new(850_000.0, "0xabc", Some(12));
        let text = card.share_text();
        assert!(text.contains("850000 SPARKS"));
        assert!(text.contains("Ranked #12"));
        assert!(text.ends_with("#FirewallGenesis"));

        let url = card.intent_url();
        assert!(url.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(url.contains("%23FirewallGenesis"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(ShareCard::new(1.0, "0x1234567890abcdef", None).file_name("png"), "sparks-0x12345678.png");
        assert_eq!(ShareCard::new(1.0, "…", None).file_name("svg"), "sparks-card.svg");
    }
}
