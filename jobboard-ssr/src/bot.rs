//! Crawler detection for SSR routing.
//!
//! A routing hint, not a security control: anything can claim to be a bot.

/// Lowercase substrings identifying crawlers, unfurlers and audit tools.
const BOT_TOKENS: &[&str] = &[
    // search engines
    "googlebot",
    "google-inspectiontool",
    "adsbot-google",
    "bingbot",
    "bingpreview",
    "slurp",
    "duckduckbot",
    "baiduspider",
    "yandex",
    "sogou",
    "exabot",
    "applebot",
    "petalbot",
    "seznambot",
    "qwantify",
    // social unfurlers and messengers
    "facebookexternalhit",
    "facebot",
    "twitterbot",
    "linkedinbot",
    "slackbot",
    "discordbot",
    "telegrambot",
    "whatsapp",
    "pinterest",
    "redditbot",
    "embedly",
    "skypeuripreview",
    // seo and monitoring tools
    "ahrefsbot",
    "semrushbot",
    "mj12bot",
    "dotbot",
    "screaming frog",
    "rogerbot",
    "lighthouse",
    "chrome-lighthouse",
    "pagespeed",
    "gtmetrix",
    "pingdom",
    "uptimerobot",
    "headlesschrome",
    "prerender",
    // generic
    "bot",
    "spider",
    "crawler",
    "crawl",
];

/// Whether a `User-Agent` value looks like an automated client.
///
/// An empty or missing agent is treated as human so the SPA is served.
pub fn is_bot(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    !ua.trim().is_empty() && BOT_TOKENS.iter().any(|token| ua.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_googlebot() {
        assert!(is_bot(
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"
        ));
    }

    #[test]
    fn test_desktop_chrome_is_human() {
        assert!(!is_bot(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/119"
        ));
    }

    #[test]
    fn test_mobile_safari_is_human() {
        assert!(!is_bot(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1"
        ));
    }

    #[test]
    fn test_unfurlers_and_tools() {
        assert!(is_bot("facebookexternalhit/1.1"));
        assert!(is_bot("Slackbot-LinkExpanding 1.0 (+https://api.slack.com/robots)"));
        assert!(is_bot("Mozilla/5.0 (compatible; AhrefsBot/7.0)"));
        assert!(is_bot("Screaming Frog SEO Spider/19.0"));
        assert!(is_bot("Mozilla/5.0 HeadlessChrome/119.0"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_bot("BINGBOT/2.0"));
    }

    #[test]
    fn test_empty_agent_is_human() {
        assert!(!is_bot(""));
        assert!(!is_bot("   "));
    }
}
