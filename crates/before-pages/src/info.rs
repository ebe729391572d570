//! The "About Before" page.

use crate::config::PageConfig;
use crate::markup::{a, div, heading, li, p, strong, text, ul, HeadingLevel, Node};
use crate::route::Page;

/// This page is plain prose and never ships client script.
pub const CONFIG: PageConfig = PageConfig::STATIC;

pub const DISCORD_URL: &str = "https://discord.sibr.dev";
pub const SOURCE_URL: &str = "https://github.com/iliana/before";

/// Build the page content.
pub fn render() -> Node {
    div(
        "tw-container tw-py-4 lg:tw-py-6",
        vec![div(
            "tw-prose tw-prose-lg tw-prose-invert tw-mx-auto \
             prose-p:tw-text-white prose-li:tw-text-white",
            vec![
                p(vec![
                    strong(vec![text("Before")]),
                    text(
                        " is a tool for replaying archived Blaseball data developed by the \
                         Society for Internet Blaseball Research. It works by setting a browser \
                         cookie with a time offset. It serves your browser a (mostly) unmodified \
                         copy of the Blaseball frontend application from that time, then serves \
                         that application archived data by emulating the application backend.",
                    ),
                ]),
                p(vec![text(
                    "There are many imperfections to this system: there are data gaps in \
                     SIBR’s archives; and data for certain objects is sometimes not granular \
                     enough. This is most notably seen when a player is affected by a game \
                     event; clicking on the player will not show the change until usually about \
                     a minute later. (Incinerations and Feedback swaps prior to Season 5 are \
                     also impacted by this.)",
                )]),
                p(vec![text(
                    "Using Before for research and videos is welcomed; please cite \
                     before.sibr.dev, and don’t take our archives as the only word of truth, \
                     especially in early seasons.",
                )]),
                p(vec![
                    text("If you run into an issue with Before, you can "),
                    a(DISCORD_URL, "join the SIBR Discord server"),
                    text(" and ask in either #help-desk or #before. "),
                    a(SOURCE_URL, "Before’s source code is available on GitHub"),
                    text("."),
                ]),
                heading(HeadingLevel::H2, vec![text("Various tips")]),
                ul(vec![li(vec![text(
                    "You can flute to your favorite team to pin their games to the top of the \
                     Watch Live tab. The most reliable way to do this is to jump to an \
                     Earlseason (Days 1–27) in the Expansion Era, then click on a team and \
                     click “Favorite Team”.",
                )])]),
            ],
        )],
    )
}

/// Marker type registering this page with hosts.
pub struct Info;

impl Page for Info {
    const PATH: &'static str = "info";
    const TITLE: &'static str = "Info";
    const CONFIG: PageConfig = CONFIG;

    fn render() -> Node {
        self::render()
    }
}
