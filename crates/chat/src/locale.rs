//! Locale resolution: raw tokens → canonical command keywords.
//!
//! Each language has an explicit synonym table. English keywords work in
//! every language; Hebrew keywords are recognized once the conversation has
//! switched to Hebrew. Matching is case-insensitive on the trimmed token.
//!
//! Flow-reserved tokens (yes/no, `!`, back) are resolved separately and are
//! language independent.

use serde::{Deserialize, Serialize};

/// Supported reply languages, in menu order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    En,
    He,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::He];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::He => "he",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Language::En),
            "he" => Some(Language::He),
            _ => None,
        }
    }

    /// 1-based position in the language menu.
    pub fn from_menu_choice(input: &str) -> Option<Self> {
        let index = input.trim().parse::<usize>().ok()?;
        Self::ALL.get(index.checked_sub(1)?).copied()
    }
}

/// Top-level commands, independent of the language they were typed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalCommand {
    Low,
    Need,
    Edit,
    List,
    ListExt,
    Sup,
    Supa,
    Lang,
    Help,
    Lows,
    Pref,
    Back,
}

impl CanonicalCommand {
    /// Commands listed by `Help`, in display order.
    pub const HELP_ORDER: [CanonicalCommand; 12] = [
        CanonicalCommand::Low,
        CanonicalCommand::Lows,
        CanonicalCommand::Need,
        CanonicalCommand::List,
        CanonicalCommand::ListExt,
        CanonicalCommand::Edit,
        CanonicalCommand::Sup,
        CanonicalCommand::Supa,
        CanonicalCommand::Lang,
        CanonicalCommand::Pref,
        CanonicalCommand::Back,
        CanonicalCommand::Help,
    ];

    /// Whether the command needs an argument (bare keyword is reserved).
    pub fn requires_argument(self) -> bool {
        matches!(
            self,
            CanonicalCommand::Low | CanonicalCommand::Need | CanonicalCommand::Edit
        )
    }
}

use CanonicalCommand as C;

const ENGLISH: &[(&str, CanonicalCommand)] = &[
    ("low", C::Low),
    ("need", C::Need),
    ("n", C::Need),
    ("edit", C::Edit),
    ("e", C::Edit),
    ("list", C::List),
    ("listext", C::ListExt),
    ("ext", C::ListExt),
    ("sup", C::Sup),
    ("supa", C::Supa),
    ("lang", C::Lang),
    ("help", C::Help),
    ("lows", C::Lows),
    ("s", C::Lows),
    ("pref", C::Pref),
    ("back", C::Back),
    ("b", C::Back),
    ("cancel", C::Back),
];

const HEBREW: &[(&str, CanonicalCommand)] = &[
    ("פריט", C::Low),
    ("פ", C::Low),
    ("צריך", C::Need),
    ("צ", C::Need),
    ("ערוך", C::Edit),
    ("ער", C::Edit),
    ("מלאי", C::List),
    ("מ", C::List),
    ("מלאימורחב", C::ListExt),
    ("ממ", C::ListExt),
    ("ספק", C::Sup),
    ("ס", C::Sup),
    ("ספקחדש", C::Supa),
    ("סח", C::Supa),
    ("שפה", C::Lang),
    ("עזרה", C::Help),
    ("ע", C::Help),
    ("פמ", C::Lows),
    ("ם", C::Lows),
    ("העדפות", C::Pref),
    ("חזור", C::Back),
    ("ח", C::Back),
    ("ביטול", C::Back),
];

fn tables(language: Language) -> &'static [&'static [(&'static str, CanonicalCommand)]] {
    match language {
        Language::En => &[ENGLISH],
        Language::He => &[HEBREW, ENGLISH],
    }
}

/// Resolve a single token to a command in the given language.
///
/// `None` means "not a keyword": the dispatcher treats the whole message as
/// an implicit Low.
pub fn resolve(token: &str, language: Language) -> Option<CanonicalCommand> {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return None;
    }
    tables(language)
        .iter()
        .flat_map(|table| table.iter())
        .find(|(keyword, _)| *keyword == token)
        .map(|(_, command)| *command)
}

/// Keywords for `command` in `language`: (full, short).
pub fn keywords(command: CanonicalCommand, language: Language) -> (&'static str, Option<&'static str>) {
    let table = match language {
        Language::En => ENGLISH,
        Language::He => HEBREW,
    };
    let mut matching = table.iter().filter(|(_, c)| *c == command).map(|(k, _)| *k);
    match (language, matching.next()) {
        (Language::En, _) => (english_display(command), english_short(command)),
        (Language::He, Some(full)) => (full, matching.next()),
        (Language::He, None) => (english_display(command), english_short(command)),
    }
}

fn english_display(command: CanonicalCommand) -> &'static str {
    match command {
        C::Low => "Low",
        C::Need => "Need",
        C::Edit => "Edit",
        C::List => "List",
        C::ListExt => "ListExt",
        C::Sup => "Sup",
        C::Supa => "Supa",
        C::Lang => "Lang",
        C::Help => "Help",
        C::Lows => "Lows",
        C::Pref => "Pref",
        C::Back => "Back",
    }
}

fn english_short(command: CanonicalCommand) -> Option<&'static str> {
    match command {
        C::Need => Some("N"),
        C::Edit => Some("E"),
        C::ListExt => Some("Ext"),
        C::Lows => Some("S"),
        C::Back => Some("B"),
        _ => None,
    }
}

/// Answer to a yes/no prompt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

const YES: &[&str] = &["yes", "y", "ye", "כן", "כ"];
const NO: &[&str] = &["no", "n", "לא", "ל"];

/// Cancel / end-of-batch token. Never a valid item name.
pub const CANCEL_TOKEN: &str = "!";

pub fn confirmation(token: &str) -> Option<Confirmation> {
    let token = token.trim().to_lowercase();
    if YES.contains(&token.as_str()) {
        Some(Confirmation::Yes)
    } else if NO.contains(&token.as_str()) {
        Some(Confirmation::No)
    } else {
        None
    }
}

pub fn is_cancel(token: &str) -> bool {
    token.trim() == CANCEL_TOKEN
}

/// `Back` in any supported language.
pub fn is_back(token: &str) -> bool {
    resolve(token, Language::He) == Some(CanonicalCommand::Back)
}
