use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// How rendered text is transformed before it is stored or compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Byte-for-byte, control sequences included.
    Raw,
    /// Control and styling sequences removed, leaving what a viewer sees.
    #[default]
    Visual,
}

impl Normalization {
    pub fn apply(self, text: &str) -> Cow<'_, str> {
        match self {
            Normalization::Raw => Cow::Borrowed(text),
            Normalization::Visual => strip_ansi(text),
        }
    }
}

// Order matters: the specific introducers must win over the generic
// two-byte escape. A sequence cut off by the end of the text (or by the
// next ESC, for strings) is removed up to that point, and a stray ESC is
// dropped on its own.
static ANSI_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
          \x1b\[ [0-?]* [\x20-/]* [@-~]?        # CSI, e.g. SGR colours and cursor moves
        | \x1b\] [^\x07\x1b]* (?:\x07|\x1b\\)?  # OSC, e.g. titles and hyperlinks
        | \x1b [PX^_] [^\x1b]* (?:\x1b\\)?      # DCS, SOS, PM, APC
        | \x1b [\x20-/]+ [0-~]?                 # nF, e.g. charset selection
        | \x1b [0-~]                            # two-byte escapes
        | \x1b                                  # stray ESC
        | \x{9b} [0-?]* [\x20-/]* [@-~]?        # 8-bit CSI
        ",
    )
    .expect("ANSI pattern is valid")
});

/// Remove terminal escape sequences, keeping only visible characters.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains(['\x1b', '\u{9b}']) {
        return Cow::Borrowed(text);
    }
    ANSI_SEQUENCE.replace_all(text, "")
}
