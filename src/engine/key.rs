//! Key vocabulary for the normal-mode subset.
//!
//! Every incoming key string is classified exactly once into a closed token
//! enum; the interpreter then matches on tokens instead of comparing strings.

/// Distinguished cancellation token sent by the harness for the Esc key.
pub const ESCAPE: &str = "Escape";

/// A cursor movement that never mutates the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordForward,
    WordBackward,
    WordEnd,
    ParagraphBackward,
    ParagraphForward,
    MatchBracket,
    /// `G` - last line, or line `count` when a count was typed.
    GotoLine,
    /// `gg` - first line, or line `count` when a count was typed.
    GotoLineFirst,
    RepeatFind,
    RepeatFindReverse,
}

impl Motion {
    /// Whether a numeric count repeats this motion. Line-target motions and
    /// absolute-column motions consume their count differently (or not at
    /// all), so the repeat loop runs them once.
    pub fn repeatable(self) -> bool {
        !matches!(
            self,
            Motion::LineStart
                | Motion::LineEnd
                | Motion::MatchBracket
                | Motion::GotoLine
                | Motion::GotoLineFirst
        )
    }
}

/// An edit executed by a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// `x` - delete the character under the cursor.
    DeleteChar,
}

/// A command that needs a following key to know its extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Change,
    Yank,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Operator::Delete),
            'c' => Some(Operator::Change),
            'y' => Some(Operator::Yank),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Delete => 'd',
            Operator::Change => 'c',
            Operator::Yank => 'y',
        }
    }
}

/// Single-line character search: `f`, `F`, `t`, `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finder {
    Find,
    FindBackward,
    Till,
    TillBackward,
}

impl Finder {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'f' => Some(Finder::Find),
            'F' => Some(Finder::FindBackward),
            't' => Some(Finder::Till),
            'T' => Some(Finder::TillBackward),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Finder::Find => 'f',
            Finder::FindBackward => 'F',
            Finder::Till => 't',
            Finder::TillBackward => 'T',
        }
    }

    pub fn forward(self) -> bool {
        matches!(self, Finder::Find | Finder::Till)
    }

    /// `t`/`T` stop short of the target instead of landing on it.
    pub fn till(self) -> bool {
        matches!(self, Finder::Till | Finder::TillBackward)
    }
}

/// One fully classified keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    Motion(Motion),
    Edit(Edit),
    Operator(Operator),
    Finder(Finder),
    Digit(u8),
    /// A lone `g`, waiting for a second `g`.
    GotoPrefix,
    Escape,
    Unknown,
}

/// Classify a harness key string. Printable keys arrive as themselves,
/// `"gg"` as the literal two-character sequence, Escape as `"Escape"`.
pub fn classify(key: &str) -> KeyToken {
    if key == ESCAPE {
        return KeyToken::Escape;
    }
    if key == "gg" {
        return KeyToken::Motion(Motion::GotoLineFirst);
    }
    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return KeyToken::Unknown;
    };
    if let Some(d) = c.to_digit(10) {
        return KeyToken::Digit(d as u8);
    }
    if let Some(op) = Operator::from_char(c) {
        return KeyToken::Operator(op);
    }
    if let Some(finder) = Finder::from_char(c) {
        return KeyToken::Finder(finder);
    }
    match c {
        'h' => KeyToken::Motion(Motion::Left),
        'l' => KeyToken::Motion(Motion::Right),
        'k' => KeyToken::Motion(Motion::Up),
        'j' => KeyToken::Motion(Motion::Down),
        '0' => KeyToken::Motion(Motion::LineStart),
        '$' => KeyToken::Motion(Motion::LineEnd),
        'w' => KeyToken::Motion(Motion::WordForward),
        'b' => KeyToken::Motion(Motion::WordBackward),
        'e' => KeyToken::Motion(Motion::WordEnd),
        '{' => KeyToken::Motion(Motion::ParagraphBackward),
        '}' => KeyToken::Motion(Motion::ParagraphForward),
        '%' => KeyToken::Motion(Motion::MatchBracket),
        'G' => KeyToken::Motion(Motion::GotoLine),
        ';' => KeyToken::Motion(Motion::RepeatFind),
        ',' => KeyToken::Motion(Motion::RepeatFindReverse),
        'g' => KeyToken::GotoPrefix,
        'x' => KeyToken::Edit(Edit::DeleteChar),
        _ => KeyToken::Unknown,
    }
}
