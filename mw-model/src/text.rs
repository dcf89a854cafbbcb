use serde::Serialize;

/// Raw lines copied into the output, optionally indented to the current depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub lines: Vec<String>,
    pub indent: bool,
}

impl Text {
    pub fn new<I, S>(lines: I, indent: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            indent,
        }
    }

    /// Build a comment block from `lines` in the given style.
    ///
    /// A single line gets the opening prefix and the closing terminator on
    /// the same line. Several lines get the opening prefix on the first line,
    /// the continuation prefix on the rest and the terminator on the last.
    pub fn comment<I, S>(lines: I, style: CommentStyle, indent: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<S> = lines.into_iter().collect();
        let last = lines.len().saturating_sub(1);
        let parts = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let prefix = if i == 0 {
                    style.start_prefix()
                } else {
                    style.prefix()
                };
                let end = if i == last { style.end() } else { "" };
                format!("{prefix}{}{end}", line.as_ref())
            })
            .collect();
        Self {
            lines: parts,
            indent,
        }
    }
}

/// Comment style for [`Text::comment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentStyle {
    /// `// ...`
    #[default]
    Line,
    /// `/// ...`
    Doc,
    /// `/* ... */`
    Block,
    /// `/** ... */`
    DocBlock,
    /// Lines written as they are.
    Plain,
}

impl CommentStyle {
    fn start_prefix(self) -> &'static str {
        match self {
            CommentStyle::Line => "// ",
            CommentStyle::Doc => "/// ",
            CommentStyle::Block => "/* ",
            CommentStyle::DocBlock => "/** ",
            CommentStyle::Plain => "",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            CommentStyle::Line => "// ",
            CommentStyle::Doc => "/// ",
            CommentStyle::Block | CommentStyle::DocBlock => " * ",
            CommentStyle::Plain => "",
        }
    }

    fn end(self) -> &'static str {
        match self {
            CommentStyle::Block | CommentStyle::DocBlock => " */",
            _ => "",
        }
    }
}
