//! Tool-call marker detection in assistant replies.
//!
//! The model signals a tool call by embedding a literal marker in its text
//! output: `[[get_stats: <username>]]`. Detection is a separate, tagged
//! parse step rather than an inline regex at the call site, so the session
//! logic branches on [`ParsedReply`] instead of re-scanning raw text. The
//! wire marker itself is fixed — it is what the upstream model was prompted
//! to emit.

/// Tools the model may invoke by marker.
///
/// The session matches on this exhaustively, so adding a variant forces a
/// dispatch arm at the same time as the marker is taught to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// `[[get_stats: <username>]]` — battle royale stats by display name.
    GetStats,
}

impl Tool {
    const ALL: &'static [Tool] = &[Tool::GetStats];

    /// The name the model writes between `[[` and `:`.
    pub fn marker_name(self) -> &'static str {
        match self {
            Tool::GetStats => "get_stats",
        }
    }
}

/// Classified assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    /// No recognised tool marker; the reply is final.
    PlainText,
    /// The first recognised tool marker in the reply.
    ToolInvocation {
        /// The invoked tool.
        tool: Tool,
        /// Trimmed argument text between the colon and the closing
        /// brackets. May be empty; dispatch happens regardless and the
        /// downstream API reports not-found.
        args: String,
    },
}

/// Scan an assistant reply for the first recognised tool marker.
///
/// Case-sensitive, literal brackets, first occurrence only; later markers
/// in the same reply are ignored. A marker without its closing `]]` is
/// treated as plain text.
pub fn parse_reply(content: &str) -> ParsedReply {
    let first = Tool::ALL
        .iter()
        .filter_map(|tool| {
            let marker = format!("[[{}:", tool.marker_name());
            content.find(&marker).map(|at| (at, *tool, marker.len()))
        })
        .min_by_key(|(at, _, _)| *at);

    let Some((at, tool, marker_len)) = first else {
        return ParsedReply::PlainText;
    };

    let rest = &content[at + marker_len..];
    let Some(end) = rest.find("]]") else {
        return ParsedReply::PlainText;
    };

    ParsedReply::ToolInvocation {
        tool,
        args: rest[..end].trim().to_string(),
    }
}
