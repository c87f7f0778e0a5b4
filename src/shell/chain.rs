use tracing::debug;

/// Operator that precedes a chain element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOp {
    /// First element of a chain.
    None,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `;`
    Seq,
}

impl ChainOp {
    /// Whether an element preceded by this operator runs after `last_status`.
    pub fn should_run(self, last_status: i32) -> bool {
        match self {
            ChainOp::None | ChainOp::Seq => true,
            ChainOp::And => last_status == 0,
            ChainOp::Or => last_status != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    pub text: String,
    pub op: ChainOp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    links: Vec<ChainLink>,
}

impl Chain {
    /// Splits `line` on `;`, `&&` and `||` after removing any comment.
    ///
    /// Empty segments are dropped; the first kept one always gets
    /// [`ChainOp::None`].
    pub fn parse(line: &str) -> Self {
        let line = strip_comment(line);
        let bytes = line.as_bytes();
        let mut chain = Chain::default();
        let mut pending = ChainOp::None;
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            let next = bytes.get(i + 1).copied();
            let op = match (bytes[i], next) {
                (b'&', Some(b'&')) => Some((ChainOp::And, 2)),
                (b'|', Some(b'|')) => Some((ChainOp::Or, 2)),
                (b';', _) => Some((ChainOp::Seq, 1)),
                _ => None,
            };
            match op {
                Some((op, width)) => {
                    chain.push(&line[start..i], pending);
                    pending = op;
                    i += width;
                    start = i;
                }
                None => i += 1,
            }
        }
        chain.push(&line[start..], pending);

        debug!(segments = chain.links.len(), "parsed chain");
        chain
    }

    fn push(&mut self, segment: &str, op: ChainOp) {
        let text = segment.trim();
        if text.is_empty() {
            return;
        }
        let op = if self.links.is_empty() { ChainOp::None } else { op };
        self.links.push(ChainLink {
            text: text.to_string(),
            op,
        });
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Cuts `line` at the first `#` that starts a word.
pub fn strip_comment(line: &str) -> &str {
    let mut prev_blank = true;
    for (idx, c) in line.char_indices() {
        if c == '#' && prev_blank {
            return &line[..idx];
        }
        prev_blank = c.is_whitespace();
    }
    line
}
