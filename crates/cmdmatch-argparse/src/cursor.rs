/// Whether a token would be taken for an option rather than a value.
///
/// Negative integer literals (`-5`) are values.
pub fn looks_like_option(token: &str) -> bool {
    token.starts_with('-') && !is_negative_integer(token)
}

fn is_negative_integer(token: &str) -> bool {
    token
        .strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// The remaining tokens of one parse call.
///
/// Owned by the driver and lent to the matchers for the duration of the call.
#[derive(Debug)]
pub(crate) struct TokenCursor<'t> {
    tokens: Vec<&'t str>,
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    pub(crate) fn new<S: AsRef<str>>(tokens: &'t [S]) -> Self {
        Self {
            tokens: tokens.iter().map(AsRef::as_ref).collect(),
            pos: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.pos).copied()
    }

    pub(crate) fn next(&mut self) -> Option<&'t str> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    /// Number of leading tokens that do not look like options.
    pub(crate) fn run_length(&self) -> usize {
        self.tokens[self.pos..]
            .iter()
            .take_while(|t| !looks_like_option(t))
            .count()
    }
}
