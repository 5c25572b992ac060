use crate::span::Span;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone)]
pub struct Error {
    message: String,
    span: Option<Span>,
}

pub fn error(message: impl ToString) -> Error {
    Error {
        message: message.to_string(),
        span: None,
    }
}

pub fn error_span(message: impl ToString, span: Span) -> Error {
    Error {
        message: message.to_string(),
        span: Some(span),
    }
}

impl Error {
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Renders the error against the source it was produced from,
    /// pointing at the offending line.
    pub fn render<'a>(&'a self, src: &'a str) -> RenderedError<'a> {
        RenderedError { error: self, src }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

pub struct RenderedError<'a> {
    error: &'a Error,
    src: &'a str,
}

impl std::fmt::Display for RenderedError<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.error.message)?;
        let Some(span) = self.error.span else {
            return Ok(());
        };

        let start = span.start().min(self.src.len());
        let line_start = self.src[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = self.src[start..]
            .find('\n')
            .map(|i| start + i)
            .unwrap_or(self.src.len());
        let line = self.src[..start].matches('\n').count() + 1;
        let column = start - line_start + 1;

        writeln!(f)?;
        writeln!(f, " --> {line}:{column}")?;
        writeln!(f, "  |")?;
        writeln!(f, "  | {}", &self.src[line_start..line_end])?;
        write!(f, "  | ")?;
        for _ in 0..column - 1 {
            f.write_str(" ")?;
        }
        let width = span.end().min(line_end).saturating_sub(start).max(1);
        for _ in 0..width {
            f.write_str("^")?;
        }
        Ok(())
    }
}
